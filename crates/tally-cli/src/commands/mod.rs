//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Shared setup (config, store) and `init`
//! - `transactions` - Add and list transactions
//! - `summary` - Date-range totals
//! - `charts` - Chart rendering
//! - `menu` - Interactive numbered menu
//! - `serve` - Web server command

pub mod charts;
pub mod core;
pub mod menu;
pub mod serve;
pub mod summary;
pub mod transactions;

// Re-export command functions for main.rs
pub use charts::*;
pub use core::*;
pub use menu::*;
pub use serve::*;
pub use summary::*;
pub use transactions::*;

/// Truncate a string to a maximum number of characters, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
