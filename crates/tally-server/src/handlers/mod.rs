//! HTTP request handlers organized by domain
//!
//! Each submodule contains handlers for a specific area.

pub mod charts;
pub mod pages;
pub mod transactions;

// Re-export all handlers for use in router
pub use charts::*;
pub use pages::*;
pub use transactions::*;
