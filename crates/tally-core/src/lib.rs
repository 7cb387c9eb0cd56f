//! Tally Core Library
//!
//! Shared functionality for the Tally personal finance tracker:
//! - Transaction model with a closed category/sub-category classification
//! - Append-only CSV transaction store
//! - Interactive classifier for entering new transactions
//! - Analytics engine (cash flow, categorical and cumulative views)
//! - SVG chart renderer for prepared aggregates
//! - TOML configuration with embedded defaults

pub mod analytics;
pub mod classifier;
pub mod config;
pub mod error;
pub mod models;
pub mod render;
pub mod store;

pub use analytics::{
    CashFlowReport, CategoricalBreakdown, ChartData, ChartKind, DatedTransaction, Ledger,
    PeriodSummary, SpendComparison, SubCategoryByMonth, TransactionFilter, YearMonth,
};
pub use classifier::Prompter;
pub use config::Config;
pub use error::{Error, Result};
pub use models::{
    format_money, Amount, Category, Memo, SubCategory, Transaction, TransactionRecord,
    DATE_FORMAT,
};
pub use render::ChartStyle;
pub use store::TransactionStore;
