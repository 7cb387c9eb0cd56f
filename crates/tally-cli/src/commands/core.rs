//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `load_config` / `open_store` - Shared setup for every command
//! - `cmd_init` - Create the transaction store
//! - argument parsers shared by the other commands

use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use tally_core::analytics::parse_store_date;
use tally_core::classifier::parse_category_code;
use tally_core::{Category, Config, SubCategory, TransactionStore};

/// Load config from `--config`, the user override, or the embedded defaults
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    Config::load(path).context("Failed to load configuration")
}

/// Store at `--file` / TALLY_FILE if given, else the configured path
pub fn open_store(config: &Config, file: Option<&Path>) -> TransactionStore {
    TransactionStore::new(file.unwrap_or(&config.store.path))
}

pub fn cmd_init(store: &TransactionStore) -> Result<()> {
    let created = store
        .initialize()
        .with_context(|| format!("Failed to initialize {}", store.path().display()))?;

    if created {
        println!("✅ Created transaction store at {}", store.path().display());
        println!();
        println!("Next steps:");
        println!("  1. Add a transaction: tally add");
        println!("  2. View charts: tally chart cash-flow");
    } else {
        println!("Transaction store already exists at {}", store.path().display());
    }

    Ok(())
}

/// Parse a `mm-dd-yyyy` argument
pub fn parse_date_arg(value: &str, flag: &str) -> Result<NaiveDate> {
    parse_store_date(value)
        .with_context(|| format!("Invalid {} date '{}' (use mm-dd-yyyy)", flag, value))
}

/// Accept a category code (I/S/E/N) or its full name
pub fn parse_category_arg(value: &str) -> Result<Category> {
    parse_category_code(value)
        .or_else(|_| value.parse::<Category>())
        .with_context(|| format!("Unknown category '{}'", value))
}

/// Accept a sub-category name or its 1-based number in the category's list
pub fn parse_sub_category_arg(category: Category, value: &str) -> Result<SubCategory> {
    if value.trim().chars().all(|c| c.is_ascii_digit()) {
        return tally_core::classifier::parse_sub_category_choice(category, value)
            .with_context(|| format!("Invalid sub-category number for {}", category));
    }
    SubCategory::resolve(category.as_str(), value)
        .with_context(|| format!("Invalid sub-category '{}'", value))
}

pub fn parse_amount_arg(value: &str, flag: &str) -> Result<Decimal> {
    value
        .trim()
        .parse::<Decimal>()
        .with_context(|| format!("Invalid {} amount '{}'", flag, value))
}
