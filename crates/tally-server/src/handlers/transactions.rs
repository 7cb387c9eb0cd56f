//! Transaction handlers

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use chrono::Local;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{AppError, AppState, MAX_PAGE_LIMIT};
use tally_core::analytics::parse_store_date;
use tally_core::classifier::{parse_category_code, parse_entry_date};
use tally_core::{
    Amount, Category, DatedTransaction, Memo, SubCategory, Transaction, TransactionFilter,
};

/// Query parameters for listing transactions
#[derive(Debug, Default, Deserialize)]
pub struct TransactionQuery {
    #[serde(default = "default_limit")]
    pub limit: usize,
    /// Earliest date (mm-dd-yyyy)
    pub from: Option<String>,
    /// Latest date (mm-dd-yyyy)
    pub to: Option<String>,
    /// Category names or codes (comma-separated)
    pub category: Option<String>,
    /// Sub-category names (comma-separated)
    pub sub_category: Option<String>,
    pub min_amount: Option<Decimal>,
    pub max_amount: Option<Decimal>,
}

fn default_limit() -> usize {
    50
}

#[derive(Serialize)]
pub struct TransactionResponse {
    pub transactions: Vec<DatedTransaction>,
    /// Rows matching the filter, before the limit
    pub total: usize,
    pub limit: usize,
}

/// Split a comma-separated query value, skipping blanks
fn split_list(value: Option<&str>) -> impl Iterator<Item = &str> {
    value
        .unwrap_or("")
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

fn parse_category(value: &str) -> Result<Category, AppError> {
    parse_category_code(value)
        .or_else(|_| value.parse())
        .map_err(|_| AppError::bad_request(&format!("Unknown category: {}", value)))
}

fn build_filter(params: &TransactionQuery) -> Result<TransactionFilter, AppError> {
    let parse_date = |value: &str, name: &str| {
        parse_store_date(value).ok_or_else(|| {
            AppError::bad_request(&format!("Invalid {} date (use mm-dd-yyyy)", name))
        })
    };

    let mut filter = TransactionFilter::new();
    if let Some(from) = &params.from {
        filter = filter.with_from(parse_date(from, "from")?);
    }
    if let Some(to) = &params.to {
        filter = filter.with_to(parse_date(to, "to")?);
    }
    for category in split_list(params.category.as_deref()) {
        filter = filter.with_category(parse_category(category)?);
    }
    for sub in split_list(params.sub_category.as_deref()) {
        let sub: SubCategory = sub
            .parse()
            .map_err(|_| AppError::bad_request(&format!("Unknown sub-category: {}", sub)))?;
        filter = filter.with_sub_category(sub);
    }
    if let Some(min) = params.min_amount {
        filter = filter.with_min_amount(min);
    }
    if let Some(max) = params.max_amount {
        filter = filter.with_max_amount(max);
    }
    Ok(filter)
}

/// GET /api/transactions - List transactions, newest first
pub async fn list_transactions(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TransactionQuery>,
) -> Result<Json<TransactionResponse>, AppError> {
    // Input validation: clamp pagination parameters
    let limit = params.limit.clamp(1, MAX_PAGE_LIMIT);
    let filter = build_filter(&params)?;

    let ledger = state.store.load_ledger()?;
    let matching = ledger.filter(&filter);
    let total = matching.len();
    let transactions = matching.into_iter().rev().take(limit).cloned().collect();

    Ok(Json(TransactionResponse {
        transactions,
        total,
        limit,
    }))
}

/// Body for adding a transaction
#[derive(Debug, Deserialize)]
pub struct NewTransactionRequest {
    /// mm-dd-yyyy, default today
    pub date: Option<String>,
    /// Category name or code
    pub category: String,
    pub sub_category: String,
    #[serde(default)]
    pub memo: String,
    pub amount: Decimal,
}

/// POST /api/transactions - Append one transaction to the store
pub async fn create_transaction(
    State(state): State<Arc<AppState>>,
    Json(body): Json<NewTransactionRequest>,
) -> Result<(StatusCode, Json<DatedTransaction>), AppError> {
    let today = Local::now().date_naive();
    let date = parse_entry_date(body.date.as_deref().unwrap_or(""), today)?;
    let category = parse_category(&body.category)?;
    let sub_category = SubCategory::resolve(category.as_str(), &body.sub_category)?;
    let memo = Memo::new(body.memo)?;
    let amount = Amount::new(body.amount)?;

    let tx = Transaction::new(date, category, sub_category, memo, amount)?;
    state.store.append(&tx)?;
    info!("Added {} transaction via API", tx.sub_category());

    Ok((StatusCode::CREATED, Json(DatedTransaction::new(tx))))
}

#[derive(Serialize)]
pub struct CategoryOption {
    pub code: char,
    pub name: Category,
    pub sub_categories: &'static [SubCategory],
}

/// GET /api/options - Categories and their sub-categories, for entry forms
pub async fn get_options() -> Json<Vec<CategoryOption>> {
    Json(
        Category::ALL
            .into_iter()
            .map(|category| CategoryOption {
                code: category.code(),
                name: category,
                sub_categories: category.sub_categories(),
            })
            .collect(),
    )
}
