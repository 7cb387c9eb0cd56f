//! Expense breakdown by sub-category over the full history

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

use super::calendar::DatedTransaction;
use crate::error::{Error, Result};
use crate::models::SubCategory;

/// Default share, in percent, at or above which a pie slice gets a label
pub const DEFAULT_LABEL_THRESHOLD_PCT: u32 = 15;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySlice {
    pub sub_category: SubCategory,
    pub total: Decimal,
    /// Share of the grand total in percent, rounded to two places for display
    pub share_pct: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoricalBreakdown {
    /// One slice per sub-category that has any spending, largest first
    pub slices: Vec<CategorySlice>,
    pub grand_total: Decimal,
}

impl CategoricalBreakdown {
    /// Whether `slice` reaches `threshold_pct` of the grand total. Compared on
    /// exact totals, not the rounded display share.
    pub fn is_labelled(&self, slice: &CategorySlice, threshold_pct: u32) -> bool {
        slice.total * Decimal::ONE_HUNDRED >= Decimal::from(threshold_pct) * self.grand_total
    }

    /// Slices whose share reaches `threshold_pct`
    pub fn labelled(&self, threshold_pct: u32) -> impl Iterator<Item = &CategorySlice> {
        self.slices
            .iter()
            .filter(move |slice| self.is_labelled(slice, threshold_pct))
    }

    pub fn slice(&self, sub_category: SubCategory) -> Option<&CategorySlice> {
        self.slices.iter().find(|s| s.sub_category == sub_category)
    }
}

/// Sum every non-income transaction per sub-category.
pub fn categorical_expenses(transactions: &[DatedTransaction]) -> Result<CategoricalBreakdown> {
    let mut totals: BTreeMap<SubCategory, Decimal> = BTreeMap::new();
    for tx in transactions.iter().filter(|tx| !tx.is_income()) {
        *totals.entry(tx.sub_category()).or_default() += tx.amount();
    }

    if totals.is_empty() {
        return Err(Error::empty("categorical expenses"));
    }

    let grand_total: Decimal = totals.values().copied().sum();
    let hundred = Decimal::ONE_HUNDRED;

    let mut slices: Vec<CategorySlice> = totals
        .into_iter()
        .map(|(sub_category, total)| CategorySlice {
            sub_category,
            total,
            share_pct: (total * hundred / grand_total).round_dp(2),
        })
        .collect();
    // BTreeMap order already breaks ties by sub-category
    slices.sort_by(|a, b| b.total.cmp(&a.total));

    Ok(CategoricalBreakdown {
        slices,
        grand_total,
    })
}
