//! Transaction filtering for listings

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::calendar::DatedTransaction;
use crate::models::{Category, SubCategory};

/// Row filter. Every bound is inclusive, unset criteria match everything, and
/// set criteria are combined with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionFilter {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub categories: Vec<Category>,
    pub sub_categories: Vec<SubCategory>,
    pub min_amount: Option<Decimal>,
    pub max_amount: Option<Decimal>,
}

impl TransactionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_from(mut self, from: NaiveDate) -> Self {
        self.from = Some(from);
        self
    }

    pub fn with_to(mut self, to: NaiveDate) -> Self {
        self.to = Some(to);
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.categories.push(category);
        self
    }

    pub fn with_sub_category(mut self, sub_category: SubCategory) -> Self {
        self.sub_categories.push(sub_category);
        self
    }

    pub fn with_min_amount(mut self, min: Decimal) -> Self {
        self.min_amount = Some(min);
        self
    }

    pub fn with_max_amount(mut self, max: Decimal) -> Self {
        self.max_amount = Some(max);
        self
    }

    pub fn matches(&self, tx: &DatedTransaction) -> bool {
        let date = tx.date();
        let amount = tx.amount();

        self.from.map_or(true, |from| date >= from)
            && self.to.map_or(true, |to| date <= to)
            && (self.categories.is_empty() || self.categories.contains(&tx.category()))
            && (self.sub_categories.is_empty()
                || self.sub_categories.contains(&tx.sub_category()))
            && self.min_amount.map_or(true, |min| amount >= min)
            && self.max_amount.map_or(true, |max| amount <= max)
    }

    pub fn apply<'a>(&self, transactions: &'a [DatedTransaction]) -> Vec<&'a DatedTransaction> {
        transactions.iter().filter(|tx| self.matches(tx)).collect()
    }
}
