//! Totals for a date range

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use super::calendar::DatedTransaction;
use crate::error::{Error, Result};
use crate::models::{serialize_date, Category, DATE_FORMAT};

/// Income, spending and savings between two dates (both inclusive)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeriodSummary {
    #[serde(serialize_with = "serialize_date")]
    pub from: NaiveDate,
    #[serde(serialize_with = "serialize_date")]
    pub to: NaiveDate,
    pub income: Decimal,
    /// Essential plus Non-Essential
    pub spent: Decimal,
    /// Savings & Investments
    pub savings: Decimal,
    pub transactions: Vec<DatedTransaction>,
}

impl PeriodSummary {
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

pub fn summarize(
    transactions: &[DatedTransaction],
    from: NaiveDate,
    to: NaiveDate,
) -> Result<PeriodSummary> {
    if from > to {
        return Err(Error::InvalidData(format!(
            "Start date {} is after end date {}",
            from.format(DATE_FORMAT),
            to.format(DATE_FORMAT)
        )));
    }

    let rows: Vec<DatedTransaction> = transactions
        .iter()
        .filter(|tx| (from..=to).contains(&tx.date()))
        .cloned()
        .collect();

    if rows.is_empty() {
        return Err(Error::empty(format!(
            "no transactions between {} and {}",
            from.format(DATE_FORMAT),
            to.format(DATE_FORMAT)
        )));
    }

    let mut summary = PeriodSummary {
        from,
        to,
        income: Decimal::ZERO,
        spent: Decimal::ZERO,
        savings: Decimal::ZERO,
        transactions: Vec::new(),
    };
    for tx in &rows {
        match tx.category() {
            Category::Income => summary.income += tx.amount(),
            Category::SavingsInvestments => summary.savings += tx.amount(),
            Category::Essential | Category::NonEssential => summary.spent += tx.amount(),
        }
    }
    summary.transactions = rows;

    Ok(summary)
}
