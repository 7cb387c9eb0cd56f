//! Analytics engine
//!
//! Every view is a pure function over a snapshot of dated transactions. The
//! [`Ledger`] holds one such snapshot and hands out the aggregates; nothing in
//! here draws or writes anything.

mod calendar;
mod cash_flow;
mod categorical;
mod cumulative;
mod filter;
mod subcategory;
mod summary;

use std::str::FromStr;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

pub use calendar::{
    derive_calendar, month_name, parse_store_date, validate_record, DatedTransaction, YearMonth,
};
pub use cash_flow::{cash_flow, CashFlowBucket, CashFlowReport};
pub use categorical::{
    categorical_expenses, CategoricalBreakdown, CategorySlice, DEFAULT_LABEL_THRESHOLD_PCT,
};
pub use cumulative::{cumulative_spend, CumulativePoint, CumulativeSeries, SpendComparison};
pub use filter::TransactionFilter;
pub use subcategory::{sub_category_by_month, MonthlySubCategoryTotal, SubCategoryByMonth};
pub use summary::{summarize, PeriodSummary};

use crate::error::{Error, Result};
use crate::models::TransactionRecord;

/// The four charts the front ends offer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChartKind {
    CashFlow,
    CategoricalExpenses,
    SubcatExpensesByMonth,
    CumulativeSpend,
}

impl ChartKind {
    pub const ALL: [ChartKind; 4] = [
        Self::CashFlow,
        Self::CategoricalExpenses,
        Self::SubcatExpensesByMonth,
        Self::CumulativeSpend,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CashFlow => "cash-flow",
            Self::CategoricalExpenses => "categorical-expenses",
            Self::SubcatExpensesByMonth => "subcat-expenses-by-month",
            Self::CumulativeSpend => "cumulative-spend",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::CashFlow => "Cash Flow",
            Self::CategoricalExpenses => "Categorical Expenses",
            Self::SubcatExpensesByMonth => "Sub-Categorical Expenses",
            Self::CumulativeSpend => "Monthly Spending",
        }
    }

    /// Position in the interactive chart menu (1-based)
    pub fn menu_number(&self) -> u32 {
        match self {
            Self::CashFlow => 1,
            Self::CategoricalExpenses => 2,
            Self::SubcatExpensesByMonth => 3,
            Self::CumulativeSpend => 4,
        }
    }

    pub fn from_menu_number(n: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.menu_number() == n)
    }

    /// Default file name for a rendered chart
    pub fn file_name(&self) -> String {
        format!("{}.svg", self.as_str())
    }
}

impl FromStr for ChartKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Ok(n) = s.parse::<u32>() {
            return Self::from_menu_number(n)
                .ok_or_else(|| Error::InvalidData(format!("Unknown chart number: {}", n)));
        }
        Self::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::InvalidData(format!("Unknown chart: {}", s)))
    }
}

impl std::fmt::Display for ChartKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A prepared aggregate, ready for the renderer
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "kebab-case")]
pub enum ChartData {
    CashFlow(CashFlowReport),
    CategoricalExpenses(CategoricalBreakdown),
    SubcatExpensesByMonth(SubCategoryByMonth),
    CumulativeSpend(SpendComparison),
}

impl ChartData {
    pub fn kind(&self) -> ChartKind {
        match self {
            Self::CashFlow(_) => ChartKind::CashFlow,
            Self::CategoricalExpenses(_) => ChartKind::CategoricalExpenses,
            Self::SubcatExpensesByMonth(_) => ChartKind::SubcatExpensesByMonth,
            Self::CumulativeSpend(_) => ChartKind::CumulativeSpend,
        }
    }
}

/// A validated, chronologically ordered snapshot of the store
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    transactions: Vec<DatedTransaction>,
}

impl Ledger {
    /// Validate raw store rows and derive their calendar fields
    pub fn from_records(records: &[TransactionRecord]) -> Result<Self> {
        let transactions = derive_calendar(records)?;
        debug!("Ledger holds {} transactions", transactions.len());
        Ok(Self { transactions })
    }

    pub fn transactions(&self) -> &[DatedTransaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Most recent transactions first
    pub fn recent(&self, limit: usize) -> Vec<&DatedTransaction> {
        self.transactions.iter().rev().take(limit).collect()
    }

    pub fn cash_flow(&self) -> Result<CashFlowReport> {
        cash_flow(&self.transactions)
    }

    pub fn categorical_expenses(&self) -> Result<CategoricalBreakdown> {
        categorical_expenses(&self.transactions)
    }

    pub fn sub_category_by_month(&self) -> Result<SubCategoryByMonth> {
        sub_category_by_month(&self.transactions)
    }

    pub fn cumulative_spend(&self) -> Result<SpendComparison> {
        cumulative_spend(&self.transactions)
    }

    pub fn summarize(&self, from: NaiveDate, to: NaiveDate) -> Result<PeriodSummary> {
        summarize(&self.transactions, from, to)
    }

    pub fn filter(&self, filter: &TransactionFilter) -> Vec<&DatedTransaction> {
        filter.apply(&self.transactions)
    }

    /// Run the aggregator behind a chart
    pub fn prepare(&self, kind: ChartKind) -> Result<ChartData> {
        let data = match kind {
            ChartKind::CashFlow => ChartData::CashFlow(self.cash_flow()?),
            ChartKind::CategoricalExpenses => {
                ChartData::CategoricalExpenses(self.categorical_expenses()?)
            }
            ChartKind::SubcatExpensesByMonth => {
                ChartData::SubcatExpensesByMonth(self.sub_category_by_month()?)
            }
            ChartKind::CumulativeSpend => ChartData::CumulativeSpend(self.cumulative_spend()?),
        };
        debug!("Prepared {} chart", kind);
        Ok(data)
    }
}
