//! Calendar-field derivation
//!
//! Turns raw store rows into validated transactions carrying month, day and
//! year-month period. Every aggregation in this crate starts from here.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{
    Amount, Category, Memo, SubCategory, Transaction, TransactionRecord, DATE_FORMAT,
};

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// A calendar month of a specific year, e.g. 2024-02
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct YearMonth {
    pub year: i32,
    /// 1-based month number
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(Error::InvalidData(format!("Invalid month: {}", month)));
        }
        Ok(Self { year, month })
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The calendar month before this one (January wraps to December of the
    /// previous year)
    pub fn pred(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    pub fn name(&self) -> &'static str {
        month_name(self.month)
    }

    pub fn abbr(&self) -> &'static str {
        &self.name()[..3]
    }
}

impl std::fmt::Display for YearMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

// Serialized as "YYYY-MM" so it can key JSON objects
impl Serialize for YearMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Full English month name for a 1-based month number
pub fn month_name(month: u32) -> &'static str {
    MONTH_NAMES
        .get(month.saturating_sub(1) as usize)
        .copied()
        .unwrap_or("Unknown")
}

/// A validated transaction plus its derived calendar fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatedTransaction {
    #[serde(flatten)]
    pub transaction: Transaction,
    pub month: u32,
    pub day: u32,
    pub period: YearMonth,
}

impl DatedTransaction {
    pub fn new(transaction: Transaction) -> Self {
        let date = transaction.date();
        Self {
            month: date.month(),
            day: date.day(),
            period: YearMonth::of(date),
            transaction,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.transaction.date()
    }

    pub fn year(&self) -> i32 {
        self.period.year
    }

    pub fn category(&self) -> Category {
        self.transaction.category()
    }

    pub fn sub_category(&self) -> SubCategory {
        self.transaction.sub_category()
    }

    pub fn amount(&self) -> Decimal {
        self.transaction.amount().value()
    }

    pub fn is_income(&self) -> bool {
        self.transaction.is_income()
    }
}

/// Parse a store date (`mm-dd-yyyy`)
pub fn parse_store_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}

/// Validate one store row. `row` is the 1-based record number used in errors.
pub fn validate_record(row: usize, record: &TransactionRecord) -> Result<Transaction> {
    let date = parse_store_date(&record.date).ok_or_else(|| Error::Format {
        row,
        value: record.date.clone(),
    })?;
    let sub_category = SubCategory::resolve(&record.category, &record.sub_category)?;
    let amount: Amount = record
        .amount
        .parse()
        .map_err(|e| Error::InvalidData(format!("Row {}: {}", row, e)))?;
    let memo = Memo::new(record.memo.as_str())
        .map_err(|e| Error::InvalidData(format!("Row {}: {}", row, e)))?;

    Transaction::new(date, sub_category.category(), sub_category, memo, amount)
}

/// Derive calendar fields for every row, in chronological order.
///
/// The first malformed row aborts the whole derivation: downstream
/// aggregations assume every date is well-formed. Rows sharing a date keep
/// their file order.
pub fn derive_calendar(records: &[TransactionRecord]) -> Result<Vec<DatedTransaction>> {
    let mut dated = records
        .iter()
        .enumerate()
        .map(|(i, record)| validate_record(i + 1, record).map(DatedTransaction::new))
        .collect::<Result<Vec<_>>>()?;

    dated.sort_by_key(|tx| tx.date());

    debug!("Derived calendar fields for {} transactions", dated.len());
    Ok(dated)
}
