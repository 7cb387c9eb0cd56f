//! Domain models for Tally

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};

/// Date pattern used by the store file and every prompt
pub const DATE_FORMAT: &str = "%m-%d-%Y";

/// Maximum memo length, in characters
pub const MEMO_MAX_CHARS: usize = 50;

/// Top-level transaction category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Income,
    SavingsInvestments,
    Essential,
    NonEssential,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Self::Income,
        Self::SavingsInvestments,
        Self::Essential,
        Self::NonEssential,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "Income",
            Self::SavingsInvestments => "Savings & Investments",
            Self::Essential => "Essential",
            Self::NonEssential => "Non-Essential",
        }
    }

    /// Single-letter code used by the interactive prompt
    pub fn code(&self) -> char {
        match self {
            Self::Income => 'I',
            Self::SavingsInvestments => 'S',
            Self::Essential => 'E',
            Self::NonEssential => 'N',
        }
    }

    pub fn from_code(code: char) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.code() == code.to_ascii_uppercase())
    }

    /// The fixed list of sub-categories valid for this category, in menu order
    pub fn sub_categories(&self) -> &'static [SubCategory] {
        use SubCategory::*;
        match self {
            Self::Income => &[Income, Income2, Income3],
            Self::SavingsInvestments => &[EmergencyFund, RothIra],
            Self::Essential => &[
                BillsUtilities,
                Medical,
                AutoTransport,
                Education,
                HealthFitness,
                Pets,
                Groceries,
                StudentLoan,
                CarPayment,
            ],
            Self::NonEssential => &[
                Shopping,
                Entertainment,
                FoodDining,
                Gifts,
                Travel,
                Charity,
                Subscriptions,
                Other,
            ],
        }
    }

    pub fn is_income(&self) -> bool {
        matches!(self, Self::Income)
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::InvalidData(format!("Unknown category: {}", s)))
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Sub-category of a transaction.
///
/// Every variant belongs to exactly one [`Category`], so a transaction only
/// stores its sub-category and the category is derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SubCategory {
    // Income
    Income,
    Income2,
    Income3,
    // Savings & Investments
    EmergencyFund,
    RothIra,
    // Essential
    BillsUtilities,
    Medical,
    AutoTransport,
    Education,
    HealthFitness,
    Pets,
    Groceries,
    StudentLoan,
    CarPayment,
    // Non-Essential
    Shopping,
    Entertainment,
    FoodDining,
    Gifts,
    Travel,
    Charity,
    Subscriptions,
    Other,
}

impl SubCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "Income",
            Self::Income2 => "Income 2",
            Self::Income3 => "Income 3",
            Self::EmergencyFund => "Emergency Fund",
            Self::RothIra => "Roth IRA",
            Self::BillsUtilities => "Bills & Utilities",
            Self::Medical => "Medical",
            Self::AutoTransport => "Auto & Transport",
            Self::Education => "Education",
            Self::HealthFitness => "Health & Fitness",
            Self::Pets => "Pets",
            Self::Groceries => "Groceries",
            Self::StudentLoan => "Student Loan",
            Self::CarPayment => "Car Payment",
            Self::Shopping => "Shopping",
            Self::Entertainment => "Entertainment",
            Self::FoodDining => "Food & Dining",
            Self::Gifts => "Gifts",
            Self::Travel => "Travel",
            Self::Charity => "Charity",
            Self::Subscriptions => "Subscriptions",
            Self::Other => "Other",
        }
    }

    pub fn category(&self) -> Category {
        match self {
            Self::Income | Self::Income2 | Self::Income3 => Category::Income,
            Self::EmergencyFund | Self::RothIra => Category::SavingsInvestments,
            Self::BillsUtilities
            | Self::Medical
            | Self::AutoTransport
            | Self::Education
            | Self::HealthFitness
            | Self::Pets
            | Self::Groceries
            | Self::StudentLoan
            | Self::CarPayment => Category::Essential,
            Self::Shopping
            | Self::Entertainment
            | Self::FoodDining
            | Self::Gifts
            | Self::Travel
            | Self::Charity
            | Self::Subscriptions
            | Self::Other => Category::NonEssential,
        }
    }

    /// All sub-categories, grouped by category in menu order
    pub fn all() -> impl Iterator<Item = SubCategory> {
        Category::ALL
            .into_iter()
            .flat_map(|c| c.sub_categories().iter().copied())
    }

    /// Resolve a (category, sub-category) pair as it appears in the store.
    ///
    /// Fails with `CategoryMismatch` when the sub-category exists but belongs
    /// to another category, or is not in this category's list at all.
    pub fn resolve(category: &str, sub_category: &str) -> Result<Self> {
        let category: Category = category.parse()?;
        let wanted = sub_category.trim();
        category
            .sub_categories()
            .iter()
            .copied()
            .find(|s| s.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| Error::CategoryMismatch {
                category: category.as_str().to_string(),
                sub_category: wanted.to_string(),
            })
    }
}

impl FromStr for SubCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        Self::all()
            .find(|sc| sc.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::InvalidData(format!("Unknown sub-category: {}", s)))
    }
}

impl std::fmt::Display for SubCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// Both enums travel as their display labels ("Savings & Investments",
// "Bills & Utilities", ...) in CSV, JSON and query strings.
macro_rules! label_serde {
    ($ty:ty) => {
        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

label_serde!(Category);
label_serde!(SubCategory);

/// Serialize a date in [`DATE_FORMAT`], the one format the store and every
/// input use
pub fn serialize_date<S: Serializer>(
    date: &NaiveDate,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_str(&date.format(DATE_FORMAT))
}

/// A strictly positive transaction amount
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Amount(Decimal);

impl Amount {
    pub fn new(value: Decimal) -> Result<Self> {
        if value <= Decimal::ZERO {
            return Err(Error::InvalidData(format!(
                "Amount must be greater than zero (got {})",
                value
            )));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl FromStr for Amount {
    type Err = Error;

    /// Plain decimal only: no currency symbol, no thousands separator
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let value = Decimal::from_str(s)
            .map_err(|_| Error::InvalidData(format!("Invalid amount: '{}'", s)))?;
        Self::new(value)
    }
}

impl std::fmt::Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Short free-text description, at most [`MEMO_MAX_CHARS`] characters
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct Memo(String);

impl Memo {
    pub fn new(text: impl Into<String>) -> Result<Self> {
        let text = text.into();
        let len = text.chars().count();
        if len > MEMO_MAX_CHARS {
            return Err(Error::InvalidData(format!(
                "Memo is {} characters; the limit is {}",
                len, MEMO_MAX_CHARS
            )));
        }
        Ok(Self(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Memo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A validated transaction. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transaction {
    #[serde(serialize_with = "serialize_date")]
    date: NaiveDate,
    category: Category,
    sub_category: SubCategory,
    memo: Memo,
    amount: Amount,
}

impl Transaction {
    /// Build a transaction, checking that the sub-category belongs to the category
    pub fn new(
        date: NaiveDate,
        category: Category,
        sub_category: SubCategory,
        memo: Memo,
        amount: Amount,
    ) -> Result<Self> {
        if sub_category.category() != category {
            return Err(Error::CategoryMismatch {
                category: category.as_str().to_string(),
                sub_category: sub_category.as_str().to_string(),
            });
        }
        Ok(Self {
            date,
            category,
            sub_category,
            memo,
            amount,
        })
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn sub_category(&self) -> SubCategory {
        self.sub_category
    }

    pub fn memo(&self) -> &Memo {
        &self.memo
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn is_income(&self) -> bool {
        self.category.is_income()
    }
}

/// One row of the store file, exactly as written on disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Sub-Category")]
    pub sub_category: String,
    #[serde(rename = "Memo", default)]
    pub memo: String,
    #[serde(rename = "Amount")]
    pub amount: String,
}

impl From<&Transaction> for TransactionRecord {
    fn from(tx: &Transaction) -> Self {
        Self {
            date: tx.date.format(DATE_FORMAT).to_string(),
            category: tx.category.as_str().to_string(),
            sub_category: tx.sub_category.as_str().to_string(),
            memo: tx.memo.as_str().to_string(),
            amount: tx.amount.to_string(),
        }
    }
}

/// Format a decimal as dollars with two places, e.g. `$1250.50`
pub fn format_money(value: Decimal) -> String {
    format!("${:.2}", value.round_dp(2))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_every_sub_category_maps_back_to_its_category() {
        for category in Category::ALL {
            for sub in category.sub_categories() {
                assert_eq!(sub.category(), category, "{}", sub);
            }
        }
        assert_eq!(SubCategory::all().count(), 22);
    }

    #[test]
    fn test_category_codes() {
        assert_eq!(Category::from_code('i'), Some(Category::Income));
        assert_eq!(Category::from_code('S'), Some(Category::SavingsInvestments));
        assert_eq!(Category::from_code('n'), Some(Category::NonEssential));
        assert_eq!(Category::from_code('X'), None);
    }

    #[test]
    fn test_category_from_label() {
        assert_eq!(
            "savings & investments".parse::<Category>().unwrap(),
            Category::SavingsInvestments
        );
        assert!("Savings".parse::<Category>().is_err());
    }

    #[test]
    fn test_resolve_pair() {
        assert_eq!(
            SubCategory::resolve("Essential", "Groceries").unwrap(),
            SubCategory::Groceries
        );
        let err = SubCategory::resolve("Income", "Groceries").unwrap_err();
        assert!(matches!(err, Error::CategoryMismatch { .. }));
        let err = SubCategory::resolve("Essential", "Lottery").unwrap_err();
        assert!(matches!(err, Error::CategoryMismatch { .. }));
        let err = SubCategory::resolve("Lottery", "Groceries").unwrap_err();
        assert!(matches!(err, Error::InvalidData(_)));
    }

    #[test]
    fn test_amount_must_be_positive() {
        assert_eq!("12.50".parse::<Amount>().unwrap().value(), dec("12.50"));
        assert!("0".parse::<Amount>().is_err());
        assert!("-3".parse::<Amount>().is_err());
        assert!("$4".parse::<Amount>().is_err());
    }

    #[test]
    fn test_memo_limit_counts_characters() {
        assert!(Memo::new("a".repeat(50)).is_ok());
        assert!(Memo::new("a".repeat(51)).is_err());
        // Multi-byte characters count once each
        assert!(Memo::new("é".repeat(50)).is_ok());
    }

    #[test]
    fn test_transaction_rejects_mismatched_pair() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        let err = Transaction::new(
            date,
            Category::Income,
            SubCategory::Groceries,
            Memo::default(),
            Amount::new(dec("1")).unwrap(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::CategoryMismatch { .. }));
    }

    #[test]
    fn test_record_from_transaction_uses_store_format() {
        let tx = Transaction::new(
            NaiveDate::from_ymd_opt(2024, 2, 10).unwrap(),
            Category::Essential,
            SubCategory::Groceries,
            Memo::new("food").unwrap(),
            Amount::new(dec("150.25")).unwrap(),
        )
        .unwrap();
        let record = TransactionRecord::from(&tx);
        assert_eq!(record.date, "02-10-2024");
        assert_eq!(record.category, "Essential");
        assert_eq!(record.sub_category, "Groceries");
        assert_eq!(record.amount, "150.25");
    }

    #[test]
    fn test_transaction_json_uses_store_date_format() {
        let tx = Transaction::new(
            NaiveDate::from_ymd_opt(2024, 2, 10).unwrap(),
            Category::NonEssential,
            SubCategory::Travel,
            Memo::default(),
            Amount::new(dec("99")).unwrap(),
        )
        .unwrap();
        let json = serde_json::to_value(&tx).unwrap();
        assert_eq!(json["date"], "02-10-2024");
        assert_eq!(json["category"], "Non-Essential");
    }

    #[test]
    fn test_labels_serialize_as_strings() {
        let json = serde_json::to_string(&SubCategory::BillsUtilities).unwrap();
        assert_eq!(json, "\"Bills & Utilities\"");
        let back: Category = serde_json::from_str("\"Non-Essential\"").unwrap();
        assert_eq!(back, Category::NonEssential);
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(dec("850")), "$850.00");
        assert_eq!(format_money(dec("19.999")), "$20.00");
    }
}
