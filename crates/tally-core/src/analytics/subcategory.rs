//! Sub-category expenses per month for the latest year

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

use super::calendar::{month_name, DatedTransaction};
use crate::error::{Error, Result};
use crate::models::SubCategory;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlySubCategoryTotal {
    pub month: u32,
    pub sub_category: SubCategory,
    pub total: Decimal,
}

impl MonthlySubCategoryTotal {
    /// Row label for the chart, e.g. "February - Groceries"
    pub fn label(&self) -> String {
        format!("{} - {}", month_name(self.month), self.sub_category)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubCategoryByMonth {
    pub year: i32,
    /// Largest total first; ties ordered by month, then sub-category
    pub rows: Vec<MonthlySubCategoryTotal>,
}

/// Group the latest year's non-income transactions by (month, sub-category).
///
/// The latest year is taken over all rows, income included, so a year that
/// so far only has income yields an empty view.
pub fn sub_category_by_month(transactions: &[DatedTransaction]) -> Result<SubCategoryByMonth> {
    let year = transactions
        .iter()
        .map(|tx| tx.year())
        .max()
        .ok_or_else(|| Error::empty("sub-category expenses by month"))?;

    let mut totals: BTreeMap<(u32, SubCategory), Decimal> = BTreeMap::new();
    for tx in transactions
        .iter()
        .filter(|tx| tx.year() == year && !tx.is_income())
    {
        *totals.entry((tx.month, tx.sub_category())).or_default() += tx.amount();
    }

    if totals.is_empty() {
        return Err(Error::empty("sub-category expenses by month"));
    }

    let mut rows: Vec<MonthlySubCategoryTotal> = totals
        .into_iter()
        .map(|((month, sub_category), total)| MonthlySubCategoryTotal {
            month,
            sub_category,
            total,
        })
        .collect();
    // Stable sort over the (month, sub-category) key order gives the tie-break
    rows.sort_by(|a, b| b.total.cmp(&a.total));

    Ok(SubCategoryByMonth { year, rows })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::test_support::{dated, dec};

    #[test]
    fn test_restricts_to_latest_year_and_sorts_desc() {
        let txs = dated(&[
            ("12-20-2023", "Essential", "Groceries", "999"),
            ("01-10-2024", "Essential", "Groceries", "200"),
            ("01-12-2024", "Essential", "Groceries", "25"),
            ("02-10-2024", "Essential", "Groceries", "150"),
            ("02-11-2024", "Non-Essential", "Travel", "300"),
            ("02-12-2024", "Income", "Income", "5000"),
        ]);
        let view = sub_category_by_month(&txs).unwrap();

        assert_eq!(view.year, 2024);
        let got: Vec<_> = view
            .rows
            .iter()
            .map(|r| (r.month, r.sub_category, r.total))
            .collect();
        assert_eq!(
            got,
            vec![
                (2, SubCategory::Travel, dec("300")),
                (1, SubCategory::Groceries, dec("225")),
                (2, SubCategory::Groceries, dec("150")),
            ]
        );
        assert_eq!(view.rows[0].label(), "February - Travel");
    }

    #[test]
    fn test_ties_are_ordered_by_month_then_sub_category() {
        let txs = dated(&[
            ("03-01-2024", "Non-Essential", "Travel", "10"),
            ("03-02-2024", "Essential", "Groceries", "10"),
            ("01-02-2024", "Non-Essential", "Gifts", "10"),
        ]);
        let view = sub_category_by_month(&txs).unwrap();
        let got: Vec<_> = view.rows.iter().map(|r| (r.month, r.sub_category)).collect();
        assert_eq!(
            got,
            vec![
                (1, SubCategory::Gifts),
                (3, SubCategory::Groceries),
                (3, SubCategory::Travel),
            ]
        );
    }

    #[test]
    fn test_latest_year_with_only_income_is_empty() {
        let txs = dated(&[
            ("12-20-2023", "Essential", "Groceries", "50"),
            ("01-05-2024", "Income", "Income", "1000"),
        ]);
        let err = sub_category_by_month(&txs).unwrap_err();
        assert!(matches!(err, Error::EmptyDataset(_)));
    }

    #[test]
    fn test_empty_is_reported() {
        assert!(matches!(
            sub_category_by_month(&[]).unwrap_err(),
            Error::EmptyDataset(_)
        ));
    }
}
