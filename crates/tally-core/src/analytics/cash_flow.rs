//! Monthly cash flow: income versus everything else

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

use super::calendar::{DatedTransaction, YearMonth};
use crate::error::{Error, Result};

/// Income and expense totals for one month. Both are kept positive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CashFlowBucket {
    pub income: Decimal,
    pub expense: Decimal,
}

impl CashFlowBucket {
    /// Income minus every non-income amount
    pub fn net(&self) -> Decimal {
        self.income - self.expense
    }

    pub fn total(&self) -> Decimal {
        self.income + self.expense
    }
}

/// Cash flow per year-month plus the net income of the latest month
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CashFlowReport {
    pub months: BTreeMap<YearMonth, CashFlowBucket>,
    pub latest: YearMonth,
    pub net_income: Decimal,
}

impl CashFlowReport {
    pub fn latest_bucket(&self) -> CashFlowBucket {
        self.months.get(&self.latest).copied().unwrap_or_default()
    }

    /// Largest single bar, used to scale the chart
    pub fn max_bar(&self) -> Decimal {
        self.months
            .values()
            .flat_map(|b| [b.income, b.expense])
            .max()
            .unwrap_or(Decimal::ZERO)
    }
}

/// Split every month into Income and Expense buckets.
///
/// Every month that has any transaction gets both buckets, so a month without
/// income reports an income of zero.
pub fn cash_flow(transactions: &[DatedTransaction]) -> Result<CashFlowReport> {
    let mut months: BTreeMap<YearMonth, CashFlowBucket> = BTreeMap::new();

    for tx in transactions {
        let bucket = months.entry(tx.period).or_default();
        if tx.is_income() {
            bucket.income += tx.amount();
        } else {
            bucket.expense += tx.amount();
        }
    }

    let (latest, bucket) = months
        .iter()
        .next_back()
        .map(|(period, bucket)| (*period, *bucket))
        .ok_or_else(|| Error::empty("cash flow"))?;

    Ok(CashFlowReport {
        net_income: bucket.net(),
        latest,
        months,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::test_support::{dated, dec};

    #[test]
    fn test_scenario_february() {
        let txs = dated(&[
            ("01-05-2024", "Income", "Income", "1000"),
            ("01-10-2024", "Essential", "Groceries", "200"),
            ("02-05-2024", "Income", "Income", "1000"),
            ("02-10-2024", "Essential", "Groceries", "150"),
        ]);
        let report = cash_flow(&txs).unwrap();

        assert_eq!(report.latest, YearMonth::new(2024, 2).unwrap());
        let feb = report.latest_bucket();
        assert_eq!(feb.income, dec("1000"));
        assert_eq!(feb.expense, dec("150"));
        assert_eq!(report.net_income, dec("850"));
        assert_eq!(report.months.len(), 2);
        assert_eq!(report.max_bar(), dec("1000"));
    }

    #[test]
    fn test_every_non_income_category_is_expense() {
        let txs = dated(&[
            ("03-01-2024", "Savings & Investments", "Roth IRA", "300"),
            ("03-02-2024", "Non-Essential", "Travel", "120.50"),
            ("03-03-2024", "Essential", "Medical", "79.50"),
        ]);
        let report = cash_flow(&txs).unwrap();
        let march = report.latest_bucket();

        // No income rows: income is zero, not missing
        assert_eq!(march.income, Decimal::ZERO);
        assert_eq!(march.expense, dec("500"));
        assert_eq!(report.net_income, dec("-500"));
    }

    #[test]
    fn test_bucket_totals_match_month_totals() {
        let txs = dated(&[
            ("04-01-2024", "Income", "Income 2", "10.10"),
            ("04-02-2024", "Essential", "Pets", "3.30"),
            ("05-02-2024", "Non-Essential", "Gifts", "7.77"),
            ("05-09-2024", "Income", "Income", "2.22"),
        ]);
        let report = cash_flow(&txs).unwrap();

        for (period, bucket) in &report.months {
            let month_total: Decimal = txs
                .iter()
                .filter(|tx| tx.period == *period)
                .map(|tx| tx.amount())
                .sum();
            assert_eq!(bucket.total(), month_total, "{}", period);
        }
        assert_eq!(report.net_income, report.latest_bucket().net());
    }

    #[test]
    fn test_same_month_in_different_years_is_not_merged() {
        let txs = dated(&[
            ("02-01-2023", "Income", "Income", "100"),
            ("02-01-2024", "Income", "Income", "200"),
        ]);
        let report = cash_flow(&txs).unwrap();
        assert_eq!(report.months.len(), 2);
        assert_eq!(report.latest_bucket().income, dec("200"));
    }

    #[test]
    fn test_empty_is_reported() {
        let err = cash_flow(&[]).unwrap_err();
        assert!(matches!(err, Error::EmptyDataset(_)));
    }
}
