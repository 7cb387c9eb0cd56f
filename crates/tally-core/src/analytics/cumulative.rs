//! Month-to-date spending compared against the previous month

use rust_decimal::Decimal;
use serde::Serialize;

use super::calendar::{DatedTransaction, YearMonth};
use crate::error::{Error, Result};
use crate::models::format_money;

/// Running total at the end of a day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CumulativePoint {
    pub day: u32,
    pub total: Decimal,
}

/// Day-by-day running spend within one year-month
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CumulativeSeries {
    pub period: YearMonth,
    /// One point per day with spending, ascending by day
    pub points: Vec<CumulativePoint>,
}

impl CumulativeSeries {
    fn build(period: YearMonth, transactions: &[&DatedTransaction]) -> Self {
        let mut points: Vec<CumulativePoint> = Vec::new();
        let mut running = Decimal::ZERO;

        // Input is chronological, so days arrive in order
        for tx in transactions.iter().filter(|tx| tx.period == period) {
            running += tx.amount();
            match points.last_mut() {
                Some(last) if last.day == tx.day => last.total = running,
                _ => points.push(CumulativePoint {
                    day: tx.day,
                    total: running,
                }),
            }
        }

        Self { period, points }
    }

    /// Cumulative total at the end of `day`, zero before the first spend
    pub fn total_through(&self, day: u32) -> Decimal {
        self.points
            .iter()
            .take_while(|p| p.day <= day)
            .last()
            .map(|p| p.total)
            .unwrap_or(Decimal::ZERO)
    }

    pub fn last_day(&self) -> Option<u32> {
        self.points.last().map(|p| p.day)
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpendComparison {
    pub current: CumulativeSeries,
    pub previous: CumulativeSeries,
    /// Latest day with spending in the current period
    pub most_recent_day: u32,
    pub current_total: Decimal,
    /// Previous period's running total through `most_recent_day`
    pub previous_same_day: Decimal,
    /// `previous_same_day - current_total`; negative means more was spent
    pub difference: Decimal,
}

impl SpendComparison {
    pub fn spent_more(&self) -> bool {
        self.difference < Decimal::ZERO
    }

    /// Annotation text, e.g. "$50.00 less than last month"
    pub fn summary(&self) -> String {
        let direction = if self.spent_more() { "more" } else { "less" };
        format!(
            "{} {} than last month",
            format_money(self.difference.abs()),
            direction
        )
    }
}

/// Compare the current period's running spend with the period before it.
///
/// The current period is the latest year-month among non-income rows. The
/// previous period is its calendar predecessor, whether or not it has data.
pub fn cumulative_spend(transactions: &[DatedTransaction]) -> Result<SpendComparison> {
    let expenses: Vec<&DatedTransaction> =
        transactions.iter().filter(|tx| !tx.is_income()).collect();

    let current_period = expenses
        .iter()
        .map(|tx| tx.period)
        .max()
        .ok_or_else(|| Error::empty("cumulative spend"))?;
    let previous_period = current_period.pred();

    let current = CumulativeSeries::build(current_period, &expenses);
    let previous = CumulativeSeries::build(previous_period, &expenses);

    let most_recent_day = current
        .last_day()
        .ok_or_else(|| Error::empty("cumulative spend"))?;
    let current_total = current.total_through(most_recent_day);
    let previous_same_day = previous.total_through(most_recent_day);

    Ok(SpendComparison {
        difference: previous_same_day - current_total,
        most_recent_day,
        current_total,
        previous_same_day,
        current,
        previous,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::test_support::{dated, dec};

    #[test]
    fn test_scenario_february_spent_less() {
        let txs = dated(&[
            ("01-05-2024", "Income", "Income", "1000"),
            ("01-10-2024", "Essential", "Groceries", "200"),
            ("02-05-2024", "Income", "Income", "1000"),
            ("02-10-2024", "Essential", "Groceries", "150"),
        ]);
        let cmp = cumulative_spend(&txs).unwrap();

        assert_eq!(cmp.current.period, YearMonth::new(2024, 2).unwrap());
        assert_eq!(cmp.previous.period, YearMonth::new(2024, 1).unwrap());
        assert_eq!(cmp.most_recent_day, 10);
        assert_eq!(cmp.current_total, dec("150"));
        assert_eq!(cmp.previous_same_day, dec("200"));
        assert_eq!(cmp.difference, dec("50"));
        assert!(!cmp.spent_more());
        assert_eq!(cmp.summary(), "$50.00 less than last month");
    }

    #[test]
    fn test_previous_only_counts_through_same_day() {
        let txs = dated(&[
            ("01-03-2024", "Essential", "Groceries", "40"),
            ("01-20-2024", "Essential", "Groceries", "500"),
            ("02-03-2024", "Non-Essential", "Shopping", "30"),
            ("02-05-2024", "Non-Essential", "Shopping", "30"),
        ]);
        let cmp = cumulative_spend(&txs).unwrap();

        assert_eq!(cmp.most_recent_day, 5);
        assert_eq!(cmp.previous_same_day, dec("40"));
        assert_eq!(cmp.current_total, dec("60"));
        assert!(cmp.spent_more());
        assert_eq!(cmp.summary(), "$20.00 more than last month");
    }

    #[test]
    fn test_january_compares_with_previous_december() {
        let txs = dated(&[
            ("11-02-2023", "Essential", "Medical", "999"),
            ("12-02-2023", "Essential", "Medical", "70"),
            ("01-04-2024", "Essential", "Medical", "20"),
        ]);
        let cmp = cumulative_spend(&txs).unwrap();
        assert_eq!(cmp.previous.period, YearMonth::new(2023, 12).unwrap());
        assert_eq!(cmp.previous_same_day, dec("70"));
        assert_eq!(cmp.difference, dec("50"));
    }

    #[test]
    fn test_missing_previous_period_counts_as_zero() {
        let txs = dated(&[("03-08-2024", "Essential", "Pets", "12.50")]);
        let cmp = cumulative_spend(&txs).unwrap();
        assert!(cmp.previous.is_empty());
        assert_eq!(cmp.previous_same_day, Decimal::ZERO);
        assert_eq!(cmp.difference, dec("-12.50"));
    }

    #[test]
    fn test_same_day_rows_collapse_into_one_point() {
        let txs = dated(&[
            ("02-01-2024", "Essential", "Pets", "1"),
            ("02-01-2024", "Essential", "Pets", "2"),
            ("02-04-2024", "Essential", "Pets", "3"),
        ]);
        let cmp = cumulative_spend(&txs).unwrap();
        assert_eq!(
            cmp.current.points,
            vec![
                CumulativePoint { day: 1, total: dec("3") },
                CumulativePoint { day: 4, total: dec("6") },
            ]
        );
        assert_eq!(cmp.current.total_through(3), dec("3"));
    }

    #[test]
    fn test_latest_period_ignores_income_rows() {
        let txs = dated(&[
            ("02-10-2024", "Essential", "Groceries", "150"),
            ("03-01-2024", "Income", "Income", "1000"),
        ]);
        let cmp = cumulative_spend(&txs).unwrap();
        assert_eq!(cmp.current.period, YearMonth::new(2024, 2).unwrap());
    }

    #[test]
    fn test_income_only_is_empty() {
        let txs = dated(&[("03-01-2024", "Income", "Income", "1000")]);
        assert!(matches!(
            cumulative_spend(&txs).unwrap_err(),
            Error::EmptyDataset(_)
        ));
    }
}
