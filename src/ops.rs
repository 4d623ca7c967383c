use std::collections::BTreeMap;

use chrono::NaiveDate;
use log::{debug, trace, warn};
use rust_decimal::{prelude::ToPrimitive, Decimal};

use crate::{
    calendar::{MonthRange, MonthSlot},
    errors::Error,
    types::{
        Points, Summary, SummaryRow, Tally, Transaction, CUSTOMER_ID_HEADER,
        CUSTOMER_NAME_HEADER, TOTAL_HEADER,
    },
};

/// Whole dollars above this amount earn one point each
const FIRST_TIER: u32 = 50;
/// Whole dollars above this amount earn a second point each
const SECOND_TIER: u32 = 100;

/// What to do with a transaction dated outside of the summarized months
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum OutOfWindow {
    /// Fail the summary with [`Error::OutsideWindow`]
    #[default]
    Reject,
    /// Leave the transaction out of the summary and log a warning
    Skip,
}

/// Calculates the award points for a single purchase.
///
/// Portions of a dollar do not count, so the amount is truncated first. Every whole dollar above
/// $50 earns a point, and every whole dollar above $100 earns another one:
/// $50.99 earns nothing, $100 earns 50 points, and $120.99 earns 90 points.
#[must_use]
pub fn calculate_points(amount: Decimal) -> Points {
    let dollars = amount.trunc();
    let mut points = Decimal::ZERO;
    for tier in [FIRST_TIER, SECOND_TIER] {
        let tier = Decimal::from(tier);
        if dollars > tier {
            match points.checked_add(dollars - tier) {
                Some(sum) => points = sum,
                None => return Points::MAX,
            }
        }
    }
    points.to_u64().unwrap_or(Points::MAX)
}

impl Tally {
    /// Adds points to one of the months, keeping the total in step
    fn credit(&mut self, slot: MonthSlot, points: Points) {
        let month = match slot {
            MonthSlot::First => &mut self.month1,
            MonthSlot::Second => &mut self.month2,
            MonthSlot::Third => &mut self.month3,
        };
        *month = month.saturating_add(points);
        self.total = self.total.saturating_add(points);
    }
}

/// Summarizes award points per customer and month over the three months from `start` to `end`.
///
/// `start` must be the first day of a month, and `end` any day of the second month after it.
/// Rows are ordered by customer identifier.
/// # Errors
/// [`Error::InvalidRange`] if the dates do not describe three consecutive months, and
/// [`Error::OutsideWindow`] for the first transaction that falls outside of them
pub fn summarize(
    transactions: &[Transaction],
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Summary, Error> {
    summarize_with(transactions, start, end, OutOfWindow::Reject)
}

/// Same as [`summarize`], with a choice of what happens to transactions outside of the months.
pub fn summarize_with(
    transactions: &[Transaction],
    start: NaiveDate,
    end: NaiveDate,
    policy: OutOfWindow,
) -> Result<Summary, Error> {
    let range = MonthRange::from_dates(start, end)?;
    let mut tallies = BTreeMap::new();
    for transaction in transactions {
        let Some(slot) = range.slot_of(transaction.date) else {
            match policy {
                OutOfWindow::Reject => {
                    return Err(Error::OutsideWindow {
                        customer: transaction.customer_id.clone(),
                        date: transaction.date,
                    })
                }
                OutOfWindow::Skip => {
                    warn!(
                        "Skipping transaction for customer {} on {}, outside of {range}",
                        transaction.customer_id, transaction.date
                    );
                    continue;
                }
            }
        };
        let points = calculate_points(transaction.amount);
        trace!(
            "Customer {} earned {points} points for {} on {}",
            transaction.customer_id,
            transaction.amount,
            transaction.date
        );
        tallies
            .entry(transaction.customer_id.clone())
            .or_insert_with(|| Tally::new(transaction.customer_name.as_str()))
            .credit(slot, points);
    }
    debug!(
        "Summarized {} transactions for {} customers over {range}",
        transactions.len(),
        tallies.len()
    );

    let [first, second, third] = range.months();
    Ok(Summary {
        title: format!("Customer Points by Month, {range}"),
        headers: [
            CUSTOMER_ID_HEADER.to_owned(),
            CUSTOMER_NAME_HEADER.to_owned(),
            first.name().to_owned(),
            second.name().to_owned(),
            third.name().to_owned(),
            TOTAL_HEADER.to_owned(),
        ],
        rows: tallies
            .into_iter()
            .map(|(customer_id, tally)| SummaryRow::new(customer_id, tally))
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use crate::types::CustomerId;

    use super::*;

    fn date(text: &str) -> NaiveDate {
        NaiveDate::parse_from_str(text, "%Y-%m-%d").unwrap()
    }

    fn purchase(customer: &str, name: &str, day: &str, amount: Decimal) -> Transaction {
        Transaction::new(customer, name, date(day), amount)
    }

    #[test]
    fn test_points_below_first_tier() {
        assert_eq!(calculate_points(dec!(0)), 0);
        assert_eq!(calculate_points(dec!(49)), 0);
        assert_eq!(calculate_points(dec!(50)), 0);
        assert_eq!(calculate_points(dec!(50.99)), 0);
        assert_eq!(calculate_points(dec!(-120)), 0);
    }

    #[test]
    fn test_points_first_tier() {
        assert_eq!(calculate_points(dec!(51)), 1);
        assert_eq!(calculate_points(dec!(60)), 10);
        assert_eq!(calculate_points(dec!(100)), 50);
        assert_eq!(calculate_points(dec!(100.75)), 50);
    }

    #[test]
    fn test_points_second_tier() {
        assert_eq!(calculate_points(dec!(101)), 52);
        assert_eq!(calculate_points(dec!(120)), 90);
        assert_eq!(calculate_points(dec!(120.99)), 90);
        assert_eq!(calculate_points(dec!(178.57)), 206);
        assert_eq!(calculate_points(Decimal::from(Points::MAX)), Points::MAX);
        assert_eq!(calculate_points(Decimal::MAX), Points::MAX);
    }

    #[test]
    fn test_summarize_example() {
        let transactions = vec![
            purchase("1", "A", "2023-07-05", dec!(120)),
            purchase("1", "A", "2023-08-10", dec!(60)),
        ];
        let summary = summarize(&transactions, date("2023-07-01"), date("2023-09-30")).unwrap();
        assert_eq!(
            summary.title,
            "Customer Points by Month, July 2023 to September 2023"
        );
        assert_eq!(
            summary.headers,
            ["Customer ID", "Customer Name", "July", "August", "September", "Total"]
        );
        assert_eq!(
            summary.rows,
            vec![SummaryRow {
                id: CustomerId::from("1"),
                name: "A".to_owned(),
                month1: 90,
                month2: 10,
                month3: 0,
                total: 100,
            }]
        );
    }

    #[test]
    fn test_summarize_empty() {
        let summary = summarize(&[], date("2023-01-01"), date("2023-03-31")).unwrap();
        assert!(summary.rows.is_empty());
        assert_eq!(summary.headers[2], "January");
        assert_eq!(
            summary.title,
            "Customer Points by Month, January 2023 to March 2023"
        );
    }

    #[test]
    fn test_summarize_wraps_year() {
        let transactions = vec![
            purchase("5", "Eve", "2022-12-24", dec!(75)),
            purchase("5", "Eve", "2023-01-02", dec!(150)),
            purchase("5", "Eve", "2023-02-28", dec!(99.99)),
        ];
        let summary = summarize(&transactions, date("2022-12-01"), date("2023-02-28")).unwrap();
        assert_eq!(summary.headers[2..5], ["December", "January", "February"]);
        assert_eq!(
            summary.title,
            "Customer Points by Month, December 2022 to February 2023"
        );
        let row = &summary.rows[0];
        assert_eq!((row.month1, row.month2, row.month3), (25, 150, 49));
        assert_eq!(row.total, 224);
    }

    #[test]
    fn test_rows_complete_sorted_and_additive() {
        let transactions = vec![
            purchase("9", "Nine", "2023-04-03", dec!(220)),
            purchase("10", "Ten", "2023-05-03", dec!(55.5)),
            purchase("118", "Jane Smith", "2023-06-30", dec!(130)),
            purchase("9", "Nine", "2023-06-01", dec!(101)),
            purchase("10", "Ten", "2023-04-20", dec!(12)),
        ];
        let summary = summarize(&transactions, date("2023-04-01"), date("2023-06-30")).unwrap();
        let ids: Vec<_> = summary.rows.iter().map(|row| row.id.as_str()).collect();
        assert_eq!(ids, ["10", "118", "9"]);
        for row in &summary.rows {
            assert_eq!(row.total, row.month1 + row.month2 + row.month3);
        }
        assert_eq!(summary.rows[2].month1, 290);
        assert_eq!(summary.rows[2].month3, 52);
        assert_eq!(summary.rows[0].month2, 5);
    }

    #[test]
    fn test_first_name_wins() {
        let transactions = vec![
            purchase("7", "Robert", "2023-03-01", dec!(70)),
            purchase("7", "Bob", "2023-03-02", dec!(70)),
        ];
        let summary = summarize(&transactions, date("2023-03-01"), date("2023-05-31")).unwrap();
        assert_eq!(summary.rows.len(), 1);
        assert_eq!(summary.rows[0].name, "Robert");
        assert_eq!(summary.rows[0].month1, 40);
    }

    #[test]
    fn test_huge_amount_saturates() {
        let transactions = vec![
            purchase("1", "A", "2023-07-05", Decimal::MAX),
            purchase("1", "A", "2023-07-06", dec!(60)),
        ];
        let summary = summarize(&transactions, date("2023-07-01"), date("2023-09-30")).unwrap();
        assert_eq!(summary.rows[0].month1, Points::MAX);
        assert_eq!(summary.rows[0].total, Points::MAX);
    }

    #[test]
    fn test_summarize_is_idempotent() {
        let transactions = vec![
            purchase("2", "B", "2023-09-15", dec!(310.45)),
            purchase("1", "A", "2023-10-15", dec!(88)),
        ];
        let first = summarize(&transactions, date("2023-09-01"), date("2023-11-30")).unwrap();
        let second = summarize(&transactions, date("2023-09-01"), date("2023-11-30")).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_reject_outside_window() {
        let transactions = vec![
            purchase("1", "A", "2023-07-05", dec!(120)),
            purchase("2", "B", "2023-10-01", dec!(120)),
        ];
        match summarize(&transactions, date("2023-07-01"), date("2023-09-30")) {
            Err(Error::OutsideWindow { customer, date: day }) => {
                assert_eq!(customer, CustomerId::from("2"));
                assert_eq!(day, date("2023-10-01"));
            }
            other => panic!("Expected an out of window error, got {other:?}"),
        }
    }

    #[test]
    fn test_skip_outside_window() {
        let transactions = vec![
            purchase("1", "A", "2023-07-05", dec!(120)),
            // Right month, wrong year
            purchase("1", "A", "2022-08-05", dec!(120)),
            purchase("2", "B", "2023-10-01", dec!(120)),
        ];
        let summary = summarize_with(
            &transactions,
            date("2023-07-01"),
            date("2023-09-30"),
            OutOfWindow::Skip,
        )
        .unwrap();
        assert_eq!(summary.rows.len(), 1);
        assert_eq!(summary.rows[0].total, 90);
        assert_eq!(summary.rows[0].month2, 0);
    }

    #[test]
    fn test_reject_invalid_range() {
        assert!(matches!(
            summarize(&[], date("2023-07-01"), date("2023-08-31")),
            Err(Error::InvalidRange { .. })
        ));
        assert!(matches!(
            summarize(&[], date("2023-07-15"), date("2023-09-30")),
            Err(Error::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_credit_keeps_total() {
        let mut tally = Tally::new("A");
        tally.credit(MonthSlot::Third, 7);
        tally.credit(MonthSlot::First, 3);
        tally.credit(MonthSlot::Third, 1);
        assert_eq!((tally.month1, tally.month2, tally.month3), (3, 0, 8));
        assert_eq!(tally.total, 11);
    }
}
