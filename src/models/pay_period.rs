//! Pay period model and calendar helpers.
//!
//! This module contains the [`PayPeriod`] date range plus the month helpers
//! used to key payroll runs and payslips by calendar month.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{PayrollError, PayrollResult};

/// Represents a concrete pay period date range.
///
/// Both dates are inclusive. Whether a range is acceptable for a given pay
/// group is decided by [`crate::calculation::validate_pay_period`].
///
/// # Example
///
/// ```
/// use payroll_engine::models::PayPeriod;
/// use chrono::NaiveDate;
///
/// let period = PayPeriod {
///     start_date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2025, 3, 31).unwrap(),
/// };
///
/// assert_eq!(period.day_span(), 30);
/// assert_eq!(period.month_label(), "2025-03");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayPeriod {
    /// The start date of the pay period (inclusive).
    pub start_date: NaiveDate,
    /// The end date of the pay period (inclusive).
    pub end_date: NaiveDate,
}

impl PayPeriod {
    /// Creates a new pay period.
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date,
        }
    }

    /// Number of days between start and end (end - start).
    pub fn day_span(&self) -> i64 {
        (self.end_date - self.start_date).num_days()
    }

    /// The `YYYY-MM` label of the month the period ends in.
    pub fn month_label(&self) -> String {
        month_label(self.end_date)
    }
}

/// Formats a date as its `YYYY-MM` month label.
pub fn month_label(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

/// Returns the last calendar day of the month containing `date`.
///
/// # Example
///
/// ```
/// use payroll_engine::models::last_day_of_month;
/// use chrono::NaiveDate;
///
/// let feb = NaiveDate::from_ymd_opt(2024, 2, 10).unwrap();
/// assert_eq!(last_day_of_month(feb), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
/// ```
pub fn last_day_of_month(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|first_of_next| first_of_next.pred_opt())
        .unwrap_or(date)
}

/// Parses a `YYYY-MM` label into the month-end date of that month.
///
/// Payslips are keyed by this month-end date.
pub fn parse_year_month(value: &str) -> PayrollResult<NaiveDate> {
    let invalid = || PayrollError::InvalidInput {
        field: "period".to_string(),
        message: format!("expected YYYY-MM, got '{}'", value),
    };

    let (year, month) = value.trim().split_once('-').ok_or_else(invalid)?;
    let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    if year.len() != 4 || month.len() != 2 || !all_digits(year) || !all_digits(month) {
        return Err(invalid());
    }
    let year: i32 = year.parse().map_err(|_| invalid())?;
    let month: u32 = month.parse().map_err(|_| invalid())?;
    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
    Ok(last_day_of_month(first))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_day_span() {
        let week = PayPeriod::new(date(2025, 3, 3), date(2025, 3, 9));
        assert_eq!(week.day_span(), 6);
    }

    #[test]
    fn test_last_day_of_month_december_rolls_year() {
        assert_eq!(last_day_of_month(date(2025, 12, 5)), date(2025, 12, 31));
    }

    #[test]
    fn test_last_day_of_month_non_leap_february() {
        assert_eq!(last_day_of_month(date(2025, 2, 1)), date(2025, 2, 28));
    }

    #[test]
    fn test_parse_year_month_returns_month_end() {
        assert_eq!(parse_year_month("2025-04").unwrap(), date(2025, 4, 30));
    }

    #[test]
    fn test_parse_year_month_rejects_garbage() {
        for value in ["2025", "2025-13", "25-03", "2025-3", "abcd-ef", ""] {
            let err = parse_year_month(value).unwrap_err();
            assert!(
                matches!(err, PayrollError::InvalidInput { .. }),
                "expected InvalidInput for {:?}",
                value
            );
        }
    }

    #[test]
    fn test_parse_year_month_rejects_signed_parts() {
        for value in ["+025-03", "-025-03", "2025-+3", " 025-03"] {
            assert!(parse_year_month(value).is_err(), "accepted {:?}", value);
        }
    }

    #[test]
    fn test_month_label_pads_month() {
        assert_eq!(month_label(date(2025, 1, 31)), "2025-01");
    }
}
