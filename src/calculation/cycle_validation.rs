//! Pay period validation against a pay group's payment cycle.
//!
//! Periods must cover exactly one cycle. There are no partial periods.

use chrono::Datelike;

use crate::error::{PayrollError, PayrollResult};
use crate::models::{PayPeriod, PaymentCycle, last_day_of_month};

/// Day span (end - start) of a weekly period.
pub const WEEKLY_SPAN_DAYS: i64 = 6;

/// Day span (end - start) of a biweekly period.
pub const BIWEEKLY_SPAN_DAYS: i64 = 13;

/// Validates that `period` is exactly one `cycle` long.
///
/// - `MONTHLY`: starts on the 1st, ends on the last day of the same month.
/// - `WEEKLY`: end is exactly 6 days after start.
/// - `BIWEEKLY`: end is exactly 13 days after start.
///
/// An end date before the start date is always rejected.
///
/// # Errors
///
/// Returns [`PayrollError::InvalidPayPeriod`] naming the violated rule.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::validate_pay_period;
/// use payroll_engine::models::{PayPeriod, PaymentCycle};
/// use chrono::NaiveDate;
///
/// let march = PayPeriod::new(
///     NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2025, 3, 31).unwrap(),
/// );
/// assert!(validate_pay_period(&march, PaymentCycle::Monthly).is_ok());
/// assert!(validate_pay_period(&march, PaymentCycle::Weekly).is_err());
/// ```
pub fn validate_pay_period(period: &PayPeriod, cycle: PaymentCycle) -> PayrollResult<()> {
    let start = period.start_date;
    let end = period.end_date;

    if end < start {
        return Err(invalid(format!(
            "period end {} is before period start {}",
            end, start
        )));
    }

    match cycle {
        PaymentCycle::Monthly => {
            if start.day() != 1 {
                return Err(invalid(format!(
                    "monthly period must start on the 1st of the month, got {}",
                    start
                )));
            }
            if start.year() != end.year() || start.month() != end.month() {
                return Err(invalid(format!(
                    "monthly period must start and end in the same month, got {} to {}",
                    start, end
                )));
            }
            let month_end = last_day_of_month(end);
            if end != month_end {
                return Err(invalid(format!(
                    "monthly period must end on the last day of the month ({}), got {}",
                    month_end, end
                )));
            }
            Ok(())
        }
        PaymentCycle::Weekly => expect_span(period, WEEKLY_SPAN_DAYS, cycle),
        PaymentCycle::Biweekly => expect_span(period, BIWEEKLY_SPAN_DAYS, cycle),
    }
}

fn expect_span(period: &PayPeriod, expected: i64, cycle: PaymentCycle) -> PayrollResult<()> {
    let span = period.day_span();
    if span == expected {
        Ok(())
    } else {
        Err(invalid(format!(
            "{} period must span exactly {} days (end - start = {}), got {} to {} ({} days)",
            cycle,
            expected + 1,
            expected,
            period.start_date,
            period.end_date,
            span
        )))
    }
}

fn invalid(message: String) -> PayrollError {
    PayrollError::InvalidPayPeriod { message }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn period(start: (i32, u32, u32), end: (i32, u32, u32)) -> PayPeriod {
        PayPeriod::new(
            NaiveDate::from_ymd_opt(start.0, start.1, start.2).unwrap(),
            NaiveDate::from_ymd_opt(end.0, end.1, end.2).unwrap(),
        )
    }

    fn message(result: PayrollResult<()>) -> String {
        match result {
            Err(PayrollError::InvalidPayPeriod { message }) => message,
            other => panic!("expected InvalidPayPeriod, got {:?}", other),
        }
    }

    #[test]
    fn test_monthly_full_month_passes() {
        let p = period((2025, 3, 1), (2025, 3, 31));
        assert!(validate_pay_period(&p, PaymentCycle::Monthly).is_ok());
    }

    #[test]
    fn test_monthly_leap_february_passes() {
        let p = period((2024, 2, 1), (2024, 2, 29));
        assert!(validate_pay_period(&p, PaymentCycle::Monthly).is_ok());
    }

    #[test]
    fn test_monthly_late_start_fails() {
        let p = period((2025, 3, 2), (2025, 3, 31));
        let msg = message(validate_pay_period(&p, PaymentCycle::Monthly));
        assert!(msg.contains("start on the 1st"), "{}", msg);
    }

    #[test]
    fn test_monthly_early_end_fails() {
        let p = period((2025, 3, 1), (2025, 3, 30));
        let msg = message(validate_pay_period(&p, PaymentCycle::Monthly));
        assert!(msg.contains("last day of the month"), "{}", msg);
    }

    #[test]
    fn test_monthly_cross_month_fails() {
        let p = period((2025, 3, 1), (2025, 4, 1));
        let msg = message(validate_pay_period(&p, PaymentCycle::Monthly));
        assert!(msg.contains("same month"), "{}", msg);
    }

    #[test]
    fn test_monthly_cross_month_ending_on_month_end_fails() {
        let p = period((2025, 3, 1), (2025, 4, 30));
        assert!(validate_pay_period(&p, PaymentCycle::Monthly).is_err());
    }

    #[test]
    fn test_weekly_six_day_span_passes() {
        let p = period((2025, 3, 3), (2025, 3, 9));
        assert!(validate_pay_period(&p, PaymentCycle::Weekly).is_ok());
    }

    #[test]
    fn test_weekly_five_day_span_fails() {
        let p = period((2025, 3, 3), (2025, 3, 8));
        let msg = message(validate_pay_period(&p, PaymentCycle::Weekly));
        assert!(msg.contains("WEEKLY"), "{}", msg);
    }

    #[test]
    fn test_weekly_seven_day_span_fails() {
        let p = period((2025, 3, 3), (2025, 3, 10));
        assert!(validate_pay_period(&p, PaymentCycle::Weekly).is_err());
    }

    #[test]
    fn test_biweekly_thirteen_day_span_passes() {
        let p = period((2025, 3, 3), (2025, 3, 16));
        assert!(validate_pay_period(&p, PaymentCycle::Biweekly).is_ok());
    }

    #[test]
    fn test_biweekly_twelve_day_span_fails() {
        let p = period((2025, 3, 3), (2025, 3, 15));
        let msg = message(validate_pay_period(&p, PaymentCycle::Biweekly));
        assert!(msg.contains("BIWEEKLY"), "{}", msg);
    }

    #[test]
    fn test_weekly_across_month_boundary_passes() {
        let p = period((2025, 3, 28), (2025, 4, 3));
        assert!(validate_pay_period(&p, PaymentCycle::Weekly).is_ok());
    }

    #[test]
    fn test_end_before_start_fails_for_every_cycle() {
        let p = period((2025, 3, 9), (2025, 3, 3));
        for cycle in [
            PaymentCycle::Weekly,
            PaymentCycle::Biweekly,
            PaymentCycle::Monthly,
        ] {
            let msg = message(validate_pay_period(&p, cycle));
            assert!(msg.contains("before period start"), "{}", msg);
        }
    }
}
