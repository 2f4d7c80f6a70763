//! Calculation logic for the payroll engine.
//!
//! This module contains the pure functions behind payroll: validating a pay
//! period against its payment cycle, turning gross pay and pay group rates
//! into a net pay breakdown, and folding a year of payslips into
//! year-to-date totals.

mod cycle_validation;
mod net_pay;
mod ytd;

pub use cycle_validation::{BIWEEKLY_SPAN_DAYS, WEEKLY_SPAN_DAYS, validate_pay_period};
pub use net_pay::{NetPayBreakdown, calculate_net_pay, percent_of, round2};
pub use ytd::summarize_year;
