//! Core data models for the payroll engine.
//!
//! This module contains all the domain models used throughout the engine.

mod batch;
mod employee;
mod pay_group;
mod pay_period;
mod payroll_run;
mod payslip;
mod ytd;

pub use batch::{Batch, BatchLog, BatchStatus, DisbursementOutcome};
pub use employee::{Employee, EmployeeStatus};
pub use pay_group::{PayGroup, PaymentCycle};
pub use pay_period::{PayPeriod, last_day_of_month, month_label, parse_year_month};
pub use payroll_run::{PayrollRun, PayrollStatus};
pub use payslip::{Payslip, PayslipMetadata};
pub use ytd::{MonthlyBreakdown, YtdSummary, YtdTotals};
