//! Payroll run model and its submission state machine.
//!
//! A [`PayrollRun`] is one computed pay result for one employee over one pay
//! period. Its [`PayrollStatus`] moves in response to outcomes reported by the
//! disbursement collaborator; the transition itself is a pure function so it
//! can be tested without any store or scheduler.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{DisbursementOutcome, PayPeriod};

/// Submission status of a payroll run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PayrollStatus {
    /// Calculated and waiting for submission.
    Processed,
    /// Accepted by the disbursement system. Terminal.
    Submitted,
    /// Rejected by the disbursement system.
    SubmissionFailed,
    /// Failed during processing.
    Failed,
}

impl PayrollStatus {
    /// Returns true if no further outcome can change this status.
    pub fn is_terminal(&self) -> bool {
        matches!(self, PayrollStatus::Submitted)
    }

    /// Returns the status a run moves to after the disbursement system
    /// reports `outcome`.
    ///
    /// `RETRY` leaves the status unchanged so the run is picked up again.
    /// Unrecognised outcomes are treated as rejections.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::models::{DisbursementOutcome, PayrollStatus};
    ///
    /// let status = PayrollStatus::Processed;
    /// assert_eq!(status.on_outcome(&DisbursementOutcome::Success), PayrollStatus::Submitted);
    /// assert_eq!(status.on_outcome(&DisbursementOutcome::Retry), PayrollStatus::Processed);
    /// assert_eq!(
    ///     status.on_outcome(&DisbursementOutcome::Unrecognized("BOUNCED".to_string())),
    ///     PayrollStatus::SubmissionFailed
    /// );
    /// ```
    pub fn on_outcome(self, outcome: &DisbursementOutcome) -> PayrollStatus {
        if self.is_terminal() {
            return self;
        }
        match outcome {
            DisbursementOutcome::Success => PayrollStatus::Submitted,
            DisbursementOutcome::Retry => self,
            DisbursementOutcome::Failed | DisbursementOutcome::Unrecognized(_) => {
                PayrollStatus::SubmissionFailed
            }
        }
    }

    /// Returns the wire name of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            PayrollStatus::Processed => "PROCESSED",
            PayrollStatus::Submitted => "SUBMITTED",
            PayrollStatus::SubmissionFailed => "SUBMISSION_FAILED",
            PayrollStatus::Failed => "FAILED",
        }
    }
}

impl std::str::FromStr for PayrollStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PROCESSED" => Ok(PayrollStatus::Processed),
            "SUBMITTED" => Ok(PayrollStatus::Submitted),
            "SUBMISSION_FAILED" => Ok(PayrollStatus::SubmissionFailed),
            "FAILED" => Ok(PayrollStatus::Failed),
            other => Err(format!("unknown payroll status '{}'", other)),
        }
    }
}

/// One computed pay result for one employee and period.
///
/// All monetary fields are rounded half-up to two decimals before a run is
/// stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollRun {
    /// Store-assigned identifier.
    pub id: Uuid,
    /// The employee paid by this run.
    pub employee_id: String,
    /// The pay group whose rates were applied.
    pub pay_group_id: String,
    /// First day of the period (inclusive).
    pub pay_period_start: NaiveDate,
    /// Last day of the period (inclusive). Never before the start.
    pub pay_period_end: NaiveDate,
    /// Gross pay before tax, benefits and deductions.
    pub gross_pay: Decimal,
    /// Tax withheld.
    pub tax_deduction: Option<Decimal>,
    /// Benefit added on top of gross.
    pub benefit_addition: Option<Decimal>,
    /// Other deductions withheld.
    pub other_deduction: Option<Decimal>,
    /// Amount to disburse.
    pub net_pay: Decimal,
    /// Submission status.
    pub status: PayrollStatus,
    /// Number of structured responses received from the disbursement system.
    #[serde(default)]
    pub submission_attempts: u32,
    /// Reference of the last batch this run was submitted in.
    #[serde(default)]
    pub last_batch_ref: Option<String>,
    /// When the run was calculated.
    pub created_at: DateTime<Utc>,
}

impl PayrollRun {
    /// The period this run covers.
    pub fn pay_period(&self) -> PayPeriod {
        PayPeriod::new(self.pay_period_start, self.pay_period_end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [PayrollStatus; 4] = [
        PayrollStatus::Processed,
        PayrollStatus::Submitted,
        PayrollStatus::SubmissionFailed,
        PayrollStatus::Failed,
    ];

    #[test]
    fn test_success_moves_every_open_status_to_submitted() {
        for status in ALL {
            assert_eq!(
                status.on_outcome(&DisbursementOutcome::Success),
                PayrollStatus::Submitted
            );
        }
    }

    #[test]
    fn test_retry_leaves_status_unchanged() {
        for status in ALL {
            assert_eq!(status.on_outcome(&DisbursementOutcome::Retry), status);
        }
    }

    #[test]
    fn test_failed_and_unknown_mark_submission_failed() {
        let unknown = DisbursementOutcome::Unrecognized("PARTIAL".to_string());
        for status in [
            PayrollStatus::Processed,
            PayrollStatus::SubmissionFailed,
            PayrollStatus::Failed,
        ] {
            assert_eq!(
                status.on_outcome(&DisbursementOutcome::Failed),
                PayrollStatus::SubmissionFailed
            );
            assert_eq!(status.on_outcome(&unknown), PayrollStatus::SubmissionFailed);
        }
    }

    #[test]
    fn test_submitted_is_terminal() {
        let submitted = PayrollStatus::Submitted;
        assert!(submitted.is_terminal());
        assert_eq!(
            submitted.on_outcome(&DisbursementOutcome::Failed),
            PayrollStatus::Submitted
        );
    }

    #[test]
    fn test_status_parses_case_insensitively() {
        assert_eq!(
            "submission_failed".parse::<PayrollStatus>().unwrap(),
            PayrollStatus::SubmissionFailed
        );
        assert!("DONE".parse::<PayrollStatus>().is_err());
    }

    #[test]
    fn test_status_serializes_screaming_snake() {
        for status in ALL {
            assert_eq!(
                serde_json::to_string(&status).unwrap(),
                format!("\"{}\"", status.as_str())
            );
        }
    }
}
