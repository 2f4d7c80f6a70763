//! Disbursement batch models.
//!
//! A [`Batch`] groups payroll runs submitted together; a [`BatchLog`] row is
//! written per employee per batch as an audit trail.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Outcome reported by the disbursement system for a batch.
///
/// Parsed leniently from its wire string; anything other than `SUCCESS`,
/// `RETRY` or `FAILED` is kept as [`DisbursementOutcome::Unrecognized`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DisbursementOutcome {
    /// Funds accepted for settlement.
    Success,
    /// Try again later.
    Retry,
    /// Rejected.
    Failed,
    /// A status this engine does not understand.
    Unrecognized(String),
}

impl DisbursementOutcome {
    /// Returns the wire name of the outcome.
    pub fn as_str(&self) -> &str {
        match self {
            DisbursementOutcome::Success => "SUCCESS",
            DisbursementOutcome::Retry => "RETRY",
            DisbursementOutcome::Failed => "FAILED",
            DisbursementOutcome::Unrecognized(raw) => raw,
        }
    }
}

impl From<String> for DisbursementOutcome {
    fn from(value: String) -> Self {
        match value.trim().to_ascii_uppercase().as_str() {
            "SUCCESS" => DisbursementOutcome::Success,
            "RETRY" => DisbursementOutcome::Retry,
            "FAILED" => DisbursementOutcome::Failed,
            _ => DisbursementOutcome::Unrecognized(value),
        }
    }
}

impl From<DisbursementOutcome> for String {
    fn from(value: DisbursementOutcome) -> Self {
        value.as_str().to_string()
    }
}

impl std::fmt::Display for DisbursementOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status of a batch and of its per-employee log rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BatchStatus {
    /// Persisted, awaiting an outcome.
    Pending,
    /// Accepted.
    Success,
    /// Deferred by the settlement system.
    Retry,
    /// Rejected.
    Failed,
}

impl BatchStatus {
    /// Returns the wire name of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            BatchStatus::Pending => "PENDING",
            BatchStatus::Success => "SUCCESS",
            BatchStatus::Retry => "RETRY",
            BatchStatus::Failed => "FAILED",
        }
    }
}

impl From<&DisbursementOutcome> for BatchStatus {
    fn from(outcome: &DisbursementOutcome) -> Self {
        match outcome {
            DisbursementOutcome::Success => BatchStatus::Success,
            DisbursementOutcome::Retry => BatchStatus::Retry,
            DisbursementOutcome::Failed | DisbursementOutcome::Unrecognized(_) => {
                BatchStatus::Failed
            }
        }
    }
}

/// A group of payroll runs submitted together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Batch {
    /// Unique batch reference.
    pub batch_ref_id: String,
    /// Pay period label (`YYYY-MM`).
    pub pay_period: String,
    /// Sum of net pay across the batch.
    pub total_amount: Decimal,
    /// Current status.
    pub status: BatchStatus,
    /// Number of employees in the batch.
    pub employee_count: u32,
    /// When the batch was persisted.
    pub created_at: DateTime<Utc>,
    /// When the batch was last changed.
    pub updated_at: DateTime<Utc>,
}

/// Audit row for one employee within one batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchLog {
    /// The batch this row belongs to.
    pub batch_ref_id: String,
    /// The employee the row is about.
    pub employee_id: String,
    /// The batch outcome recorded for this employee.
    pub status: BatchStatus,
    /// When the row was written.
    pub timestamp: DateTime<Utc>,
}
