//! Resubmission policy for payroll runs.
//!
//! By default the scheduler keeps re-selecting every run that is not yet
//! SUBMITTED, with no cap and no escalation. Both knobs here are opt-in.

use serde::{Deserialize, Serialize};

use crate::models::{DisbursementOutcome, PayrollStatus};
use crate::store::PendingSelection;

/// Controls how often a run may be resubmitted and when RETRY gives up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmissionPolicy {
    /// Stop selecting a run once it has been attempted this many times.
    pub max_attempts: Option<u32>,
    /// Turn a RETRY into SUBMISSION_FAILED once a run has been attempted
    /// this many times.
    pub retry_escalation_after: Option<u32>,
}

impl SubmissionPolicy {
    /// Builds the store selection for one tick. The store admits a run
    /// through [`PendingSelection::admits`].
    pub fn selection(&self, limit: usize) -> PendingSelection {
        PendingSelection {
            limit,
            max_attempts: self.max_attempts,
        }
    }

    /// The status `run` moves to after receiving `outcome`.
    ///
    /// Delegates to [`PayrollStatus::on_outcome`], then escalates a RETRY if
    /// the attempt count including this one has reached the escalation
    /// threshold.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::models::{DisbursementOutcome, PayrollStatus};
    /// use payroll_engine::submission::SubmissionPolicy;
    ///
    /// let policy = SubmissionPolicy {
    ///     max_attempts: None,
    ///     retry_escalation_after: Some(3),
    /// };
    /// let retry = DisbursementOutcome::Retry;
    /// assert_eq!(policy.next_status(PayrollStatus::Processed, &retry, 1), PayrollStatus::Processed);
    /// assert_eq!(policy.next_status(PayrollStatus::Processed, &retry, 2), PayrollStatus::SubmissionFailed);
    /// ```
    pub fn next_status(
        &self,
        current: PayrollStatus,
        outcome: &DisbursementOutcome,
        previous_attempts: u32,
    ) -> PayrollStatus {
        let next = current.on_outcome(outcome);
        let escalate = matches!(outcome, DisbursementOutcome::Retry)
            && self
                .retry_escalation_after
                .is_some_and(|limit| previous_attempts.saturating_add(1) >= limit);
        if escalate && !next.is_terminal() {
            PayrollStatus::SubmissionFailed
        } else {
            next
        }
    }
}
