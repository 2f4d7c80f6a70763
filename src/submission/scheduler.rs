//! Periodic batch submission of processed payroll runs.
//!
//! # Tick
//!
//! 1. Select up to `chunk_size` runs that are not SUBMITTED (and still within
//!    the attempt cap, if one is configured).
//! 2. Build one batch: synthesized id, period label from the first run's end
//!    date, total net pay, employee ids.
//! 3. Call the disbursement client, bounded by `disbursement_timeout`.
//! 4. Map the outcome to each run's next status and commit the whole chunk
//!    at once.
//!
//! A transport failure or timeout abandons the tick with every run left as
//! it was. If the batch settles but the run commit fails, the error names the
//! batch so the runs can be reconciled against it. Ticks never overlap: the periodic loop skips a tick while another
//! submission holds the guard, and manual submissions wait for it.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tokio::time::{MissedTickBehavior, interval, timeout};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::config::SchedulerSettings;
use crate::error::{PayrollError, PayrollResult};
use crate::models::{DisbursementOutcome, PayrollRun, month_label};
use crate::store::{PayrollRunStore, RunStatusUpdate};

use super::{DisbursementClient, DisbursementRequest, SubmissionPolicy};

/// Summary of one tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TickReport {
    /// Runs selected for submission.
    pub selected: usize,
    /// The batch submitted, if any.
    pub batch_id: Option<String>,
    /// The outcome reported, if any.
    pub outcome: Option<DisbursementOutcome>,
    /// Runs whose status changed.
    pub updated: usize,
}

impl TickReport {
    fn idle() -> Self {
        Self {
            selected: 0,
            batch_id: None,
            outcome: None,
            updated: 0,
        }
    }
}

/// Synthesizes a batch reference: `BATCH-<yyyymmddHHMMSS>-<8 hex>`.
pub fn new_batch_id(now: DateTime<Utc>) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("BATCH-{}-{}", now.format("%Y%m%d%H%M%S"), &suffix[..8])
}

/// Submits pending payroll runs in batches.
pub struct BatchSubmitter {
    runs: Arc<dyn PayrollRunStore>,
    client: Arc<dyn DisbursementClient>,
    chunk_size: usize,
    disbursement_timeout: Duration,
    policy: SubmissionPolicy,
    guard: Mutex<()>,
}

impl BatchSubmitter {
    /// Creates a submitter.
    pub fn new(
        runs: Arc<dyn PayrollRunStore>,
        client: Arc<dyn DisbursementClient>,
        settings: &SchedulerSettings,
    ) -> Self {
        Self {
            runs,
            client,
            chunk_size: settings.chunk_size.max(1),
            disbursement_timeout: settings.disbursement_timeout(),
            policy: settings.policy,
            guard: Mutex::new(()),
        }
    }

    /// Runs one tick, waiting for any in-flight tick to finish first.
    pub async fn submit_pending(&self) -> PayrollResult<TickReport> {
        let _guard = self.guard.lock().await;
        self.run_tick().await
    }

    /// Runs one tick unless another is in flight, in which case `None`.
    pub async fn try_submit_pending(&self) -> Option<PayrollResult<TickReport>> {
        let _guard = self.guard.try_lock().ok()?;
        Some(self.run_tick().await)
    }

    async fn run_tick(&self) -> PayrollResult<TickReport> {
        let pending = self
            .runs
            .select_pending(self.policy.selection(self.chunk_size))
            .await?;

        let Some(first) = pending.first() else {
            debug!("No pending payroll runs");
            return Ok(TickReport::idle());
        };

        let request = DisbursementRequest {
            batch_id: new_batch_id(Utc::now()),
            pay_period: month_label(first.pay_period_end),
            employee_ids: pending.iter().map(|r| r.employee_id.clone()).collect(),
            total_amount: pending.iter().map(|r| r.net_pay).sum::<Decimal>(),
        };

        info!(
            batch_id = %request.batch_id,
            pay_period = %request.pay_period,
            runs = pending.len(),
            total_amount = %request.total_amount,
            "Submitting payroll batch"
        );

        let response = match timeout(self.disbursement_timeout, self.client.submit(&request)).await
        {
            Ok(result) => result?,
            Err(_) => {
                return Err(PayrollError::TransientExternal {
                    message: format!(
                        "disbursement call for {} timed out after {} ms",
                        request.batch_id,
                        self.disbursement_timeout.as_millis()
                    ),
                });
            }
        };

        let outcome = response.status;
        let updates = self.plan_updates(&pending, &outcome, &request.batch_id);
        let updated = pending
            .iter()
            .zip(&updates)
            .filter(|(run, update)| run.status != update.status)
            .count();

        if let Err(err) = self.runs.apply_submission_results(&updates).await {
            error!(
                batch_id = %request.batch_id,
                outcome = %outcome,
                runs = pending.len(),
                error = %err,
                "Batch settled but run statuses were not committed"
            );
            return Err(PayrollError::Unexpected {
                message: format!(
                    "batch {} settled as {} but its runs were not updated: {}",
                    request.batch_id, outcome, err
                ),
            });
        }

        match outcome {
            DisbursementOutcome::Retry => info!(
                batch_id = %request.batch_id,
                runs = pending.len(),
                escalated = updated,
                "Disbursement asked for retry; runs stay pending"
            ),
            _ => info!(
                batch_id = %request.batch_id,
                outcome = %outcome,
                updated,
                "Payroll batch outcome applied"
            ),
        }

        Ok(TickReport {
            selected: pending.len(),
            batch_id: Some(request.batch_id),
            outcome: Some(outcome),
            updated,
        })
    }

    fn plan_updates(
        &self,
        pending: &[PayrollRun],
        outcome: &DisbursementOutcome,
        batch_id: &str,
    ) -> Vec<RunStatusUpdate> {
        pending
            .iter()
            .map(|run| RunStatusUpdate {
                run_id: run.id,
                status: self
                    .policy
                    .next_status(run.status, outcome, run.submission_attempts),
                batch_ref_id: batch_id.to_string(),
            })
            .collect()
    }

    /// Starts the periodic loop. Cancel the returned token to stop it.
    pub fn spawn(self: Arc<Self>, every: Duration) -> CancellationToken {
        let cancel = CancellationToken::new();
        let cancel_clone = cancel.clone();

        tokio::spawn(async move {
            self.run_loop(every, cancel_clone).await;
        });

        cancel
    }

    async fn run_loop(&self, every: Duration, cancel: CancellationToken) {
        let mut ticker = interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        info!(
            interval_secs = every.as_secs(),
            chunk_size = self.chunk_size,
            "Batch submitter started"
        );

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    info!("Batch submitter shutting down");
                    break;
                }
                _ = ticker.tick() => {
                    match self.try_submit_pending().await {
                        None => debug!("Previous submission still running, skipping tick"),
                        Some(Ok(report)) => debug!(selected = report.selected, "Tick complete"),
                        Some(Err(err)) => warn!(error = %err, "Batch submission failed, will retry next tick"),
                    }
                }
            }
        }
    }
}
