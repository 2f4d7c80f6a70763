//! Synchronous disbursement integration.
//!
//! [`IntegrationService`] is the receiving side of a batch submission. A batch
//! is PENDING from the moment it is received until the [`OutcomeGenerator`]
//! settles it; only the settled batch is stored, together with one log row
//! per employee, in a single store call. A submission abandoned before that
//! call leaves no batch and no logs.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{PayrollError, PayrollResult};
use crate::models::{Batch, BatchLog, BatchStatus, DisbursementOutcome};
use crate::store::{BatchLogFilter, BatchStore, Page, PageRequest};

use super::OutcomeGenerator;

/// Default page size for log queries.
pub const DEFAULT_LOG_PAGE_SIZE: u32 = 20;

/// Largest page size accepted for log queries.
pub const MAX_LOG_PAGE_SIZE: u32 = 100;

/// A batch handed to the disbursement system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisbursementRequest {
    /// Caller-chosen unique batch reference.
    pub batch_id: String,
    /// Pay period label (`YYYY-MM`).
    pub pay_period: String,
    /// Employees paid in this batch.
    pub employee_ids: Vec<String>,
    /// Sum of net pay.
    pub total_amount: Decimal,
}

/// What the disbursement system reports back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisbursementResponse {
    /// The batch reference.
    pub batch_ref_id: String,
    /// Settlement outcome.
    pub status: DisbursementOutcome,
    /// When the outcome was decided.
    pub timestamp: DateTime<Utc>,
    /// Human-readable summary.
    pub log_message: String,
}

/// Current state of a submitted batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchStatusView {
    /// The batch reference.
    pub batch_id: String,
    /// Batch status.
    pub overall_status: BatchStatus,
    /// Number of employees in the batch.
    pub number_of_employees: u32,
    /// When the batch was last updated.
    pub processed_at: DateTime<Utc>,
    /// Human-readable summary.
    pub log_message: String,
}

/// Receives batch submissions and answers status and log queries.
#[derive(Clone)]
pub struct IntegrationService {
    batches: Arc<dyn BatchStore>,
    outcomes: Arc<dyn OutcomeGenerator>,
}

impl IntegrationService {
    /// Creates a service over `batches`, settling with `outcomes`.
    pub fn new(batches: Arc<dyn BatchStore>, outcomes: Arc<dyn OutcomeGenerator>) -> Self {
        Self { batches, outcomes }
    }

    /// Persists and settles a batch.
    ///
    /// # Errors
    ///
    /// - `MandatoryFieldMissing` if the batch id, pay period or employee list is empty
    /// - `DuplicateBatch` if the batch id was already submitted; nothing is written
    pub async fn submit(&self, request: DisbursementRequest) -> PayrollResult<DisbursementResponse> {
        if request.batch_id.trim().is_empty() {
            return Err(missing("batchId"));
        }
        if request.pay_period.trim().is_empty() {
            return Err(missing("payPeriod"));
        }
        if request.employee_ids.is_empty() {
            return Err(missing("employeeIds"));
        }

        if self.batches.find_batch(&request.batch_id).await?.is_some() {
            warn!(batch_id = %request.batch_id, "Batch rejected as duplicate");
            return Err(PayrollError::DuplicateBatch {
                batch_id: request.batch_id,
            });
        }

        let received_at = Utc::now();
        let outcome = self.outcomes.next_outcome(&request.batch_id);
        let status = BatchStatus::from(&outcome);
        let timestamp = Utc::now();
        let batch = Batch {
            batch_ref_id: request.batch_id.clone(),
            pay_period: request.pay_period.clone(),
            total_amount: request.total_amount,
            status,
            employee_count: request.employee_ids.len() as u32,
            created_at: received_at,
            updated_at: timestamp,
        };
        let logs = request
            .employee_ids
            .iter()
            .map(|employee_id| BatchLog {
                batch_ref_id: request.batch_id.clone(),
                employee_id: employee_id.clone(),
                status,
                timestamp,
            })
            .collect();

        if let Err(err) = self.batches.record_batch(batch, logs).await {
            warn!(batch_id = %request.batch_id, error = %err, "Batch rejected");
            return Err(err);
        }

        info!(
            batch_id = %request.batch_id,
            pay_period = %request.pay_period,
            employees = request.employee_ids.len(),
            total_amount = %request.total_amount,
            outcome = %outcome,
            "Batch settled"
        );

        Ok(DisbursementResponse {
            log_message: log_message(&request.batch_id, status),
            batch_ref_id: request.batch_id,
            status: outcome,
            timestamp,
        })
    }

    /// Returns the status of a batch.
    pub async fn status(&self, batch_id: &str) -> PayrollResult<BatchStatusView> {
        let batch = self
            .batches
            .find_batch(batch_id)
            .await?
            .ok_or_else(|| PayrollError::BatchNotFound {
                batch_id: batch_id.to_string(),
            })?;

        Ok(BatchStatusView {
            log_message: log_message(&batch.batch_ref_id, batch.status),
            batch_id: batch.batch_ref_id,
            overall_status: batch.status,
            number_of_employees: batch.employee_count,
            processed_at: batch.updated_at,
        })
    }

    /// Pages through per-employee log rows by batch and/or employee.
    ///
    /// `size` defaults to [`DEFAULT_LOG_PAGE_SIZE`] and must be between 1 and
    /// [`MAX_LOG_PAGE_SIZE`].
    pub async fn logs(
        &self,
        filter: BatchLogFilter,
        page: Option<u32>,
        size: Option<u32>,
    ) -> PayrollResult<Page<BatchLog>> {
        let filter = BatchLogFilter {
            batch_ref_id: non_blank(filter.batch_ref_id),
            employee_id: non_blank(filter.employee_id),
        };
        if filter.batch_ref_id.is_none() && filter.employee_id.is_none() {
            return Err(missing("batchId or employeeId"));
        }

        let size = size.unwrap_or(DEFAULT_LOG_PAGE_SIZE);
        if size == 0 || size > MAX_LOG_PAGE_SIZE {
            return Err(PayrollError::InvalidInput {
                field: "size".to_string(),
                message: format!("must be between 1 and {}", MAX_LOG_PAGE_SIZE),
            });
        }

        self.batches
            .find_logs(
                &filter,
                PageRequest {
                    page: page.unwrap_or(0),
                    size,
                },
            )
            .await
    }
}

fn missing(field: &str) -> PayrollError {
    PayrollError::MandatoryFieldMissing {
        field: field.to_string(),
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn log_message(batch_id: &str, status: BatchStatus) -> String {
    match status {
        BatchStatus::Pending => format!("Batch {} is awaiting settlement", batch_id),
        BatchStatus::Success => format!("Batch {} settled successfully", batch_id),
        BatchStatus::Retry => format!("Batch {} deferred, resubmit later", batch_id),
        BatchStatus::Failed => format!("Batch {} was rejected", batch_id),
    }
}
