//! Storage abstractions for the payroll engine.
//!
//! The domain services only talk to these traits, so the persistence
//! technology can change without touching calculation, submission or
//! payslip logic. [`InMemoryStore`] implements all of them.

mod memory;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::PayrollResult;
use crate::models::{Batch, BatchLog, Employee, PayGroup, PayrollRun, PayrollStatus, Payslip};

pub use memory::InMemoryStore;

/// Read access to employee and pay group master data.
#[async_trait]
pub trait EmployeeDirectory: Send + Sync {
    /// Looks up an employee by id.
    async fn find_employee(&self, employee_id: &str) -> PayrollResult<Option<Employee>>;

    /// Looks up a pay group by id.
    async fn find_pay_group(&self, pay_group_id: &str) -> PayrollResult<Option<PayGroup>>;
}

/// Filter for listing payroll runs.
///
/// A run matches when its period lies within the given bounds.
#[derive(Debug, Clone, Default)]
pub struct PayrollRunFilter {
    /// Only runs for this employee.
    pub employee_id: Option<String>,
    /// Only runs starting on or after this date.
    pub period_start: Option<NaiveDate>,
    /// Only runs ending on or before this date.
    pub period_end: Option<NaiveDate>,
}

impl PayrollRunFilter {
    /// Returns true if `run` satisfies every set bound.
    pub fn matches(&self, run: &PayrollRun) -> bool {
        self.employee_id
            .as_deref()
            .is_none_or(|id| run.employee_id == id)
            && self.period_start.is_none_or(|d| run.pay_period_start >= d)
            && self.period_end.is_none_or(|d| run.pay_period_end <= d)
    }
}

/// Which runs the scheduler may pick up on a tick.
#[derive(Debug, Clone, Copy)]
pub struct PendingSelection {
    /// Maximum number of runs to return.
    pub limit: usize,
    /// Skip runs that have already been attempted this many times.
    pub max_attempts: Option<u32>,
}

impl PendingSelection {
    /// Whether `run` may be picked up: not yet SUBMITTED and below the
    /// attempt cap, if any.
    pub fn admits(&self, run: &PayrollRun) -> bool {
        run.status != PayrollStatus::Submitted
            && self
                .max_attempts
                .is_none_or(|max| run.submission_attempts < max)
    }
}

/// The result of one submission for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunStatusUpdate {
    /// The run to update.
    pub run_id: Uuid,
    /// Its new status.
    pub status: PayrollStatus,
    /// The batch the run was submitted in.
    pub batch_ref_id: String,
}

/// Persistence for payroll runs.
#[async_trait]
pub trait PayrollRunStore: Send + Sync {
    /// Persists a newly calculated run.
    async fn insert_run(&self, run: PayrollRun) -> PayrollResult<PayrollRun>;

    /// Lists runs matching `filter`, oldest first.
    async fn find_runs(&self, filter: &PayrollRunFilter) -> PayrollResult<Vec<PayrollRun>>;

    /// Finds the most recently created run for `employee_id` whose period
    /// ends in the same month as `month_end`.
    async fn find_run_for_month(
        &self,
        employee_id: &str,
        month_end: NaiveDate,
    ) -> PayrollResult<Option<PayrollRun>>;

    /// Selects runs admitted by [`PendingSelection::admits`], oldest first,
    /// up to `selection.limit`.
    async fn select_pending(&self, selection: PendingSelection) -> PayrollResult<Vec<PayrollRun>>;

    /// Applies every update or none of them. Each update also increments
    /// the run's attempt counter and records its batch reference.
    async fn apply_submission_results(&self, updates: &[RunStatusUpdate]) -> PayrollResult<()>;
}

/// Filter for batch log queries. At least one field must be set.
#[derive(Debug, Clone, Default)]
pub struct BatchLogFilter {
    /// Only logs for this batch.
    pub batch_ref_id: Option<String>,
    /// Only logs for this employee.
    pub employee_id: Option<String>,
}

impl BatchLogFilter {
    /// Returns true if `log` satisfies every set field.
    pub fn matches(&self, log: &BatchLog) -> bool {
        self.batch_ref_id
            .as_deref()
            .is_none_or(|id| log.batch_ref_id == id)
            && self
                .employee_id
                .as_deref()
                .is_none_or(|id| log.employee_id == id)
    }
}

/// Zero-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Page index, starting at 0.
    pub page: u32,
    /// Page size, at least 1.
    pub size: u32,
}

/// One page of results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Items on this page.
    pub content: Vec<T>,
    /// Page index.
    pub page: u32,
    /// Requested page size.
    pub size: u32,
    /// Items across all pages.
    pub total_elements: u64,
    /// Number of pages.
    pub total_pages: u32,
}

impl<T: Clone> Page<T> {
    /// Cuts `request`'s page out of the full, already ordered result set.
    pub fn from_slice(items: &[T], request: PageRequest) -> Self {
        let size = request.size.max(1);
        let total = items.len();
        let total_pages = total.div_ceil(size as usize) as u32;
        let start = (request.page as usize).saturating_mul(size as usize);
        let content = items
            .iter()
            .skip(start)
            .take(size as usize)
            .cloned()
            .collect();
        Page {
            content,
            page: request.page,
            size,
            total_elements: total as u64,
            total_pages,
        }
    }
}

/// Persistence for batches and their per-employee logs.
#[async_trait]
pub trait BatchStore: Send + Sync {
    /// Persists a settled batch together with its logs in one step, so a
    /// caller that is cancelled midway leaves nothing behind. Fails with
    /// `DuplicateBatch` if the reference already exists, leaving the
    /// existing batch and its logs untouched.
    async fn record_batch(&self, batch: Batch, logs: Vec<BatchLog>) -> PayrollResult<Batch>;

    /// Looks up a batch.
    async fn find_batch(&self, batch_ref_id: &str) -> PayrollResult<Option<Batch>>;

    /// Pages through logs matching `filter`, ordered by timestamp then
    /// employee id.
    async fn find_logs(
        &self,
        filter: &BatchLogFilter,
        page: PageRequest,
    ) -> PayrollResult<Page<BatchLog>>;
}

/// Persistence for payslips, unique on (employee id, pay period).
#[async_trait]
pub trait PayslipStore: Send + Sync {
    /// Looks up a payslip by its natural key.
    async fn find_payslip(
        &self,
        employee_id: &str,
        pay_period: NaiveDate,
    ) -> PayrollResult<Option<Payslip>>;

    /// Inserts a payslip. Fails with `UniqueViolation` if one already exists
    /// for the natural key.
    async fn insert_payslip(&self, payslip: Payslip) -> PayrollResult<Payslip>;

    /// Overwrites the payslip stored under the same natural key, keeping its
    /// id. Fails with `PayslipNotFound` if there is none.
    async fn update_payslip(&self, payslip: Payslip) -> PayrollResult<Payslip>;

    /// Loads all payslips for `employee_id` in `year`, ordered by period.
    async fn find_payslips_for_year(
        &self,
        employee_id: &str,
        year: i32,
    ) -> PayrollResult<Vec<Payslip>>;
}
