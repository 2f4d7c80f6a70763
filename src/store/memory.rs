//! In-memory implementation of every storage trait.
//!
//! Each table sits behind its own `tokio::sync::RwLock`. Uniqueness
//! constraints (batch reference, payslip natural key) are checked and
//! written under a single write lock, so concurrent writers observe them
//! exactly as they would a database constraint.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{PayrollError, PayrollResult};
use crate::models::{Batch, BatchLog, Employee, PayGroup, PayrollRun, Payslip};

use super::{
    BatchLogFilter, BatchStore, EmployeeDirectory, Page, PageRequest, PayrollRunFilter,
    PayrollRunStore, PayslipStore, PendingSelection, RunStatusUpdate,
};

type PayslipKey = (String, NaiveDate);

/// Process-local store for all payroll data.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    employees: RwLock<HashMap<String, Employee>>,
    pay_groups: RwLock<HashMap<String, PayGroup>>,
    runs: RwLock<Vec<PayrollRun>>,
    batches: RwLock<HashMap<String, Batch>>,
    batch_logs: RwLock<Vec<BatchLog>>,
    payslips: RwLock<HashMap<PayslipKey, Payslip>>,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-loaded with master data.
    pub fn with_directory(employees: Vec<Employee>, pay_groups: Vec<PayGroup>) -> Self {
        Self {
            employees: RwLock::new(employees.into_iter().map(|e| (e.id.clone(), e)).collect()),
            pay_groups: RwLock::new(pay_groups.into_iter().map(|g| (g.id.clone(), g)).collect()),
            ..Self::default()
        }
    }

    /// Number of stored payslips.
    #[cfg(test)]
    pub(crate) async fn payslip_count(&self) -> usize {
        self.payslips.read().await.len()
    }
}

#[async_trait]
impl EmployeeDirectory for InMemoryStore {
    async fn find_employee(&self, employee_id: &str) -> PayrollResult<Option<Employee>> {
        Ok(self.employees.read().await.get(employee_id).cloned())
    }

    async fn find_pay_group(&self, pay_group_id: &str) -> PayrollResult<Option<PayGroup>> {
        Ok(self.pay_groups.read().await.get(pay_group_id).cloned())
    }
}

#[async_trait]
impl PayrollRunStore for InMemoryStore {
    async fn insert_run(&self, run: PayrollRun) -> PayrollResult<PayrollRun> {
        if run.pay_period_end < run.pay_period_start {
            return Err(PayrollError::InvalidPayPeriod {
                message: format!(
                    "period end {} is before period start {}",
                    run.pay_period_end, run.pay_period_start
                ),
            });
        }
        self.runs.write().await.push(run.clone());
        Ok(run)
    }

    async fn find_runs(&self, filter: &PayrollRunFilter) -> PayrollResult<Vec<PayrollRun>> {
        Ok(self
            .runs
            .read()
            .await
            .iter()
            .filter(|run| filter.matches(run))
            .cloned()
            .collect())
    }

    async fn find_run_for_month(
        &self,
        employee_id: &str,
        month_end: NaiveDate,
    ) -> PayrollResult<Option<PayrollRun>> {
        Ok(self
            .runs
            .read()
            .await
            .iter()
            .filter(|run| {
                run.employee_id == employee_id
                    && run.pay_period_end.year() == month_end.year()
                    && run.pay_period_end.month() == month_end.month()
            })
            .max_by_key(|run| run.created_at)
            .cloned())
    }

    async fn select_pending(&self, selection: PendingSelection) -> PayrollResult<Vec<PayrollRun>> {
        Ok(self
            .runs
            .read()
            .await
            .iter()
            .filter(|run| selection.admits(run))
            .take(selection.limit)
            .cloned()
            .collect())
    }

    async fn apply_submission_results(&self, updates: &[RunStatusUpdate]) -> PayrollResult<()> {
        let mut runs = self.runs.write().await;

        let mut positions = Vec::with_capacity(updates.len());
        for update in updates {
            let position = runs
                .iter()
                .position(|run| run.id == update.run_id)
                .ok_or_else(|| PayrollError::Unexpected {
                    message: format!("payroll run {} disappeared during submission", update.run_id),
                })?;
            positions.push(position);
        }

        for (update, position) in updates.iter().zip(positions) {
            let run = &mut runs[position];
            run.status = update.status;
            run.submission_attempts += 1;
            run.last_batch_ref = Some(update.batch_ref_id.clone());
        }
        Ok(())
    }
}

#[async_trait]
impl BatchStore for InMemoryStore {
    async fn record_batch(&self, batch: Batch, logs: Vec<BatchLog>) -> PayrollResult<Batch> {
        // Both guards are held before anything is written.
        let mut batches = self.batches.write().await;
        let mut batch_logs = self.batch_logs.write().await;
        if batches.contains_key(&batch.batch_ref_id) {
            return Err(PayrollError::DuplicateBatch {
                batch_id: batch.batch_ref_id,
            });
        }
        batches.insert(batch.batch_ref_id.clone(), batch.clone());
        batch_logs.extend(logs);
        Ok(batch)
    }

    async fn find_batch(&self, batch_ref_id: &str) -> PayrollResult<Option<Batch>> {
        Ok(self.batches.read().await.get(batch_ref_id).cloned())
    }

    async fn find_logs(
        &self,
        filter: &BatchLogFilter,
        page: PageRequest,
    ) -> PayrollResult<Page<BatchLog>> {
        let mut matching: Vec<BatchLog> = self
            .batch_logs
            .read()
            .await
            .iter()
            .filter(|log| filter.matches(log))
            .cloned()
            .collect();
        matching.sort_by(|a, b| {
            a.timestamp
                .cmp(&b.timestamp)
                .then_with(|| a.employee_id.cmp(&b.employee_id))
        });
        Ok(Page::from_slice(&matching, page))
    }
}

#[async_trait]
impl PayslipStore for InMemoryStore {
    async fn find_payslip(
        &self,
        employee_id: &str,
        pay_period: NaiveDate,
    ) -> PayrollResult<Option<Payslip>> {
        Ok(self
            .payslips
            .read()
            .await
            .get(&(employee_id.to_string(), pay_period))
            .cloned())
    }

    async fn insert_payslip(&self, payslip: Payslip) -> PayrollResult<Payslip> {
        let mut payslips = self.payslips.write().await;
        let key = payslip.natural_key();
        if payslips.contains_key(&key) {
            return Err(PayrollError::UniqueViolation {
                entity: "payslip".to_string(),
                key: format!("{}/{}", key.0, key.1),
            });
        }
        payslips.insert(key, payslip.clone());
        Ok(payslip)
    }

    async fn update_payslip(&self, payslip: Payslip) -> PayrollResult<Payslip> {
        let mut payslips = self.payslips.write().await;
        let key = payslip.natural_key();
        let existing = payslips
            .get_mut(&key)
            .ok_or_else(|| PayrollError::PayslipNotFound {
                employee_id: key.0.clone(),
                period: crate::models::month_label(key.1),
            })?;
        let id: Uuid = existing.id;
        *existing = Payslip { id, ..payslip };
        Ok(existing.clone())
    }

    async fn find_payslips_for_year(
        &self,
        employee_id: &str,
        year: i32,
    ) -> PayrollResult<Vec<Payslip>> {
        let mut found: Vec<Payslip> = self
            .payslips
            .read()
            .await
            .values()
            .filter(|p| p.employee_id == employee_id && p.pay_period.year() == year)
            .cloned()
            .collect();
        found.sort_by_key(|p| p.pay_period);
        Ok(found)
    }
}
