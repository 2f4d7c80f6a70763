//! Idempotent payslip derivation.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{PayrollError, PayrollResult};
use crate::models::{Payslip, PayslipMetadata, PayrollRun, last_day_of_month, month_label};
use crate::store::{EmployeeDirectory, PayrollRunStore, PayslipStore};

use super::require_listed_employee;

/// Earnings line for the run's gross pay.
pub const BASIC_SALARY_LINE: &str = "Basic Salary";
/// Earnings line for the run's benefit addition.
pub const BENEFITS_LINE: &str = "Benefits";
/// Deduction line for the run's tax.
pub const TAX_LINE: &str = "Tax";

/// Derives payslips from payroll runs and upserts them by
/// (employee id, month-end date).
#[derive(Clone)]
pub struct PayslipBuilder {
    directory: Arc<dyn EmployeeDirectory>,
    runs: Arc<dyn PayrollRunStore>,
    payslips: Arc<dyn PayslipStore>,
    storage_root: String,
}

impl PayslipBuilder {
    /// Creates a builder. Document paths are rooted at `storage_root`.
    pub fn new(
        directory: Arc<dyn EmployeeDirectory>,
        runs: Arc<dyn PayrollRunStore>,
        payslips: Arc<dyn PayslipStore>,
        storage_root: impl Into<String>,
    ) -> Self {
        Self {
            directory,
            runs,
            payslips,
            storage_root: storage_root.into(),
        }
    }

    /// Builds the payslip for the month containing `pay_period` and stores
    /// it, replacing any earlier payslip for the same month.
    ///
    /// Calling this again for an unchanged run stores identical values and
    /// keeps the payslip id.
    ///
    /// # Errors
    ///
    /// - `EmployeeNotFound` if the employee is missing or not ACTIVE
    /// - `PayrollNotReady` if no run ends in that month
    pub async fn build_and_upsert(
        &self,
        employee_id: &str,
        pay_period: NaiveDate,
    ) -> PayrollResult<PayslipMetadata> {
        require_listed_employee(self.directory.as_ref(), employee_id).await?;

        let month_end = last_day_of_month(pay_period);
        let run = self
            .runs
            .find_run_for_month(employee_id, month_end)
            .await?
            .ok_or_else(|| PayrollError::PayrollNotReady {
                employee_id: employee_id.to_string(),
                period: month_label(month_end),
            })?;

        let draft = self.derive(&run, month_end);
        let stored = self.upsert(draft).await?;

        info!(
            employee_id = %stored.employee_id,
            pay_period = %month_label(stored.pay_period),
            payslip_id = %stored.id,
            payroll_id = %stored.payroll_id,
            "Payslip generated"
        );
        Ok(PayslipMetadata::from(&stored))
    }

    /// Returns the stored payslip for the month containing `pay_period`.
    pub async fn get_payslip(
        &self,
        employee_id: &str,
        pay_period: NaiveDate,
    ) -> PayrollResult<PayslipMetadata> {
        let month_end = last_day_of_month(pay_period);
        self.payslips
            .find_payslip(employee_id, month_end)
            .await?
            .map(|payslip| PayslipMetadata::from(&payslip))
            .ok_or_else(|| PayrollError::PayslipNotFound {
                employee_id: employee_id.to_string(),
                period: month_label(month_end),
            })
    }

    /// Document location for an employee's payslip, a pure function of the
    /// employee id and month.
    pub fn file_path(&self, employee_id: &str, month_end: NaiveDate) -> String {
        let root = self.storage_root.trim_end_matches('/');
        let (year, month) = (month_end.year(), month_end.month());
        format!(
            "{root}/{employee_id}/{year:04}/{month:02}/payslip_{employee_id}_{month:02}_{year:04}.pdf"
        )
    }

    fn derive(&self, run: &PayrollRun, month_end: NaiveDate) -> Payslip {
        let benefits = run.benefit_addition.unwrap_or(Decimal::ZERO);

        let mut earnings = BTreeMap::new();
        earnings.insert(BASIC_SALARY_LINE.to_string(), run.gross_pay);
        if let Some(benefit) = positive(run.benefit_addition) {
            earnings.insert(BENEFITS_LINE.to_string(), benefit);
        }

        let mut deductions = BTreeMap::new();
        if let Some(tax) = positive(run.tax_deduction) {
            deductions.insert(TAX_LINE.to_string(), tax);
        }

        Payslip {
            id: Uuid::new_v4(),
            employee_id: run.employee_id.clone(),
            payroll_id: run.id,
            pay_period: month_end,
            gross_pay: run.gross_pay,
            net_pay: run.net_pay,
            benefits,
            earnings,
            deductions,
            file_path: self.file_path(&run.employee_id, month_end),
        }
    }

    async fn upsert(&self, draft: Payslip) -> PayrollResult<Payslip> {
        if self
            .payslips
            .find_payslip(&draft.employee_id, draft.pay_period)
            .await?
            .is_some()
        {
            return self.payslips.update_payslip(draft).await;
        }

        match self.payslips.insert_payslip(draft.clone()).await {
            Err(PayrollError::UniqueViolation { key, .. }) => {
                debug!(key = %key, "Lost payslip insert race, updating instead");
                self.payslips.update_payslip(draft).await
            }
            other => other,
        }
    }
}

fn positive(amount: Option<Decimal>) -> Option<Decimal> {
    amount.filter(|a| *a > Decimal::ZERO)
}
