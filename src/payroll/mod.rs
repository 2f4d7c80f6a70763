//! Period payroll calculation.
//!
//! [`PayrollService`] reads the employee and pay group, validates the period
//! against the pay group's cycle, computes the net pay breakdown and stores
//! one [`PayrollRun`] in PROCESSED status.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::calculation::{calculate_net_pay, validate_pay_period};
use crate::error::{PayrollError, PayrollResult};
use crate::models::{Employee, PayPeriod, PayrollRun, PayrollStatus};
use crate::store::{EmployeeDirectory, PayrollRunFilter, PayrollRunStore};

/// Looks up an employee and checks they can be paid.
pub(crate) async fn require_active_employee(
    directory: &dyn EmployeeDirectory,
    employee_id: &str,
) -> PayrollResult<Employee> {
    let employee = directory
        .find_employee(employee_id)
        .await?
        .ok_or_else(|| PayrollError::EmployeeNotFound {
            employee_id: employee_id.to_string(),
        })?;

    if !employee.is_active() {
        return Err(PayrollError::EmployeeInactive {
            employee_id: employee.id,
            status: employee.status.as_str().to_string(),
        });
    }
    Ok(employee)
}

/// Calculates and lists payroll runs.
#[derive(Clone)]
pub struct PayrollService {
    directory: Arc<dyn EmployeeDirectory>,
    runs: Arc<dyn PayrollRunStore>,
}

impl PayrollService {
    /// Creates a service over the given stores.
    pub fn new(directory: Arc<dyn EmployeeDirectory>, runs: Arc<dyn PayrollRunStore>) -> Self {
        Self { directory, runs }
    }

    /// Calculates pay for `employee_id` over `period` and stores the run.
    ///
    /// # Errors
    ///
    /// - `EmployeeNotFound` / `EmployeeInactive` for a missing or non-active employee
    /// - `PayGroupNotFound` if the employee's pay group does not exist
    /// - `InvalidPayPeriod` if the period breaks the pay group's cycle rules
    pub async fn calculate(&self, employee_id: &str, period: PayPeriod) -> PayrollResult<PayrollRun> {
        let employee = require_active_employee(self.directory.as_ref(), employee_id).await?;

        let pay_group = self
            .directory
            .find_pay_group(&employee.pay_group_id)
            .await?
            .ok_or_else(|| PayrollError::PayGroupNotFound {
                pay_group_id: employee.pay_group_id.clone(),
            })?;

        validate_pay_period(&period, pay_group.payment_cycle)?;
        debug!(
            employee_id = %employee.id,
            pay_group_id = %pay_group.id,
            cycle = %pay_group.payment_cycle,
            start = %period.start_date,
            end = %period.end_date,
            "Pay period validated"
        );

        let breakdown = calculate_net_pay(employee.base_salary, &pay_group);

        let run = PayrollRun {
            id: Uuid::new_v4(),
            employee_id: employee.id.clone(),
            pay_group_id: pay_group.id.clone(),
            pay_period_start: period.start_date,
            pay_period_end: period.end_date,
            gross_pay: breakdown.gross_pay,
            tax_deduction: Some(breakdown.tax),
            benefit_addition: Some(breakdown.benefit),
            other_deduction: Some(breakdown.deduction),
            net_pay: breakdown.net_pay,
            status: PayrollStatus::Processed,
            submission_attempts: 0,
            last_batch_ref: None,
            created_at: Utc::now(),
        };

        let stored = self.runs.insert_run(run).await?;
        info!(
            employee_id = %stored.employee_id,
            run_id = %stored.id,
            gross_pay = %stored.gross_pay,
            net_pay = %stored.net_pay,
            "Payroll calculated"
        );
        Ok(stored)
    }

    /// Lists stored runs matching `filter`.
    pub async fn list(&self, filter: &PayrollRunFilter) -> PayrollResult<Vec<PayrollRun>> {
        self.runs.find_runs(filter).await
    }
}
