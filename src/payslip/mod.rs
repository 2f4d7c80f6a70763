//! Payslip generation and year-to-date summaries.
//!
//! Both read paths only serve employees that exist and are ACTIVE; anyone
//! else is reported as not found.

mod builder;
mod ytd;

pub use builder::{BASIC_SALARY_LINE, BENEFITS_LINE, PayslipBuilder, TAX_LINE};
pub use ytd::YtdAggregator;

use crate::error::{PayrollError, PayrollResult};
use crate::models::Employee;
use crate::payroll::require_active_employee;
use crate::store::EmployeeDirectory;

async fn require_listed_employee(
    directory: &dyn EmployeeDirectory,
    employee_id: &str,
) -> PayrollResult<Employee> {
    match require_active_employee(directory, employee_id).await {
        Err(PayrollError::EmployeeInactive { employee_id, .. }) => {
            Err(PayrollError::EmployeeNotFound { employee_id })
        }
        other => other,
    }
}
