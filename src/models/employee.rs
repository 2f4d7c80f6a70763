//! Employee model and related types.
//!
//! Employee master data is owned by another service; this crate only reads
//! the fields payroll needs.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Lifecycle status of an employee record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EmployeeStatus {
    /// Currently employed and payable.
    Active,
    /// Suspended or otherwise not payable.
    Inactive,
    /// Employment has ended.
    Terminated,
}

impl EmployeeStatus {
    /// Returns the wire name of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            EmployeeStatus::Active => "ACTIVE",
            EmployeeStatus::Inactive => "INACTIVE",
            EmployeeStatus::Terminated => "TERMINATED",
        }
    }
}

/// Represents an employee as seen by payroll.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Current lifecycle status.
    pub status: EmployeeStatus,
    /// The pay group the employee is paid under.
    pub pay_group_id: String,
    /// Gross pay for one pay period of the pay group's cycle.
    pub base_salary: Decimal,
}

impl Employee {
    /// Returns true if the employee can be paid.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::models::{Employee, EmployeeStatus};
    /// use rust_decimal::Decimal;
    ///
    /// let employee = Employee {
    ///     id: "emp_001".to_string(),
    ///     name: "Ada".to_string(),
    ///     status: EmployeeStatus::Active,
    ///     pay_group_id: "pg_monthly".to_string(),
    ///     base_salary: Decimal::new(500000, 2),
    /// };
    /// assert!(employee.is_active());
    /// ```
    pub fn is_active(&self) -> bool {
        self.status == EmployeeStatus::Active
    }
}
