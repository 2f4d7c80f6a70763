//! Error types for the payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while calculating payroll,
//! submitting batches, and building payslips.

use thiserror::Error;

/// Coarse classification of a [`PayrollError`].
///
/// The HTTP boundary translates errors by kind, so core logic never needs
/// to know about status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A referenced entity does not exist.
    NotFound,
    /// A write collided with an existing record.
    Conflict,
    /// Caller supplied malformed or rule-violating input.
    InvalidInput,
    /// The referenced entity exists but is not active.
    InactiveEntity,
    /// An external collaborator failed; state was left unchanged.
    TransientExternal,
    /// Anything else.
    Unexpected,
}

/// The main error type for the payroll engine.
///
/// # Example
///
/// ```
/// use payroll_engine::error::{ErrorKind, PayrollError};
///
/// let error = PayrollError::EmployeeNotFound {
///     employee_id: "emp_404".to_string(),
/// };
/// assert_eq!(error.to_string(), "Employee not found: emp_404");
/// assert_eq!(error.kind(), ErrorKind::NotFound);
/// ```
#[derive(Debug, Error)]
pub enum PayrollError {
    /// No employee exists with the given id.
    #[error("Employee not found: {employee_id}")]
    EmployeeNotFound {
        /// The employee id that was not found.
        employee_id: String,
    },

    /// The employee exists but is not ACTIVE.
    #[error("Employee '{employee_id}' is not active (status: {status})")]
    EmployeeInactive {
        /// The employee id.
        employee_id: String,
        /// The employee's current status.
        status: String,
    },

    /// No pay group exists with the given id.
    #[error("Pay group not found: {pay_group_id}")]
    PayGroupNotFound {
        /// The pay group id that was not found.
        pay_group_id: String,
    },

    /// The pay period does not satisfy the pay group's cycle rules.
    #[error("Invalid pay period: {message}")]
    InvalidPayPeriod {
        /// The rule that was violated.
        message: String,
    },

    /// No payroll run exists yet for the requested employee and month.
    #[error("Payroll not processed yet for employee '{employee_id}' in period {period}")]
    PayrollNotReady {
        /// The employee id.
        employee_id: String,
        /// The requested period (YYYY-MM).
        period: String,
    },

    /// No batch exists with the given reference id.
    #[error("Batch not found: {batch_id}")]
    BatchNotFound {
        /// The batch reference id.
        batch_id: String,
    },

    /// No payslip has been generated for the employee and period.
    #[error("Payslip not found for employee '{employee_id}' in period {period}")]
    PayslipNotFound {
        /// The employee id.
        employee_id: String,
        /// The requested period (YYYY-MM).
        period: String,
    },

    /// A batch with this reference id was already submitted.
    #[error("Batch '{batch_id}' has already been submitted")]
    DuplicateBatch {
        /// The duplicated batch reference id.
        batch_id: String,
    },

    /// A request omitted a field that is required.
    #[error("Mandatory field missing: {field}")]
    MandatoryFieldMissing {
        /// Name of the missing field.
        field: String,
    },

    /// A request field was malformed.
    #[error("Invalid value for '{field}': {message}")]
    InvalidInput {
        /// Name of the offending field.
        field: String,
        /// What was wrong with it.
        message: String,
    },

    /// A store-enforced uniqueness constraint rejected an insert.
    #[error("Unique constraint violated for {entity} '{key}'")]
    UniqueViolation {
        /// The entity kind (e.g. "payslip").
        entity: String,
        /// The conflicting natural key.
        key: String,
    },

    /// The disbursement collaborator could not be reached or timed out.
    #[error("Disbursement call failed: {message}")]
    TransientExternal {
        /// A description of the transport failure.
        message: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Generic fallback.
    #[error("Unexpected error: {message}")]
    Unexpected {
        /// A description of the failure.
        message: String,
    },
}

impl PayrollError {
    /// Returns the taxonomy bucket this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            PayrollError::EmployeeNotFound { .. }
            | PayrollError::PayGroupNotFound { .. }
            | PayrollError::BatchNotFound { .. }
            | PayrollError::PayslipNotFound { .. }
            | PayrollError::PayrollNotReady { .. } => ErrorKind::NotFound,
            PayrollError::DuplicateBatch { .. } | PayrollError::UniqueViolation { .. } => {
                ErrorKind::Conflict
            }
            PayrollError::InvalidPayPeriod { .. }
            | PayrollError::MandatoryFieldMissing { .. }
            | PayrollError::InvalidInput { .. } => ErrorKind::InvalidInput,
            PayrollError::EmployeeInactive { .. } => ErrorKind::InactiveEntity,
            PayrollError::TransientExternal { .. } => ErrorKind::TransientExternal,
            PayrollError::ConfigNotFound { .. }
            | PayrollError::ConfigParseError { .. }
            | PayrollError::Unexpected { .. } => ErrorKind::Unexpected,
        }
    }
}

/// A type alias for Results that return PayrollError.
pub type PayrollResult<T> = Result<T, PayrollError>;
