//! Response types for the payroll engine API.
//!
//! Every handler error goes through [`ApiErrorResponse`], and every
//! [`PayrollError`] is translated in exactly one place: the `From` impl
//! below.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ErrorKind, PayrollError};
use crate::models::{PayrollRun, PayrollStatus};

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }

    /// Creates a malformed query string error response.
    pub fn malformed_query(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_QUERY", message)
    }
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A 400 with the given body.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

/// HTTP status for each error kind.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Conflict => StatusCode::CONFLICT,
        ErrorKind::InvalidInput => StatusCode::BAD_REQUEST,
        ErrorKind::InactiveEntity => StatusCode::CONFLICT,
        ErrorKind::TransientExternal => StatusCode::BAD_GATEWAY,
        ErrorKind::Unexpected => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<PayrollError> for ApiErrorResponse {
    fn from(error: PayrollError) -> Self {
        let status = status_for(error.kind());
        let message = error.to_string();
        let error = match error {
            PayrollError::EmployeeNotFound { .. } => ApiError::new("EMPLOYEE_NOT_FOUND", message),
            PayrollError::EmployeeInactive { .. } => ApiError::new("EMPLOYEE_INACTIVE", message),
            PayrollError::PayGroupNotFound { .. } => {
                ApiError::new("PAY_GROUP_NOT_FOUND", message)
            }
            PayrollError::InvalidPayPeriod { .. } => {
                ApiError::new("INVALID_PAY_PERIOD", message)
            }
            PayrollError::PayrollNotReady { .. } => ApiError::with_details(
                "PAYROLL_NOT_READY",
                message,
                "Calculate payroll for this period before generating a payslip",
            ),
            PayrollError::BatchNotFound { .. } => ApiError::new("BATCH_NOT_FOUND", message),
            PayrollError::PayslipNotFound { .. } => ApiError::new("PAYSLIP_NOT_FOUND", message),
            PayrollError::DuplicateBatch { .. } => ApiError::new("DUPLICATE_BATCH", message),
            PayrollError::MandatoryFieldMissing { .. } => {
                ApiError::new("MANDATORY_FIELD_MISSING", message)
            }
            PayrollError::InvalidInput { .. } => ApiError::new("INVALID_INPUT", message),
            PayrollError::UniqueViolation { .. } => ApiError::new("CONFLICT", message),
            PayrollError::TransientExternal { .. } => ApiError::with_details(
                "DISBURSEMENT_UNAVAILABLE",
                message,
                "No payroll runs were changed; the batch will be retried",
            ),
            PayrollError::ConfigNotFound { .. } | PayrollError::ConfigParseError { .. } => {
                ApiError::with_details("CONFIG_ERROR", "Configuration error", message)
            }
            PayrollError::Unexpected { .. } => {
                ApiError::with_details("INTERNAL_ERROR", "Unexpected error", message)
            }
        };
        ApiErrorResponse { status, error }
    }
}

/// One calculated payroll run as returned by the payroll endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayrollRunResponse {
    /// Run identifier.
    pub payroll_id: Uuid,
    /// The employee.
    pub employee_id: String,
    /// The employee's pay group.
    pub pay_group_id: String,
    /// First day of the period.
    pub pay_period_start: NaiveDate,
    /// Last day of the period.
    pub pay_period_end: NaiveDate,
    /// Gross pay.
    pub gross_pay: Decimal,
    /// Net pay.
    pub net_pay: Decimal,
    /// Tax withheld.
    pub tax_amount: Decimal,
    /// Benefit added.
    pub benefits_amount: Decimal,
    /// Other deductions withheld.
    pub deduction_amount: Decimal,
    /// Submission status.
    pub status: PayrollStatus,
}

impl From<PayrollRun> for PayrollRunResponse {
    fn from(run: PayrollRun) -> Self {
        Self {
            payroll_id: run.id,
            employee_id: run.employee_id,
            pay_group_id: run.pay_group_id,
            pay_period_start: run.pay_period_start,
            pay_period_end: run.pay_period_end,
            gross_pay: run.gross_pay,
            net_pay: run.net_pay,
            tax_amount: run.tax_deduction.unwrap_or(Decimal::ZERO),
            benefits_amount: run.benefit_addition.unwrap_or(Decimal::ZERO),
            deduction_amount: run.other_deduction.unwrap_or(Decimal::ZERO),
            status: run.status,
        }
    }
}

/// Body of `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `ok` while the process serves requests.
    pub status: String,
}
