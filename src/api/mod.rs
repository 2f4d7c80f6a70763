//! HTTP API module for the payroll engine.
//!
//! This module provides the REST endpoints for payroll calculation, batch
//! integration, and employee self-service payslips.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    CalculationRequest, LogsQuery, PayrollListQuery, PeriodQuery, SubmitBatchRequest, YearQuery,
};
pub use response::{ApiError, ApiErrorResponse, HealthResponse, PayrollRunResponse, status_for};
pub use state::AppState;
