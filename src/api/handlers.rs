//! HTTP request handlers for the payroll engine API.
//!
//! Every handler tags its log lines with a fresh correlation id and hands
//! errors to [`ApiErrorResponse`] for translation.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    routing::{get, post},
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::PayrollError;
use crate::models::{BatchLog, PayslipMetadata, YtdSummary};
use crate::store::Page;
use crate::submission::{BatchStatusView, DisbursementRequest, DisbursementResponse, TickReport};

use super::request::{
    CalculationRequest, LogsQuery, PayrollListQuery, PeriodQuery, SubmitBatchRequest, YearQuery,
};
use super::response::{ApiError, ApiErrorResponse, HealthResponse, PayrollRunResponse};
use super::state::AppState;

type ApiResult<T> = Result<Json<T>, ApiErrorResponse>;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/payroll", get(list_payroll_handler))
        .route("/payroll/calculate", post(calculate_handler))
        .route("/integration/payroll/submit", post(submit_batch_handler))
        .route(
            "/integration/payroll/status/:batch_id",
            get(batch_status_handler),
        )
        .route("/integration/payroll/logs", get(batch_logs_handler))
        .route("/integration/payroll/run-now", post(run_now_handler))
        .route(
            "/payslip-ess/:employee_id/payslip",
            get(get_payslip_handler),
        )
        .route(
            "/payslip-ess/:employee_id/payslip/generate",
            post(generate_payslip_handler),
        )
        .route(
            "/payslip-ess/:employee_id/ytd-summary",
            get(ytd_summary_handler),
        )
        .with_state(state)
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Handler for POST /payroll/calculate.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> ApiResult<PayrollRunResponse> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    let Json(request) = payload.map_err(|rejection| json_rejection(correlation_id, rejection))?;

    let start_time = Instant::now();
    let run = state
        .payroll()
        .calculate(&request.employee_id, request.pay_period())
        .await
        .map_err(|err| failed(correlation_id, "Calculation failed", err))?;

    info!(
        correlation_id = %correlation_id,
        employee_id = %run.employee_id,
        net_pay = %run.net_pay,
        duration_us = start_time.elapsed().as_micros(),
        "Calculation completed successfully"
    );
    Ok(Json(run.into()))
}

/// Handler for GET /payroll.
async fn list_payroll_handler(
    State(state): State<AppState>,
    query: Result<Query<PayrollListQuery>, QueryRejection>,
) -> ApiResult<Vec<PayrollRunResponse>> {
    let correlation_id = Uuid::new_v4();
    let Query(query) = query.map_err(|rejection| query_rejection(correlation_id, rejection))?;

    let (filter, status) = query
        .parse()
        .map_err(|err| failed(correlation_id, "Invalid payroll query", err))?;
    let runs = state
        .payroll()
        .list(&filter)
        .await
        .map_err(|err| failed(correlation_id, "Payroll listing failed", err))?;

    let runs: Vec<PayrollRunResponse> = runs
        .into_iter()
        .filter(|run| status.is_none_or(|s| run.status == s))
        .map(PayrollRunResponse::from)
        .collect();
    info!(correlation_id = %correlation_id, count = runs.len(), "Listed payroll runs");
    Ok(Json(runs))
}

/// Handler for POST /integration/payroll/submit.
async fn submit_batch_handler(
    State(state): State<AppState>,
    payload: Result<Json<SubmitBatchRequest>, JsonRejection>,
) -> ApiResult<DisbursementResponse> {
    let correlation_id = Uuid::new_v4();
    let Json(request) = payload.map_err(|rejection| json_rejection(correlation_id, rejection))?;

    let request = DisbursementRequest::try_from(request)
        .map_err(|err| failed(correlation_id, "Batch submission rejected", err))?;
    info!(
        correlation_id = %correlation_id,
        batch_id = %request.batch_id,
        employees = request.employee_ids.len(),
        "Receiving batch submission"
    );

    let response = state
        .integration()
        .submit(request)
        .await
        .map_err(|err| failed(correlation_id, "Batch submission rejected", err))?;
    Ok(Json(response))
}

/// Handler for GET /integration/payroll/status/{batchId}.
async fn batch_status_handler(
    State(state): State<AppState>,
    Path(batch_id): Path<String>,
) -> ApiResult<BatchStatusView> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, batch_id = %batch_id, "Batch status requested");

    let view = state
        .integration()
        .status(&batch_id)
        .await
        .map_err(|err| failed(correlation_id, "Batch status lookup failed", err))?;
    Ok(Json(view))
}

/// Handler for GET /integration/payroll/logs.
async fn batch_logs_handler(
    State(state): State<AppState>,
    query: Result<Query<LogsQuery>, QueryRejection>,
) -> ApiResult<Page<BatchLog>> {
    let correlation_id = Uuid::new_v4();
    let Query(query) = query.map_err(|rejection| query_rejection(correlation_id, rejection))?;

    let (filter, page, size) = query
        .parse()
        .map_err(|err| failed(correlation_id, "Invalid log query", err))?;
    let logs = state
        .integration()
        .logs(filter, page, size)
        .await
        .map_err(|err| failed(correlation_id, "Batch log query failed", err))?;
    info!(
        correlation_id = %correlation_id,
        returned = logs.content.len(),
        total = logs.total_elements,
        "Batch logs returned"
    );
    Ok(Json(logs))
}

/// Handler for POST /integration/payroll/run-now.
async fn run_now_handler(State(state): State<AppState>) -> ApiResult<TickReport> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Manual batch submission requested");

    let report = state
        .submitter()
        .submit_pending()
        .await
        .map_err(|err| failed(correlation_id, "Manual batch submission failed", err))?;
    info!(
        correlation_id = %correlation_id,
        selected = report.selected,
        updated = report.updated,
        "Manual batch submission finished"
    );
    Ok(Json(report))
}

/// Handler for GET /payslip-ess/{employeeId}/payslip.
async fn get_payslip_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
    query: Result<Query<PeriodQuery>, QueryRejection>,
) -> ApiResult<PayslipMetadata> {
    let correlation_id = Uuid::new_v4();
    let Query(query) = query.map_err(|rejection| query_rejection(correlation_id, rejection))?;

    let month_end = query
        .month_end()
        .map_err(|err| failed(correlation_id, "Invalid payslip period", err))?;
    let payslip = state
        .payslips()
        .get_payslip(&employee_id, month_end)
        .await
        .map_err(|err| failed(correlation_id, "Payslip lookup failed", err))?;
    Ok(Json(payslip))
}

/// Handler for POST /payslip-ess/{employeeId}/payslip/generate.
async fn generate_payslip_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
    query: Result<Query<PeriodQuery>, QueryRejection>,
) -> ApiResult<PayslipMetadata> {
    let correlation_id = Uuid::new_v4();
    let Query(query) = query.map_err(|rejection| query_rejection(correlation_id, rejection))?;

    let month_end = query
        .month_end()
        .map_err(|err| failed(correlation_id, "Invalid payslip period", err))?;
    info!(
        correlation_id = %correlation_id,
        employee_id = %employee_id,
        pay_period = %month_end,
        "Generating payslip"
    );
    let payslip = state
        .payslips()
        .build_and_upsert(&employee_id, month_end)
        .await
        .map_err(|err| failed(correlation_id, "Payslip generation failed", err))?;
    Ok(Json(payslip))
}

/// Handler for GET /payslip-ess/{employeeId}/ytd-summary.
async fn ytd_summary_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
    query: Result<Query<YearQuery>, QueryRejection>,
) -> ApiResult<YtdSummary> {
    let correlation_id = Uuid::new_v4();
    let Query(query) = query.map_err(|rejection| query_rejection(correlation_id, rejection))?;

    let year = query
        .year()
        .map_err(|err| failed(correlation_id, "Invalid YTD year", err))?;
    let summary = state
        .ytd()
        .get_ytd(&employee_id, year)
        .await
        .map_err(|err| failed(correlation_id, "YTD summary failed", err))?;
    info!(
        correlation_id = %correlation_id,
        employee_id = %employee_id,
        year,
        months = summary.monthly_breakdown.len(),
        "YTD summary returned"
    );
    Ok(Json(summary))
}

fn failed(correlation_id: Uuid, what: &str, err: PayrollError) -> ApiErrorResponse {
    warn!(correlation_id = %correlation_id, error = %err, "{}", what);
    err.into()
}

fn json_rejection(correlation_id: Uuid, rejection: JsonRejection) -> ApiErrorResponse {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::new("MANDATORY_FIELD_MISSING", body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    ApiErrorResponse::bad_request(error)
}

fn query_rejection(correlation_id: Uuid, rejection: QueryRejection) -> ApiErrorResponse {
    let body_text = rejection.body_text();
    warn!(correlation_id = %correlation_id, error = %body_text, "Query string error");
    ApiErrorResponse {
        status: StatusCode::BAD_REQUEST,
        error: ApiError::malformed_query(body_text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use crate::models::DisbursementOutcome;
    use crate::submission::FixedOutcome;
    use axum::body::Body;
    use axum::http::Request;
    use serde_json::{Value, json};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn create_test_router(outcome: DisbursementOutcome) -> Router {
        let config = ConfigLoader::load("./config/default").expect("Failed to load config");
        let state = AppState::with_outcomes(&config, Arc::new(FixedOutcome(outcome)))
            .expect("Failed to build state");
        create_router(state)
    }

    async fn send(router: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header("Content-Type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        let response = router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    #[tokio::test]
    async fn test_health() {
        let router = create_test_router(DisbursementOutcome::Success);
        let (status, body) = send(&router, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "ok"}));
    }

    #[tokio::test]
    async fn test_calculate_returns_breakdown() {
        let router = create_test_router(DisbursementOutcome::Success);
        let (status, body) = send(
            &router,
            "POST",
            "/payroll/calculate",
            Some(json!({
                "employeeId": "emp_001",
                "payPeriodStart": "2025-03-01",
                "payPeriodEnd": "2025-03-31"
            })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["payGroupId"], "pg_monthly");
        assert_eq!(body["grossPay"], "5000.00");
        assert_eq!(body["netPay"], "4650.00");
        assert_eq!(body["taxAmount"], "500.00");
        assert_eq!(body["benefitsAmount"], "250.00");
        assert_eq!(body["status"], "PROCESSED");
    }

    #[tokio::test]
    async fn test_calculate_missing_field() {
        let router = create_test_router(DisbursementOutcome::Success);
        let (status, body) = send(
            &router,
            "POST",
            "/payroll/calculate",
            Some(json!({"employeeId": "emp_001", "payPeriodStart": "2025-03-01"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "MANDATORY_FIELD_MISSING");
    }

    #[tokio::test]
    async fn test_logs_without_filter_is_bad_request() {
        let router = create_test_router(DisbursementOutcome::Success);
        let (status, body) = send(&router, "GET", "/integration/payroll/logs", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "MANDATORY_FIELD_MISSING");
    }

    #[tokio::test]
    async fn test_unknown_batch_status_is_not_found() {
        let router = create_test_router(DisbursementOutcome::Success);
        let (status, body) =
            send(&router, "GET", "/integration/payroll/status/BATCH-NOPE", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "BATCH_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_run_now_with_nothing_pending() {
        let router = create_test_router(DisbursementOutcome::Success);
        let (status, body) = send(&router, "POST", "/integration/payroll/run-now", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["selected"], 0);
        assert_eq!(body["batchId"], Value::Null);
    }
}
