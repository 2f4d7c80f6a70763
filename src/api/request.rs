//! Request types for the payroll engine API.
//!
//! Query strings are deserialized as plain strings and validated here, so
//! that a bad value surfaces as a typed [`PayrollError`] rather than a
//! framework rejection.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{PayrollError, PayrollResult};
use crate::models::{PayPeriod, PayrollStatus, parse_year_month};
use crate::store::{BatchLogFilter, PayrollRunFilter};
use crate::submission::DisbursementRequest;

/// Body of `POST /payroll/calculate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationRequest {
    /// The employee to pay.
    pub employee_id: String,
    /// First day of the period (inclusive).
    pub pay_period_start: NaiveDate,
    /// Last day of the period (inclusive).
    pub pay_period_end: NaiveDate,
}

impl CalculationRequest {
    /// The requested period.
    pub fn pay_period(&self) -> PayPeriod {
        PayPeriod::new(self.pay_period_start, self.pay_period_end)
    }
}

/// Query of `GET /payroll`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayrollListQuery {
    /// Only runs for this employee.
    pub employee_id: Option<String>,
    /// Only runs starting on or after this date.
    pub period_start: Option<String>,
    /// Only runs ending on or before this date.
    pub period_end: Option<String>,
    /// Only runs in this status.
    pub status: Option<String>,
}

impl PayrollListQuery {
    /// Validates the query into a store filter plus optional status.
    pub fn parse(self) -> PayrollResult<(PayrollRunFilter, Option<PayrollStatus>)> {
        let status = match non_blank(self.status) {
            Some(raw) => Some(raw.parse::<PayrollStatus>().map_err(|message| {
                PayrollError::InvalidInput {
                    field: "status".to_string(),
                    message,
                }
            })?),
            None => None,
        };
        let filter = PayrollRunFilter {
            employee_id: non_blank(self.employee_id),
            period_start: parse_date("periodStart", self.period_start)?,
            period_end: parse_date("periodEnd", self.period_end)?,
        };
        Ok((filter, status))
    }
}

/// Body of `POST /integration/payroll/submit`.
///
/// Every field is optional on the wire so that an absent field is reported
/// as a missing mandatory field, the same as a blank one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitBatchRequest {
    /// Caller-chosen unique batch reference.
    #[serde(default)]
    pub batch_id: Option<String>,
    /// Pay period label.
    #[serde(default)]
    pub pay_period: Option<String>,
    /// Employees paid in this batch.
    #[serde(default)]
    pub employee_ids: Option<Vec<String>>,
    /// Sum of net pay.
    #[serde(default)]
    pub total_amount: Option<Decimal>,
}

impl TryFrom<SubmitBatchRequest> for DisbursementRequest {
    type Error = PayrollError;

    fn try_from(request: SubmitBatchRequest) -> PayrollResult<Self> {
        let total_amount = request
            .total_amount
            .ok_or_else(|| PayrollError::MandatoryFieldMissing {
                field: "totalAmount".to_string(),
            })?;
        Ok(DisbursementRequest {
            batch_id: request.batch_id.unwrap_or_default(),
            pay_period: request.pay_period.unwrap_or_default(),
            employee_ids: request.employee_ids.unwrap_or_default(),
            total_amount,
        })
    }
}

/// Query of `GET /integration/payroll/logs`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogsQuery {
    /// Filter by batch.
    pub batch_id: Option<String>,
    /// Filter by employee.
    pub employee_id: Option<String>,
    /// Zero-based page.
    pub page: Option<String>,
    /// Page size.
    pub size: Option<String>,
}

impl LogsQuery {
    /// Splits the query into a log filter and raw paging values.
    pub fn parse(self) -> PayrollResult<(BatchLogFilter, Option<u32>, Option<u32>)> {
        let page = parse_u32("page", self.page)?;
        let size = parse_u32("size", self.size)?;
        let filter = BatchLogFilter {
            batch_ref_id: self.batch_id,
            employee_id: self.employee_id,
        };
        Ok((filter, page, size))
    }
}

/// Query carrying a `period=YYYY-MM` parameter.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PeriodQuery {
    /// The month, `YYYY-MM`.
    pub period: Option<String>,
}

impl PeriodQuery {
    /// Month-end date of the requested period.
    pub fn month_end(self) -> PayrollResult<NaiveDate> {
        let raw = non_blank(self.period).ok_or_else(|| PayrollError::MandatoryFieldMissing {
            field: "period".to_string(),
        })?;
        parse_year_month(&raw)
    }
}

/// Query of `GET /payslip-ess/{employeeId}/ytd-summary`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct YearQuery {
    /// Calendar year.
    pub year: Option<String>,
}

impl YearQuery {
    /// The requested year.
    pub fn year(self) -> PayrollResult<i32> {
        let raw = non_blank(self.year).ok_or_else(|| PayrollError::MandatoryFieldMissing {
            field: "year".to_string(),
        })?;
        raw.trim()
            .parse::<i32>()
            .map_err(|_| PayrollError::InvalidInput {
                field: "year".to_string(),
                message: format!("'{}' is not a year", raw),
            })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_date(field: &str, value: Option<String>) -> PayrollResult<Option<NaiveDate>> {
    non_blank(value)
        .map(|raw| {
            NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
                PayrollError::InvalidInput {
                    field: field.to_string(),
                    message: format!("'{}' is not a date (expected YYYY-MM-DD)", raw),
                }
            })
        })
        .transpose()
}

fn parse_u32(field: &str, value: Option<String>) -> PayrollResult<Option<u32>> {
    non_blank(value)
        .map(|raw| {
            raw.trim().parse::<u32>().map_err(|_| PayrollError::InvalidInput {
                field: field.to_string(),
                message: format!("'{}' is not a non-negative integer", raw),
            })
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculation_request_uses_camel_case() {
        let request: CalculationRequest = serde_json::from_str(
            r#"{"employeeId":"emp_001","payPeriodStart":"2025-03-01","payPeriodEnd":"2025-03-31"}"#,
        )
        .unwrap();
        assert_eq!(request.employee_id, "emp_001");
        assert_eq!(request.pay_period().day_span(), 30);
    }

    #[test]
    fn test_list_query_rejects_bad_status_and_date() {
        let bad_status = PayrollListQuery {
            status: Some("PAID".to_string()),
            ..PayrollListQuery::default()
        };
        assert!(matches!(
            bad_status.parse(),
            Err(PayrollError::InvalidInput { ref field, .. }) if field == "status"
        ));

        let bad_date = PayrollListQuery {
            period_start: Some("03/01/2025".to_string()),
            ..PayrollListQuery::default()
        };
        assert!(matches!(
            bad_date.parse(),
            Err(PayrollError::InvalidInput { ref field, .. }) if field == "periodStart"
        ));
    }

    #[test]
    fn test_submit_request_without_total_is_missing_field() {
        let request: SubmitBatchRequest =
            serde_json::from_str(r#"{"batchId":"B1","payPeriod":"2025-03","employeeIds":["e"]}"#)
                .unwrap();
        let err = DisbursementRequest::try_from(request).unwrap_err();
        assert!(matches!(err, PayrollError::MandatoryFieldMissing { ref field } if field == "totalAmount"));
    }

    #[test]
    fn test_period_query() {
        let missing = PeriodQuery { period: None };
        assert!(matches!(
            missing.month_end(),
            Err(PayrollError::MandatoryFieldMissing { .. })
        ));
        let feb = PeriodQuery {
            period: Some("2024-02".to_string()),
        };
        assert_eq!(
            feb.month_end().unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
    }

    #[test]
    fn test_year_query_rejects_garbage() {
        let query = YearQuery {
            year: Some("twenty".to_string()),
        };
        assert!(matches!(query.year(), Err(PayrollError::InvalidInput { .. })));
    }
}
