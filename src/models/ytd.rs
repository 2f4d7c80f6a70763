//! Year-to-date summary models.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Per-month figures taken from one payslip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyBreakdown {
    /// Month label (`YYYY-MM`).
    pub month: String,
    /// Gross pay for the month.
    pub gross_pay: Decimal,
    /// Net pay for the month.
    pub net_pay: Decimal,
    /// Sum of the month's deduction line items.
    pub deductions: Decimal,
    /// Benefits for the month.
    pub benefits: Decimal,
}

/// Totals accumulated over every payslip loaded for the year.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YtdTotals {
    /// Sum of gross pay.
    pub total_gross: Decimal,
    /// Sum of net pay.
    pub total_net: Decimal,
    /// Sum of all deduction line items.
    pub total_deductions: Decimal,
    /// Sum of benefits.
    pub total_benefits: Decimal,
}

/// Year-to-date summary for one employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YtdSummary {
    /// The employee.
    pub employee_id: String,
    /// The calendar year.
    pub year: i32,
    /// One entry per distinct month, keyed by `YYYY-MM`.
    pub monthly_breakdown: BTreeMap<String, MonthlyBreakdown>,
    /// Year-to-date totals.
    pub totals: YtdTotals,
}

impl YtdSummary {
    /// An all-zero summary for a year with no payslips.
    pub fn empty(employee_id: impl Into<String>, year: i32) -> Self {
        YtdSummary {
            employee_id: employee_id.into(),
            year,
            monthly_breakdown: BTreeMap::new(),
            totals: YtdTotals::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_summary_is_all_zero() {
        let summary = YtdSummary::empty("emp_001", 2025);
        assert!(summary.monthly_breakdown.is_empty());
        assert_eq!(summary.totals.total_gross, Decimal::ZERO);
        assert_eq!(summary.totals.total_net, Decimal::ZERO);
        assert_eq!(summary.totals.total_deductions, Decimal::ZERO);
        assert_eq!(summary.totals.total_benefits, Decimal::ZERO);
    }
}
