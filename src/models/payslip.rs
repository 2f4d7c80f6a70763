//! Payslip models.
//!
//! Payslips are derived from payroll runs and keyed by the natural key
//! (employee id, month-end date). Line-item maps use `BTreeMap` so that
//! repeated builds serialize identically.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored payslip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payslip {
    /// Store-assigned identifier, stable across updates.
    pub id: Uuid,
    /// The employee the payslip belongs to.
    pub employee_id: String,
    /// The payroll run it was derived from.
    pub payroll_id: Uuid,
    /// Month-end date of the period covered.
    pub pay_period: NaiveDate,
    /// Gross pay.
    pub gross_pay: Decimal,
    /// Net pay.
    pub net_pay: Decimal,
    /// Benefit amount (zero when the run carried none).
    pub benefits: Decimal,
    /// Earnings line items by name.
    pub earnings: BTreeMap<String, Decimal>,
    /// Deduction line items by name.
    pub deductions: BTreeMap<String, Decimal>,
    /// Where the rendered document lives.
    pub file_path: String,
}

impl Payslip {
    /// The natural key payslips are unique on.
    pub fn natural_key(&self) -> (String, NaiveDate) {
        (self.employee_id.clone(), self.pay_period)
    }

    /// Sum of all earnings line items.
    pub fn total_earnings(&self) -> Decimal {
        self.earnings.values().copied().sum()
    }

    /// Sum of all deduction line items.
    pub fn total_deductions(&self) -> Decimal {
        self.deductions.values().copied().sum()
    }
}

/// Payslip breakdown returned to callers after a build or lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayslipMetadata {
    /// Identifier of the stored payslip.
    pub payslip_id: Uuid,
    /// The employee.
    pub employee_id: String,
    /// The payroll run the payslip was derived from.
    pub payroll_id: Uuid,
    /// Month-end date of the period covered.
    pub pay_period: NaiveDate,
    /// Gross pay.
    pub gross_pay: Decimal,
    /// Net pay.
    pub net_pay: Decimal,
    /// Benefit amount.
    pub benefits: Decimal,
    /// Earnings line items.
    pub earnings: BTreeMap<String, Decimal>,
    /// Deduction line items.
    pub deductions: BTreeMap<String, Decimal>,
    /// Sum of earnings.
    pub total_earnings: Decimal,
    /// Sum of deductions.
    pub total_deductions: Decimal,
    /// Document location.
    pub file_path: String,
}

impl From<&Payslip> for PayslipMetadata {
    fn from(payslip: &Payslip) -> Self {
        PayslipMetadata {
            payslip_id: payslip.id,
            employee_id: payslip.employee_id.clone(),
            payroll_id: payslip.payroll_id,
            pay_period: payslip.pay_period,
            gross_pay: payslip.gross_pay,
            net_pay: payslip.net_pay,
            benefits: payslip.benefits,
            earnings: payslip.earnings.clone(),
            deductions: payslip.deductions.clone(),
            total_earnings: payslip.total_earnings(),
            total_deductions: payslip.total_deductions(),
            file_path: payslip.file_path.clone(),
        }
    }
}
