//! Year-to-date folding of payslips.
//!
//! Totals use plain decimal addition; payslip amounts are already rounded
//! and are not rounded again.

use rust_decimal::Decimal;

use crate::models::{MonthlyBreakdown, Payslip, YtdSummary, YtdTotals, month_label};

/// Folds a year of payslips into a [`YtdSummary`].
///
/// Payslips are expected in period order. The monthly breakdown holds one
/// entry per distinct month; if two payslips share a month the later one
/// replaces the earlier entry. Totals always include every payslip passed in.
///
/// An empty slice produces an all-zero summary.
pub fn summarize_year(employee_id: &str, year: i32, payslips: &[Payslip]) -> YtdSummary {
    let mut summary = YtdSummary::empty(employee_id, year);

    for payslip in payslips {
        let deductions: Decimal = payslip.deductions.values().copied().sum();
        let month = month_label(payslip.pay_period);

        summary.monthly_breakdown.insert(
            month.clone(),
            MonthlyBreakdown {
                month,
                gross_pay: payslip.gross_pay,
                net_pay: payslip.net_pay,
                deductions,
                benefits: payslip.benefits,
            },
        );

        accumulate(&mut summary.totals, payslip, deductions);
    }

    summary
}

fn accumulate(totals: &mut YtdTotals, payslip: &Payslip, deductions: Decimal) {
    totals.total_gross += payslip.gross_pay;
    totals.total_net += payslip.net_pay;
    totals.total_deductions += deductions;
    totals.total_benefits += payslip.benefits;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::collections::BTreeMap;
    use std::str::FromStr;
    use uuid::Uuid;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn payslip(month: u32, gross: &str, net: &str, tax: &str, benefits: &str) -> Payslip {
        let pay_period = crate::models::last_day_of_month(
            NaiveDate::from_ymd_opt(2025, month, 1).unwrap(),
        );
        let mut deductions = BTreeMap::new();
        deductions.insert("Tax".to_string(), dec(tax));
        Payslip {
            id: Uuid::new_v4(),
            employee_id: "emp_001".to_string(),
            payroll_id: Uuid::new_v4(),
            pay_period,
            gross_pay: dec(gross),
            net_pay: dec(net),
            benefits: dec(benefits),
            earnings: BTreeMap::new(),
            deductions,
            file_path: String::new(),
        }
    }

    #[test]
    fn test_no_payslips_gives_zero_summary() {
        let summary = summarize_year("emp_001", 2025, &[]);
        assert_eq!(summary, YtdSummary::empty("emp_001", 2025));
    }

    #[test]
    fn test_totals_sum_all_months() {
        let slips = vec![
            payslip(1, "5000.00", "4650.00", "500.00", "250.00"),
            payslip(2, "5000.00", "4650.00", "500.00", "250.00"),
            payslip(3, "5200.10", "4835.59", "520.01", "260.01"),
        ];
        let summary = summarize_year("emp_001", 2025, &slips);

        assert_eq!(summary.monthly_breakdown.len(), 3);
        assert_eq!(summary.totals.total_gross, dec("15200.10"));
        assert_eq!(summary.totals.total_net, dec("14135.59"));
        assert_eq!(summary.totals.total_deductions, dec("1520.01"));
        assert_eq!(summary.totals.total_benefits, dec("760.01"));
        assert_eq!(summary.monthly_breakdown["2025-03"].deductions, dec("520.01"));
    }

    #[test]
    fn test_flattens_every_deduction_line() {
        let mut slip = payslip(4, "1000.00", "850.00", "100.00", "0.00");
        slip.deductions.insert("Pension".to_string(), dec("50.00"));
        let summary = summarize_year("emp_001", 2025, &[slip]);
        assert_eq!(summary.totals.total_deductions, dec("150.00"));
        assert_eq!(summary.monthly_breakdown["2025-04"].deductions, dec("150.00"));
    }

    #[test]
    fn test_duplicate_month_collapses_breakdown_but_counts_in_totals() {
        let slips = vec![
            payslip(5, "1000.00", "900.00", "100.00", "0.00"),
            payslip(5, "2000.00", "1800.00", "200.00", "0.00"),
        ];
        let summary = summarize_year("emp_001", 2025, &slips);

        assert_eq!(summary.monthly_breakdown.len(), 1);
        assert_eq!(summary.monthly_breakdown["2025-05"].gross_pay, dec("2000.00"));
        assert_eq!(summary.totals.total_gross, dec("3000.00"));
    }

    #[test]
    fn test_totals_keep_input_precision() {
        let slips = vec![
            payslip(6, "0.01", "0.01", "0.00", "0.00"),
            payslip(7, "0.02", "0.02", "0.00", "0.00"),
        ];
        let summary = summarize_year("emp_001", 2025, &slips);
        assert_eq!(summary.totals.total_gross.to_string(), "0.03");
    }
}
