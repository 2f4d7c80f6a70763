//! Pay group model.
//!
//! A pay group bundles a payment cycle with the flat percentage rates used
//! to derive tax, benefits and other deductions from gross pay.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How often members of a pay group are paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentCycle {
    /// Seven-day periods.
    Weekly,
    /// Fourteen-day periods.
    Biweekly,
    /// Whole calendar months.
    Monthly,
}

impl std::fmt::Display for PaymentCycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PaymentCycle::Weekly => "WEEKLY",
            PaymentCycle::Biweekly => "BIWEEKLY",
            PaymentCycle::Monthly => "MONTHLY",
        };
        f.write_str(name)
    }
}

/// A named payment policy.
///
/// Rates are percentages with scale 2 (e.g. `10.00` means ten percent).
/// A missing rate is treated as zero by the calculator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayGroup {
    /// Unique identifier for the pay group.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// The payment cycle periods must conform to.
    pub payment_cycle: PaymentCycle,
    /// Tax percentage applied to gross pay.
    #[serde(default)]
    pub base_tax_rate: Option<Decimal>,
    /// Benefit percentage added to gross pay.
    #[serde(default)]
    pub benefit_rate: Option<Decimal>,
    /// Other deduction percentage taken from gross pay.
    #[serde(default)]
    pub deduction_rate: Option<Decimal>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_pay_group_with_missing_rates() {
        let json = r#"{
            "id": "pg_weekly",
            "payment_cycle": "WEEKLY",
            "base_tax_rate": "12.50"
        }"#;
        let group: PayGroup = serde_json::from_str(json).unwrap();
        assert_eq!(group.payment_cycle, PaymentCycle::Weekly);
        assert_eq!(group.base_tax_rate, Some(Decimal::new(1250, 2)));
        assert_eq!(group.benefit_rate, None);
        assert_eq!(group.deduction_rate, None);
    }

    #[test]
    fn test_payment_cycle_display_matches_wire_name() {
        for cycle in [
            PaymentCycle::Weekly,
            PaymentCycle::Biweekly,
            PaymentCycle::Monthly,
        ] {
            let wire = serde_json::to_string(&cycle).unwrap();
            assert_eq!(wire, format!("\"{}\"", cycle));
        }
    }
}
