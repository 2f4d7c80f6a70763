//! Net pay calculation.
//!
//! Tax, benefit and deduction are each a flat percentage of gross pay. Every
//! component is rounded half-up to two decimals on its own because each is
//! stored and displayed separately; net pay is then rounded again.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::models::PayGroup;

/// Rounds half-up (away from zero) to exactly two decimal places.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::round2;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round2(Decimal::from_str("2.345").unwrap()).to_string(), "2.35");
/// assert_eq!(round2(Decimal::from_str("7").unwrap()).to_string(), "7.00");
/// ```
pub fn round2(amount: Decimal) -> Decimal {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}

/// Returns `rate` percent of `amount`, rounded to two decimals.
///
/// A missing rate counts as zero.
pub fn percent_of(rate: Option<Decimal>, amount: Decimal) -> Decimal {
    match rate {
        Some(rate) => round2(amount * rate / Decimal::ONE_HUNDRED),
        None => round2(Decimal::ZERO),
    }
}

/// The components of a net pay calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetPayBreakdown {
    /// Gross pay, rounded to two decimals.
    pub gross_pay: Decimal,
    /// Tax withheld.
    pub tax: Decimal,
    /// Benefit added.
    pub benefit: Decimal,
    /// Other deductions withheld.
    pub deduction: Decimal,
    /// gross - tax - deduction + benefit.
    pub net_pay: Decimal,
}

/// Calculates net pay for `gross_pay` under the rates of `pay_group`.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_net_pay;
/// use payroll_engine::models::{PayGroup, PaymentCycle};
/// use rust_decimal::Decimal;
///
/// let group = PayGroup {
///     id: "pg_monthly".to_string(),
///     name: "Monthly staff".to_string(),
///     payment_cycle: PaymentCycle::Monthly,
///     base_tax_rate: Some(Decimal::new(1000, 2)),
///     benefit_rate: Some(Decimal::new(500, 2)),
///     deduction_rate: Some(Decimal::new(200, 2)),
/// };
///
/// let breakdown = calculate_net_pay(Decimal::new(500000, 2), &group);
/// assert_eq!(breakdown.tax, Decimal::new(50000, 2));
/// assert_eq!(breakdown.benefit, Decimal::new(25000, 2));
/// assert_eq!(breakdown.deduction, Decimal::new(10000, 2));
/// assert_eq!(breakdown.net_pay, Decimal::new(465000, 2));
/// ```
pub fn calculate_net_pay(gross_pay: Decimal, pay_group: &PayGroup) -> NetPayBreakdown {
    let tax = percent_of(pay_group.base_tax_rate, gross_pay);
    let benefit = percent_of(pay_group.benefit_rate, gross_pay);
    let deduction = percent_of(pay_group.deduction_rate, gross_pay);
    let net_pay = round2(gross_pay - tax - deduction + benefit);

    NetPayBreakdown {
        gross_pay: round2(gross_pay),
        tax,
        benefit,
        deduction,
        net_pay,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PaymentCycle;
    use proptest::prelude::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn group(tax: Option<&str>, benefit: Option<&str>, deduction: Option<&str>) -> PayGroup {
        PayGroup {
            id: "pg_test".to_string(),
            name: "Test".to_string(),
            payment_cycle: PaymentCycle::Monthly,
            base_tax_rate: tax.map(dec),
            benefit_rate: benefit.map(dec),
            deduction_rate: deduction.map(dec),
        }
    }

    #[test]
    fn test_standard_rates() {
        let result = calculate_net_pay(dec("5000.00"), &group(Some("10"), Some("5"), Some("2")));
        assert_eq!(result.tax, dec("500.00"));
        assert_eq!(result.benefit, dec("250.00"));
        assert_eq!(result.deduction, dec("100.00"));
        assert_eq!(result.net_pay, dec("4650.00"));
        assert_eq!(result.net_pay.to_string(), "4650.00");
    }

    #[test]
    fn test_zero_gross_yields_zero_net() {
        let result = calculate_net_pay(dec("0"), &group(Some("33.33"), Some("7"), Some("2.5")));
        assert_eq!(result.net_pay, Decimal::ZERO);
        assert_eq!(result.net_pay.to_string(), "0.00");
    }

    #[test]
    fn test_missing_rates_count_as_zero() {
        let result = calculate_net_pay(dec("1234.567"), &group(None, None, None));
        assert_eq!(result.tax, Decimal::ZERO);
        assert_eq!(result.benefit, Decimal::ZERO);
        assert_eq!(result.deduction, Decimal::ZERO);
        assert_eq!(result.net_pay, dec("1234.57"));
    }

    #[test]
    fn test_full_tax_yields_zero_net() {
        let result = calculate_net_pay(dec("8000"), &group(Some("100"), Some("0"), Some("0")));
        assert_eq!(result.tax, dec("8000.00"));
        assert_eq!(result.net_pay, dec("0.00"));
    }

    #[test]
    fn test_benefit_exceeding_tax_raises_net_above_gross() {
        let result = calculate_net_pay(dec("10000"), &group(Some("5"), Some("10"), Some("0")));
        assert_eq!(result.net_pay, dec("10500.00"));
    }

    #[test]
    fn test_components_rounded_independently() {
        // 333.33 * 10% = 33.333 -> 33.33, 333.33 * 5% = 16.6665 -> 16.67
        let result = calculate_net_pay(dec("333.33"), &group(Some("10"), Some("5"), None));
        assert_eq!(result.tax, dec("33.33"));
        assert_eq!(result.benefit, dec("16.67"));
        assert_eq!(result.net_pay, dec("316.67"));
    }

    #[test]
    fn test_round2_half_up_on_midpoint() {
        assert_eq!(round2(dec("0.125")), dec("0.13"));
        assert_eq!(round2(dec("0.124")), dec("0.12"));
        assert_eq!(round2(dec("-0.125")), dec("-0.13"));
    }

    #[test]
    fn test_percent_of_none_is_zero() {
        assert_eq!(percent_of(None, dec("999.99")), Decimal::ZERO);
    }

    proptest! {
        #[test]
        fn prop_every_component_has_scale_two(
            gross_cents in 0i64..100_000_000,
            tax in 0u32..10_000,
            benefit in 0u32..10_000,
            deduction in 0u32..10_000,
        ) {
            let group = PayGroup {
                id: "pg".to_string(),
                name: String::new(),
                payment_cycle: PaymentCycle::Weekly,
                base_tax_rate: Some(Decimal::new(tax as i64, 2)),
                benefit_rate: Some(Decimal::new(benefit as i64, 2)),
                deduction_rate: Some(Decimal::new(deduction as i64, 2)),
            };
            let result = calculate_net_pay(Decimal::new(gross_cents, 2), &group);
            prop_assert_eq!(result.tax.scale(), 2);
            prop_assert_eq!(result.benefit.scale(), 2);
            prop_assert_eq!(result.deduction.scale(), 2);
            prop_assert_eq!(result.net_pay.scale(), 2);
            prop_assert_eq!(
                result.net_pay,
                result.gross_pay - result.tax - result.deduction + result.benefit
            );
        }

        #[test]
        fn prop_zero_rates_keep_net_equal_to_gross(gross_cents in 0i64..100_000_000) {
            let gross = Decimal::new(gross_cents, 2);
            let result = calculate_net_pay(gross, &group(Some("0"), Some("0"), Some("0")));
            prop_assert_eq!(result.net_pay, gross);
        }
    }
}
