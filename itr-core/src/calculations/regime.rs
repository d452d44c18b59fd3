//! Per-regime computation: deduction, taxable income, slab tax, cess,
//! surcharge and final liability.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use itr_core::TaxRegime;
//! use itr_core::calculations::RegimeCalculator;
//!
//! let result = RegimeCalculator::new(TaxRegime::Old).calculate(dec!(1460000), dec!(150000));
//!
//! assert_eq!(result.taxable_income, dec!(1310000));
//! assert_eq!(result.slab_tax, dec!(205500));
//! assert_eq!(result.final_tax, dec!(213720));
//! ```

use rust_decimal::Decimal;

use crate::calculations::common::{non_negative, round_half_up};
use crate::calculations::slabs::slab_tax;
use crate::calculations::surcharge::{cess, surcharge, surcharge_rate};
use crate::{RegimeTaxResult, TaxRegime};

/// Calculator bound to one regime's slabs and deduction rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegimeCalculator {
    regime: TaxRegime,
}

impl RegimeCalculator {
    pub fn new(regime: TaxRegime) -> Self {
        Self { regime }
    }

    pub fn regime(&self) -> TaxRegime {
        self.regime
    }

    /// Runs the full pipeline for one regime.
    ///
    /// Negative inputs are treated as zero.
    pub fn calculate(
        &self,
        gross_total_income: Decimal,
        deduction_total: Decimal,
    ) -> RegimeTaxResult {
        let gross_total_income = non_negative(gross_total_income);
        let deduction_applied = self.applicable_deduction(deduction_total);
        let taxable_income = self.taxable_income(gross_total_income, deduction_total);

        let slab_tax = round_half_up(slab_tax(self.regime.brackets(), taxable_income));
        let cess = cess(slab_tax);
        let surcharge_rate = surcharge_rate(taxable_income);
        let surcharge = surcharge(slab_tax, taxable_income);
        let final_tax = round_half_up(slab_tax + cess + surcharge);

        tracing::debug!(
            regime = self.regime.as_str(),
            %taxable_income,
            %slab_tax,
            %final_tax,
            "regime calculated"
        );

        RegimeTaxResult {
            regime: self.regime,
            gross_total_income,
            deduction_applied,
            taxable_income,
            slab_tax,
            cess,
            surcharge_rate,
            surcharge,
            final_tax,
        }
    }

    /// The portion of the deduction total this regime honours.
    pub fn applicable_deduction(
        &self,
        deduction_total: Decimal,
    ) -> Decimal {
        let deduction_total = non_negative(deduction_total);
        match self.regime.deduction_cap() {
            Some(cap) => deduction_total.min(cap),
            None => deduction_total,
        }
    }

    /// `max(0, GTI - applicable deduction)`.
    pub fn taxable_income(
        &self,
        gross_total_income: Decimal,
        deduction_total: Decimal,
    ) -> Decimal {
        non_negative(
            non_negative(gross_total_income) - self.applicable_deduction(deduction_total),
        )
    }
}

pub fn old_regime_taxable_income(
    gross_total_income: Decimal,
    deduction_total: Decimal,
) -> Decimal {
    RegimeCalculator::new(TaxRegime::Old).taxable_income(gross_total_income, deduction_total)
}

pub fn new_regime_taxable_income(
    gross_total_income: Decimal,
    deduction_total: Decimal,
) -> Decimal {
    RegimeCalculator::new(TaxRegime::New).taxable_income(gross_total_income, deduction_total)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // deductions
    // =========================================================================

    #[test]
    fn old_regime_applies_full_deduction() {
        let calc = RegimeCalculator::new(TaxRegime::Old);

        assert_eq!(calc.applicable_deduction(dec!(250000)), dec!(250000));
    }

    #[test]
    fn new_regime_caps_deduction() {
        let calc = RegimeCalculator::new(TaxRegime::New);

        assert_eq!(calc.applicable_deduction(dec!(250000)), dec!(75000));
        assert_eq!(calc.applicable_deduction(dec!(40000)), dec!(40000));
    }

    #[test]
    fn negative_deduction_is_ignored() {
        let calc = RegimeCalculator::new(TaxRegime::Old);

        assert_eq!(calc.taxable_income(dec!(500000), dec!(-20000)), dec!(500000));
    }

    // =========================================================================
    // taxable income
    // =========================================================================

    #[test]
    fn taxable_income_never_negative() {
        for deduction in [dec!(0), dec!(75000), dec!(1000000), dec!(99999999)] {
            assert!(old_regime_taxable_income(dec!(50000), deduction) >= Decimal::ZERO);
            assert!(new_regime_taxable_income(dec!(50000), deduction) >= Decimal::ZERO);
        }
        assert_eq!(old_regime_taxable_income(dec!(50000), dec!(200000)), dec!(0));
    }

    #[test]
    fn taxable_income_never_exceeds_gti() {
        let gti = dec!(830000);
        for deduction in [dec!(0), dec!(10), dec!(80000)] {
            assert!(old_regime_taxable_income(gti, deduction) <= gti);
            assert!(new_regime_taxable_income(gti, deduction) <= gti);
        }
    }

    #[test]
    fn new_taxable_at_least_old_taxable_above_cap() {
        let gtis = [dec!(0), dec!(90000), dec!(600000), dec!(2500000)];
        let deductions = [dec!(75001), dec!(150000), dec!(400000)];

        for gti in gtis {
            for deduction in deductions {
                assert!(
                    new_regime_taxable_income(gti, deduction)
                        >= old_regime_taxable_income(gti, deduction),
                    "gti {gti}, deduction {deduction}"
                );
            }
        }
    }

    // =========================================================================
    // calculate
    // =========================================================================

    #[test]
    fn calculate_old_regime_worked_example() {
        let result = RegimeCalculator::new(TaxRegime::Old).calculate(dec!(1460000), dec!(150000));

        assert_eq!(result.regime, TaxRegime::Old);
        assert_eq!(result.gross_total_income, dec!(1460000));
        assert_eq!(result.deduction_applied, dec!(150000));
        assert_eq!(result.taxable_income, dec!(1310000));
        assert_eq!(result.slab_tax, dec!(205500));
        assert_eq!(result.cess, dec!(8220));
        assert_eq!(result.surcharge, dec!(0));
        assert_eq!(result.final_tax, dec!(213720));
    }

    #[test]
    fn calculate_new_regime_worked_example() {
        let result = RegimeCalculator::new(TaxRegime::New).calculate(dec!(1460000), dec!(150000));

        assert_eq!(result.deduction_applied, dec!(75000));
        assert_eq!(result.taxable_income, dec!(1385000));
        assert_eq!(result.slab_tax, dec!(117000));
        assert_eq!(result.cess, dec!(4680));
        assert_eq!(result.surcharge, dec!(0));
        assert_eq!(result.final_tax, dec!(121680));
    }

    #[test]
    fn calculate_applies_surcharge_above_fifty_lakh() {
        let result = RegimeCalculator::new(TaxRegime::New).calculate(dec!(6075000), dec!(75000));

        // taxable 60,00,000: 1,40,000 + 30% of 45,00,000 = 14,90,000
        assert_eq!(result.taxable_income, dec!(6000000));
        assert_eq!(result.slab_tax, dec!(1490000));
        assert_eq!(result.surcharge_rate, dec!(0.10));
        assert_eq!(result.surcharge, dec!(149000));
        assert_eq!(result.cess, dec!(59600));
        assert_eq!(result.final_tax, dec!(1698600));
    }

    #[test]
    fn calculate_zero_income() {
        let result = RegimeCalculator::new(TaxRegime::Old).calculate(dec!(0), dec!(0));

        assert_eq!(result.taxable_income, dec!(0));
        assert_eq!(result.final_tax, dec!(0));
    }
}
