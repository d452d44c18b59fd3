//! Side-by-side evaluation of both regimes.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::regime::RegimeCalculator;
use crate::{RegimeTaxResult, TaxRegime};

/// Both regimes evaluated against the same GTI and deduction total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegimeComparison {
    pub old: RegimeTaxResult,
    pub new: RegimeTaxResult,
    pub recommended: TaxRegime,
}

impl RegimeComparison {
    /// The old regime is recommended only when strictly cheaper; an exact tie
    /// goes to the new regime.
    pub fn compare(
        gross_total_income: Decimal,
        deduction_total: Decimal,
    ) -> Self {
        let old = RegimeCalculator::new(TaxRegime::Old).calculate(gross_total_income, deduction_total);
        let new = RegimeCalculator::new(TaxRegime::New).calculate(gross_total_income, deduction_total);

        let recommended = if old.final_tax < new.final_tax {
            TaxRegime::Old
        } else {
            TaxRegime::New
        };

        Self {
            old,
            new,
            recommended,
        }
    }

    pub fn result_for(
        &self,
        regime: TaxRegime,
    ) -> &RegimeTaxResult {
        match regime {
            TaxRegime::Old => &self.old,
            TaxRegime::New => &self.new,
        }
    }

    /// How much the recommended regime saves over the other one.
    pub fn savings(&self) -> Decimal {
        (self.old.final_tax - self.new.final_tax).abs()
    }
}
