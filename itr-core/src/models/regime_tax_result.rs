use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::TaxRegime;

/// Every intermediate figure of one regime's computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegimeTaxResult {
    pub regime: TaxRegime,
    pub gross_total_income: Decimal,

    /// Deduction actually subtracted (capped for the new regime).
    pub deduction_applied: Decimal,
    pub taxable_income: Decimal,

    pub slab_tax: Decimal,
    pub cess: Decimal,
    pub surcharge_rate: Decimal,
    pub surcharge: Decimal,
    pub final_tax: Decimal,
}
