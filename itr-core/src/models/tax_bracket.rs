use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One progressive slab: income above `min_income` (and up to `max_income`)
/// is taxed at `tax_rate` on top of `base_tax`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub min_income: Decimal,
    pub max_income: Option<Decimal>,
    pub tax_rate: Decimal,
    pub base_tax: Decimal,
}
