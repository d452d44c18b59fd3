mod deduction_section;
mod income_category;
mod regime_tax_result;
mod tax_bracket;
mod tax_regime;

pub use deduction_section::DeductionSection;
pub use income_category::{IncomeCategory, IncomeCategoryTotal};
pub use regime_tax_result::RegimeTaxResult;
pub use tax_bracket::TaxBracket;
pub use tax_regime::TaxRegime;
