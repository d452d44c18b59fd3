//! Tax computation for the old and new regimes.
//!
//! The pipeline is: Gross Total Income minus the regime's deduction gives
//! taxable income, the regime's slabs give slab tax, and the post-processor
//! adds health-and-education cess and the surcharge.

pub mod common;
pub mod comparison;
pub mod regime;
pub mod slabs;
pub mod surcharge;

pub use comparison::RegimeComparison;
pub use regime::{RegimeCalculator, new_regime_taxable_income, old_regime_taxable_income};
pub use slabs::{new_regime_tax, old_regime_tax, slab_tax};
pub use surcharge::{cess, surcharge, surcharge_rate};
