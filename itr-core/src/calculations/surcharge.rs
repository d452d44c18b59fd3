//! Health-and-education cess and the income-banded surcharge.
//!
//! Cess is a flat 4% of slab tax. The surcharge rate is chosen from the
//! taxable income (not from the tax) and multiplies the slab tax. No
//! marginal relief is applied at the band edges.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::calculations::common::apply_rate;

pub const CESS_RATE: Decimal = dec!(0.04);

/// Upper bound of a band (inclusive) and its rate. `None` is open-ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurchargeBand {
    pub max_income: Option<Decimal>,
    pub rate: Decimal,
}

pub const SURCHARGE_BANDS: &[SurchargeBand] = &[
    SurchargeBand {
        max_income: Some(dec!(5000000)),
        rate: dec!(0),
    },
    SurchargeBand {
        max_income: Some(dec!(10000000)),
        rate: dec!(0.10),
    },
    SurchargeBand {
        max_income: Some(dec!(20000000)),
        rate: dec!(0.15),
    },
    SurchargeBand {
        max_income: Some(dec!(50000000)),
        rate: dec!(0.25),
    },
    SurchargeBand {
        max_income: None,
        rate: dec!(0.37),
    },
];

pub fn cess(slab_tax: Decimal) -> Decimal {
    apply_rate(slab_tax, CESS_RATE)
}

/// Rate of the first band whose upper bound is at or above `taxable_income`.
pub fn surcharge_rate(taxable_income: Decimal) -> Decimal {
    SURCHARGE_BANDS
        .iter()
        .find(|band| band.max_income.is_none_or(|max| taxable_income <= max))
        .map_or(Decimal::ZERO, |band| band.rate)
}

pub fn surcharge(
    slab_tax: Decimal,
    taxable_income: Decimal,
) -> Decimal {
    apply_rate(slab_tax, surcharge_rate(taxable_income))
}
