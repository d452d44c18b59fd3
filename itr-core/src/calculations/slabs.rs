//! Progressive slab tables for both regimes and the slab-tax function.
//!
//! | Old regime            | Tax                                   |
//! |-----------------------|---------------------------------------|
//! | up to 2,50,000        | nil                                   |
//! | up to 5,00,000        | 5% over 2,50,000                      |
//! | up to 10,00,000       | 12,500 + 20% over 5,00,000            |
//! | above 10,00,000       | 1,12,500 + 30% over 10,00,000         |
//!
//! | New regime            | Tax                                   |
//! |-----------------------|---------------------------------------|
//! | up to 3,00,000        | nil                                   |
//! | up to 7,00,000        | 5% over 3,00,000                      |
//! | up to 10,00,000       | 20,000 + 10% over 7,00,000            |
//! | up to 12,00,000       | 50,000 + 15% over 10,00,000           |
//! | up to 15,00,000       | 80,000 + 20% over 12,00,000           |
//! | above 15,00,000       | 1,40,000 + 30% over 15,00,000         |

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::TaxBracket;

pub const OLD_REGIME_BRACKETS: &[TaxBracket] = &[
    TaxBracket {
        min_income: dec!(0),
        max_income: Some(dec!(250000)),
        tax_rate: dec!(0),
        base_tax: dec!(0),
    },
    TaxBracket {
        min_income: dec!(250000),
        max_income: Some(dec!(500000)),
        tax_rate: dec!(0.05),
        base_tax: dec!(0),
    },
    TaxBracket {
        min_income: dec!(500000),
        max_income: Some(dec!(1000000)),
        tax_rate: dec!(0.20),
        base_tax: dec!(12500),
    },
    TaxBracket {
        min_income: dec!(1000000),
        max_income: None,
        tax_rate: dec!(0.30),
        base_tax: dec!(112500),
    },
];

pub const NEW_REGIME_BRACKETS: &[TaxBracket] = &[
    TaxBracket {
        min_income: dec!(0),
        max_income: Some(dec!(300000)),
        tax_rate: dec!(0),
        base_tax: dec!(0),
    },
    TaxBracket {
        min_income: dec!(300000),
        max_income: Some(dec!(700000)),
        tax_rate: dec!(0.05),
        base_tax: dec!(0),
    },
    TaxBracket {
        min_income: dec!(700000),
        max_income: Some(dec!(1000000)),
        tax_rate: dec!(0.10),
        base_tax: dec!(20000),
    },
    TaxBracket {
        min_income: dec!(1000000),
        max_income: Some(dec!(1200000)),
        tax_rate: dec!(0.15),
        base_tax: dec!(50000),
    },
    TaxBracket {
        min_income: dec!(1200000),
        max_income: Some(dec!(1500000)),
        tax_rate: dec!(0.20),
        base_tax: dec!(80000),
    },
    TaxBracket {
        min_income: dec!(1500000),
        max_income: None,
        tax_rate: dec!(0.30),
        base_tax: dec!(140000),
    },
];

/// Tax on `taxable_income` under a sorted slab table.
///
/// The applicable slab is the highest one whose lower bound the income
/// exceeds, so an income sitting exactly on a boundary is taxed in the lower
/// slab. Zero, negative income, or an empty table yield zero.
pub fn slab_tax(
    brackets: &[TaxBracket],
    taxable_income: Decimal,
) -> Decimal {
    brackets
        .iter()
        .rev()
        .find(|b| taxable_income > b.min_income)
        .map(|b| b.base_tax + (taxable_income - b.min_income) * b.tax_rate)
        .unwrap_or(Decimal::ZERO)
}

/// Slab tax under the old regime.
pub fn old_regime_tax(taxable_income: Decimal) -> Decimal {
    slab_tax(OLD_REGIME_BRACKETS, taxable_income)
}

/// Slab tax under the new regime.
pub fn new_regime_tax(taxable_income: Decimal) -> Decimal {
    slab_tax(NEW_REGIME_BRACKETS, taxable_income)
}
