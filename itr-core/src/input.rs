//! Coercion of free-form numeric input.
//!
//! Every amount typed into a form, and every total read back from the store,
//! passes through [`coerce_amount`]: blanks and garbage become zero, negative
//! numbers are clamped to zero, and rupee symbols and digit-grouping commas
//! (either `15,00,000` or `1,500,000`) are ignored. Amounts above
//! [`MAX_AMOUNT`] are treated as garbage, which keeps every later sum inside
//! `Decimal` range.

use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Largest amount accepted from a form or the store: ₹10^15.
pub const MAX_AMOUNT: Decimal = dec!(1000000000000000);

static AMOUNT_NOISE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[₹,_\s]|(?i)^rs\.?|(?i)^inr").expect("amount noise pattern is valid")
});

fn normalize_amount_input(s: &str) -> String {
    AMOUNT_NOISE.replace_all(s.trim(), "").into_owned()
}

/// Parses `s` strictly, returning `None` for blank or unparseable input and
/// for magnitudes above [`MAX_AMOUNT`]. Sign is preserved.
pub fn parse_amount(s: &str) -> Option<Decimal> {
    let normalized = normalize_amount_input(s);
    if normalized.is_empty() {
        return None;
    }
    let value = normalized
        .parse::<Decimal>()
        .or_else(|_| Decimal::from_scientific(&normalized))
        .ok()?;
    if value.abs() > MAX_AMOUNT {
        tracing::warn!(input = %s, "amount above ceiling ignored");
        return None;
    }
    Some(value)
}

/// Parses `s` as a non-negative amount, coercing anything else to zero.
pub fn coerce_amount(s: &str) -> Decimal {
    match parse_amount(s) {
        Some(value) if value.is_sign_negative() => {
            tracing::warn!(input = %s, "negative amount clamped to zero");
            Decimal::ZERO
        }
        Some(value) => value,
        None => {
            if !s.trim().is_empty() {
                tracing::warn!(input = %s, "unparseable amount treated as zero");
            }
            Decimal::ZERO
        }
    }
}

/// Brings an already-typed amount into `0..=MAX_AMOUNT`. Negative and
/// oversized values become zero, the same as typed garbage.
pub fn clamp_amount(value: Decimal) -> Decimal {
    if value.is_sign_negative() {
        tracing::warn!(%value, "negative amount clamped to zero");
        Decimal::ZERO
    } else if value > MAX_AMOUNT {
        tracing::warn!(%value, "amount above ceiling treated as zero");
        Decimal::ZERO
    } else {
        value
    }
}
