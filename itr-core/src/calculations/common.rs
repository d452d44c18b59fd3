//! Small helpers shared by the regime and post-processing calculations.

use rust_decimal::Decimal;

/// Rounds to two decimal places, with midpoints rounded away from zero.
///
/// ```
/// use rust_decimal_macros::dec;
/// use itr_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(8220.004)), dec!(8220.00));
/// assert_eq!(round_half_up(dec!(0.125)), dec!(0.13));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Floors a figure at zero. Used wherever a subtraction may not go negative.
pub fn non_negative(value: Decimal) -> Decimal {
    value.max(Decimal::ZERO)
}

/// `rate` applied to `amount`, where `rate` is a fraction (0.04 for 4%).
pub fn apply_rate(
    amount: Decimal,
    rate: Decimal,
) -> Decimal {
    round_half_up(amount * rate)
}
