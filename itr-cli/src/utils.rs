use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Groups the integer digits the Indian way: last three, then pairs.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut rest = head;
    while rest.len() > 2 {
        let (left, right) = rest.split_at(rest.len() - 2);
        groups.push(right);
        rest = left;
    }
    groups.push(rest);
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}

/// Formats an amount as rupees with lakh/crore grouping, e.g. `₹14,60,000`.
///
/// Paise are shown only when non-zero, rounded half-up to two places.
pub fn format_inr(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let abs = rounded.abs();
    let whole = abs.trunc();
    let paise = ((abs - whole) * Decimal::ONE_HUNDRED).trunc().to_u8().unwrap_or(0);

    let grouped = group_indian(&whole.normalize().to_string());
    if paise == 0 {
        format!("{sign}₹{grouped}")
    } else {
        format!("{sign}₹{grouped}.{paise:02}")
    }
}

/// Formats a fractional rate as a percentage, e.g. `0.15` → `15%`.
pub fn format_rate(rate: Decimal) -> String {
    format!("{}%", (rate * Decimal::ONE_HUNDRED).normalize())
}

/// Parses a 1-based line number as typed by the user into a 0-based index.
pub fn parse_line_number(s: &str) -> Option<usize> {
    match s.trim().parse::<usize>() {
        Ok(n) if n >= 1 => Some(n - 1),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn format_inr_uses_lakh_and_crore_grouping() {
        assert_eq!(format_inr(dec!(0)), "₹0");
        assert_eq!(format_inr(dec!(999)), "₹999");
        assert_eq!(format_inr(dec!(1000)), "₹1,000");
        assert_eq!(format_inr(dec!(150000)), "₹1,50,000");
        assert_eq!(format_inr(dec!(1460000)), "₹14,60,000");
        assert_eq!(format_inr(dec!(50000001)), "₹5,00,00,001");
    }

    #[test]
    fn format_inr_shows_paise_only_when_present() {
        assert_eq!(format_inr(dec!(213720.00)), "₹2,13,720");
        assert_eq!(format_inr(dec!(0.05)), "₹0.05");
        assert_eq!(format_inr(dec!(1234.5)), "₹1,234.50");
        assert_eq!(format_inr(dec!(10.005)), "₹10.01");
    }

    #[test]
    fn format_inr_keeps_sign() {
        assert_eq!(format_inr(dec!(-200000)), "-₹2,00,000");
    }

    #[test]
    fn format_rate_as_percentage() {
        assert_eq!(format_rate(dec!(0)), "0%");
        assert_eq!(format_rate(dec!(0.10)), "10%");
        assert_eq!(format_rate(dec!(0.37)), "37%");
    }

    #[test]
    fn line_numbers_are_one_based() {
        assert_eq!(parse_line_number("1"), Some(0));
        assert_eq!(parse_line_number(" 3 "), Some(2));
        assert_eq!(parse_line_number("0"), None);
        assert_eq!(parse_line_number("x"), None);
    }
}
