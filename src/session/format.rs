//! Display formatting for ticker values.

use rust_decimal::{Decimal, RoundingStrategy};

/// Shown in place of the price before the first tick arrives.
pub const PRICE_PLACEHOLDER: &str = "-------";

/// Shown in place of the change before the first tick arrives.
pub const CHANGE_PLACEHOLDER: &str = "--.--%";

/// Asset prefix used in the window title.
pub const TITLE_ASSET: &str = "BTC";

/// Formats a price as `$` plus two fractional digits and `,` grouping,
/// e.g. `$50,000.00`.
pub fn format_price(price: Decimal) -> String {
    let rounded = two_places(price);
    let body = group_thousands(&rounded.abs().to_string());
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-${body}")
    } else {
        format!("${body}")
    }
}

/// Formats a percent change with two fractional digits and an explicit
/// `+` for non-negative values, e.g. `+2.50%`.
pub fn format_change(percent: Decimal) -> String {
    let rounded = two_places(percent);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("{rounded}%")
    } else {
        format!("+{}%", rounded.abs())
    }
}

/// Formats the window title with the integer part of the price,
/// e.g. `BTC: $50000 // MATRIX`.
pub fn format_title(price: Decimal) -> String {
    format!("{TITLE_ASSET}: ${} // MATRIX", price.trunc())
}

/// Rounds half away from zero and pins the scale to exactly two digits.
fn two_places(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}

/// Inserts `,` every three digits of the integer part of an unsigned
/// decimal string.
fn group_thousands(digits: &str) -> String {
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (digits, None),
    };

    let mut grouped = String::with_capacity(digits.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if let Some(frac_part) = frac_part {
        grouped.push('.');
        grouped.push_str(frac_part);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn price_gets_grouping_and_two_digits() {
        assert_eq!(format_price(dec!(50000.00)), "$50,000.00");
        assert_eq!(format_price(dec!(50000)), "$50,000.00");
        assert_eq!(format_price(dec!(1234567.891)), "$1,234,567.89");
        assert_eq!(format_price(dec!(999.5)), "$999.50");
        assert_eq!(format_price(dec!(0.01)), "$0.01");
    }

    #[test]
    fn price_rounds_half_away_from_zero() {
        assert_eq!(format_price(dec!(100.005)), "$100.01");
        assert_eq!(format_price(dec!(99999.999)), "$100,000.00");
    }

    #[test]
    fn change_carries_sign() {
        assert_eq!(format_change(dec!(2.50)), "+2.50%");
        assert_eq!(format_change(dec!(2.5)), "+2.50%");
        assert_eq!(format_change(dec!(-0.68)), "-0.68%");
        assert_eq!(format_change(dec!(0)), "+0.00%");
        assert_eq!(format_change(dec!(12.345)), "+12.35%");
    }

    #[test]
    fn change_rounding_to_zero_is_non_negative() {
        assert_eq!(format_change(dec!(-0.001)), "+0.00%");
    }

    #[test]
    fn title_truncates_price() {
        assert_eq!(format_title(dec!(50000.99)), "BTC: $50000 // MATRIX");
        assert_eq!(format_title(dec!(67123.10)), "BTC: $67123 // MATRIX");
    }

    #[test]
    fn grouping_handles_short_numbers() {
        assert_eq!(group_thousands("1.00"), "1.00");
        assert_eq!(group_thousands("123"), "123");
        assert_eq!(group_thousands("1234"), "1,234");
        assert_eq!(group_thousands("123456.78"), "123,456.78");
    }
}
