//! French-locale display strings for amounts and percentages.
//!
//! Digits are grouped by three with a narrow no-break space (U+202F), the
//! decimal separator is a comma, and units are separated from the number by
//! a no-break space: U+00A0 before `€`, U+202F before `%`.

use rust_decimal::{Decimal, RoundingStrategy};

const GROUP_SEPARATOR: char = '\u{202F}';
const CURRENCY_SEPARATOR: char = '\u{00A0}';
const PERCENT_SEPARATOR: char = '\u{202F}';

/// Whole euros: `200000 -> "200 000 €"`, `-1101.6 -> "-1 102 €"`.
pub fn format_currency(amount: Decimal) -> String {
    format!("{}{CURRENCY_SEPARATOR}€", format_number(amount, 0))
}

/// `value` is already a percentage: `3.5 -> "3,50 %"`.
pub fn format_percent(value: Decimal) -> String {
    format!("{}{PERCENT_SEPARATOR}%", format_number(value, 2))
}

/// Round half away from zero to `decimals` places, then apply French
/// grouping and decimal comma.
pub fn format_number(value: Decimal, decimals: u32) -> String {
    let rounded = value.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();

    let digits = format!("{:.*}", decimals as usize, rounded.abs());
    let (integer, fraction) = match digits.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (digits.as_str(), None),
    };

    let mut out = String::with_capacity(digits.len() + 8);
    if negative {
        out.push('-');
    }
    out.push_str(&group_thousands(integer));
    if let Some(f) = fraction {
        out.push(',');
        out.push_str(f);
    }
    out
}

fn group_thousands(integer: &str) -> String {
    let len = integer.len();
    let mut out = String::with_capacity(len + len / 3 * 3);
    for (i, c) in integer.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(GROUP_SEPARATOR);
        }
        out.push(c);
    }
    out
}
