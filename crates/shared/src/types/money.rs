//! Money display formatting with decimal precision.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! All arithmetic stays in `rust_decimal::Decimal`; this module only
//! renders amounts for display.

use rust_decimal::Decimal;

/// Formats a decimal amount as a US dollar string, e.g. `$1,234.56`.
///
/// Negative amounts render with a leading minus sign: `-$40.00`.
/// Amounts are rounded to two decimal places with banker's rounding
/// before formatting.
#[must_use]
pub fn format_usd(amount: Decimal) -> String {
    let rounded = amount.round_dp(2);
    let negative = rounded.is_sign_negative();
    let abs = rounded.abs();

    // `{:.2}` on Decimal always yields "<integer>.<2 digits>".
    let plain = format!("{abs:.2}");
    let (int_part, frac_part) = plain
        .split_once('.')
        .unwrap_or((plain.as_str(), "00"));

    let grouped = group_thousands(int_part);

    if negative {
        format!("-${grouped}.{frac_part}")
    } else {
        format!("${grouped}.{frac_part}")
    }
}

/// Inserts comma separators every three digits, right to left.
fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    let chars: Vec<char> = digits.chars().collect();
    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(*c);
    }
    out
}
