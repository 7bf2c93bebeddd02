//! Price and number formatting
//!
//! Amounts are rendered the way the catalogue has always shown them:
//! `.` groups thousands, `,` separates decimals (es-AR convention).

use crate::types::CurrencyCode;

/// Format an amount with its currency symbol and exactly two decimals
///
/// ```
/// use numis_core::{money::format_price, CurrencyCode};
///
/// assert_eq!(format_price(1234.5, CurrencyCode::Usd), "US$1.234,50");
/// ```
pub fn format_price(amount: f64, currency: CurrencyCode) -> String {
    format!("{}{}", currency.symbol(), format_decimal(amount, 2, 2))
}

/// Format a measurement with up to two decimals and no trailing zeros
///
/// Missing and zero values render as an empty string.
pub fn format_number(value: Option<f64>) -> String {
    match value {
        Some(v) if v != 0.0 && v.is_finite() => format_decimal(v, 0, 2),
        _ => String::new(),
    }
}

fn format_decimal(value: f64, min_fraction: usize, max_fraction: usize) -> String {
    let rendered = format!("{:.*}", max_fraction, value.abs());
    let (int_part, frac_part) = rendered.split_once('.').unwrap_or((rendered.as_str(), ""));

    let mut fraction = frac_part.to_string();
    while fraction.len() > min_fraction && fraction.ends_with('0') {
        fraction.pop();
    }

    let mut out = String::new();
    if value < 0.0 && rendered.chars().any(|c| c.is_ascii_digit() && c != '0') {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if !fraction.is_empty() {
        out.push(',');
        out.push_str(&fraction);
    }
    out
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}
