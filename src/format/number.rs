//! Currency and plain-number formatting
//!
//! Input is parsed after dropping thousands-separator commas. Rounding runs on
//! decimal values, midpoint away from zero, so `1.005` rounds to `1.01` the
//! same way browser `Intl.NumberFormat` output does. Values outside the
//! decimal range or non-finite values count as unparseable and are echoed.

use rust_decimal::prelude::*;
use rust_decimal::RoundingStrategy;

use super::PLACEHOLDER;
use crate::records::RecordValue;

const PESO_SIGN: char = '₱';

/// Parse a sheet number: commas dropped, surrounding whitespace ignored,
/// plain or scientific notation.
fn parse_amount(raw: &str) -> Option<Decimal> {
    let cleaned = raw.replace(',', "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return None;
    }
    let cleaned = cleaned.strip_prefix('+').unwrap_or(cleaned);
    Decimal::from_str(cleaned)
        .or_else(|_| Decimal::from_scientific(cleaned))
        .ok()
}

/// Group an unsigned digit string in threes: `1234567` → `1,234,567`.
fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Round to `max_fraction` digits and render with grouping. The sign is
/// returned separately so callers can place a currency symbol after it.
/// It follows the unrounded amount, so `-0.4` at zero digits keeps its
/// minus sign like Intl number formatting does.
fn render(amount: Decimal, max_fraction: u32) -> (bool, String) {
    let negative = amount.is_sign_negative() && !amount.is_zero();
    let rounded = amount
        .round_dp_with_strategy(max_fraction, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    let text = rounded.abs().to_string();
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (text.as_str(), None),
    };
    let mut out = group_thousands(int_part);
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    (negative, out)
}

fn with_amount(value: Option<&RecordValue>, render_amount: impl Fn(Decimal) -> String) -> String {
    let raw = match value {
        Some(v) if !v.is_blank() => v.as_text(),
        _ => return PLACEHOLDER.to_string(),
    };
    match parse_amount(&raw) {
        Some(amount) => render_amount(amount),
        None => raw,
    }
}

/// Philippine peso with no fractional digits, e.g. `₱1,234`.
pub fn format_currency_php(value: Option<&RecordValue>) -> String {
    with_amount(value, |amount| {
        let (negative, digits) = render(amount, 0);
        let sign = if negative { "-" } else { "" };
        format!("{sign}{PESO_SIGN}{digits}")
    })
}

/// Grouped number with up to two fractional digits, e.g. `1,234.5`.
pub fn format_number(value: Option<&RecordValue>) -> String {
    with_amount(value, |amount| {
        let (negative, digits) = render(amount, 2);
        if negative {
            format!("-{digits}")
        } else {
            digits
        }
    })
}
