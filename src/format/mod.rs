//! Display formatting for upstream scalars
//!
//! Every formatter is total: missing, `null` and `""` render as
//! [`PLACEHOLDER`], and a value that cannot be parsed for its target
//! representation is echoed back rather than dropped.

pub mod date;
pub mod number;
pub mod status;

pub use date::{format_date, format_date_short};
pub use number::{format_currency_php, format_number};
pub use status::{classify_contract_status, classify_payroll_status, StatusTone};

use crate::records::RecordValue;
use serde::Serialize;

/// Rendered in place of any missing value.
pub const PLACEHOLDER: &str = "—";

/// Target representation for a resolved field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatKind {
    Generic,
    /// Long civil date in Asia/Manila, e.g. `07 March 2024`
    Date,
    /// Short civil date in Asia/Manila, e.g. `Mar 07, 2024`
    ShortDate,
    /// Philippine peso, no fractional digits
    CurrencyPhp,
    /// Grouped number, up to two fractional digits
    Number,
    /// Exact `paid`/`pending` tokens
    PayrollStatus,
    /// Substring match on signed/pending/expired vocabulary
    ContractStatus,
}

/// A formatted cell ready for a template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DisplayValue {
    Text { text: String },
    Link { href: String, label: String },
    Badge { text: String, tone: StatusTone },
}

impl DisplayValue {
    pub fn text(text: impl Into<String>) -> Self {
        DisplayValue::Text { text: text.into() }
    }

    pub fn placeholder() -> Self {
        Self::text(PLACEHOLDER)
    }

    /// The visible text, whatever the variant.
    pub fn as_str(&self) -> &str {
        match self {
            DisplayValue::Text { text } | DisplayValue::Badge { text, .. } => text,
            DisplayValue::Link { label, .. } => label,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, DisplayValue::Text { text } if text == PLACEHOLDER)
    }
}

/// Stringify a present value as-is.
pub fn format_generic(value: Option<&RecordValue>) -> String {
    match value {
        Some(v) if !v.is_blank() => v.as_text(),
        _ => PLACEHOLDER.to_string(),
    }
}

/// Format `value` for `kind`.
pub fn format_value(value: Option<&RecordValue>, kind: FormatKind) -> DisplayValue {
    match kind {
        FormatKind::Generic => DisplayValue::text(format_generic(value)),
        FormatKind::Date => DisplayValue::text(format_date(value)),
        FormatKind::ShortDate => DisplayValue::text(format_date_short(value)),
        FormatKind::CurrencyPhp => DisplayValue::text(format_currency_php(value)),
        FormatKind::Number => DisplayValue::text(format_number(value)),
        FormatKind::PayrollStatus => {
            let text = format_generic(value);
            let tone = classify_payroll_status(&text);
            DisplayValue::Badge { text, tone }
        }
        FormatKind::ContractStatus => {
            let text = format_generic(value);
            let tone = classify_contract_status(&text);
            DisplayValue::Badge { text, tone }
        }
    }
}
