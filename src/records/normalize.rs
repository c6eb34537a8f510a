//! Field-name canonicalization
//!
//! Turns any spelling of a column header into a comparable key:
//! - Trim surrounding whitespace
//! - Lowercase conversion
//! - Whitespace runs collapsed to a single `_`
//! - Everything outside `[a-z0-9_]` removed

use regex::Regex;
use std::sync::LazyLock;

static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

static NON_KEY_CHARS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-z0-9_]").unwrap());

/// Canonical form of a field name.
///
/// # Examples
///
/// ```
/// use hero_portal::records::normalize_key;
///
/// assert_eq!(normalize_key("Pay Date"), "pay_date");
/// assert_eq!(normalize_key("PAY-DATE"), "paydate");
/// assert_eq!(normalize_key(""), "");
/// ```
pub fn normalize_key(key: &str) -> String {
    let lowered = key.trim().to_lowercase();
    let underscored = WHITESPACE_RUN.replace_all(&lowered, "_");
    NON_KEY_CHARS.replace_all(&underscored, "").into_owned()
}
