//! Alias-tolerant field lookup
//!
//! Two passes over the record, both in the record's own key order:
//! 1. Exact: the first key whose canonical form equals any canonical alias.
//! 2. Fuzzy: the first key whose canonical form contains, or is contained
//!    in, any canonical alias.
//!
//! The fuzzy pass is a schema-drift heuristic. It does not prefer the most
//! specific key; record order breaks ties. A short alias such as `rate`
//! will also hit `conversion_rate` when no exact `rate` column exists.

use super::{normalize_key, ExternalRecord, RecordValue};

/// Find the value for a logical field given its alias spellings.
pub fn resolve<'r, S: AsRef<str>>(
    record: &'r ExternalRecord,
    aliases: &[S],
) -> Option<&'r RecordValue> {
    let wanted: Vec<String> = aliases.iter().map(|a| normalize_key(a.as_ref())).collect();
    let keyed: Vec<(String, &RecordValue)> = record
        .iter()
        .map(|(k, v)| (normalize_key(k), v))
        .collect();

    keyed
        .iter()
        .find(|(key, _)| wanted.iter().any(|w| w == key))
        .or_else(|| {
            keyed.iter().find(|(key, _)| {
                wanted
                    .iter()
                    .any(|w| key.contains(w.as_str()) || w.contains(key.as_str()))
            })
        })
        .map(|(_, value)| *value)
}

/// Resolve and render as text; absent and `Null` both yield the empty string.
pub fn resolve_text<S: AsRef<str>>(record: &ExternalRecord, aliases: &[S]) -> String {
    resolve(record, aliases)
        .map(RecordValue::as_text)
        .unwrap_or_default()
}
