//! Payload probing for the spreadsheet API
//!
//! Response envelopes differ between script versions, so each extractor
//! probes a fixed list of keys and takes the first one with the right shape.

use serde_json::Value;

use super::{AllowlistEntry, Announcement};
use crate::records::ExternalRecord;

const PROFILE_OBJECT_KEYS: &[&str] = &["profile", "employee", "data", "record"];
const PROFILE_LIST_KEYS: &[&str] = &["employees", "records", "rows", "data", "items"];
const PAYROLL_LIST_KEYS: &[&str] = &["payroll", "payrolls", "records", "rows", "data", "items"];

fn first_with<'v>(
    payload: &'v Value,
    keys: &[&str],
    shape: fn(&Value) -> bool,
) -> Option<&'v Value> {
    keys.iter()
        .filter_map(|k| payload.get(*k))
        .find(|v| shape(v))
}

fn records_of(rows: &[Value]) -> Vec<ExternalRecord> {
    rows.iter().filter_map(ExternalRecord::from_json).collect()
}

/// The single profile record in a `path=profile` response.
///
/// Probes, in order: a nested object under `profile`/`employee`/`data`/
/// `record`; the first element of the first array under `employees`/
/// `records`/`rows`/`data`/`items`; the payload itself when it is an object.
pub fn pick_record(payload: &Value) -> Option<ExternalRecord> {
    if let Some(direct) = first_with(payload, PROFILE_OBJECT_KEYS, Value::is_object) {
        return ExternalRecord::from_json(direct);
    }

    let list = first_with(payload, PROFILE_LIST_KEYS, Value::is_array).and_then(Value::as_array);
    if let Some(first) = list.and_then(|rows| rows.first()) {
        return ExternalRecord::from_json(first);
    }

    ExternalRecord::from_json(payload)
}

/// The payroll rows in a `path=payroll` response. Non-object rows are skipped.
pub fn pick_list(payload: &Value) -> Vec<ExternalRecord> {
    if let Some(rows) = first_with(payload, PAYROLL_LIST_KEYS, Value::is_array).and_then(Value::as_array) {
        return records_of(rows);
    }
    payload.as_array().map(|rows| records_of(rows)).unwrap_or_default()
}

/// The rows under `contracts` in a `path=contracts` response.
pub fn pick_contracts(payload: &Value) -> Vec<ExternalRecord> {
    payload
        .get("contracts")
        .and_then(Value::as_array)
        .map(|rows| records_of(rows))
        .unwrap_or_default()
}

fn text_field(entry: &Value, key: &str) -> Option<String> {
    match entry.get(key)? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Entries under `users` in a `path=allowed-users` response.
pub fn pick_allowlist(payload: &Value) -> Vec<AllowlistEntry> {
    payload
        .get("users")
        .and_then(Value::as_array)
        .map(|users| {
            users
                .iter()
                .map(|u| AllowlistEntry {
                    email: text_field(u, "email"),
                    status: text_field(u, "status"),
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Entries under `announcements`; entries without a message are dropped.
pub fn pick_announcements(payload: &Value) -> Vec<Announcement> {
    payload
        .get("announcements")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|a| text_field(a, "message"))
                .map(|message| Announcement { message })
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::resolve::resolve_text;
    use serde_json::json;

    fn name(record: &ExternalRecord) -> String {
        resolve_text(record, &["name"])
    }

    #[test]
    fn test_pick_record_direct_object() {
        let payload = json!({ "ok": true, "profile": { "name": "Ana" } });
        assert_eq!(name(&pick_record(&payload).unwrap()), "Ana");

        let payload = json!({ "record": { "name": "Ben" } });
        assert_eq!(name(&pick_record(&payload).unwrap()), "Ben");
    }

    #[test]
    fn test_pick_record_skips_non_object_direct_keys() {
        // `data` is an array here, so it is probed as a list instead
        let payload = json!({ "data": [{ "name": "Cy" }, { "name": "Di" }] });
        assert_eq!(name(&pick_record(&payload).unwrap()), "Cy");
    }

    #[test]
    fn test_pick_record_first_array_wins() {
        let payload = json!({
            "rows": [{ "name": "Row" }],
            "employees": [{ "name": "Emp" }]
        });
        assert_eq!(name(&pick_record(&payload).unwrap()), "Emp");
    }

    #[test]
    fn test_pick_record_empty_list_falls_back_to_payload() {
        let payload = json!({ "employees": [], "name": "Envelope" });
        assert_eq!(name(&pick_record(&payload).unwrap()), "Envelope");
    }

    #[test]
    fn test_pick_record_flat_payload() {
        let payload = json!({ "Full Name": "Flat", "Status": "Active" });
        let record = pick_record(&payload).unwrap();
        assert_eq!(record.len(), 2);
    }

    #[test]
    fn test_pick_record_none_for_non_objects() {
        assert!(pick_record(&json!(null)).is_none());
        assert!(pick_record(&json!("error")).is_none());
        assert!(pick_record(&json!([{ "name": "x" }])).is_none());
    }

    #[test]
    fn test_pick_list_probe_order() {
        let payload = json!({ "rows": [{ "a": 1 }], "payroll": [{ "a": 2 }, { "a": 3 }] });
        assert_eq!(pick_list(&payload).len(), 2);

        let payload = json!({ "payroll": "none", "items": [{ "a": 1 }] });
        assert_eq!(pick_list(&payload).len(), 1);
    }

    #[test]
    fn test_pick_list_bare_array_and_garbage() {
        assert_eq!(pick_list(&json!([{ "a": 1 }, 7, { "b": 2 }])).len(), 2);
        assert!(pick_list(&json!({ "error": "nope" })).is_empty());
        assert!(pick_list(&json!(null)).is_empty());
    }

    #[test]
    fn test_pick_contracts() {
        let payload = json!({ "contracts": [{ "title": "EA" }, { "title": "NDA" }] });
        assert_eq!(pick_contracts(&payload).len(), 2);
        assert!(pick_contracts(&json!({})).is_empty());
    }

    #[test]
    fn test_pick_allowlist_tolerates_missing_fields() {
        let payload = json!({ "users": [
            { "email": "a@x.com", "status": "Active" },
            { "email": "b@x.com" },
            { "status": "active" },
            { "email": "c@x.com", "status": null }
        ]});
        let entries = pick_allowlist(&payload);
        assert_eq!(entries.len(), 4);
        assert_eq!(entries[1].status, None);
        assert_eq!(entries[2].email, None);
        assert_eq!(entries[3].status, None);
        assert!(pick_allowlist(&json!({ "users": null })).is_empty());
    }

    #[test]
    fn test_pick_announcements() {
        let payload = json!({ "announcements": [
            { "message": "Payday moved" },
            { "title": "no message" },
            { "message": "Holiday on Friday" }
        ]});
        let messages: Vec<String> = pick_announcements(&payload)
            .into_iter()
            .map(|a| a.message)
            .collect();
        assert_eq!(messages, vec!["Payday moved", "Holiday on Friday"]);
    }
}
