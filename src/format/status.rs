//! Status vocabulary → presentation tone

use serde::Serialize;

/// Semantic bucket a status badge is drawn in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusTone {
    Positive,
    Caution,
    Negative,
    Neutral,
}

/// Contract statuses: case-insensitive substring test, first rule wins.
pub fn classify_contract_status(status: &str) -> StatusTone {
    let s = status.to_lowercase();
    let has = |needles: &[&str]| needles.iter().any(|n| s.contains(n));

    if has(&["signed", "completed"]) {
        StatusTone::Positive
    } else if has(&["pending", "await"]) {
        StatusTone::Caution
    } else if has(&["expired", "ended"]) {
        StatusTone::Negative
    } else {
        StatusTone::Neutral
    }
}

/// Payroll statuses: only the exact tokens `paid` and `pending` are toned.
pub fn classify_payroll_status(status: &str) -> StatusTone {
    match status.trim().to_lowercase().as_str() {
        "paid" => StatusTone::Positive,
        "pending" => StatusTone::Caution,
        _ => StatusTone::Neutral,
    }
}
