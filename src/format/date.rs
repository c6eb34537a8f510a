//! Date formatting in Asia/Manila (GMT+8)
//!
//! Two input shapes are recognized:
//! - Sheet style `M/D/YYYY`: a literal calendar date, no timezone math.
//! - ISO-8601 prefixed `YYYY-MM-DD...`: parsed as an instant, then the civil
//!   date is taken in Manila. A bare date is midnight UTC; a datetime without
//!   an offset is read as UTC.
//!
//! Anything else is echoed back trimmed.

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};
use regex::Regex;
use std::sync::LazyLock;

use super::PLACEHOLDER;
use crate::records::RecordValue;

/// Manila has observed UTC+8 without DST since 1978.
const MANILA_OFFSET_SECS: i32 = 8 * 3600;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

static SHEET_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,2})/(\d{1,2})/(\d{4})$").unwrap());

static ISO_PREFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}").unwrap());

/// Naive datetime layouts accepted after the ISO prefix check.
const NAIVE_LAYOUTS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Offset-bearing layouts; a trailing `Z` is rewritten to `+00:00` first.
const OFFSET_LAYOUTS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%#z",
    "%Y-%m-%dT%H:%M%#z",
    "%Y-%m-%d %H:%M:%S%.f%#z",
    "%Y-%m-%d %H:%M%#z",
];

/// Calendar parts of a recognized date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CivilDate {
    year: i32,
    month: u32,
    day: u32,
}

impl CivilDate {
    fn month_name(&self) -> &'static str {
        MONTH_NAMES[(self.month - 1) as usize]
    }

    fn long(&self) -> String {
        format!("{:02} {} {}", self.day, self.month_name(), self.year)
    }

    fn short(&self) -> String {
        format!("{} {:02}, {}", &self.month_name()[..3], self.day, self.year)
    }
}

fn manila() -> FixedOffset {
    FixedOffset::east_opt(MANILA_OFFSET_SECS).expect("UTC+8 is a valid offset")
}

/// `M/D/YYYY`, validated loosely: month 1-12, day 1-31, non-zero year.
fn parse_sheet_date(s: &str) -> Option<CivilDate> {
    let caps = SHEET_DATE.captures(s)?;
    let month: u32 = caps[1].parse().ok()?;
    let day: u32 = caps[2].parse().ok()?;
    let year: i32 = caps[3].parse().ok()?;
    let valid = year != 0 && (1..=12).contains(&month) && (1..=31).contains(&day);
    valid.then_some(CivilDate { year, month, day })
}

fn parse_instant(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    let zoned = match s.strip_suffix(['Z', 'z']) {
        Some(rest) => format!("{rest}+00:00"),
        None => s.to_string(),
    };
    if let Some(dt) = OFFSET_LAYOUTS
        .iter()
        .find_map(|layout| DateTime::parse_from_str(&zoned, layout).ok())
    {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| Utc.from_utc_datetime(&dt));
    }
    NAIVE_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(s, layout).ok())
        .map(|dt| Utc.from_utc_datetime(&dt))
}

/// ISO-prefixed input converted to the Manila civil date.
fn parse_iso_in_manila(s: &str) -> Option<CivilDate> {
    if !ISO_PREFIX.is_match(s) {
        return None;
    }
    let local = parse_instant(s)?.with_timezone(&manila());
    Some(CivilDate {
        year: local.year(),
        month: local.month(),
        day: local.day(),
    })
}

fn civil_date(s: &str) -> Option<CivilDate> {
    parse_sheet_date(s).or_else(|| parse_iso_in_manila(s))
}

fn format_with(value: Option<&RecordValue>, render: fn(&CivilDate) -> String) -> String {
    let raw = match value {
        Some(v) if !v.is_blank() => v.as_text(),
        _ => return PLACEHOLDER.to_string(),
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return PLACEHOLDER.to_string();
    }
    civil_date(trimmed)
        .map(|date| render(&date))
        .unwrap_or_else(|| trimmed.to_string())
}

/// `DD MonthName YYYY`, e.g. `07 March 2024`.
pub fn format_date(value: Option<&RecordValue>) -> String {
    format_with(value, CivilDate::long)
}

/// `Mon DD, YYYY`, e.g. `Mar 07, 2024`.
pub fn format_date_short(value: Option<&RecordValue>) -> String {
    format_with(value, CivilDate::short)
}
