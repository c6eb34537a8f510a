//! Payroll list ordering and row identity
//!
//! Rows are ordered newest first: pay date descending, then period end
//! descending. Both keys are compared as raw strings, which is only a
//! chronological order when upstream dates are zero-padded ISO strings.
//! Mixed `M/D/YYYY` and ISO values sort lexically, not by date.

use std::cmp::Ordering;
use std::collections::HashSet;

use super::schemas::{EMAIL, PAY_DATE, PERIOD_END, PERIOD_START};
use crate::records::resolve::resolve_text;
use crate::records::ExternalRecord;

struct SortKeys {
    pay_date: String,
    period_end: String,
}

impl SortKeys {
    fn of(record: &ExternalRecord) -> Self {
        Self {
            pay_date: resolve_text(record, PAY_DATE),
            period_end: resolve_text(record, PERIOD_END),
        }
    }
}

/// Pay date descending when both rows have distinct pay dates; otherwise
/// period end descending, with a missing period end sorting last.
fn newest_first(a: &SortKeys, b: &SortKeys) -> Ordering {
    let (ad, bd) = (&a.pay_date, &b.pay_date);
    if !ad.is_empty() && !bd.is_empty() && ad != bd {
        return bd.cmp(ad);
    }
    b.period_end.cmp(&a.period_end)
}

/// Stable newest-first ordering of payroll rows.
pub fn sort_payroll(records: Vec<ExternalRecord>) -> Vec<ExternalRecord> {
    let mut keyed: Vec<(SortKeys, ExternalRecord)> = records
        .into_iter()
        .map(|r| (SortKeys::of(&r), r))
        .collect();

    // `newest_first` is not transitive once some pay dates are missing, which
    // slice::sort_by may reject; a plain insertion sort stays stable and total.
    for i in 1..keyed.len() {
        let mut j = i;
        while j > 0 && newest_first(&keyed[j - 1].0, &keyed[j].0) == Ordering::Greater {
            keyed.swap(j - 1, j);
            j -= 1;
        }
    }

    keyed.into_iter().map(|(_, r)| r).collect()
}

/// Identity of a payroll row within one listing: the raw email, period
/// start, period end and pay date joined by `|`, or `row-<index>` when all
/// four are blank.
pub fn row_key(record: &ExternalRecord, index: usize) -> String {
    let parts = [
        resolve_text(record, EMAIL),
        resolve_text(record, PERIOD_START),
        resolve_text(record, PERIOD_END),
        resolve_text(record, PAY_DATE),
    ];
    if parts.iter().all(|p| p.trim().is_empty()) {
        format!("row-{index}")
    } else {
        parts.join("|")
    }
}

/// Keys for every row of one listing, in order. A row whose [`row_key`]
/// repeats an earlier one gets a `#<n>` occurrence suffix, so each key
/// picks out exactly one row.
pub fn row_keys(records: &[ExternalRecord]) -> Vec<String> {
    let plain: Vec<String> = records
        .iter()
        .enumerate()
        .map(|(i, record)| row_key(record, i))
        .collect();
    let reserved: HashSet<&str> = plain.iter().map(String::as_str).collect();

    let mut issued: HashSet<String> = HashSet::with_capacity(plain.len());
    let mut keys = Vec::with_capacity(plain.len());
    for key in &plain {
        let mut candidate = key.clone();
        let mut occurrence = 1;
        while issued.contains(&candidate)
            || (occurrence > 1 && reserved.contains(candidate.as_str()))
        {
            occurrence += 1;
            candidate = format!("{key}#{occurrence}");
        }
        issued.insert(candidate.clone());
        keys.push(candidate);
    }
    keys
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pay_dates(records: &[ExternalRecord]) -> Vec<String> {
        records
            .iter()
            .map(|r| {
                format!(
                    "{}/{}",
                    resolve_text(r, PAY_DATE),
                    resolve_text(r, PERIOD_END)
                )
            })
            .collect()
    }

    #[test]
    fn test_pay_date_descending_with_period_end_tiebreak() {
        let records = vec![
            ExternalRecord::new().with("pay_date", "2024-01-01"),
            ExternalRecord::new().with("pay_date", "2024-02-01"),
            ExternalRecord::new()
                .with("pay_date", "2024-02-01")
                .with("period_end", "2024-02-15"),
        ];
        assert_eq!(
            pay_dates(&sort_payroll(records)),
            vec!["2024-02-01/2024-02-15", "2024-02-01/", "2024-01-01/"]
        );
    }

    #[test]
    fn test_alias_spellings_are_resolved() {
        let records = vec![
            ExternalRecord::new().with("Pay Date", "2024-03-01"),
            ExternalRecord::new().with("payDate", "2024-05-01"),
            ExternalRecord::new().with("PAY_DATE", "2024-04-01"),
        ];
        assert_eq!(
            pay_dates(&sort_payroll(records)),
            vec!["2024-05-01/", "2024-04-01/", "2024-03-01/"]
        );
    }

    #[test]
    fn test_missing_pay_date_falls_back_to_period_end() {
        let records = vec![
            ExternalRecord::new().with("period_end", "2024-01-15"),
            ExternalRecord::new()
                .with("pay_date", "2024-01-20")
                .with("period_end", "2024-01-31"),
        ];
        assert_eq!(
            pay_dates(&sort_payroll(records)),
            vec!["2024-01-20/2024-01-31", "/2024-01-15"]
        );
    }

    #[test]
    fn test_equal_keys_keep_input_order() {
        let records = vec![
            ExternalRecord::new()
                .with("pay_date", "2024-02-01")
                .with("notes", "first"),
            ExternalRecord::new()
                .with("pay_date", "2024-02-01")
                .with("notes", "second"),
        ];
        let sorted = sort_payroll(records);
        assert_eq!(resolve_text(&sorted[0], &["notes"]), "first");
        assert_eq!(resolve_text(&sorted[1], &["notes"]), "second");
    }

    #[test]
    fn test_mixed_formats_sort_lexically() {
        // "3/..." > "2024-..." as strings, so the sheet-style row comes first
        let records = vec![
            ExternalRecord::new().with("pay_date", "2024-12-01"),
            ExternalRecord::new().with("pay_date", "3/1/2024"),
        ];
        assert_eq!(
            pay_dates(&sort_payroll(records)),
            vec!["3/1/2024/", "2024-12-01/"]
        );
    }

    #[test]
    fn test_non_transitive_input_does_not_panic() {
        let records = vec![
            ExternalRecord::new().with("pay_date", "2024-03-01"),
            ExternalRecord::new().with("period_end", "2024-02-10"),
            ExternalRecord::new()
                .with("pay_date", "2024-01-01")
                .with("period_end", "2024-02-20"),
        ];
        assert_eq!(sort_payroll(records).len(), 3);
    }

    #[test]
    fn test_row_key() {
        let record = ExternalRecord::new()
            .with("email", "ana@example.com")
            .with("period_start", "2024-02-01")
            .with("period_end", "2024-02-15")
            .with("pay_date", "2024-02-20");
        assert_eq!(
            row_key(&record, 0),
            "ana@example.com|2024-02-01|2024-02-15|2024-02-20"
        );
        assert_eq!(row_key(&ExternalRecord::new().with("hours", "80"), 4), "row-4");
    }

    #[test]
    fn test_row_keys_disambiguate_repeats() {
        let row = || {
            ExternalRecord::new()
                .with("email", "a@x.com")
                .with("pay_date", "2024-02-20")
        };
        let records = vec![row(), ExternalRecord::new().with("hours", "8"), row(), row()];
        assert_eq!(
            row_keys(&records),
            vec![
                "a@x.com|||2024-02-20",
                "row-1",
                "a@x.com|||2024-02-20#2",
                "a@x.com|||2024-02-20#3",
            ]
        );
    }

    #[test]
    fn test_row_keys_skip_suffixes_taken_by_real_rows() {
        let records = vec![
            ExternalRecord::new().with("pay_date", "2024-02-20"),
            ExternalRecord::new().with("pay_date", "2024-02-20"),
            ExternalRecord::new().with("pay_date", "2024-02-20#2"),
        ];
        let keys = row_keys(&records);
        assert_eq!(keys[0], "|||2024-02-20");
        assert_eq!(keys[1], "|||2024-02-20#3");
        assert_eq!(keys[2], "|||2024-02-20#2");
    }
}
