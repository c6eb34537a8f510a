//! Page view models
//!
//! Each page is assembled from already-fetched data into a plain serializable
//! struct, which [`render::PageRenderer`] feeds to its template. Nothing here
//! performs I/O; upstream failures arrive as `Err` values and become the
//! page's "unavailable" state.

pub mod render;

pub use render::{Page, PageRenderer};

use serde::Serialize;
use url::form_urlencoded;

use crate::error::UpstreamError;
use crate::format::{DisplayValue, PLACEHOLDER};
use crate::identity::Identity;
use crate::projection::schemas::{
    CONTRACT_ROW, FULL_NAME, PAYROLL_PAYOUT, PAYROLL_ROW, PAYROLL_SUMMARY, PAYROLL_TOTALS,
    PERIOD_END, PERIOD_START, PROFILE_PERSONAL, PROFILE_WORK,
};
use crate::projection::{
    period_label, project, project_with, row_keys, sort_payroll, ProjectedField, ProjectionContext,
};
use crate::records::resolve::resolve_text;
use crate::records::ExternalRecord;
use crate::upstream::Announcement;

pub const PRODUCT_NAME: &str = "DeskXP Hero Portal";

/// Announcements shown on the dashboard.
pub const ANNOUNCEMENT_LIMIT: usize = 5;

/// Fields shared by every page: the document title, which nav entry is
/// current (empty on pages without navigation) and the sign-out link.
#[derive(Debug, Clone, Serialize)]
pub struct Chrome {
    pub title: String,
    pub nav: &'static str,
    pub product: &'static str,
    pub signout_url: String,
}

impl Chrome {
    pub fn new(title: impl Into<String>, nav: &'static str, signout_url: &str) -> Self {
        Self {
            title: title.into(),
            nav,
            product: PRODUCT_NAME,
            signout_url: signout_url.to_string(),
        }
    }
}

fn take(fields: &mut Vec<ProjectedField>, label: &str) -> DisplayValue {
    match fields.iter().position(|f| f.label == label) {
        Some(i) => fields.remove(i).value,
        None => DisplayValue::placeholder(),
    }
}

// ---------------------------------------------------------------------------
// Sign-in and denied
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct SigninView {
    #[serde(flatten)]
    pub chrome: Chrome,
    pub signin_url: String,
}

pub fn signin(signin_url: &str, signout_url: &str) -> SigninView {
    SigninView {
        chrome: Chrome::new("Sign in", "", signout_url),
        signin_url: signin_url.to_string(),
    }
}

#[derive(Debug, Serialize)]
pub struct DeniedView {
    #[serde(flatten)]
    pub chrome: Chrome,
}

pub fn denied(signout_url: &str) -> DeniedView {
    DeniedView {
        chrome: Chrome::new("Access denied", "", signout_url),
    }
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct ModuleCard {
    pub title: &'static str,
    pub description: &'static str,
    pub cta: &'static str,
    pub href: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuickAction {
    pub label: &'static str,
    pub href: &'static str,
}

const MODULES: [ModuleCard; 3] = [
    ModuleCard {
        title: "Profile",
        description: "View and manage your employee information.",
        cta: "Open profile",
        href: "/profile",
    },
    ModuleCard {
        title: "Payroll",
        description: "Access salary records and payout history.",
        cta: "View payroll",
        href: "/payroll",
    },
    ModuleCard {
        title: "Contracts",
        description: "Review employment and service agreements.",
        cta: "View contracts",
        href: "/contracts",
    },
];

const QUICK_ACTIONS: [QuickAction; 3] = [
    QuickAction {
        label: "Update profile",
        href: "/profile",
    },
    QuickAction {
        label: "Check latest payroll",
        href: "/payroll",
    },
    QuickAction {
        label: "View contract",
        href: "/contracts",
    },
];

#[derive(Debug, Serialize)]
pub struct DashboardView {
    #[serde(flatten)]
    pub chrome: Chrome,
    pub greeting_name: String,
    pub status_name: String,
    pub email: String,
    pub modules: Vec<ModuleCard>,
    pub quick_actions: Vec<QuickAction>,
    pub announcements: Vec<Announcement>,
}

/// A failed announcements call shows the same as an empty list.
pub fn dashboard(
    identity: &Identity,
    announcements: Result<Vec<Announcement>, UpstreamError>,
    signout_url: &str,
) -> DashboardView {
    let mut announcements = announcements.unwrap_or_default();
    announcements.truncate(ANNOUNCEMENT_LIMIT);

    DashboardView {
        chrome: Chrome::new("Dashboard", "dashboard", signout_url),
        greeting_name: identity.greeting_name().to_string(),
        status_name: identity
            .name
            .clone()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| PLACEHOLDER.to_string()),
        email: identity.email.clone(),
        modules: MODULES.to_vec(),
        quick_actions: QUICK_ACTIONS.to_vec(),
        announcements,
    }
}

// ---------------------------------------------------------------------------
// Profile
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct ProfileView {
    #[serde(flatten)]
    pub chrome: Chrome,
    pub heading: String,
    pub personal: Vec<ProjectedField>,
    pub work: Vec<ProjectedField>,
    pub error: Option<String>,
}

pub fn profile(
    identity: &Identity,
    record: Result<Option<ExternalRecord>, UpstreamError>,
    signout_url: &str,
) -> ProfileView {
    let chrome = Chrome::new("Profile", "profile", signout_url);
    let fallback_heading = || {
        identity
            .name
            .clone()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| "Profile".to_string())
    };

    let record = match record {
        Ok(Some(record)) => record,
        Ok(None) => {
            return ProfileView {
                chrome,
                heading: fallback_heading(),
                personal: Vec::new(),
                work: Vec::new(),
                error: Some("No profile record returned by API.".to_string()),
            }
        }
        Err(e) => {
            return ProfileView {
                chrome,
                heading: fallback_heading(),
                personal: Vec::new(),
                work: Vec::new(),
                error: Some(e.page_message("Profile")),
            }
        }
    };

    let sheet_name = resolve_text(&record, FULL_NAME).trim().to_string();
    let ctx = ProjectionContext {
        email: Some(&identity.email),
        display_name: identity.name.as_deref(),
    };

    ProfileView {
        chrome,
        heading: if sheet_name.is_empty() {
            fallback_heading()
        } else {
            sheet_name
        },
        personal: project_with(&record, PROFILE_PERSONAL, &ctx),
        work: project(&record, PROFILE_WORK),
        error: None,
    }
}

// ---------------------------------------------------------------------------
// Payroll
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct PayrollRow {
    pub period: String,
    pub status: DisplayValue,
    pub details_href: String,
}

#[derive(Debug, Serialize)]
pub struct PayrollView {
    #[serde(flatten)]
    pub chrome: Chrome,
    pub rows: Vec<PayrollRow>,
    pub error: Option<String>,
}

fn details_href(key: &str) -> String {
    let encoded: String = form_urlencoded::byte_serialize(key.as_bytes()).collect();
    format!("/payroll/details?row={encoded}")
}

pub fn payroll(records: Result<Vec<ExternalRecord>, UpstreamError>, signout_url: &str) -> PayrollView {
    let chrome = Chrome::new("Payroll", "payroll", signout_url);
    let records = match records {
        Ok(records) => records,
        Err(e) => {
            return PayrollView {
                chrome,
                rows: Vec::new(),
                error: Some(e.page_message("Payroll")),
            }
        }
    };

    let records = sort_payroll(records);
    let rows = records
        .iter()
        .zip(row_keys(&records))
        .map(|(record, key)| {
            let mut fields = project(record, PAYROLL_ROW);
            PayrollRow {
                period: take(&mut fields, "Pay period").as_str().to_string(),
                status: take(&mut fields, "Status"),
                details_href: details_href(&key),
            }
        })
        .collect();

    PayrollView {
        chrome,
        rows,
        error: None,
    }
}

#[derive(Debug, Serialize)]
pub struct PayrollDetailView {
    #[serde(flatten)]
    pub chrome: Chrome,
    pub period: String,
    pub summary: Vec<ProjectedField>,
    pub totals: Vec<ProjectedField>,
    pub payout: Vec<ProjectedField>,
}

/// Detail view of the row whose key is `row`, in newest-first order.
pub fn payroll_detail(
    records: Vec<ExternalRecord>,
    row: &str,
    signout_url: &str,
) -> Option<PayrollDetailView> {
    let mut records = sort_payroll(records);
    let position = row_keys(&records).iter().position(|key| key == row)?;
    let record = records.swap_remove(position);

    Some(PayrollDetailView {
        chrome: Chrome::new("Payroll details", "payroll", signout_url),
        period: period_label(&record, PERIOD_START, PERIOD_END),
        summary: project(&record, PAYROLL_SUMMARY),
        totals: project(&record, PAYROLL_TOTALS),
        payout: project(&record, PAYROLL_PAYOUT),
    })
}

// ---------------------------------------------------------------------------
// Contracts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct ContractCard {
    pub title: String,
    pub status: DisplayValue,
    pub signed: String,
    pub notes: Option<String>,
    pub file: DisplayValue,
}

impl ContractCard {
    fn from_record(record: &ExternalRecord) -> Self {
        let mut fields = project(record, CONTRACT_ROW);
        let notes = take(&mut fields, "Notes");
        Self {
            title: take(&mut fields, "Title").as_str().to_string(),
            status: take(&mut fields, "Status"),
            signed: take(&mut fields, "Signed").as_str().to_string(),
            notes: (!notes.is_placeholder()).then(|| notes.as_str().to_string()),
            file: take(&mut fields, "File"),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ContractsView {
    #[serde(flatten)]
    pub chrome: Chrome,
    pub contracts: Vec<ContractCard>,
    pub error: Option<String>,
}

pub fn contracts(
    records: Result<Vec<ExternalRecord>, UpstreamError>,
    signout_url: &str,
) -> ContractsView {
    let chrome = Chrome::new("Contracts", "contracts", signout_url);
    match records {
        Ok(records) => ContractsView {
            chrome,
            contracts: records.iter().map(ContractCard::from_record).collect(),
            error: None,
        },
        Err(e) => ContractsView {
            chrome,
            contracts: Vec::new(),
            error: Some(e.page_message("Contracts")),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::StatusTone;

    const SIGNOUT: &str = "/oauth2/sign_out";

    fn ana() -> Identity {
        Identity::new("ana@example.com", Some("Ana Reyes"))
    }

    fn failed(path: &str) -> UpstreamError {
        UpstreamError::Status {
            path: path.into(),
            status: 500,
        }
    }

    fn value<'a>(fields: &'a [ProjectedField], label: &str) -> &'a str {
        fields
            .iter()
            .find(|f| f.label == label)
            .map(|f| f.value.as_str())
            .unwrap()
    }

    #[test]
    fn test_dashboard_caps_announcements() {
        let items = (1..=7)
            .map(|i| Announcement {
                message: format!("note {i}"),
            })
            .collect();
        let view = dashboard(&ana(), Ok(items), SIGNOUT);
        assert_eq!(view.announcements.len(), ANNOUNCEMENT_LIMIT);
        assert_eq!(view.announcements[0].message, "note 1");
        assert_eq!(view.greeting_name, "Ana Reyes");
    }

    #[test]
    fn test_dashboard_degrades_on_failure_and_missing_name() {
        let identity = Identity::new("ben@example.com", None);
        let view = dashboard(&identity, Err(failed("announcements")), SIGNOUT);
        assert!(view.announcements.is_empty());
        assert_eq!(view.greeting_name, "ben@example.com");
        assert_eq!(view.status_name, PLACEHOLDER);
    }

    #[test]
    fn test_profile_projection_and_heading() {
        let record = ExternalRecord::new()
            .with("Full Name", "Ana M. Reyes")
            .with("Date of Birth", "3/7/1990")
            .with("Client", "Acme")
            .with("Rate", "8.50");
        let view = profile(&ana(), Ok(Some(record)), SIGNOUT);
        assert_eq!(view.heading, "Ana M. Reyes");
        assert_eq!(value(&view.personal, "Email"), "ana@example.com");
        assert_eq!(value(&view.personal, "DOB"), "07 March 1990");
        assert_eq!(value(&view.personal, "Mobile"), PLACEHOLDER);
        assert_eq!(value(&view.work, "Rate"), "8.50");
        assert!(view.error.is_none());
    }

    #[test]
    fn test_profile_falls_back_to_identity_name() {
        let record = ExternalRecord::new().with("Client", "Acme");
        let view = profile(&ana(), Ok(Some(record)), SIGNOUT);
        assert_eq!(view.heading, "Ana Reyes");
        assert_eq!(value(&view.personal, "Full name"), "Ana Reyes");
    }

    #[test]
    fn test_profile_failure_states() {
        let view = profile(&ana(), Err(failed("profile")), SIGNOUT);
        assert_eq!(view.error.as_deref(), Some("Profile fetch failed (500)"));

        let anonymous = Identity::new("x@example.com", None);
        let view = profile(&anonymous, Ok(None), SIGNOUT);
        assert_eq!(view.heading, "Profile");
        assert_eq!(
            view.error.as_deref(),
            Some("No profile record returned by API.")
        );
    }

    #[test]
    fn test_payroll_rows_sorted_with_links() {
        let records = vec![
            ExternalRecord::new()
                .with("email", "ana@example.com")
                .with("pay_date", "2024-01-01")
                .with("status", "Paid"),
            ExternalRecord::new()
                .with("email", "ana@example.com")
                .with("period_start", "2024-02-01")
                .with("period_end", "2024-02-15")
                .with("pay_date", "2024-02-20")
                .with("status", "pending"),
        ];
        let view = payroll(Ok(records), SIGNOUT);
        assert_eq!(view.rows.len(), 2);
        assert_eq!(view.rows[0].period, "01 February 2024 → 15 February 2024");
        assert!(matches!(
            view.rows[0].status,
            DisplayValue::Badge {
                tone: StatusTone::Caution,
                ..
            }
        ));
        assert_eq!(
            view.rows[0].details_href,
            "/payroll/details?row=ana%40example.com%7C2024-02-01%7C2024-02-15%7C2024-02-20"
        );
        assert_eq!(view.rows[1].period, "Pay period —");
    }

    #[test]
    fn test_payroll_failure_message() {
        let view = payroll(Err(failed("payroll")), SIGNOUT);
        assert!(view.rows.is_empty());
        assert_eq!(view.error.as_deref(), Some("Payroll fetch failed (500)"));
    }

    #[test]
    fn test_payroll_detail_lookup() {
        let records = vec![
            ExternalRecord::new()
                .with("pay_date", "2024-03-05")
                .with("Total PHP", "12,500")
                .with("Total Net", "11000.4")
                .with("File URL", "https://files.example/slip.pdf"),
            ExternalRecord::new().with("notes", "blank keys"),
        ];

        let detail = payroll_detail(records.clone(), "|||2024-03-05", SIGNOUT).unwrap();
        assert_eq!(value(&detail.totals, "Total PHP"), "₱12,500");
        assert_eq!(value(&detail.totals, "Net"), "₱11,000");
        assert_eq!(value(&detail.payout, "File"), "Open file");

        let blank = payroll_detail(records.clone(), "row-1", SIGNOUT).unwrap();
        assert_eq!(value(&blank.payout, "Notes"), "blank keys");

        assert!(payroll_detail(records, "nope", SIGNOUT).is_none());
    }

    #[test]
    fn test_payroll_rows_sharing_a_key_open_their_own_detail() {
        let records = vec![
            ExternalRecord::new()
                .with("email", "a@x.com")
                .with("pay_date", "2024-02-20")
                .with("notes", "original"),
            ExternalRecord::new()
                .with("email", "a@x.com")
                .with("pay_date", "2024-02-20")
                .with("notes", "correction"),
        ];

        let view = payroll(Ok(records.clone()), SIGNOUT);
        let hrefs: Vec<&str> = view.rows.iter().map(|r| r.details_href.as_str()).collect();
        assert_eq!(hrefs[0], "/payroll/details?row=a%40x.com%7C%7C%7C2024-02-20");
        assert_ne!(hrefs[0], hrefs[1]);

        for (href, notes) in hrefs.iter().zip(["original", "correction"]) {
            let encoded = href.trim_start_matches("/payroll/details?row=");
            let row: String = form_urlencoded::parse(format!("row={encoded}").as_bytes())
                .map(|(_, v)| v.into_owned())
                .next()
                .unwrap();
            let detail = payroll_detail(records.clone(), &row, SIGNOUT).unwrap();
            assert_eq!(value(&detail.payout, "Notes"), notes);
        }
    }

    #[test]
    fn test_contract_cards() {
        let records = vec![
            ExternalRecord::new()
                .with("title", "  ")
                .with("signed_date", "2024-03-06T17:00:00Z")
                .with("file_url", "https://files.example/c.pdf"),
            ExternalRecord::new()
                .with("title", "NDA")
                .with("status", "Pending signature")
                .with("notes", "Sent by HR"),
        ];
        let view = contracts(Ok(records), SIGNOUT);
        let first = &view.contracts[0];
        assert_eq!(first.title, "Untitled Contract");
        assert_eq!(first.status.as_str(), "Active");
        assert_eq!(first.signed, "Mar 07, 2024");
        assert_eq!(first.notes, None);
        assert!(matches!(first.file, DisplayValue::Link { .. }));

        let second = &view.contracts[1];
        assert_eq!(second.notes.as_deref(), Some("Sent by HR"));
        assert_eq!(second.file.as_str(), "No file");
        assert!(matches!(
            second.status,
            DisplayValue::Badge {
                tone: StatusTone::Caution,
                ..
            }
        ));
    }

    #[test]
    fn test_contracts_failure_state() {
        let view = contracts(Err(failed("contracts")), SIGNOUT);
        assert_eq!(view.error.as_deref(), Some("Contracts fetch failed (500)"));
    }
}
