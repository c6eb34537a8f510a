//! Page schemas: labels, alias spellings and formats for each view.

use super::{ContextField, FieldSource, FieldSpec};
use crate::format::{FormatKind, PLACEHOLDER};

pub const FULL_NAME: &[&str] = &["full_name", "full name", "name"];
pub const PAY_DATE: &[&str] = &["pay_date", "pay date", "payDate"];
pub const PERIOD_START: &[&str] = &["period_start", "period start", "periodStart"];
pub const PERIOD_END: &[&str] = &["period_end", "period end", "periodEnd"];
pub const STATUS: &[&str] = &["status"];
pub const EMAIL: &[&str] = &["email"];

// ---------------------------------------------------------------------------
// Profile
// ---------------------------------------------------------------------------

pub const PROFILE_PERSONAL: &[FieldSpec] = &[
    FieldSpec {
        label: "Full name",
        source: FieldSource::FieldOr {
            aliases: FULL_NAME,
            format: FormatKind::Generic,
            fallback: ContextField::DisplayName,
        },
    },
    FieldSpec {
        label: "Email",
        source: FieldSource::Context(ContextField::Email),
    },
    FieldSpec::field(
        "DOB",
        &["date_of_birth", "date of birth", "dob"],
        FormatKind::Date,
    ),
    FieldSpec::field(
        "Mobile",
        &[
            "mobile_number",
            "mobile number",
            "mobile",
            "phone",
            "contact",
        ],
        FormatKind::Generic,
    ),
    FieldSpec::field("Address", &["address"], FormatKind::Generic),
];

pub const PROFILE_WORK: &[FieldSpec] = &[
    FieldSpec::field("Status", STATUS, FormatKind::Generic),
    FieldSpec::field("Client", &["client"], FormatKind::Generic),
    FieldSpec::field("Rate", &["rate"], FormatKind::Generic),
    FieldSpec::field("Start Date", &["start_date", "start date"], FormatKind::Date),
    FieldSpec::field(
        "Payment method",
        &["payment_method", "payment method"],
        FormatKind::Generic,
    ),
];

// ---------------------------------------------------------------------------
// Payroll
// ---------------------------------------------------------------------------

/// One line of the payroll history list.
pub const PAYROLL_ROW: &[FieldSpec] = &[
    FieldSpec {
        label: "Pay period",
        source: FieldSource::Period {
            start: PERIOD_START,
            end: PERIOD_END,
        },
    },
    FieldSpec::field("Status", STATUS, FormatKind::PayrollStatus),
];

pub const PAYROLL_SUMMARY: &[FieldSpec] = &[
    FieldSpec::field("Position", &["position"], FormatKind::Generic),
    FieldSpec::field("Hours", &["hours"], FormatKind::Generic),
    FieldSpec::field("Rate", &["rate"], FormatKind::Number),
    FieldSpec::field(
        "Conversion rate",
        &[
            "conversion_rate",
            "conversion rate",
            "conversation_rate",
            "conversation rate",
        ],
        FormatKind::Number,
    ),
];

pub const PAYROLL_TOTALS: &[FieldSpec] = &[
    FieldSpec::field("Total", &["total"], FormatKind::Number),
    FieldSpec::field("Total PHP", &["total_php", "total php"], FormatKind::CurrencyPhp),
    FieldSpec::field("Deduction", &["deduction"], FormatKind::CurrencyPhp),
    FieldSpec::field(
        "Net",
        &["total_net", "total net", "net"],
        FormatKind::CurrencyPhp,
    ),
];

pub const PAYROLL_PAYOUT: &[FieldSpec] = &[
    FieldSpec::field("Pay date", &["pay_date", "pay date"], FormatKind::Date),
    FieldSpec {
        label: "File",
        source: FieldSource::Link {
            aliases: &["file_url", "file url"],
            label: "Open file",
            missing: PLACEHOLDER,
        },
    },
    FieldSpec::field("Notes", &["notes"], FormatKind::Generic),
];

// ---------------------------------------------------------------------------
// Contracts
// ---------------------------------------------------------------------------

pub const CONTRACT_ROW: &[FieldSpec] = &[
    FieldSpec {
        label: "Title",
        source: FieldSource::FieldOrText {
            aliases: &["title"],
            format: FormatKind::Generic,
            default: "Untitled Contract",
        },
    },
    FieldSpec {
        label: "Status",
        source: FieldSource::FieldOrText {
            aliases: STATUS,
            format: FormatKind::ContractStatus,
            default: "Active",
        },
    },
    FieldSpec::field(
        "Signed",
        &["signed_date", "signed date"],
        FormatKind::ShortDate,
    ),
    FieldSpec::field("Notes", &["notes"], FormatKind::Generic),
    FieldSpec {
        label: "File",
        source: FieldSource::Link {
            aliases: &["file_url", "file url"],
            label: "Open",
            missing: "No file",
        },
    },
];
