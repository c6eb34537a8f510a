//! Record projection
//!
//! A page describes what it shows as a fixed, ordered list of [`FieldSpec`]s.
//! Projecting a record walks that list in order, resolves each field through
//! its aliases, formats it, and pairs it with the fixed label. Output order is
//! always schema order, whichever aliases happened to match.

pub mod ordering;
pub mod schemas;

pub use ordering::{row_key, row_keys, sort_payroll};

use serde::Serialize;

use crate::format::{format_date, format_value, DisplayValue, FormatKind, PLACEHOLDER};
use crate::records::{resolve, ExternalRecord, RecordValue};

/// Values supplied by the request rather than the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextField {
    Email,
    DisplayName,
}

/// Where a projected value comes from.
#[derive(Debug, Clone, Copy)]
pub enum FieldSource {
    /// A single resolved field.
    Field {
        aliases: &'static [&'static str],
        format: FormatKind,
    },
    /// A resolved field, or a context value when the field is missing/blank.
    FieldOr {
        aliases: &'static [&'static str],
        format: FormatKind,
        fallback: ContextField,
    },
    /// A resolved field (trimmed), or fixed text when it is missing or blank.
    FieldOrText {
        aliases: &'static [&'static str],
        format: FormatKind,
        default: &'static str,
    },
    /// A context value only.
    Context(ContextField),
    /// Two date fields joined as `start → end`.
    Period {
        start: &'static [&'static str],
        end: &'static [&'static str],
    },
    /// A URL field rendered as a link; `missing` shown when there is no URL.
    Link {
        aliases: &'static [&'static str],
        label: &'static str,
        missing: &'static str,
    },
}

/// One row of a page schema.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub label: &'static str,
    pub source: FieldSource,
}

impl FieldSpec {
    pub const fn field(
        label: &'static str,
        aliases: &'static [&'static str],
        format: FormatKind,
    ) -> Self {
        Self {
            label,
            source: FieldSource::Field { aliases, format },
        }
    }
}

/// Request-scoped values available to [`FieldSource::Context`] and friends.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProjectionContext<'a> {
    pub email: Option<&'a str>,
    pub display_name: Option<&'a str>,
}

impl<'a> ProjectionContext<'a> {
    fn get(&self, field: ContextField) -> Option<&'a str> {
        let value = match field {
            ContextField::Email => self.email,
            ContextField::DisplayName => self.display_name,
        };
        value.filter(|v| !v.trim().is_empty())
    }
}

/// A labelled, formatted value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectedField {
    pub label: &'static str,
    pub value: DisplayValue,
}

/// Project `record` through `schema` with no request context.
pub fn project(record: &ExternalRecord, schema: &[FieldSpec]) -> Vec<ProjectedField> {
    project_with(record, schema, &ProjectionContext::default())
}

/// Project `record` through `schema`, filling context-backed fields from `ctx`.
pub fn project_with(
    record: &ExternalRecord,
    schema: &[FieldSpec],
    ctx: &ProjectionContext<'_>,
) -> Vec<ProjectedField> {
    schema
        .iter()
        .map(|spec| ProjectedField {
            label: spec.label,
            value: project_source(record, &spec.source, ctx),
        })
        .collect()
}

fn present(value: Option<&RecordValue>) -> Option<&RecordValue> {
    value.filter(|v| !v.is_blank())
}

fn project_source(
    record: &ExternalRecord,
    source: &FieldSource,
    ctx: &ProjectionContext<'_>,
) -> DisplayValue {
    match *source {
        FieldSource::Field { aliases, format } => format_value(resolve(record, aliases), format),
        FieldSource::FieldOr {
            aliases,
            format,
            fallback,
        } => match present(resolve(record, aliases)) {
            Some(value) => format_value(Some(value), format),
            None => {
                let fallback = ctx.get(fallback).map(RecordValue::from);
                format_value(fallback.as_ref(), format)
            }
        },
        FieldSource::FieldOrText {
            aliases,
            format,
            default,
        } => {
            let text = resolve(record, aliases)
                .map(|v| v.as_text().trim().to_string())
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| default.to_string());
            format_value(Some(&RecordValue::String(text)), format)
        }
        FieldSource::Context(field) => {
            let value = ctx.get(field).map(RecordValue::from);
            format_value(value.as_ref(), FormatKind::Generic)
        }
        FieldSource::Period { start, end } => DisplayValue::text(period_label(record, start, end)),
        FieldSource::Link {
            aliases,
            label,
            missing,
        } => match present(resolve(record, aliases)) {
            Some(url) if !url.as_text().trim().is_empty() => DisplayValue::Link {
                href: url.as_text().trim().to_string(),
                label: label.to_string(),
            },
            _ => DisplayValue::text(missing),
        },
    }
}

/// `start → end` with placeholders for a missing side, or `Pay period —`
/// when both are missing.
pub fn period_label(record: &ExternalRecord, start: &[&str], end: &[&str]) -> String {
    let a = format_date(resolve(record, start));
    let b = format_date(resolve(record, end));
    match (a == PLACEHOLDER, b == PLACEHOLDER) {
        (true, true) => format!("Pay period {PLACEHOLDER}"),
        _ => format!("{a} → {b}"),
    }
}
