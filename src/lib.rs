//! Hero Portal
//!
//! An allowlist-gated employee portal over a spreadsheet-backed API. Records
//! arrive with free-form field names; the [`records`] resolver finds fields by
//! alias, [`format`] turns raw scalars into display text, and [`projection`]
//! maps records onto fixed per-page schemas. [`gate`] decides admission and
//! [`api`] serves the server-rendered pages.

pub mod api;
pub mod config;
pub mod error;
pub mod format;
pub mod gate;
pub mod identity;
pub mod pages;
pub mod projection;
pub mod records;
pub mod upstream;

pub use api::{build_router, AppState};
pub use config::PortalConfig;
pub use error::{PortalError, UpstreamError};
pub use gate::GateOutcome;
pub use identity::{ForwardedHeaderIdentity, Identity, IdentityProvider};
pub use records::{ExternalRecord, RecordValue};
