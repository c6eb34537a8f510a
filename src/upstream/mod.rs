//! Upstream collaborators
//!
//! `PortalDataSource` is the only way pages reach the spreadsheet API and
//! `AnnouncementSource` the only way they reach the announcements service.
//! The HTTP implementations live in [`sheet`] and [`announcements`]; tests
//! substitute in-memory implementations.
//!
//! Every call goes to the upstream fresh: no memoization, no retries.

pub mod announcements;
pub mod extract;
pub mod sheet;

pub use announcements::HttpAnnouncementSource;
pub use sheet::HttpSheetSource;

use async_trait::async_trait;
use serde::Serialize;

use crate::error::UpstreamError;
use crate::records::ExternalRecord;

pub type Result<T> = std::result::Result<T, UpstreamError>;

/// One row of the externally-owned allowlist.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AllowlistEntry {
    pub email: Option<String>,
    pub status: Option<String>,
}

impl AllowlistEntry {
    pub fn new(email: &str, status: Option<&str>) -> Self {
        Self {
            email: Some(email.to_string()),
            status: status.map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Announcement {
    pub message: String,
}

#[async_trait]
pub trait PortalDataSource: Send + Sync {
    /// `path=allowed-users`
    async fn allowed_users(&self) -> Result<Vec<AllowlistEntry>>;

    /// `path=profile`; `Ok(None)` when the payload holds no record.
    async fn profile(&self, email: &str) -> Result<Option<ExternalRecord>>;

    /// `path=payroll`, in upstream order.
    async fn payroll(&self, email: &str) -> Result<Vec<ExternalRecord>>;

    /// `path=contracts`, in upstream order.
    async fn contracts(&self, email: &str) -> Result<Vec<ExternalRecord>>;
}

#[async_trait]
pub trait AnnouncementSource: Send + Sync {
    async fn announcements(&self, email: &str) -> Result<Vec<Announcement>>;
}
