//! HTTP surface of the portal

pub mod handlers;
pub mod middleware;
pub mod router;

pub use router::build_router;

use std::sync::Arc;

use crate::config::PortalConfig;
use crate::error::Result;
use crate::identity::{ForwardedHeaderIdentity, IdentityProvider};
use crate::pages::PageRenderer;
use crate::upstream::{AnnouncementSource, HttpAnnouncementSource, HttpSheetSource, PortalDataSource};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<PortalConfig>,
    pub data: Arc<dyn PortalDataSource>,
    pub announcements: Arc<dyn AnnouncementSource>,
    pub identity: Arc<dyn IdentityProvider>,
    pub renderer: Arc<PageRenderer>,
}

impl AppState {
    /// State wired to the real upstream services described by `config`.
    pub fn from_config(config: PortalConfig) -> Result<Self> {
        config.validate()?;
        let data = HttpSheetSource::new(&config)?;
        let announcements = HttpAnnouncementSource::new(&config)?;
        let identity = ForwardedHeaderIdentity::new(
            config.identity_email_header.clone(),
            config.identity_name_header.clone(),
        );
        Ok(Self {
            config: Arc::new(config),
            data: Arc::new(data),
            announcements: Arc::new(announcements),
            identity: Arc::new(identity),
            renderer: Arc::new(PageRenderer::new()?),
        })
    }

    pub fn signout_url(&self) -> &str {
        &self.config.signout_url
    }
}
