//! Error types for the portal
//!
//! Upstream faults are absorbed into page states (an "unavailable" card or a
//! denied redirect) and never reach the HTTP layer as errors. `PortalError`
//! only surfaces for faults in the portal itself, such as template rendering.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Failure talking to the spreadsheet API or the announcements service.
#[derive(Error, Debug)]
pub enum UpstreamError {
    #[error("upstream returned HTTP {status} for '{path}'")]
    Status { path: String, status: u16 },

    #[error("request for '{path}' failed: {source}")]
    Transport {
        path: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("response for '{path}' was not valid JSON: {source}")]
    Decode {
        path: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("invalid upstream base URL '{url}': {source}")]
    BaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl UpstreamError {
    /// Short user-facing line, e.g. `Payroll fetch failed (500)`.
    pub fn page_message(&self, what: &str) -> String {
        match self {
            UpstreamError::Status { status, .. } => format!("{what} fetch failed ({status})"),
            UpstreamError::Decode { .. } => format!("{what} fetch failed (unreadable response)"),
            _ => format!("{what} fetch failed (service unreachable)"),
        }
    }
}

/// Faults inside the portal itself.
#[derive(Error, Debug)]
pub enum PortalError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error("template registration failed: {0}")]
    Template(#[from] Box<handlebars::TemplateError>),

    #[error("page render failed: {0}")]
    Render(#[from] handlebars::RenderError),
}

impl From<handlebars::TemplateError> for PortalError {
    fn from(error: handlebars::TemplateError) -> Self {
        PortalError::Template(Box::new(error))
    }
}

pub type Result<T> = std::result::Result<T, PortalError>;

impl IntoResponse for PortalError {
    fn into_response(self) -> Response {
        tracing::error!("request failed: {}", self);
        let status = match self {
            PortalError::Upstream(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, "Something went wrong rendering this page.").into_response()
    }
}
