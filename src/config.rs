//! Portal configuration
//!
//! Built once at startup from CLI flags and environment variables (a `.env`
//! file is loaded first by the binary), then shared behind an `Arc` with
//! every collaborator that talks to an upstream service.

use clap::Parser;
use std::fmt;
use std::time::Duration;

use crate::error::{PortalError, Result};

#[derive(Parser, Clone)]
#[command(name = "portal_server", about = "Employee portal web server")]
pub struct PortalConfig {
    /// Listen address
    #[arg(long, env = "PORTAL_BIND_ADDR", default_value = "0.0.0.0:3000")]
    pub bind_addr: String,

    /// Spreadsheet API endpoint (allowlist, profile, payroll, contracts)
    #[arg(long, env = "APPS_SCRIPT_BASE_URL")]
    pub sheet_base_url: String,

    /// Shared secret sent as `key=` on every spreadsheet API call
    #[arg(long, env = "APPS_SCRIPT_KEY", hide_env_values = true)]
    pub sheet_key: String,

    /// Announcements service base URL
    #[arg(long, env = "WORKER_BASE_URL")]
    pub announcements_base_url: String,

    /// Bearer token for the announcements service
    #[arg(long, env = "WORKER_TOKEN", hide_env_values = true)]
    pub announcements_token: String,

    /// Request header carrying the authenticated email
    #[arg(
        long,
        env = "PORTAL_IDENTITY_EMAIL_HEADER",
        default_value = "x-forwarded-email"
    )]
    pub identity_email_header: String,

    /// Request header carrying the authenticated display name
    #[arg(
        long,
        env = "PORTAL_IDENTITY_NAME_HEADER",
        default_value = "x-forwarded-user"
    )]
    pub identity_name_header: String,

    /// Where the sign-in page sends the user to authenticate
    #[arg(
        long,
        env = "PORTAL_SIGNIN_URL",
        default_value = "/oauth2/start?rd=/dashboard"
    )]
    pub signin_url: String,

    /// Where sign-out links point
    #[arg(
        long,
        env = "PORTAL_SIGNOUT_URL",
        default_value = "/oauth2/sign_out?rd=/signin"
    )]
    pub signout_url: String,

    /// Client-side timeout for upstream calls; unset means none
    #[arg(long, env = "PORTAL_UPSTREAM_TIMEOUT_SECS")]
    pub upstream_timeout_secs: Option<u64>,
}

impl PortalConfig {
    /// Configuration pointing both upstreams at the given base URLs, with
    /// every other field at its default.
    pub fn for_upstreams(
        sheet_base_url: impl Into<String>,
        announcements_base_url: impl Into<String>,
    ) -> Self {
        Self {
            bind_addr: "127.0.0.1:0".to_string(),
            sheet_base_url: sheet_base_url.into(),
            sheet_key: "test-key".to_string(),
            announcements_base_url: announcements_base_url.into(),
            announcements_token: "test-token".to_string(),
            identity_email_header: "x-forwarded-email".to_string(),
            identity_name_header: "x-forwarded-user".to_string(),
            signin_url: "/oauth2/start?rd=/dashboard".to_string(),
            signout_url: "/oauth2/sign_out?rd=/signin".to_string(),
            upstream_timeout_secs: None,
        }
    }

    pub fn upstream_timeout(&self) -> Option<Duration> {
        self.upstream_timeout_secs.map(Duration::from_secs)
    }

    /// Reject settings the portal cannot run with. Clap accepts an empty
    /// environment variable as a value, so blanks are caught here.
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("sheet_base_url", &self.sheet_base_url),
            ("sheet_key", &self.sheet_key),
            ("announcements_base_url", &self.announcements_base_url),
            ("announcements_token", &self.announcements_token),
            ("identity_email_header", &self.identity_email_header),
        ];
        if let Some((name, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(PortalError::Config(format!("{name} must not be blank")));
        }
        if self.upstream_timeout_secs == Some(0) {
            return Err(PortalError::Config(
                "upstream_timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

impl fmt::Debug for PortalConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PortalConfig")
            .field("bind_addr", &self.bind_addr)
            .field("sheet_base_url", &self.sheet_base_url)
            .field("sheet_key", &"<redacted>")
            .field("announcements_base_url", &self.announcements_base_url)
            .field("announcements_token", &"<redacted>")
            .field("identity_email_header", &self.identity_email_header)
            .field("identity_name_header", &self.identity_name_header)
            .field("signin_url", &self.signin_url)
            .field("signout_url", &self.signout_url)
            .field("upstream_timeout_secs", &self.upstream_timeout_secs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_from_args_with_defaults() {
        let config = PortalConfig::try_parse_from([
            "portal_server",
            "--sheet-base-url",
            "https://script.example/exec",
            "--sheet-key",
            "s3cret",
            "--announcements-base-url",
            "https://worker.example",
            "--announcements-token",
            "tok",
        ])
        .unwrap();
        assert_eq!(config.sheet_base_url, "https://script.example/exec");
        assert_eq!(config.identity_email_header, "x-forwarded-email");
        assert_eq!(config.upstream_timeout(), None);
    }

    #[test]
    fn test_timeout_flag() {
        let config = PortalConfig::try_parse_from([
            "portal_server",
            "--sheet-base-url",
            "https://script.example/exec",
            "--sheet-key",
            "k",
            "--announcements-base-url",
            "https://worker.example",
            "--announcements-token",
            "t",
            "--upstream-timeout-secs",
            "15",
        ])
        .unwrap();
        assert_eq!(config.upstream_timeout(), Some(Duration::from_secs(15)));
    }

    #[test]
    fn test_validate_accepts_complete_config() {
        assert!(PortalConfig::for_upstreams("http://a", "http://b").validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_blank_secret() {
        let mut config = PortalConfig::for_upstreams("http://a", "http://b");
        config.sheet_key = "  ".into();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, PortalError::Config(_)));
        assert_eq!(err.to_string(), "configuration error: sheet_key must not be blank");
    }

    #[test]
    fn test_validate_rejects_blank_url_and_zero_timeout() {
        let config = PortalConfig::for_upstreams("http://a", "");
        assert!(matches!(config.validate(), Err(PortalError::Config(_))));

        let mut config = PortalConfig::for_upstreams("http://a", "http://b");
        config.upstream_timeout_secs = Some(0);
        assert!(matches!(config.validate(), Err(PortalError::Config(_))));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let mut config = PortalConfig::for_upstreams("http://a", "http://b");
        config.sheet_key = "super-secret-key".into();
        config.announcements_token = "super-secret-token".into();
        let shown = format!("{:?}", config);
        assert!(!shown.contains("super-secret"));
        assert!(shown.contains("<redacted>"));
    }
}
