//! Spreadsheet API client
//!
//! A single Apps Script style endpoint addressed by query string:
//! `?path=<selector>&email=<email>&key=<shared key>`.

use async_trait::async_trait;
use reqwest::header::{CACHE_CONTROL, PRAGMA};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use url::Url;

use super::extract::{pick_allowlist, pick_contracts, pick_list, pick_record};
use super::{AllowlistEntry, PortalDataSource, Result};
use crate::config::PortalConfig;
use crate::error::UpstreamError;
use crate::records::ExternalRecord;

const PATH_ALLOWED_USERS: &str = "allowed-users";
const PATH_PROFILE: &str = "profile";
const PATH_PAYROLL: &str = "payroll";
const PATH_CONTRACTS: &str = "contracts";

/// Build the shared reqwest client for an upstream.
pub(crate) fn build_client(config: &PortalConfig) -> Result<Client> {
    let mut builder = Client::builder();
    if let Some(timeout) = config.upstream_timeout() {
        builder = builder.timeout(timeout);
    }
    builder.build().map_err(UpstreamError::Client)
}

pub(crate) fn parse_base(url: &str) -> Result<Url> {
    Url::parse(url).map_err(|source| UpstreamError::BaseUrl {
        url: url.to_string(),
        source,
    })
}

pub struct HttpSheetSource {
    client: Client,
    base_url: Url,
    key: String,
}

impl HttpSheetSource {
    pub fn new(config: &PortalConfig) -> Result<Self> {
        Ok(Self {
            client: build_client(config)?,
            base_url: parse_base(&config.sheet_base_url)?,
            key: config.sheet_key.clone(),
        })
    }

    fn url_for(&self, path: &str, email: Option<&str>) -> Url {
        let mut url = self.base_url.clone();
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("path", path);
            if let Some(email) = email {
                query.append_pair("email", email);
            }
            query.append_pair("key", &self.key);
        }
        url
    }

    /// GET one selector and decode the JSON body. Anything but `200` fails.
    async fn fetch(&self, path: &str, email: Option<&str>) -> Result<Value> {
        tracing::debug!("spreadsheet API request: path={}", path);

        let response = self
            .client
            .get(self.url_for(path, email))
            .header(CACHE_CONTROL, "no-cache, no-store")
            .header(PRAGMA, "no-cache")
            .send()
            .await
            .map_err(|source| {
                // The URL carries the shared key.
                let source = source.without_url();
                tracing::warn!("spreadsheet API '{}' unreachable: {}", path, source);
                UpstreamError::Transport {
                    path: path.to_string(),
                    source,
                }
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            tracing::warn!("spreadsheet API '{}' returned {}", path, status);
            return Err(UpstreamError::Status {
                path: path.to_string(),
                status: status.as_u16(),
            });
        }

        response.json::<Value>().await.map_err(|source| {
            let source = source.without_url();
            tracing::warn!("spreadsheet API '{}' sent undecodable body: {}", path, source);
            UpstreamError::Decode {
                path: path.to_string(),
                source,
            }
        })
    }
}

#[async_trait]
impl PortalDataSource for HttpSheetSource {
    async fn allowed_users(&self) -> Result<Vec<AllowlistEntry>> {
        let payload = self.fetch(PATH_ALLOWED_USERS, None).await?;
        Ok(pick_allowlist(&payload))
    }

    async fn profile(&self, email: &str) -> Result<Option<ExternalRecord>> {
        let payload = self.fetch(PATH_PROFILE, Some(email)).await?;
        Ok(pick_record(&payload))
    }

    async fn payroll(&self, email: &str) -> Result<Vec<ExternalRecord>> {
        let payload = self.fetch(PATH_PAYROLL, Some(email)).await?;
        Ok(pick_list(&payload))
    }

    async fn contracts(&self, email: &str) -> Result<Vec<ExternalRecord>> {
        let payload = self.fetch(PATH_CONTRACTS, Some(email)).await?;
        Ok(pick_contracts(&payload))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(base: &str) -> HttpSheetSource {
        HttpSheetSource::new(&PortalConfig::for_upstreams(base, "http://worker.test")).unwrap()
    }

    #[test]
    fn test_url_for_profile_encodes_email_and_key() {
        let src = source("https://script.example/macros/s/abc/exec");
        let url = src.url_for(PATH_PROFILE, Some("ana+ops@example.com"));
        assert_eq!(
            url.as_str(),
            "https://script.example/macros/s/abc/exec?path=profile&email=ana%2Bops%40example.com&key=test-key"
        );
    }

    #[test]
    fn test_url_for_allowlist_has_no_email() {
        let src = source("https://script.example/exec");
        let url = src.url_for(PATH_ALLOWED_USERS, None);
        assert_eq!(url.query(), Some("path=allowed-users&key=test-key"));
    }

    #[test]
    fn test_invalid_base_url_is_reported() {
        let config = PortalConfig::for_upstreams("not a url", "http://worker.test");
        assert!(matches!(
            HttpSheetSource::new(&config),
            Err(UpstreamError::BaseUrl { .. })
        ));
    }
}
