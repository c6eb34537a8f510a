//! Announcements service client

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use url::Url;

use super::extract::pick_announcements;
use super::sheet::{build_client, parse_base};
use super::{Announcement, AnnouncementSource, Result};
use crate::config::PortalConfig;
use crate::error::UpstreamError;

const ANNOUNCEMENTS_PATH: &str = "announcements";

pub struct HttpAnnouncementSource {
    client: Client,
    base_url: Url,
    token: String,
}

impl HttpAnnouncementSource {
    pub fn new(config: &PortalConfig) -> Result<Self> {
        Ok(Self {
            client: build_client(config)?,
            base_url: parse_base(&config.announcements_base_url)?,
            token: config.announcements_token.clone(),
        })
    }

    /// `{base}/api/announcements?email=<email>`
    fn url_for(&self, email: &str) -> Result<Url> {
        let joined = format!(
            "{}/api/announcements",
            self.base_url.as_str().trim_end_matches('/')
        );
        let mut url = parse_base(&joined)?;
        url.query_pairs_mut().append_pair("email", email);
        Ok(url)
    }
}

#[async_trait]
impl AnnouncementSource for HttpAnnouncementSource {
    async fn announcements(&self, email: &str) -> Result<Vec<Announcement>> {
        tracing::debug!("announcements request");

        let response = self
            .client
            .get(self.url_for(email)?)
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|source| {
                tracing::warn!("announcements service unreachable: {}", source);
                UpstreamError::Transport {
                    path: ANNOUNCEMENTS_PATH.to_string(),
                    source,
                }
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            tracing::warn!("announcements service returned {}", status);
            return Err(UpstreamError::Status {
                path: ANNOUNCEMENTS_PATH.to_string(),
                status: status.as_u16(),
            });
        }

        let payload: Value = response.json().await.map_err(|source| {
            tracing::warn!("announcements service sent undecodable body: {}", source);
            UpstreamError::Decode {
                path: ANNOUNCEMENTS_PATH.to_string(),
                source,
            }
        })?;
        Ok(pick_announcements(&payload))
    }
}
