//! HTTP registration backend for the per-role registration services.

use std::time::Duration;

use async_trait::async_trait;
use autoreg_core::{Role, RolePayload};
use reqwest::header::ACCEPT;
use reqwest::{Client, Url};
use tracing::{debug, info};

use crate::response::{message_field, parse_body, truthy_field};
use crate::{CheckReply, EndpointTable, RegisterReply, RegistrationBackend, SyncError};

impl From<reqwest::Error> for SyncError {
    fn from(err: reqwest::Error) -> Self {
        SyncError::Transport {
            message: err.to_string(),
        }
    }
}

/// reqwest-backed [`RegistrationBackend`].
pub struct HttpBackend {
    client: Client,
    endpoints: EndpointTable,
}

impl HttpBackend {
    /// Create a backend with reqwest's default client settings.
    pub fn new(endpoints: EndpointTable) -> Self {
        Self {
            client: Client::new(),
            endpoints,
        }
    }

    /// Create a backend whose requests fail after `timeout`.
    pub fn with_timeout(endpoints: EndpointTable, timeout: Duration) -> Result<Self, SyncError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoints })
    }

    pub fn endpoints(&self) -> &EndpointTable {
        &self.endpoints
    }

    /// `{check}/{national_id}`, with the id percent-encoded as one path segment.
    fn check_url(&self, role: Role, national_id: &str) -> Result<Url, SyncError> {
        let base = &self.endpoints.for_role(role).check;
        let mut url = parse_url(base)?;
        url.path_segments_mut()
            .map_err(|()| SyncError::InvalidEndpoint {
                url: base.clone(),
                message: "URL cannot have path segments".into(),
            })?
            .pop_if_empty()
            .push(national_id);
        Ok(url)
    }
}

fn parse_url(raw: &str) -> Result<Url, SyncError> {
    Url::parse(raw).map_err(|err| SyncError::InvalidEndpoint {
        url: raw.to_string(),
        message: err.to_string(),
    })
}

#[async_trait]
impl RegistrationBackend for HttpBackend {
    async fn check(&self, role: Role, national_id: &str) -> Result<CheckReply, SyncError> {
        let url = self.check_url(role, national_id)?;

        info!(%role, "checking existing registration");
        debug!(url = %url, "GET");
        let resp = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;
        let status = resp.status();
        let body = parse_body(&resp.text().await.unwrap_or_default());
        debug!(%status, %body, "check response");

        if !status.is_success() {
            return Err(SyncError::Server {
                status: status.as_u16(),
                message: message_field(&body).unwrap_or_else(|| status.to_string()),
            });
        }

        let exists = truthy_field(&body, "exists");
        info!(%role, exists, "check complete");
        Ok(CheckReply { exists })
    }

    async fn register(&self, payload: &RolePayload) -> Result<RegisterReply, SyncError> {
        let role = payload.role;
        let url = parse_url(&self.endpoints.for_role(role).register)?;

        info!(%role, url = %url, "registering");
        let resp = self
            .client
            .post(url)
            .header(ACCEPT, "application/json")
            .json(payload)
            .send()
            .await?;
        let status = resp.status();
        let body = parse_body(&resp.text().await.unwrap_or_default());
        debug!(%status, %body, "register response");

        let message = message_field(&body);
        if !status.is_success() {
            return Err(SyncError::Server {
                status: status.as_u16(),
                message: message.unwrap_or_else(|| status.as_u16().to_string()),
            });
        }

        let success = truthy_field(&body, "success");
        info!(%role, success, "register complete");
        Ok(RegisterReply { success, message })
    }
}
