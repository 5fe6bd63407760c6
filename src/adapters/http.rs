use crate::config::settings::{ApiToken, Settings};
use crate::domain::model::GroupRequest;
use crate::domain::ports::GroupsApi;
use crate::utils::error::{Result, UpsertError};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

pub const GROUPS_PATH: &str = "/v1/groups";

/// `{base_url}/v1/groups`, tolerating a trailing slash on the base.
pub fn groups_endpoint(base_url: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), GROUPS_PATH)
}

/// `PUT /v1/groups` over reqwest with bearer auth.
pub struct HttpGroupsClient {
    client: Client,
    endpoint: String,
    token: ApiToken,
}

impl HttpGroupsClient {
    pub fn new(base_url: &str, token: ApiToken, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            endpoint: groups_endpoint(base_url),
            token,
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Self::new(&settings.base_url, settings.api_token.clone(), settings.timeout)
    }
}

#[async_trait]
impl GroupsApi for HttpGroupsClient {
    async fn put_group(&self, group: &GroupRequest) -> std::result::Result<(), UpsertError> {
        let response = self
            .client
            .put(&self.endpoint)
            .bearer_auth(self.token.expose())
            .json(group)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(UpsertError::Status {
            status: status.as_u16(),
            body,
        })
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }
}
