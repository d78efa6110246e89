/// Network retrieval of the content page

use std::time::Duration;
use async_trait::async_trait;
use reqwest::header::USER_AGENT;

use crate::config::AppConfig;
use crate::content::FetchError;

/// Anything that can hand back the raw content page
#[async_trait]
pub trait ContentSource: Send + Sync {
    async fn fetch_page(&self) -> Result<String, FetchError>;
}

/// HTTP client for the content page: one GET, fixed URL, fixed `User-Agent`
pub struct HttpContentSource {
    client: reqwest::Client,
    url: String,
    user_agent: String,
}

impl HttpContentSource {
    /// Build a client whose requests time out after `timeout`
    pub fn new(
        url: impl Into<String>,
        user_agent: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, url, user_agent))
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, FetchError> {
        Self::new(
            config.content_url.clone(),
            config.user_agent.clone(),
            config.request_timeout,
        )
    }

    /// Reuse an existing [`reqwest::Client`]
    pub fn with_client(
        client: reqwest::Client,
        url: impl Into<String>,
        user_agent: impl Into<String>,
    ) -> Self {
        Self {
            client,
            url: url.into(),
            user_agent: user_agent.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ContentSource for HttpContentSource {
    async fn fetch_page(&self) -> Result<String, FetchError> {
        let response = self
            .client
            .get(&self.url)
            .header(USER_AGENT, &self.user_agent)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status { status: status.as_u16() });
        }

        Ok(response.text().await?)
    }
}
