//! HTTP/JSON clients for the backend services.

pub mod address;
pub mod convert;
pub mod organization;
pub mod scangroup;
pub mod user;
pub mod wire;

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::config::BackendConfig;
use crate::errors::{with_retry, ConsoleError, RetryConfig};

pub use address::AddressClient;
pub use organization::OrganizationClient;
pub use scangroup::ScanGroupClient;
pub use user::UserClient;

/// Shared transport for one backend service.
#[derive(Debug, Clone)]
pub struct BackendClient {
    client: Client,
    base_url: String,
    token: Option<String>,
    retry: RetryConfig,
}

impl BackendClient {
    pub fn new(base_url: &str, config: &BackendConfig) -> Result<Self, ConsoleError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ConsoleError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
            retry: config.retry.clone(),
        })
    }

    /// POST `body` to `path` and decode the JSON answer, retrying transient failures.
    pub async fn call<B, R>(&self, operation: &str, path: &str, body: &B) -> Result<R, ConsoleError>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        with_retry(operation, &self.retry, || self.send(&url, body)).await
    }

    async fn send<B, R>(&self, url: &str, body: &B) -> Result<R, ConsoleError>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        let mut request = self.client.post(url).json(body);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let resp = request.send().await?;
        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(ConsoleError::from_backend_status(status.as_u16(), text));
        }

        debug!(url = %url, status = status.as_u16(), "Backend call succeeded");
        resp.json::<R>()
            .await
            .map_err(|e| ConsoleError::Rejected(format!("Failed to decode backend response: {}", e)))
    }
}
