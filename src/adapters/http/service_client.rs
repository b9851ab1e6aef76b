//! Shared JSON client for the assessment backend.
//!
//! # Configuration
//!
//! ```ignore
//! let config = ServiceClientConfig::new("http://localhost:5000")
//!     .with_timeout(Duration::from_secs(30))
//!     .with_api_key("token");
//!
//! let client = ServiceClient::new(config)?;
//! ```

use reqwest::{Client, RequestBuilder, Response};
use secrecy::{ExposeSecret, Secret};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

/// Connection settings for the assessment backend.
#[derive(Debug, Clone)]
pub struct ServiceClientConfig {
    /// Base URL without trailing slash (default: http://localhost:5000).
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Optional bearer token for deployments behind an authenticating gateway.
    api_key: Option<Secret<String>>,
}

impl ServiceClientConfig {
    /// Creates a configuration for the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(60),
            api_key: None,
        }
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the bearer token.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(Secret::new(api_key.into()));
        self
    }

    fn api_key(&self) -> Option<&str> {
        self.api_key.as_ref().map(|key| key.expose_secret().as_str())
    }
}

impl Default for ServiceClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:5000")
    }
}

/// Transport-neutral description of a failed call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallFailure {
    Timeout { timeout_secs: u64 },
    Transport(String),
    Status { status: u16, body: String },
    Decode(String),
}

/// JSON client bound to one backend.
#[derive(Debug, Clone)]
pub struct ServiceClient {
    config: ServiceClientConfig,
    client: Client,
}

impl ServiceClient {
    /// Builds the underlying HTTP client.
    ///
    /// # Errors
    ///
    /// Fails only if the TLS backend cannot be initialised.
    pub fn new(config: ServiceClientConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &ServiceClientConfig {
        &self.config
    }

    /// Absolute URL for an endpoint path such as `/api/rubrics`.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    /// POSTs `body` as JSON and decodes a JSON reply.
    pub async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R, CallFailure>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let request = self.client.post(self.url(path)).json(body);
        self.execute(request).await
    }

    /// GETs a JSON reply.
    pub async fn get_json<R>(&self, path: &str) -> Result<R, CallFailure>
    where
        R: DeserializeOwned,
    {
        let request = self.client.get(self.url(path));
        self.execute(request).await
    }

    async fn execute<R>(&self, request: RequestBuilder) -> Result<R, CallFailure>
    where
        R: DeserializeOwned,
    {
        let request = match self.config.api_key() {
            Some(key) => request.bearer_auth(key),
            None => request,
        };

        let response = request.send().await.map_err(|e| self.map_transport(e))?;
        let response = self.check_status(response).await?;
        let body = response.text().await.map_err(|e| self.map_transport(e))?;

        serde_json::from_str(&body).map_err(|e| CallFailure::Decode(e.to_string()))
    }

    async fn check_status(&self, response: Response) -> Result<Response, CallFailure> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(CallFailure::Status {
            status: status.as_u16(),
            body,
        })
    }

    fn map_transport(&self, e: reqwest::Error) -> CallFailure {
        if e.is_timeout() {
            CallFailure::Timeout {
                timeout_secs: self.config.timeout.as_secs(),
            }
        } else if e.is_connect() {
            CallFailure::Transport(format!("Connection failed: {}", e))
        } else {
            CallFailure::Transport(e.to_string())
        }
    }
}
