//! Pure REST client for the PulseSpark AI gateway
//!
//! A clean, minimal client for the hosted analysis function with no
//! domain-specific logic. One logical operation: send a prompt, get back a
//! free-text reply.
//!
//! # Example
//!
//! ```rust,ignore
//! use ai_gateway::GatewayClient;
//!
//! let client = GatewayClient::from_env()?;
//! let text = client.invoke("Analyze my landing pages").await?;
//! ```

pub mod error;
pub mod types;

pub use error::{GatewayError, Result};
pub use types::{InvokeRequest, InvokeResponse};

use reqwest::Client;
use tracing::{debug, warn};

/// Default function name exposed by the gateway.
pub const DEFAULT_FUNCTION: &str = "ai";

/// Client for the PulseSpark AI gateway.
///
/// The gateway hosts serverless functions under `{base_url}/functions/v1/`;
/// the analysis function accepts `{"message": ...}` and answers
/// `{"response": ...}`.
#[derive(Clone)]
pub struct GatewayClient {
    http_client: Client,
    base_url: String,
    api_key: String,
    function: String,
}

impl GatewayClient {
    /// Create a new gateway client.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
            function: DEFAULT_FUNCTION.to_string(),
        }
    }

    /// Create from environment variables `PULSE_GATEWAY_URL` and
    /// `PULSE_GATEWAY_KEY`.
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("PULSE_GATEWAY_URL")
            .map_err(|_| GatewayError::Config("PULSE_GATEWAY_URL not set".into()))?;
        let api_key = std::env::var("PULSE_GATEWAY_KEY")
            .map_err(|_| GatewayError::Config("PULSE_GATEWAY_KEY not set".into()))?;
        Ok(Self::new(base_url, api_key))
    }

    /// Target a different function (default: `ai`).
    pub fn with_function(mut self, function: impl Into<String>) -> Self {
        self.function = function.into();
        self
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the function name.
    pub fn function(&self) -> &str {
        &self.function
    }

    /// Invoke the analysis function with a prompt.
    ///
    /// Returns the reply text as-is, including an empty string if the
    /// function answered with one.
    pub async fn invoke(&self, prompt: &str) -> Result<String> {
        let start = std::time::Instant::now();
        let url = format!(
            "{}/functions/v1/{}",
            self.base_url.trim_end_matches('/'),
            self.function
        );

        let response = self
            .http_client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("apikey", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&InvokeRequest::new(prompt))
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, function = %self.function, "gateway request failed");
                GatewayError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %error_text, "gateway function error");
            return Err(GatewayError::Api(format!(
                "function '{}' returned {}: {}",
                self.function, status, error_text
            )));
        }

        let body: InvokeResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::Parse(e.to_string()))?;

        debug!(
            function = %self.function,
            duration_ms = start.elapsed().as_millis(),
            response_len = body.response.len(),
            "gateway invoke"
        );

        Ok(body.response)
    }
}
