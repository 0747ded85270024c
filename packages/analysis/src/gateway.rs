//! Gateway implementation of the TextGenerator trait.
//!
//! Adapts the `ai-gateway` REST client to the pipeline's generator seam.
//! Enabled with the `gateway` feature.
//!
//! # Example
//!
//! ```rust,ignore
//! use analysis::gateway::GatewayGenerator;
//!
//! let generator = GatewayGenerator::from_env()?;
//! let runner = AnalysisRunner::new(generator);
//! ```

use ai_gateway::{GatewayClient, GatewayError};
use async_trait::async_trait;

use crate::error::RemoteError;
use crate::traits::TextGenerator;

/// TextGenerator backed by the PulseSpark AI gateway.
pub struct GatewayGenerator {
    client: GatewayClient,
}

impl GatewayGenerator {
    /// Wrap an existing gateway client.
    pub fn new(client: GatewayClient) -> Self {
        Self { client }
    }

    /// Create from `PULSE_GATEWAY_URL` / `PULSE_GATEWAY_KEY`.
    pub fn from_env() -> Result<Self, GatewayError> {
        Ok(Self::new(GatewayClient::from_env()?))
    }
}

impl From<GatewayError> for RemoteError {
    fn from(error: GatewayError) -> Self {
        match error {
            GatewayError::Network(_) => RemoteError::Network(Box::new(error)),
            other => RemoteError::Service(other.to_string()),
        }
    }
}

#[async_trait]
impl TextGenerator for GatewayGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, RemoteError> {
        self.client.invoke(prompt).await.map_err(RemoteError::from)
    }
}
