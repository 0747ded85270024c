//! TextGenerator trait for the remote text-generation collaborator.

use async_trait::async_trait;

use crate::error::RemoteError;

/// Abstracts the remote text-generation function.
///
/// Implementations wrap a specific transport (the PulseSpark AI gateway, a
/// local model, a scripted mock) and return one unstructured text blob per
/// prompt. No output schema is enforced at this seam; the findings grammar
/// is advisory and the extractor tolerates violations.
///
/// Calls may suspend for a caller-visible duration. Deadlines, retries, and
/// cancellation are the runner's responsibility, not the implementation's.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate a reply for the given prompt.
    async fn generate(&self, prompt: &str) -> Result<String, RemoteError>;
}
