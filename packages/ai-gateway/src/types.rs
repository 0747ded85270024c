//! Request and response types for the gateway wire format.

use serde::{Deserialize, Serialize};

/// Body sent to the analysis function.
///
/// The function takes a single free-form message; any structure the caller
/// wants in the reply has to be asked for inside the message itself.
#[derive(Debug, Clone, Serialize)]
pub struct InvokeRequest {
    pub message: String,
}

impl InvokeRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Body returned by the analysis function.
#[derive(Debug, Clone, Deserialize)]
pub struct InvokeResponse {
    /// Free-text reply. May be empty; callers decide what that means.
    #[serde(default)]
    pub response: String,
}
