//! Testing utilities including mock implementations.
//!
//! Useful for exercising the pipeline without a live gateway.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration;

use crate::error::RemoteError;
use crate::traits::TextGenerator;

/// Reply the mock serves for one call.
enum ScriptedReply {
    Text(String),
    Error(RemoteError),
}

/// A scripted text generator for tests.
///
/// Serves configured replies in order, records every prompt it receives,
/// and can stall to exercise deadlines and cancellation. Once the script
/// is exhausted it falls back to a small deterministic canned response
/// that follows the findings grammar.
#[derive(Default)]
pub struct MockGenerator {
    script: Arc<Mutex<VecDeque<ScriptedReply>>>,
    calls: Arc<RwLock<Vec<String>>>,
    latency: Option<Duration>,
}

impl MockGenerator {
    /// Create a new mock with default behavior.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a text reply.
    pub fn with_response(self, text: impl Into<String>) -> Self {
        self.script
            .lock()
            .unwrap()
            .push_back(ScriptedReply::Text(text.into()));
        self
    }

    /// Queue a failure.
    pub fn with_error(self, error: RemoteError) -> Self {
        self.script
            .lock()
            .unwrap()
            .push_back(ScriptedReply::Error(error));
        self
    }

    /// Delay every reply, scripted or canned.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Prompts received so far.
    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }

    /// Shared handle to the call log, for assertions after the mock has
    /// been moved into a runner.
    pub fn call_log(&self) -> Arc<RwLock<Vec<String>>> {
        Arc::clone(&self.calls)
    }

    /// Deterministic response used when the script runs dry.
    fn canned_response() -> String {
        "Page Title: Premium Wireless Headphones\n\
         URL: /products/wireless-headphones\n\
         Issue: Missing Product schema markup\n\
         Priority: high\n\
         Category: Schema Markup\n\
         Impact: Rich snippets can increase CTR by 15-30%\n\
         Effort: moderate\n\
         Improvement: 20-25%\n\
         Page Title: Blog Index\n\
         URL: /blog\n\
         Issue: Thin meta descriptions across listing pages\n\
         Priority: medium\n\
         Category: Content Quality\n\
         Impact: Better snippets improve click-through\n\
         Effort: quick\n"
            .to_string()
    }
}

#[async_trait]
impl TextGenerator for MockGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, RemoteError> {
        self.calls.write().unwrap().push(prompt.to_string());

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        match self.script.lock().unwrap().pop_front() {
            Some(ScriptedReply::Text(text)) => Ok(text),
            Some(ScriptedReply::Error(error)) => Err(error),
            None => Ok(Self::canned_response()),
        }
    }
}
