//! PulseSpark AEO Analysis Pipeline
//!
//! Takes a user prompt, calls a remote text-generation function, parses the
//! free-text response into structured findings with a tolerant line
//! grammar, and exposes filtered views over the results.
//!
//! # Design
//!
//! - The remote collaborator is opaque: one prompt in, one text blob out.
//!   The output grammar is advisory; the extractor never fails.
//! - Validation happens before anything leaves the process.
//! - The runner owns the reliability envelope (deadline, one transient
//!   retry, cancellation); implementations of [`TextGenerator`] stay dumb.
//!
//! # Usage
//!
//! ```rust,ignore
//! use analysis::{AnalysisRunner, PromptRequest, ResultsView};
//! use analysis::testing::MockGenerator;
//!
//! let runner = AnalysisRunner::new(MockGenerator::new());
//! let request = PromptRequest::new("Analyze pages for \"{keyword}\"")
//!     .with_keyword("wireless headphones")
//!     .with_context(["include competitor data"]);
//!
//! let mut view = ResultsView::new();
//! view.start_run();
//! match runner.run(&request).await {
//!     Ok(run) => view.complete(run),
//!     Err(_) => view.fail(),
//! }
//! ```
//!
//! # Modules
//!
//! - [`prompt`] - Prompt templates and the request builder
//! - [`library`] - Built-in prompt fixtures
//! - [`traits`] - The [`TextGenerator`] seam
//! - [`pipeline`] - Extraction state machine and run orchestration
//! - [`view`] - Filtered/aggregated result presentation
//! - [`testing`] - Scripted mock generator

pub mod error;
pub mod library;
pub mod pipeline;
pub mod prompt;
pub mod testing;
pub mod traits;
pub mod types;
pub mod view;

#[cfg(feature = "gateway")]
pub mod gateway;

// Re-export core types at crate root
pub use error::{AnalysisError, RemoteError, Result};
pub use library::{builtin_prompts, find_prompt, PromptTemplate};
pub use pipeline::{
    extract_findings, fallback_finding, AnalysisRunner, ExtractorConfig, RunnerConfig,
};
pub use prompt::{BuiltPrompt, PromptRequest, ANALYSIS_PROMPT, KEYWORD_PLACEHOLDER};
pub use traits::TextGenerator;
pub use types::{AnalysisRun, Effort, Finding, Priority};
pub use view::{PriorityCounts, ResultsView, ViewState};

#[cfg(feature = "gateway")]
pub use gateway::GatewayGenerator;
