//! Analysis pipeline: prompt -> text -> findings -> run.

pub mod extract;
pub mod runner;

pub use extract::{extract_findings, fallback_finding, ExtractorConfig};
pub use runner::{AnalysisRunner, RunnerConfig};
