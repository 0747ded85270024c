//! Data types for the analysis pipeline.

pub mod finding;
pub mod run;

pub use finding::{Effort, Finding, Priority};
pub use run::AnalysisRun;
