//! AnalysisRun - one complete invocation of the pipeline and its results.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::finding::Finding;

/// Results of one prompt -> text -> findings invocation.
///
/// Immutable after creation and held only in memory for the lifetime of the
/// view; there is no persistence layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRun {
    pub id: Uuid,

    /// The keyword-substituted user prompt this run was built from.
    pub prompt: String,

    pub timestamp: DateTime<Utc>,

    /// Findings in extraction order.
    pub findings: Vec<Finding>,

    /// Human-readable completion summary.
    pub summary: String,

    /// Pages-scanned figure reported alongside the run.
    pub total_pages: u32,

    /// Wall-clock duration reported alongside the run.
    pub completion_time: String,
}

impl AnalysisRun {
    /// Assemble a run from extracted findings.
    pub fn new(
        prompt: impl Into<String>,
        findings: Vec<Finding>,
        total_pages: u32,
        completion_time: impl Into<String>,
    ) -> Self {
        let summary = format!(
            "Analysis completed successfully. Found {} optimization opportunities across your website.",
            findings.len()
        );

        Self {
            id: Uuid::new_v4(),
            prompt: prompt.into(),
            timestamp: Utc::now(),
            findings,
            summary,
            total_pages,
            completion_time: completion_time.into(),
        }
    }
}
