//! Result presentation state: view transitions, filters, and counts.
//!
//! `ResultsView` models the host surface's single result slot. There is
//! exactly one writer (the run's own completion path); the view gates
//! re-submission while a run is in flight and keeps the previous results
//! when a run fails.

use indexmap::IndexSet;

use crate::types::finding::{Finding, Priority};
use crate::types::run::AnalysisRun;

/// Per-priority totals, always computed over the full run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PriorityCounts {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl PriorityCounts {
    fn tally(findings: &[Finding]) -> Self {
        let mut counts = Self::default();
        for finding in findings {
            match finding.priority {
                Priority::High => counts.high += 1,
                Priority::Medium => counts.medium += 1,
                Priority::Low => counts.low += 1,
            }
        }
        counts
    }

    pub fn total(&self) -> usize {
        self.high + self.medium + self.low
    }
}

/// What the results surface is currently showing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewState<'a> {
    /// No run performed yet.
    Empty,
    /// A run is in flight; rendering is suspended and re-submission gated.
    Loading,
    /// The latest completed run.
    Populated(&'a AnalysisRun),
}

/// View over the latest analysis run with independent priority and
/// category filters, combined with AND.
#[derive(Debug, Default)]
pub struct ResultsView {
    current: Option<AnalysisRun>,
    running: bool,
    priority_filter: Option<Priority>,
    category_filter: Option<String>,
}

impl ResultsView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ViewState<'_> {
        if self.running {
            ViewState::Loading
        } else if let Some(run) = &self.current {
            ViewState::Populated(run)
        } else {
            ViewState::Empty
        }
    }

    /// Whether a run is in flight.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// The latest completed run, if any.
    pub fn run(&self) -> Option<&AnalysisRun> {
        self.current.as_ref()
    }

    /// Mark a run in flight. Returns false when one is already running;
    /// the caller must not submit another.
    pub fn start_run(&mut self) -> bool {
        if self.running {
            return false;
        }
        self.running = true;
        true
    }

    /// Install a completed run. Filters reset to `all`: category options
    /// are derived per-run, so a stale category filter would silently
    /// hide everything.
    pub fn complete(&mut self, run: AnalysisRun) {
        self.running = false;
        self.current = Some(run);
        self.priority_filter = None;
        self.category_filter = None;
    }

    /// Mark the in-flight run failed. Previous results, if any, remain
    /// displayed unchanged.
    pub fn fail(&mut self) {
        self.running = false;
    }

    /// Filter by priority; `None` means all.
    pub fn set_priority_filter(&mut self, priority: Option<Priority>) {
        self.priority_filter = priority;
    }

    /// Filter by category; `None` means all.
    pub fn set_category_filter(&mut self, category: Option<String>) {
        self.category_filter = category;
    }

    /// Findings passing both filters, in extraction order.
    pub fn visible_findings(&self) -> Vec<&Finding> {
        let Some(run) = &self.current else {
            return Vec::new();
        };

        run.findings
            .iter()
            .filter(|f| {
                self.priority_filter
                    .map_or(true, |p| f.priority == p)
            })
            .filter(|f| {
                self.category_filter
                    .as_deref()
                    .map_or(true, |c| f.category == c)
            })
            .collect()
    }

    /// Per-priority counts over the unfiltered run. Filtering narrows the
    /// visible list, never these totals.
    pub fn priority_counts(&self) -> PriorityCounts {
        self.current
            .as_ref()
            .map(|run| PriorityCounts::tally(&run.findings))
            .unwrap_or_default()
    }

    /// Distinct categories observed across the run, in first-seen order.
    pub fn categories(&self) -> Vec<&str> {
        let Some(run) = &self.current else {
            return Vec::new();
        };

        run.findings
            .iter()
            .map(|f| f.category.as_str())
            .collect::<IndexSet<_>>()
            .into_iter()
            .collect()
    }
}
