//! Finding - one structured, actionable recommendation extracted from a
//! text-generation response.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default values applied when a block omits a field.
pub mod defaults {
    pub const PAGE_URL: &str = "/unknown";
    pub const PAGE_TITLE: &str = "Unknown Page";
    pub const SUGGESTION: &str = "Optimization needed";
    pub const CATEGORY: &str = "Technical SEO";
    pub const IMPACT: &str = "Moderate impact expected";
}

/// How urgent a finding is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    /// Lenient parse used by the extractor: unrecognized input falls back
    /// to the default rather than failing the record.
    pub fn parse_or_default(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            other => Err(format!("unknown priority: {other}")),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How much work a fix is expected to take.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Effort {
    Quick,
    #[default]
    Moderate,
    Complex,
}

impl Effort {
    /// Lenient parse used by the extractor.
    pub fn parse_or_default(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Quick => "quick",
            Self::Moderate => "moderate",
            Self::Complex => "complex",
        }
    }
}

impl FromStr for Effort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "quick" => Ok(Self::Quick),
            "moderate" => Ok(Self::Moderate),
            "complex" => Ok(Self::Complex),
            other => Err(format!("unknown effort: {other}")),
        }
    }
}

impl fmt::Display for Effort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One structured, actionable recommendation.
///
/// Ids are a 1-based sequence in emission order, local to a single
/// extraction call; they carry no cross-run uniqueness guarantee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    pub id: u32,
    pub page_url: String,
    pub page_title: String,
    pub suggestion: String,
    pub priority: Priority,
    pub category: String,
    pub impact: String,
    pub effort: Effort,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_improvement: Option<String>,
}
