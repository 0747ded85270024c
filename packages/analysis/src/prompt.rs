//! Prompt assembly for analysis runs.
//!
//! Templates are const strings with `{placeholder}` tokens. The builder
//! substitutes the user's keyword into the template, wraps the result in the
//! analysis instruction (which spells out the line grammar the extractor
//! understands), and appends the enabled context options.

use crate::error::{AnalysisError, Result};

/// Placeholder token templates may carry for keyword substitution.
pub const KEYWORD_PLACEHOLDER: &str = "{keyword}";

/// Instruction wrapper sent to the text-generation function.
///
/// The output format section matches the extractor's grammar exactly; the
/// remote side is free to violate it, which is why extraction is tolerant.
pub const ANALYSIS_PROMPT: &str = r#"Perform SEO analysis based on this prompt: "{prompt}"

{context}

Generate realistic SEO analysis findings in this format for each issue found:

Page Title: [Specific page title]
URL: [Page URL like /products/wireless-headphones]
Issue: [Specific SEO issue description]
Priority: [high/medium/low]
Category: [Schema Markup/Technical SEO/Content Quality/Internal Links]
Impact: [Specific impact description]
Effort: [quick/moderate/complex]
Improvement: [Estimated improvement percentage]

Provide 5-8 realistic findings that match the prompt request. Make them specific and actionable."#;

/// Addendum used when no context options are enabled.
const NO_CONTEXT: &str = "No additional context selected";

/// A fully assembled prompt, ready for submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltPrompt {
    /// Keyword-substituted user prompt; recorded on the run.
    pub processed: String,

    /// Full instruction message sent to the generator.
    pub message: String,
}

/// Builder for one analysis prompt.
///
/// Pure function of its inputs; `build` has no side effects and performs
/// all validation, so nothing invalid ever reaches the remote collaborator.
#[derive(Debug, Clone, Default)]
pub struct PromptRequest {
    template: String,
    keyword: Option<String>,
    context: Vec<String>,
}

impl PromptRequest {
    /// Create a request from a template string.
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            ..Default::default()
        }
    }

    /// Set the keyword substituted for every `{keyword}` occurrence.
    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = Some(keyword.into());
        self
    }

    /// Append enabled context option labels.
    pub fn with_context(mut self, labels: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.context.extend(labels.into_iter().map(|l| l.into()));
        self
    }

    /// Whether this request still needs a keyword before it can build.
    pub fn needs_keyword(&self) -> bool {
        self.template.contains(KEYWORD_PLACEHOLDER)
            && self.keyword.as_deref().map_or(true, |k| k.trim().is_empty())
    }

    /// Assemble the final prompt.
    ///
    /// Fails with a validation error on an empty template, or when the
    /// template carries the `{keyword}` placeholder and no keyword was
    /// supplied; callers must block submission in both cases.
    pub fn build(&self) -> Result<BuiltPrompt> {
        if self.template.trim().is_empty() {
            return Err(AnalysisError::validation("prompt text is empty"));
        }
        if self.needs_keyword() {
            return Err(AnalysisError::validation("missing required keyword"));
        }

        let processed = match self.keyword.as_deref() {
            Some(keyword) => self.template.replace(KEYWORD_PLACEHOLDER, keyword),
            None => self.template.clone(),
        };

        let context_line = if self.context.is_empty() {
            NO_CONTEXT.to_string()
        } else {
            format!("Context to consider: {}", self.context.join(", "))
        };

        let message = ANALYSIS_PROMPT
            .replace("{prompt}", &processed)
            .replace("{context}", &context_line);

        Ok(BuiltPrompt { processed, message })
    }
}
