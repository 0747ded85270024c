//! Findings extractor - parse free text into structured findings.
//!
//! The remote collaborator is instructed to answer with one field per line
//! (`Page Title: ...`, `URL: ...`, ...) but the grammar is advisory. This
//! module is the tolerant side of that contract: a line-oriented state
//! machine that keeps what matches, ignores everything else, and never
//! fails.
//!
//! A record opens at a `Page Title:` line and closes when the next
//! `Page Title:` line appears or input ends; there is no explicit record
//! separator. Field lines seen before the first `Page Title:` accumulate
//! into the first record.

use tracing::{debug, warn};

use crate::types::finding::{defaults, Effort, Finding, Priority};

// Recognized line prefixes. Matching is case-sensitive and positional: the
// prefix must start the raw line, so indented or bulleted copies of a field
// line are commentary.
const PAGE_TITLE: &str = "Page Title:";
const URL: &str = "URL:";
const ISSUE: &str = "Issue:";
const PRIORITY: &str = "Priority:";
const CATEGORY: &str = "Category:";
const IMPACT: &str = "Impact:";
const EFFORT: &str = "Effort:";
const IMPROVEMENT: &str = "Improvement:";

/// Extraction behavior knobs.
#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    /// Synthesize one plausible finding when the grammar matched nothing.
    ///
    /// The product never shows an empty results list; hosts that prefer an
    /// honest empty state over a fabricated card can turn this off.
    pub fallback_on_empty: bool,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            fallback_on_empty: true,
        }
    }
}

/// Partial record being accumulated while its block is open.
#[derive(Debug, Default)]
struct OpenBlock {
    page_title: Option<String>,
    page_url: Option<String>,
    suggestion: Option<String>,
    priority: Option<Priority>,
    category: Option<String>,
    impact: Option<String>,
    effort: Option<Effort>,
    estimated_improvement: Option<String>,
}

impl OpenBlock {
    /// A block is open once its title marker has been observed.
    fn is_open(&self) -> bool {
        self.page_title.is_some()
    }

    /// Close the block into a finding, back-filling defaults for anything
    /// the text never provided.
    fn close(self, id: u32) -> Finding {
        Finding {
            id,
            page_url: self
                .page_url
                .unwrap_or_else(|| defaults::PAGE_URL.to_string()),
            page_title: self
                .page_title
                .unwrap_or_else(|| defaults::PAGE_TITLE.to_string()),
            suggestion: self
                .suggestion
                .unwrap_or_else(|| defaults::SUGGESTION.to_string()),
            priority: self.priority.unwrap_or_default(),
            category: self
                .category
                .unwrap_or_else(|| defaults::CATEGORY.to_string()),
            impact: self.impact.unwrap_or_else(|| defaults::IMPACT.to_string()),
            effort: self.effort.unwrap_or_default(),
            estimated_improvement: self.estimated_improvement,
        }
    }
}

/// Value of a field line, trimmed; `None` when the prefix doesn't match.
fn field<'a>(line: &'a str, prefix: &str) -> Option<&'a str> {
    line.strip_prefix(prefix).map(str::trim)
}

/// An empty value means "not provided"; the default applies at close.
fn provided(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

/// The synthetic finding shown when extraction yields nothing.
pub fn fallback_finding() -> Finding {
    Finding {
        id: 1,
        page_url: "/products/wireless-headphones".to_string(),
        page_title: "Premium Wireless Headphones".to_string(),
        suggestion:
            "Add Product schema markup to improve search visibility and enable rich snippets"
                .to_string(),
        priority: Priority::High,
        category: "Schema Markup".to_string(),
        impact: "Rich snippets can increase CTR by 15-30%".to_string(),
        effort: Effort::Moderate,
        estimated_improvement: Some("20-25%".to_string()),
    }
}

/// Extract an ordered list of findings from raw response text.
///
/// Always returns a list: unrecognized lines are skipped, malformed blocks
/// are back-filled with defaults, and an empty result is replaced by the
/// fallback finding unless the config says otherwise.
pub fn extract_findings(text: &str, config: &ExtractorConfig) -> Vec<Finding> {
    let mut findings = Vec::new();
    let mut block = OpenBlock::default();
    let mut next_id = 1u32;

    for line in text.lines() {
        if let Some(value) = field(line, PAGE_TITLE) {
            if block.is_open() {
                findings.push(std::mem::take(&mut block).close(next_id));
                next_id += 1;
            }
            // A title-less marker leaves the block un-opened; any fields
            // that follow attach to the next real title.
            block.page_title = provided(value);
        } else if let Some(value) = field(line, URL) {
            block.page_url = provided(value);
        } else if let Some(value) = field(line, ISSUE) {
            block.suggestion = provided(value);
        } else if let Some(value) = field(line, PRIORITY) {
            block.priority = Some(Priority::parse_or_default(value));
        } else if let Some(value) = field(line, CATEGORY) {
            block.category = provided(value);
        } else if let Some(value) = field(line, IMPACT) {
            block.impact = provided(value);
        } else if let Some(value) = field(line, EFFORT) {
            block.effort = Some(Effort::parse_or_default(value));
        } else if let Some(value) = field(line, IMPROVEMENT) {
            block.estimated_improvement = provided(value);
        }
        // Everything else is commentary; skip.
    }

    if block.is_open() {
        findings.push(block.close(next_id));
    }

    if findings.is_empty() && config.fallback_on_empty {
        warn!("no findings matched the response grammar; substituting fallback");
        findings.push(fallback_finding());
    } else {
        debug!(count = findings.len(), "extracted findings");
    }

    findings
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(text: &str) -> Vec<Finding> {
        extract_findings(text, &ExtractorConfig::default())
    }

    #[test]
    fn test_scenario_b_single_block() {
        let findings = extract("Page Title: Home\nURL: /\nIssue: slow\nPriority: HIGH\n");

        assert_eq!(findings.len(), 1);
        let f = &findings[0];
        assert_eq!(f.id, 1);
        assert_eq!(f.page_title, "Home");
        assert_eq!(f.page_url, "/");
        assert_eq!(f.suggestion, "slow");
        assert_eq!(f.priority, Priority::High);
        // Missing fields get defaults
        assert_eq!(f.category, defaults::CATEGORY);
        assert_eq!(f.impact, defaults::IMPACT);
        assert_eq!(f.effort, Effort::Moderate);
        assert_eq!(f.estimated_improvement, None);
    }

    #[test]
    fn test_scenario_c_no_markers_yields_fallback() {
        let findings = extract("random unrelated text with no markers");

        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0], fallback_finding());
    }

    #[test]
    fn test_scenario_d_back_to_back_blocks() {
        let findings = extract(
            "Page Title: A\nURL: /a\nIssue: first\nPage Title: B\nURL: /b\nIssue: second\n",
        );

        assert_eq!(findings.len(), 2);
        assert_eq!(findings[0].page_title, "A");
        assert_eq!(findings[0].suggestion, "first");
        assert_eq!(findings[1].page_title, "B");
        assert_eq!(findings[1].suggestion, "second");
        // First block closed exactly at the second marker: nothing from B leaked in
        assert_eq!(findings[0].page_url, "/a");
    }

    #[test]
    fn test_missing_priority_defaults_to_medium() {
        let findings = extract("Page Title: Home\nURL: /\nIssue: slow\n");
        assert_eq!(findings[0].priority, Priority::Medium);
    }

    #[test]
    fn test_unrecognized_priority_defaults_to_medium() {
        let findings = extract("Page Title: Home\nPriority: critical\n");
        assert_eq!(findings[0].priority, Priority::Medium);
    }

    #[test]
    fn test_ids_are_sequential_in_emission_order() {
        let findings = extract("Page Title: A\nPage Title: B\nPage Title: C\n");
        let ids: Vec<_> = findings.iter().map(|f| f.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_bare_title_at_eof_still_emits() {
        let findings = extract("Page Title: Lonely");

        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].page_title, "Lonely");
        assert_eq!(findings[0].page_url, defaults::PAGE_URL);
        assert_eq!(findings[0].suggestion, defaults::SUGGESTION);
    }

    #[test]
    fn test_commentary_and_blank_lines_ignored() {
        let text = "Here are your findings:\n\n\
                    Page Title: Home\n\
                    - a markdown bullet\n\
                    URL: /\n\n\
                    Hope this helps!\n";
        let findings = extract(text);

        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].page_url, "/");
    }

    #[test]
    fn test_indented_marker_is_commentary() {
        // Prefix matching is positional, matching the product's behavior
        let findings = extract("Page Title: Real\n  Page Title: Indented\n");

        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].page_title, "Real");
    }

    #[test]
    fn test_fields_before_first_title_attach_to_first_record() {
        let findings = extract("URL: /early\nPage Title: Home\nIssue: slow\n");

        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].page_url, "/early");
        assert_eq!(findings[0].page_title, "Home");
    }

    #[test]
    fn test_values_are_trimmed() {
        let findings = extract("Page Title:    Padded Title   \nURL:  /padded  \n");
        assert_eq!(findings[0].page_title, "Padded Title");
        assert_eq!(findings[0].page_url, "/padded");
    }

    #[test]
    fn test_effort_and_improvement_fields() {
        let findings = extract(
            "Page Title: Home\nEffort: QUICK\nImprovement: 20-25%\nPage Title: Next\nEffort: impossible\nImprovement:\n",
        );

        assert_eq!(findings[0].effort, Effort::Quick);
        assert_eq!(findings[0].estimated_improvement.as_deref(), Some("20-25%"));
        assert_eq!(findings[1].effort, Effort::Moderate);
        assert_eq!(findings[1].estimated_improvement, None);
    }

    #[test]
    fn test_empty_input_yields_fallback() {
        assert_eq!(extract("").len(), 1);
        assert_eq!(extract("   \n\n  ").len(), 1);
    }

    #[test]
    fn test_fallback_can_be_disabled() {
        let config = ExtractorConfig {
            fallback_on_empty: false,
        };
        assert!(extract_findings("no markers here", &config).is_empty());
    }

    #[test]
    fn test_empty_title_marker_does_not_open_a_block() {
        // The empty marker closes "Real"; the URL after it attaches to
        // the next real title, and nothing dangling is emitted at EOF
        let findings =
            extract("Page Title: Real\nPage Title:\nURL: /stray\nPage Title: Next\n");

        assert_eq!(findings.len(), 2);
        assert_eq!(findings[0].page_title, "Real");
        assert_eq!(findings[1].page_title, "Next");
        assert_eq!(findings[1].page_url, "/stray");
    }

    #[test]
    fn test_empty_field_value_falls_back_to_default() {
        let findings = extract("Page Title: Home\nURL:\nIssue:\n");

        assert_eq!(findings[0].page_url, defaults::PAGE_URL);
        assert_eq!(findings[0].suggestion, defaults::SUGGESTION);
    }

    #[test]
    fn test_case_sensitive_prefixes() {
        // "page title:" is not the marker; with no marker at all, fallback fires
        let findings = extract("page title: lowercase\nurl: /\n");
        assert_eq!(findings[0], fallback_finding());
    }

    mod roundtrip {
        use super::*;
        use proptest::prelude::*;

        /// A value safe to embed on a single grammar line: non-empty,
        /// no newlines, no surrounding whitespace, and not itself a
        /// field marker.
        fn field_value() -> impl Strategy<Value = String> {
            "[a-zA-Z0-9][a-zA-Z0-9 ,.%/-]{0,30}[a-zA-Z0-9%]"
                .prop_map(|s| s.trim().to_string())
        }

        prop_compose! {
            fn arb_record()(
                title in field_value(),
                url in field_value(),
                suggestion in field_value(),
                priority in prop_oneof![
                    Just(Priority::High),
                    Just(Priority::Medium),
                    Just(Priority::Low)
                ],
                category in field_value(),
                impact in field_value(),
                effort in prop_oneof![
                    Just(Effort::Quick),
                    Just(Effort::Moderate),
                    Just(Effort::Complex)
                ],
                improvement in field_value(),
            ) -> Finding {
                Finding {
                    id: 0,
                    page_url: url,
                    page_title: title,
                    suggestion,
                    priority,
                    category,
                    impact,
                    effort,
                    estimated_improvement: Some(improvement),
                }
            }
        }

        fn serialize(finding: &Finding) -> String {
            format!(
                "Page Title: {}\nURL: {}\nIssue: {}\nPriority: {}\nCategory: {}\nImpact: {}\nEffort: {}\nImprovement: {}\n",
                finding.page_title,
                finding.page_url,
                finding.suggestion,
                finding.priority,
                finding.category,
                finding.impact,
                finding.effort,
                finding.estimated_improvement.as_deref().unwrap(),
            )
        }

        proptest! {
            #[test]
            fn grammar_roundtrip(records in prop::collection::vec(arb_record(), 1..6)) {
                let originals: Vec<Finding> = records
                    .into_iter()
                    .enumerate()
                    .map(|(i, mut f)| {
                        f.id = i as u32 + 1;
                        f
                    })
                    .collect();

                let text: String = originals.iter().map(serialize).collect();
                let extracted = extract_findings(&text, &ExtractorConfig::default());

                prop_assert_eq!(&extracted, &originals);
            }
        }
    }
}
