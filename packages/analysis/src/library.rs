//! Built-in prompt library.
//!
//! A fixture set of curated analysis prompts, injected as immutable data
//! rather than held in module-level mutable state. Hosts list these, let the
//! user pick one, and feed the template into a [`PromptRequest`].
//!
//! [`PromptRequest`]: crate::prompt::PromptRequest

use serde::Serialize;

use crate::prompt::KEYWORD_PLACEHOLDER;

/// A curated, reusable analysis prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptTemplate {
    /// Stable identifier, usable from CLI flags and saved configurations.
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    /// Category the prompt's findings usually land in.
    pub category: &'static str,
    pub template: &'static str,
    /// Submission must be blocked until a keyword is supplied.
    pub requires_keyword: bool,
}

/// The built-in prompt set.
pub fn builtin_prompts() -> Vec<PromptTemplate> {
    vec![
        PromptTemplate {
            id: "schema-audit",
            title: "Schema markup audit",
            description: "Find pages missing structured data that blocks rich results",
            category: "Schema Markup",
            template: "Audit my product and article pages for missing or invalid schema markup and rank the gaps by expected rich-result impact",
            requires_keyword: false,
        },
        PromptTemplate {
            id: "keyword-targeting",
            title: "Keyword targeting review",
            description: "Check how well existing pages target a specific keyword",
            category: "Content Quality",
            template: "Analyze pages for \"{keyword}\" and identify content, title, and heading changes that would improve rankings for it",
            requires_keyword: true,
        },
        PromptTemplate {
            id: "citation-readiness",
            title: "AI citation readiness",
            description: "Surface pages unlikely to be cited by AI answer engines",
            category: "Content Quality",
            template: "Review my top pages for answer-engine citation readiness: direct answers, clear sourcing, and quotable passages",
            requires_keyword: false,
        },
        PromptTemplate {
            id: "internal-links",
            title: "Internal link opportunities",
            description: "Find orphaned pages and weak internal linking",
            category: "Internal Links",
            template: "Identify orphaned or weakly linked pages and suggest internal links from high-authority pages",
            requires_keyword: false,
        },
        PromptTemplate {
            id: "technical-crawl",
            title: "Technical crawl issues",
            description: "Spot indexing and crawlability problems",
            category: "Technical SEO",
            template: "Find technical issues that hurt crawling and indexing: slow pages, broken canonicals, redirect chains, and blocked resources",
            requires_keyword: false,
        },
    ]
}

/// Look up a built-in prompt by id.
pub fn find_prompt(id: &str) -> Option<PromptTemplate> {
    builtin_prompts().into_iter().find(|p| p.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        let prompts = builtin_prompts();
        let mut ids: Vec<_> = prompts.iter().map(|p| p.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), prompts.len());
    }

    #[test]
    fn test_requires_keyword_matches_placeholder() {
        for prompt in builtin_prompts() {
            assert_eq!(
                prompt.requires_keyword,
                prompt.template.contains(KEYWORD_PLACEHOLDER),
                "prompt '{}' flag disagrees with its template",
                prompt.id
            );
        }
    }

    #[test]
    fn test_find_prompt() {
        assert!(find_prompt("schema-audit").is_some());
        assert!(find_prompt("nonexistent").is_none());
    }
}
