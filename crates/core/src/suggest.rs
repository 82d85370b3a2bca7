//! Threshold rules that turn metrics into improvement suggestions.
//!
//! Rules are independent and always evaluated in the same order; several may
//! fire for one page. Output order is rule order, not severity.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::metrics::MetricSet;

/// Pages shorter than this many words get a Content Length suggestion.
pub const MIN_WORD_COUNT: usize = 300;
/// Average sentence length (in words) above which readability suffers.
pub const MAX_AVG_SENTENCE_LENGTH: f64 = 20.0;
/// Pages with fewer internal links than this get an Internal Linking suggestion.
pub const MIN_INTERNAL_LINKS: usize = 2;

/// Area of the page a suggestion is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Content Length")]
    ContentLength,
    Readability,
    Structure,
    #[serde(rename = "Internal Linking")]
    InternalLinking,
    #[serde(rename = "External Linking")]
    ExternalLinking,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Category::ContentLength => "Content Length",
            Category::Readability => "Readability",
            Category::Structure => "Structure",
            Category::InternalLinking => "Internal Linking",
            Category::ExternalLinking => "External Linking",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        };
        f.write_str(label)
    }
}

/// A recommendation triggered by a metric crossing its threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub category: Category,
    pub issue: String,
    pub suggestion: String,
    pub priority: Priority,
}

impl Suggestion {
    fn new(category: Category, issue: &str, suggestion: &str, priority: Priority) -> Self {
        Self { category, issue: issue.to_string(), suggestion: suggestion.to_string(), priority }
    }
}

/// Runs every rule against `metrics`.
pub fn suggest(metrics: &MetricSet) -> Vec<Suggestion> {
    let mut suggestions = Vec::new();

    if metrics.word_count < MIN_WORD_COUNT {
        suggestions.push(Suggestion::new(
            Category::ContentLength,
            "Content is too short",
            "Aim for at least 300 words for better SEO performance.",
            Priority::High,
        ));
    }

    if metrics.avg_sentence_length > MAX_AVG_SENTENCE_LENGTH {
        suggestions.push(Suggestion::new(
            Category::Readability,
            "Sentences are too long",
            "Try to keep average sentence length under 20 words for better readability.",
            Priority::Medium,
        ));
    }

    if metrics.num_headings == 0 {
        suggestions.push(Suggestion::new(
            Category::Structure,
            "No headings found",
            "Add hierarchical headings (H1, H2, etc.) to improve content structure.",
            Priority::High,
        ));
    }

    if metrics.num_internal_links < MIN_INTERNAL_LINKS {
        suggestions.push(Suggestion::new(
            Category::InternalLinking,
            "Few internal links",
            "Add more internal links to improve site structure and SEO.",
            Priority::Medium,
        ));
    }

    if metrics.num_external_links == 0 {
        suggestions.push(Suggestion::new(
            Category::ExternalLinking,
            "No external links",
            "Consider adding relevant external links to authoritative sources.",
            Priority::Low,
        ));
    }

    suggestions
}
