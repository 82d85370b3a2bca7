use crate::record::{AnalysisRecord, LinkRef};
use crate::suggest::Suggestion;

/// Configuration for the plain text report
#[derive(Debug, Clone)]
pub struct TextConfig {
    /// List individual links under the link counts
    pub show_links: bool,

    /// Maximum links listed per side (0 = no limit)
    pub max_links: usize,

    /// Width of the section rules
    pub rule_width: usize,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self { show_links: true, max_links: 0, rule_width: 60 }
    }
}

/// Plain text formatter for analysis reports
pub struct TextFormatter {
    config: TextConfig,
}

impl TextFormatter {
    pub fn new(config: TextConfig) -> Self {
        Self { config }
    }

    /// Render a record and its suggestions
    pub fn render(&self, record: &AnalysisRecord, suggestions: &[Suggestion]) -> String {
        render_text(record, suggestions, &self.config)
    }
}

/// Render a human-readable report for one analyzed page
pub fn render_text(record: &AnalysisRecord, suggestions: &[Suggestion], config: &TextConfig) -> String {
    let mut output = String::new();
    let title = format!("Analysis for: {}", record.url);
    output.push_str(&title);
    output.push('\n');
    output.push_str(&"=".repeat(title.chars().count()));
    output.push_str("\n\n");

    let metrics = &record.metrics;
    output.push_str(&format!("Word Count:          {}\n", metrics.word_count));
    output.push_str(&format!("Avg Sentence Length: {:.1}\n", metrics.avg_sentence_length));
    output.push_str(&format!("Number of Headings:  {}\n", metrics.num_headings));

    if !record.headings.is_empty() {
        push_section(&mut output, "Headings", config);
        for heading in &record.headings {
            output.push_str(&format!("- {}\n", heading));
        }
    }

    push_section(&mut output, "Top Keywords", config);
    if record.top_keywords.is_empty() {
        output.push_str("(none)\n");
    } else {
        let width = record.top_keywords.iter().map(|(w, _)| w.chars().count()).max().unwrap_or(0).max(7);
        output.push_str(&format!("{:<width$}  Frequency\n", "Keyword", width = width));
        for (word, count) in record.top_keywords.iter() {
            output.push_str(&format!("{:<width$}  {}\n", word, count, width = width));
        }
    }

    push_section(&mut output, &format!("Internal Links ({})", record.internal_links.len()), config);
    push_links(&mut output, &record.internal_links, config);
    push_section(&mut output, &format!("External Links ({})", record.external_links.len()), config);
    push_links(&mut output, &record.external_links, config);

    push_section(&mut output, "Improvement Suggestions", config);
    if suggestions.is_empty() {
        output.push_str("No issues found.\n");
    }
    for suggestion in suggestions {
        output.push_str(&format!(
            "{}: {} (Priority: {})\n    {}\n",
            suggestion.category, suggestion.issue, suggestion.priority, suggestion.suggestion
        ));
    }

    output.trim_end().to_string()
}

fn push_section(output: &mut String, heading: &str, config: &TextConfig) {
    output.push('\n');
    output.push_str(heading);
    output.push('\n');
    output.push_str(&"-".repeat(config.rule_width.min(heading.chars().count().max(1))));
    output.push('\n');
}

fn push_links(output: &mut String, links: &[LinkRef], config: &TextConfig) {
    if !config.show_links {
        return;
    }
    let limit = if config.max_links == 0 { links.len() } else { config.max_links.min(links.len()) };
    for link in &links[..limit] {
        output.push_str(&format!("- [{}]({})\n", link.text, link.href));
    }
    if limit < links.len() {
        output.push_str(&format!("  ... and {} more\n", links.len() - limit));
    }
}
