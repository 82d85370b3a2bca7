use crate::Result;
use crate::record::AnalysisRecord;
use crate::suggest::Suggestion;
use serde::Serialize;

/// Record plus the suggestions it triggers
#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    #[serde(flatten)]
    record: &'a AnalysisRecord,
    suggestions: &'a [Suggestion],
}

/// Configuration for JSON output
#[derive(Debug, Clone)]
pub struct JsonConfig {
    /// Append a `suggestions` array after the record fields
    pub include_suggestions: bool,
    /// Pretty print with 2-space indentation
    pub pretty: bool,
}

impl Default for JsonConfig {
    fn default() -> Self {
        Self { include_suggestions: true, pretty: true }
    }
}

/// JSON formatter for analysis reports
pub struct JsonFormatter {
    config: JsonConfig,
}

impl JsonFormatter {
    pub fn new(config: JsonConfig) -> Self {
        Self { config }
    }

    pub fn render(&self, record: &AnalysisRecord, suggestions: &[Suggestion]) -> Result<String> {
        render_json(record, suggestions, &self.config)
    }
}

/// Render a record (and optionally its suggestions) as JSON
pub fn render_json(record: &AnalysisRecord, suggestions: &[Suggestion], config: &JsonConfig) -> Result<String> {
    let output = if config.include_suggestions {
        let report = JsonReport { record, suggestions };
        if config.pretty { serde_json::to_string_pretty(&report)? } else { serde_json::to_string(&report)? }
    } else if config.pretty {
        serde_json::to_string_pretty(record)?
    } else {
        serde_json::to_string(record)?
    };

    Ok(output)
}
