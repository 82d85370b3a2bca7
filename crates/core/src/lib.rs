pub mod auditor;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod formatters;
pub mod metrics;
pub mod parse;
pub mod record;
pub mod stopwords;
pub mod store;
pub mod suggest;

pub use auditor::{AuditConfig, AuditConfigBuilder, Auditor, BulkOutcome};
pub use error::{AuditError, Result};
pub use extract::{ExtractConfig, HeadingOrder, LinkMatch, PageContent, extract_page, page_domain, partition_links};
pub use fetch::FetchConfig;
#[cfg(feature = "fetch")]
pub use fetch::fetch_url;
pub use fetch::{fetch_file, fetch_stdin};
pub use formatters::{JsonConfig, JsonFormatter, TextConfig, TextFormatter, render_json, render_text};
pub use metrics::{MetricSet, TOP_KEYWORDS, split_sentences, tokenize, top_keywords, word_count};
pub use parse::Document;
pub use record::{AnalysisRecord, Keywords, LinkRef};
pub use store::{DEFAULT_RESULTS_DIR, ResultsStore, sanitize_filename};
pub use suggest::{Category, Priority, Suggestion, suggest};
