//! Main audit API.
//!
//! The [`Auditor`] is the service object tying the pipeline together:
//! fetch, parse, extract, measure, and (on request) persist. It is built
//! explicitly from an [`AuditConfig`] and passed around by reference.
//!
//! # Example
//!
//! ```rust,no_run
//! use seo_audit_core::{AuditConfig, Auditor};
//!
//! # #[tokio::main]
//! # async fn main() -> seo_audit_core::Result<()> {
//! let auditor = Auditor::new(AuditConfig::builder().timeout(10).build());
//! let record = auditor.analyze_url("https://example.com/article").await?;
//! for suggestion in auditor.suggest(&record) {
//!     println!("{}: {} ({})", suggestion.category, suggestion.issue, suggestion.priority);
//! }
//! let path = auditor.save(&record, false)?;
//! println!("saved to {}", path.display());
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;

use crate::extract::{ExtractConfig, HeadingOrder, LinkMatch, extract_page, page_domain, partition_links};
use crate::fetch::{FetchConfig, fetch_file};
use crate::metrics::{MetricSet, TOP_KEYWORDS, top_keywords};
use crate::parse::Document;
use crate::record::AnalysisRecord;
use crate::store::{DEFAULT_RESULTS_DIR, ResultsStore};
use crate::suggest::{Suggestion, suggest};
use crate::{AuditError, Result};

/// Configuration for the [`Auditor`].
#[derive(Debug, Clone)]
pub struct AuditConfig {
    /// HTTP settings.
    pub fetch: FetchConfig,
    /// Heading order and link classification.
    pub extract: ExtractConfig,
    /// Where saved records go (default: `results`).
    pub results_dir: PathBuf,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            fetch: FetchConfig::default(),
            extract: ExtractConfig::default(),
            results_dir: PathBuf::from(DEFAULT_RESULTS_DIR),
        }
    }
}

impl AuditConfig {
    /// Creates a new builder for AuditConfig.
    ///
    /// # Example
    ///
    /// ```rust
    /// use seo_audit_core::{AuditConfig, HeadingOrder};
    ///
    /// let config = AuditConfig::builder()
    ///     .timeout(5)
    ///     .heading_order(HeadingOrder::Document)
    ///     .results_dir("out")
    ///     .build();
    /// assert_eq!(config.fetch.timeout, 5);
    /// ```
    pub fn builder() -> AuditConfigBuilder {
        AuditConfigBuilder::new()
    }
}

/// Builder for AuditConfig.
pub struct AuditConfigBuilder {
    config: AuditConfig,
}

impl AuditConfigBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self { config: AuditConfig::default() }
    }

    /// Sets the HTTP timeout in seconds.
    pub fn timeout(mut self, secs: u64) -> Self {
        self.config.fetch.timeout = secs;
        self
    }

    /// Sets the User-Agent header.
    pub fn user_agent(mut self, value: impl Into<String>) -> Self {
        self.config.fetch.user_agent = value.into();
        self
    }

    pub fn heading_order(mut self, value: HeadingOrder) -> Self {
        self.config.extract.heading_order = value;
        self
    }

    pub fn link_match(mut self, value: LinkMatch) -> Self {
        self.config.extract.link_match = value;
        self
    }

    /// Sets the directory saved records are written to.
    pub fn results_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.results_dir = dir.into();
        self
    }

    /// Builds the AuditConfig.
    pub fn build(self) -> AuditConfig {
        self.config
    }
}

impl Default for AuditConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of one line of a bulk run.
#[derive(Debug)]
pub struct BulkOutcome {
    /// The trimmed URL as given.
    pub url: String,
    pub result: Result<AnalysisRecord>,
}

/// The audit service.
#[derive(Debug, Clone, Default)]
pub struct Auditor {
    config: AuditConfig,
    store: Option<ResultsStore>,
}

impl Auditor {
    /// Builds an auditor; the results directory is created on first save.
    pub fn new(config: AuditConfig) -> Self {
        Self { config, store: None }
    }

    /// Builds an auditor and creates the results directory up front.
    pub fn open(config: AuditConfig) -> Result<Self> {
        let store = ResultsStore::open(&config.results_dir)?;
        Ok(Self { config, store: Some(store) })
    }

    pub fn config(&self) -> &AuditConfig {
        &self.config
    }

    /// Fetches `url` and analyzes the returned page.
    #[cfg(feature = "fetch")]
    pub async fn analyze_url(&self, url: &str) -> Result<AnalysisRecord> {
        if page_domain(url).is_none() {
            return Err(AuditError::InvalidUrl(format!("{}: no http(s) host to classify links against", url)));
        }
        let html = crate::fetch::fetch_url(url, &self.config.fetch).await?;
        self.analyze_html(&html, url)
    }

    /// Analyzes already-fetched HTML as if it were served from `url`.
    pub fn analyze_html(&self, html: &str, url: &str) -> Result<AnalysisRecord> {
        if page_domain(url).is_none() {
            return Err(AuditError::InvalidUrl(format!("{}: no http(s) host to classify links against", url)));
        }
        self.build_record(html, url.to_string(), Some(url))
    }

    /// Analyzes a local HTML file.
    ///
    /// With a `base_url` the record is filed under that URL and links are
    /// classified against it; without one, the record url is the file path
    /// and every link counts as external.
    pub fn analyze_file(&self, path: &str, base_url: Option<&str>) -> Result<AnalysisRecord> {
        if let Some(base) = base_url
            && page_domain(base).is_none()
        {
            return Err(AuditError::InvalidUrl(format!("{}: base URL needs an http(s) host", base)));
        }
        let html = fetch_file(path)?;
        let record_url = base_url.unwrap_or(path).to_string();
        self.build_record(&html, record_url, base_url)
    }

    /// Analyzes newline-separated URLs one after another.
    ///
    /// Each outcome is handed to `on_outcome` before the next URL is fetched.
    /// Blank lines are skipped and a failed analysis does not stop the run;
    /// only an error returned by `on_outcome` does.
    #[cfg(feature = "fetch")]
    pub async fn analyze_bulk_with<E>(
        &self, urls: &str, mut on_outcome: impl FnMut(BulkOutcome) -> std::result::Result<(), E>,
    ) -> std::result::Result<(), E> {
        for url in urls.lines().map(str::trim).filter(|line| !line.is_empty()) {
            let result = self.analyze_url(url).await;
            if let Err(e) = &result {
                tracing::warn!(url, error = %e, "analysis failed");
            }
            on_outcome(BulkOutcome { url: url.to_string(), result })?;
        }
        Ok(())
    }

    /// Analyzes newline-separated URLs and collects every outcome.
    #[cfg(feature = "fetch")]
    pub async fn analyze_bulk(&self, urls: &str) -> Vec<BulkOutcome> {
        let mut outcomes = Vec::new();
        let Ok(()) = self
            .analyze_bulk_with(urls, |outcome| {
                outcomes.push(outcome);
                Ok::<(), std::convert::Infallible>(())
            })
            .await;
        outcomes
    }

    /// Suggestions for a record.
    pub fn suggest(&self, record: &AnalysisRecord) -> Vec<Suggestion> {
        suggest(&record.metrics)
    }

    /// Persists a record under the configured results directory.
    pub fn save(&self, record: &AnalysisRecord, approved: bool) -> Result<PathBuf> {
        match &self.store {
            Some(store) => store.save(record, approved),
            None => ResultsStore::open(&self.config.results_dir)?.save(record, approved),
        }
    }

    fn build_record(&self, html: &str, record_url: String, page_url: Option<&str>) -> Result<AnalysisRecord> {
        let doc = Document::parse(html)?;
        let content = extract_page(&doc, &self.config.extract)?;
        let (internal, external) = partition_links(content.links, page_url, self.config.extract.link_match);

        let metrics = MetricSet::compute(&content.paragraphs_text, content.headings.len(), internal.len(), external.len());
        let keywords = top_keywords(&content.paragraphs_text, TOP_KEYWORDS);

        tracing::debug!(
            url = %record_url,
            words = metrics.word_count,
            internal = internal.len(),
            external = external.len(),
            "page analyzed"
        );

        Ok(AnalysisRecord::new(record_url, metrics, content.headings, internal, external, keywords))
    }
}
