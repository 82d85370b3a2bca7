//! Error types for SEO audit operations.
//!
//! This module defines the main error type [`AuditError`] which tags every
//! failure the pipeline can hit: fetching, parsing, persistence and the
//! occasional unexpected condition.
//!
//! # Example
//!
//! ```rust
//! use seo_audit_core::{AuditError, Result};
//!
//! fn require_html(html: &str) -> Result<&str> {
//!     if html.trim().is_empty() {
//!         return Err(AuditError::ParseFailed("empty document".to_string()));
//!     }
//!     Ok(html)
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for audit operations.
///
/// The `Display` text of each variant is the message shown to the operator
/// next to the URL that failed. A failed analysis never produces a record.
///
/// # Example
///
/// ```rust
/// use seo_audit_core::{AuditError, Auditor};
///
/// let auditor = Auditor::default();
/// match auditor.analyze_html("<p>Hello</p>", "not a url") {
///     Ok(record) => println!("{} words", record.metrics.word_count),
///     Err(AuditError::InvalidUrl(msg)) => println!("bad url: {}", msg),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Error, Debug)]
pub enum AuditError {
    /// HTTP request errors from reqwest.
    ///
    /// Wraps DNS failures, refused connections, TLS problems and body
    /// read errors.
    #[cfg(feature = "fetch")]
    #[error("Fetch failed: {0}")]
    FetchFailed(#[from] reqwest::Error),

    /// Request timeout.
    #[error("Request timed out after {timeout} seconds")]
    Timeout { timeout: u64 },

    /// Invalid URL provided.
    ///
    /// Returned when a URL cannot be parsed or carries no `http(s)://host`
    /// portion to classify links against.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// HTML or record parsing errors.
    #[error("Failed to parse: {0}")]
    ParseFailed(String),

    /// File not found.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// File I/O errors while reading inputs or writing results.
    #[error("Failed to write to file: {0}")]
    WriteError(#[from] std::io::Error),

    /// JSON encoding or decoding of an analysis record failed.
    #[error("JSON error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Anything the other variants don't describe.
    #[error("{0}")]
    Unknown(String),
}

/// Result type alias for AuditError.
pub type Result<T> = std::result::Result<T, AuditError>;
