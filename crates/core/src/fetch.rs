//! Page fetching from URLs, files, and stdin.
//!
//! One GET per URL, no retries. The body is handed back as text whatever
//! the content type or status code says.

use std::fs;
use std::path::PathBuf;
#[cfg(feature = "fetch")]
use std::time::Duration;

#[cfg(feature = "fetch")]
use reqwest::Client;
#[cfg(feature = "fetch")]
use url::Url;

use crate::{AuditError, Result};

/// HTTP client configuration for fetching web pages.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Request timeout in seconds.
    pub timeout: u64,
    /// Custom User-Agent string.
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self { timeout: 30, user_agent: "Mozilla/5.0 (compatible; seo-audit/0.1)".to_string() }
    }
}

/// Fetches the HTML of a page.
///
/// Performs a single GET request with the client's default redirect policy
/// and returns the body as text. Non-2xx responses are not errors: their
/// body is analyzed like any other page.
#[cfg(feature = "fetch")]
pub async fn fetch_url(url: &str, config: &FetchConfig) -> Result<String> {
    let parsed_url = Url::parse(url).map_err(|e| AuditError::InvalidUrl(format!("{}: {}", url, e)))?;

    if !matches!(parsed_url.scheme(), "http" | "https") {
        return Err(AuditError::InvalidUrl(format!(
            "{}: URL must use http:// or https://",
            url
        )));
    }

    let client = Client::builder()
        .timeout(Duration::from_secs(config.timeout))
        .build()
        .map_err(AuditError::FetchFailed)?;

    tracing::debug!(url = %parsed_url, "fetching page");

    let response = client
        .get(parsed_url)
        .header("User-Agent", &config.user_agent)
        .send()
        .await
        .map_err(|e| {
            if e.is_timeout() { AuditError::Timeout { timeout: config.timeout } } else { AuditError::FetchFailed(e) }
        })?;

    let status = response.status();
    if !status.is_success() {
        tracing::debug!(%status, "non-success status, analyzing body anyway");
    }

    let content = response.text().await?;
    tracing::debug!(bytes = content.len(), "page fetched");

    Ok(content)
}

/// Reads HTML content from a local file.
pub fn fetch_file(path: &str) -> Result<String> {
    let path_buf = PathBuf::from(path);

    if !path_buf.exists() {
        Err(AuditError::FileNotFound(path_buf))
    } else {
        fs::read_to_string(&path_buf).map_err(AuditError::from)
    }
}

/// Reads HTML content from standard input until EOF.
pub fn fetch_stdin() -> Result<String> {
    use std::io::{self, Read};

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).map_err(AuditError::from)?;

    Ok(buffer)
}
