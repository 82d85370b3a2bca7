//! Page content extraction and link classification.
//!
//! [`extract_page`] pulls paragraph text, headings and anchors out of a parsed
//! [`Document`]; [`partition_links`] then splits the anchors into internal and
//! external against the page URL.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use crate::Result;
use crate::parse::Document;
use crate::record::LinkRef;

/// Order in which headings are reported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HeadingOrder {
    /// All `h1` in document order, then all `h2`, and so on down to `h6`.
    #[default]
    ByLevel,
    /// A single pass in document order regardless of level.
    Document,
}

/// Rule used to decide whether a link points at the audited site.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LinkMatch {
    /// The `href` text contains the page domain anywhere.
    #[default]
    Substring,
    /// The `href`, resolved against the page URL, has the same host as the
    /// page (a leading `www.` is ignored on both sides).
    Host,
}

/// Configuration for content extraction
#[derive(Debug, Clone, Default)]
pub struct ExtractConfig {
    /// Heading ordering
    pub heading_order: HeadingOrder,
    /// Internal/external link rule
    pub link_match: LinkMatch,
}

/// Text and structure pulled out of a page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageContent {
    /// Text of every `<p>`, joined with single spaces
    pub paragraphs_text: String,
    /// Trimmed heading texts
    pub headings: Vec<String>,
    /// Every anchor carrying an `href`, in document order
    pub links: Vec<LinkRef>,
}

const HEADING_SELECTOR: &str = "h1, h2, h3, h4, h5, h6";

static DOMAIN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://(?:www\.)?([^/]+)").expect("domain pattern is valid"));

/// Domain of a page URL as used for substring link matching.
///
/// This is the first `http(s)://` authority found anywhere in the string with
/// a leading `www.` removed; ports and credentials are kept verbatim.
pub fn page_domain(url: &str) -> Option<String> {
    DOMAIN_RE
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Extracts paragraph text, headings and links from a document.
pub fn extract_page(doc: &Document, config: &ExtractConfig) -> Result<PageContent> {
    let paragraphs_text = doc
        .select("p")?
        .iter()
        .map(|p| p.text())
        .collect::<Vec<_>>()
        .join(" ");

    let mut leveled: Vec<(u8, String)> = doc
        .select(HEADING_SELECTOR)?
        .iter()
        .filter_map(|h| h.heading_level().map(|level| (level, h.trimmed_text())))
        .collect();
    if config.heading_order == HeadingOrder::ByLevel {
        leveled.sort_by_key(|(level, _)| *level);
    }
    let headings: Vec<String> = leveled.into_iter().map(|(_, text)| text).collect();

    let links = doc
        .select("a[href]")?
        .iter()
        .filter_map(|a| a.attr("href").map(|href| LinkRef::new(a.trimmed_text(), href)))
        .collect::<Vec<_>>();

    tracing::debug!(
        chars = paragraphs_text.len(),
        headings = headings.len(),
        links = links.len(),
        "extracted page content"
    );

    Ok(PageContent { paragraphs_text, headings, links })
}

/// Splits links into `(internal, external)`, preserving order.
///
/// Every link lands in exactly one side. With no `page_url` there is nothing
/// to compare against and every link is external.
pub fn partition_links(links: Vec<LinkRef>, page_url: Option<&str>, mode: LinkMatch) -> (Vec<LinkRef>, Vec<LinkRef>) {
    let Some(page_url) = page_url else {
        return (Vec::new(), links);
    };

    match mode {
        LinkMatch::Substring => match page_domain(page_url) {
            Some(domain) => links.into_iter().partition(|link| link.href.contains(&domain)),
            None => (Vec::new(), links),
        },
        LinkMatch::Host => match Url::parse(page_url) {
            Ok(base) => links.into_iter().partition(|link| same_host(&base, &link.href)),
            Err(_) => (Vec::new(), links),
        },
    }
}

fn same_host(base: &Url, href: &str) -> bool {
    let Ok(target) = base.join(href) else {
        return false;
    };
    match (base.host_str(), target.host_str()) {
        (Some(a), Some(b)) => strip_www(a).eq_ignore_ascii_case(strip_www(b)),
        _ => false,
    }
}

fn strip_www(host: &str) -> &str {
    host.strip_prefix("www.").unwrap_or(host)
}
