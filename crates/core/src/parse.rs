//! HTML parsing and element queries.
//!
//! This module provides the [`Document`] and [`Element`] types the
//! extractor walks. Both are thin wrappers over `scraper` that map selector
//! errors into [`AuditError::ParseFailed`].
//!
//! # Example
//!
//! ```rust
//! use seo_audit_core::parse::Document;
//!
//! let html = r#"
//!     <html>
//!         <body>
//!             <h1>Title</h1>
//!             <p class="content">Paragraph</p>
//!         </body>
//!     </html>
//! "#;
//!
//! let doc = Document::parse(html).unwrap();
//! let paragraphs = doc.select("p.content").unwrap();
//! assert_eq!(paragraphs.len(), 1);
//! ```

use scraper::{Html, Selector};

use crate::{AuditError, Result};

/// A parsed HTML document.
///
/// Parsing is lenient: malformed markup is repaired the way browsers do,
/// so construction only fails on selector errors later on.
pub struct Document {
    html: Html,
}

impl Document {
    /// Parses HTML from a string.
    pub fn parse(html: &str) -> Result<Self> {
        let html = Html::parse_document(html);
        Ok(Self { html })
    }

    /// Selects elements using a CSS selector, in document order.
    ///
    /// # Errors
    ///
    /// Returns [`AuditError::ParseFailed`] if the selector is invalid.
    pub fn select(&'_ self, selector: &str) -> Result<Vec<Element<'_>>> {
        let sel = compile(selector)?;
        Ok(self.html.select(&sel).map(|el| Element { element: el }).collect())
    }
}

fn compile(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| AuditError::ParseFailed(format!("Invalid selector: {}", e)))
}

/// A wrapper around scraper's ElementRef.
///
/// # Example
///
/// ```rust
/// use seo_audit_core::parse::Document;
///
/// let html = r#"<a href="https://example.com">Link text</a>"#;
/// let doc = Document::parse(html).unwrap();
/// let link = &doc.select("a").unwrap()[0];
///
/// assert_eq!(link.text(), "Link text");
/// assert_eq!(link.attr("href"), Some("https://example.com"));
/// ```
#[derive(Clone, Debug)]
pub struct Element<'a> {
    element: scraper::ElementRef<'a>,
}

impl<'a> Element<'a> {
    /// Gets the concatenation of all text nodes within this element, untrimmed.
    pub fn text(&self) -> String {
        self.element.text().collect()
    }

    /// Gets the text content with surrounding whitespace removed.
    pub fn trimmed_text(&self) -> String {
        self.text().trim().to_string()
    }

    /// Gets the value of an attribute, `None` if absent.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.element.value().attr(name)
    }

    /// Heading level for `h1`..`h6`, `None` for every other tag.
    pub fn heading_level(&self) -> Option<u8> {
        match self.element.value().name() {
            "h1" => Some(1),
            "h2" => Some(2),
            "h3" => Some(3),
            "h4" => Some(4),
            "h5" => Some(5),
            "h6" => Some(6),
            _ => None,
        }
    }
}
