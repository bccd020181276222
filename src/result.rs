//! Result types for extraction output.
//!
//! An [`Article`] carries the formatted body, media found in it, and the
//! document [`Metadata`] gathered by the surrounding extractors.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Result of extracting one news article.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Article {
    /// Body text, paragraphs separated by a blank line.
    pub text: String,

    /// Body HTML: the allow-listed fragment when `keep_article_html` is set,
    /// otherwise the complemented node's markup as is.
    pub article_html: String,

    /// Representative image: the meta image if present, else the first
    /// body image.
    pub top_image: Option<String>,

    /// Absolute image URLs found in the body, in document order.
    pub images: Vec<String>,

    /// Embedded video URLs from known providers.
    pub movies: Vec<String>,

    /// Document metadata.
    pub metadata: Metadata,

    /// Non-fatal issues noticed during extraction.
    ///
    /// For example: no article body found, or text shorter than
    /// `min_word_count`.
    pub warnings: Vec<String>,
}

impl Article {
    /// Whether a body was found.
    #[must_use]
    pub fn has_content(&self) -> bool {
        !self.text.is_empty()
    }

    /// The article, or [`Error::NoContent`] when no body was found.
    pub fn require_content(self) -> Result<Self> {
        if self.has_content() {
            Ok(self)
        } else {
            Err(Error::NoContent)
        }
    }
}

/// Metadata extracted from an HTML document.
///
/// Every field is optional; missing sources leave it empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// Article title, site name stripped.
    pub title: Option<String>,

    /// Author names, deduplicated in order of appearance.
    pub authors: Vec<String>,

    /// Publication date.
    pub publish_date: Option<DateTime<Utc>>,

    /// Meta description.
    pub description: Option<String>,

    /// Meta keywords.
    pub keywords: Vec<String>,

    /// Two-letter language code declared by the page.
    pub lang: Option<String>,

    /// Favicon URL.
    pub favicon: Option<String>,

    /// Site name (e.g., "The Daily Planet").
    pub site_name: Option<String>,

    /// Canonical URL of the article.
    pub canonical_link: Option<String>,

    /// Image declared in meta tags (`og:image` and friends).
    pub meta_image: Option<String>,

    /// Article tags.
    pub tags: Vec<String>,

    /// URL the document was fetched from, when supplied.
    pub url: Option<String>,
}
