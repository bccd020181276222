//! # rs-newspaper
//!
//! News article extraction: finds the main body of an article page by
//! stopword density, strips navigation, ads and related-link blocks, and
//! returns clean text together with the page's title, authors, publish date,
//! images and videos.
//!
//! ## Quick Start
//!
//! ```rust
//! use rs_newspaper::{extract, Options};
//!
//! let html = r#"<html><head><title>Harbour reopens | Coast Times</title></head>
//! <body><div><p>The harbour reopened on Monday after the storm, and the boats
//! that had been waiting for a week were able to go out again into the bay.</p></div></body></html>"#;
//!
//! let article = extract(html)?;
//! assert_eq!(article.metadata.title.as_deref(), Some("Harbour reopens"));
//! assert!(article.text.starts_with("The harbour reopened"));
//! # Ok::<(), rs_newspaper::Error>(())
//! ```
//!
//! ## Pipeline
//!
//! - **Cleaner**: eleven passes that drop scripts, boilerplate containers,
//!   captions and social widgets, and reduce inline markup to paragraphs
//! - **Scorer**: gravity scores from stopword counts, boosted for early
//!   paragraphs and penalised at the tail; the best parent is the top node
//! - **Complementor**: copies the top node and same-level peers of similar
//!   score into a detached document
//! - **Formatter**: prunes low-scoring subtrees and renders text and HTML
//!
//! Metadata and media extractors run beside the pipeline.

mod error;
mod extract;
mod options;
mod patterns;
mod result;

/// Arena HTML tree with the text/tail model.
pub mod dom;

/// Element tree utilities: iteration, text collection and unwrap/remove.
pub mod etree;

/// Attribute-matching and level queries over the arena tree.
pub mod query;

/// Stopword lists and tokenizers.
pub mod stopwords;

/// Link density testing for boilerplate detection.
pub mod link_density;

/// Boilerplate removal passes.
pub mod cleaner;

/// Body scoring and sibling complementing.
pub mod extractor;

/// Text and HTML rendering of the extracted article.
pub mod formatter;

/// Image and video discovery in the article body.
pub mod media;

/// Metadata extraction (JSON-LD, HTML meta tags, DOM heuristics).
pub mod metadata;

/// URL resolution helpers.
pub mod url_utils;

/// Character encoding detection and transcoding.
pub mod encoding;

// Public API - re-exports
pub use error::{Error, Result};
pub use extract::Extractor;
pub use options::{Options, Tuning};
pub use result::{Article, Metadata};
pub use stopwords::{available_languages, LanguageProfile, Tokenizer, WhitespaceTokenizer, WordStats};

/// Extracts an article from an HTML document using default options.
///
/// # Example
///
/// ```rust
/// use rs_newspaper::extract;
///
/// let article = extract("<html><body><p>Hello</p></body></html>")?;
/// println!("{}", article.text);
/// # Ok::<(), rs_newspaper::Error>(())
/// ```
///
/// # Errors
///
/// Only configuration errors are reported; with default options this
/// always succeeds.
pub fn extract(html: &str) -> Result<Article> {
    extract_with_options(html, &Options::default())
}

/// Extracts an article from an HTML document with custom options.
///
/// Building an [`Extractor`] once is cheaper when many pages share the same
/// options.
///
/// # Example
///
/// ```rust
/// use rs_newspaper::{extract_with_options, Options};
///
/// let options = Options {
///     language: "de".to_string(),
///     keep_article_html: true,
///     ..Options::default()
/// };
/// let article = extract_with_options("<html><body><p>Hallo</p></body></html>", &options)?;
/// assert!(article.warnings.iter().all(|w| !w.is_empty()));
/// # Ok::<(), rs_newspaper::Error>(())
/// ```
///
/// # Errors
///
/// Returns [`Error::UnsupportedLanguage`] when `options.language` has no
/// embedded stopword list.
pub fn extract_with_options(html: &str, options: &Options) -> Result<Article> {
    Ok(Extractor::new(options.clone())?.extract(html))
}

/// Extracts an article from HTML bytes with automatic encoding detection.
///
/// The charset comes from a byte-order mark, `<meta charset>` or the
/// `http-equiv` content type; undeclared input is decoded as UTF-8 and
/// invalid sequences become U+FFFD.
///
/// # Errors
///
/// See [`extract`].
pub fn extract_bytes(html: &[u8]) -> Result<Article> {
    extract_bytes_with_options(html, &Options::default())
}

/// Extracts an article from HTML bytes with custom options.
///
/// # Example
///
/// ```rust
/// use rs_newspaper::{extract_bytes_with_options, Options};
///
/// // Windows-1252 encoded HTML
/// let html = b"<html><head><meta charset=\"windows-1252\"></head><body><p>Caf\xE9</p></body></html>";
/// let article = extract_bytes_with_options(html, &Options::default())?;
/// assert!(article.text.is_empty() || article.text.contains("Café"));
/// # Ok::<(), rs_newspaper::Error>(())
/// ```
///
/// # Errors
///
/// See [`extract_with_options`].
pub fn extract_bytes_with_options(html: &[u8], options: &Options) -> Result<Article> {
    let html_str = encoding::transcode_to_utf8(html);
    extract_with_options(&html_str, options)
}
