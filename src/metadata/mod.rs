//! Metadata extraction module.
//!
//! The surrounding extractors run over the untouched `dom_query` parse,
//! independently of the body pipeline:
//! 1. JSON-LD (Schema.org structured data)
//! 2. HTML meta and link tags
//! 3. DOM heuristics for title, authors and tags
//! 4. Publish date from the URL, JSON-LD, meta tags and `<time>`

pub mod date;
pub mod dom_extraction;
pub mod json_ld;
pub mod meta_tags;

use dom_query::Document;

use crate::result::Metadata;
use crate::url_utils;
use crate::Options;

pub use date::{date_from_url, extract_publish_date, parse_date};
pub use dom_extraction::{extract_authors, extract_tags, extract_title, parse_byline};
pub use json_ld::{extract_json_ld, JsonLd};
pub use meta_tags::{examine_meta, language_code, meta_content};

/// Extract all metadata from a document.
#[must_use]
pub fn extract_metadata(doc: &Document, opts: &Options) -> Metadata {
    let base = opts.url.as_deref().and_then(url_utils::parse_absolute);
    let json_ld = json_ld::extract_json_ld(doc);

    let mut metadata = Metadata {
        url: opts.url.clone(),
        ..Metadata::default()
    };
    metadata = meta_tags::examine_meta(doc, metadata, opts, base.as_ref());

    if metadata.site_name.is_none() {
        metadata.site_name.clone_from(&json_ld.publisher);
    }
    metadata.title = dom_extraction::extract_title(doc, opts);
    metadata.authors = dom_extraction::extract_authors(doc, &json_ld.authors, opts);
    metadata.tags = dom_extraction::extract_tags(doc);

    // The canonical link also carries URL-embedded dates when no URL was given.
    let date_url = opts.url.as_deref().or(metadata.canonical_link.as_deref());
    metadata.publish_date = date::extract_publish_date(doc, date_url, &json_ld);

    tracing::debug!(
        title = metadata.title.is_some(),
        authors = metadata.authors.len(),
        date = metadata.publish_date.is_some(),
        tags = metadata.tags.len(),
        "extracted metadata"
    );
    metadata
}
