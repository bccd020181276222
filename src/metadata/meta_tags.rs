//! HTML meta tag extraction.
//!
//! Reads `<meta>` and `<link>` elements of the untouched parse: description,
//! keywords, language, favicon, site name, canonical link and meta image.

use dom_query::{Document, Selection};
use url::Url;

use crate::result::Metadata;
use crate::url_utils;
use crate::Options;

/// Fill the meta-tag fields of `original`; already set fields are kept.
#[must_use]
pub fn examine_meta(doc: &Document, original: Metadata, opts: &Options, base: Option<&Url>) -> Metadata {
    let mut result = original;

    let mut description = None;
    let mut og_description = None;
    let mut keywords = None;
    let mut content_language = None;
    let mut site_name = None;
    let mut og_url = None;
    let mut og_image = None;
    let mut twitter_image = None;

    for node in doc.select("meta").nodes() {
        let meta = Selection::from(*node);
        let Some(content) = meta.attr("content").map(|c| c.trim().to_string()) else {
            continue;
        };
        if content.is_empty() {
            continue;
        }

        if let Some(equiv) = meta.attr("http-equiv") {
            if equiv.eq_ignore_ascii_case("content-language") && content_language.is_none() {
                content_language = Some(content);
            }
            continue;
        }

        let key = meta
            .attr("property")
            .or_else(|| meta.attr("name"))
            .or_else(|| meta.attr("itemprop"))
            .map(|k| k.trim().to_lowercase())
            .unwrap_or_default();

        let slot = match key.as_str() {
            "description" => &mut description,
            "og:description" => &mut og_description,
            "keywords" | "news_keywords" => &mut keywords,
            "og:site_name" => &mut site_name,
            "og:url" => &mut og_url,
            "og:image" | "og:image:url" | "og:image:secure_url" => &mut og_image,
            "twitter:image" | "twitter:image:src" => &mut twitter_image,
            _ => continue,
        };
        if slot.is_none() {
            *slot = Some(content);
        }
    }

    let mut canonical = None;
    let mut favicon = None;
    let mut image_src = None;
    for node in doc.select("link").nodes() {
        let link = Selection::from(*node);
        let (Some(rel), Some(href)) = (link.attr("rel"), link.attr("href")) else {
            continue;
        };
        let rel = rel.to_lowercase();
        let href = href.to_string();
        for token in rel.split_ascii_whitespace() {
            let slot = match token {
                "canonical" => &mut canonical,
                "icon" => &mut favicon,
                "image_src" => &mut image_src,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(href.clone());
            }
        }
    }

    if result.description.is_none() {
        result.description = description.or(og_description);
    }
    if result.keywords.is_empty() {
        if let Some(keywords) = keywords {
            result.keywords = split_keywords(&keywords, opts.max_keywords);
        }
    }
    if result.lang.is_none() {
        let html_lang = doc.select("html").attr("lang").map(|l| l.to_string());
        result.lang = html_lang
            .as_deref()
            .and_then(language_code)
            .or_else(|| content_language.as_deref().and_then(language_code));
    }
    if result.favicon.is_none() {
        result.favicon = favicon.and_then(|href| url_utils::resolve(&href, base));
    }
    if result.site_name.is_none() {
        result.site_name = site_name;
    }
    if result.canonical_link.is_none() {
        result.canonical_link = canonical
            .or(og_url)
            .and_then(|href| url_utils::resolve(&href, base));
    }
    if result.meta_image.is_none() {
        result.meta_image = og_image
            .or(twitter_image)
            .or(image_src)
            .and_then(|href| url_utils::resolve(&href, base));
    }

    result
}

/// Content of the first `<meta>` whose `property`, `name` or `itemprop`
/// equals one of `keys` (case-insensitive), trying keys in order.
#[must_use]
pub fn meta_content(doc: &Document, keys: &[&str]) -> Option<String> {
    let metas: Vec<(String, String)> = doc
        .select("meta")
        .nodes()
        .iter()
        .filter_map(|node| {
            let meta = Selection::from(*node);
            let content = meta.attr("content")?.trim().to_string();
            if content.is_empty() {
                return None;
            }
            let key = meta
                .attr("property")
                .or_else(|| meta.attr("name"))
                .or_else(|| meta.attr("itemprop"))?
                .trim()
                .to_lowercase();
            Some((key, content))
        })
        .collect();

    keys.iter().find_map(|wanted| {
        metas
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(wanted))
            .map(|(_, content)| content.clone())
    })
}

/// Two-letter lower-case code from `en`, `en-US` or `pt_BR`.
#[must_use]
pub fn language_code(value: &str) -> Option<String> {
    let primary = value.trim().split(['-', '_']).next()?;
    (primary.len() == 2 && primary.chars().all(|c| c.is_ascii_alphabetic()))
        .then(|| primary.to_ascii_lowercase())
}

fn split_keywords(content: &str, max: usize) -> Vec<String> {
    let mut keywords: Vec<String> = Vec::new();
    for keyword in content.split(',').map(str::trim).filter(|k| !k.is_empty()) {
        if keywords.len() >= max {
            break;
        }
        if !keywords.iter().any(|k| k == keyword) {
            keywords.push(keyword.to_string());
        }
    }
    keywords
}

#[cfg(test)]
mod tests {
    use super::*;

    fn examine(html: &str, base: Option<&str>) -> Metadata {
        let doc = Document::from(html);
        let base = base.and_then(url_utils::parse_absolute);
        examine_meta(&doc, Metadata::default(), &Options::default(), base.as_ref())
    }

    #[test]
    fn test_standard_meta_tags() {
        let metadata = examine(
            r#"<html lang="en-US"><head>
            <meta name="description" content="A test article.">
            <meta property="og:description" content="OG description">
            <meta name="keywords" content="test, article, , example, test">
            </head><body></body></html>"#,
            None,
        );
        assert_eq!(metadata.description.as_deref(), Some("A test article."));
        assert_eq!(metadata.keywords, vec!["test", "article", "example"]);
        assert_eq!(metadata.lang.as_deref(), Some("en"));
    }

    #[test]
    fn test_open_graph_and_links() {
        let metadata = examine(
            r#"<html><head>
            <meta property="og:site_name" content="Daily Planet">
            <meta property="og:url" content="https://example.com/og">
            <meta name="twitter:image" content="/tw.jpg">
            <meta property="og:image" content="/og.jpg">
            <link rel="shortcut icon" href="/favicon.ico">
            <link rel="canonical" href="/world/story">
            </head><body></body></html>"#,
            Some("https://example.com/world/story?utm=x"),
        );
        assert_eq!(metadata.site_name.as_deref(), Some("Daily Planet"));
        assert_eq!(metadata.meta_image.as_deref(), Some("https://example.com/og.jpg"));
        assert_eq!(metadata.favicon.as_deref(), Some("https://example.com/favicon.ico"));
        assert_eq!(metadata.canonical_link.as_deref(), Some("https://example.com/world/story"));
    }

    #[test]
    fn test_og_fallbacks() {
        let metadata = examine(
            r#"<html><head>
            <meta property="og:description" content="OG description">
            <meta property="og:url" content="https://example.com/og">
            <link rel="image_src" href="https://example.com/i.png">
            </head><body></body></html>"#,
            None,
        );
        assert_eq!(metadata.description.as_deref(), Some("OG description"));
        assert_eq!(metadata.canonical_link.as_deref(), Some("https://example.com/og"));
        assert_eq!(metadata.meta_image.as_deref(), Some("https://example.com/i.png"));
    }

    #[test]
    fn test_content_language_fallback() {
        let metadata = examine(
            r#"<html><head><meta http-equiv="Content-Language" content="de-AT"></head></html>"#,
            None,
        );
        assert_eq!(metadata.lang.as_deref(), Some("de"));
    }

    #[test]
    fn test_keywords_capped() {
        let doc = Document::from(r#"<meta name="keywords" content="a, b, c, d">"#);
        let opts = Options {
            max_keywords: 2,
            ..Options::default()
        };
        let metadata = examine_meta(&doc, Metadata::default(), &opts, None);
        assert_eq!(metadata.keywords, vec!["a", "b"]);
    }

    #[test]
    fn test_preserves_existing_metadata() {
        let doc = Document::from(r#"<meta name="description" content="New">"#);
        let original = Metadata {
            description: Some("Original".to_string()),
            ..Metadata::default()
        };
        let metadata = examine_meta(&doc, original, &Options::default(), None);
        assert_eq!(metadata.description.as_deref(), Some("Original"));
    }

    #[test]
    fn test_meta_content_key_priority() {
        let doc = Document::from(
            r#"<meta name="pubdate" content="2020-01-01"><meta property="article:published_time" content="2024-05-17">"#,
        );
        assert_eq!(
            meta_content(&doc, &["article:published_time", "pubdate"]).as_deref(),
            Some("2024-05-17")
        );
        assert_eq!(meta_content(&doc, &["missing"]), None);
    }

    #[test]
    fn test_language_code() {
        assert_eq!(language_code("EN").as_deref(), Some("en"));
        assert_eq!(language_code("pt_BR").as_deref(), Some("pt"));
        assert_eq!(language_code("eng"), None);
        assert_eq!(language_code(""), None);
    }
}
