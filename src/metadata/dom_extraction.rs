//! DOM-based metadata extraction: title, authors and tags.
//!
//! These run over the untouched parse with CSS selectors and a few text
//! heuristics.

use dom_query::{Document, Selection};

use super::meta_tags::meta_content;
use crate::patterns::{AUTHOR_SEPARATOR, BYLINE_PREFIX, TITLE_SEPARATOR, WHITESPACE_NORMALIZE};
use crate::Options;

// ============================================================
// TITLE EXTRACTION
// ============================================================

/// Extract the article title.
///
/// The `<title>` text is split on site-name separators; the part matching
/// the first `<h1>` or `og:title` wins, otherwise the longest part. Without
/// a `<title>` the `og:title` and then the first `<h1>` are used.
#[must_use]
pub fn extract_title(doc: &Document, opts: &Options) -> Option<String> {
    let title_text = collapse(&doc.select("title").first().text());
    let h1 = doc
        .select("h1")
        .nodes()
        .iter()
        .map(|node| collapse(&Selection::from(*node).text()))
        .find(|text| !text.is_empty());
    let og_title = meta_content(doc, &["og:title"]).map(|t| collapse(&t));

    let title = if title_text.is_empty() {
        og_title.or(h1)?
    } else {
        let references: Vec<&str> = h1.iter().chain(og_title.iter()).map(String::as_str).collect();
        choose_title_part(&title_text, &references)
    };

    let title = truncate_chars(&title, opts.max_title_len);
    (!title.is_empty()).then_some(title)
}

/// Pick the headline out of `"Headline | Site"`-style titles.
fn choose_title_part(title: &str, references: &[&str]) -> String {
    if references.iter().any(|r| title_key(r) == title_key(title)) {
        return title.to_string();
    }

    let parts: Vec<&str> = TITLE_SEPARATOR
        .split(title)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();
    if parts.len() < 2 {
        return title.to_string();
    }

    for reference in references {
        let key = title_key(reference);
        if let Some(part) = parts.iter().find(|p| title_key(p) == key) {
            return (*part).to_string();
        }
    }

    // First of the longest parts.
    parts
        .iter()
        .fold("", |best, part| {
            if part.chars().count() > best.chars().count() {
                part
            } else {
                best
            }
        })
        .to_string()
}

/// Comparison key: lower-cased alphanumerics only.
fn title_key(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => s[..idx].trim_end().to_string(),
        None => s.to_string(),
    }
}

// ============================================================
// AUTHOR EXTRACTION
// ============================================================

/// Attributes whose value marks an author element.
const AUTHOR_ATTRS: &[&str] = &["name", "rel", "itemprop", "class", "id"];

/// Attribute values that mark an author element.
const AUTHOR_VALUES: &[&str] = &["author", "byline", "dc.creator", "byl"];

/// Longest plausible name, in words.
const MAX_NAME_WORDS: usize = 5;

/// Extract author names from byline elements, followed by `extra` names
/// (JSON-LD), deduplicated case-insensitively and capped at `max_authors`.
#[must_use]
pub fn extract_authors(doc: &Document, extra: &[String], opts: &Options) -> Vec<String> {
    let mut authors: Vec<String> = Vec::new();
    let mut push = |name: String| {
        if authors.len() < opts.max_authors
            && !authors.iter().any(|a| a.to_lowercase() == name.to_lowercase())
        {
            authors.push(name);
        }
    };

    for node in doc.select("*").nodes() {
        let elem = Selection::from(*node);
        let is_author = AUTHOR_ATTRS.iter().any(|attr| {
            elem.attr(attr)
                .is_some_and(|v| AUTHOR_VALUES.iter().any(|want| v.trim().eq_ignore_ascii_case(want)))
        });
        if !is_author {
            continue;
        }

        let is_meta = node.node_name().is_some_and(|n| n.eq_ignore_ascii_case("meta"));
        let raw = if is_meta {
            elem.attr("content").map(|c| c.to_string()).unwrap_or_default()
        } else {
            elem.text().to_string()
        };
        for name in parse_byline(&raw) {
            push(name);
        }
    }

    for raw in extra {
        for name in parse_byline(raw) {
            push(name);
        }
    }

    authors
}

/// Split a byline into candidate names.
///
/// `"By Jane Roe and John Doe"` gives both names; tokens that are only
/// digits, single words or longer than five words are dropped.
#[must_use]
pub fn parse_byline(raw: &str) -> Vec<String> {
    let text = collapse(raw);
    let text = BYLINE_PREFIX.replace(&text, "");

    AUTHOR_SEPARATOR
        .split(&text)
        .map(|token| token.trim_matches(|c: char| c.is_whitespace() || c == '.' || c == ':'))
        .filter(|token| !token.is_empty() && !token.chars().all(|c| c.is_ascii_digit() || c.is_whitespace()))
        .filter(|token| is_plausible_name(token))
        .map(str::to_string)
        .collect()
}

fn is_plausible_name(name: &str) -> bool {
    let words = name.split_whitespace().count();
    if !(2..=MAX_NAME_WORDS).contains(&words) {
        return false;
    }
    let lower = name.to_lowercase();
    if lower.starts_with("http") || lower.starts_with("www.") || name.contains('@') {
        return false;
    }
    name.chars().filter(char::is_ascii_digit).count() <= 3
}

// ============================================================
// TAG EXTRACTION
// ============================================================

/// Selectors for tag links and tag meta.
const TAG_SELECTORS: &[&str] = &[
    r#"a[rel="tag"]"#,
    r#"a[href*="/tag/"]"#,
    r#"a[href*="/tags/"]"#,
    r#"a[href*="/topic/"]"#,
    r#"meta[property="article:tag"]"#,
];

/// Extract article tags, deduplicated in selector order.
#[must_use]
pub fn extract_tags(doc: &Document) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for rule in TAG_SELECTORS {
        for node in doc.select(rule).nodes() {
            let elem = Selection::from(*node);
            let text = match elem.attr("content") {
                Some(content) => collapse(&content),
                None => collapse(&elem.text()),
            };
            if !text.is_empty() && text.chars().count() < 100 && !tags.contains(&text) {
                tags.push(text);
            }
        }
    }
    tags
}

fn collapse(text: &str) -> String {
    WHITESPACE_NORMALIZE.replace_all(text, " ").trim().to_string()
}
