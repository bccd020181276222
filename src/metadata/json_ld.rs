//! JSON-LD metadata parsing.
//!
//! Reads Schema.org objects from `<script type="application/ld+json">` blocks.
//! Objects typed as an article are preferred over other typed objects
//! (a `WebPage` wrapper, say) when several declare the same property.

use dom_query::{Document, Selection};
use serde_json::{Map, Value};

/// Facts gathered from the JSON-LD blocks of a page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JsonLd {
    /// `author` names, article objects first.
    pub authors: Vec<String>,
    /// `datePublished`, falling back to `dateCreated`, unparsed.
    pub date_published: Option<String>,
    /// `publisher.name`.
    pub publisher: Option<String>,
}

/// One typed schema object, ranked by whether it is an article.
struct Schema<'a> {
    is_article: bool,
    data: &'a Map<String, Value>,
}

const ARTICLE_TYPES: &[&str] = &[
    "article",
    "newsarticle",
    "reportagenewsarticle",
    "analysisnewsarticle",
    "opinionnewsarticle",
    "blogposting",
    "socialmediaposting",
    "liveblogposting",
    "techarticle",
    "scholarlyarticle",
];

/// Collect JSON-LD facts from a parsed page. Malformed blocks are skipped.
#[must_use]
pub fn extract_json_ld(doc: &Document) -> JsonLd {
    let mut values = Vec::new();
    for script in doc.select(r#"script[type="application/ld+json"]"#).nodes() {
        let script_sel = Selection::from(*script);
        let json_text = script_sel.text();
        let json_text = json_text.trim();
        if json_text.is_empty() {
            continue;
        }
        match serde_json::from_str::<Value>(json_text) {
            Ok(value) => values.push(value),
            Err(err) => tracing::debug!(%err, "skipping malformed JSON-LD block"),
        }
    }

    let mut schemas = Vec::new();
    for value in &values {
        collect_schemas(value, &mut schemas);
    }
    // Stable: document order is kept within each rank.
    schemas.sort_by_key(|s| !s.is_article);

    let mut result = JsonLd::default();
    for schema in &schemas {
        if let Some(author) = schema.data.get("author") {
            for name in names_of(author) {
                if !result.authors.contains(&name) {
                    result.authors.push(name);
                }
            }
        }
        if result.date_published.is_none() {
            result.date_published = string_value(schema.data, "datePublished")
                .or_else(|| string_value(schema.data, "dateCreated"));
        }
        if result.publisher.is_none() {
            result.publisher = schema.data.get("publisher").and_then(|p| names_of(p).into_iter().next());
        }
    }
    result
}

/// Walk objects, arrays and `@graph` lists, keeping every object with `@type`.
fn collect_schemas<'a>(value: &'a Value, out: &mut Vec<Schema<'a>>) {
    match value {
        Value::Object(map) => {
            let types = schema_types(map);
            if !types.is_empty() {
                out.push(Schema {
                    is_article: types.iter().any(|t| ARTICLE_TYPES.contains(&t.as_str())),
                    data: map,
                });
            }
            if let Some(graph) = map.get("@graph") {
                collect_schemas(graph, out);
            }
            if let Some(main) = map.get("mainEntity") {
                collect_schemas(main, out);
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_schemas(item, out);
            }
        }
        _ => {}
    }
}

/// Lower-cased `@type` values; a bare string or a list.
fn schema_types(map: &Map<String, Value>) -> Vec<String> {
    match map.get("@type") {
        Some(Value::String(t)) => vec![t.to_lowercase()],
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_lowercase)
            .collect(),
        _ => Vec::new(),
    }
}

/// Names from a `"Jane"`, `{"name": "Jane"}` or a list of either.
fn names_of(value: &Value) -> Vec<String> {
    match value {
        Value::String(name) => non_empty(name).into_iter().collect(),
        Value::Object(map) => map
            .get("name")
            .and_then(Value::as_str)
            .and_then(non_empty)
            .into_iter()
            .collect(),
        Value::Array(items) => items.iter().flat_map(names_of).collect(),
        _ => Vec::new(),
    }
}

fn string_value(map: &Map<String, Value>, key: &str) -> Option<String> {
    match map.get(key)? {
        Value::String(s) => non_empty(s),
        Value::Array(items) => items.iter().filter_map(Value::as_str).find_map(non_empty),
        _ => None,
    }
}

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}
