//! Images and videos inside the article's top node.

use url::Url;

use crate::dom::{Document, NodeId};
use crate::patterns::VIDEO_PROVIDER;
use crate::query::get_elements_by_tags;
use crate::url_utils;

/// Absolute `img[src]` URLs under `top` (itself included), deduplicated in
/// document order.
#[must_use]
pub fn extract_images(doc: &Document, top: NodeId, base: Option<&Url>) -> Vec<String> {
    let mut images = Vec::new();
    for img in elements_with_self(doc, top, &["img"]) {
        let Some(src) = doc.attr(img, "src") else {
            continue;
        };
        if let Some(url) = url_utils::resolve(src, base) {
            push_unique(&mut images, url);
        }
    }
    images
}

/// Embedded videos under `top` from known providers, deduplicated.
///
/// `iframe`/`embed`/`video` use `src`; `object` uses `data` or a
/// `<param name="movie">`; `video` also looks at nested `<source>`.
#[must_use]
pub fn extract_videos(doc: &Document, top: NodeId, base: Option<&Url>) -> Vec<String> {
    let mut movies = Vec::new();
    for node in elements_with_self(doc, top, &["iframe", "embed", "object", "video"]) {
        for src in video_sources(doc, node) {
            let Some(url) = url_utils::resolve(&src, base) else {
                continue;
            };
            if VIDEO_PROVIDER.is_match(&url) {
                push_unique(&mut movies, url);
            }
        }
    }
    movies
}

fn video_sources(doc: &Document, node: NodeId) -> Vec<String> {
    let mut sources: Vec<String> = doc.attr(node, "src").map(str::to_string).into_iter().collect();
    match doc.tag(node) {
        Some("object") => {
            sources.extend(doc.attr(node, "data").map(str::to_string));
            for param in get_elements_by_tags(doc, node, &["param"]) {
                if doc.attr(param, "name").is_some_and(|n| n.eq_ignore_ascii_case("movie")) {
                    sources.extend(doc.attr(param, "value").map(str::to_string));
                }
            }
        }
        Some("video") => {
            for source in get_elements_by_tags(doc, node, &["source"]) {
                sources.extend(doc.attr(source, "src").map(str::to_string));
            }
        }
        _ => {}
    }
    sources
}

fn elements_with_self(doc: &Document, top: NodeId, tags: &[&str]) -> Vec<NodeId> {
    let mut nodes = Vec::new();
    if doc.tag(top).is_some_and(|t| tags.contains(&t)) {
        nodes.push(top);
    }
    nodes.extend(get_elements_by_tags(doc, top, tags));
    nodes
}

fn push_unique(list: &mut Vec<String>, url: String) {
    if !list.contains(&url) {
        list.push(url);
    }
}
