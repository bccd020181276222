//! Output Formatter
//!
//! Turns the complemented article document into display text and an HTML
//! fragment. Line structure survives through a private-use marker character:
//! `<br>`, list items and block boundaries emit it, and the final text is
//! split on it into paragraphs joined by a blank line.

use crate::dom::{Document, NodeId};
use crate::etree;
use crate::extractor::state::ScoreStore;
use crate::extractor::Complemented;
use crate::options::Tuning;
use crate::patterns;
use crate::query::{self, MatchMode};

/// Stands in for a line break until the text is assembled.
pub const LINE_MARKER: char = '\u{E000}';
const LINE_MARKER_STR: &str = "\u{E000}";

/// Tags kept by the article HTML filter; others are unwrapped.
const ALLOWED_HTML_TAGS: &[&str] = &[
    "a", "span", "p", "br", "strong", "b", "em", "i", "tt", "code", "pre", "blockquote", "img",
    "h1", "h2", "h3", "h4", "h5", "h6", "ul", "ol", "li", "dl", "dt", "dd",
];

/// Attributes kept by the article HTML filter.
const ALLOWED_HTML_ATTRS: &[&str] = &["href", "src", "alt", "title"];

/// Removed with their content by the article HTML filter.
const DROPPED_HTML_TAGS: &[&str] = &["script", "style"];

/// Unwrapped before text assembly.
const INLINE_FORMATTING_TAGS: &[&str] = &["b", "strong", "i", "br", "sup"];

/// Subtrees that contribute no text.
const NON_TEXT_TAGS: &[&str] = &["script", "style", "select", "option", "textarea"];

/// Table cells; adjacent cells are separated by a space.
const CELL_TAGS: &[&str] = &["td", "th"];

/// Elements that start a new line in the assembled text.
const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "dd", "div", "dl", "dt", "figure", "footer",
    "form", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "li", "main", "ol", "p", "pre",
    "section", "table", "tr", "ul",
];

/// Converts an article document into `(text, html)`.
#[derive(Debug, Clone)]
pub struct OutputFormatter<'a> {
    keep_article_html: bool,
    tuning: &'a Tuning,
}

impl<'a> OutputFormatter<'a> {
    #[must_use]
    pub fn new(keep_article_html: bool, tuning: &'a Tuning) -> Self {
        Self {
            keep_article_html,
            tuning,
        }
    }

    /// Format a complemented document; `None` yields two empty strings.
    pub fn format_complemented(&self, input: Option<&mut Complemented>) -> (String, String) {
        match input {
            Some(complemented) => {
                let body = complemented.body();
                self.get_formatted(&mut complemented.document, Some(body), &complemented.scores)
            }
            None => (String::new(), String::new()),
        }
    }

    /// Format the subtree at `node`, mutating it along the way.
    ///
    /// An `<html>` node is resolved to its `<body>`.
    pub fn get_formatted(
        &self,
        doc: &mut Document,
        node: Option<NodeId>,
        scores: &ScoreStore,
    ) -> (String, String) {
        let Some(mut root) = node else {
            return (String::new(), String::new());
        };
        if doc.tag(root) == Some("html") {
            root = doc.body().unwrap_or(root);
        }

        self.remove_negative_scores(doc, root, scores);

        let html = if self.keep_article_html {
            convert_to_html(doc, root)
        } else {
            doc.inner_html(root)
        };

        etree::strip_tags(doc, root, &["a"]);
        add_newline_to_br(doc, root);
        add_newline_to_li(doc, root);
        add_space_after_cells(doc, root);
        etree::strip_tags(doc, root, INLINE_FORMATTING_TAGS);
        remove_empty_tags(doc, root);
        self.remove_trailing_media_div(doc, root);
        let text = convert_to_text(doc, root);

        tracing::debug!(text_len = text.len(), html_len = html.len(), "article formatted");
        (text, html)
    }

    /// Drop descendants whose score is below the prune threshold.
    fn remove_negative_scores(&self, doc: &mut Document, root: NodeId, scores: &ScoreStore) {
        for node in etree::iter_descendants(doc, root) {
            if scores.has_score(node) && scores.score(node) < self.tuning.prune_score_below {
                tracing::trace!(node = node.index(), score = scores.score(node), "pruned low score");
                etree::remove(doc, node);
            }
        }
    }

    /// Drop the last top-level block when it looks like a trailing gallery.
    fn remove_trailing_media_div(&self, doc: &mut Document, root: NodeId) {
        let top_level = doc.element_children(root);
        if top_level.len() < self.tuning.trailing_media_min_children {
            return;
        }
        let Some(&last) = top_level.last() else {
            return;
        };
        let exempt = doc.attr(last, "class").is_some_and(|class| {
            self.tuning
                .trailing_media_exempt_classes
                .iter()
                .any(|c| query::attr_matches(class, c, MatchMode::Word))
        });
        if !exempt && query::get_depth(doc, last) >= self.tuning.trailing_media_min_depth {
            etree::remove(doc, last);
        }
    }
}

/// Serialize a copy of `root`'s content through the tag allow-list.
fn convert_to_html(doc: &Document, root: NodeId) -> String {
    let mut copy = doc.clone();
    for node in etree::iter_descendants(&copy, root) {
        if !etree::is_within(&copy, node, root) {
            continue;
        }
        let Some(tag) = copy.tag(node) else {
            continue;
        };
        if DROPPED_HTML_TAGS.contains(&tag) {
            etree::remove(&mut copy, node);
        } else if ALLOWED_HTML_TAGS.contains(&tag) {
            copy.retain_attrs(node, |name| ALLOWED_HTML_ATTRS.contains(&name));
        } else {
            etree::drop_tag(&mut copy, node);
        }
    }
    copy.inner_html(root)
}

fn add_newline_to_br(doc: &mut Document, root: NodeId) {
    for br in query::get_tags(doc, root, Some("br"), &[], MatchMode::Exact) {
        doc.set_text(br, LINE_MARKER_STR);
    }
}

/// Flatten every list item but the last of each `<ul>` to its text plus a
/// line marker. Nested blocks inside the item become word breaks.
fn add_newline_to_li(doc: &mut Document, root: NodeId) {
    let is_block: &dyn Fn(&Document, NodeId) -> bool =
        &|d: &Document, n: NodeId| d.tag(n).is_some_and(|t| BLOCK_TAGS.contains(&t) || CELL_TAGS.contains(&t));
    for ul in query::get_tags(doc, root, Some("ul"), &[], MatchMode::Exact) {
        let items = query::get_elements_by_tags(doc, ul, &["li"]);
        let Some((_, leading)) = items.split_last() else {
            continue;
        };
        for &li in leading {
            let mut text = String::new();
            etree::walk_text(doc, li, &mut text, |_, _| false, Some((" ", is_block)));
            text.push(LINE_MARKER);
            doc.set_text(li, &text);
            etree::clear_children(doc, li);
        }
    }
}

/// Cell text runs straight into the next cell otherwise.
fn add_space_after_cells(doc: &mut Document, root: NodeId) {
    for cell in query::get_elements_by_tags(doc, root, CELL_TAGS) {
        let tail = format!(" {}", doc.tail(cell));
        doc.set_tail(cell, &tail);
    }
}

/// Remove elements left without text, innermost first. Embedded media and
/// their containers stay.
fn remove_empty_tags(doc: &mut Document, root: NodeId) {
    for node in etree::iter_descendants(doc, root).into_iter().rev() {
        if !etree::is_within(doc, node, root) {
            continue;
        }
        let text = etree::text_content(doc, node);
        if doc.tag(node) == Some("br") && text == LINE_MARKER_STR {
            continue;
        }
        let is_media = |n: NodeId| matches!(doc.tag(n), Some("object" | "embed"));
        let has_media = is_media(node) || query::has_descendant(doc, node, is_media);
        if text.trim().is_empty() && !has_media {
            etree::remove(doc, node);
        }
    }
}

/// Assemble the display text from `root`'s top-level children.
fn convert_to_text(doc: &Document, root: NodeId) -> String {
    let is_block: &dyn Fn(&Document, NodeId) -> bool =
        &|d: &Document, n: NodeId| d.tag(n).is_some_and(|t| BLOCK_TAGS.contains(&t));
    let skip = |d: &Document, n: NodeId| d.tag(n).is_some_and(|t| NON_TEXT_TAGS.contains(&t));

    let mut lines = Vec::new();
    for child in doc.element_children(root) {
        let mut raw = String::new();
        etree::walk_text(doc, child, &mut raw, skip, Some((LINE_MARKER_STR, is_block)));
        let unescaped = html_escape::decode_html_entities(&raw);
        for line in unescaped.split(LINE_MARKER) {
            let line = patterns::WHITESPACE_NORMALIZE.replace_all(line, " ");
            let line = line.trim();
            if !line.is_empty() {
                lines.push(line.to_string());
            }
        }
    }
    lines.join("\n\n")
}
