//! Tree Query Layer
//!
//! Primitive lookups over the arena tree: attribute matching in three modes,
//! tag-list search, node level and depth, and breadth-first level scans.
//! Every result is in document order unless stated otherwise.

use std::collections::{HashSet, VecDeque};

use regex::Regex;

use crate::dom::{Document, NodeId};
use crate::etree;

/// How an attribute value is compared against a query. All modes ignore case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchMode {
    /// Whole value equals the query.
    #[default]
    Exact,
    /// Value contains the query.
    Substring,
    /// One whitespace-delimited token of the value equals the query.
    Word,
}

/// Compare one attribute value against a query.
///
/// ```
/// use rs_newspaper::query::{attr_matches, MatchMode};
///
/// assert!(attr_matches("bla dropcap lorem", "dropcap", MatchMode::Word));
/// assert!(!attr_matches("dropcapish", "dropcap", MatchMode::Word));
/// assert!(attr_matches("dropcapish", "dropcap", MatchMode::Substring));
/// ```
#[must_use]
pub fn attr_matches(value: &str, query: &str, mode: MatchMode) -> bool {
    let value = value.to_lowercase();
    let query = query.to_lowercase();
    match mode {
        MatchMode::Exact => value == query,
        MatchMode::Substring => value.contains(&query),
        MatchMode::Word => value.split_whitespace().any(|token| token == query),
    }
}

/// Whether `id` carries every `(name, value)` constraint (AND semantics).
#[must_use]
pub fn matches_attrs(doc: &Document, id: NodeId, attrs: &[(&str, &str)], mode: MatchMode) -> bool {
    attrs.iter().all(|(name, query)| {
        doc.attr(id, name)
            .is_some_and(|value| attr_matches(value, query, mode))
    })
}

/// Elements at or below `root` with the given tag (any tag when `None`)
/// whose attributes satisfy all constraints.
#[must_use]
pub fn get_tags(
    doc: &Document,
    root: NodeId,
    tag: Option<&str>,
    attrs: &[(&str, &str)],
    mode: MatchMode,
) -> Vec<NodeId> {
    etree::iter_elements(doc, root)
        .into_iter()
        .filter(|&id| tag_is(doc, id, tag))
        .filter(|&id| matches_attrs(doc, id, attrs, mode))
        .collect()
}

/// Elements at or below `root` whose `attr` value is found by `pattern`.
///
/// Patterns are expected to carry `(?i)`; values are searched, not anchored.
#[must_use]
pub fn get_tags_by_regex(
    doc: &Document,
    root: NodeId,
    tag: Option<&str>,
    attr: &str,
    pattern: &Regex,
) -> Vec<NodeId> {
    etree::iter_elements(doc, root)
        .into_iter()
        .filter(|&id| tag_is(doc, id, tag))
        .filter(|&id| doc.attr(id, attr).is_some_and(|v| pattern.is_match(v)))
        .collect()
}

/// Descendants of `root` (not `root` itself) whose tag is in `tags`.
#[must_use]
pub fn get_elements_by_tags(doc: &Document, root: NodeId, tags: &[&str]) -> Vec<NodeId> {
    etree::iter_descendants(doc, root)
        .into_iter()
        .filter(|&id| doc.tag(id).is_some_and(|t| tags.contains(&t)))
        .collect()
}

/// Whether any descendant (excluding `id`) satisfies `pred`.
#[must_use]
pub fn has_descendant(doc: &Document, id: NodeId, pred: impl Fn(NodeId) -> bool) -> bool {
    etree::iter_descendants(doc, id).into_iter().any(pred)
}

fn tag_is(doc: &Document, id: NodeId, tag: Option<&str>) -> bool {
    match tag {
        Some(wanted) => doc.tag(id).is_some_and(|t| t.eq_ignore_ascii_case(wanted)),
        None => true,
    }
}

/// Distance from the tree root; the root itself is level 0.
#[must_use]
pub fn get_level(doc: &Document, id: NodeId) -> usize {
    let mut level = 0;
    let mut current = id;
    while let Some(parent) = doc.parent(current) {
        level += 1;
        current = parent;
    }
    level
}

/// Longest distance from `id` down to a leaf element; a leaf has depth 0.
#[must_use]
pub fn get_depth(doc: &Document, id: NodeId) -> usize {
    let mut max_depth = 0;
    let mut stack = vec![(id, 0usize)];
    while let Some((node, depth)) = stack.pop() {
        max_depth = max_depth.max(depth);
        for child in doc.element_children(node) {
            stack.push((child, depth + 1));
        }
    }
    max_depth
}

/// Every element at `level`, breadth-first from the root.
///
/// Nodes under different parents come out in level order, which follows
/// their parents' order; it is not guaranteed to be document order across
/// branches of unequal shape.
#[must_use]
pub fn get_nodes_at_level(doc: &Document, level: usize) -> Vec<NodeId> {
    let mut found = Vec::new();
    let mut queue = VecDeque::from([(doc.root(), 0usize)]);
    while let Some((node, node_level)) = queue.pop_front() {
        if node_level == level {
            found.push(node);
            continue;
        }
        for child in doc.element_children(node) {
            queue.push_back((child, node_level + 1));
        }
    }
    found
}

/// Drop repeated ids, keeping the first occurrence of each.
#[must_use]
pub fn dedup_nodes(nodes: Vec<NodeId>) -> Vec<NodeId> {
    let mut seen = HashSet::with_capacity(nodes.len());
    nodes.into_iter().filter(|id| seen.insert(*id)).collect()
}
