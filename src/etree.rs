//! Element Tree (etree) Utilities
//!
//! Tree surgery on the arena [`Document`] that keeps the text/tail model
//! intact. Removing or unwrapping an element never loses the character data
//! that followed it.
//!
//! All traversals are iterative so deeply nested markup cannot overflow the
//! stack.

use crate::dom::{Document, NodeId, StrTendril};

/// Character data before the first child.
#[must_use]
pub fn text(doc: &Document, id: NodeId) -> &str {
    doc.text(id)
}

/// Character data after the end tag.
#[must_use]
pub fn tail(doc: &Document, id: NodeId) -> &str {
    doc.tail(id)
}

pub fn set_text(doc: &mut Document, id: NodeId, value: &str) {
    doc.set_text(id, value);
}

pub fn set_tail(doc: &mut Document, id: NodeId, value: &str) {
    doc.set_tail(id, value);
}

/// Pre-order walk of `root` and everything below it, comments included.
#[must_use]
pub fn iter(doc: &Document, root: NodeId) -> Vec<NodeId> {
    let mut out = Vec::new();
    let mut stack = vec![root];
    while let Some(id) = stack.pop() {
        out.push(id);
        stack.extend(doc.children(id).iter().rev().copied());
    }
    out
}

/// Pre-order walk of the elements at and below `root`.
#[must_use]
pub fn iter_elements(doc: &Document, root: NodeId) -> Vec<NodeId> {
    iter(doc, root)
        .into_iter()
        .filter(|&id| doc.is_element(id))
        .collect()
}

/// Descendant elements of `root` in document order, `root` excluded.
#[must_use]
pub fn iter_descendants(doc: &Document, root: NodeId) -> Vec<NodeId> {
    iter(doc, root)
        .into_iter()
        .skip(1)
        .filter(|&id| doc.is_element(id))
        .collect()
}

/// Concatenated character data of the subtree: the node's text, then each
/// descendant's text and tail in document order. The node's own tail is not
/// part of its content.
#[must_use]
pub fn iter_text(doc: &Document, root: NodeId) -> String {
    let mut out = String::new();
    walk_text(doc, root, &mut out, |_, _| false, None);
    out
}

/// Alias of [`iter_text`] under its DOM name.
#[must_use]
pub fn text_content(doc: &Document, root: NodeId) -> String {
    iter_text(doc, root)
}

/// Text collection with subtree skipping and optional block separators.
///
/// `skip` decides which descendant subtrees contribute nothing (their tails
/// still count). When `block_separator` is set, it is emitted before and after
/// every element for which `is_block` holds.
pub(crate) fn walk_text(
    doc: &Document,
    root: NodeId,
    out: &mut String,
    skip: impl Fn(&Document, NodeId) -> bool,
    block_separator: Option<(&str, &dyn Fn(&Document, NodeId) -> bool)>,
) {
    enum Step {
        Enter(NodeId),
        Leave(NodeId),
    }

    let separator_for = |id: NodeId| -> Option<&str> {
        block_separator.and_then(|(sep, is_block)| is_block(doc, id).then_some(sep))
    };

    let mut stack = vec![Step::Enter(root)];
    while let Some(step) = stack.pop() {
        match step {
            Step::Enter(id) => {
                stack.push(Step::Leave(id));
                if doc.is_comment(id) || (id != root && skip(doc, id)) {
                    continue;
                }
                if id != root {
                    if let Some(sep) = separator_for(id) {
                        out.push_str(sep);
                    }
                }
                out.push_str(doc.text(id));
                for &child in doc.children(id).iter().rev() {
                    stack.push(Step::Enter(child));
                }
            }
            Step::Leave(id) => {
                if id == root {
                    continue;
                }
                if doc.is_element(id) && !skip(doc, id) {
                    if let Some(sep) = separator_for(id) {
                        out.push_str(sep);
                    }
                }
                out.push_str(doc.tail(id));
            }
        }
    }
}

/// Remove `id` and its subtree, keeping its tail.
///
/// The tail is appended to the previous sibling's tail, or to the parent's
/// text when `id` is the first child. A separating space is inserted when
/// both sides would otherwise run together. Detached nodes are left alone.
pub fn remove(doc: &mut Document, id: NodeId) {
    let Some(parent) = doc.parent(id) else {
        return;
    };

    let tail = std::mem::replace(&mut doc.node_mut(id).tail, StrTendril::new());
    if !tail.is_empty() {
        let target = match doc.previous_sibling(id) {
            Some(prev) => &mut doc.node_mut(prev).tail,
            None => &mut doc.node_mut(parent).text,
        };
        join_text(target, &tail);
    }

    doc.detach(id);
}

/// Unwrap `id`: its text, children and tail take its place in the parent.
///
/// `<p><span>T</span>his</p>` becomes `<p>This</p>`.
pub fn strip(doc: &mut Document, id: NodeId) {
    let (Some(parent), Some(index)) = (doc.parent(id), doc.index_in_parent(id)) else {
        return;
    };
    let prev = doc.previous_sibling(id);

    let node = doc.node_mut(id);
    let text = std::mem::replace(&mut node.text, StrTendril::new());
    let tail = std::mem::replace(&mut node.tail, StrTendril::new());
    let children = std::mem::take(&mut node.children);
    node.parent = None;

    if !text.is_empty() {
        match prev {
            Some(p) => doc.node_mut(p).tail.push_tendril(&text),
            None => doc.node_mut(parent).text.push_tendril(&text),
        }
    }

    for &child in &children {
        doc.node_mut(child).parent = Some(parent);
    }
    let last_moved = children.last().copied();

    let siblings = &mut doc.node_mut(parent).children;
    let rest = siblings.split_off(index);
    siblings.extend(children);
    siblings.extend(rest.into_iter().skip(1));

    if !tail.is_empty() {
        match last_moved.or(prev) {
            Some(n) => doc.node_mut(n).tail.push_tendril(&tail),
            None => doc.node_mut(parent).text.push_tendril(&tail),
        }
    }
}

/// Alias of [`strip`] under its lxml name.
pub fn drop_tag(doc: &mut Document, id: NodeId) {
    strip(doc, id);
}

/// Unwrap every descendant of `root` whose tag is in `tags`.
pub fn strip_tags(doc: &mut Document, root: NodeId, tags: &[&str]) {
    for id in iter_descendants(doc, root) {
        if doc.tag(id).is_some_and(|t| tags.contains(&t)) {
            strip(doc, id);
        }
    }
}

/// Remove every descendant of `root` whose tag is in `tags`, keeping tails.
pub fn strip_elements(doc: &mut Document, root: NodeId, tags: &[&str]) {
    for id in iter_descendants(doc, root) {
        if is_within(doc, id, root) && doc.tag(id).is_some_and(|t| tags.contains(&t)) {
            remove(doc, id);
        }
    }
}

/// Whether `id` is `ancestor` or still hangs below it.
#[must_use]
pub fn is_within(doc: &Document, id: NodeId, ancestor: NodeId) -> bool {
    let mut current = Some(id);
    while let Some(node) = current {
        if node == ancestor {
            return true;
        }
        current = doc.parent(node);
    }
    false
}

/// Drop every child of `id`, tails included.
pub fn clear_children(doc: &mut Document, id: NodeId) {
    for child in doc.children(id).to_vec() {
        doc.detach(child);
    }
}

fn join_text(target: &mut StrTendril, addition: &str) {
    let needs_space = !target.is_empty()
        && !target.ends_with(char::is_whitespace)
        && !addition.starts_with(char::is_whitespace);
    if needs_space {
        target.push_char(' ');
    }
    target.push_slice(addition);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn find(doc: &Document, tag: &str) -> NodeId {
        match iter_elements(doc, doc.root()).into_iter().find(|&id| doc.tag(id) == Some(tag)) {
            Some(id) => id,
            None => panic!("no <{tag}> in document"),
        }
    }

    #[test]
    fn test_iter_text_includes_descendant_tails() {
        let doc = Document::parse("<div>a<b>b</b>c<i>d<u>e</u>f</i>g</div>tail");
        let div = find(&doc, "div");
        assert_eq!(iter_text(&doc, div), "abcdefg");
    }

    #[test]
    fn test_iter_text_skips_comments() {
        let doc = Document::parse("<p>one<!-- hidden -->two</p>");
        let p = find(&doc, "p");
        assert_eq!(text_content(&doc, p), "onetwo");
    }

    #[test]
    fn test_iter_descendants_document_order() {
        let doc = Document::parse("<div><p><b>x</b></p><span>y</span></div>");
        let div = find(&doc, "div");
        let tags: Vec<_> = iter_descendants(&doc, div)
            .into_iter()
            .filter_map(|id| doc.tag(id))
            .collect();
        assert_eq!(tags, vec!["p", "b", "span"]);
    }

    #[test]
    fn test_remove_preserves_tail_into_previous_sibling() {
        let mut doc = Document::parse("<div><p>one</p><span>gone</span>kept</div>");
        let div = find(&doc, "div");
        let span = find(&doc, "span");

        remove(&mut doc, span);
        assert_eq!(doc.inner_html(div), "<p>one</p>kept");
        assert!(!doc.is_attached(span));
    }

    #[test]
    fn test_remove_preserves_tail_into_parent_text() {
        let mut doc = Document::parse("<div>lead<span>gone</span> rest</div>");
        let div = find(&doc, "div");
        let span = find(&doc, "span");

        remove(&mut doc, span);
        assert_eq!(doc.text(div), "lead rest");
    }

    #[test]
    fn test_remove_detached_is_noop() {
        let mut doc = Document::parse("<div><span>x</span></div>");
        let span = find(&doc, "span");
        remove(&mut doc, span);
        remove(&mut doc, span);
        assert!(!doc.is_attached(span));
    }

    #[test]
    fn test_strip_merges_dropcap() {
        let mut doc = Document::parse(r#"<p><span class="dropcap">T</span>his is a test</p>"#);
        let p = find(&doc, "p");
        let span = find(&doc, "span");

        strip(&mut doc, span);
        assert_eq!(doc.text(p), "This is a test");
        assert!(doc.children(p).is_empty());
    }

    #[test]
    fn test_strip_keeps_children_in_place() {
        let mut doc = Document::parse("<div><p>a</p><span>b<em>c</em>d</span>e<p>f</p></div>");
        let div = find(&doc, "div");
        let span = find(&doc, "span");

        drop_tag(&mut doc, span);
        assert_eq!(doc.inner_html(div), "<p>a</p>b<em>c</em>de<p>f</p>");
    }

    #[test]
    fn test_strip_tags_unwraps_all() {
        let mut doc = Document::parse("<div><b>bold</b> and <b>more <b>nested</b></b></div>");
        let div = find(&doc, "div");

        strip_tags(&mut doc, div, &["b"]);
        assert_eq!(doc.inner_html(div), "bold and more nested");
    }

    #[test]
    fn test_strip_elements_removes_subtrees() {
        let mut doc = Document::parse("<div>x<script>bad()</script>y</div>");
        let div = find(&doc, "div");

        strip_elements(&mut doc, div, &["script"]);
        assert_eq!(doc.inner_html(div), "xy");
    }

    #[test]
    fn test_set_text_and_clear() {
        let mut doc = Document::synthetic();
        let body = find(&doc, "body");
        let p = doc.create_element("p");
        doc.append_child(body, p);
        set_text(&mut doc, p, "hello");
        set_tail(&mut doc, p, "!");
        assert_eq!(doc.inner_html(body), "<p>hello</p>!");
        assert_eq!(text(&doc, p), "hello");
        assert_eq!(tail(&doc, p), "!");

        clear_children(&mut doc, body);
        assert_eq!(doc.inner_html(body), "");
    }
}
