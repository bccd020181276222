//! Arena Element Tree
//!
//! The extraction core works on an lxml-style element tree converted once from
//! the `dom_query` parse. Nodes live in a `Vec` and are addressed by
//! [`NodeId`]; the parent link is a plain index, so there are no reference
//! cycles and a node's identity survives any amount of re-parenting.
//!
//! ## Text vs Tail
//!
//! Character data is not a node. Each element carries:
//! - **Text**: character data BEFORE its first child
//! - **Tail**: character data AFTER its end tag, up to the next sibling
//!
//! ```html
//! <div>
//!   TEXT HERE          <!-- div's "text" -->
//!   <span>inner</span>
//!   TAIL HERE          <!-- span's "tail" -->
//! </div>
//! ```
//!
//! Tree surgery that respects this model lives in [`crate::etree`].

use dom_query::NodeRef;
pub use tendril::StrTendril;

/// Elements that never have an end tag.
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input",
    "link", "meta", "param", "source", "track", "wbr",
];

/// Elements whose character data is serialized without escaping.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// Stable handle of a node inside one [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the node in the arena.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// What a node is.
#[derive(Debug, Clone)]
pub enum NodeKind {
    /// An element with its lower-cased tag name and attributes in source order.
    Element {
        name: String,
        attrs: Vec<(String, String)>,
    },
    /// An HTML comment.
    Comment(String),
}

#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub(crate) kind: NodeKind,
    pub(crate) text: StrTendril,
    pub(crate) tail: StrTendril,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl Node {
    fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            text: StrTendril::new(),
            tail: StrTendril::new(),
            parent: None,
            children: Vec::new(),
        }
    }
}

/// An element tree rooted at `<html>`.
///
/// Removing a node only unlinks it; its slot stays in the arena, so ids held
/// by callers never dangle and every mutation on a detached node is a no-op
/// with respect to the live tree.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Document {
    /// Parse an HTML string.
    ///
    /// Parsing never fails: the HTML5 parser recovers from any markup and
    /// synthesizes `<html>`, `<head>` and `<body>` when missing.
    #[must_use]
    pub fn parse(html: &str) -> Self {
        let parsed = dom_query::Document::from(html);
        Self::from_dom(&parsed)
    }

    /// Convert a `dom_query` document into an arena tree.
    ///
    /// Only elements and comments become nodes; text nodes are folded into
    /// the owning element's text or the preceding sibling's tail. Anything
    /// outside `<html>` (doctype, stray comments) is dropped.
    #[must_use]
    pub fn from_dom(parsed: &dom_query::Document) -> Self {
        let html = parsed
            .root()
            .children()
            .into_iter()
            .find(|n| n.is_element() && n.node_name().is_some_and(|name| name.eq_ignore_ascii_case("html")));

        let Some(html) = html else {
            return Self::synthetic();
        };

        let mut doc = Self::with_root(NodeKind::Element {
            name: "html".to_string(),
            attrs: attrs_of(&html),
        });

        let mut stack = vec![(html, doc.root)];
        while let Some((source, target)) = stack.pop() {
            for child in source.children() {
                if child.is_text() {
                    let text = child.text();
                    doc.append_text(target, &text);
                } else if child.is_element() {
                    let name = child
                        .node_name()
                        .map(|n| n.to_ascii_lowercase())
                        .unwrap_or_default();
                    let id = doc.push_node(Node::new(NodeKind::Element {
                        name,
                        attrs: attrs_of(&child),
                    }));
                    doc.append_child(target, id);
                    stack.push((child, id));
                } else if child.is_comment() {
                    let contents = child
                        .query(|node| match &node.data {
                            dom_query::NodeData::Comment { contents } => String::from(&**contents),
                            _ => String::new(),
                        })
                        .unwrap_or_default();
                    let id = doc.push_node(Node::new(NodeKind::Comment(contents)));
                    doc.append_child(target, id);
                }
            }
        }

        doc
    }

    /// A minimal `<html><body></body></html>` document.
    #[must_use]
    pub fn synthetic() -> Self {
        let mut doc = Self::with_root(NodeKind::Element {
            name: "html".to_string(),
            attrs: Vec::new(),
        });
        let body = doc.create_element("body");
        doc.append_child(doc.root, body);
        doc
    }

    fn with_root(kind: NodeKind) -> Self {
        Self {
            nodes: vec![Node::new(kind)],
            root: NodeId(0),
        }
    }

    fn push_node(&mut self, node: Node) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    pub(crate) fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    // === Navigation ===

    /// The `<html>` element.
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The `<body>` element, if the root has one.
    #[must_use]
    pub fn body(&self) -> Option<NodeId> {
        self.child_by_tag(self.root, "body")
    }

    /// The `<head>` element, if the root has one.
    #[must_use]
    pub fn head(&self) -> Option<NodeId> {
        self.child_by_tag(self.root, "head")
    }

    fn child_by_tag(&self, parent: NodeId, tag: &str) -> Option<NodeId> {
        self.node(parent)
            .children
            .iter()
            .copied()
            .find(|&c| self.tag(c) == Some(tag))
    }

    /// Number of arena slots, attached or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the arena holds nothing but the root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    /// Children in order, comments included.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    /// Element children in order.
    #[must_use]
    pub fn element_children(&self, id: NodeId) -> Vec<NodeId> {
        self.node(id)
            .children
            .iter()
            .copied()
            .filter(|&c| self.is_element(c))
            .collect()
    }

    /// Position among the parent's children.
    #[must_use]
    pub fn index_in_parent(&self, id: NodeId) -> Option<usize> {
        let parent = self.parent(id)?;
        self.node(parent).children.iter().position(|&c| c == id)
    }

    /// The sibling immediately before `id`, of any kind.
    #[must_use]
    pub fn previous_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let index = self.index_in_parent(id)?;
        index
            .checked_sub(1)
            .map(|i| self.node(parent).children[i])
    }

    /// Element siblings before `id`, nearest first.
    #[must_use]
    pub fn preceding_element_siblings(&self, id: NodeId) -> Vec<NodeId> {
        let (Some(parent), Some(index)) = (self.parent(id), self.index_in_parent(id)) else {
            return Vec::new();
        };
        self.node(parent).children[..index]
            .iter()
            .rev()
            .copied()
            .filter(|&c| self.is_element(c))
            .collect()
    }

    /// Whether `id` is still reachable from the root.
    #[must_use]
    pub fn is_attached(&self, id: NodeId) -> bool {
        let mut current = id;
        loop {
            if current == self.root {
                return true;
            }
            match self.parent(current) {
                Some(p) => current = p,
                None => return false,
            }
        }
    }

    // === Node information ===

    /// Lower-cased tag name; `None` for comments.
    #[must_use]
    pub fn tag(&self, id: NodeId) -> Option<&str> {
        match &self.node(id).kind {
            NodeKind::Element { name, .. } => Some(name.as_str()),
            NodeKind::Comment(_) => None,
        }
    }

    #[must_use]
    pub fn is_element(&self, id: NodeId) -> bool {
        matches!(self.node(id).kind, NodeKind::Element { .. })
    }

    #[must_use]
    pub fn is_comment(&self, id: NodeId) -> bool {
        matches!(self.node(id).kind, NodeKind::Comment(_))
    }

    #[must_use]
    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.node(id).kind
    }

    #[must_use]
    pub fn text(&self, id: NodeId) -> &str {
        &self.node(id).text
    }

    #[must_use]
    pub fn tail(&self, id: NodeId) -> &str {
        &self.node(id).tail
    }

    // === Attributes ===

    /// Attribute value, matching the name case-insensitively.
    #[must_use]
    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        match &self.node(id).kind {
            NodeKind::Element { attrs, .. } => attrs
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(name))
                .map(|(_, v)| v.as_str()),
            NodeKind::Comment(_) => None,
        }
    }

    /// All attributes in source order.
    #[must_use]
    pub fn attrs(&self, id: NodeId) -> &[(String, String)] {
        match &self.node(id).kind {
            NodeKind::Element { attrs, .. } => attrs,
            NodeKind::Comment(_) => &[],
        }
    }

    pub fn set_attr(&mut self, id: NodeId, name: &str, value: &str) {
        if let NodeKind::Element { attrs, .. } = &mut self.node_mut(id).kind {
            match attrs.iter_mut().find(|(k, _)| k.eq_ignore_ascii_case(name)) {
                Some(slot) => slot.1 = value.to_string(),
                None => attrs.push((name.to_ascii_lowercase(), value.to_string())),
            }
        }
    }

    pub fn remove_attr(&mut self, id: NodeId, name: &str) {
        if let NodeKind::Element { attrs, .. } = &mut self.node_mut(id).kind {
            attrs.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        }
    }

    /// Drop every attribute not accepted by `keep`.
    pub fn retain_attrs(&mut self, id: NodeId, keep: impl Fn(&str) -> bool) {
        if let NodeKind::Element { attrs, .. } = &mut self.node_mut(id).kind {
            attrs.retain(|(k, _)| keep(k));
        }
    }

    // === Construction ===

    /// Create a detached element.
    pub fn create_element(&mut self, name: &str) -> NodeId {
        self.push_node(Node::new(NodeKind::Element {
            name: name.to_ascii_lowercase(),
            attrs: Vec::new(),
        }))
    }

    /// Append `child` as the last child of `parent`, unlinking it from any
    /// previous parent first. Tails travel with the node.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        self.node_mut(child).parent = Some(parent);
        self.node_mut(parent).children.push(child);
    }

    /// Append character data at the end of `parent`'s content.
    pub fn append_text(&mut self, parent: NodeId, text: &str) {
        if text.is_empty() {
            return;
        }
        match self.node(parent).children.last().copied() {
            Some(last) => self.node_mut(last).tail.push_slice(text),
            None => self.node_mut(parent).text.push_slice(text),
        }
    }

    pub fn set_text(&mut self, id: NodeId, text: &str) {
        self.node_mut(id).text = StrTendril::from_slice(text);
    }

    pub fn set_tail(&mut self, id: NodeId, tail: &str) {
        self.node_mut(id).tail = StrTendril::from_slice(tail);
    }

    /// Unlink `id` from its parent without touching any text.
    pub(crate) fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.node(id).parent {
            self.node_mut(parent).children.retain(|&c| c != id);
            self.node_mut(id).parent = None;
        }
    }

    /// Deep-copy the subtree at `src` into `dst` as the last child of
    /// `dst_parent`.
    ///
    /// The copied root does not take its tail along: that text belongs to the
    /// source parent. Returns `(source, copy)` id pairs in pre-order so callers
    /// can carry side tables over to the new tree.
    pub fn deep_copy_into(
        &self,
        src: NodeId,
        dst: &mut Document,
        dst_parent: NodeId,
    ) -> Vec<(NodeId, NodeId)> {
        let source = self.node(src);
        let mut copy = Node::new(source.kind.clone());
        copy.text = source.text.clone();
        let new_root = dst.push_node(copy);
        dst.append_child(dst_parent, new_root);

        let mut mapping = vec![(src, new_root)];
        let mut stack = vec![(src, new_root)];
        while let Some((from, to)) = stack.pop() {
            for &child in &self.node(from).children {
                let source = self.node(child);
                let mut copy = Node::new(source.kind.clone());
                copy.text = source.text.clone();
                copy.tail = source.tail.clone();
                let new_id = dst.push_node(copy);
                dst.append_child(to, new_id);
                mapping.push((child, new_id));
                stack.push((child, new_id));
            }
        }
        mapping
    }

    // === Serialization ===

    /// Serialize `id` and its subtree (without its own tail).
    #[must_use]
    pub fn outer_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_subtree(id, &mut out);
        out
    }

    /// Serialize the content of `id`: its text, then every child with tails.
    #[must_use]
    pub fn inner_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        let name = self.tag(id).unwrap_or_default();
        write_text(name, self.text(id), &mut out);
        for &child in self.children(id) {
            self.write_subtree(child, &mut out);
            out.push_str(&html_escape::encode_text(self.tail(child)));
        }
        out
    }

    /// Serialize the whole document.
    #[must_use]
    pub fn html(&self) -> String {
        self.outer_html(self.root)
    }

    fn write_subtree(&self, start: NodeId, out: &mut String) {
        enum Step {
            Open(NodeId),
            Close(NodeId),
        }

        let mut stack = vec![Step::Open(start)];
        while let Some(step) = stack.pop() {
            match step {
                Step::Open(id) => match &self.node(id).kind {
                    NodeKind::Comment(content) => {
                        out.push_str("<!--");
                        out.push_str(content);
                        out.push_str("-->");
                        if id != start {
                            out.push_str(&html_escape::encode_text(self.tail(id)));
                        }
                    }
                    NodeKind::Element { name, attrs } => {
                        out.push('<');
                        out.push_str(name);
                        for (key, value) in attrs {
                            out.push(' ');
                            out.push_str(key);
                            out.push_str("=\"");
                            out.push_str(&html_escape::encode_double_quoted_attribute(value));
                            out.push('"');
                        }
                        out.push('>');
                        if VOID_ELEMENTS.contains(&name.as_str()) {
                            if id != start {
                                out.push_str(&html_escape::encode_text(self.tail(id)));
                            }
                            continue;
                        }
                        write_text(name, self.text(id), out);
                        stack.push(Step::Close(id));
                        for &child in self.children(id).iter().rev() {
                            stack.push(Step::Open(child));
                        }
                    }
                },
                Step::Close(id) => {
                    out.push_str("</");
                    out.push_str(self.tag(id).unwrap_or_default());
                    out.push('>');
                    if id != start {
                        out.push_str(&html_escape::encode_text(self.tail(id)));
                    }
                }
            }
        }
    }
}

fn write_text(element: &str, text: &str, out: &mut String) {
    if RAW_TEXT_ELEMENTS.contains(&element) {
        out.push_str(text);
    } else {
        out.push_str(&html_escape::encode_text(text));
    }
}

fn attrs_of(node: &NodeRef) -> Vec<(String, String)> {
    node.attrs()
        .iter()
        .map(|attr| (attr.name.local.to_ascii_lowercase().to_string(), attr.value.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first(doc: &Document, tag: &str) -> NodeId {
        let mut stack = vec![doc.root()];
        while let Some(id) = stack.pop() {
            if doc.tag(id) == Some(tag) {
                return id;
            }
            stack.extend(doc.children(id).iter().rev().copied());
        }
        panic!("no <{tag}> in document");
    }

    #[test]
    fn test_parse_builds_text_and_tail() {
        let doc = Document::parse("<div>before <b>bold</b> after</div>");
        let div = first(&doc, "div");
        let b = first(&doc, "b");

        assert_eq!(doc.text(div), "before ");
        assert_eq!(doc.text(b), "bold");
        assert_eq!(doc.tail(b), " after");
        assert_eq!(doc.parent(b), Some(div));
    }

    #[test]
    fn test_comment_contents_survive_serialization() {
        let doc = Document::parse("<div>a<!-- keep me -->b</div>");
        let div = first(&doc, "div");
        assert_eq!(doc.inner_html(div), "a<!-- keep me -->b");
        assert!(doc.is_comment(doc.children(div)[0]));
    }

    #[test]
    fn test_parse_synthesizes_html_body() {
        let doc = Document::parse("<p>loose paragraph</p>");
        assert_eq!(doc.tag(doc.root()), Some("html"));
        assert!(doc.body().is_some());
        assert!(doc.head().is_some());
    }

    #[test]
    fn test_parse_keeps_comments_as_nodes() {
        let doc = Document::parse("<div>a<!-- note -->b</div>");
        let div = first(&doc, "div");
        let children = doc.children(div);

        assert_eq!(children.len(), 1);
        assert!(doc.is_comment(children[0]));
        assert_eq!(doc.text(div), "a");
        assert_eq!(doc.tail(children[0]), "b");
    }

    #[test]
    fn test_attributes_case_insensitive() {
        let mut doc = Document::parse(r#"<div ID="main" class="x">t</div>"#);
        let div = first(&doc, "div");

        assert_eq!(doc.attr(div, "id"), Some("main"));
        assert_eq!(doc.attr(div, "Class"), Some("x"));

        doc.set_attr(div, "class", "y");
        doc.remove_attr(div, "id");
        assert_eq!(doc.attr(div, "class"), Some("y"));
        assert_eq!(doc.attr(div, "id"), None);
    }

    #[test]
    fn test_detach_makes_unreachable() {
        let mut doc = Document::parse("<div><p>x</p></div>");
        let p = first(&doc, "p");
        assert!(doc.is_attached(p));

        doc.detach(p);
        assert!(!doc.is_attached(p));
        // A second detach is harmless.
        doc.detach(p);
        assert_eq!(doc.parent(p), None);
    }

    #[test]
    fn test_preceding_element_siblings_nearest_first() {
        let doc = Document::parse("<div><p id='a'>1</p><!--c--><p id='b'>2</p><p id='c'>3</p></div>");
        let c = first(&doc, "div");
        let last = *doc.element_children(c).last().unwrap_or(&c);

        let before: Vec<_> = doc
            .preceding_element_siblings(last)
            .into_iter()
            .filter_map(|s| doc.attr(s, "id").map(str::to_string))
            .collect();
        assert_eq!(before, vec!["b", "a"]);
    }

    #[test]
    fn test_deep_copy_is_independent() {
        let source = Document::parse("<div id='top'><p>one</p>tail<p>two</p></div>after");
        let div = first(&source, "div");
        let mut target = Document::synthetic();
        let body = target.body().unwrap_or(target.root());

        let mapping = source.deep_copy_into(div, &mut target, body);
        assert_eq!(mapping.len(), 3);
        assert_eq!(mapping[0].0, div);

        let copy = mapping[0].1;
        target.set_attr(copy, "id", "changed");
        assert_eq!(source.attr(div, "id"), Some("top"));
        assert_eq!(target.outer_html(copy), r#"<div id="changed"><p>one</p>tail<p>two</p></div>"#);
        // The copied root leaves its tail behind.
        assert_eq!(target.tail(copy), "");
    }

    #[test]
    fn test_serialization_escapes_text_and_attributes() {
        let doc = Document::parse(r#"<p title="a&quot;b">1 &lt; 2 &amp; <br>3</p>"#);
        let p = first(&doc, "p");
        assert_eq!(doc.outer_html(p), r#"<p title="a&quot;b">1 &lt; 2 &amp; <br>3</p>"#);
        assert_eq!(doc.inner_html(p), "1 &lt; 2 &amp; <br>3");
    }

    #[test]
    fn test_synthetic_document_shape() {
        let doc = Document::synthetic();
        assert_eq!(doc.html(), "<html><body></body></html>");
    }
}
