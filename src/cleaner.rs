//! Document Cleaner
//!
//! Linear pipeline of independent passes that strip known boilerplate from
//! the tree before scoring. Every pass takes the tree root and returns it, is
//! a no-op when its pattern is absent, and tolerates nodes already detached
//! by an earlier pass.

use regex::Regex;

use crate::dom::{Document, NodeId};
use crate::etree;
use crate::patterns;
use crate::query::{self, MatchMode};

/// A single cleaning pass.
pub type CleaningPass = fn(&mut Document, NodeId) -> NodeId;

/// Passes in execution order. Body classes go first: one bad match there
/// would hide the whole document from the attribute rules that follow.
pub const CLEANING_PASSES: &[(&str, CleaningPass)] = &[
    ("body_classes", clean_body_classes),
    ("article_tags", clean_article_tags),
    ("em_tags", clean_em_tags),
    ("drop_caps", remove_drop_caps),
    ("scripts_styles", remove_scripts_styles),
    ("bad_tags", clean_bad_tags),
    ("structural_tags", remove_structural_tags),
    ("captions", remove_captions),
    ("social_and_related", remove_social_and_related),
    ("para_spans", clean_para_spans),
    ("reduce", reduce_tags),
];

/// Tags the reduce pass never unwraps.
const REDUCE_KEEP_TAGS: &[&str] = &[
    "p", "br", "img", "h1", "h2", "h3", "h4", "h5", "h6", "ul", "body", "article", "section",
    // Media containers carry no text but feed the video extractor.
    "iframe", "embed", "object", "video",
];

/// Removed wherever they appear.
const STRUCTURAL_TAGS: &[&str] = &["aside", "nav", "noscript", "menu"];

/// Run every pass over the document and return its root.
pub fn clean(doc: &mut Document) -> NodeId {
    let mut root = doc.root();
    let before = doc.len();
    for (name, pass) in CLEANING_PASSES {
        root = pass(doc, root);
        tracing::trace!(pass = name, "cleaning pass done");
    }
    let remaining = etree::iter_elements(doc, root).len();
    tracing::debug!(arena = before, remaining, "document cleaned");
    root
}

/// Drop the `class` attribute of `<body>`.
pub fn clean_body_classes(doc: &mut Document, root: NodeId) -> NodeId {
    for body in query::get_tags(doc, root, Some("body"), &[], MatchMode::Exact) {
        doc.remove_attr(body, "class");
    }
    root
}

/// Drop `id`, `name` and `class` from `<article>` so the container itself
/// never trips a removal rule.
pub fn clean_article_tags(doc: &mut Document, root: NodeId) -> NodeId {
    for article in query::get_tags(doc, root, Some("article"), &[], MatchMode::Exact) {
        for attr in ["id", "name", "class"] {
            doc.remove_attr(article, attr);
        }
    }
    root
}

/// Unwrap `<em>` unless it holds an image.
pub fn clean_em_tags(doc: &mut Document, root: NodeId) -> NodeId {
    for em in query::get_tags(doc, root, Some("em"), &[], MatchMode::Exact) {
        let has_image = query::has_descendant(doc, em, |n| doc.tag(n) == Some("img"));
        if !has_image {
            etree::drop_tag(doc, em);
        }
    }
    root
}

/// Unwrap drop-cap decoration spans.
pub fn remove_drop_caps(doc: &mut Document, root: NodeId) -> NodeId {
    for class in ["dropcap", "drop_cap"] {
        for span in query::get_tags(doc, root, Some("span"), &[("class", class)], MatchMode::Word) {
            etree::drop_tag(doc, span);
        }
    }
    root
}

/// Remove `<script>`, `<style>` and comments outright.
pub fn remove_scripts_styles(doc: &mut Document, root: NodeId) -> NodeId {
    for id in etree::iter(doc, root) {
        let doomed = doc.is_comment(id) || matches!(doc.tag(id), Some("script" | "style"));
        if doomed {
            etree::remove(doc, id);
        }
    }
    root
}

/// Remove nodes whose id, class or name matches the boilerplate list, unless
/// they wrap the real article. One pass per attribute, in that order.
pub fn clean_bad_tags(doc: &mut Document, root: NodeId) -> NodeId {
    for attr in ["id", "class", "name"] {
        for node in query::get_tags_by_regex(doc, root, None, attr, &patterns::REMOVE_NODES) {
            if etree::is_within(doc, node, root) && !wraps_article(doc, node) {
                etree::remove(doc, node);
            }
        }
    }
    root
}

/// Whether `id` contains an `<article>`, an `id="article"` element or an
/// `itemprop` mentioning `articleBody`.
fn wraps_article(doc: &Document, id: NodeId) -> bool {
    query::has_descendant(doc, id, |n| {
        doc.tag(n) == Some("article")
            || doc
                .attr(n, "id")
                .is_some_and(|v| query::attr_matches(v, "article", MatchMode::Exact))
            || doc
                .attr(n, "itemprop")
                .is_some_and(|v| query::attr_matches(v, "articleBody", MatchMode::Substring))
    })
}

/// Remove `<aside>`, `<nav>`, `<noscript>` and `<menu>`.
pub fn remove_structural_tags(doc: &mut Document, root: NodeId) -> NodeId {
    etree::strip_elements(doc, root, STRUCTURAL_TAGS);
    root
}

/// Remove figure captions and caption-like widgets.
pub fn remove_captions(doc: &mut Document, root: NodeId) -> NodeId {
    let mut doomed = query::get_tags(doc, root, Some("figcaption"), &[], MatchMode::Exact);
    doomed.extend(query::get_tags(doc, root, None, &[("itemprop", "caption")], MatchMode::Exact));
    doomed.extend(query::get_tags(doc, root, None, &[("class", "instagram-media")], MatchMode::Exact));
    doomed.extend(query::get_tags(doc, root, None, &[("class", "image-caption")], MatchMode::Exact));
    for tag in ["div", "span", "header"] {
        doomed.extend(query::get_tags(doc, root, Some(tag), &[("class", "caption")], MatchMode::Substring));
    }

    for node in query::dedup_nodes(doomed) {
        if etree::is_within(doc, node, root) {
            etree::remove(doc, node);
        }
    }
    root
}

/// Remove ad slots, "more" links, social widgets and related-content blocks.
pub fn remove_social_and_related(doc: &mut Document, root: NodeId) -> NodeId {
    let patterns: [&Regex; 6] = [
        &patterns::GOOGLE,
        &patterns::ENTRIES,
        &patterns::FACEBOOK,
        &patterns::FACEBOOK_BROADCASTING,
        &patterns::TWITTER,
        &patterns::RELATED,
    ];
    for pattern in patterns {
        remove_nodes_regex(doc, root, pattern);
    }
    root
}

/// Remove every node whose id or class matches `pattern`.
pub fn remove_nodes_regex(doc: &mut Document, root: NodeId, pattern: &Regex) {
    for attr in ["id", "class"] {
        for node in query::get_tags_by_regex(doc, root, None, attr, pattern) {
            if node != root && etree::is_within(doc, node, root) {
                etree::remove(doc, node);
            }
        }
    }
}

/// Unwrap `<span>` children of `<p>`.
pub fn clean_para_spans(doc: &mut Document, root: NodeId) -> NodeId {
    for span in query::get_tags(doc, root, Some("span"), &[], MatchMode::Exact) {
        let in_paragraph = doc.parent(span).is_some_and(|p| doc.tag(p) == Some("p"));
        if in_paragraph {
            etree::drop_tag(doc, span);
        }
    }
    root
}

/// Unwrap body elements outside the keep set that carry no text at all,
/// neither inside nor after them. Their children move up in place.
pub fn reduce_tags(doc: &mut Document, root: NodeId) -> NodeId {
    let Some(body) = query::get_tags(doc, root, Some("body"), &[], MatchMode::Exact).first().copied() else {
        return root;
    };

    for node in etree::iter_descendants(doc, body) {
        if doc.tag(node).is_some_and(|t| REDUCE_KEEP_TAGS.contains(&t)) {
            continue;
        }
        let empty = etree::text_content(doc, node).trim().is_empty() && doc.tail(node).trim().is_empty();
        if empty {
            etree::drop_tag(doc, node);
        }
    }
    root
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cleaned(html: &str) -> (Document, NodeId) {
        let mut doc = Document::parse(html);
        let root = clean(&mut doc);
        (doc, root)
    }

    fn body_html(doc: &Document) -> String {
        match doc.body() {
            Some(body) => doc.inner_html(body),
            None => panic!("document lost its body"),
        }
    }

    #[test]
    fn test_body_class_is_dropped_first() {
        let (doc, _) = cleaned(r#"<body class="footer-page"><p>Kept text here.</p></body>"#);
        let body = doc.body().unwrap_or(doc.root());
        assert_eq!(doc.attr(body, "class"), None);
        assert_eq!(body_html(&doc), "<p>Kept text here.</p>");
    }

    #[test]
    fn test_article_attributes_are_dropped() {
        let (doc, _) = cleaned(r#"<article id="comments" class="tools" name="x"><p>Story.</p></article>"#);
        let article = query::get_tags(&doc, doc.root(), Some("article"), &[], MatchMode::Exact);
        assert_eq!(article.len(), 1);
        assert!(doc.attrs(article[0]).is_empty());
    }

    #[test]
    fn test_em_unwrapped_unless_image() {
        let mut doc = Document::parse(r#"<p>an <em>emphasised</em> word <em><img src="a.png"></em></p>"#);
        let root = doc.root();
        clean_em_tags(&mut doc, root);
        assert_eq!(body_html(&doc), r#"<p>an emphasised word <em><img src="a.png"></em></p>"#);
    }

    #[test]
    fn test_dropcap_merges_without_space() {
        let (doc, _) = cleaned(r#"<p><span class="dropcap">T</span>his is a test</p>"#);
        assert_eq!(body_html(&doc), "<p>This is a test</p>");
    }

    #[test]
    fn test_dropcap_word_match_only() {
        let mut doc = Document::parse(r#"<div><span class="dropcapish">X</span>yz</div>"#);
        let root = doc.root();
        remove_drop_caps(&mut doc, root);
        assert_eq!(body_html(&doc), r#"<div><span class="dropcapish">X</span>yz</div>"#);
    }

    #[test]
    fn test_scripts_styles_comments_removed_keeping_tails() {
        let (doc, _) = cleaned("<p>one<script>x()</script> two<!-- c --> three<style>p{}</style></p>");
        assert_eq!(body_html(&doc), "<p>one two three</p>");
    }

    #[test]
    fn test_bad_tags_removed() {
        let (doc, _) = cleaned(
            r#"<div id="navbar"><p>Home</p></div><div class="share-tools"><p>Share</p></div><p>Body text.</p>"#,
        );
        assert_eq!(body_html(&doc), "<p>Body text.</p>");
    }

    #[test]
    fn test_bad_tags_protect_article_wrappers() {
        let (doc, _) = cleaned(
            r#"<div class="comment-wrapper"><div itemprop="articleBody"><p>Real story.</p></div></div>"#,
        );
        assert!(body_html(&doc).contains("Real story."));
    }

    #[test]
    fn test_structural_tags_removed() {
        let (doc, _) = cleaned("<nav><p>Menu</p></nav><aside><p>Side</p></aside><p>Text.</p><noscript><p>JS</p></noscript>");
        assert_eq!(body_html(&doc), "<p>Text.</p>");
    }

    #[test]
    fn test_captions_removed() {
        let (doc, _) = cleaned(
            r#"<figure><img src="a.png"><figcaption>Cap one</figcaption></figure>
            <div class="photo-caption">Cap two</div>
            <p class="caption">Paragraph stays.</p>
            <blockquote class="instagram-media">Insta</blockquote>"#,
        );
        let html = body_html(&doc);
        assert!(!html.contains("Cap one"));
        assert!(!html.contains("Cap two"));
        assert!(!html.contains("Insta"));
        assert!(html.contains("Paragraph stays."));
    }

    #[test]
    fn test_social_and_related_removed() {
        let (doc, _) = cleaned(
            r#"<div class="x facebook-like"><p>Like</p></div><div id="related-links"><p>More</p></div><p>Story.</p>"#,
        );
        assert_eq!(body_html(&doc), "<p>Story.</p>");
    }

    #[test]
    fn test_para_spans_unwrapped() {
        let (doc, _) = cleaned(r#"<p>Some <span>inline</span> text</p>"#);
        assert_eq!(body_html(&doc), "<p>Some inline text</p>");
    }

    #[test]
    fn test_reduce_unwraps_empty_wrappers() {
        let (doc, _) = cleaned(r#"<div><div><img src="a.png"></div></div><div><p>Text.</p></div>"#);
        assert_eq!(body_html(&doc), r#"<img src="a.png"><div><p>Text.</p></div>"#);
    }

    #[test]
    fn test_clean_is_idempotent() {
        let html = r#"<html><body class="b"><nav>n</nav><div id="main"><span class="dropcap">O</span>nce
            <div class="footer">f</div><p>First <span>para</span>.</p><em>note</em>
            <div><div></div></div><script>s()</script><p>Second para.</p></div></body></html>"#;
        let (mut doc, root) = cleaned(html);
        let first = doc.html();
        clean(&mut doc);
        assert_eq!(doc.html(), first);
        assert_eq!(root, doc.root());
    }

    #[test]
    fn test_passes_tolerate_missing_patterns() {
        let mut doc = Document::parse("<p>plain</p>");
        let root = doc.root();
        for (_, pass) in CLEANING_PASSES {
            assert_eq!(pass(&mut doc, root), root);
        }
        assert_eq!(body_html(&doc), "<p>plain</p>");
    }
}
