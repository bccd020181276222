//! Compiled regex patterns for content extraction.
//!
//! All patterns are compiled once using `LazyLock`. They are organized by the
//! pipeline stage that consumes them. Every attribute pattern is
//! case-insensitive and searched (not anchored) unless it carries its own
//! anchors.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

// =============================================================================
// Cleaner: boilerplate removal
// =============================================================================

/// Matches id/class/name values of navigation, footers, share tools, bylines,
/// tag clouds, print and popup widgets.
pub static REMOVE_NODES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^side$|combx|retweet|mediaarticlerelated|menucontainer|navbar|storytopbar-bucket|utility-bar|inline-share-tools|comment|PopularQuestions|contact|foot|footer|Footer|footnote|cnn_strycaptiontxt|cnn_html_slideshow|cnn_strylftcntnt|links|meta$|shoutbox|sponsor|tags|socialnetworking|socialNetworking|cnnStryHghLght|cnn_stryspcvbx|^inset$|pagetools|post-attributes|welcome_form|contentTools2|the_answers|communitypromo|runaroundLeft|subscribe|vcard|articleheadings|date|^print$|popup|author-dropdown|tools|socialtools|byline|konafilter|KonaFilter|breadcrumbs|^fn$|wp-caption-text|legende|ajoutVideo|timestamp|js_replies",
    )
    .expect("REMOVE_NODES regex")
});

/// Literal `" google "` marker used by ad slots.
pub static GOOGLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i) google ").expect("GOOGLE regex"));

/// "More" links, excluding names that start like `entry-`.
pub static ENTRIES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^[^entry-]more.*$").expect("ENTRIES regex"));

/// Facebook widgets.
pub static FACEBOOK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)[^-]facebook").expect("FACEBOOK regex"));

/// Facebook live-broadcast embeds, which the plain pattern skips.
pub static FACEBOOK_BROADCASTING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)facebook-broadcasting").expect("FACEBOOK_BROADCASTING regex")
});

/// Twitter widgets.
pub static TWITTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)[^-]twitter").expect("TWITTER regex"));

/// "related-X" or "X-related" content blocks.
pub static RELATED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)related[-_](topics|media|tags|article|links|search|info|content)|(topics|media|tags|article|links|search|info|content)[-_]related",
    )
    .expect("RELATED regex")
});

// =============================================================================
// Scorer: candidate discovery and pre-boost
// =============================================================================

/// Divs whose class mentions paragraphs are candidate containers.
pub static PARAGRAPH_CLASS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)paragraph").expect("PARAGRAPH_CLASS regex"));

/// Common CMS article-body class names.
pub static ARTICLE_BODY_CLASS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)article[-_]?(body|content|text)|story[-_]?(body|content|text)|entry[-_]?content|post[-_]?(body|content)")
        .expect("ARTICLE_BODY_CLASS regex")
});

// =============================================================================
// Metadata
// =============================================================================

/// Separators between an article title and the site name.
pub static TITLE_SEPARATOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s+[|\-»–—/:]\s+|\s*\|\s*|_").expect("TITLE_SEPARATOR regex")
});

/// Leading "By" / "From" on bylines.
pub static BYLINE_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(?:written by|posted by|by|from)\b\s*:?\s*").expect("BYLINE_PREFIX regex")
});

/// Separators between several author names.
pub static AUTHOR_SEPARATOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\s*(?:,|\band\b|&|\|)\s*").expect("AUTHOR_SEPARATOR regex")
});

/// `/2024/05/17/` or `/2024-05-17/` inside a URL path.
pub static URL_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/((?:19|20)\d{2})[/-](0?[1-9]|1[0-2])[/-](0?[1-9]|[12]\d|3[01])(?:/|$|[-_.])")
        .expect("URL_DATE regex")
});

// =============================================================================
// Media
// =============================================================================

/// Embedded players of known video hosts.
pub static VIDEO_PROVIDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:^|[/.])(?:youtube(?:-nocookie)?\.com|youtu\.be|vimeo\.com|dailymotion\.com|dai\.ly|kewego\.com|twitch\.tv)(?:[/:?]|$)")
        .expect("VIDEO_PROVIDER regex")
});

// =============================================================================
// Text
// =============================================================================

/// Runs of whitespace, collapsed to one space.
pub static WHITESPACE_NORMALIZE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("WHITESPACE_NORMALIZE regex"));
