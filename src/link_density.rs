//! Link Density Testing
//!
//! Checks whether a node is rich in links (probably navigation or a
//! related-links block) by comparing words inside `<a>`/`<button>`
//! descendants with the node's total word count.
//!
//! The tolerated share follows a saturating curve: short texts may be around
//! two thirds links, long texts (700+ words) only about a third.

use crate::dom::{Document, NodeId};
use crate::etree;
use crate::query;

/// Tags whose text counts as link text.
const LINK_TAGS: &[&str] = &["a", "button"];

/// Below this many words the short-text rule applies.
const SHORT_TEXT_WORDS: usize = 50;

/// Tolerated link-word percentage for a text of `total_words` words.
///
/// `87 - 70 / (1.3 + e^(1 - total_words / 200))`
#[must_use]
pub fn link_density_limit(total_words: usize) -> f64 {
    87.0 - 70.0 / (1.3 + (1.0 - total_words as f64 / 200.0).exp())
}

/// Word and link statistics of one node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LinkStats {
    /// Whitespace tokens in the node's text content.
    pub words: usize,
    /// Whitespace tokens inside link descendants.
    pub link_words: usize,
    /// Number of link descendants.
    pub links: usize,
}

impl LinkStats {
    /// Link words as a fraction of all words; 0 for an empty node.
    #[must_use]
    pub fn ratio(&self) -> f64 {
        if self.words == 0 {
            return 0.0;
        }
        self.link_words as f64 / self.words as f64
    }
}

/// Collect word and link counts for `id`.
#[must_use]
pub fn link_stats(doc: &Document, id: NodeId) -> LinkStats {
    let links = query::get_elements_by_tags(doc, id, LINK_TAGS);
    let words = word_count(&etree::text_content(doc, id));

    // Nested links (a button inside an anchor) are counted once.
    let link_words = links
        .iter()
        .filter(|&&link| {
            !links
                .iter()
                .any(|&outer| outer != link && etree::is_within(doc, link, outer))
        })
        .map(|&link| word_count(&etree::text_content(doc, link)))
        .sum();

    LinkStats {
        words,
        link_words,
        links: links.len(),
    }
}

/// Whether `id` holds too many link words to be article prose.
///
/// Nodes without links or without any words are never link-dense.
#[must_use]
pub fn is_highlink_density(doc: &Document, id: NodeId) -> bool {
    let stats = link_stats(doc, id);
    if stats.links == 0 || stats.words == 0 {
        return false;
    }

    let ratio = stats.ratio();
    if stats.words < SHORT_TEXT_WORDS && stats.links > 2 && ratio > 0.5 {
        return true;
    }

    ratio * 100.0 > link_density_limit(stats.words)
}

fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}
