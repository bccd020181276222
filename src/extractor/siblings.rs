//! Sibling Complementor
//!
//! Articles are often split across several containers at the same depth (one
//! per page section, or around an inline ad). Starting from the top node, the
//! complementor gathers every same-level node of the same tag that scores
//! close enough and deep-copies them into a fresh `<html><body>` document.
//!
//! The copy is an ownership fence: later stages mutate it freely while the
//! source tree stays intact for the metadata and media extractors.

use super::state::ScoreStore;
use crate::dom::{Document, NodeId};
use crate::link_density::is_highlink_density;
use crate::options::Tuning;
use crate::query;

/// A detached article document built around the top node.
#[derive(Debug, Clone)]
pub struct Complemented {
    /// Synthetic `<html><body>` document holding the copies.
    pub document: Document,
    /// Scores of the copied nodes, carried over from the source tree.
    pub scores: ScoreStore,
    /// Copied roots, in append order; the top node's copy is among them.
    pub nodes: Vec<NodeId>,
}

impl Complemented {
    /// The synthetic `<body>`.
    #[must_use]
    pub fn body(&self) -> NodeId {
        self.document.body().unwrap_or(self.document.root())
    }
}

/// Copy `top` and its qualifying same-level peers into a new document.
///
/// Peers are found breadth-first across the whole tree, not only among
/// `top`'s siblings, and are appended in that level-order. A peer qualifies
/// when it has `top`'s tag, is not link-dense and scores above
/// `sibling_threshold` times the top node's score.
#[must_use]
pub fn complement_with_siblings(
    doc: &Document,
    scores: &ScoreStore,
    top: NodeId,
    tuning: &Tuning,
) -> Complemented {
    let level = query::get_level(doc, top);
    let peers = query::get_nodes_at_level(doc, level);
    debug_assert!(peers.contains(&top), "top node missing from its own level");

    let top_tag = doc.tag(top);
    let threshold = scores.score(top) * tuning.sibling_threshold;

    let mut document = Document::synthetic();
    let body = document.body().unwrap_or(document.root());
    let mut copied_scores = ScoreStore::new();
    let mut nodes = Vec::new();

    for peer in peers {
        let include = peer == top
            || (doc.tag(peer) == top_tag
                && !is_highlink_density(doc, peer)
                && scores.score(peer) > threshold);
        if !include {
            continue;
        }
        let mapping = doc.deep_copy_into(peer, &mut document, body);
        copied_scores.transfer_from(scores, &mapping);
        if let Some(&(_, copy)) = mapping.first() {
            nodes.push(copy);
        }
    }

    tracing::debug!(level, copied = nodes.len(), threshold, "complemented top node");
    Complemented {
        document,
        scores: copied_scores,
        nodes,
    }
}
