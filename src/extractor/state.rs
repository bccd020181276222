//! Gravity score bookkeeping.
//!
//! Scores are extraction-time scratch state. They live in a side table keyed
//! by [`NodeId`] instead of on the nodes, so they never leak into serialized
//! HTML and survive deep copies only when explicitly transferred.

use std::collections::HashMap;

use crate::dom::NodeId;

/// Accumulated score of one node.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NodeScore {
    /// Gravity score; starts at 0 and only changes by addition.
    pub score: f64,
    /// How many scored candidates contributed to this node.
    pub node_count: u32,
}

/// Scores of one document. Each extraction builds its own store.
#[derive(Debug, Clone, Default)]
pub struct ScoreStore {
    map: HashMap<NodeId, NodeScore>,
}

impl ScoreStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current score, 0 when the node was never scored.
    #[must_use]
    pub fn score(&self, id: NodeId) -> f64 {
        self.map.get(&id).map_or(0.0, |s| s.score)
    }

    /// Number of contributing candidates, 0 when never scored.
    #[must_use]
    pub fn node_count(&self, id: NodeId) -> u32 {
        self.map.get(&id).map_or(0, |s| s.node_count)
    }

    /// Whether the node carries a score entry at all.
    #[must_use]
    pub fn has_score(&self, id: NodeId) -> bool {
        self.map.contains_key(&id)
    }

    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<NodeScore> {
        self.map.get(&id).copied()
    }

    /// Add `delta` to the node's score.
    pub fn add_score(&mut self, id: NodeId, delta: f64) {
        self.map.entry(id).or_default().score += delta;
    }

    /// Add `delta` to the node's score and count one more contributor.
    pub fn add_contribution(&mut self, id: NodeId, delta: f64) {
        let entry = self.map.entry(id).or_default();
        entry.score += delta;
        entry.node_count += 1;
    }

    /// Record an entry carried over from another document.
    pub fn insert(&mut self, id: NodeId, score: NodeScore) {
        self.map.insert(id, score);
    }

    /// Copy the entries of `mapping`'s source ids from `source` onto the
    /// target ids. Unscored sources stay unscored.
    pub fn transfer_from(&mut self, source: &ScoreStore, mapping: &[(NodeId, NodeId)]) {
        for &(old, new) in mapping {
            if let Some(score) = source.get(old) {
                self.insert(new, score);
            }
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
