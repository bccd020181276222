//! Body Gravity Scorer
//!
//! Finds the node most likely to be the root of the article body. Text-bearing
//! candidates are scored by stopword count plus positional boosts, and each
//! candidate's score flows to its parent and (partially) its grandparent. The
//! best-scoring ancestor wins.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;

use super::state::ScoreStore;
use crate::dom::{Document, NodeId};
use crate::etree;
use crate::link_density::is_highlink_density;
use crate::options::Tuning;
use crate::patterns;
use crate::query::{self, MatchMode};
use crate::stopwords::LanguageProfile;

/// Always-candidate tags, before `<div>` filtering.
const CANDIDATE_TAGS: &[&str] = &["p", "pre", "td", "article"];

/// Div id/class tokens that mark an article container.
const ARTICLE_DIV_NAMES: &[&str] = &["article-body", "articlebody", "article", "story", "article-content"];

/// How a boost template compares an attribute value.
enum ValueMatch {
    Exact(&'static str),
    Substring(&'static str),
    Pattern(Regex),
}

/// A known article-container signature.
struct BoostTemplate {
    /// Tag the template applies to; any candidate tag when `None`.
    tag: Option<&'static str>,
    attr: &'static str,
    value: ValueMatch,
    score: f64,
}

impl BoostTemplate {
    fn matches(&self, doc: &Document, id: NodeId) -> bool {
        if self.tag.is_some_and(|t| doc.tag(id) != Some(t)) {
            return false;
        }
        let Some(value) = doc.attr(id, self.attr) else {
            return false;
        };
        match &self.value {
            ValueMatch::Exact(expected) => query::attr_matches(value, expected, MatchMode::Exact),
            ValueMatch::Substring(expected) => query::attr_matches(value, expected, MatchMode::Substring),
            ValueMatch::Pattern(pattern) => pattern.is_match(value),
        }
    }
}

static BOOST_TEMPLATES: LazyLock<Vec<BoostTemplate>> = LazyLock::new(|| {
    vec![
        BoostTemplate { tag: None, attr: "itemprop", value: ValueMatch::Substring("articlebody"), score: 100.0 },
        BoostTemplate { tag: Some("div"), attr: "class", value: ValueMatch::Exact("post-content"), score: 40.0 },
        BoostTemplate { tag: Some("div"), attr: "class", value: ValueMatch::Exact("entry-content"), score: 40.0 },
        BoostTemplate { tag: Some("div"), attr: "class", value: ValueMatch::Substring("story-body"), score: 30.0 },
        BoostTemplate { tag: Some("div"), attr: "id", value: ValueMatch::Exact("article-body"), score: 30.0 },
        BoostTemplate { tag: None, attr: "role", value: ValueMatch::Exact("article"), score: 25.0 },
        BoostTemplate { tag: Some("div"), attr: "class", value: ValueMatch::Substring("article__body"), score: 20.0 },
        BoostTemplate {
            tag: Some("div"),
            attr: "class",
            value: ValueMatch::Pattern(patterns::ARTICLE_BODY_CLASS.clone()),
            score: 15.0,
        },
        BoostTemplate {
            tag: Some("div"),
            attr: "id",
            value: ValueMatch::Pattern(patterns::ARTICLE_BODY_CLASS.clone()),
            score: 15.0,
        },
        BoostTemplate { tag: Some("article"), attr: "itemtype", value: ValueMatch::Substring("article"), score: 10.0 },
        BoostTemplate { tag: Some("td"), attr: "class", value: ValueMatch::Substring("storybody"), score: 5.0 },
    ]
});

/// The scoring record of one text-bearing candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateScore {
    pub node: NodeId,
    pub stop_word_count: usize,
    /// Positional boost: decaying bonus, tail penalty or rescue score.
    pub boost: f64,
    /// `stop_word_count + boost`, truncated toward zero.
    pub upscore: f64,
}

/// Score the document and return the top node, if any candidate survived.
///
/// Fills `scores` with the pre-boosts and every parent/grandparent
/// contribution; the store is left as is for the complementor and formatter.
pub fn calculate_best_node(
    doc: &Document,
    scores: &mut ScoreStore,
    lang: &LanguageProfile,
    tuning: &Tuning,
) -> Option<NodeId> {
    let root = doc.root();
    apply_pre_boosts(doc, root, scores);

    let candidates = nodes_to_check(doc, root, tuning);
    let (scored, parents) = score_candidates(doc, &candidates, scores, lang, tuning);

    // Highest score wins; the first inserted parent wins a tie.
    let mut best: Option<(NodeId, f64)> = None;
    for &parent in &parents {
        let score = scores.score(parent);
        if best.is_none_or(|(_, top)| score > top) {
            best = Some((parent, score));
        }
    }

    tracing::debug!(
        candidates = candidates.len(),
        scored = scored.len(),
        parents = parents.len(),
        top_score = best.map(|(_, s)| s),
        "body scoring done"
    );
    best.map(|(node, _)| node)
}

/// Candidate nodes in document order.
///
/// `p`, `pre`, `td` and `article` always qualify. Divs qualify when their id
/// or class names an article container or their class mentions paragraphs;
/// when no div does and fewer than `div_fallback_limit` other candidates were
/// found, every div qualifies.
#[must_use]
pub fn nodes_to_check(doc: &Document, root: NodeId, tuning: &Tuning) -> Vec<NodeId> {
    let mut nodes: Vec<NodeId> = CANDIDATE_TAGS
        .iter()
        .flat_map(|&tag| query::get_tags(doc, root, Some(tag), &[], MatchMode::Exact))
        .collect();

    let mut divs = Vec::new();
    for name in ARTICLE_DIV_NAMES {
        for attr in ["id", "class"] {
            divs.extend(query::get_tags(doc, root, Some("div"), &[(attr, name)], MatchMode::Word));
        }
    }
    divs.extend(query::get_tags_by_regex(doc, root, Some("div"), "class", &patterns::PARAGRAPH_CLASS));
    if divs.is_empty() && nodes.len() < tuning.div_fallback_limit {
        divs = query::get_tags(doc, root, Some("div"), &[], MatchMode::Exact);
    }
    nodes.extend(query::dedup_nodes(divs));

    let order: HashMap<NodeId, usize> = etree::iter(doc, root)
        .into_iter()
        .enumerate()
        .map(|(pos, id)| (id, pos))
        .collect();
    nodes.sort_by_key(|id| order.get(id).copied().unwrap_or(usize::MAX));
    nodes
}

/// Add the best matching container-template boost to each candidate-tag node.
pub fn apply_pre_boosts(doc: &Document, root: NodeId, scores: &mut ScoreStore) {
    for node in etree::iter_elements(doc, root) {
        let is_candidate_tag = doc
            .tag(node)
            .is_some_and(|t| t == "div" || CANDIDATE_TAGS.contains(&t));
        if !is_candidate_tag {
            continue;
        }
        let boost = BOOST_TEMPLATES
            .iter()
            .filter(|t| t.matches(doc, node))
            .map(|t| t.score)
            .fold(None, |acc: Option<f64>, s| Some(acc.map_or(s, |a| a.max(s))));
        if let Some(boost) = boost {
            tracing::trace!(node = node.index(), boost, "pre-boost");
            scores.add_score(node, boost);
        }
    }
}

/// Filter `candidates` to text-bearing ones and accumulate their scores into
/// parents and grandparents.
///
/// Returns the per-candidate records and the touched ancestors in first-touch
/// order.
pub fn score_candidates(
    doc: &Document,
    candidates: &[NodeId],
    scores: &mut ScoreStore,
    lang: &LanguageProfile,
    tuning: &Tuning,
) -> (Vec<CandidateScore>, Vec<NodeId>) {
    let with_text: Vec<(NodeId, usize)> = candidates
        .iter()
        .filter_map(|&node| {
            let stats = lang.word_stats(&etree::text_content(doc, node));
            let keep = stats.stop_word_count > tuning.min_candidate_stopwords
                && !is_highlink_density(doc, node);
            keep.then_some((node, stats.stop_word_count))
        })
        .collect();

    let total = with_text.len();
    let bottom = total as f64 * tuning.tail_fraction;
    let mut boost_denominator = 1.0;
    let mut negative_scoring = 0.0;

    let mut records = Vec::with_capacity(total);
    let mut parents = Vec::new();
    let mut seen = HashSet::new();

    for (i, &(node, stop_word_count)) in with_text.iter().enumerate() {
        let mut boost = 0.0;
        if is_boostable(doc, node, lang, tuning) {
            boost = boost_for(boost_denominator, tuning.boost_base);
            boost_denominator += 1.0;
        }

        if total > tuning.tail_min_nodes {
            let remaining = (total - i) as f64;
            if remaining <= bottom {
                let penalty = -(bottom - remaining).powi(2);
                if penalty.abs() + negative_scoring > tuning.penalty_rescue_limit {
                    boost = tuning.rescue_score;
                } else {
                    negative_scoring += penalty.abs();
                    boost = penalty;
                }
            }
        }

        let upscore = (stop_word_count as f64 + boost).trunc();
        tracing::trace!(node = node.index(), stop_word_count, boost, upscore, "candidate scored");

        if let Some(parent) = doc.parent(node) {
            scores.add_contribution(parent, upscore * tuning.parent_share);
            if seen.insert(parent) {
                parents.push(parent);
            }
            if let Some(grandparent) = doc.parent(parent) {
                scores.add_contribution(grandparent, upscore * tuning.grandparent_share);
                if seen.insert(grandparent) {
                    parents.push(grandparent);
                }
            }
        }

        records.push(CandidateScore {
            node,
            stop_word_count,
            boost,
            upscore,
        });
    }

    (records, parents)
}

/// The decaying bonus for the `denominator`-th boosted candidate.
#[must_use]
pub fn boost_for(denominator: f64, base: f64) -> f64 {
    (1.0 / denominator) * base
}

/// Whether a `<p>` close before `node` has real prose.
///
/// Walks preceding element siblings nearest first. Each `<p>` passed costs a
/// step; the walk gives up once the step budget is spent.
#[must_use]
pub fn is_boostable(doc: &Document, node: NodeId, lang: &LanguageProfile, tuning: &Tuning) -> bool {
    let mut steps_away = 0;
    for sibling in doc.preceding_element_siblings(node) {
        if doc.tag(sibling) != Some("p") {
            continue;
        }
        if steps_away >= tuning.boostable_max_steps {
            return false;
        }
        let stats = lang.word_stats(&etree::text_content(doc, sibling));
        if stats.stop_word_count > tuning.boostable_min_stopwords {
            return true;
        }
        steps_away += 1;
    }
    false
}
