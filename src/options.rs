//! Configuration options for article extraction.
//!
//! The `Options` struct selects the language, the base URL, and the output
//! shape. The numeric constants of the scoring, complementing and formatting
//! heuristics live in [`Tuning`]; the defaults are tuned for news pages
//! and should rarely need changing.

/// Configuration options for article extraction.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for standard settings.
///
/// # Example
///
/// ```rust
/// use rs_newspaper::Options;
///
/// // Use defaults
/// let options = Options::default();
///
/// // Customize specific fields
/// let options = Options {
///     language: "de".to_string(),
///     keep_article_html: true,
///     ..Options::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Options {
    /// ISO 639-1 code of the stopword list used for scoring.
    ///
    /// Resolved once when the `Extractor` is built; an unknown code is an
    /// error there, never during extraction.
    ///
    /// Default: `"en"`
    pub language: String,

    /// Source URL of the document.
    ///
    /// Base for resolving relative image, video and canonical links, and a
    /// source of publish dates embedded in the path.
    ///
    /// Default: `None`
    pub url: Option<String>,

    /// Produce `article_html` through the tag allow-list filter.
    ///
    /// When false the complemented node's inner HTML is returned as is.
    ///
    /// Default: `false`
    pub keep_article_html: bool,

    /// Collect image URLs from the article body.
    ///
    /// Default: `true`
    pub fetch_images: bool,

    /// Warn when the extracted text has fewer words than this.
    ///
    /// Default: `0` (never warn)
    pub min_word_count: usize,

    /// Maximum title length in characters.
    ///
    /// Default: `200`
    pub max_title_len: usize,

    /// Maximum number of authors kept.
    ///
    /// Default: `10`
    pub max_authors: usize,

    /// Maximum number of meta keywords kept.
    ///
    /// Default: `35`
    pub max_keywords: usize,

    /// Heuristic constants.
    pub tuning: Tuning,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            url: None,
            keep_article_html: false,
            fetch_images: true,
            min_word_count: 0,
            max_title_len: 200,
            max_authors: 10,
            max_keywords: 35,
            tuning: Tuning::default(),
        }
    }
}

/// Numeric constants of the gravity scorer, the sibling complementor and the
/// output formatter.
#[derive(Debug, Clone)]
pub struct Tuning {
    /// Bonus for the first boostable candidate; later ones get `base / n`.
    pub boost_base: f64,

    /// How many preceding `<p>` siblings a boostable check may inspect.
    pub boostable_max_steps: usize,

    /// A preceding `<p>` must have more stopwords than this to boost.
    pub boostable_min_stopwords: usize,

    /// Candidates need more stopwords than this to be scored at all.
    pub min_candidate_stopwords: usize,

    /// Share of trailing candidates that get the tail penalty.
    pub tail_fraction: f64,

    /// The tail penalty applies only above this many candidates.
    pub tail_min_nodes: usize,

    /// Cumulative negative score past which a tail node is rescued.
    pub penalty_rescue_limit: f64,

    /// Score given instead of the penalty to a rescued tail node.
    pub rescue_score: f64,

    /// Fraction of a candidate's score added to its parent.
    pub parent_share: f64,

    /// Fraction of a candidate's score added to its grandparent.
    pub grandparent_share: f64,

    /// Same-level nodes need this fraction of the top node's score.
    pub sibling_threshold: f64,

    /// Scored nodes below this are pruned before formatting.
    pub prune_score_below: f64,

    /// Fall back to all `<div>`s when fewer candidates than this were found.
    pub div_fallback_limit: usize,

    /// The trailing media block is only dropped with at least this many
    /// top-level children.
    pub trailing_media_min_children: usize,

    /// Minimum depth of a trailing block for it to count as media.
    pub trailing_media_min_depth: usize,

    /// Classes that protect a trailing block from removal.
    pub trailing_media_exempt_classes: Vec<String>,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            boost_base: 50.0,
            boostable_max_steps: 3,
            boostable_min_stopwords: 5,
            min_candidate_stopwords: 2,
            tail_fraction: 0.25,
            tail_min_nodes: 15,
            penalty_rescue_limit: 40.0,
            rescue_score: 5.0,
            parent_share: 1.0,
            grandparent_share: 0.4,
            sibling_threshold: 0.3,
            prune_score_below: 1.0,
            div_fallback_limit: 5,
            trailing_media_min_children: 3,
            trailing_media_min_depth: 2,
            trailing_media_exempt_classes: vec!["zn-body__paragraph".to_string()],
        }
    }
}
