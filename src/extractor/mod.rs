//! Article body extraction.
//!
//! # Module Structure
//!
//! - `state`: per-document gravity score side table
//! - `scorer`: picks the top node by stopword density and boosts
//! - `siblings`: copies the top node and its same-level peers into a fresh
//!   document
//!
//! # Usage
//!
//! ```rust
//! use rs_newspaper::dom::Document;
//! use rs_newspaper::extractor::{calculate_best_node, complement_with_siblings, ScoreStore};
//! use rs_newspaper::{LanguageProfile, Tuning};
//!
//! let mut doc = Document::parse("<div><p>The cat sat on the mat and it was there for a while.</p></div>");
//! let lang = LanguageProfile::for_language("en")?;
//! let tuning = Tuning::default();
//! let mut scores = ScoreStore::new();
//!
//! rs_newspaper::cleaner::clean(&mut doc);
//! if let Some(top) = calculate_best_node(&doc, &mut scores, &lang, &tuning) {
//!     let article = complement_with_siblings(&doc, &scores, top, &tuning);
//!     assert!(!article.nodes.is_empty());
//! }
//! # Ok::<(), rs_newspaper::Error>(())
//! ```

pub mod scorer;
pub mod siblings;
pub mod state;

pub use scorer::{calculate_best_node, CandidateScore};
pub use siblings::{complement_with_siblings, Complemented};
pub use state::{NodeScore, ScoreStore};
