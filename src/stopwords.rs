//! Stopword and Tokenizer Capability
//!
//! Scoring measures prose by how many common function words a span holds.
//! A [`LanguageProfile`] bundles a stopword set with a [`Tokenizer`] and is
//! resolved once, before extraction starts; an unknown language is a
//! configuration error, never a per-document one.

use std::collections::HashSet;
use std::fmt;

use crate::error::{Error, Result};

/// Embedded stopword lists, one word per line.
const EMBEDDED: &[(&str, &str)] = &[
    ("de", include_str!("stopwords/de.txt")),
    ("en", include_str!("stopwords/en.txt")),
    ("es", include_str!("stopwords/es.txt")),
    ("fr", include_str!("stopwords/fr.txt")),
    ("it", include_str!("stopwords/it.txt")),
    ("nl", include_str!("stopwords/nl.txt")),
    ("pt", include_str!("stopwords/pt.txt")),
];

/// Stopword statistics of one text span.
///
/// Recomputed on every call; never cached across tree mutations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordStats {
    /// Tokens found in the stopword set, duplicates included.
    pub stop_word_count: usize,
    /// All tokens.
    pub word_count: usize,
    /// The matching tokens, in text order.
    pub stop_words: Vec<String>,
}

/// Splits text into tokens and picks out stopwords.
pub trait Tokenizer {
    /// Split `text` into word tokens.
    fn tokenize(&self, text: &str) -> Vec<String>;

    /// Tokens that are stopwords. The default is case-insensitive set
    /// membership; languages with affixed function words override it.
    fn find_stopwords(&self, tokens: &[String], stopwords: &HashSet<String>) -> Vec<String> {
        tokens
            .iter()
            .filter(|token| stopwords.contains(&token.to_lowercase()))
            .cloned()
            .collect()
    }
}

/// Removes ASCII punctuation and splits on whitespace.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceTokenizer;

impl Tokenizer for WhitespaceTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        let cleaned: String = text.chars().filter(|c| !c.is_ascii_punctuation()).collect();
        cleaned.split_whitespace().map(str::to_string).collect()
    }
}

/// A language's stopword set and tokenizer.
pub struct LanguageProfile {
    code: String,
    stopwords: HashSet<String>,
    tokenizer: Box<dyn Tokenizer + Send + Sync>,
}

impl fmt::Debug for LanguageProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LanguageProfile")
            .field("code", &self.code)
            .field("stopwords", &self.stopwords.len())
            .finish_non_exhaustive()
    }
}

impl LanguageProfile {
    /// Profile for an embedded language code such as `"en"`.
    ///
    /// The code is matched case-insensitively and a region suffix
    /// (`"en-US"`, `"pt_BR"`) is ignored.
    pub fn for_language(code: &str) -> Result<Self> {
        let normalized = normalize_code(code);
        let words = EMBEDDED
            .iter()
            .find(|(lang, _)| *lang == normalized)
            .map(|(_, words)| *words)
            .ok_or_else(|| Error::UnsupportedLanguage(code.to_string()))?;

        Ok(Self::custom(&normalized, words.lines()))
    }

    /// Profile from caller-supplied stopwords with the whitespace tokenizer.
    pub fn custom<I, S>(code: &str, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let stopwords = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();

        Self {
            code: code.to_string(),
            stopwords,
            tokenizer: Box::new(WhitespaceTokenizer),
        }
    }

    /// Replace the tokenizer.
    #[must_use]
    pub fn with_tokenizer(mut self, tokenizer: Box<dyn Tokenizer + Send + Sync>) -> Self {
        self.tokenizer = tokenizer;
        self
    }

    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    #[must_use]
    pub fn stopwords(&self) -> &HashSet<String> {
        &self.stopwords
    }

    #[must_use]
    pub fn is_stopword(&self, token: &str) -> bool {
        self.stopwords.contains(&token.to_lowercase())
    }

    #[must_use]
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        self.tokenizer.tokenize(text)
    }

    /// Count tokens and stopwords in `text`.
    #[must_use]
    pub fn word_stats(&self, text: &str) -> WordStats {
        let tokens = self.tokenizer.tokenize(text);
        let stop_words = self.tokenizer.find_stopwords(&tokens, &self.stopwords);
        WordStats {
            stop_word_count: stop_words.len(),
            word_count: tokens.len(),
            stop_words,
        }
    }
}

/// Codes of the embedded languages.
#[must_use]
pub fn available_languages() -> Vec<&'static str> {
    EMBEDDED.iter().map(|(code, _)| *code).collect()
}

fn normalize_code(code: &str) -> String {
    code.trim()
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase()
}
