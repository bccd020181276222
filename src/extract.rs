//! The extraction pipeline.
//!
//! parse -> metadata (untouched parse) -> arena tree -> clean -> score ->
//! media (live top node) -> complement -> format.

use crate::cleaner;
use crate::dom::Document;
use crate::encoding;
use crate::error::Result;
use crate::extractor::{calculate_best_node, complement_with_siblings, ScoreStore};
use crate::formatter::OutputFormatter;
use crate::media;
use crate::metadata;
use crate::options::Options;
use crate::result::Article;
use crate::stopwords::LanguageProfile;
use crate::url_utils;

/// Reusable article extractor.
///
/// The language profile is resolved once, so an unknown language fails here
/// and never during extraction. `Extractor` is `Send + Sync`; one instance can
/// serve many threads.
///
/// # Example
///
/// ```rust
/// use rs_newspaper::{Extractor, Options};
///
/// let extractor = Extractor::new(Options::default())?;
/// let article = extractor.extract("<html><body><p>Too short.</p></body></html>");
/// assert!(article.metadata.title.is_none());
/// # Ok::<(), rs_newspaper::Error>(())
/// ```
#[derive(Debug)]
pub struct Extractor {
    options: Options,
    language: LanguageProfile,
}

impl Extractor {
    /// Build an extractor for `options.language`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::UnsupportedLanguage`] when no stopword list is
    /// embedded for the language.
    pub fn new(options: Options) -> Result<Self> {
        let language = LanguageProfile::for_language(&options.language)?;
        Ok(Self { options, language })
    }

    /// Build an extractor around a caller-supplied language profile.
    /// `options.language` is ignored.
    #[must_use]
    pub fn with_language(options: Options, language: LanguageProfile) -> Self {
        Self { options, language }
    }

    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    #[must_use]
    pub fn language(&self) -> &LanguageProfile {
        &self.language
    }

    /// Extract an article from HTML bytes, detecting the charset.
    #[must_use]
    pub fn extract_bytes(&self, html: &[u8]) -> Article {
        self.extract(&encoding::transcode_to_utf8(html))
    }

    /// Extract an article from an HTML string.
    ///
    /// Never fails: a page without a recognisable body yields empty text and
    /// a warning.
    #[must_use]
    pub fn extract(&self, html: &str) -> Article {
        let opts = &self.options;
        let tuning = &opts.tuning;
        let mut warnings = Vec::new();

        let parsed = dom_query::Document::from(html);
        let metadata = metadata::extract_metadata(&parsed, opts);

        let mut doc = Document::from_dom(&parsed);
        tracing::debug!(html_len = html.len(), nodes = doc.len(), "parsed document");

        cleaner::clean(&mut doc);

        let mut scores = ScoreStore::new();
        let top = calculate_best_node(&doc, &mut scores, &self.language, tuning);

        let base = opts.url.as_deref().and_then(url_utils::parse_absolute);
        let (images, movies) = match top {
            Some(top) => {
                let images = if opts.fetch_images {
                    media::extract_images(&doc, top, base.as_ref())
                } else {
                    Vec::new()
                };
                (images, media::extract_videos(&doc, top, base.as_ref()))
            }
            None => {
                warnings.push("no article body found".to_string());
                (Vec::new(), Vec::new())
            }
        };

        let mut complemented = top.map(|top| complement_with_siblings(&doc, &scores, top, tuning));
        let formatter = OutputFormatter::new(opts.keep_article_html, tuning);
        let (text, article_html) = formatter.format_complemented(complemented.as_mut());

        let words = text.split_whitespace().count();
        if top.is_some() && words < opts.min_word_count {
            warnings.push(format!(
                "article text has {words} words, fewer than the minimum of {}",
                opts.min_word_count
            ));
        }

        let top_image = metadata.meta_image.clone().or_else(|| images.first().cloned());

        tracing::debug!(
            words,
            images = images.len(),
            movies = movies.len(),
            warnings = warnings.len(),
            "extraction finished"
        );

        Article {
            text,
            article_html,
            top_image,
            images,
            movies,
            metadata,
            warnings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    const ARTICLE: &str = r#"<html><head><title>Harbour reopens | Coast Times</title>
<meta property="og:image" content="/lead.jpg"></head>
<body>
<nav><a href="/">Home</a> <a href="/news">News</a></nav>
<div class="story">
<p>The harbour reopened on Monday after the storm, and the fishing boats that had been waiting for a week were able to go out again into the bay.</p>
<p>Officials said that the damage to the pier was less than they had feared, and that the repairs would be finished by the end of the month.</p>
<img src="/photos/pier.jpg">
<iframe src="https://www.youtube.com/embed/xyz"></iframe>
</div>
<div class="footer">Copyright</div>
</body></html>"#;

    fn extractor(opts: Options) -> Extractor {
        match Extractor::new(opts) {
            Ok(extractor) => extractor,
            Err(err) => panic!("extractor: {err}"),
        }
    }

    #[test]
    fn test_extracts_body_and_media() {
        let opts = Options {
            url: Some("https://coast.example/news/harbour".to_string()),
            ..Options::default()
        };
        let article = extractor(opts).extract(ARTICLE);

        assert!(article.text.starts_with("The harbour reopened on Monday"));
        assert!(article.text.contains("\n\nOfficials said"));
        assert!(!article.text.contains("Home"));
        assert!(!article.text.contains("Copyright"));
        assert_eq!(article.images, vec!["https://coast.example/photos/pier.jpg"]);
        assert_eq!(article.movies, vec!["https://www.youtube.com/embed/xyz"]);
        assert_eq!(article.top_image.as_deref(), Some("https://coast.example/lead.jpg"));
        assert_eq!(article.metadata.title.as_deref(), Some("Harbour reopens"));
        assert!(article.warnings.is_empty());
    }

    #[test]
    fn test_fetch_images_off() {
        let opts = Options {
            fetch_images: false,
            ..Options::default()
        };
        let article = extractor(opts).extract(ARTICLE);
        assert!(article.images.is_empty());
        // The meta image does not depend on body images.
        assert_eq!(article.top_image.as_deref(), Some("/lead.jpg"));
    }

    #[test]
    fn test_empty_document_warns() {
        let article = extractor(Options::default()).extract("");
        assert!(!article.has_content());
        assert_eq!(article.article_html, "");
        assert_eq!(article.warnings, vec!["no article body found"]);
    }

    #[test]
    fn test_min_word_count_warning() {
        let opts = Options {
            min_word_count: 500,
            ..Options::default()
        };
        let article = extractor(opts).extract(ARTICLE);
        assert!(article.has_content());
        assert_eq!(article.warnings.len(), 1);
        assert!(article.warnings[0].contains("fewer than the minimum of 500"));
    }

    #[test]
    fn test_unknown_language_rejected() {
        let opts = Options {
            language: "xx".to_string(),
            ..Options::default()
        };
        assert!(matches!(Extractor::new(opts), Err(Error::UnsupportedLanguage(_))));
    }

    #[test]
    fn test_extractor_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Extractor>();
    }
}
