//! Publish date extraction.
//!
//! Sources are tried in order: a date embedded in the URL path, JSON-LD,
//! meta tags, then the first `<time datetime>`. The first source holding a
//! parseable date wins.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use dom_query::{Document, Selection};

use super::json_ld::JsonLd;
use super::meta_tags::meta_content;
use crate::patterns::URL_DATE;
use crate::url_utils;

/// Meta `property`/`name`/`itemprop` keys holding a publish date, by priority.
const PUBLISH_DATE_KEYS: &[&str] = &[
    "article:published_time",
    "og:published_time",
    "rnews:datepublished",
    "datepublished",
    "originalpublicationdate",
    "article_date_original",
    "publication_date",
    "sailthru.date",
    "pubdate",
    "publishdate",
    "publish-date",
    "dc.date.issued",
    "dc.date",
    "date",
];

/// Naive date-time layouts tried after RFC 3339 and RFC 2822.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
];

/// Plain date layouts.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y%m%d",
    "%d/%m/%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
    "%d %b %Y",
];

/// Find the publish date of a page.
#[must_use]
pub fn extract_publish_date(doc: &Document, url: Option<&str>, json_ld: &JsonLd) -> Option<DateTime<Utc>> {
    if let Some(date) = url.and_then(date_from_url) {
        tracing::trace!(%date, "publish date from URL");
        return Some(date);
    }

    if let Some(date) = json_ld.date_published.as_deref().and_then(parse_date) {
        tracing::trace!(%date, "publish date from JSON-LD");
        return Some(date);
    }

    for &key in PUBLISH_DATE_KEYS {
        if let Some(date) = meta_content(doc, &[key]).as_deref().and_then(parse_date) {
            tracing::trace!(%date, key, "publish date from meta");
            return Some(date);
        }
    }

    // `<time itemprop="datePublished" datetime>` and friends carry no content
    // attribute, so they are read here along with plain `<time>` elements.
    for node in doc.select("[itemprop] , time").nodes() {
        let sel = Selection::from(*node);
        let is_time = node.node_name().is_some_and(|n| n.eq_ignore_ascii_case("time"));
        let is_published = sel
            .attr("itemprop")
            .is_some_and(|p| p.eq_ignore_ascii_case("datePublished"));
        if !is_time && !is_published {
            continue;
        }
        if let Some(date) = sel.attr("datetime").as_deref().and_then(parse_date) {
            return Some(date);
        }
    }

    None
}

/// A `/2024/05/17/` or `/2024-05-17/` date in the URL path.
#[must_use]
pub fn date_from_url(url: &str) -> Option<DateTime<Utc>> {
    let path = url_utils::path_of(url);
    let caps = URL_DATE.captures(&path)?;
    let year = caps.get(1)?.as_str().parse().ok()?;
    let month = caps.get(2)?.as_str().parse().ok()?;
    let day = caps.get(3)?.as_str().parse().ok()?;
    Some(NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(0, 0, 0)?.and_utc())
}

/// Parse a date string from meta tags, JSON-LD or `<time>` elements.
///
/// Zoned values are converted to UTC; naive values are taken as UTC.
#[must_use]
pub fn parse_date(date_str: &str) -> Option<DateTime<Utc>> {
    let date_str = date_str.trim();
    if date_str.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(date_str) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(date_str) {
        return Some(dt.with_timezone(&Utc));
    }
    // `+0000` offsets without a colon.
    if let Ok(dt) = DateTime::parse_from_str(date_str, "%Y-%m-%dT%H:%M:%S%z") {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(date_str, fmt) {
            return Some(dt.and_utc());
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(date_str, fmt) {
            return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
        }
    }

    None
}
