//! URL helpers for resolving media and canonical links against the page URL.

use url::Url;

/// Parse `s` as an absolute http(s) URL with a host.
#[must_use]
pub fn parse_absolute(s: &str) -> Option<Url> {
    let s = s.trim();
    if !s.starts_with("http://") && !s.starts_with("https://") {
        return None;
    }
    Url::parse(s).ok().filter(|url| url.host().is_some())
}

/// Whether `s` is an absolute http(s) URL.
#[must_use]
pub fn is_absolute_url(s: &str) -> bool {
    parse_absolute(s).is_some()
}

/// Resolve `href` against `base`.
///
/// Absolute URLs pass through (normalized by the `url` crate), protocol
/// relative ones (`//cdn.example.com/a.jpg`) get `https:` or the base's
/// scheme. Relative URLs without a base are kept as written. `data:`,
/// `javascript:` and `mailto:` links and empty strings yield `None`.
#[must_use]
pub fn resolve(href: &str, base: Option<&Url>) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }
    let lower = href.to_ascii_lowercase();
    if ["data:", "javascript:", "mailto:"].iter().any(|p| lower.starts_with(p)) {
        return None;
    }

    if let Some(url) = parse_absolute(href) {
        return Some(url.to_string());
    }

    if let Some(rest) = href.strip_prefix("//") {
        let scheme = base.map_or("https", Url::scheme);
        return parse_absolute(&format!("{scheme}://{rest}")).map(|u| u.to_string());
    }

    match base {
        Some(base) => match base.join(href) {
            Ok(url) => Some(url.to_string()),
            Err(err) => {
                tracing::trace!(href, %err, "unresolvable URL");
                None
            }
        },
        None => Some(href.to_string()),
    }
}

/// Hostname of an absolute URL, without a leading `www.`.
#[must_use]
pub fn extract_hostname(url_str: &str) -> Option<String> {
    let url = parse_absolute(url_str)?;
    let host = url.host_str()?;
    Some(host.strip_prefix("www.").unwrap_or(host).to_string())
}

/// Path component of an absolute URL, or the input itself when it does not
/// parse (relative paths are matched as written).
#[must_use]
pub fn path_of(url_str: &str) -> String {
    parse_absolute(url_str).map_or_else(|| url_str.to_string(), |url| url.path().to_string())
}
