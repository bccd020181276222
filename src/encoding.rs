//! Character encoding detection and transcoding.
//!
//! Byte input is decoded to UTF-8 before parsing. The charset comes from a
//! byte-order mark, then `<meta charset>`, then the `http-equiv` content type,
//! and falls back to lossy UTF-8.

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;
use std::sync::LazyLock;

/// Match `<meta charset="...">` tag
#[allow(clippy::expect_used)]
static CHARSET_META_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?([^"'\s/>;]+)"#).expect("valid regex")
});

/// Match `<meta http-equiv="Content-Type" content="...; charset=...">` tag
#[allow(clippy::expect_used)]
static CONTENT_TYPE_CHARSET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+http-equiv\s*=\s*["']?content-type["']?[^>]+content\s*=\s*["']?[^"'>]*;\s*charset\s*=\s*([^"'\s>]+)"#).expect("valid regex")
});

/// How far into the document charset declarations are searched.
const SNIFF_LEN: usize = 1024;

/// Detect the character encoding of HTML bytes.
#[must_use]
pub fn detect_encoding(html: &[u8]) -> &'static Encoding {
    if let Some((encoding, _)) = Encoding::for_bom(html) {
        return encoding;
    }

    let head = String::from_utf8_lossy(&html[..html.len().min(SNIFF_LEN)]);
    let declared = capture(&CONTENT_TYPE_CHARSET_RE, &head).or_else(|| capture(&CHARSET_META_RE, &head));

    // A page served as bytes cannot really be UTF-16 once the meta tag is
    // readable as ASCII, so such declarations fall back to UTF-8.
    declared
        .and_then(|label| Encoding::for_label(label.as_bytes()))
        .map_or(UTF_8, Encoding::output_encoding)
}

fn capture(re: &Regex, html: &str) -> Option<String> {
    re.captures(html)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// Transcode HTML bytes to a UTF-8 string.
///
/// Invalid sequences are replaced with U+FFFD; this never fails.
///
/// # Examples
///
/// ```
/// use rs_newspaper::encoding::transcode_to_utf8;
///
/// let html = b"<html><head><meta charset=\"windows-1252\"></head><body>Caf\xE9</body></html>";
/// assert!(transcode_to_utf8(html).contains("Café"));
/// ```
#[must_use]
pub fn transcode_to_utf8(html: &[u8]) -> String {
    let encoding = detect_encoding(html);
    let (decoded, used, had_errors) = encoding.decode(html);
    if had_errors {
        tracing::debug!(encoding = used.name(), "replaced malformed byte sequences");
    }
    decoded.into_owned()
}
