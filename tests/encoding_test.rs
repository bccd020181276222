use rs_newspaper::{extract_bytes, extract_bytes_with_options, Options};

/// UTF-8 content is passed through unchanged.
#[test]
fn utf8_content_handled_correctly() {
    let html = "<html><head><meta charset=\"utf-8\"></head><body><div>\
        <p>This is the text of a story with some special characters in it: é, ñ, ü and 中文.</p>\
        </div></body></html>"
        .as_bytes();

    let article = extract_bytes(html).expect("extraction failed");

    assert!(article.text.contains("é, ñ, ü and 中文"));
}

/// ISO-8859-1 is decoded (as windows-1252) into UTF-8.
#[test]
fn iso88591_converted_to_utf8() {
    let html = b"<html><head><meta charset=\"ISO-8859-1\"></head><body><div>\
        <p>We went to the Caf\xE9 in M\xFCnchen and it was one of the best that we had been to in a long time.</p>\
        </div></body></html>";

    let article = extract_bytes(html).expect("extraction failed");

    assert!(article.text.contains("Café"));
    assert!(article.text.contains("München"));
}

/// The http-equiv content type declaration is honoured.
#[test]
fn windows1252_from_content_type() {
    let html = b"<html><head><meta http-equiv=\"Content-Type\" content=\"text/html; charset=windows-1252\"></head>\
        <body><div><p>\x93Smart quotes\x94 are the ones that you can see on the page when it has been set by a printer.</p></div></body></html>";

    let article = extract_bytes(html).expect("extraction failed");

    assert!(article.text.contains("\u{201C}Smart quotes\u{201D}"));
}

/// Invalid bytes never fail extraction.
#[test]
fn invalid_bytes_handled_gracefully() {
    let html = b"<html><body><div>\
        <p>This is the first part of the text and it is fine for all of us.</p>\
        <p>This has \xFF\xFE bad bytes in it but it should still be there in the end.</p>\
        </div></body></html>";

    let article = extract_bytes(html).expect("extraction failed");

    assert!(article.text.contains("first part of the text"));
    assert!(article.text.contains('\u{FFFD}'));
}

/// Byte input goes through the same options as string input.
#[test]
fn extract_bytes_with_options_works() {
    let html = b"<html><head><meta charset=\"ISO-8859-1\"></head><body><div>\
        <p>The caf\xE9 was open all day and it was full of people who had come in from the rain.</p>\
        </div></body></html>";

    let options = Options {
        keep_article_html: true,
        ..Options::default()
    };
    let article = extract_bytes_with_options(html, &options).expect("extraction failed");

    assert!(article.text.contains("café"));
    assert!(article.article_html.contains("<p>The café was open"));
}

/// A UTF-8 byte-order mark is stripped before parsing.
#[test]
fn utf8_bom_is_not_text() {
    let mut html = vec![0xEF, 0xBB, 0xBF];
    html.extend_from_slice(
        b"<html><head><title>With a BOM</title></head><body><div><p>The text of the page is here and it is all that there is to see.</p></div></body></html>",
    );

    let article = extract_bytes(&html).expect("extraction failed");

    assert_eq!(article.metadata.title.as_deref(), Some("With a BOM"));
    assert!(!article.text.contains('\u{FEFF}'));
}
