use rs_newspaper::{extract, extract_with_options, Options, Tuning};

const PROSE: &str = "the cat was on the mat and it was there for all of them to see";

fn two_sections() -> String {
    format!(
        "<html><body><section><p>{PROSE}</p><p>{PROSE}</p></section>\
         <section><p>{PROSE}</p><p>{PROSE}</p></section></body></html>"
    )
}

#[test]
fn options_struct_update_syntax_overrides_selected_fields_only() {
    let options = Options {
        url: Some("https://example.com/article".to_string()),
        tuning: Tuning {
            boost_base: 20.0,
            ..Tuning::default()
        },
        ..Options::default()
    };

    assert_eq!(options.url.as_deref(), Some("https://example.com/article"));
    assert_eq!(options.language, "en");
    assert!(options.fetch_images);
    assert!((options.tuning.boost_base - 20.0).abs() < f64::EPSILON);
    assert!((options.tuning.sibling_threshold - 0.3).abs() < f64::EPSILON);
}

#[test]
fn sibling_threshold_controls_complementing() {
    let html = two_sections();

    let default_result = extract(&html).expect("expected Ok(_)");
    assert_eq!(default_result.text.matches(PROSE).count(), 4);

    let strict = Options {
        tuning: Tuning {
            sibling_threshold: 0.9,
            ..Tuning::default()
        },
        ..Options::default()
    };
    let strict_result = extract_with_options(&html, &strict).expect("expected Ok(_)");
    assert_eq!(strict_result.text.matches(PROSE).count(), 2);
}

#[test]
fn url_option_resolves_media_links() {
    let html = format!(
        r#"<html><body><div><p>{PROSE}</p><img src="/photos/cat.jpg"><p>{PROSE}</p></div></body></html>"#
    );
    let options = Options {
        url: Some("https://example.com/some/path".to_string()),
        ..Options::default()
    };

    let result = extract_with_options(&html, &options).expect("expected Ok(_)");
    assert_eq!(result.images, vec!["https://example.com/photos/cat.jpg"]);
    assert_eq!(result.top_image.as_deref(), Some("https://example.com/photos/cat.jpg"));
    assert_eq!(result.metadata.url.as_deref(), Some("https://example.com/some/path"));
}

#[test]
fn fetch_images_off_leaves_image_list_empty() {
    let html = format!(r#"<html><body><div><p>{PROSE}</p><img src="/photos/cat.jpg"></div></body></html>"#);
    let options = Options {
        fetch_images: false,
        ..Options::default()
    };

    let result = extract_with_options(&html, &options).expect("expected Ok(_)");
    assert!(result.images.is_empty());
    assert!(result.top_image.is_none());
}

#[test]
fn other_embedded_languages_are_accepted() {
    let html = "<html><body><div><p>Der Hund ist in dem Haus und er ist da für alle von uns, die es sehen wollen.</p></div></body></html>";
    let options = Options {
        language: "de".to_string(),
        ..Options::default()
    };

    let result = extract_with_options(html, &options).expect("expected Ok(_)");
    assert!(result.text.contains("Der Hund ist in dem Haus"));
}

#[test]
fn min_word_count_only_warns() {
    let html = two_sections();
    let options = Options {
        min_word_count: 1000,
        ..Options::default()
    };

    let result = extract_with_options(&html, &options).expect("expected Ok(_)");
    assert!(result.has_content());
    assert_eq!(result.warnings.len(), 1);
    assert!(result.warnings[0].contains("fewer than the minimum of 1000"));
}
