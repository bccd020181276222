use chrono::{Datelike, TimeZone, Utc};
use rs_newspaper::{extract, extract_with_options, Options};

const PAGE: &str = r#"<!DOCTYPE html>
<html lang="en-GB">
<head>
  <title>Council approves new bridge - The Riverside Gazette</title>
  <meta name="description" content="The council voted to build a new bridge.">
  <meta name="keywords" content="council, bridge, transport">
  <meta property="og:site_name" content="The Riverside Gazette">
  <meta property="og:image" content="/images/bridge.jpg">
  <meta property="article:published_time" content="2024-03-05T09:15:00+01:00">
  <meta property="article:tag" content="Transport">
  <link rel="icon" href="/favicon.png">
  <link rel="canonical" href="https://gazette.example/news/council-bridge">
  <script type="application/ld+json">
  {"@context":"https://schema.org","@type":"NewsArticle",
   "headline":"Council approves new bridge",
   "author":[{"@type":"Person","name":"Maria Lopez"}]}
  </script>
</head>
<body>
  <div class="story-body">
    <h1>Council approves new bridge</h1>
    <p class="byline">By Tom Hardy and Maria Lopez</p>
    <p>The council has voted to build a new bridge over the river, and the work is expected to start in the summer if the money can be found in time.</p>
    <p>It will be the first new crossing in the town for more than fifty years, and it is hoped that it will take some of the traffic out of the centre.</p>
    <a rel="tag" href="/topics/roads">Roads</a>
  </div>
</body>
</html>"#;

#[test]
fn metadata_from_all_sources() {
    let options = Options {
        url: Some("https://gazette.example/news/council-bridge?ref=home".to_string()),
        ..Options::default()
    };
    let article = extract_with_options(PAGE, &options).expect("extraction failed");
    let meta = &article.metadata;

    assert_eq!(meta.title.as_deref(), Some("Council approves new bridge"));
    assert_eq!(meta.authors, vec!["Tom Hardy", "Maria Lopez"]);
    assert_eq!(meta.description.as_deref(), Some("The council voted to build a new bridge."));
    assert_eq!(meta.keywords, vec!["council", "bridge", "transport"]);
    assert_eq!(meta.lang.as_deref(), Some("en"));
    assert_eq!(meta.site_name.as_deref(), Some("The Riverside Gazette"));
    assert_eq!(meta.favicon.as_deref(), Some("https://gazette.example/favicon.png"));
    assert_eq!(meta.canonical_link.as_deref(), Some("https://gazette.example/news/council-bridge"));
    assert_eq!(meta.meta_image.as_deref(), Some("https://gazette.example/images/bridge.jpg"));
    assert_eq!(meta.tags, vec!["Roads", "Transport"]);
    assert_eq!(meta.url.as_deref(), Some("https://gazette.example/news/council-bridge?ref=home"));
    assert_eq!(meta.publish_date, Utc.with_ymd_and_hms(2024, 3, 5, 8, 15, 0).single());

    assert_eq!(article.top_image, meta.meta_image);
}

#[test]
fn byline_is_cleaned_out_of_the_body() {
    let article = extract(PAGE).expect("extraction failed");
    assert!(article.text.contains("The council has voted to build a new bridge"));
    assert!(!article.text.contains("By Tom Hardy"));
    assert_eq!(article.metadata.authors, vec!["Tom Hardy", "Maria Lopez"]);
}

#[test]
fn url_date_takes_precedence() {
    let options = Options {
        url: Some("https://gazette.example/2023/11/30/council-bridge".to_string()),
        ..Options::default()
    };
    let article = extract_with_options(PAGE, &options).expect("extraction failed");
    let date = article.metadata.publish_date.expect("publish date");
    assert_eq!((date.year(), date.month(), date.day()), (2023, 11, 30));
}

#[test]
fn relative_links_stay_relative_without_a_url() {
    let article = extract(PAGE).expect("extraction failed");
    assert_eq!(article.metadata.meta_image.as_deref(), Some("/images/bridge.jpg"));
    assert_eq!(article.metadata.favicon.as_deref(), Some("/favicon.png"));
}

#[test]
fn title_limits_apply() {
    let options = Options {
        max_title_len: 7,
        max_authors: 1,
        max_keywords: 2,
        ..Options::default()
    };
    let article = extract_with_options(PAGE, &options).expect("extraction failed");
    let meta = &article.metadata;
    assert_eq!(meta.title.as_deref(), Some("Council"));
    assert_eq!(meta.authors, vec!["Tom Hardy"]);
    assert_eq!(meta.keywords.len(), 2);
}

#[test]
fn page_without_metadata() {
    let article = extract("<html><body><p>Plain.</p></body></html>").expect("extraction failed");
    let meta = &article.metadata;
    assert!(meta.title.is_none());
    assert!(meta.authors.is_empty());
    assert!(meta.publish_date.is_none());
    assert!(meta.lang.is_none());
    assert!(article.top_image.is_none());
}
