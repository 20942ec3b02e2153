//! End-to-end integration tests for the review retrieval pipeline.
//!
//! Uses a wiremock server in place of the Steam review API (and DeepL).
//! The harvester's HTTP client is blocking, so each exercise runs inside
//! `spawn_blocking`.

use std::fs;

use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use steam_review_harvester::error::HarvestError;
use steam_review_harvester::harvester::harvest_reviews;
use steam_review_harvester::http::create_client;
use steam_review_harvester::output::save_csv;
use steam_review_harvester::pagination::retrieve_all;
use steam_review_harvester::translate::{translate_rows, Translator};
use steam_review_harvester::types::{OutputRow, RetrievalConfig, ReviewFilter};

/// Run a blocking closure off the async test runtime.
async fn blocking<T, F>(f: F) -> T
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .expect("blocking task panicked")
}

/// Build one review JSON object as the API returns it.
fn review_json(minutes: u64, language: &str, body: &str) -> serde_json::Value {
    json!({
        "author": { "playtime_at_review": minutes },
        "language": language,
        "review": body,
        "timestamp_created": 1_700_000_000,
        "voted_up": true,
        "weighted_vote_score": 0.5
    })
}

/// Build a page envelope.
fn page_json(reviews: Vec<serde_json::Value>, cursor: &str) -> serde_json::Value {
    json!({
        "success": 1,
        "query_summary": { "num_reviews": reviews.len() },
        "reviews": reviews,
        "cursor": cursor
    })
}

fn recent_config(app_id: &str) -> RetrievalConfig {
    let mut config = RetrievalConfig::new(app_id);
    config.filter = ReviewFilter::Recent;
    config
}

#[tokio::test]
async fn test_cursor_following_stops_on_empty_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/appreviews/440"))
        .and(query_param("cursor", "*"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(
            vec![
                review_json(120, "english", "first"),
                review_json(90, "english", "second"),
            ],
            "C1",
        )))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/appreviews/440"))
        .and(query_param("cursor", "C1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(vec![], "C2")))
        .expect(1)
        .mount(&server)
        .await;

    let base_url = server.uri();
    let reviews = blocking(move || {
        let client = create_client().unwrap();
        retrieve_all(&client, &base_url, &recent_config("440"))
    })
    .await
    .unwrap();

    // Exactly the two reviews from page 1, in delivery order
    assert_eq!(reviews.len(), 2);
    assert_eq!(reviews[0].review, "first");
    assert_eq!(reviews[1].review, "second");
}

#[tokio::test]
async fn test_bounded_mode_fetches_exactly_one_page() {
    let server = MockServer::start().await;

    let reviews: Vec<_> = (0..5)
        .map(|i| review_json(60, "english", &format!("review {i}")))
        .collect();

    // Reports a fresh cursor, which bounded mode must not follow
    Mock::given(method("GET"))
        .and(path("/appreviews/440"))
        .and(query_param("cursor", "*"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(reviews, "C1")))
        .expect(1)
        .mount(&server)
        .await;

    let base_url = server.uri();
    let reviews = blocking(move || {
        let client = create_client().unwrap();
        // Default filter is 'all' (bounded)
        retrieve_all(&client, &base_url, &RetrievalConfig::new("440"))
    })
    .await
    .unwrap();

    assert_eq!(reviews.len(), 5);
    assert_eq!(reviews[0].review, "review 0");
    assert_eq!(reviews[4].review, "review 4");
}

#[tokio::test]
async fn test_non_advancing_cursor_terminates_loop() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/appreviews/440"))
        .and(query_param("cursor", "*"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(page_json(vec![review_json(60, "english", "one")], "SAME")),
        )
        .expect(1)
        .mount(&server)
        .await;

    // Non-zero count but the cursor never advances
    Mock::given(method("GET"))
        .and(path("/appreviews/440"))
        .and(query_param("cursor", "SAME"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(page_json(vec![review_json(60, "english", "two")], "SAME")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let base_url = server.uri();
    let reviews = blocking(move || {
        let client = create_client().unwrap();
        retrieve_all(&client, &base_url, &recent_config("440"))
    })
    .await
    .unwrap();

    // Both pages kept, then the loop stops instead of spinning forever
    assert_eq!(reviews.len(), 2);
    assert_eq!(reviews[0].review, "one");
    assert_eq!(reviews[1].review, "two");
}

#[tokio::test]
async fn test_cursor_with_reserved_characters_round_trips() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/appreviews/440"))
        .and(query_param("cursor", "*"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(page_json(vec![review_json(60, "english", "one")], "AB+/==")),
        )
        .expect(1)
        .mount(&server)
        .await;

    // Matches only if the percent-encoded cursor decodes back to the
    // original opaque token
    Mock::given(method("GET"))
        .and(path("/appreviews/440"))
        .and(query_param("cursor", "AB+/=="))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(vec![], "")))
        .expect(1)
        .mount(&server)
        .await;

    let base_url = server.uri();
    let reviews = blocking(move || {
        let client = create_client().unwrap();
        retrieve_all(&client, &base_url, &recent_config("440"))
    })
    .await
    .unwrap();

    assert_eq!(reviews.len(), 1);
}

#[tokio::test]
async fn test_missing_num_reviews_is_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/appreviews/440"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "reviews": [], "cursor": "C1" })),
        )
        .mount(&server)
        .await;

    let base_url = server.uri();
    let err = blocking(move || {
        let client = create_client().unwrap();
        retrieve_all(&client, &base_url, &recent_config("440"))
    })
    .await
    .unwrap_err();

    assert!(matches!(err, HarvestError::Decode { .. }));
}

#[tokio::test]
async fn test_server_error_is_transport_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/appreviews/440"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let base_url = server.uri();
    let err = blocking(move || {
        let client = create_client().unwrap();
        retrieve_all(&client, &base_url, &recent_config("440"))
    })
    .await
    .unwrap_err();

    assert!(matches!(err, HarvestError::PageDownload { .. }));
}

#[tokio::test]
async fn test_full_harvest_to_csv() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/appreviews/1091500"))
        .and(query_param("cursor", "*"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(
            vec![
                review_json(120, "english", "Great game"),
                review_json(90, "german", "Sehr gut"),
            ],
            "C1",
        )))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/appreviews/1091500"))
        .and(query_param("cursor", "C1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(vec![], "")))
        .mount(&server)
        .await;

    let base_url = server.uri();
    let rows = blocking(move || {
        harvest_reviews(&base_url, &recent_config("1091500"), None)
    })
    .await
    .unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].playtime, 2.0);
    assert_eq!(rows[1].playtime, 1.5);

    let temp_dir = tempfile::tempdir().unwrap();
    let output_file = temp_dir.path().join("reviews.csv");
    save_csv(&rows, &output_file).unwrap();

    let content = fs::read_to_string(&output_file).unwrap();
    let mut lines = content.lines();
    assert_eq!(
        lines.next(),
        Some("playtime,language,body,time_created,recommend,weighted_vote_score")
    );
    assert!(lines.next().unwrap().starts_with("2.0,english,Great game,"));
    assert!(lines.next().unwrap().starts_with("1.5,german,Sehr gut,"));
}

#[tokio::test]
async fn test_zero_reviews_rejected_at_sink() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/appreviews/440"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(vec![], "")))
        .expect(1)
        .mount(&server)
        .await;

    let base_url = server.uri();
    let rows = blocking(move || {
        harvest_reviews(&base_url, &recent_config("440"), None)
    })
    .await
    .unwrap();
    assert!(rows.is_empty());

    let temp_dir = tempfile::tempdir().unwrap();
    let output_file = temp_dir.path().join("reviews.csv");
    let err = save_csv(&rows, &output_file).unwrap_err();

    assert!(matches!(err, HarvestError::EmptyExport));
    assert!(!output_file.exists());
}

#[tokio::test]
async fn test_translation_rewrites_non_english_rows() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/translate"))
        .and(header("Authorization", "DeepL-Auth-Key test-key"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "translations": [{ "text": "Very good" }] })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let endpoint = format!("{}/v2/translate", server.uri());
    let translated = blocking(move || {
        let translator = Translator::new("test-key").unwrap().with_endpoint(endpoint);
        let mut rows = vec![
            OutputRow {
                playtime: 2.0,
                language: "english".to_string(),
                body: "Great game".to_string(),
                time_created: "2023-11-14 23:13:20".to_string(),
                recommend: true,
                weighted_vote_score: 0.5,
            },
            OutputRow {
                playtime: 1.5,
                language: "german".to_string(),
                body: "Sehr gut".to_string(),
                time_created: "2023-11-14 23:13:20".to_string(),
                recommend: true,
                weighted_vote_score: 0.5,
            },
        ];
        let translated = translate_rows(&translator, &mut rows).unwrap();
        (translated, rows)
    })
    .await;

    let (count, rows) = translated;
    assert_eq!(count, 1);
    assert_eq!(rows[0].body, "Great game");
    assert_eq!(rows[1].body, "Very good");
}

#[tokio::test]
async fn test_translation_failure_aborts() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/translate"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let endpoint = format!("{}/v2/translate", server.uri());
    let err = blocking(move || {
        let translator = Translator::new("bad-key").unwrap().with_endpoint(endpoint);
        let mut rows = vec![OutputRow {
            playtime: 1.5,
            language: "german".to_string(),
            body: "Sehr gut".to_string(),
            time_created: "2023-11-14 23:13:20".to_string(),
            recommend: true,
            weighted_vote_score: 0.5,
        }];
        translate_rows(&translator, &mut rows).unwrap_err()
    })
    .await;

    assert!(matches!(err, HarvestError::Translation { .. }));
}
