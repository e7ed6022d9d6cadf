//! Library API integration tests.
//!
//! Drives the router in-process with `tower::ServiceExt::oneshot`.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use common::TestHarness;
use vidshelf_common::{MOVIE_AI_HINT, PLACEHOLDER_THUMBNAIL_URL, SHOW_AI_HINT};

async fn get(harness: &TestHarness, uri: &str) -> (StatusCode, Vec<u8>) {
    let response = harness
        .router()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, body.to_vec())
}

async fn get_json(harness: &TestHarness, uri: &str) -> (StatusCode, Value) {
    let (status, body) = get(harness, uri).await;
    (status, serde_json::from_slice(&body).unwrap())
}

fn sample_library() -> TestHarness {
    let harness = TestHarness::new();
    harness.add_media("zodiac.mp4", b"zodiac");
    harness.add_media("Alien.mkv", b"alien");
    harness.add_media("Alien.vtt", b"WEBVTT");
    harness.add_media("notes.txt", b"ignored");
    harness.add_media("Breaking Bad/Season 1/Episode 2.mp4", b"cat");
    harness.add_media("Breaking Bad/Season 1/Episode 1.mp4", b"pilot");
    harness.add_media("Breaking Bad/Season 2/Seven-Thirty Seven E1.mp4", b"737");
    harness
}

#[tokio::test]
async fn health_endpoints() {
    let harness = TestHarness::new();

    let (status, _) = get(&harness, "/health").await;
    assert_eq!(status, StatusCode::OK);

    let (status, json) = get_json(&harness, "/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn empty_library_lists_nothing() {
    let harness = TestHarness::new();
    let (status, json) = get_json(&harness, "/api/library").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, serde_json::json!([]));
}

#[tokio::test]
async fn library_lists_movies_and_shows_by_title() {
    let harness = sample_library();
    let (status, json) = get_json(&harness, "/api/library").await;
    assert_eq!(status, StatusCode::OK);

    let items = json.as_array().unwrap();
    let titles: Vec<&str> = items.iter().map(|i| i["title"].as_str().unwrap()).collect();
    assert_eq!(titles, vec!["Alien", "Breaking Bad", "Zodiac"]);

    let alien = &items[0];
    assert_eq!(alien["type"], "movie");
    assert_eq!(alien["id"], "alien");
    assert_eq!(alien["videoUrl"], "/media/Alien.mkv");
    assert_eq!(alien["subtitlesUrl"], "/media/Alien.vtt");
    assert_eq!(alien["thumbnailUrl"], PLACEHOLDER_THUMBNAIL_URL);
    assert_eq!(alien["aiHint"], MOVIE_AI_HINT);
    assert!(alien.get("videoPath").is_none());

    let zodiac = &items[2];
    assert!(zodiac.get("subtitlesUrl").is_none());

    let show = &items[1];
    assert_eq!(show["type"], "show");
    assert_eq!(show["id"], "breaking-bad");
    assert_eq!(show["aiHint"], SHOW_AI_HINT);
    assert_eq!(show["seasons"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn show_detail_includes_seasons_and_episodes() {
    let harness = sample_library();
    let (status, json) = get_json(&harness, "/api/shows/breaking-bad").await;
    assert_eq!(status, StatusCode::OK);

    let seasons = json["seasons"].as_array().unwrap();
    assert_eq!(seasons[0]["seasonNumber"], 1);
    assert_eq!(seasons[1]["seasonNumber"], 2);

    let first = &seasons[0]["episodes"];
    assert_eq!(first.as_array().unwrap().len(), 2);
    assert_eq!(first[0]["id"], "breaking-bad-s1-e1");
    assert_eq!(first[1]["id"], "breaking-bad-s1-e2");
    assert_eq!(first[0]["showId"], "breaking-bad");
    assert_eq!(first[0]["seasonNumber"], 1);
    assert_eq!(first[0]["episodeNumber"], 1);
    assert_eq!(
        first[0]["videoUrl"],
        "/media/Breaking%20Bad/Season%201/Episode%201.mp4"
    );
}

#[tokio::test]
async fn show_lookup_misses_return_404() {
    let harness = sample_library();

    let (status, json) = get_json(&harness, "/api/shows/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "not_found");

    // A movie ID is not a show.
    let (status, _) = get_json(&harness, "/api/shows/alien").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn media_lookup_finds_movies_and_episodes() {
    let harness = sample_library();

    let (status, movie) = get_json(&harness, "/api/media/zodiac").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(movie["type"], "movie");
    assert_eq!(movie["title"], "Zodiac");

    let (status, episode) = get_json(&harness, "/api/media/breaking-bad-s2-e1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(episode["type"], "episode");
    assert_eq!(episode["seasonNumber"], 2);
    assert_eq!(episode["episodeNumber"], 1);
    assert_eq!(episode["title"], "Seven Thirty Seven E1");

    // Shows are not playable.
    let (status, _) = get_json(&harness, "/api/media/breaking-bad").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn edited_sidecar_is_served_verbatim() {
    let harness = sample_library();
    harness.add_metadata(
        "alien",
        r#"{"title":"Alien (Director's Cut)","description":"In space.","aiHint":"sci-fi","thumbnailUrl":"/metadata/thumbnails/alien.png"}"#,
    );

    let (_, movie) = get_json(&harness, "/api/media/alien").await;
    assert_eq!(movie["title"], "Alien (Director's Cut)");
    assert_eq!(movie["description"], "In space.");
    assert_eq!(movie["aiHint"], "sci-fi");
    assert_eq!(movie["thumbnailUrl"], "/metadata/thumbnails/alien.png");
}

#[tokio::test]
async fn corrupt_sidecar_hides_only_that_movie() {
    let harness = sample_library();
    harness.add_metadata("zodiac", "{ not json");

    let (status, json) = get_json(&harness, "/api/library").await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["alien", "breaking-bad"]);

    let (status, _) = get_json(&harness, "/api/media/zodiac").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn first_listing_writes_sidecars() {
    let harness = sample_library();
    let (status, _) = get_json(&harness, "/api/library").await;
    assert_eq!(status, StatusCode::OK);

    for id in ["alien", "zodiac", "breaking-bad"] {
        let path = harness.metadata_dir().join(format!("{id}.json"));
        assert!(path.exists(), "missing side-car for {id}");
    }
}

#[tokio::test]
async fn static_media_and_metadata_are_served() {
    let harness = sample_library();
    harness.add_metadata("alien", r#"{"title":"Alien"}"#);
    let thumbs = harness.metadata_dir().join("thumbnails");
    std::fs::create_dir_all(&thumbs).unwrap();
    std::fs::write(thumbs.join("alien.png"), b"\x89PNG").unwrap();

    let (status, body) = get(&harness, "/media/Alien.vtt").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"WEBVTT");

    let (status, body) = get(&harness, "/media/Breaking%20Bad/Season%201/Episode%201.mp4").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"pilot");

    let (status, body) = get(&harness, "/metadata/thumbnails/alien.png").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"\x89PNG");
}
