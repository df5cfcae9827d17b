use crosstune::config::Settings;
use crosstune::error::ResolveError;
use crosstune::spotify::SpotifyPages;
use crosstune::types::{Resolution, ResolvedTrack, TrackId};

use assert_matches::assert_matches;
use pretty_assertions::assert_eq;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ID: &str = "11dFghVXANMlKmJXsNCbNl";
const TRACK_PAGE: &str = r#"<html><head>
<meta property="og:title" content="Cut To The Feeling"/>
<meta property="og:description" content="Carly Rae Jepsen · Cut To The Feeling · Song · 2017"/>
</head></html>"#;

// Helper: pages client pointed at the mock server
fn pages_for(server: &MockServer) -> SpotifyPages {
    SpotifyPages::mirrored(&Settings::default(), Url::parse(&server.uri()).unwrap()).unwrap()
}

fn track_id() -> TrackId {
    TrackId::parse(ID).unwrap()
}

async fn mount_track_page(server: &MockServer, body: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/track/{ID}")))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_fetch_metadata_reads_description() {
    let server = MockServer::start().await;
    mount_track_page(&server, TRACK_PAGE).await;

    let track = pages_for(&server).fetch_metadata(&track_id()).await.unwrap();
    assert_eq!(track, ResolvedTrack::new("Cut To The Feeling", "Carly Rae Jepsen"));
}

#[tokio::test]
async fn test_fetch_metadata_title_only_page() {
    let server = MockServer::start().await;
    mount_track_page(
        &server,
        r#"<meta property="og:title" content="Cut To The Feeling">"#,
    )
    .await;

    let track = pages_for(&server).fetch_metadata(&track_id()).await.unwrap();
    assert_eq!(track, ResolvedTrack::new("Cut To The Feeling", ""));
}

#[tokio::test]
async fn test_fetch_metadata_without_tags() {
    let server = MockServer::start().await;
    mount_track_page(&server, "<html><head><title>Spotify</title></head></html>").await;

    let result = pages_for(&server).fetch_metadata(&track_id()).await;
    assert_matches!(result, Err(ResolveError::MetadataUnavailable));
}

#[tokio::test]
async fn test_fetch_metadata_not_found_is_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_string(TRACK_PAGE))
        .mount(&server)
        .await;

    let result = pages_for(&server).fetch_metadata(&track_id()).await;
    assert_matches!(result, Err(ResolveError::MetadataUnavailable));
}

#[tokio::test]
async fn test_fetch_metadata_connection_refused_is_network_error() {
    // Nothing listens on port 1
    let pages = SpotifyPages::mirrored(
        &Settings::default(),
        Url::parse("http://127.0.0.1:1").unwrap(),
    )
    .unwrap();

    let err = pages.fetch_metadata(&track_id()).await.unwrap_err();
    assert_matches!(err, ResolveError::Network(_));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_fetch_metadata_is_idempotent() {
    let server = MockServer::start().await;
    mount_track_page(&server, TRACK_PAGE).await;
    let pages = pages_for(&server);

    let first = pages.fetch_metadata(&track_id()).await.unwrap();
    let second = pages.fetch_metadata(&track_id()).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_short_link_follows_redirects() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/abc123"))
        .respond_with(ResponseTemplate::new(302).insert_header("Location", "/hop"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/hop"))
        .respond_with(
            ResponseTemplate::new(301)
                .insert_header("Location", format!("/track/{ID}?si=shared").as_str()),
        )
        .mount(&server)
        .await;
    mount_track_page(&server, TRACK_PAGE).await;

    let short_link = Url::parse(&format!("{}/abc123", server.uri())).unwrap();
    let id = pages_for(&server).resolve_short_link(&short_link).await.unwrap();
    assert_eq!(id, track_id());
}

#[tokio::test]
async fn test_short_link_to_non_track_page_is_invalid() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/abc123"))
        .respond_with(ResponseTemplate::new(302).insert_header("Location", "/album/xyz"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/album/xyz"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .mount(&server)
        .await;

    let short_link = Url::parse(&format!("{}/abc123", server.uri())).unwrap();
    let result = pages_for(&server).resolve_short_link(&short_link).await;
    assert_matches!(result, Err(ResolveError::InvalidInput));
}

#[tokio::test]
async fn test_public_client_ignores_track_paths_on_other_hosts() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/abc123"))
        .respond_with(
            ResponseTemplate::new(302).insert_header("Location", format!("/track/{ID}").as_str()),
        )
        .mount(&server)
        .await;
    mount_track_page(&server, TRACK_PAGE).await;

    let pages = SpotifyPages::new(&Settings::default()).unwrap();
    let short_link = Url::parse(&format!("{}/abc123", server.uri())).unwrap();

    // Only a spotify.com track url counts at the end of the redirects
    let result = pages.resolve_short_link(&short_link).await;
    assert_matches!(result, Err(ResolveError::InvalidInput));
}

#[test]
fn test_classify_on_mirror_host() {
    let base = Url::parse("http://127.0.0.1:8080").unwrap();
    let mirrored = SpotifyPages::mirrored(&Settings::default(), base).unwrap();
    let public = SpotifyPages::new(&Settings::default()).unwrap();

    assert_matches!(
        mirrored.classify("http://127.0.0.1:8080/abc123"),
        Ok(Resolution::ShortLinkPending(_))
    );
    assert_eq!(
        mirrored
            .classify(&format!("http://127.0.0.1:8080/track/{ID}"))
            .unwrap(),
        Resolution::Track(track_id())
    );
    assert_matches!(
        mirrored.classify("http://127.0.0.1:8080/track/nope"),
        Err(ResolveError::InvalidInput)
    );
    assert_matches!(
        mirrored.classify("http://127.0.0.1:9090/abc123"),
        Err(ResolveError::InvalidInput)
    );
    assert_matches!(
        public.classify("http://127.0.0.1:8080/abc123"),
        Err(ResolveError::InvalidInput)
    );

    // Regular references behave the same on both
    assert_eq!(
        mirrored.classify(&format!("spotify:track:{ID}")).unwrap(),
        public.classify(&format!("spotify:track:{ID}")).unwrap()
    );
}

#[tokio::test]
async fn test_short_link_dead_host_is_network_error() {
    let pages = SpotifyPages::new(&Settings::default()).unwrap();
    let short_link = Url::parse("http://127.0.0.1:1/abc123").unwrap();

    let result = pages.resolve_short_link(&short_link).await;
    assert_matches!(result, Err(ResolveError::Network(_)));
}

#[tokio::test]
async fn test_resolve_text_runs_whole_pipeline() {
    let server = MockServer::start().await;
    mount_track_page(&server, TRACK_PAGE).await;

    let (id, track) = pages_for(&server)
        .resolve_text("Check this out: https://open.spotify.com/track/11dFghVXANMlKmJXsNCbNl?si=abc!")
        .await
        .unwrap();

    assert_eq!(id, track_id());
    assert_eq!(track.track_name, "Cut To The Feeling");
}

#[tokio::test]
async fn test_resolve_text_rejects_blank_before_network() {
    let pages = SpotifyPages::mirrored(
        &Settings::default(),
        Url::parse("http://127.0.0.1:1").unwrap(),
    )
    .unwrap();

    // A network attempt would fail with Network, not InvalidInput
    assert_matches!(pages.resolve_text("   ").await, Err(ResolveError::InvalidInput));
    assert_matches!(pages.resolve_text("not a link").await, Err(ResolveError::InvalidInput));
}

#[test]
fn test_track_page_url() {
    let pages = SpotifyPages::new(&Settings::default()).unwrap();
    assert_eq!(
        pages.track_page_url(&track_id()),
        "https://open.spotify.com/track/11dFghVXANMlKmJXsNCbNl"
    );
}
