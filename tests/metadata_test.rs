use crosstune::error::ResolveError;
use crosstune::spotify::metadata::*;
use crosstune::types::ResolvedTrack;

use assert_matches::assert_matches;
use pretty_assertions::assert_eq;

// Helper to wrap meta tags in a minimal page
fn page(head: &str) -> String {
    format!("<!DOCTYPE html><html><head><title>Spotify</title>{head}</head><body></body></html>")
}

#[test]
fn test_description_yields_track_and_artist() {
    let html = page(r#"<meta property="og:description" content="Carly Rae Jepsen · Cut To The Feeling">"#);

    assert_eq!(
        extract_track_and_artist(&html),
        Some(ResolvedTrack::new("Cut To The Feeling", "Carly Rae Jepsen"))
    );
}

#[test]
fn test_description_with_type_and_year() {
    let html = page(
        r#"<meta property="og:description" content="Carly Rae Jepsen · Cut To The Feeling · Song · 2017"/>"#,
    );

    let track = extract_track_and_artist(&html).unwrap();
    assert_eq!(track.track_name, "Cut To The Feeling");
    assert_eq!(track.artist_name, "Carly Rae Jepsen");
}

#[test]
fn test_description_entities_are_decoded() {
    let html = page(
        r#"<meta property="og:description" content="Simon &amp; Garfunkel &middot; The Boxer &#8211; Live">"#,
    );

    assert_eq!(
        extract_track_and_artist(&html),
        Some(ResolvedTrack::new("The Boxer \u{2013} Live", "Simon & Garfunkel"))
    );
}

#[test]
fn test_description_mojibake_separator() {
    let html = page("<meta property=\"og:description\" content=\"Carly Rae Jepsen \u{c2}\u{b7} Cut To The Feeling\">");

    assert_eq!(
        extract_track_and_artist(&html),
        Some(ResolvedTrack::new("Cut To The Feeling", "Carly Rae Jepsen"))
    );
}

#[test]
fn test_description_attribute_order_and_other_tags() {
    let html = page(
        r#"<meta name="description" content="Listen on Spotify"><meta content="Robyn · Dancing On My Own" property="og:description" />"#,
    );

    assert_eq!(
        extract_track_and_artist(&html),
        Some(ResolvedTrack::new("Dancing On My Own", "Robyn"))
    );
}

#[test]
fn test_description_without_separator_fails() {
    let html = page(r#"<meta property="og:description" content="Listen to Cut To The Feeling on Spotify.">"#);
    assert_eq!(extract_track_and_artist(&html), None);

    // A hyphen is not the separator
    let html = page(r#"<meta property="og:description" content="Carly Rae Jepsen - Cut To The Feeling">"#);
    assert_eq!(extract_track_and_artist(&html), None);
}

#[test]
fn test_description_with_blank_track_fails() {
    let html = page(r#"<meta property="og:description" content="Carly Rae Jepsen ·  · Song">"#);
    assert_eq!(extract_track_and_artist(&html), None);
}

#[test]
fn test_title_only() {
    let html = page(r#"<meta property="og:title" content="  Cut To The Feeling  ">"#);
    assert_eq!(extract_track_title(&html), Some("Cut To The Feeling".to_string()));

    let blank = page(r#"<meta property="og:title" content="   ">"#);
    assert_eq!(extract_track_title(&blank), None);
}

#[test]
fn test_extract_metadata_prefers_description() {
    let html = page(
        r#"<meta property="og:title" content="Cut To The Feeling"><meta property="og:description" content="Carly Rae Jepsen · Cut To The Feeling">"#,
    );

    assert_eq!(
        extract_metadata(&html).unwrap(),
        ResolvedTrack::new("Cut To The Feeling", "Carly Rae Jepsen")
    );
}

#[test]
fn test_extract_metadata_falls_back_to_title() {
    let html = page(
        r#"<meta property="og:title" content="Cut To The Feeling"><meta property="og:description" content="Listen on Spotify">"#,
    );

    let track = extract_metadata(&html).unwrap();
    assert_eq!(track, ResolvedTrack::new("Cut To The Feeling", ""));
    assert!(track.is_title_only());
}

#[test]
fn test_extract_metadata_without_tags_is_unavailable() {
    assert_matches!(
        extract_metadata(&page("")),
        Err(ResolveError::MetadataUnavailable)
    );
    assert_matches!(extract_metadata(""), Err(ResolveError::MetadataUnavailable));
    assert_matches!(
        extract_metadata("<meta property=\"og:image\" content=\"https://i.scdn.co/x.jpg\">"),
        Err(ResolveError::MetadataUnavailable)
    );
}
