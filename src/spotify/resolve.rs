//! Syntactic classification of track references.
//!
//! Nothing in here touches the network. Short links are only recognized and
//! handed back as [`Resolution::ShortLinkPending`]; following them is the job
//! of [`super::SpotifyPages::resolve_short_link`].

use url::Url;

use crate::{
    error::ResolveError,
    types::{Resolution, TrackId},
};

const TRACK_URI_PREFIX: &str = "spotify:track:";
const EMBEDDED_URI_PARAM: &str = "uri";

/// Why an input was not accepted at one nesting level.
enum Rejection {
    Unrecognized,
    /// An embedded `uri=` parameter carried yet another `uri=` parameter.
    TooDeep,
}

/// Classifies `input` as a track id, a pending short link, or invalid input.
///
/// Accepted shapes, first match wins:
///
/// 1. a bare 22 character id
/// 2. `spotify:track:<id>` (prefix is case-insensitive)
/// 3. any url whose `uri` query parameter resolves on its own (one level only)
/// 4. `https://open.spotify.com/.../track/<id>` on any `spotify.com` host
/// 5. `https://spotify.link/<slug>` on any `spotify.link` host
///
/// # Arguments
///
/// * `input` - A normalized reference, see [`crate::utils::normalize`]
///
/// # Errors
///
/// [`ResolveError::InvalidInput`] for everything else, including an
/// embedded `uri=` that carries another `uri=`.
///
/// # Example
///
/// ```
/// let resolution = resolve("spotify:track:11dFghVXANMlKmJXsNCbNl")?;
/// assert!(matches!(resolution, Resolution::Track(_)));
/// ```
pub fn resolve(input: &str) -> Result<Resolution, ResolveError> {
    classify(input.trim(), false).map_err(|_| ResolveError::InvalidInput)
}

fn classify(input: &str, nested: bool) -> Result<Resolution, Rejection> {
    if input.is_empty() {
        return Err(Rejection::Unrecognized);
    }

    if let Some(id) = TrackId::parse(input) {
        return Ok(Resolution::Track(id));
    }

    if has_track_uri_prefix(input) {
        let candidate = input.rsplit(':').next().unwrap_or_default();
        return TrackId::parse(candidate)
            .map(Resolution::Track)
            .ok_or(Rejection::Unrecognized);
    }

    let url = Url::parse(input).map_err(|_| Rejection::Unrecognized)?;

    if let Some(embedded) = embedded_uri(&url) {
        if nested {
            return Err(Rejection::TooDeep);
        }

        match classify(embedded.trim(), true) {
            Ok(resolution) => return Ok(resolution),
            Err(Rejection::TooDeep) => return Err(Rejection::TooDeep),
            Err(Rejection::Unrecognized) => {}
        }
    }

    if is_spotify_host(&url) {
        return track_id_from_path(&url)
            .map(Resolution::Track)
            .ok_or(Rejection::Unrecognized);
    }

    if is_short_link(&url) {
        return Ok(Resolution::ShortLinkPending(url));
    }

    Err(Rejection::Unrecognized)
}

/// Track id of a `spotify.com` track url, if `url` is one.
pub fn track_id_from_url(url: &Url) -> Option<TrackId> {
    if !is_spotify_host(url) {
        return None;
    }
    track_id_from_path(url)
}

/// Looks for a `track` path segment followed by the id as the final segment.
///
/// Localized paths such as `/intl-de/track/<id>` are fine. Anything after the
/// id, including a trailing slash, disqualifies the url.
pub(crate) fn track_id_from_path(url: &Url) -> Option<TrackId> {
    let segments: Vec<&str> = url.path_segments()?.collect();
    let track_index = segments.iter().position(|segment| *segment == "track")?;

    match &segments[track_index + 1..] {
        [id] => TrackId::parse(id),
        _ => None,
    }
}

pub fn is_short_link(url: &Url) -> bool {
    host_matches(url, "spotify.link")
}

fn is_spotify_host(url: &Url) -> bool {
    host_matches(url, "spotify.com")
}

fn host_matches(url: &Url, domain: &str) -> bool {
    let Some(host) = url.host_str() else {
        return false;
    };
    let host = host.to_ascii_lowercase();

    host == domain
        || host
            .strip_suffix(domain)
            .is_some_and(|rest| rest.ends_with('.'))
}

fn has_track_uri_prefix(input: &str) -> bool {
    input
        .get(..TRACK_URI_PREFIX.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(TRACK_URI_PREFIX))
}

fn embedded_uri(url: &Url) -> Option<String> {
    url.query_pairs()
        .find(|(key, _)| key == EMBEDDED_URI_PARAM)
        .map(|(_, value)| value.into_owned())
}
