use std::sync::LazyLock;

use regex::{Captures, Regex};
use url::Url;

use crate::{
    error::ResolveError,
    types::{ResolvedTrack, SearchTarget},
};

static SHARED_URL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)https?://\S+").expect("valid shared url regex"));

static HTML_ENTITY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(#[0-9]{1,7}|#[xX][0-9a-fA-F]{1,6}|[a-zA-Z]{2,8});").expect("valid entity regex")
});

// Share sheets like to glue sentence punctuation onto the link.
const TRAILING_PUNCTUATION: &[char] = &['.', ',', ';', ':', '!', '?', ')', ']', '}'];

/// Returns the first http(s) url found in `text`, without trailing punctuation.
pub fn extract_first_url(text: &str) -> Option<String> {
    SHARED_URL_REGEX
        .find(text)
        .map(|m| m.as_str().trim_end_matches(TRAILING_PUNCTUATION).to_string())
}

/// Turns arbitrary pasted or shared text into a single candidate reference.
///
/// The first embedded url wins; without one the whole text is used, trimmed.
/// Blank results are rejected here so no network call is ever made for them.
///
/// # Arguments
///
/// * `raw` - Text as typed, pasted or handed over by a share action
///
/// # Errors
///
/// [`ResolveError::InvalidInput`] when nothing but whitespace is left.
///
/// # Example
///
/// ```
/// let input = normalize("Check this out: https://spotify.link/abc123!")?;
/// assert_eq!(input, "https://spotify.link/abc123");
/// ```
pub fn normalize(raw: &str) -> Result<String, ResolveError> {
    let normalized = extract_first_url(raw)
        .unwrap_or_else(|| raw.to_string())
        .trim()
        .to_string();

    if normalized.is_empty() {
        return Err(ResolveError::InvalidInput);
    }

    Ok(normalized)
}

/// Decodes the character references that show up in meta tag attributes.
///
/// Numeric references are decoded in full; named ones only for the small set
/// that appears in practice. Unknown names are left untouched.
pub fn decode_html_entities(input: &str) -> String {
    HTML_ENTITY_REGEX
        .replace_all(input, |caps: &Captures| {
            let entity = &caps[1];
            let decoded = match entity {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                "nbsp" => Some('\u{a0}'),
                "middot" => Some('\u{b7}'),
                _ => numeric_reference(entity),
            };

            decoded.map_or_else(|| caps[0].to_string(), String::from)
        })
        .into_owned()
}

fn numeric_reference(entity: &str) -> Option<char> {
    let digits = entity.strip_prefix('#')?;
    let code = match digits.strip_prefix(['x', 'X']) {
        Some(hex) => u32::from_str_radix(hex, 16).ok()?,
        None => digits.parse::<u32>().ok()?,
    };
    char::from_u32(code)
}

/// Track and artist joined by one space, skipping blank parts.
pub fn build_search_query(track: &ResolvedTrack) -> String {
    [track.track_name.trim(), track.artist_name.trim()]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<&str>>()
        .join(" ")
}

/// Builds the search link for `track` on `target`.
///
/// The query from [`build_search_query`] is percent-encoded in full, so a
/// space becomes `%20` and reserved characters never leak into the url.
///
/// # Example
///
/// ```
/// let track = ResolvedTrack::new("Cut To The Feeling", "Carly Rae Jepsen");
/// let uri = build_search_uri(SearchTarget::YouTube, &track);
/// assert_eq!(
///     uri.as_str(),
///     "https://www.youtube.com/results?search_query=Cut%20To%20The%20Feeling%20Carly%20Rae%20Jepsen"
/// );
/// ```
pub fn build_search_uri(target: SearchTarget, track: &ResolvedTrack) -> Url {
    let query = build_search_query(track);
    let link = format!(
        "{prefix}{query}",
        prefix = target.search_prefix(),
        query = urlencoding::encode(&query)
    );

    // The prefix is a fixed absolute url and the query is fully percent-encoded.
    Url::parse(&link).expect("search link is always a valid url")
}
