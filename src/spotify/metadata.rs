//! Open Graph scraping of public track pages.
//!
//! Both strategies are plain functions over the page text so the rules can be
//! adjusted without touching any networking code.

use std::sync::LazyLock;

use regex::Regex;

use crate::{error::ResolveError, types::ResolvedTrack, utils};

/// Separator between the fields of `og:description`, e.g.
/// `Carly Rae Jepsen · Cut To The Feeling · Song · 2017`.
const DESCRIPTION_SEPARATOR: &str = " \u{b7} ";
/// The same separator after a UTF-8 page went through a Latin-1 decoder.
const MOJIBAKE_SEPARATOR: &str = " \u{c2}\u{b7} ";

struct MetaTag {
    property_first: Regex,
    content_first: Regex,
}

impl MetaTag {
    fn new(property: &str) -> Self {
        let property = regex::escape(property);
        Self {
            property_first: Regex::new(&format!(
                r#"(?i)<meta[^>]*?property\s*=\s*["']{property}["'][^>]*?content\s*=\s*"([^"]*)""#
            ))
            .expect("valid meta tag regex"),
            content_first: Regex::new(&format!(
                r#"(?i)<meta[^>]*?content\s*=\s*"([^"]*)"[^>]*?property\s*=\s*["']{property}["']"#
            ))
            .expect("valid meta tag regex"),
        }
    }

    fn content<'h>(&self, html: &'h str) -> Option<&'h str> {
        self.property_first
            .captures(html)
            .or_else(|| self.content_first.captures(html))
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }
}

static OG_DESCRIPTION: LazyLock<MetaTag> = LazyLock::new(|| MetaTag::new("og:description"));
static OG_TITLE: LazyLock<MetaTag> = LazyLock::new(|| MetaTag::new("og:title"));

/// Reads artist and track from `og:description`.
///
/// Returns `None` when the tag is missing, carries no separator, or the track
/// part is blank.
pub fn extract_track_and_artist(html: &str) -> Option<ResolvedTrack> {
    let description = utils::decode_html_entities(OG_DESCRIPTION.content(html)?)
        .replace(MOJIBAKE_SEPARATOR, DESCRIPTION_SEPARATOR);

    let mut parts = description.split(DESCRIPTION_SEPARATOR);
    let artist_name = parts.next()?.trim();
    let track_name = parts.next()?.trim();

    if track_name.is_empty() {
        return None;
    }

    Some(ResolvedTrack::new(track_name, artist_name))
}

/// Reads the track name from `og:title`.
pub fn extract_track_title(html: &str) -> Option<String> {
    let title = utils::decode_html_entities(OG_TITLE.content(html)?);
    let title = title.trim();

    (!title.is_empty()).then(|| title.to_string())
}

/// Description first, title-only second.
pub fn extract_metadata(html: &str) -> Result<ResolvedTrack, ResolveError> {
    if let Some(track) = extract_track_and_artist(html) {
        return Ok(track);
    }

    match extract_track_title(html) {
        Some(title) => {
            tracing::debug!("og:description unusable, falling back to og:title");
            Ok(ResolvedTrack::new(title, ""))
        }
        None => Err(ResolveError::MetadataUnavailable),
    }
}
