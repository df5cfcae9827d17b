use std::{fmt, str::FromStr};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tabled::Tabled;
use url::Url;

use crate::error::ErrorKind;

/// Number of characters in a Spotify track id.
pub const TRACK_ID_LEN: usize = 22;

/// A validated Spotify track id: exactly 22 ASCII alphanumeric characters.
///
/// [`TrackId::parse`] is the only way to build one, so holding a `TrackId`
/// means the id is well formed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TrackId(String);

impl TrackId {
    pub fn parse(value: &str) -> Option<Self> {
        if value.len() == TRACK_ID_LEN && value.bytes().all(|b| b.is_ascii_alphanumeric()) {
            Some(Self(value.to_string()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Canonical public page of the track.
    pub fn canonical_url(&self) -> String {
        format!("https://open.spotify.com/track/{}", self.0)
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Outcome of the purely syntactic classification of an input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Track(TrackId),
    /// A `spotify.link` short link; needs a network round trip to resolve.
    ShortLinkPending(Url),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedTrack {
    pub track_name: String,
    /// Empty when only the page title could be read.
    pub artist_name: String,
}

impl ResolvedTrack {
    pub fn new(track_name: impl Into<String>, artist_name: impl Into<String>) -> Self {
        Self {
            track_name: track_name.into(),
            artist_name: artist_name.into(),
        }
    }

    pub fn is_title_only(&self) -> bool {
        self.artist_name.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
pub enum SearchTarget {
    #[default]
    #[value(name = "youtube-music", alias = "ytmusic")]
    #[serde(rename = "youtube-music")]
    YouTubeMusic,
    #[value(name = "youtube", alias = "yt")]
    #[serde(rename = "youtube")]
    YouTube,
}

impl SearchTarget {
    pub const ALL: [SearchTarget; 2] = [SearchTarget::YouTubeMusic, SearchTarget::YouTube];

    pub fn name(self) -> &'static str {
        match self {
            SearchTarget::YouTubeMusic => "YouTube Music",
            SearchTarget::YouTube => "YouTube",
        }
    }

    /// Base of the search link; the encoded query is appended as-is.
    pub fn search_prefix(self) -> &'static str {
        match self {
            SearchTarget::YouTubeMusic => "https://music.youtube.com/search?q=",
            SearchTarget::YouTube => "https://www.youtube.com/results?search_query=",
        }
    }

    /// Package id of the app that prefers to handle this target on Android.
    pub fn preferred_package(self) -> &'static str {
        match self {
            SearchTarget::YouTubeMusic => "com.google.android.apps.youtube.music",
            SearchTarget::YouTube => "com.google.android.youtube",
        }
    }
}

impl fmt::Display for SearchTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SearchTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "youtube-music" | "ytmusic" | "music" => Ok(SearchTarget::YouTubeMusic),
            "youtube" | "yt" => Ok(SearchTarget::YouTube),
            other => Err(format!(
                "unknown search target '{other}', expected youtube-music or youtube"
            )),
        }
    }
}

/// Where a piece of input came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOrigin {
    /// Typed or pasted into the input field.
    Typed,
    /// Text handed over by a share action.
    Shared,
    /// A link opened directly with this application.
    Opened,
}

impl InputOrigin {
    /// Shared and opened input replace the display url with the canonical one.
    pub fn canonicalizes(self) -> bool {
        !matches!(self, InputOrigin::Typed)
    }

    pub fn launches_when_ready(self) -> bool {
        !matches!(self, InputOrigin::Typed)
    }
}

/// State of the current resolution attempt, as seen by the presentation layer.
///
/// The session replaces this value as a whole on every transition.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ResolutionState {
    pub generation: u64,
    pub input: String,
    pub loading: bool,
    pub error: Option<ErrorKind>,
    pub track: Option<ResolvedTrack>,
    pub target: SearchTarget,
    pub display_url: Option<String>,
    /// Set when the attempt should launch the search link once resolved.
    pub launch_when_ready: bool,
}

impl ResolutionState {
    pub fn error_message(&self) -> Option<&'static str> {
        self.error.map(ErrorKind::user_message)
    }

    pub fn resolved_track_name(&self) -> Option<&str> {
        self.track.as_ref().map(|t| t.track_name.as_str())
    }

    pub fn resolved_artist_name(&self) -> Option<&str> {
        self.track.as_ref().map(|t| t.artist_name.as_str())
    }

    pub fn search_uri(&self) -> Option<Url> {
        self.track
            .as_ref()
            .map(|track| crate::utils::build_search_uri(self.target, track))
    }

    /// True once the attempt has finished, with or without a result.
    pub fn is_settled(&self) -> bool {
        !self.loading && (self.track.is_some() || self.error.is_some())
    }
}

#[derive(Tabled)]
pub struct ResultTableRow {
    pub track: String,
    pub artist: String,
    pub spotify: String,
    pub search: String,
}
