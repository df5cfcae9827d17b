use reqwest::Client;
use url::Url;

use crate::{
    config::Settings,
    error::ResolveError,
    types::{Resolution, ResolvedTrack, TrackId},
    utils,
};

use super::{metadata, resolve};

/// Public web player, serving one Open Graph page per track.
pub const OPEN_SPOTIFY_URL: &str = "https://open.spotify.com";

/// HTTP access to Spotify's public, unauthenticated pages.
///
/// The client is built once and shared; clones are cheap.
#[derive(Debug, Clone)]
pub struct SpotifyPages {
    client: Client,
    base_url: Url,
    /// Set when `base_url` is a stand-in that also serves short links.
    mirror: bool,
}

impl SpotifyPages {
    /// Client for the public site.
    ///
    /// # Errors
    ///
    /// [`ResolveError::Network`] if the HTTP client cannot be built, e.g.
    /// because no TLS backend is available.
    pub fn new(settings: &Settings) -> Result<Self, ResolveError> {
        let base_url = Url::parse(OPEN_SPOTIFY_URL).expect("public site url is valid");
        Self::build(settings, base_url, false)
    }

    /// Client for a stand-in server playing both `open.spotify.com` and
    /// `spotify.link`.
    ///
    /// Track pages are fetched from `base_url`. Any other url on the same
    /// host and port is treated as a short link, and redirects that end on a
    /// `/track/<id>` path of that host resolve to the id. Use it for local
    /// mirrors and test servers; the public site never needs it.
    ///
    /// # Example
    ///
    /// ```
    /// let pages = SpotifyPages::mirrored(&Settings::default(), Url::parse("http://127.0.0.1:8080")?)?;
    /// let id = pages.resolve_track_id("http://127.0.0.1:8080/abc123").await?;
    /// ```
    pub fn mirrored(settings: &Settings, base_url: Url) -> Result<Self, ResolveError> {
        Self::build(settings, base_url, true)
    }

    fn build(settings: &Settings, base_url: Url, mirror: bool) -> Result<Self, ResolveError> {
        let client = Client::builder()
            .timeout(settings.http_timeout)
            .user_agent(settings.user_agent.as_str())
            .build()?;

        Ok(Self {
            client,
            base_url,
            mirror,
        })
    }

    pub fn track_page_url(&self, id: &TrackId) -> String {
        format!(
            "{base}/track/{id}",
            base = self.base_url.as_str().trim_end_matches('/'),
            id = id
        )
    }

    /// Follows a short link and reads the track id off the final url.
    ///
    /// Only the url after all redirects matters; the body is never read.
    ///
    /// # Errors
    ///
    /// * [`ResolveError::Network`] - the host could not be reached or a
    ///   redirect failed in transit
    /// * [`ResolveError::InvalidInput`] - the redirects did not end on a
    ///   track page
    pub async fn resolve_short_link(&self, short_link: &Url) -> Result<TrackId, ResolveError> {
        tracing::debug!(%short_link, "following short link");

        let response = self.client.get(short_link.clone()).send().await?;
        let final_url = response.url().clone();
        drop(response);

        tracing::debug!(%final_url, "short link redirected");
        self.track_id_from_final_url(&final_url)
            .ok_or(ResolveError::InvalidInput)
    }

    /// Downloads the track page and scrapes name and artist from it.
    ///
    /// # Errors
    ///
    /// * [`ResolveError::Network`] - transport failure
    /// * [`ResolveError::MetadataUnavailable`] - non-success status, or a
    ///   page without usable Open Graph tags
    pub async fn fetch_metadata(&self, id: &TrackId) -> Result<ResolvedTrack, ResolveError> {
        let url = self.track_page_url(id);
        tracing::debug!(%url, "fetching track page");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%url, %status, "track page request was not successful");
            return Err(ResolveError::MetadataUnavailable);
        }

        let html = response.text().await?;
        metadata::extract_metadata(&html)
    }

    /// Classifies already normalized input without touching the network.
    ///
    /// Same as [`resolve::resolve`], except that a mirrored client also
    /// accepts urls on its own host.
    pub fn classify(&self, input: &str) -> Result<Resolution, ResolveError> {
        match resolve::resolve(input) {
            Err(ResolveError::InvalidInput) if self.mirror => self
                .classify_on_mirror(input.trim())
                .ok_or(ResolveError::InvalidInput),
            other => other,
        }
    }

    /// Classifies already normalized input and follows a short link if needed.
    pub async fn resolve_track_id(&self, input: &str) -> Result<TrackId, ResolveError> {
        match self.classify(input)? {
            Resolution::Track(id) => Ok(id),
            Resolution::ShortLinkPending(short_link) => self.resolve_short_link(&short_link).await,
        }
    }

    /// The whole pipeline for one piece of raw text.
    ///
    /// # Arguments
    ///
    /// * `raw` - Typed or shared text containing one track reference
    ///
    /// # Returns
    ///
    /// The track id together with the names scraped from its page.
    pub async fn resolve_text(&self, raw: &str) -> Result<(TrackId, ResolvedTrack), ResolveError> {
        let input = utils::normalize(raw)?;
        let id = self.resolve_track_id(&input).await?;
        let track = self.fetch_metadata(&id).await?;
        Ok((id, track))
    }

    fn classify_on_mirror(&self, input: &str) -> Option<Resolution> {
        let url = Url::parse(input).ok()?;
        if !self.is_mirror_host(&url) {
            return None;
        }

        let is_track_path = url
            .path_segments()
            .is_some_and(|mut segments| segments.any(|segment| segment == "track"));
        if is_track_path {
            resolve::track_id_from_path(&url).map(Resolution::Track)
        } else {
            Some(Resolution::ShortLinkPending(url))
        }
    }

    fn track_id_from_final_url(&self, url: &Url) -> Option<TrackId> {
        resolve::track_id_from_url(url).or_else(|| {
            self.is_mirror_host(url)
                .then(|| resolve::track_id_from_path(url))
                .flatten()
        })
    }

    fn is_mirror_host(&self, url: &Url) -> bool {
        self.mirror
            && url.host_str() == self.base_url.host_str()
            && url.port_or_known_default() == self.base_url.port_or_known_default()
    }
}
