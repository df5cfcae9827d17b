//! # Spotify Integration Module
//!
//! Everything crosstune knows about Spotify lives here. Unlike a Web API
//! client this module never authenticates: it reads the public track pages
//! that link previews use, so no credentials or tokens are involved.
//!
//! ## Layout
//!
//! ```text
//! raw text ──► utils::normalize
//!                  │
//!                  ▼
//!          resolve::resolve ──► TrackId
//!                  │
//!                  └─ ShortLinkPending ──► SpotifyPages::resolve_short_link ──► TrackId
//!                                                                      │
//!                                 SpotifyPages::fetch_metadata ◄───────┘
//!                                              │
//!                                              ▼
//!                                metadata::extract_metadata ──► ResolvedTrack
//! ```
//!
//! - [`resolve`] classifies input without any I/O.
//! - [`metadata`] holds the scraping rules as pure functions over page text.
//! - [`pages`] owns the HTTP client and glues the two together.
//!
//! ## Network boundary
//!
//! - `GET https://open.spotify.com/track/<id>` answers with HTML carrying
//!   `og:description` (`Artist · Track · Song · Year`) and `og:title`.
//! - `GET https://spotify.link/<slug>` answers with a redirect chain that
//!   ends on a canonical track url.
//!
//! ## Errors
//!
//! All operations return [`crate::error::ResolveError`]. Transport failures
//! become `Network`, pages without usable tags become `MetadataUnavailable`,
//! and anything that is not a track reference is `InvalidInput`.

pub mod metadata;
pub mod pages;
pub mod resolve;

pub use pages::{OPEN_SPOTIFY_URL, SpotifyPages};
