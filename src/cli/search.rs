use crate::{
    error,
    launcher::{BrowserLauncher, Launcher},
    success,
    types::{ResolvedTrack, SearchTarget},
    utils, warning,
};

/// Builds a search link from names given directly, without touching Spotify.
pub fn search(track: &str, artist: Option<&str>, target: SearchTarget, open: bool) {
    if track.trim().is_empty() {
        error!("Track name must not be empty.");
    }

    let resolved = ResolvedTrack::new(track.trim(), artist.unwrap_or_default().trim());
    let uri = utils::build_search_uri(target, &resolved);
    println!("{uri}");

    if open {
        match BrowserLauncher.launch(&uri, target) {
            Ok(()) => success!("Opened search on {}", target),
            Err(e) => warning!("{}", e),
        }
    }
}
