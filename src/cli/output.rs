use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tabled::Table;

use crate::{
    error::ErrorKind,
    info,
    types::{ResolutionState, ResultTableRow, SearchTarget},
};

/// Machine readable view of a settled attempt.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub input: &'a str,
    pub spotify_url: Option<&'a str>,
    pub track_name: Option<&'a str>,
    pub artist_name: Option<&'a str>,
    pub target: SearchTarget,
    pub launcher_package: &'static str,
    pub search_url: Option<String>,
    pub error: Option<ErrorKind>,
    pub error_message: Option<&'static str>,
}

impl<'a> From<&'a ResolutionState> for Report<'a> {
    fn from(state: &'a ResolutionState) -> Self {
        Self {
            input: &state.input,
            spotify_url: state.display_url.as_deref(),
            track_name: state.resolved_track_name(),
            artist_name: state.resolved_artist_name(),
            target: state.target,
            launcher_package: state.target.preferred_package(),
            search_url: state.search_uri().map(|uri| uri.to_string()),
            error: state.error,
            error_message: state.error_message(),
        }
    }
}

pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}

pub fn print_json(state: &ResolutionState) {
    match serde_json::to_string_pretty(&Report::from(state)) {
        Ok(json) => println!("{json}"),
        Err(e) => crate::warning!("Cannot serialize result: {}", e),
    }
}

/// Prints the resolved track as a table. Does nothing without a result.
pub fn print_table(state: &ResolutionState) {
    let (Some(track), Some(search)) = (state.track.as_ref(), state.search_uri()) else {
        return;
    };

    let row = ResultTableRow {
        track: track.track_name.clone(),
        artist: if track.is_title_only() {
            "-".to_string()
        } else {
            track.artist_name.clone()
        },
        spotify: state.display_url.clone().unwrap_or_default(),
        search: search.to_string(),
    };

    println!("{}", Table::new(vec![row]));
    if track.is_title_only() {
        info!("Only the track title was available, searching without artist.");
    }
}
