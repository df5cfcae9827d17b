use url::Url;

use crate::{error::LaunchError, types::SearchTarget};

/// Hands a finished search link to whatever should display it.
pub trait Launcher: Send + Sync {
    fn launch(&self, uri: &Url, target: SearchTarget) -> Result<(), LaunchError>;
}

/// Opens links in the system's default browser.
///
/// Desktop systems have no notion of a preferred app per target, so the
/// target only shows up in the log line.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserLauncher;

impl Launcher for BrowserLauncher {
    fn launch(&self, uri: &Url, target: SearchTarget) -> Result<(), LaunchError> {
        tracing::debug!(%uri, target = %target, package = target.preferred_package(), "launching search");
        webbrowser::open(uri.as_str()).map_err(|source| LaunchError::Browser {
            uri: uri.to_string(),
            source,
        })
    }
}
