//! Configuration management for crosstune.
//!
//! Values come from environment variables, optionally seeded from a `.env`
//! file in the local data directory. Every key has a default, so an empty
//! environment is a valid configuration.
//!
//! Lookup order:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults

use std::{env, path::PathBuf, time::Duration};

use crate::{error::ConfigError, types::SearchTarget};

pub const DEFAULT_TARGET_KEY: &str = "CROSSTUNE_DEFAULT_TARGET";
pub const HTTP_TIMEOUT_KEY: &str = "CROSSTUNE_HTTP_TIMEOUT_SECS";
pub const USER_AGENT_KEY: &str = "CROSSTUNE_USER_AGENT";

const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 15;
const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0 Safari/537.36";

/// Directory holding the optional `.env` file.
///
/// - Linux: `~/.local/share/crosstune`
/// - macOS: `~/Library/Application Support/crosstune`
/// - Windows: `%LOCALAPPDATA%/crosstune`
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("crosstune");
    path
}

/// Loads `<data_dir>/.env` into the process environment if it exists.
///
/// The directory is created on first run so users know where to put the
/// file. A missing file is not an error; a malformed one is. Variables that
/// are already set in the environment are not overridden.
pub async fn load_env() -> Result<(), ConfigError> {
    let dir = data_dir();
    async_fs::create_dir_all(&dir).await?;

    let path = dir.join(".env");
    if !path.is_file() {
        tracing::debug!(path = %path.display(), "no .env file, using environment only");
        return Ok(());
    }

    dotenv::from_path(&path)?;
    tracing::debug!(path = %path.display(), "loaded .env file");
    Ok(())
}

/// Search target used when none is given on the command line.
pub fn default_target() -> Result<SearchTarget, ConfigError> {
    match env::var(DEFAULT_TARGET_KEY) {
        Ok(value) => value
            .parse()
            .map_err(|reason| ConfigError::InvalidValue {
                key: DEFAULT_TARGET_KEY,
                value,
                reason,
            }),
        Err(_) => Ok(SearchTarget::default()),
    }
}

/// Timeout applied to every HTTP request, redirects included.
pub fn http_timeout() -> Result<Duration, ConfigError> {
    match env::var(HTTP_TIMEOUT_KEY) {
        Ok(value) => match value.trim().parse::<u64>() {
            Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
            Ok(_) => Err(ConfigError::InvalidValue {
                key: HTTP_TIMEOUT_KEY,
                value,
                reason: "must be greater than zero".to_string(),
            }),
            Err(e) => Err(ConfigError::InvalidValue {
                key: HTTP_TIMEOUT_KEY,
                value,
                reason: e.to_string(),
            }),
        },
        Err(_) => Ok(Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS)),
    }
}

/// User agent sent with every request. Spotify serves the Open Graph tags
/// to browser-like agents.
pub fn user_agent() -> String {
    env::var(USER_AGENT_KEY)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string())
}

/// Snapshot of all settings.
#[derive(Debug, Clone)]
pub struct Settings {
    pub default_target: SearchTarget,
    pub http_timeout: Duration,
    pub user_agent: String,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            default_target: default_target()?,
            http_timeout: http_timeout()?,
            user_agent: user_agent(),
        })
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_target: SearchTarget::default(),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}
