use serde::Serialize;
use thiserror::Error;

/// Failure of a single resolution attempt.
///
/// Every variant is terminal for the attempt that produced it: the loading
/// flag is cleared and [`ResolveError::user_message`] is shown. None of them
/// is retried automatically.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// Malformed or unrecognized track reference. Only the user can fix it.
    #[error("invalid Spotify track reference")]
    InvalidInput,

    /// Transport-level failure on any HTTP call.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The page was fetched but carried no usable track metadata.
    #[error("track metadata unavailable")]
    MetadataUnavailable,
}

impl ResolveError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ResolveError::InvalidInput => ErrorKind::InvalidInput,
            ResolveError::Network(_) => ErrorKind::NetworkError,
            ResolveError::MetadataUnavailable => ErrorKind::MetadataUnavailable,
        }
    }

    /// Fixed message shown to the user for this kind of failure.
    pub fn user_message(&self) -> &'static str {
        self.kind().user_message()
    }

    /// Only transport failures are worth re-running the same input for.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ResolveError::Network(_))
    }
}

/// Copyable summary of a [`ResolveError`], kept in the session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorKind {
    InvalidInput,
    NetworkError,
    MetadataUnavailable,
}

impl ErrorKind {
    pub fn user_message(self) -> &'static str {
        match self {
            ErrorKind::InvalidInput => "Enter a valid Spotify track link or URI.",
            ErrorKind::NetworkError => "Network error while contacting Spotify. Please try again.",
            ErrorKind::MetadataUnavailable => "Could not read track metadata from Spotify.",
        }
    }
}

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("failed to open {uri}: {source}")]
    Browser {
        uri: String,
        #[source]
        source: std::io::Error,
    },

    #[error("nothing to launch, no track has been resolved yet")]
    NothingResolved,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot prepare config directory: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot read .env file: {0}")]
    Dotenv(#[from] dotenv::Error),

    #[error("invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}
