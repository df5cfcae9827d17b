//! Crosstune Library
//!
//! Resolves Spotify track references (bare ids, `spotify:track:` URIs,
//! `open.spotify.com` links and `spotify.link` short links) to a track and
//! artist name, and builds search links for YouTube Music or YouTube.
//!
//! # Modules
//!
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `error` - Error types
//! - `launcher` - Opening search links
//! - `management` - Resolution sessions and their state
//! - `spotify` - Reference classification and public page scraping
//! - `types` - Data structures and type definitions
//! - `utils` - Input normalization, entity decoding and search links
//!
//! # Example
//!
//! ```
//! use crosstune::{config::Settings, spotify::SpotifyPages, types::SearchTarget, utils};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), crosstune::error::ResolveError> {
//!     let pages = SpotifyPages::new(&Settings::default())?;
//!     let (_, track) = pages.resolve_text("https://spotify.link/abc123").await?;
//!     println!("{}", utils::build_search_uri(SearchTarget::YouTubeMusic, &track));
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod launcher;
pub mod management;
pub mod spotify;
pub mod types;
pub mod utils;

/// Prints a status line prefixed with a blue `o`.
///
/// Used for progress and hints that are neither a result nor a problem,
/// such as the interactive prompt's help line.
///
/// # Arguments
///
/// Same as `println!`: a format string followed by its arguments.
///
/// # Example
///
/// ```
/// info!("Searching on {}", target);
/// info!("Cleared.");
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a line prefixed with a green check mark.
///
/// # Arguments
///
/// Same as `println!`.
///
/// # Example
///
/// ```
/// success!("Opened search on {}", SearchTarget::YouTube);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a red `!` line to stderr and exits with status 1.
///
/// # Arguments
///
/// Same as `eprintln!`.
///
/// # Example
///
/// Evaluates to `!`, so it can end a `match` arm that would otherwise need a
/// value:
///
/// ```
/// let pages = match SpotifyPages::new(&settings) {
///     Ok(pages) => pages,
///     Err(e) => error!("Cannot create HTTP client: {}", e),
/// };
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a yellow `!` line to stderr. Execution continues.
///
/// For problems the user can work around, like a browser that would not
/// open or an unknown interactive command.
///
/// # Arguments
///
/// Same as `eprintln!`.
///
/// # Example
///
/// ```
/// warning!("Unknown command. {}", HELP);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
