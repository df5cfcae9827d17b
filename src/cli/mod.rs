//! # CLI Module
//!
//! Command-line front end for crosstune. It takes the place of a share sheet
//! or link handler: text comes in on the command line or stdin, the result
//! is printed, and the search link is opened in the browser when asked.
//!
//! ## Commands
//!
//! - [`resolve()`] backs `resolve`, `share` and `open`. The three differ only
//!   in the [`crate::types::InputOrigin`] they pass: typed input just prints,
//!   shared and opened input canonicalize the Spotify url and launch the
//!   search once the track is known.
//! - [`search`] builds a search link from names given directly.
//! - [`interactive`] keeps a session open and resolves one line at a time;
//!   each new line supersedes the attempt still in flight.
//!
//! ## Usage
//!
//! ```bash
//! crosstune resolve https://open.spotify.com/track/11dFghVXANMlKmJXsNCbNl
//! crosstune share "Check this out: https://spotify.link/abc123!"
//! crosstune open spotify:track:11dFghVXANMlKmJXsNCbNl --target youtube
//! crosstune search --track "Cut To The Feeling" --artist "Carly Rae Jepsen"
//! crosstune interactive
//! ```
//!
//! ## Output
//!
//! Results are shown as a table, or as JSON with `--json`. Failures print one
//! of three fixed messages (invalid input, network error, metadata
//! unavailable) and exit with status 1.

mod interactive;
mod output;
mod resolve;
mod search;

pub use interactive::interactive;
pub use output::Report;
pub use resolve::resolve;
pub use search::search;
