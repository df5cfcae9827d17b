use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crosstune::{
    cli,
    config::{self, Settings},
    error,
    types::{InputOrigin, SearchTarget},
};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Resolve a Spotify track link and print the search link
    Resolve(ResolveOptions),

    /// Handle text shared from another app and open the search
    Share(ShareOptions),

    /// Handle a Spotify link opened with crosstune and open the search
    Open(OpenOptions),

    /// Build a search link from a track and artist name
    Search(SearchOptions),

    /// Resolve links line by line from stdin
    Interactive(InteractiveOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct ResolveOptions {
    /// Track link, URI or id; surrounding text is allowed
    #[clap(required = true, num_args = 1..)]
    text: Vec<String>,

    /// Service to search on
    #[clap(long, value_enum)]
    target: Option<SearchTarget>,

    /// Open the search link in the browser
    #[clap(long)]
    open: bool,

    /// Print the result as JSON
    #[clap(long)]
    json: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct ShareOptions {
    /// Shared text containing a Spotify link
    #[clap(required = true, num_args = 1..)]
    text: Vec<String>,

    #[clap(long, value_enum)]
    target: Option<SearchTarget>,

    /// Only print the search link
    #[clap(long)]
    no_launch: bool,

    #[clap(long)]
    json: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct OpenOptions {
    /// Spotify link as handed over by the system
    link: String,

    #[clap(long, value_enum)]
    target: Option<SearchTarget>,

    /// Only print the search link
    #[clap(long)]
    no_launch: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct SearchOptions {
    #[clap(long)]
    track: String,

    #[clap(long)]
    artist: Option<String>,

    #[clap(long, value_enum)]
    target: Option<SearchTarget>,

    /// Open the search link in the browser
    #[clap(long)]
    open: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct InteractiveOptions {
    #[clap(long, value_enum)]
    target: Option<SearchTarget>,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

fn init_tracing() {
    FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("crosstune=warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .compact()
        .init();
}

#[tokio::main]
async fn main() {
    init_tracing();

    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => error!("Invalid configuration. Err: {}", e),
    };

    let cli = Cli::parse();

    match cli.command {
        Command::Resolve(opt) => {
            let launch = opt.open.then_some(true);
            cli::resolve(
                &settings,
                &opt.text.join(" "),
                InputOrigin::Typed,
                opt.target,
                launch,
                opt.json,
            )
            .await
        }
        Command::Share(opt) => {
            let launch = opt.no_launch.then_some(false);
            cli::resolve(
                &settings,
                &opt.text.join(" "),
                InputOrigin::Shared,
                opt.target,
                launch,
                opt.json,
            )
            .await
        }
        Command::Open(opt) => {
            let launch = opt.no_launch.then_some(false);
            cli::resolve(
                &settings,
                &opt.link,
                InputOrigin::Opened,
                opt.target,
                launch,
                false,
            )
            .await
        }
        Command::Search(opt) => cli::search(
            &opt.track,
            opt.artist.as_deref(),
            opt.target.unwrap_or(settings.default_target),
            opt.open,
        ),
        Command::Interactive(opt) => cli::interactive(&settings, opt.target).await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
