use tokio::io::{AsyncBufReadExt, BufReader};

use crate::{
    cli::output,
    config::Settings,
    error, info,
    launcher::BrowserLauncher,
    management::SessionManager,
    spotify::SpotifyPages,
    success,
    types::{InputOrigin, ResolutionState, SearchTarget},
    warning,
};

const HELP: &str = "Paste a Spotify link per line. Commands: :target <youtube-music|youtube>, :open, :clear, :quit";

/// Reads links from stdin until EOF, resolving each as it arrives.
///
/// A new line replaces whatever attempt is still running, so only the most
/// recent input ever produces output.
pub async fn interactive(settings: &Settings, target: Option<SearchTarget>) {
    let pages = match SpotifyPages::new(settings) {
        Ok(pages) => pages,
        Err(e) => error!("Cannot create HTTP client: {}", e),
    };
    let session = SessionManager::new(pages, target.unwrap_or(settings.default_target));

    let mut updates = session.subscribe();
    let printer = tokio::spawn(async move {
        let mut printed: Option<u64> = None;
        while updates.changed().await.is_ok() {
            let state = updates.borrow_and_update().clone();
            if state.is_settled() && printed != Some(state.generation) {
                printed = Some(state.generation);
                report(&state);
            }
        }
    });

    info!("{}", HELP);
    info!("Searching on {}", session.snapshot().target);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut last_attempt = None;

    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                warning!("Cannot read input: {}", e);
                break;
            }
        };
        let line = line.trim();

        match line {
            "" => continue,
            ":quit" | ":q" => break,
            ":clear" => {
                session.clear().await;
                info!("Cleared.");
            }
            ":open" => match session.launch_current(&BrowserLauncher) {
                Ok(()) => success!("Opened search on {}", session.snapshot().target),
                Err(e) => warning!("{}", e),
            },
            command if command.starts_with(":target") => {
                let name = command.trim_start_matches(":target").trim();
                match name.parse::<SearchTarget>() {
                    Ok(target) => {
                        session.select_target(target);
                        info!("Searching on {}", target);
                        if let Some(uri) = session.snapshot().search_uri() {
                            println!("{uri}");
                        }
                    }
                    Err(e) => warning!("{}", e),
                }
            }
            command if command.starts_with(':') => warning!("Unknown command. {}", HELP),
            text => {
                last_attempt = Some(session.submit(text, InputOrigin::Typed).await);
            }
        }
    }

    if let Some(attempt) = last_attempt {
        if let Err(e) = attempt.await {
            tracing::debug!(error = %e, "last attempt did not run to completion");
        }
    }
    // The printer stops once the last sender is gone.
    drop(session);
    if let Err(e) = printer.await {
        tracing::debug!(error = %e, "printer task failed");
    }
}

fn report(state: &ResolutionState) {
    if let Some(message) = state.error_message() {
        warning!("{}", message);
        return;
    }

    output::print_table(state);
}
