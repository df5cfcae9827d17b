use crate::{
    cli::output,
    config::Settings,
    error,
    launcher::BrowserLauncher,
    management::SessionManager,
    spotify::SpotifyPages,
    success,
    types::{InputOrigin, SearchTarget},
    warning,
};

/// Resolves one piece of input and prints or launches the search link.
///
/// `origin` decides the defaults: typed input only prints, shared and opened
/// input canonicalize the Spotify url and launch the search once resolved.
/// `launch` overrides the origin's default when given.
pub async fn resolve(
    settings: &Settings,
    text: &str,
    origin: InputOrigin,
    target: Option<SearchTarget>,
    launch: Option<bool>,
    json: bool,
) {
    let pages = match SpotifyPages::new(settings) {
        Ok(pages) => pages,
        Err(e) => error!("Cannot create HTTP client: {}", e),
    };
    let session = SessionManager::new(pages, target.unwrap_or(settings.default_target));

    let pb = output::spinner("Resolving Spotify track...");
    let state = session.resolve(text, origin).await;
    pb.finish_and_clear();

    if let Some(kind) = state.error {
        if json {
            output::print_json(&state);
            std::process::exit(1);
        }
        error!("{}", kind.user_message());
    }

    if json {
        output::print_json(&state);
    } else {
        output::print_table(&state);
    }

    match session.launch_if_ready(launch, &BrowserLauncher) {
        Ok(true) => success!("Opened search on {}", state.target),
        Ok(false) => {}
        Err(e) => warning!(
            "Failed to open browser ({}). Please navigate to the following URL manually:\n{}",
            e,
            state
                .search_uri()
                .map(|uri| uri.to_string())
                .unwrap_or_default()
        ),
    }
}
