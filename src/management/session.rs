use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use tokio::{
    sync::{Mutex, watch},
    task::{AbortHandle, JoinHandle},
};

use crate::{
    error::{LaunchError, ResolveError},
    launcher::Launcher,
    spotify::SpotifyPages,
    types::{InputOrigin, Resolution, ResolutionState, SearchTarget, TrackId},
    utils,
};

/// Orchestrates resolution attempts and owns the state the front end renders.
///
/// Each [`SessionManager::submit`] starts a new attempt with a fresh
/// generation number and aborts the previous one. Attempts only ever write to
/// the state while it still carries their generation, so a slow, superseded
/// request can never overwrite the result of a newer one.
pub struct SessionManager {
    pages: SpotifyPages,
    generations: AtomicU64,
    state: Arc<watch::Sender<ResolutionState>>,
    in_flight: Mutex<Option<AbortHandle>>,
}

impl SessionManager {
    pub fn new(pages: SpotifyPages, target: SearchTarget) -> Self {
        let (state, _) = watch::channel(ResolutionState {
            target,
            ..ResolutionState::default()
        });

        Self {
            pages,
            generations: AtomicU64::new(0),
            state: Arc::new(state),
            in_flight: Mutex::new(None),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<ResolutionState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> ResolutionState {
        self.state.borrow().clone()
    }

    pub fn select_target(&self, target: SearchTarget) {
        self.state.send_modify(|state| state.target = target);
    }

    /// Replaces the input text without resolving it; clears a stale error.
    pub fn edit_input(&self, text: &str) {
        self.state.send_modify(|state| {
            state.input = text.to_string();
            state.error = None;
        });
    }

    /// Starts a new attempt for `raw`, superseding any attempt in flight.
    ///
    /// The state is reset right away for the new generation; progress and
    /// the final result arrive through [`SessionManager::subscribe`].
    ///
    /// # Arguments
    ///
    /// * `raw` - Text to resolve, normalized by the attempt itself
    /// * `origin` - Decides whether the display url is canonicalized and
    ///   whether the result should be launched once ready
    ///
    /// # Returns
    ///
    /// The handle of the spawned attempt. Awaiting it is optional; an
    /// aborted attempt yields a cancelled `JoinError`.
    pub async fn submit(&self, raw: &str, origin: InputOrigin) -> JoinHandle<()> {
        let generation = self.next_generation().await;
        let target = self.state.borrow().target;

        self.state.send_replace(ResolutionState {
            generation,
            input: raw.to_string(),
            target,
            launch_when_ready: origin.launches_when_ready(),
            ..ResolutionState::default()
        });

        let attempt = Attempt {
            generation,
            pages: self.pages.clone(),
            state: Arc::clone(&self.state),
        };
        let raw = raw.to_string();
        let handle = tokio::spawn(async move { attempt.run(raw, origin).await });

        *self.in_flight.lock().await = Some(handle.abort_handle());
        handle
    }

    /// Runs an attempt to completion and returns the state it settled in.
    ///
    /// If a newer attempt supersedes this one meanwhile, the returned state is
    /// the newer attempt's.
    pub async fn resolve(&self, raw: &str, origin: InputOrigin) -> ResolutionState {
        let handle = self.submit(raw, origin).await;
        if let Err(e) = handle.await {
            tracing::debug!(error = %e, "attempt did not run to completion");
        }
        self.snapshot()
    }

    /// Drops the current result and abandons any attempt in flight.
    pub async fn clear(&self) {
        let generation = self.next_generation().await;
        let target = self.state.borrow().target;

        self.state.send_replace(ResolutionState {
            generation,
            target,
            ..ResolutionState::default()
        });
    }

    /// Opens the search link for the current result.
    pub fn launch_current(&self, launcher: &dyn Launcher) -> Result<(), LaunchError> {
        let state = self.snapshot();
        let uri = state.search_uri().ok_or(LaunchError::NothingResolved)?;
        launcher.launch(&uri, state.target)
    }

    /// Launches the current result if the caller or the input origin asks for it.
    ///
    /// # Arguments
    ///
    /// * `launch` - Explicit choice from the caller; `None` defers to the
    ///   origin of the input that produced the current state
    /// * `launcher` - Where the search link goes
    ///
    /// # Returns
    ///
    /// `Ok(true)` if the search link was handed to the launcher, `Ok(false)`
    /// if launching was not wanted.
    pub fn launch_if_ready(
        &self,
        launch: Option<bool>,
        launcher: &dyn Launcher,
    ) -> Result<bool, LaunchError> {
        if !launch.unwrap_or(self.state.borrow().launch_when_ready) {
            return Ok(false);
        }

        self.launch_current(launcher)?;
        Ok(true)
    }

    async fn next_generation(&self) -> u64 {
        let generation = self.generations.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(previous) = self.in_flight.lock().await.take() {
            previous.abort();
        }
        generation
    }
}

/// One resolution attempt, tagged with the generation it belongs to.
struct Attempt {
    generation: u64,
    pages: SpotifyPages,
    state: Arc<watch::Sender<ResolutionState>>,
}

impl Attempt {
    async fn run(&self, raw: String, origin: InputOrigin) {
        if let Err(e) = self.pipeline(&raw, origin).await {
            tracing::debug!(generation = self.generation, error = %e, "attempt failed");
            self.publish(|state| {
                state.loading = false;
                state.error = Some(e.kind());
            });
        }
    }

    async fn pipeline(&self, raw: &str, origin: InputOrigin) -> Result<(), ResolveError> {
        let input = utils::normalize(raw)?;
        self.publish(|state| state.display_url = Some(input.clone()));

        let id = match self.pages.classify(&input)? {
            Resolution::Track(id) => {
                if origin.canonicalizes() {
                    self.show_canonical(&id);
                }
                id
            }
            Resolution::ShortLinkPending(short_link) => {
                self.start_loading();
                let id = self.pages.resolve_short_link(&short_link).await?;
                self.show_canonical(&id);
                id
            }
        };

        self.start_loading();
        let track = self.pages.fetch_metadata(&id).await?;
        tracing::debug!(generation = self.generation, track = ?track, "attempt resolved");

        self.publish(|state| {
            state.loading = false;
            state.error = None;
            state.track = Some(track);
        });
        Ok(())
    }

    fn start_loading(&self) {
        self.publish(|state| {
            state.loading = true;
            state.error = None;
            state.track = None;
        });
    }

    fn show_canonical(&self, id: &TrackId) {
        self.publish(|state| state.display_url = Some(id.canonical_url()));
    }

    /// Applies `update` only while this attempt is still the current one.
    fn publish(&self, update: impl FnOnce(&mut ResolutionState)) -> bool {
        let applied = self.state.send_if_modified(|state| {
            if state.generation != self.generation {
                return false;
            }
            update(state);
            true
        });

        if !applied {
            tracing::debug!(generation = self.generation, "discarding stale update");
        }
        applied
    }
}
