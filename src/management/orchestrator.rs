//! The load orchestrator: one object that owns the session, the per-range
//! cache and every request to the analysis service.
//!
//! Callers never talk to the [`ArtistSource`] directly. They ask for a range
//! with [`LoadOrchestrator::ensure_loaded`] (or [`LoadOrchestrator::select_range`]
//! when the user picked it) and render from [`LoadOrchestrator::snapshot`].
//!
//! # Lifecycle
//!
//! 1. [`LoadOrchestrator::start_session`] stores the token and loads the
//!    initial range in the foreground.
//! 2. As soon as the initial range lands in the cache, a prefetch task waits
//!    `prefetch_delay` and then loads the remaining ranges in the background.
//!    This also happens when the initial range only lands on a later retry.
//! 3. Selections served from the cache never touch the network.
//! 4. [`LoadOrchestrator::logout`] drops everything; responses still in
//!    flight are discarded when they arrive.

use std::{collections::HashMap, fmt, str::FromStr, sync::Arc, time::Duration};

use tokio::{
    sync::{Mutex, Notify},
    task::{JoinHandle, JoinSet},
};

use crate::{
    collaborator::ArtistSource,
    config,
    error::{AppError, FETCH_FAILED_MESSAGE, FetchError},
    management::RangeCache,
    session::Session,
    types::{Artist, TimeRange},
};

/// Whether the user is waiting on a load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadMode {
    /// Shown with a loading indicator; failures reach the user.
    Foreground,
    /// Speculative prefetch; failures are only logged.
    Background,
}

/// What a failed foreground load does to the session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Keep the session and show the error on the dashboard.
    #[default]
    KeepSession,
    /// Drop the session and go back to the login screen with the error.
    ClearSession,
}

impl fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailurePolicy::KeepSession => f.write_str("keep_session"),
            FailurePolicy::ClearSession => f.write_str("clear_session"),
        }
    }
}

impl FromStr for FailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "keep_session" | "keep" => Ok(FailurePolicy::KeepSession),
            "clear_session" | "clear" => Ok(FailurePolicy::ClearSession),
            other => Err(format!(
                "invalid failure policy '{}'; expected keep_session or clear_session",
                other
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Range loaded in the foreground right after login.
    pub initial_range: TimeRange,
    pub prefetch_delay: Duration,
    pub failure_policy: FailurePolicy,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            initial_range: TimeRange::ShortTerm,
            prefetch_delay: Duration::from_millis(config::DEFAULT_PREFETCH_DELAY_MS),
            failure_policy: FailurePolicy::KeepSession,
        }
    }
}

impl LoadOptions {
    pub fn from_env() -> Self {
        Self {
            prefetch_delay: config::prefetch_delay(),
            failure_policy: config::failure_policy(),
            ..Self::default()
        }
    }
}

/// Result of a single [`LoadOrchestrator::ensure_loaded`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    NoSession,
    /// Already in memory when the call was made, nothing was requested.
    Cached,
    /// A request went out and `n` artists were stored.
    Fetched(usize),
    /// Another call was already fetching this range; this foreground call
    /// waited for it and `n` artists were stored.
    Joined(usize),
    /// Another call is already fetching this range (background callers only).
    InFlight,
    Failed(AppError),
    /// The response belonged to a session that no longer exists.
    Discarded,
}

/// What the client should currently show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    LoggedOut { notice: Option<String> },
    Loading(TimeRange),
    Ready(TimeRange),
    Failed { range: TimeRange, message: String },
}

/// Point-in-time copy of the orchestrator state for rendering.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub phase: Phase,
    pub selected: TimeRange,
    /// Artists of the selected range, empty when it is not loaded.
    pub artists: Vec<Artist>,
    pub cached: Vec<TimeRange>,
}

/// Result of starting a session: the initial load, and the prefetch task if
/// the initial load landed.
///
/// When the initial load fails, `prefetch` is `None`; a later successful
/// retry schedules the prefetch, see [`LoadOrchestrator::take_prefetch`].
#[derive(Debug)]
pub struct SessionStart {
    pub initial: LoadOutcome,
    pub prefetch: Option<JoinHandle<()>>,
}

#[derive(Debug, Default)]
struct RangeStatus {
    pending: Option<LoadMode>,
    error: Option<String>,
}

#[derive(Debug)]
struct ActiveSession {
    session: Session,
    generation: u64,
    selected: TimeRange,
    cache: RangeCache,
    status: HashMap<TimeRange, RangeStatus>,
    prefetch_scheduled: bool,
    prefetch: Option<JoinHandle<()>>,
}

#[derive(Debug, Default)]
struct State {
    active: Option<ActiveSession>,
    /// Message for the login screen (auth or login failures).
    notice: Option<String>,
    generation: u64,
}

enum Plan {
    Return(LoadOutcome),
    Join,
    Fetch { session: Session, generation: u64 },
}

/// Decides, per time range, whether to serve from memory, fetch in the
/// foreground or prefetch silently.
///
/// # Guarantees
///
/// - At most one request per range per session: a cache hit or a request
///   already in flight never triggers another one.
/// - Loading and error state is kept per range, so overlapping loads cannot
///   clobber each other's indicator.
/// - Every request is tagged with the session generation it was issued
///   under; a response arriving after logout (or a new login) is dropped.
/// - A range's pending flag is cleared on every path, success or failure.
///   Requests run in their own task, so a caller that stops waiting (a
///   timeout, an aborted task) does not leave the range stuck.
///
/// The state lock is never held across a network call, so any number of
/// loads can be outstanding at once.
///
/// # Example
///
/// ```
/// use topgender::{
///     collaborator::HttpCollaborator,
///     management::{LoadOptions, LoadOrchestrator},
///     session::Session,
///     types::TimeRange,
/// };
///
/// # async fn run() {
/// let orchestrator = LoadOrchestrator::new(HttpCollaborator::from_env(), LoadOptions::from_env());
/// orchestrator.start_session(Session::new("token")).await;
/// orchestrator.select_range(TimeRange::LongTerm).await;
/// let snapshot = orchestrator.snapshot().await;
/// # }
/// ```
pub struct LoadOrchestrator<S> {
    source: Arc<S>,
    state: Arc<Mutex<State>>,
    settled: Arc<Notify>,
    options: LoadOptions,
}

impl<S> Clone for LoadOrchestrator<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            state: Arc::clone(&self.state),
            settled: Arc::clone(&self.settled),
            options: self.options.clone(),
        }
    }
}

impl<S> LoadOrchestrator<S>
where
    S: ArtistSource + 'static,
{
    /// Creates a logged-out orchestrator on top of `source`.
    ///
    /// # Arguments
    ///
    /// * `source` - where artists come from; [`HttpCollaborator`](crate::collaborator::HttpCollaborator)
    ///   in the CLI, an in-memory fake in tests
    /// * `options` - initial range, prefetch delay and failure policy
    pub fn new(source: S, options: LoadOptions) -> Self {
        Self {
            source: Arc::new(source),
            state: Arc::new(Mutex::new(State::default())),
            settled: Arc::new(Notify::new()),
            options,
        }
    }

    pub fn options(&self) -> &LoadOptions {
        &self.options
    }

    /// Stores `session` and loads the initial range in the foreground. If
    /// that worked, the background prefetch of the other ranges is already
    /// scheduled and returned in [`SessionStart::prefetch`].
    ///
    /// Any previous session is replaced; its in-flight responses will be
    /// discarded.
    pub async fn start_session(&self, session: Session) -> SessionStart {
        let initial_range = self.options.initial_range;
        {
            let mut state = self.state.lock().await;
            if let Some(previous) = state.active.take() {
                previous.abort_prefetch();
            }
            state.generation += 1;
            state.notice = None;
            state.active = Some(ActiveSession {
                session,
                generation: state.generation,
                selected: initial_range,
                cache: RangeCache::new(),
                status: HashMap::new(),
                prefetch_scheduled: false,
                prefetch: None,
            });
            tracing::info!(generation = state.generation, "session started");
        }

        let initial = self.ensure_loaded(initial_range, LoadMode::Foreground).await;
        let prefetch = self.take_prefetch().await;

        SessionStart { initial, prefetch }
    }

    /// Hands out the prefetch task of the current session, if one has been
    /// scheduled and not taken yet. Dropping the handle leaves the task
    /// running.
    pub async fn take_prefetch(&self) -> Option<JoinHandle<()>> {
        let mut state = self.state.lock().await;
        state.active.as_mut().and_then(|a| a.prefetch.take())
    }

    /// Makes sure `range` ends up in the cache.
    ///
    /// Returns immediately on a cache hit, whatever the mode. A foreground
    /// call for a range that is already being fetched does not issue a
    /// second request; it turns the running load into a visible one and
    /// waits for it. A background call in the same situation just returns.
    ///
    /// # Arguments
    ///
    /// * `range` - the time range to load
    /// * `mode` - [`LoadMode::Foreground`] when the user is waiting on it;
    ///   failures are then recorded for the range (or end the session,
    ///   depending on the [`FailurePolicy`])
    ///
    /// # Returns
    ///
    /// What happened, see [`LoadOutcome`]. Nothing is returned as an error:
    /// the outcome is also reflected in [`LoadOrchestrator::snapshot`].
    pub async fn ensure_loaded(&self, range: TimeRange, mode: LoadMode) -> LoadOutcome {
        let plan = {
            let mut state = self.state.lock().await;
            match state.active.as_mut() {
                None => Plan::Return(LoadOutcome::NoSession),
                Some(active) if active.cache.contains(range) => {
                    tracing::debug!(range = %range, "cache hit");
                    Plan::Return(LoadOutcome::Cached)
                }
                Some(active) => {
                    let status = active.status.entry(range).or_default();
                    match (status.pending, mode) {
                        (Some(_), LoadMode::Background) => Plan::Return(LoadOutcome::InFlight),
                        (Some(_), LoadMode::Foreground) => {
                            status.pending = Some(LoadMode::Foreground);
                            status.error = None;
                            Plan::Join
                        }
                        (None, _) => {
                            status.pending = Some(mode);
                            if mode == LoadMode::Foreground {
                                status.error = None;
                            }
                            Plan::Fetch {
                                session: active.session.clone(),
                                generation: active.generation,
                            }
                        }
                    }
                }
            }
        };

        match plan {
            Plan::Return(outcome) => outcome,
            Plan::Join => {
                tracing::debug!(range = %range, "joining in-flight load");
                self.wait_for(range).await
            }
            Plan::Fetch {
                session,
                generation,
            } => {
                tracing::debug!(range = %range, ?mode, "fetching");
                let this = self.clone();
                let load = tokio::spawn(async move {
                    let result = this.source.top_artists(&session, range).await;
                    let outcome = this.settle(range, generation, result).await;
                    this.settled.notify_waiters();
                    outcome
                });

                match load.await {
                    Ok(outcome) => outcome,
                    Err(e) => {
                        tracing::error!(range = %range, error = %e, "load task died");
                        let outcome = self.abandon(range, generation).await;
                        self.settled.notify_waiters();
                        outcome
                    }
                }
            }
        }
    }

    /// Selects `range` right away, then loads it in the foreground if it is
    /// not cached yet. Safe to call on every selection.
    pub async fn select_range(&self, range: TimeRange) -> LoadOutcome {
        {
            let mut state = self.state.lock().await;
            match state.active.as_mut() {
                Some(active) => active.selected = range,
                None => return LoadOutcome::NoSession,
            }
        }

        self.ensure_loaded(range, LoadMode::Foreground).await
    }

    /// Forgets the session, every cached range, the selection and any error.
    /// Requests still in flight will be discarded when they return.
    pub async fn logout(&self) {
        let mut state = self.state.lock().await;
        if let Some(previous) = state.active.take() {
            previous.abort_prefetch();
        }
        state.notice = None;
        state.generation += 1;
        drop(state);

        // Wake joiners so they observe the logout.
        self.settled.notify_waiters();
        tracing::info!("logged out");
    }

    /// Records an authentication or login failure for the login screen.
    /// The session, if any, is left alone.
    pub async fn report(&self, error: &AppError) {
        tracing::warn!(error = %error, "login problem");
        let mut state = self.state.lock().await;
        state.notice = Some(error.user_message());
    }

    /// Copies out everything the view needs for the selected range.
    ///
    /// The phase is `Ready` once the selected range is cached, `Failed` when
    /// its last foreground load failed, and `Loading` otherwise.
    pub async fn snapshot(&self) -> Snapshot {
        let state = self.state.lock().await;
        let Some(active) = state.active.as_ref() else {
            return Snapshot {
                phase: Phase::LoggedOut {
                    notice: state.notice.clone(),
                },
                selected: TimeRange::default(),
                artists: Vec::new(),
                cached: Vec::new(),
            };
        };

        let selected = active.selected;
        let cached = active.cache.get(selected);
        let error = active.status.get(&selected).and_then(|s| s.error.clone());
        let phase = match (cached, error) {
            (Some(_), _) => Phase::Ready(selected),
            (None, Some(message)) => Phase::Failed {
                range: selected,
                message,
            },
            (None, None) => Phase::Loading(selected),
        };

        Snapshot {
            phase,
            selected,
            artists: cached.map(|c| c.artists.clone()).unwrap_or_default(),
            cached: active.cache.ranges(),
        }
    }

    /// True while any range is being loaded in the foreground.
    pub async fn is_loading(&self) -> bool {
        let state = self.state.lock().await;
        state.active.as_ref().is_some_and(|a| {
            a.status
                .values()
                .any(|s| s.pending == Some(LoadMode::Foreground))
        })
    }

    /// True while a request for `range` is outstanding, in either mode.
    pub async fn is_pending(&self, range: TimeRange) -> bool {
        let state = self.state.lock().await;
        state
            .active
            .as_ref()
            .and_then(|a| a.status.get(&range))
            .is_some_and(|s| s.pending.is_some())
    }

    /// True when `range` can be shown without a request.
    pub async fn is_cached(&self, range: TimeRange) -> bool {
        let state = self.state.lock().await;
        state
            .active
            .as_ref()
            .is_some_and(|a| a.cache.contains(range))
    }

    /// A copy of the cached artists of `range`, in the order the service
    /// ranked them. `None` when the range is not loaded or nobody is logged in.
    pub async fn cached_artists(&self, range: TimeRange) -> Option<Vec<Artist>> {
        let state = self.state.lock().await;
        state
            .active
            .as_ref()
            .and_then(|a| a.cache.get(range))
            .map(|c| c.artists.clone())
    }

    /// Loaded ranges in picker order; empty without a session.
    pub async fn cached_ranges(&self) -> Vec<TimeRange> {
        let state = self.state.lock().await;
        state
            .active
            .as_ref()
            .map(|a| a.cache.ranges())
            .unwrap_or_default()
    }

    /// The user-facing message of the last failed foreground load of
    /// `range`. Cleared when the range is requested again in the foreground.
    /// Background failures never show up here.
    pub async fn error_for(&self, range: TimeRange) -> Option<String> {
        let state = self.state.lock().await;
        state
            .active
            .as_ref()
            .and_then(|a| a.status.get(&range))
            .and_then(|s| s.error.clone())
    }

    /// The current session token, if logged in.
    pub async fn session(&self) -> Option<Session> {
        let state = self.state.lock().await;
        state.active.as_ref().map(|a| a.session.clone())
    }

    pub async fn selected(&self) -> Option<TimeRange> {
        let state = self.state.lock().await;
        state.active.as_ref().map(|a| a.selected)
    }

    fn schedule_prefetch(&self, initial: TimeRange, generation: u64) -> JoinHandle<()> {
        let this = self.clone();
        let delay = self.options.prefetch_delay;

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            if this.state.lock().await.generation != generation {
                tracing::debug!(generation, "session changed before prefetch, skipping");
                return;
            }

            let mut loads = JoinSet::new();
            for range in initial.others() {
                let this = this.clone();
                loads.spawn(async move {
                    tracing::debug!(range = %range, "prefetching");
                    (range, this.ensure_loaded(range, LoadMode::Background).await)
                });
            }

            while let Some(joined) = loads.join_next().await {
                match joined {
                    Ok((range, outcome)) => {
                        tracing::debug!(range = %range, ?outcome, "prefetch finished")
                    }
                    Err(e) => tracing::warn!(error = %e, "prefetch task panicked"),
                }
            }
        })
    }

    async fn settle(
        &self,
        range: TimeRange,
        generation: u64,
        result: Result<Vec<Artist>, FetchError>,
    ) -> LoadOutcome {
        let mut state = self.state.lock().await;
        let policy = self.options.failure_policy;

        let mut logout_notice = None;
        let outcome = {
            let Some(active) = state
                .active
                .as_mut()
                .filter(|a| a.generation == generation)
            else {
                tracing::debug!(range = %range, generation, "discarding stale response");
                return LoadOutcome::Discarded;
            };

            let status = active.status.entry(range).or_default();
            let mode = status.pending.take().unwrap_or(LoadMode::Background);

            match result {
                Ok(artists) => {
                    let count = artists.len();
                    active.cache.insert(range, artists);
                    tracing::info!(range = %range, count, "artists loaded");

                    if range == self.options.initial_range && !active.prefetch_scheduled {
                        active.prefetch_scheduled = true;
                        active.prefetch = Some(self.schedule_prefetch(range, generation));
                    }
                    LoadOutcome::Fetched(count)
                }
                Err(e) if mode == LoadMode::Background => {
                    tracing::warn!(range = %range, error = %e, "background load failed");
                    LoadOutcome::Failed(AppError::BackgroundFetch(range))
                }
                Err(e) => {
                    tracing::error!(range = %range, error = %e, %policy, "load failed");
                    let err = AppError::ForegroundFetch(range);
                    match policy {
                        FailurePolicy::KeepSession => status.error = Some(err.user_message()),
                        FailurePolicy::ClearSession => logout_notice = Some(err.user_message()),
                    }
                    LoadOutcome::Failed(err)
                }
            }
        };

        if let Some(notice) = logout_notice {
            if let Some(previous) = state.active.take() {
                previous.abort_prefetch();
            }
            state.notice = Some(notice);
        }

        outcome
    }

    /// Clears the pending flag of a load whose task died before settling.
    async fn abandon(&self, range: TimeRange, generation: u64) -> LoadOutcome {
        let mut state = self.state.lock().await;
        let Some(active) = state
            .active
            .as_mut()
            .filter(|a| a.generation == generation)
        else {
            return LoadOutcome::Discarded;
        };

        let status = active.status.entry(range).or_default();
        match status.pending.take() {
            Some(LoadMode::Foreground) => {
                status.error = Some(FETCH_FAILED_MESSAGE.to_string());
                LoadOutcome::Failed(AppError::ForegroundFetch(range))
            }
            _ => LoadOutcome::Failed(AppError::BackgroundFetch(range)),
        }
    }

    async fn wait_for(&self, range: TimeRange) -> LoadOutcome {
        loop {
            let notified = self.settled.notified();
            {
                let state = self.state.lock().await;
                let Some(active) = state.active.as_ref() else {
                    return match state.notice {
                        Some(_) => LoadOutcome::Failed(AppError::ForegroundFetch(range)),
                        None => LoadOutcome::NoSession,
                    };
                };

                if let Some(cached) = active.cache.get(range) {
                    return LoadOutcome::Joined(cached.artists.len());
                }

                let pending = active
                    .status
                    .get(&range)
                    .is_some_and(|s| s.pending.is_some());
                if !pending {
                    return LoadOutcome::Failed(AppError::ForegroundFetch(range));
                }
            }
            notified.await;
        }
    }
}

impl ActiveSession {
    fn abort_prefetch(self) {
        if let Some(prefetch) = self.prefetch {
            prefetch.abort();
        }
    }
}
