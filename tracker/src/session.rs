use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::{
    sync::{Mutex, oneshot},
    task::JoinHandle,
};
use workout_tracker_lib::{track_point::TrackPoint, workout::WorkoutSummary};

use crate::{
    distance::DistanceAccumulator,
    error::TrackingError,
    position_source::{PositionSource, PositionUpdate, PositionWatch, WatchConfig},
    session_clock::SessionClock,
};

/// Lifecycle of a [`TrackingSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    Tracking,
    Completed,
}

/// The one mutable record of a session. Owned behind a mutex shared between
/// the controller and the session task; while tracking, only the task
/// writes.
#[derive(Debug)]
struct SessionState {
    phase: SessionPhase,
    route: Vec<TrackPoint>,
    distance_km: f64,
    elapsed_secs: u64,
    started_at: Option<DateTime<Utc>>,
    current_position: Option<TrackPoint>,
    stream_error: Option<String>,
}

impl SessionState {
    fn idle() -> Self {
        Self {
            phase: SessionPhase::Idle,
            route: Vec::new(),
            distance_km: 0.0,
            elapsed_secs: 0,
            started_at: None,
            current_position: None,
            stream_error: None,
        }
    }

    /// Wipe everything from the previous session and enter `Tracking`.
    fn begin(&mut self, started_at: DateTime<Utc>) {
        *self = Self::idle();
        self.phase = SessionPhase::Tracking;
        self.started_at = Some(started_at);
    }
}

/// Point-in-time view of a session, detached from the live state.
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    pub phase: SessionPhase,
    pub current_position: Option<TrackPoint>,
    pub route: Vec<TrackPoint>,
    pub distance_km: f64,
    pub elapsed_secs: u64,
    pub started_at: Option<DateTime<Utc>>,
    /// Last failure reported by the position stream, if any. Tracking keeps
    /// going after one.
    pub stream_error: Option<String>,
}

impl SessionSnapshot {
    pub fn is_tracking(&self) -> bool {
        self.phase == SessionPhase::Tracking
    }
}

struct LiveSession {
    stop_tx: oneshot::Sender<()>,
    task: JoinHandle<WorkoutSummary>,
}

/// Controller for one workout at a time: requests location permission,
/// subscribes to the position source, runs the session clock and accumulates
/// route and distance until stopped.
///
/// `start` spawns a task that owns the subscription and the clock; `stop`
/// signals it and collects the finished [`WorkoutSummary`]. Dropping the
/// controller mid-session aborts the task, which tears both down.
pub struct TrackingSession {
    source: Arc<dyn PositionSource>,
    watch_config: WatchConfig,
    state: Arc<Mutex<SessionState>>,
    permission_granted: bool,
    live: Option<LiveSession>,
}

impl TrackingSession {
    pub fn new(source: Arc<dyn PositionSource>) -> Self {
        Self::with_watch_config(source, WatchConfig::default())
    }

    pub fn with_watch_config(source: Arc<dyn PositionSource>, watch_config: WatchConfig) -> Self {
        Self {
            source,
            watch_config,
            state: Arc::new(Mutex::new(SessionState::idle())),
            permission_granted: false,
            live: None,
        }
    }

    /// Begin a fresh session.
    ///
    /// Asks for location permission on the first start (a granted answer is
    /// remembered, a denial is not), wipes the previous session's route,
    /// distance and elapsed time, starts the clock and subscribes to the
    /// position source. Calling `start` while already tracking is ignored.
    pub async fn start(&mut self) -> Result<(), TrackingError> {
        if self.live.is_some() {
            tracing::warn!("Tracking already in progress, ignoring start");
            return Ok(());
        }

        if !self.permission_granted {
            if !self.source.request_permission().await? {
                tracing::warn!("Location permission denied");
                return Err(TrackingError::PermissionDenied);
            }
            self.permission_granted = true;
        }

        self.state.lock().await.begin(Utc::now());

        let mut clock = SessionClock::new();
        clock.start();

        let watch = match self.source.watch(self.watch_config).await {
            Ok(watch) => watch,
            Err(err) => {
                tracing::error!("Failed to subscribe to position source: {err}");
                *self.state.lock().await = SessionState::idle();
                return Err(err);
            }
        };

        let (stop_tx, stop_rx) = oneshot::channel();
        let task = tokio::spawn(run_session(self.state.clone(), watch, clock, stop_rx));
        self.live = Some(LiveSession { stop_tx, task });

        tracing::info!("Tracking session started");
        Ok(())
    }

    /// End the running session and hand over its summary.
    ///
    /// Returns `None` when nothing is running, so stray stop presses are
    /// harmless.
    pub async fn stop(&mut self) -> Option<WorkoutSummary> {
        let live = self.live.take()?;

        // A dropped receiver means the task is already winding down.
        let _ = live.stop_tx.send(());

        match live.task.await {
            Ok(summary) => {
                tracing::info!(
                    distance_km = %summary.distance_km,
                    duration_secs = summary.duration_secs,
                    points = summary.route.len(),
                    "Tracking session completed"
                );
                Some(summary)
            }
            Err(err) => {
                tracing::error!("Session task failed: {err}");
                *self.state.lock().await = SessionState::idle();
                None
            }
        }
    }

    pub fn is_tracking(&self) -> bool {
        self.live.is_some()
    }

    /// Detached copy of the current session state, for rendering.
    pub async fn snapshot(&self) -> SessionSnapshot {
        let state = self.state.lock().await;
        SessionSnapshot {
            phase: state.phase,
            current_position: state.current_position,
            route: state.route.clone(),
            distance_km: state.distance_km,
            elapsed_secs: state.elapsed_secs,
            started_at: state.started_at,
            stream_error: state.stream_error.clone(),
        }
    }
}

impl Drop for TrackingSession {
    fn drop(&mut self) {
        if let Some(live) = self.live.take() {
            // The subscription and the clock live inside the task, aborting
            // it releases both.
            live.task.abort();
        }
    }
}

/// Event loop of one session: the only writer of the shared state while the
/// phase is `Tracking`. Fixes and clock ticks are serialized here, so the
/// route order always matches arrival order.
async fn run_session(
    state: Arc<Mutex<SessionState>>,
    mut watch: PositionWatch,
    mut clock: SessionClock,
    mut stop_rx: oneshot::Receiver<()>,
) -> WorkoutSummary {
    let mut accumulator = DistanceAccumulator::new();
    let mut stream_open = true;

    loop {
        tokio::select! {
            // A closed sender counts as a stop request too.
            _ = &mut stop_rx => break,

            elapsed = clock.tick() => {
                state.lock().await.elapsed_secs = elapsed;
            }

            update = watch.next_update(), if stream_open => match update {
                Some(PositionUpdate::Fix(point)) => {
                    let total_km = accumulator.add_point(&point);
                    let mut state = state.lock().await;
                    state.route.push(point);
                    state.distance_km = total_km;
                    state.current_position = Some(point);
                }
                Some(PositionUpdate::Error(msg)) => {
                    tracing::warn!("Position stream error: {msg}");
                    state.lock().await.stream_error = Some(msg);
                }
                None => {
                    // No more fixes will come. The clock and the partial
                    // route stay live until the caller stops the session.
                    tracing::warn!("Position stream closed mid-session");
                    state.lock().await.stream_error = Some("position stream closed".to_string());
                    stream_open = false;
                }
            },
        }
    }

    watch.stop();
    clock.stop();

    let mut state = state.lock().await;
    state.elapsed_secs = clock.elapsed_secs();
    state.phase = SessionPhase::Completed;

    WorkoutSummary::new(state.distance_km, state.elapsed_secs, state.route.clone())
}
