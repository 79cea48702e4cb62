use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc;
use workout_tracker_lib::track_point::TrackPoint;

use crate::error::TrackingError;

/// Accuracy tier requested from the positioning backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accuracy {
    Low,
    Medium,
    High,
}

/// Subscription parameters for a position watch.
#[derive(Debug, Clone, Copy)]
pub struct WatchConfig {
    pub accuracy: Accuracy,
    /// Fixes closer than this to the previous delivered one are suppressed.
    pub min_distance_m: f64,
    /// Minimum time between delivered fixes.
    pub min_interval: Duration,
}

impl Default for WatchConfig {
    /// The subscription a tracking session uses: high accuracy, a fix per
    /// meter moved, at most one per second.
    fn default() -> Self {
        Self {
            accuracy: Accuracy::High,
            min_distance_m: 1.0,
            min_interval: Duration::from_secs(1),
        }
    }
}

/// One message from a live position subscription.
#[derive(Debug, Clone)]
pub enum PositionUpdate {
    Fix(TrackPoint),
    /// The backend reported a failure. The subscription may still recover
    /// and deliver further fixes.
    Error(String),
}

/// Handle to a live position subscription.
///
/// Updates arrive over a channel owned by the source's producer task.
/// Closing the handle is the unsubscribe signal: the producer sees its
/// sends fail and winds down.
pub struct PositionWatch {
    rx: mpsc::Receiver<PositionUpdate>,
}

impl PositionWatch {
    pub fn new(rx: mpsc::Receiver<PositionUpdate>) -> Self {
        Self { rx }
    }

    /// Next update from the source, or `None` once the stream has ended.
    pub async fn next_update(&mut self) -> Option<PositionUpdate> {
        self.rx.recv().await
    }

    /// Cancel the subscription. Safe to call more than once; dropping the
    /// watch has the same effect.
    pub fn stop(&mut self) {
        self.rx.close();
    }
}

/// The positioning capability a [`TrackingSession`] runs against.
///
/// Implementations wrap whatever actually produces fixes, a platform
/// location service or a replayed recording.
///
/// [`TrackingSession`]: crate::session::TrackingSession
#[async_trait]
pub trait PositionSource: Send + Sync {
    /// Ask the user for location access. `Ok(false)` means they declined.
    async fn request_permission(&self) -> Result<bool, TrackingError>;

    /// Open a stream of fixes. Only called after permission was granted.
    async fn watch(&self, config: WatchConfig) -> Result<PositionWatch, TrackingError>;
}
