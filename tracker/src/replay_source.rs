use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc;
use workout_tracker_lib::{geo, track_point::TrackPoint};

use crate::{
    error::TrackingError,
    position_source::{PositionSource, PositionUpdate, PositionWatch, WatchConfig},
};

/// Position source that replays a fixed route, one fix per interval.
///
/// Stands in for a real positioning backend in tests and in the replay
/// binary. The minimum-distance filter from the [`WatchConfig`] is honored
/// the way a device would: fixes that moved less than `min_distance_m` since
/// the previous delivered one are swallowed. When the route runs out the
/// stream ends.
pub struct ReplaySource {
    points: Vec<TrackPoint>,
    fix_interval: Duration,
    grant_permission: bool,
}

impl ReplaySource {
    pub fn new(points: Vec<TrackPoint>) -> Self {
        Self {
            points,
            fix_interval: Duration::from_secs(1),
            grant_permission: true,
        }
    }

    /// Deliver one fix per `interval` instead of the default one per second.
    pub fn with_fix_interval(mut self, interval: Duration) -> Self {
        self.fix_interval = interval;
        self
    }

    /// Make `request_permission` report a denial.
    pub fn denying_permission(mut self) -> Self {
        self.grant_permission = false;
        self
    }
}

#[async_trait]
impl PositionSource for ReplaySource {
    async fn request_permission(&self) -> Result<bool, TrackingError> {
        Ok(self.grant_permission)
    }

    async fn watch(&self, config: WatchConfig) -> Result<PositionWatch, TrackingError> {
        let (tx, rx) = mpsc::channel(16);
        let points = self.points.clone();
        let fix_interval = self.fix_interval;

        tokio::spawn(async move {
            let mut last_delivered: Option<TrackPoint> = None;
            for point in points {
                tokio::time::sleep(fix_interval).await;

                if let Some(last) = &last_delivered {
                    let moved_m = geo::haversine_distance_km(last, &point) * 1000.0;
                    if moved_m < config.min_distance_m {
                        continue;
                    }
                }

                if tx.send(PositionUpdate::Fix(point)).await.is_err() {
                    // Subscriber hung up, stop replaying.
                    return;
                }
                last_delivered = Some(point);
            }
            tracing::debug!("Replay route exhausted");
        });

        Ok(PositionWatch::new(rx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn suppresses_fixes_below_min_distance() {
        let start = TrackPoint::new(37.0, -122.0);
        // Roughly half a meter north, below the one meter default.
        let jitter = TrackPoint::new(37.0000045, -122.0);
        let away = TrackPoint::new(37.001, -122.0);

        let source = ReplaySource::new(vec![start, jitter, away]);
        let mut watch = source.watch(WatchConfig::default()).await.unwrap();

        let mut delivered = Vec::new();
        while let Some(update) = watch.next_update().await {
            match update {
                PositionUpdate::Fix(point) => delivered.push(point),
                PositionUpdate::Error(msg) => panic!("unexpected error: {msg}"),
            }
        }

        assert_eq!(delivered, vec![start, away]);
    }

    #[tokio::test(start_paused = true)]
    async fn stream_ends_when_route_is_exhausted() {
        let source = ReplaySource::new(vec![TrackPoint::new(55.0, 12.0)]);
        let mut watch = source.watch(WatchConfig::default()).await.unwrap();

        assert!(matches!(
            watch.next_update().await,
            Some(PositionUpdate::Fix(_))
        ));
        assert!(watch.next_update().await.is_none());
    }

    #[tokio::test]
    async fn permission_follows_the_configured_answer() {
        let granting = ReplaySource::new(Vec::new());
        assert_eq!(granting.request_permission().await, Ok(true));

        let denying = ReplaySource::new(Vec::new()).denying_permission();
        assert_eq!(denying.request_permission().await, Ok(false));
    }
}
