use std::{sync::Arc, time::Duration};

use tokio::time;
use tracker::{
    replay_source::ReplaySource,
    session::{SessionPhase, TrackingSession},
};
use workout_tracker_lib::track_point::TrackPoint;

#[tokio::test(start_paused = true)]
async fn full_session_over_a_replayed_route() {
    let route = vec![
        TrackPoint::new(37.0, -122.0),
        TrackPoint::new(37.001, -122.0),
    ];
    let source = Arc::new(ReplaySource::new(route));
    let mut session = TrackingSession::new(source);

    session.start().await.unwrap();
    assert!(session.is_tracking());

    // One fix per second, so both have arrived by 2.5 s in.
    time::sleep(Duration::from_millis(2500)).await;

    let snapshot = session.snapshot().await;
    assert_eq!(snapshot.route.len(), 2);
    assert!((snapshot.distance_km - 0.111).abs() / 0.111 < 0.005);
    assert_eq!(snapshot.elapsed_secs, 2);

    let summary = session.stop().await.unwrap();
    assert_eq!(summary.distance_km, "0.11");
    assert_eq!(summary.duration_secs, 2);
    assert_eq!(summary.route.len(), 2);
    assert_eq!(summary.format_duration(), "00:02");

    assert_eq!(session.snapshot().await.phase, SessionPhase::Completed);
}

#[tokio::test(start_paused = true)]
async fn back_to_back_sessions_replay_from_the_start() {
    let route = vec![
        TrackPoint::new(37.0, -122.0),
        TrackPoint::new(37.001, -122.0),
        TrackPoint::new(37.002, -122.0),
    ];
    let source = Arc::new(ReplaySource::new(route));
    let mut session = TrackingSession::new(source);

    session.start().await.unwrap();
    time::sleep(Duration::from_millis(3500)).await;
    let first = session.stop().await.unwrap();
    assert_eq!(first.route.len(), 3);
    assert_eq!(first.distance_km, "0.22");
    assert_eq!(first.duration_secs, 3);

    // A second start replays the route from its beginning with everything
    // reset.
    session.start().await.unwrap();
    time::sleep(Duration::from_millis(1500)).await;

    let snapshot = session.snapshot().await;
    assert_eq!(snapshot.route.len(), 1);
    assert_eq!(snapshot.distance_km, 0.0);
    assert_eq!(snapshot.elapsed_secs, 1);

    let second = session.stop().await.unwrap();
    assert_eq!(second.distance_km, "0.00");
    assert_eq!(second.duration_secs, 1);
}

#[tokio::test]
async fn denied_permission_blocks_the_session() {
    let source =
        Arc::new(ReplaySource::new(vec![TrackPoint::new(37.0, -122.0)]).denying_permission());
    let mut session = TrackingSession::new(source);

    assert!(session.start().await.is_err());
    assert!(!session.is_tracking());
    assert!(session.stop().await.is_none());
}
