use serde::Serialize;

use crate::track_point::TrackPoint;

/// Final record of a finished tracking session, ready for the summary view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkoutSummary {
    /// Total distance in kilometers, fixed to two decimals.
    pub distance_km: String,
    pub duration_secs: u64,
    pub route: Vec<TrackPoint>,
}

impl WorkoutSummary {
    pub fn new(total_km: f64, duration_secs: u64, route: Vec<TrackPoint>) -> Self {
        Self {
            distance_km: format!("{total_km:.2}"),
            duration_secs,
            route,
        }
    }

    /// Duration as "MM:SS".
    pub fn format_duration(&self) -> String {
        format_elapsed(self.duration_secs)
    }
}

/// "MM:SS" with zero-padded parts. Minutes are not wrapped into hours, so an
/// hour and a half reads "90:00".
pub fn format_elapsed(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

#[test]
fn elapsed_formatting_pads_both_parts() {
    assert_eq!(format_elapsed(0), "00:00");
    assert_eq!(format_elapsed(9), "00:09");
    assert_eq!(format_elapsed(65), "01:05");
    assert_eq!(format_elapsed(5400), "90:00");
}

#[test]
fn distance_is_fixed_to_two_decimals() {
    let summary = WorkoutSummary::new(1.2345, 60, Vec::new());
    assert_eq!(summary.distance_km, "1.23");

    let empty = WorkoutSummary::new(0.0, 0, Vec::new());
    assert_eq!(empty.distance_km, "0.00");
}
