use std::f64::consts::TAU;

use rand::Rng;
use workout_tracker_lib::track_point::TrackPoint;

/// Meters per degree of latitude (approximately constant).
const METERS_PER_DEG_LAT: f64 = 111_320.0;

fn meters_to_deg_lat(meters: f64) -> f64 {
    meters / METERS_PER_DEG_LAT
}

fn meters_to_deg_lon(meters: f64, latitude: f64) -> f64 {
    let meters_per_deg = METERS_PER_DEG_LAT * latitude.to_radians().cos();
    if meters_per_deg.abs() < 1e-10 {
        return 0.0;
    }
    meters / meters_per_deg
}

/// Generate a jogging loop of `points` fixes starting at the given
/// coordinates, curving back on itself over roughly `TAU * radius_m` meters.
/// The heading drifts a little at every step so the loop is never a perfect
/// circle.
pub fn loop_route(start_lat: f64, start_lon: f64, points: usize, radius_m: f64) -> Vec<TrackPoint> {
    let mut rng = rand::rng();
    let mut route = Vec::with_capacity(points);

    let steps = points.max(1) as f64;
    let spacing_m = TAU * radius_m / steps;
    let turn_per_step = TAU / steps;

    let mut lat = start_lat;
    let mut lon = start_lon;
    let mut heading: f64 = 0.0;

    for _ in 0..points {
        route.push(TrackPoint::new(lat, lon));

        heading += turn_per_step + rng.random_range(-0.05..0.05);
        lat += meters_to_deg_lat(spacing_m * heading.sin());
        lon += meters_to_deg_lon(spacing_m * heading.cos(), lat);
    }

    route
}

#[cfg(test)]
mod tests {
    use super::*;
    use workout_tracker_lib::geo::haversine_distance_km;

    #[test]
    fn generates_the_requested_number_of_points() {
        assert_eq!(loop_route(37.768, -122.483, 120, 400.0).len(), 120);
        assert!(loop_route(37.768, -122.483, 0, 400.0).is_empty());
    }

    #[test]
    fn consecutive_fixes_are_spaced_like_a_jog() {
        let route = loop_route(37.768, -122.483, 120, 400.0);
        let spacing_m = TAU * 400.0 / 120.0;

        for pair in route.windows(2) {
            let leg_m = haversine_distance_km(&pair[0], &pair[1]) * 1000.0;
            assert!((leg_m - spacing_m).abs() < spacing_m * 0.25, "leg was {leg_m} m");
        }
    }
}
