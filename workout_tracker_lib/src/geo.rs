use crate::track_point::TrackPoint;

/// Radius of the earth in km
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two fixes in kilometers.
pub fn haversine_distance_km(p1: &TrackPoint, p2: &TrackPoint) -> f64 {
    let d_lat = (p2.latitude() - p1.latitude()).to_radians();
    let d_lon = (p2.longitude() - p1.longitude()).to_radians();
    let lat1 = p1.latitude().to_radians();
    let lat2 = p2.latitude().to_radians();

    let a = f64::sin(d_lat / 2.).powi(2)
        + f64::cos(lat1) * f64::cos(lat2) * f64::sin(d_lon / 2.).powi(2);
    let c = 2. * f64::atan2(f64::sqrt(a), f64::sqrt(1. - a));

    EARTH_RADIUS_KM * c
}

#[test]
fn identical_points_are_zero_distance() {
    let p = TrackPoint::new(55.676111, 12.568333);
    assert_eq!(haversine_distance_km(&p, &p), 0.0);
}

#[test]
fn one_degree_of_latitude_at_the_equator() {
    let p1 = TrackPoint::new(0.0, 0.0);
    let p2 = TrackPoint::new(1.0, 0.0);

    let distance = haversine_distance_km(&p1, &p2);
    let expected = 111.19;
    assert!(
        (distance - expected).abs() / expected < 0.005,
        "got {distance} km"
    );
}

#[test]
fn symmetric_in_its_arguments() {
    let p1 = TrackPoint::new(37.0, -122.0);
    let p2 = TrackPoint::new(37.001, -122.0);
    assert_eq!(haversine_distance_km(&p1, &p2), haversine_distance_km(&p2, &p1));
}
