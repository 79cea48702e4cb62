use workout_tracker_lib::{geo, track_point::TrackPoint};

/// Running great-circle distance over a stream of fixes.
///
/// Sums the leg between each consecutive pair in arrival order. Feeding the
/// same fixes in a different order gives a different total.
#[derive(Debug, Default)]
pub struct DistanceAccumulator {
    last_point: Option<TrackPoint>,
    total_km: f64,
}

impl DistanceAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold the next fix into the total and return the updated total. The
    /// first fix after `new` or `reset` only seeds the reference point.
    pub fn add_point(&mut self, point: &TrackPoint) -> f64 {
        if let Some(last) = &self.last_point {
            self.total_km += geo::haversine_distance_km(last, point);
        }
        self.last_point = Some(*point);
        self.total_km
    }

    pub fn total_km(&self) -> f64 {
        self.total_km
    }

    pub fn reset(&mut self) {
        self.last_point = None;
        self.total_km = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use workout_tracker_lib::geo::haversine_distance_km;

    fn route() -> [TrackPoint; 3] {
        [
            TrackPoint::new(37.0, -122.0),
            TrackPoint::new(37.001, -122.0),
            TrackPoint::new(37.001, -122.002),
        ]
    }

    #[test]
    fn first_fix_only_seeds() {
        let mut acc = DistanceAccumulator::new();
        assert_eq!(acc.add_point(&route()[0]), 0.0);
        assert_eq!(acc.total_km(), 0.0);
    }

    #[test]
    fn sums_consecutive_legs() {
        let [p0, p1, p2] = route();
        let mut acc = DistanceAccumulator::new();
        acc.add_point(&p0);
        acc.add_point(&p1);
        let total = acc.add_point(&p2);

        let expected = haversine_distance_km(&p0, &p1) + haversine_distance_km(&p1, &p2);
        assert!((total - expected).abs() < 1e-12);
    }

    #[test]
    fn total_depends_on_arrival_order() {
        let [p0, p1, p2] = route();

        let mut in_order = DistanceAccumulator::new();
        for p in [p0, p1, p2] {
            in_order.add_point(&p);
        }

        let mut shuffled = DistanceAccumulator::new();
        for p in [p1, p0, p2] {
            shuffled.add_point(&p);
        }

        assert!((in_order.total_km() - shuffled.total_km()).abs() > 1e-6);
    }

    #[test]
    fn reset_drops_total_and_reference_point() {
        let [p0, p1, _] = route();
        let mut acc = DistanceAccumulator::new();
        acc.add_point(&p0);
        acc.add_point(&p1);
        assert!(acc.total_km() > 0.0);

        acc.reset();
        assert_eq!(acc.total_km(), 0.0);
        assert_eq!(acc.add_point(&p1), 0.0);
    }
}
