use chrono::{DateTime, Utc};
use geo_types::Point;
use serde::{Deserialize, Serialize};

/// A single GPS fix on a route.
///
/// `position` follows the geo-types convention: x is longitude, y is
/// latitude. Use the accessors when in doubt.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackPoint {
    pub position: Point,
    pub timestamp: Option<DateTime<Utc>>,
}

impl TrackPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            position: Point::new(longitude, latitude),
            timestamp: None,
        }
    }

    pub fn with_timestamp(latitude: f64, longitude: f64, timestamp: DateTime<Utc>) -> Self {
        Self {
            position: Point::new(longitude, latitude),
            timestamp: Some(timestamp),
        }
    }

    pub fn latitude(&self) -> f64 {
        self.position.y()
    }

    pub fn longitude(&self) -> f64 {
        self.position.x()
    }
}
