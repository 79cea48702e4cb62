use std::{fs::File, io::BufReader, path::Path, str::FromStr};

use anyhow::Context;
use chrono::{DateTime, Utc};
use workout_tracker_lib::track_point::TrackPoint;

/// Read every track point of a GPX file, flattening tracks and segments in
/// file order. Points without a parseable time keep an empty timestamp.
pub fn read_gpx(path: &Path) -> anyhow::Result<Vec<TrackPoint>> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let gpx = gpx::read(BufReader::new(file))
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    let mut track_points = Vec::new();
    for track in gpx.tracks {
        for segment in track.segments {
            for point in segment.points {
                let position = point.point();
                let timestamp: Option<DateTime<Utc>> = point
                    .time
                    .and_then(|t| t.format().ok())
                    .and_then(|t| DateTime::from_str(&t).ok());

                track_points.push(match timestamp {
                    Some(timestamp) => {
                        TrackPoint::with_timestamp(position.y(), position.x(), timestamp)
                    }
                    None => TrackPoint::new(position.y(), position.x()),
                });
            }
        }
    }

    Ok(track_points)
}
