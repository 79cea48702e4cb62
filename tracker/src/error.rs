use std::{error::Error, fmt};

/// Failures a tracking session can report to its caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackingError {
    /// The user declined location access. No session was started.
    PermissionDenied,
    /// The position stream could not be opened.
    PositionStream(String),
}

impl fmt::Display for TrackingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PermissionDenied => write!(f, "Location permission denied"),
            Self::PositionStream(msg) => write!(f, "Position stream failed: {msg}"),
        }
    }
}

impl Error for TrackingError {}
