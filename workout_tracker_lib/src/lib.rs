pub mod geo;
pub mod track_point;
pub mod workout;
