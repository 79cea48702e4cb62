pub mod distance;
pub mod error;
pub mod position_source;
pub mod replay_source;
pub mod session;
pub mod session_clock;
