//! Platform abstraction layer
//!
//! Handles host differences for:
//! - Real-time clock (collectible scheduling runs on wall-clock time)

pub mod time;

pub use time::{Clock, ManualClock, SystemClock};
