//! Bombard - a falling-target arcade defence game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, explosions, spawning, scoring)
//! - `screen`: Title / gameplay / game-over flow and input routing
//! - `ui`: Clickable button regions
//! - `renderer`: Draw-surface and asset-table collaborators
//! - `platform`: Real-time clock abstraction
//! - `tuning`: Data-driven game balance

pub mod platform;
pub mod renderer;
pub mod screen;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use screen::{Game, InputOutcome, Screen};
pub use tuning::Tuning;

/// 2D vector used for every position, velocity and direction in the game.
pub use glam::Vec2 as Vector2;

/// Game configuration constants
pub mod consts {
    /// Internal play-field width (pointer input arrives in this space)
    pub const GAME_WIDTH: f32 = 600.0;
    /// Internal play-field height
    pub const GAME_HEIGHT: f32 = 800.0;

    /// Upper bound on a single frame's elapsed time (seconds)
    pub const MAX_FRAME_DT: f32 = 0.05;

    /// Player turret position (bottom-center)
    pub const PLAYER_X: f32 = GAME_WIDTH / 2.0;
    pub const PLAYER_Y: f32 = GAME_HEIGHT - 40.0;
}

/// Clamp a raw frame delta into `[0, MAX_FRAME_DT]`.
///
/// Negative and NaN deltas (clock hiccups) collapse to zero.
#[inline]
pub fn clamp_dt(dt: f32) -> f32 {
    if dt > 0.0 {
        dt.min(consts::MAX_FRAME_DT)
    } else {
        0.0
    }
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vector2, b: Vector2) -> f32 {
    a.distance(b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_clamp_dt_edges() {
        assert_eq!(clamp_dt(-1.0), 0.0);
        assert_eq!(clamp_dt(f32::NAN), 0.0);
        assert_eq!(clamp_dt(0.016), 0.016);
        assert_eq!(clamp_dt(3.0), consts::MAX_FRAME_DT);
    }

    #[test]
    fn test_distance() {
        let a = Vector2::new(0.0, 0.0);
        let b = Vector2::new(3.0, 4.0);
        assert!((distance(a, b) - 5.0).abs() < 1e-6);
    }

    proptest! {
        #[test]
        fn clamped_dt_never_exceeds_bound(dt in 0.0f32..1000.0) {
            let clamped = clamp_dt(dt);
            prop_assert!(clamped >= 0.0);
            prop_assert!(clamped <= consts::MAX_FRAME_DT);
        }
    }
}
