//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Clamped frame deltas only
//! - Seeded RNG only
//! - Real time enters only as an explicit `now` argument
//! - No rendering or platform dependencies

pub mod entities;
pub mod explosion;
pub mod player;
pub mod spawner;
pub mod state;
pub mod tick;

pub use entities::{
    Collectible, CollectibleKind, CollectibleMotion, Enemy, EnemyKind, EnemyTier, FloatingText,
    Particle, Projectile,
};
pub use explosion::{DamageState, Explosion};
pub use player::Player;
pub use state::{Difficulty, GameEvent, GameState, Schedule, SessionSummary, STARTING_LIVES};
pub use tick::tick;
