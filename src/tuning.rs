//! Data-driven game balance
//!
//! Every gameplay number lives here so a session can be re-tuned from JSON
//! without touching the simulation. Sections default individually, so a
//! partial override like `{"player": {"cooldown": 0.1}}` is valid.

use serde::{Deserialize, Serialize};

use crate::consts::GAME_WIDTH;

/// Base-enemy stream timing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnTuning {
    /// Seconds of simulated time between base-enemy spawn attempts
    pub base_interval: f32,
    /// Cap on concurrently alive base enemies
    pub max_base_enemies: usize,
}

impl Default for SpawnTuning {
    fn default() -> Self {
        Self {
            base_interval: 1.1,
            max_base_enemies: 5,
        }
    }
}

/// Difficulty ramp
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultyTuning {
    /// Simulated seconds between ramps
    pub interval: f32,
    /// Extra-enemy base speed at session start (px/s)
    pub base_speed: f32,
    /// Added to the base speed on each ramp
    pub speed_step: f32,
    /// Added to the global speed multiplier on each ramp
    pub multiplier_step: f32,
}

impl Default for DifficultyTuning {
    fn default() -> Self {
        Self {
            interval: 10.0,
            base_speed: 100.0,
            speed_step: 10.0,
            multiplier_step: 0.05,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyTuning {
    pub radius: f32,
    /// Spawn height (above the visible area)
    pub spawn_y: f32,
    /// Horizontal margin kept clear at both edges when spawning
    pub spawn_margin: f32,
    pub base_speed_min: f32,
    pub base_speed_max: f32,
    /// Random factor range applied to extra-enemy speed
    pub extra_speed_jitter_min: f32,
    pub extra_speed_jitter_max: f32,
}

impl Default for EnemyTuning {
    fn default() -> Self {
        Self {
            radius: 15.0,
            spawn_y: -20.0,
            spawn_margin: 20.0,
            base_speed_min: 80.0,
            base_speed_max: 120.0,
            extra_speed_jitter_min: 0.8,
            extra_speed_jitter_max: 1.2,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileTuning {
    /// Flight speed in px/s
    pub speed: f32,
    /// A projectile within this distance of its target has arrived
    pub arrive_distance: f32,
    /// Muzzle offset above the player center
    pub muzzle_offset: f32,
    /// Sprite size
    pub width: f32,
    pub height: f32,
}

impl Default for ProjectileTuning {
    fn default() -> Self {
        Self {
            speed: 600.0,
            arrive_distance: 6.0,
            muzzle_offset: 20.0,
            width: 31.0,
            height: 33.0,
        }
    }
}

/// Shockwave and particle burst produced by every impact
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplosionTuning {
    /// Damage radius (and final shockwave size)
    pub max_radius: f32,
    /// Shockwave duration in seconds
    pub duration: f32,
    pub particle_count: usize,
    pub particle_radius_min: f32,
    pub particle_radius_max: f32,
    pub particle_speed_min: f32,
    pub particle_speed_max: f32,
    pub particle_life: f32,
    /// Downward pull on particles (px/s²)
    pub gravity: f32,
}

impl Default for ExplosionTuning {
    fn default() -> Self {
        Self {
            max_radius: 50.0,
            duration: 0.35,
            particle_count: 30,
            particle_radius_min: 2.0,
            particle_radius_max: 6.0,
            particle_speed_min: 100.0,
            particle_speed_max: 250.0,
            particle_life: 0.5,
            gravity: 50.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    /// Seconds between shots
    pub cooldown: f32,
    pub width: f32,
    pub height: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            cooldown: 0.25,
            width: 71.0,
            height: 100.0,
        }
    }
}

/// Power-up and bonus pickups
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectibleTuning {
    /// Real-time delay before the first power collectible
    pub first_power_delay: f64,
    pub power_delay_min: f64,
    pub power_delay_max: f64,
    pub bonus_delay_min: f64,
    pub bonus_delay_max: f64,
    /// Fall speed of drifting (power) collectibles
    pub drift_fall_speed: f32,
    /// Horizontal sway amplitude of drifting collectibles
    pub drift_amplitude: f32,
    /// Sway angular frequency (rad/s)
    pub drift_frequency: f32,
    /// Fall speed of the straight-falling bonus collectible
    pub bonus_fall_speed: f32,
    /// Sprite size (the larger side is used as the hit radius)
    pub width: f32,
    pub height: f32,
    /// Damping applied by the slow effect
    pub slow_factor: f32,
    /// Extra enemies removed by the remove effect
    pub remove_min: usize,
    pub remove_max: usize,
    pub bonus_points: u64,
}

impl Default for CollectibleTuning {
    fn default() -> Self {
        Self {
            first_power_delay: 20.0,
            power_delay_min: 10.0,
            power_delay_max: 20.0,
            bonus_delay_min: 30.0,
            bonus_delay_max: 60.0,
            drift_fall_speed: 60.0,
            drift_amplitude: 40.0,
            drift_frequency: 1.5,
            bonus_fall_speed: 90.0,
            width: 36.0,
            height: 36.0,
            slow_factor: 0.9,
            remove_min: 1,
            remove_max: 3,
            bonus_points: 250,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FloatingTextTuning {
    /// Lifetime in seconds (opacity fades linearly over it)
    pub life: f32,
    /// Upward drift in px/s
    pub rise_speed: f32,
    pub size: f32,
}

impl Default for FloatingTextTuning {
    fn default() -> Self {
        Self {
            life: 1.0,
            rise_speed: 40.0,
            size: 28.0,
        }
    }
}

/// Complete balance table for a session
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub spawn: SpawnTuning,
    pub difficulty: DifficultyTuning,
    pub enemy: EnemyTuning,
    pub projectile: ProjectileTuning,
    pub explosion: ExplosionTuning,
    pub player: PlayerTuning,
    pub collectible: CollectibleTuning,
    pub floating_text: FloatingTextTuning,
    /// Any pointer input on the title screen starts a game (not just the button)
    pub click_anywhere_to_start: bool,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            spawn: SpawnTuning::default(),
            difficulty: DifficultyTuning::default(),
            enemy: EnemyTuning::default(),
            projectile: ProjectileTuning::default(),
            explosion: ExplosionTuning::default(),
            player: PlayerTuning::default(),
            collectible: CollectibleTuning::default(),
            floating_text: FloatingTextTuning::default(),
            click_anywhere_to_start: true,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON override on top of the defaults.
    /// The result is sanitized, so every range is usable.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let tuning: Self = serde_json::from_str(json)?;
        Ok(tuning.sanitize())
    }

    /// Repair values that would make spawning or bursts impossible:
    /// reversed min/max pairs are swapped and spawn margins are kept within
    /// half the field. Each repair is logged.
    pub fn sanitize(mut self) -> Self {
        let e = &mut self.enemy;
        order_range("enemy.base_speed", &mut e.base_speed_min, &mut e.base_speed_max);
        order_range(
            "enemy.extra_speed_jitter",
            &mut e.extra_speed_jitter_min,
            &mut e.extra_speed_jitter_max,
        );
        clamp_margin("enemy.spawn_margin", &mut e.spawn_margin);

        let x = &mut self.explosion;
        order_range(
            "explosion.particle_radius",
            &mut x.particle_radius_min,
            &mut x.particle_radius_max,
        );
        order_range(
            "explosion.particle_speed",
            &mut x.particle_speed_min,
            &mut x.particle_speed_max,
        );

        let c = &mut self.collectible;
        order_range("collectible.power_delay", &mut c.power_delay_min, &mut c.power_delay_max);
        order_range("collectible.bonus_delay", &mut c.bonus_delay_min, &mut c.bonus_delay_max);
        order_range("collectible.remove", &mut c.remove_min, &mut c.remove_max);
        clamp_margin("collectible.drift_amplitude", &mut c.drift_amplitude);
        clamp_margin("collectible.width", &mut c.width);

        self
    }

    /// Environment variable naming an optional tuning file
    pub const ENV_VAR: &'static str = "BOMBARD_TUNING";

    /// Load from the file named by `BOMBARD_TUNING`, falling back to defaults.
    ///
    /// Problems are logged, never fatal.
    pub fn load_from_env() -> Self {
        let Ok(path) = std::env::var(Self::ENV_VAR) else {
            log::info!("Using default tuning");
            return Self::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path);
                    tuning
                }
                Err(e) => {
                    log::warn!("Ignoring malformed tuning file {}: {}", path, e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Could not read tuning file {}: {}", path, e);
                Self::default()
            }
        }
    }
}

fn order_range<T: PartialOrd + std::fmt::Debug>(name: &str, min: &mut T, max: &mut T) {
    if *min > *max {
        log::warn!("Tuning {}: min {:?} > max {:?}, swapping", name, min, max);
        std::mem::swap(min, max);
    }
}

/// Spawn positions are drawn from `[margin, GAME_WIDTH - margin]`
fn clamp_margin(name: &str, margin: &mut f32) {
    let clamped = margin.clamp(0.0, GAME_WIDTH / 2.0);
    if clamped != *margin {
        log::warn!("Tuning {}: {} out of range, clamped to {}", name, margin, clamped);
        *margin = clamped;
    }
}
