//! Session state and entity collections
//!
//! `GameState` is the single simulation context: score, lives, difficulty
//! counters, spawn schedules and every entity population. Only `tick` and
//! `reset` (plus input-driven firing) write to it.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entities::{
    Collectible, CollectibleKind, Enemy, EnemyKind, EnemyTier, FloatingText, Projectile,
};
use super::explosion::Explosion;
use super::player::Player;
use crate::tuning::{DifficultyTuning, Tuning};

/// Lives at the start of every session
pub const STARTING_LIVES: u32 = 3;

/// Things that happened during a tick, drained by the screen controller
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    EnemyKilled { id: u32, kind: EnemyKind, points: u64 },
    EnemyEscaped { id: u32 },
    CollectibleSpawned { kind: CollectibleKind },
    Collected { kind: CollectibleKind },
    DifficultyRaised { level: u32 },
    GameOver { score: u64 },
}

/// Difficulty counters; only ever ramp up during a session (pickups aside)
#[derive(Debug, Clone)]
pub struct Difficulty {
    /// Simulated seconds since the last ramp
    pub timer: f32,
    /// Number of ramps so far
    pub level: u32,
    /// Extra-enemy base speed (px/s)
    pub base_speed: f32,
    /// Global enemy speed multiplier
    pub speed_multiplier: f32,
    /// Cap on concurrently alive extra enemies
    pub max_extra_enemies: usize,
}

impl Difficulty {
    pub fn new(tuning: &DifficultyTuning) -> Self {
        Self {
            timer: 0.0,
            level: 0,
            base_speed: tuning.base_speed,
            speed_multiplier: 1.0,
            max_extra_enemies: 0,
        }
    }
}

/// Spawn timers. The base timer runs on simulated time, the collectible
/// deadlines on the real-time clock.
#[derive(Debug, Clone, Default)]
pub struct Schedule {
    pub base_timer: f32,
    /// Real-time deadline for the next power collectible
    pub next_power_at: f64,
    /// Real-time deadline for the next bonus collectible
    pub next_bonus_at: f64,
}

/// End-of-run numbers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSummary {
    pub score: u64,
    pub lives: u32,
    pub difficulty_level: u32,
    pub max_extra_enemies: usize,
    pub speed_multiplier: f32,
    /// Simulated seconds played
    pub elapsed: f32,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    pub(super) rng: Pcg32,
    pub score: u64,
    pub lives: u32,
    /// Simulated seconds since the session started
    pub elapsed: f32,
    pub difficulty: Difficulty,
    pub schedule: Schedule,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    pub explosions: Vec<Explosion>,
    pub collectibles: Vec<Collectible>,
    pub floating_texts: Vec<FloatingText>,
    /// Events raised since the last drain
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new session; `now` is the real-time clock reading used to arm
    /// the collectible schedules.
    pub fn new(seed: u64, tuning: Tuning, now: f64) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            score: 0,
            lives: STARTING_LIVES,
            elapsed: 0.0,
            difficulty: Difficulty::new(&tuning.difficulty),
            schedule: Schedule::default(),
            player: Player::new(tuning.player.cooldown),
            enemies: Vec::new(),
            projectiles: Vec::new(),
            explosions: Vec::new(),
            collectibles: Vec::new(),
            floating_texts: Vec::new(),
            events: Vec::new(),
            next_id: 1,
            tuning,
        };
        state.arm_schedules(now);
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Start over: score, lives, difficulty, every collection and both
    /// collectible schedules. The RNG stream carries on.
    pub fn reset(&mut self, now: f64) {
        self.score = 0;
        self.lives = STARTING_LIVES;
        self.elapsed = 0.0;
        self.difficulty = Difficulty::new(&self.tuning.difficulty);
        self.schedule = Schedule::default();
        self.player.reset();
        self.enemies.clear();
        self.projectiles.clear();
        self.explosions.clear();
        self.collectibles.clear();
        self.floating_texts.clear();
        self.events.clear();
        self.arm_schedules(now);
        log::info!("Session reset");
    }

    /// Arm both collectible schedules with their first-spawn rule
    pub fn arm_schedules(&mut self, now: f64) {
        let c = &self.tuning.collectible;
        self.schedule.next_power_at = now + c.first_power_delay;
        let delay = self.rng.random_range(c.bonus_delay_min..=c.bonus_delay_max);
        self.schedule.next_bonus_at = now + delay;
    }

    /// Live enemies in the given population
    pub fn count_enemies(&self, tier: EnemyTier) -> usize {
        self.enemies.iter().filter(|e| e.tier == tier && e.is_alive()).count()
    }

    #[inline]
    pub fn is_lost(&self) -> bool {
        self.lives == 0
    }

    /// Shoot at `target`. Does not check the cooldown; input handling does.
    pub fn fire_at(&mut self, target: Vec2) {
        let projectile = self.player.fire(target, &self.tuning.projectile);
        self.projectiles.push(projectile);
    }

    /// Queue a floating feedback label
    pub fn emit_text(&mut self, text: impl Into<String>, pos: Vec2) {
        let t = &self.tuning.floating_text;
        let text = FloatingText::new(text, pos, t.life, t.rise_speed, t.size);
        self.floating_texts.push(text);
    }

    /// Run a collected pickup's effect against the session
    pub fn apply_collectible(&mut self, kind: CollectibleKind) {
        let c = &self.tuning.collectible;
        match kind {
            CollectibleKind::Slow => {
                let factor = c.slow_factor;
                self.difficulty.speed_multiplier *= factor;
                for enemy in self.enemies.iter_mut().filter(|e| e.is_alive()) {
                    enemy.speed *= factor;
                }
                log::debug!("Slow: multiplier now {:.3}", self.difficulty.speed_multiplier);
            }
            CollectibleKind::Remove => {
                let extra: Vec<u32> = self
                    .enemies
                    .iter()
                    .filter(|e| e.tier == EnemyTier::Extra && e.is_alive())
                    .map(|e| e.id)
                    .collect();
                if extra.is_empty() {
                    log::debug!("Remove: no extra enemies alive");
                    return;
                }

                let upper = c.remove_max.min(extra.len()).max(1);
                let lower = c.remove_min.clamp(1, upper);
                let count = self.rng.random_range(lower..=upper);
                let doomed: Vec<u32> = rand::seq::index::sample(&mut self.rng, extra.len(), count)
                    .into_iter()
                    .map(|i| extra[i])
                    .collect();

                self.enemies.retain(|e| !doomed.contains(&e.id));
                let cap = &mut self.difficulty.max_extra_enemies;
                *cap = cap.saturating_sub(count);
                log::debug!(
                    "Remove: culled {} extra enemies, cap now {}",
                    count,
                    self.difficulty.max_extra_enemies
                );
            }
            CollectibleKind::Bonus => {
                self.score += c.bonus_points;
            }
        }
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            score: self.score,
            lives: self.lives,
            difficulty_level: self.difficulty.level,
            max_extra_enemies: self.difficulty.max_extra_enemies,
            speed_multiplier: self.difficulty.speed_multiplier,
            elapsed: self.elapsed,
        }
    }

    /// Take the events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> GameState {
        GameState::new(42, Tuning::default(), 0.0)
    }

    fn push_enemy(state: &mut GameState, tier: EnemyTier, speed: f32) -> u32 {
        let id = state.next_entity_id();
        state
            .enemies
            .push(Enemy::new(id, Vec2::new(100.0, 100.0), 15.0, speed, EnemyKind::Turnip, tier));
        id
    }

    #[test]
    fn test_new_session_defaults() {
        let state = state();
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, 3);
        assert_eq!(state.difficulty.max_extra_enemies, 0);
        assert_eq!(state.difficulty.speed_multiplier, 1.0);
        assert_eq!(state.schedule.next_power_at, 20.0);
        assert!((30.0..=60.0).contains(&state.schedule.next_bonus_at));
    }

    #[test]
    fn test_slow_damps_multiplier_and_live_enemies() {
        let mut state = state();
        push_enemy(&mut state, EnemyTier::Base, 100.0);
        push_enemy(&mut state, EnemyTier::Extra, 200.0);
        state.apply_collectible(CollectibleKind::Slow);
        state.apply_collectible(CollectibleKind::Slow);
        assert!((state.difficulty.speed_multiplier - 0.81).abs() < 1e-5);
        assert!((state.enemies[0].speed - 81.0).abs() < 1e-3);
        assert!((state.enemies[1].speed - 162.0).abs() < 1e-3);
    }

    #[test]
    fn test_remove_with_two_extra_alive() {
        for seed in 0..32 {
            let mut state = GameState::new(seed, Tuning::default(), 0.0);
            state.difficulty.max_extra_enemies = 4;
            let base = push_enemy(&mut state, EnemyTier::Base, 100.0);
            push_enemy(&mut state, EnemyTier::Extra, 100.0);
            push_enemy(&mut state, EnemyTier::Extra, 100.0);

            state.apply_collectible(CollectibleKind::Remove);

            let removed = 2 - state.count_enemies(EnemyTier::Extra);
            assert!((1..=2).contains(&removed));
            assert_eq!(state.difficulty.max_extra_enemies, 4 - removed);
            // Base enemies are never culled
            assert!(state.enemies.iter().any(|e| e.id == base));
        }
    }

    #[test]
    fn test_remove_without_extra_is_noop() {
        let mut state = state();
        state.difficulty.max_extra_enemies = 2;
        push_enemy(&mut state, EnemyTier::Base, 100.0);
        state.apply_collectible(CollectibleKind::Remove);
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.difficulty.max_extra_enemies, 2);
    }

    #[test]
    fn test_bonus_adds_points() {
        let mut state = state();
        state.apply_collectible(CollectibleKind::Bonus);
        assert_eq!(state.score, 250);
    }

    #[test]
    fn test_reset_restores_everything() {
        let mut state = state();
        state.score = 990;
        state.lives = 0;
        state.difficulty.level = 4;
        state.difficulty.max_extra_enemies = 4;
        state.difficulty.base_speed = 140.0;
        push_enemy(&mut state, EnemyTier::Extra, 100.0);
        state.fire_at(Vec2::new(300.0, 300.0));
        state.emit_text("+40", Vec2::ZERO);

        state.reset(100.0);

        assert_eq!(state.score, 0);
        assert_eq!(state.lives, 3);
        assert_eq!(state.difficulty.level, 0);
        assert_eq!(state.difficulty.max_extra_enemies, 0);
        assert_eq!(state.difficulty.base_speed, 100.0);
        assert!(state.enemies.is_empty());
        assert!(state.projectiles.is_empty());
        assert!(state.floating_texts.is_empty());
        assert!(state.player.can_fire());
        assert_eq!(state.schedule.next_power_at, 120.0);
        assert!((130.0..=160.0).contains(&state.schedule.next_bonus_at));
    }
}
