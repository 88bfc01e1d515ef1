//! Entity kinds: enemies, projectiles, particles, collectibles, floating text
//!
//! Each kind owns its own motion; cross-entity rules (damage, scoring,
//! effects) live in `explosion`, `state` and `tick`.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::GAME_HEIGHT;
use crate::tuning::ExplosionTuning;

/// Enemy visual/score variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    Cauliflower,
    Cabbage,
    Pumpkin,
    Turnip,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 4] = [
        EnemyKind::Cauliflower,
        EnemyKind::Cabbage,
        EnemyKind::Pumpkin,
        EnemyKind::Turnip,
    ];

    /// Points awarded when an explosion kills this kind
    pub fn score(self) -> u64 {
        match self {
            EnemyKind::Cauliflower => 10,
            EnemyKind::Cabbage => 20,
            EnemyKind::Pumpkin => 30,
            EnemyKind::Turnip => 40,
        }
    }

    pub fn asset(self) -> &'static str {
        match self {
            EnemyKind::Cauliflower => "enemy-cauliflower",
            EnemyKind::Cabbage => "enemy-cabbage",
            EnemyKind::Pumpkin => "enemy-pumpkin",
            EnemyKind::Turnip => "enemy-turnip",
        }
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

/// Which population an enemy counts against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyTier {
    /// Fixed-rate stream, capped at `spawn.max_base_enemies`
    Base,
    /// Difficulty-controlled population, capped at `max_extra_enemies`
    Extra,
}

/// A falling target
#[derive(Debug, Clone)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec2,
    pub radius: f32,
    /// Fall speed (px/s)
    pub speed: f32,
    pub kind: EnemyKind,
    pub tier: EnemyTier,
    pub dead: bool,
    pub killed_by_explosion: bool,
}

impl Enemy {
    pub fn new(
        id: u32,
        pos: Vec2,
        radius: f32,
        speed: f32,
        kind: EnemyKind,
        tier: EnemyTier,
    ) -> Self {
        Self {
            id,
            pos,
            radius,
            speed,
            kind,
            tier,
            dead: false,
            killed_by_explosion: false,
        }
    }

    /// Fall for one step. Returns true if the enemy escaped past the bottom
    /// edge during this call (it is then dead, unscored).
    pub fn update(&mut self, dt: f32) -> bool {
        self.pos.y += self.speed * dt;

        if self.pos.y - self.radius > GAME_HEIGHT && !self.dead {
            self.dead = true;
            self.killed_by_explosion = false;
            return true;
        }
        false
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        !self.dead
    }
}

/// A shot travelling in a straight line toward a fixed target point
#[derive(Debug, Clone)]
pub struct Projectile {
    pub pos: Vec2,
    pub target: Vec2,
    pub speed: f32,
    /// Unit direction, fixed at creation
    pub dir: Vec2,
    pub arrived: bool,
    arrive_distance: f32,
}

impl Projectile {
    pub fn new(from: Vec2, target: Vec2, speed: f32, arrive_distance: f32) -> Self {
        Self {
            pos: from,
            target,
            speed,
            dir: (target - from).normalize_or_zero(),
            arrived: false,
            arrive_distance,
        }
    }

    /// Advance along the fixed direction. Arrival is proximity to the
    /// target, or having stepped past it (snapped back onto the target).
    pub fn update(&mut self, dt: f32) {
        self.pos += self.dir * self.speed * dt;
        if self.pos.distance(self.target) < self.arrive_distance {
            self.arrived = true;
        } else if (self.target - self.pos).dot(self.dir) < 0.0 {
            self.pos = self.target;
            self.arrived = true;
        }
    }
}

/// Cosmetic spark owned by an explosion
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub age: f32,
    pub life: f32,
    /// Downward acceleration (px/s²)
    pub gravity: f32,
}

impl Particle {
    /// Random direction, speed and size within the explosion's ranges
    pub fn burst<R: Rng + ?Sized>(pos: Vec2, tuning: &ExplosionTuning, rng: &mut R) -> Self {
        let angle = rng.random_range(0.0..std::f32::consts::TAU);
        let speed = rng.random_range(tuning.particle_speed_min..=tuning.particle_speed_max);
        let radius = rng.random_range(tuning.particle_radius_min..=tuning.particle_radius_max);
        Self {
            pos,
            vel: Vec2::new(angle.cos(), angle.sin()) * speed,
            radius,
            age: 0.0,
            life: tuning.particle_life,
            gravity: tuning.gravity,
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.vel.y += self.gravity * dt;
        self.pos += self.vel * dt;
        self.age += dt;
    }

    #[inline]
    pub fn is_expired(&self) -> bool {
        self.age >= self.life
    }

    /// Fade factor, 1 at birth down to 0 at expiry
    pub fn alpha(&self) -> f32 {
        if self.life <= 0.0 {
            return 0.0;
        }
        (1.0 - self.age / self.life).clamp(0.0, 1.0)
    }
}

/// Pickup effect variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CollectibleKind {
    /// Damps every enemy's speed and the global multiplier
    Slow,
    /// Culls a few extra enemies and lowers the extra cap to match
    Remove,
    /// Flat score bonus
    Bonus,
}

impl CollectibleKind {
    pub fn asset(self) -> &'static str {
        match self {
            CollectibleKind::Slow => "slow-icon",
            CollectibleKind::Remove => "remove-icon",
            CollectibleKind::Bonus => "bonus-icon",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            CollectibleKind::Slow => "SLOW",
            CollectibleKind::Remove => "REMOVE",
            CollectibleKind::Bonus => "BONUS",
        }
    }

    /// Power kinds drift; the bonus falls straight
    pub fn is_power(self) -> bool {
        !matches!(self, CollectibleKind::Bonus)
    }
}

/// How a collectible moves
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CollectibleMotion {
    /// Falls while swaying around `origin_x`
    Drift {
        origin_x: f32,
        amplitude: f32,
        frequency: f32,
        phase: f32,
    },
    /// Straight fall
    Fall,
}

#[derive(Debug, Clone)]
pub struct Collectible {
    pub id: u32,
    pub kind: CollectibleKind,
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    pub fall_speed: f32,
    pub motion: CollectibleMotion,
    pub age: f32,
}

impl Collectible {
    pub fn update(&mut self, dt: f32) {
        self.age += dt;
        self.pos.y += self.fall_speed * dt;
        if let CollectibleMotion::Drift {
            origin_x,
            amplitude,
            frequency,
            phase,
        } = self.motion
        {
            self.pos.x = origin_x + amplitude * (self.age * frequency + phase).sin();
        }
    }

    /// Hit radius: the larger sprite side
    #[inline]
    pub fn radius(&self) -> f32 {
        self.width.max(self.height)
    }

    pub fn is_off_screen(&self) -> bool {
        self.pos.y - self.radius() > GAME_HEIGHT
    }
}

/// Score/pickup feedback that drifts up and fades out
#[derive(Debug, Clone)]
pub struct FloatingText {
    pub text: String,
    pub pos: Vec2,
    pub life: f32,
    pub max_life: f32,
    pub rise_speed: f32,
    pub size: f32,
}

impl FloatingText {
    pub fn new(text: impl Into<String>, pos: Vec2, life: f32, rise_speed: f32, size: f32) -> Self {
        Self {
            text: text.into(),
            pos,
            life,
            max_life: life,
            rise_speed,
            size,
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.pos.y -= self.rise_speed * dt;
        self.life -= dt;
    }

    pub fn opacity(&self) -> f32 {
        if self.max_life <= 0.0 {
            return 0.0;
        }
        (self.life / self.max_life).clamp(0.0, 1.0)
    }

    pub fn is_finished(&self) -> bool {
        self.life <= 0.0 || self.opacity() <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_enemy_escape_marks_dead_once() {
        let pos = Vec2::new(100.0, GAME_HEIGHT + 20.0);
        let mut enemy = Enemy::new(1, pos, 15.0, 100.0, EnemyKind::Pumpkin, EnemyTier::Base);
        assert!(enemy.update(0.05));
        assert!(enemy.dead);
        assert!(!enemy.killed_by_explosion);
        // Already dead: no second escape
        assert!(!enemy.update(0.05));
    }

    #[test]
    fn test_enemy_still_on_screen() {
        let pos = Vec2::new(100.0, 400.0);
        let mut enemy = Enemy::new(1, pos, 15.0, 100.0, EnemyKind::Cabbage, EnemyTier::Extra);
        assert!(!enemy.update(0.05));
        assert!((enemy.pos.y - 405.0).abs() < 1e-4);
        assert!(enemy.is_alive());
    }

    #[test]
    fn test_kind_scores() {
        let scores: Vec<u64> = EnemyKind::ALL.iter().map(|k| k.score()).collect();
        assert_eq!(scores, vec![10, 20, 30, 40]);
    }

    #[test]
    fn test_projectile_arrives_by_proximity() {
        let mut p = Projectile::new(Vec2::new(0.0, 0.0), Vec2::new(0.0, -100.0), 600.0, 6.0);
        assert!((p.dir - Vec2::new(0.0, -1.0)).length() < 1e-6);
        p.update(0.05); // 30 px
        assert!(!p.arrived);
        p.update(0.05);
        p.update(0.05);
        assert!(!p.arrived);
        // 98 px: within 6 of target
        p.update(8.0 / 600.0);
        assert!(p.arrived);
    }

    #[test]
    fn test_projectile_overshoot_lands_on_target() {
        let target = Vec2::new(0.0, -100.0);
        let mut p = Projectile::new(Vec2::ZERO, target, 600.0, 6.0);
        for _ in 0..3 {
            p.update(0.05);
        }
        assert!(!p.arrived);
        // 120 px travelled: 20 past the target
        p.update(0.05);
        assert!(p.arrived);
        assert_eq!(p.pos, target);
    }

    #[test]
    fn test_particle_expires_and_falls() {
        let mut rng = Pcg32::seed_from_u64(7);
        let tuning = ExplosionTuning::default();
        let mut p = Particle::burst(Vec2::ZERO, &tuning, &mut rng);
        let speed = p.vel.length();
        assert!(speed >= tuning.particle_speed_min - 1e-3);
        assert!(speed <= tuning.particle_speed_max + 1e-3);
        let vy = p.vel.y;
        p.update(0.1);
        assert!(p.vel.y > vy);
        assert!(!p.is_expired());
        p.update(0.5);
        assert!(p.is_expired());
        assert_eq!(p.alpha(), 0.0);
    }

    #[test]
    fn test_drifting_collectible_sways() {
        let mut c = Collectible {
            id: 1,
            kind: CollectibleKind::Slow,
            pos: Vec2::new(300.0, 0.0),
            width: 36.0,
            height: 30.0,
            fall_speed: 60.0,
            motion: CollectibleMotion::Drift {
                origin_x: 300.0,
                amplitude: 40.0,
                frequency: 1.5,
                phase: 0.0,
            },
            age: 0.0,
        };
        c.update(1.0);
        assert!((c.pos.y - 60.0).abs() < 1e-4);
        assert!((c.pos.x - (300.0 + 40.0 * 1.5f32.sin())).abs() < 1e-3);
        assert_eq!(c.radius(), 36.0);
    }

    #[test]
    fn test_floating_text_fades() {
        let mut t = FloatingText::new("+30", Vec2::new(10.0, 100.0), 1.0, 40.0, 28.0);
        t.update(0.5);
        assert!((t.opacity() - 0.5).abs() < 1e-5);
        assert!((t.pos.y - 80.0).abs() < 1e-4);
        assert!(!t.is_finished());
        t.update(0.5);
        assert!(t.is_finished());
    }
}
