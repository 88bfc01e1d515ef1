//! Area-of-effect impacts
//!
//! An explosion is a shockwave plus a particle burst. Its damage is one-shot:
//! resolved on the first update after creation and never again, no matter how
//! long the cosmetic decay keeps the explosion alive.

use glam::Vec2;
use rand::Rng;

use super::entities::{Collectible, Enemy, Particle};
use crate::tuning::ExplosionTuning;

/// Damage resolution state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageState {
    Pending,
    Applied,
}

#[derive(Debug, Clone)]
pub struct Explosion {
    pub pos: Vec2,
    /// Damage radius; the shockwave grows to this size
    pub max_radius: f32,
    /// Shockwave duration in seconds
    pub duration: f32,
    pub elapsed: f32,
    pub particles: Vec<Particle>,
    damage: DamageState,
}

impl Explosion {
    pub fn new<R: Rng + ?Sized>(pos: Vec2, tuning: &ExplosionTuning, rng: &mut R) -> Self {
        let particles = (0..tuning.particle_count)
            .map(|_| Particle::burst(pos, tuning, rng))
            .collect();
        Self {
            pos,
            max_radius: tuning.max_radius,
            duration: tuning.duration,
            elapsed: 0.0,
            particles,
            damage: DamageState::Pending,
        }
    }

    /// Advance the explosion.
    ///
    /// On the first call this kills every live enemy within reach and returns
    /// the ids of the collectibles caught in the blast; later calls return an
    /// empty list. Applying collectible effects is left to the caller, which
    /// owns the session state.
    pub fn update(
        &mut self,
        dt: f32,
        enemies: &mut [Enemy],
        collectibles: &[Collectible],
    ) -> Vec<u32> {
        self.elapsed += dt;

        let collected = match self.damage {
            DamageState::Pending => {
                let hits = self.resolve_damage(enemies, collectibles);
                self.damage = DamageState::Applied;
                hits
            }
            DamageState::Applied => Vec::new(),
        };

        for particle in &mut self.particles {
            particle.update(dt);
        }

        collected
    }

    fn resolve_damage(&self, enemies: &mut [Enemy], collectibles: &[Collectible]) -> Vec<u32> {
        for enemy in enemies.iter_mut().filter(|e| e.is_alive()) {
            if enemy.pos.distance(self.pos) <= self.max_radius + enemy.radius {
                enemy.dead = true;
                enemy.killed_by_explosion = true;
            }
        }

        collectibles
            .iter()
            .filter(|c| c.pos.distance(self.pos) <= self.max_radius + c.radius())
            .map(|c| c.id)
            .collect()
    }

    #[inline]
    pub fn damage_state(&self) -> DamageState {
        self.damage
    }

    /// Shockwave growth in `[0, 1]`
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        (self.elapsed / self.duration).min(1.0)
    }

    /// Current visual radius of the shockwave
    pub fn shockwave_radius(&self) -> f32 {
        self.max_radius * self.progress()
    }

    /// Done once every particle has expired AND the shockwave has run its course
    pub fn is_finished(&self) -> bool {
        let shockwave_done = self.elapsed >= self.duration;
        let particles_done = self.particles.iter().all(Particle::is_expired);
        shockwave_done && particles_done
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entities::{CollectibleKind, CollectibleMotion, EnemyKind, EnemyTier};
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn explosion_at(pos: Vec2) -> Explosion {
        let mut rng = Pcg32::seed_from_u64(1);
        Explosion::new(pos, &ExplosionTuning::default(), &mut rng)
    }

    fn enemy_at(id: u32, x: f32, y: f32) -> Enemy {
        Enemy::new(id, Vec2::new(x, y), 15.0, 100.0, EnemyKind::Cabbage, EnemyTier::Base)
    }

    fn bonus_at(id: u32, x: f32, y: f32) -> Collectible {
        Collectible {
            id,
            kind: CollectibleKind::Bonus,
            pos: Vec2::new(x, y),
            width: 36.0,
            height: 20.0,
            fall_speed: 90.0,
            motion: CollectibleMotion::Fall,
            age: 0.0,
        }
    }

    #[test]
    fn test_boundary_is_inclusive() {
        let mut ex = explosion_at(Vec2::new(300.0, 400.0));
        // 50 (shockwave) + 15 (enemy) = 65 exactly
        let mut enemies = vec![enemy_at(1, 365.0, 400.0), enemy_at(2, 365.5, 400.0)];
        ex.update(0.016, &mut enemies, &[]);
        assert!(enemies[0].dead && enemies[0].killed_by_explosion);
        assert!(!enemies[1].dead);
    }

    #[test]
    fn test_damage_applies_only_on_first_update() {
        let mut ex = explosion_at(Vec2::new(300.0, 400.0));
        let mut enemies = vec![enemy_at(1, 300.0, 400.0)];
        let collectibles = vec![bonus_at(7, 320.0, 400.0)];

        assert_eq!(ex.damage_state(), DamageState::Pending);
        let hits = ex.update(0.016, &mut enemies, &collectibles);
        assert_eq!(hits, vec![7]);
        assert_eq!(ex.damage_state(), DamageState::Applied);

        // A new enemy wandering into the blast later is untouched
        enemies.push(enemy_at(2, 300.0, 400.0));
        let hits = ex.update(0.016, &mut enemies, &collectibles);
        assert!(hits.is_empty());
        assert!(!enemies[1].dead);
    }

    #[test]
    fn test_already_dead_enemy_keeps_its_cause() {
        let mut ex = explosion_at(Vec2::new(300.0, 790.0));
        let mut enemies = vec![enemy_at(1, 300.0, 800.0)];
        enemies[0].dead = true;
        ex.update(0.016, &mut enemies, &[]);
        assert!(!enemies[0].killed_by_explosion);
    }

    #[test]
    fn test_collectible_uses_larger_side_as_radius() {
        let mut ex = explosion_at(Vec2::new(0.0, 0.0));
        // 50 + 36 = 86
        let collectibles = vec![bonus_at(1, 86.0, 0.0), bonus_at(2, 87.0, 0.0)];
        let hits = ex.update(0.016, &mut [], &collectibles);
        assert_eq!(hits, vec![1]);
    }

    #[test]
    fn test_finished_needs_both_shockwave_and_particles() {
        let mut tuning = ExplosionTuning::default();
        let mut rng = Pcg32::seed_from_u64(3);

        // Particles outlive the shockwave
        tuning.duration = 0.1;
        tuning.particle_life = 0.5;
        let mut ex = Explosion::new(Vec2::ZERO, &tuning, &mut rng);
        ex.update(0.2, &mut [], &[]);
        assert!(!ex.is_finished());
        ex.update(0.4, &mut [], &[]);
        assert!(ex.is_finished());

        // Shockwave outlives the particles
        tuning.duration = 1.0;
        tuning.particle_life = 0.2;
        let mut ex = Explosion::new(Vec2::ZERO, &tuning, &mut rng);
        ex.update(0.5, &mut [], &[]);
        assert!(ex.particles.iter().all(Particle::is_expired));
        assert!(!ex.is_finished());
        ex.update(0.5, &mut [], &[]);
        assert!(ex.is_finished());
    }

    #[test]
    fn test_shockwave_radius_grows_then_holds() {
        let mut ex = explosion_at(Vec2::ZERO);
        ex.update(0.175, &mut [], &[]);
        assert!((ex.shockwave_radius() - 25.0).abs() < 1e-3);
        ex.update(1.0, &mut [], &[]);
        assert_eq!(ex.shockwave_radius(), 50.0);
    }

    proptest! {
        #[test]
        fn repeated_updates_kill_the_same_set(
            positions in proptest::collection::vec((0.0f32..600.0, 0.0f32..800.0), 0..20),
            extra_updates in 1usize..10,
        ) {
            let center = Vec2::new(300.0, 400.0);
            let make = || positions
                .iter()
                .enumerate()
                .map(|(i, &(x, y))| enemy_at(i as u32, x, y))
                .collect::<Vec<_>>();

            let mut once = make();
            explosion_at(center).update(0.016, &mut once, &[]);

            let mut many = make();
            let mut ex = explosion_at(center);
            for _ in 0..=extra_updates {
                ex.update(0.016, &mut many, &[]);
            }

            let dead_once: Vec<bool> = once.iter().map(|e| e.dead).collect();
            let dead_many: Vec<bool> = many.iter().map(|e| e.dead).collect();
            prop_assert_eq!(dead_once, dead_many);
        }
    }
}
