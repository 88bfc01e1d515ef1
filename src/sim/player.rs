//! The bottom-center turret

use glam::Vec2;

use super::entities::Projectile;
use crate::consts::{PLAYER_X, PLAYER_Y};
use crate::tuning::ProjectileTuning;

#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    /// Aim angle in radians (screen space, -π/2 is straight up)
    pub angle: f32,
    /// Seconds between shots
    pub cooldown: f32,
    /// Remaining cooldown; decremented every tick and never re-clamped,
    /// so it may go negative
    pub cooldown_timer: f32,
}

impl Player {
    pub fn new(cooldown: f32) -> Self {
        Self {
            pos: Vec2::new(PLAYER_X, PLAYER_Y),
            angle: -std::f32::consts::FRAC_PI_2,
            cooldown,
            cooldown_timer: 0.0,
        }
    }

    #[inline]
    pub fn can_fire(&self) -> bool {
        self.cooldown_timer <= 0.0
    }

    /// Rotate to face `target`
    pub fn look_at(&mut self, target: Vec2) {
        let dir = target - self.pos;
        self.angle = dir.y.atan2(dir.x);
    }

    /// Fire at `target`. Callers gate this on `can_fire`.
    pub fn fire(&mut self, target: Vec2, tuning: &ProjectileTuning) -> Projectile {
        self.cooldown_timer = self.cooldown;
        self.look_at(target);
        let muzzle = Vec2::new(self.pos.x, self.pos.y - tuning.muzzle_offset);
        Projectile::new(muzzle, target, tuning.speed, tuning.arrive_distance)
    }

    /// Back to the starting aim, ready to fire
    pub fn reset(&mut self) {
        self.angle = -std::f32::consts::FRAC_PI_2;
        self.cooldown_timer = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fire_starts_cooldown_and_aims() {
        let mut player = Player::new(0.25);
        assert!(player.can_fire());

        let target = Vec2::new(PLAYER_X + 100.0, PLAYER_Y);
        let projectile = player.fire(target, &ProjectileTuning::default());
        assert!(!player.can_fire());
        assert_eq!(player.cooldown_timer, 0.25);
        assert!(player.angle.abs() < 1e-6); // facing right

        assert_eq!(projectile.pos, Vec2::new(PLAYER_X, PLAYER_Y - 20.0));
        assert_eq!(projectile.target, target);
        assert_eq!(projectile.speed, 600.0);
    }

    #[test]
    fn test_cooldown_elapses() {
        let mut player = Player::new(0.25);
        player.fire(Vec2::new(300.0, 100.0), &ProjectileTuning::default());
        player.cooldown_timer -= 0.2;
        assert!(!player.can_fire());
        player.cooldown_timer -= 0.1;
        assert!(player.can_fire());
    }

    #[test]
    fn test_reset_restores_aim() {
        let mut player = Player::new(0.25);
        player.fire(Vec2::new(0.0, PLAYER_Y), &ProjectileTuning::default());
        player.reset();
        assert!((player.angle + std::f32::consts::FRAC_PI_2).abs() < 1e-6);
        assert!(player.can_fire());
    }
}
