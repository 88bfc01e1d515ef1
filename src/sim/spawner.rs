//! Enemy/collectible spawning and the difficulty ramp
//!
//! Base enemies and the ramp run on accumulated simulation time; collectibles
//! run on the real-time clock and are unaffected by frame clamping.

use glam::Vec2;
use rand::Rng;

use super::entities::{
    Collectible, CollectibleKind, CollectibleMotion, Enemy, EnemyKind, EnemyTier,
};
use super::state::{GameEvent, GameState};
use crate::consts::GAME_WIDTH;

/// Run every spawn timer for one frame. `dt` is expected to be clamped
/// already; `now` is the real-time clock reading.
pub fn run(state: &mut GameState, dt: f32, now: f64) {
    spawn_base_enemies(state, dt);
    spawn_extra_enemy(state);
    ramp_difficulty(state, dt);
    schedule_collectibles(state, now);
}

/// One spawn attempt per elapsed interval, each gated by the base cap
fn spawn_base_enemies(state: &mut GameState, dt: f32) {
    let interval = state.tuning.spawn.base_interval;
    if interval <= 0.0 {
        return;
    }

    state.schedule.base_timer += dt;
    while state.schedule.base_timer >= interval {
        state.schedule.base_timer -= interval;
        if state.count_enemies(EnemyTier::Base) < state.tuning.spawn.max_base_enemies {
            // Fixed range; the difficulty multiplier only drives extra spawns
            let e = &state.tuning.enemy;
            let speed = state.rng.random_range(e.base_speed_min..=e.base_speed_max);
            spawn_enemy(state, EnemyTier::Base, speed);
        }
    }
}

/// At most one extra enemy per frame, while under the difficulty cap
fn spawn_extra_enemy(state: &mut GameState) {
    if state.count_enemies(EnemyTier::Extra) >= state.difficulty.max_extra_enemies {
        return;
    }
    let e = &state.tuning.enemy;
    let jitter = state.rng.random_range(e.extra_speed_jitter_min..=e.extra_speed_jitter_max);
    let speed = state.difficulty.base_speed * jitter * state.difficulty.speed_multiplier;
    spawn_enemy(state, EnemyTier::Extra, speed);
}

fn spawn_enemy(state: &mut GameState, tier: EnemyTier, speed: f32) {
    let e = &state.tuning.enemy;
    let (radius, y, margin) = (e.radius, e.spawn_y, e.spawn_margin);
    let x = state.rng.random_range(margin..=GAME_WIDTH - margin);
    let kind = EnemyKind::random(&mut state.rng);
    let id = state.next_entity_id();
    state
        .enemies
        .push(Enemy::new(id, Vec2::new(x, y), radius, speed, kind, tier));
}

/// Every `difficulty.interval` simulated seconds: one more extra enemy
/// allowed, faster base speed, higher multiplier. Never ramps down.
fn ramp_difficulty(state: &mut GameState, dt: f32) {
    let tuning = &state.tuning.difficulty;
    if tuning.interval <= 0.0 {
        return;
    }

    let d = &mut state.difficulty;
    d.timer += dt;
    while d.timer >= tuning.interval {
        d.timer -= tuning.interval;
        d.level += 1;
        d.max_extra_enemies += 1;
        d.base_speed += tuning.speed_step;
        d.speed_multiplier += tuning.multiplier_step;
        log::info!(
            "Difficulty up: level={} max_extra_enemies={} base_speed={} multiplier={:.2}",
            d.level,
            d.max_extra_enemies,
            d.base_speed,
            d.speed_multiplier
        );
        state.events.push(GameEvent::DifficultyRaised { level: d.level });
    }
}

/// Fire whichever real-time deadline has passed and re-arm it from `now`
fn schedule_collectibles(state: &mut GameState, now: f64) {
    if now >= state.schedule.next_power_at {
        let kind = if state.rng.random_bool(0.5) {
            CollectibleKind::Slow
        } else {
            CollectibleKind::Remove
        };
        spawn_collectible(state, kind);
        let c = &state.tuning.collectible;
        let delay = state.rng.random_range(c.power_delay_min..=c.power_delay_max);
        state.schedule.next_power_at = now + delay;
        log::debug!("Next power collectible at {:.1}s", state.schedule.next_power_at);
    }

    if now >= state.schedule.next_bonus_at {
        spawn_collectible(state, CollectibleKind::Bonus);
        let c = &state.tuning.collectible;
        let delay = state.rng.random_range(c.bonus_delay_min..=c.bonus_delay_max);
        state.schedule.next_bonus_at = now + delay;
        log::debug!("Next bonus collectible at {:.1}s", state.schedule.next_bonus_at);
    }
}

fn spawn_collectible(state: &mut GameState, kind: CollectibleKind) {
    let c = &state.tuning.collectible;
    let (width, height) = (c.width, c.height);

    let collectible = if kind.is_power() {
        let (amplitude, frequency, fall_speed) =
            (c.drift_amplitude, c.drift_frequency, c.drift_fall_speed);
        // Keep the whole sway inside the play field
        let margin = (amplitude + width / 2.0).min(GAME_WIDTH / 2.0);
        let origin_x = state.rng.random_range(margin..=GAME_WIDTH - margin);
        let phase = state.rng.random_range(0.0..std::f32::consts::TAU);
        Collectible {
            id: state.next_entity_id(),
            kind,
            pos: Vec2::new(origin_x + amplitude * phase.sin(), -height),
            width,
            height,
            fall_speed,
            motion: CollectibleMotion::Drift {
                origin_x,
                amplitude,
                frequency,
                phase,
            },
            age: 0.0,
        }
    } else {
        let fall_speed = c.bonus_fall_speed;
        let margin = (width / 2.0).min(GAME_WIDTH / 2.0);
        let x = state.rng.random_range(margin..=GAME_WIDTH - margin);
        Collectible {
            id: state.next_entity_id(),
            kind,
            pos: Vec2::new(x, -height),
            width,
            height,
            fall_speed,
            motion: CollectibleMotion::Fall,
            age: 0.0,
        }
    };

    log::debug!("Spawned {} collectible at x={:.0}", kind.name(), collectible.pos.x);
    state.collectibles.push(collectible);
    state.events.push(GameEvent::CollectibleSpawned { kind });
}
