//! Per-frame simulation step
//!
//! Core game loop that advances the session by one clamped frame.

use super::entities::{CollectibleKind, Enemy};
use super::explosion::Explosion;
use super::spawner;
use super::state::{GameEvent, GameState};
use crate::clamp_dt;

/// Advance the game state by one frame.
///
/// `dt` is the raw frame delta in seconds and is clamped here, so callers may
/// pass whatever the frame driver measured. `now` is the real-time clock
/// reading used for collectible scheduling.
pub fn tick(state: &mut GameState, dt: f32, now: f64) {
    let dt = clamp_dt(dt);
    state.elapsed += dt;

    spawner::run(state, dt, now);

    // Enemies fall; escapees cost a life
    for enemy in &mut state.enemies {
        if enemy.update(dt) {
            state.lives = state.lives.saturating_sub(1);
            state.events.push(GameEvent::EnemyEscaped { id: enemy.id });
        }
    }

    // Projectiles fly; each arrival becomes exactly one explosion this frame
    for projectile in &mut state.projectiles {
        projectile.update(dt);
    }
    let (arrived, flying): (Vec<_>, Vec<_>) = std::mem::take(&mut state.projectiles)
        .into_iter()
        .partition(|p| p.arrived);
    state.projectiles = flying;
    for projectile in arrived {
        let explosion = Explosion::new(projectile.pos, &state.tuning.explosion, &mut state.rng);
        state.explosions.push(explosion);
    }

    // Explosions; a fresh one resolves its damage now. Ids are deduplicated
    // so a pickup caught by two blasts is collected once.
    let mut collected: Vec<u32> = Vec::new();
    for explosion in &mut state.explosions {
        for id in explosion.update(dt, &mut state.enemies, &state.collectibles) {
            if !collected.contains(&id) {
                collected.push(id);
            }
        }
    }
    for id in collected {
        collect(state, id);
    }

    // Remove the dead; only explosion kills score
    let (dead, alive): (Vec<Enemy>, Vec<Enemy>) = std::mem::take(&mut state.enemies)
        .into_iter()
        .partition(|e| e.dead);
    state.enemies = alive;
    for enemy in dead.into_iter().filter(|e| e.killed_by_explosion) {
        let points = enemy.kind.score();
        state.score += points;
        state.emit_text(format!("+{}", points), enemy.pos);
        state.events.push(GameEvent::EnemyKilled {
            id: enemy.id,
            kind: enemy.kind,
            points,
        });
    }

    state.explosions.retain(|e| !e.is_finished());

    if state.is_lost() {
        state.enemies.clear();
        state.events.push(GameEvent::GameOver { score: state.score });
    }

    for collectible in &mut state.collectibles {
        collectible.update(dt);
    }
    state.collectibles.retain(|c| !c.is_off_screen());

    for text in &mut state.floating_texts {
        text.update(dt);
    }
    state.floating_texts.retain(|t| !t.is_finished());

    // Not clamped at zero; `can_fire` checks `<= 0`
    state.player.cooldown_timer -= dt;
}

/// Take a pickup out of play, apply its effect and label it
fn collect(state: &mut GameState, id: u32) {
    let Some(index) = state.collectibles.iter().position(|c| c.id == id) else {
        return;
    };
    let collectible = state.collectibles.remove(index);
    let kind = collectible.kind;

    state.apply_collectible(kind);
    let label = match kind {
        CollectibleKind::Bonus => state.tuning.collectible.bonus_points.to_string(),
        other => other.name().to_string(),
    };
    state.emit_text(label, collectible.pos);
    state.events.push(GameEvent::Collected { kind });
    log::debug!("Collected {}", kind.name());
}
