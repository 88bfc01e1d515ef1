//! Bombard headless runner
//!
//! Plays one session with a simple autopilot against a recording surface and
//! prints the session summary as JSON. Real time is simulated, so a run is
//! reproducible from its seed.
//!
//! Usage: `bombard [seconds] [seed]`

#[cfg(not(target_arch = "wasm32"))]
use bombard::{
    Game, Screen, Tuning, Vector2,
    platform::{Clock, ManualClock},
    renderer::{AssetTable, ImageHandle, RecordingSurface, assets::ASSET_NAMES},
    sim::{GameEvent, GameState},
};

#[cfg(not(target_arch = "wasm32"))]
const FRAME_DT: f32 = 1.0 / 60.0;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seconds: f32 = args.next().and_then(|s| s.parse().ok()).unwrap_or(120.0);
    let seed: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(0xB0B);
    log::info!("Bombard (headless) starting: seed={} seconds={}", seed, seconds);

    let tuning = Tuning::load_from_env();
    let mut game = Game::new(seed, tuning, ManualClock::new(0.0));

    // Stand-in handles; a real backend would fill these from its loader
    let mut assets = AssetTable::new();
    for (i, name) in ASSET_NAMES.iter().enumerate() {
        assets.insert(*name, ImageHandle(i as u32));
    }

    let mut surface = RecordingSurface::new();
    let mut shots = 0u32;
    let mut kills = 0u32;
    game.handle_pointer(Vector2::ZERO);

    let frames = (seconds / FRAME_DT).max(0.0) as u64;
    for _ in 0..frames {
        if game.screen() != Screen::Playing {
            break;
        }
        if let Some(aim) = autopilot_target(&game.state) {
            if game.handle_pointer(aim) == bombard::InputOutcome::Fired {
                shots += 1;
            }
        }

        surface.clear_calls();
        game.frame(FRAME_DT, &mut surface, &assets);
        game.clock().advance(FRAME_DT as f64);
        kills += game
            .recent_events()
            .iter()
            .filter(|e| matches!(e, GameEvent::EnemyKilled { .. }))
            .count() as u32;
    }

    log::info!(
        "Run finished after {:.1}s real time, {} shots, {} kills, {} draw calls in last frame",
        game.clock().now(),
        shots,
        kills,
        surface.calls.len()
    );

    match serde_json::to_string(&game.state.summary()) {
        Ok(json) => {
            log::info!("Session summary: {}", json);
            println!("{}", json);
        }
        Err(e) => log::error!("Failed to serialize summary: {}", e),
    }
}

/// Lead the lowest live enemy, when the launcher is ready
#[cfg(not(target_arch = "wasm32"))]
fn autopilot_target(state: &GameState) -> Option<Vector2> {
    if !state.player.can_fire() {
        return None;
    }
    let enemy = state
        .enemies
        .iter()
        .filter(|e| e.is_alive() && e.pos.y > 0.0)
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))?;

    let flight = enemy.pos.distance(state.player.pos) / state.tuning.projectile.speed;
    Some(enemy.pos + Vector2::new(0.0, enemy.speed * flight))
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The web build drives `Game` from its own frame loop
}
