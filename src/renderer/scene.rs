//! Draw-call generation for each screen
//!
//! Paint order for gameplay is background, enemies, projectiles,
//! explosions, collectibles, player, floating texts, then the HUD on top.

use glam::Vec2;

use super::{AssetTable, Surface, TextAlign, with_alpha};
use crate::consts::{GAME_HEIGHT, GAME_WIDTH};
use crate::screen::Screen;
use crate::sim::{Explosion, GameState};
use crate::ui::ButtonRegistry;

pub mod colors {
    pub const BACKGROUND: [f32; 4] = [0.027, 0.063, 0.129, 1.0]; // #071021
    pub const SHOCKWAVE: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
    pub const PARTICLE: [f32; 4] = [1.0, 1.0, 0.0, 1.0];
    pub const TEXT: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const FLOATING_TEXT: [f32; 4] = [1.0, 0.9, 0.3, 1.0];
    pub const GAME_OVER: [f32; 4] = [0.9, 0.15, 0.15, 1.0];
    pub const BUTTON: [f32; 4] = [0.15, 0.25, 0.45, 1.0];
}

const HUD_SIZE: f32 = 32.0;
const BUTTON_TEXT_SIZE: f32 = 36.0;

/// Draw `name` if it has loaded; otherwise skip silently
fn draw_image<S: Surface + ?Sized>(
    surface: &mut S,
    assets: &AssetTable,
    name: &str,
    center: Vec2,
    size: Vec2,
    rotation: f32,
) {
    if let Some(handle) = assets.get(name) {
        surface.image(handle, center, size, rotation);
    }
}

/// Solid fill first, so a missing background image still leaves a clean frame
fn draw_backdrop<S: Surface + ?Sized>(surface: &mut S, assets: &AssetTable, name: &str) {
    let field = Vec2::new(GAME_WIDTH, GAME_HEIGHT);
    surface.clear(colors::BACKGROUND);
    surface.fill_rect(Vec2::ZERO, field, colors::BACKGROUND);
    draw_image(surface, assets, name, field * 0.5, field, 0.0);
}

fn draw_explosion<S: Surface + ?Sized>(surface: &mut S, explosion: &Explosion) {
    let progress = explosion.progress();
    if progress < 1.0 {
        let color = with_alpha(colors::SHOCKWAVE, 1.0 - progress);
        surface.fill_circle(explosion.pos, explosion.shockwave_radius(), color);
    }
    for particle in explosion.particles.iter().filter(|p| !p.is_expired()) {
        let color = with_alpha(colors::PARTICLE, particle.alpha());
        surface.fill_circle(particle.pos, particle.radius, color);
    }
}

/// Everything in the play field
pub fn draw_world<S: Surface + ?Sized>(state: &GameState, surface: &mut S, assets: &AssetTable) {
    draw_backdrop(surface, assets, "background");

    for enemy in &state.enemies {
        let size = Vec2::splat(enemy.radius * 2.0);
        draw_image(surface, assets, enemy.kind.asset(), enemy.pos, size, 0.0);
    }

    let p = &state.tuning.projectile;
    let projectile_size = Vec2::new(p.width, p.height);
    for projectile in &state.projectiles {
        draw_image(surface, assets, "projectile", projectile.pos, projectile_size, 0.0);
    }

    for explosion in &state.explosions {
        draw_explosion(surface, explosion);
    }

    for collectible in &state.collectibles {
        let size = Vec2::new(collectible.width, collectible.height);
        draw_image(surface, assets, collectible.kind.asset(), collectible.pos, size, 0.0);
    }

    let player = &state.player;
    let player_size = Vec2::new(state.tuning.player.width, state.tuning.player.height);
    draw_image(surface, assets, "player", player.pos, player_size, player.angle);

    for text in &state.floating_texts {
        let color = with_alpha(colors::FLOATING_TEXT, text.opacity());
        surface.text(&text.text, text.pos, text.size, color, TextAlign::Center);
    }
}

pub fn draw_hud<S: Surface + ?Sized>(state: &GameState, surface: &mut S) {
    surface.text(
        &format!("SCORE : {}", state.score),
        Vec2::new(50.0, 50.0),
        HUD_SIZE,
        colors::TEXT,
        TextAlign::Left,
    );
    surface.text(
        &format!("LIVES : {}", state.lives),
        Vec2::new(GAME_WIDTH - 50.0, 50.0),
        HUD_SIZE,
        colors::TEXT,
        TextAlign::Right,
    );
}

pub fn draw_buttons<S: Surface + ?Sized>(
    buttons: &ButtonRegistry,
    screen: Screen,
    surface: &mut S,
) {
    for button in buttons.on_screen(screen) {
        surface.fill_rect(button.bounds.min, button.bounds.size, colors::BUTTON);
        surface.text(
            &button.label,
            button.bounds.center(),
            BUTTON_TEXT_SIZE,
            colors::TEXT,
            TextAlign::Center,
        );
    }
}

pub fn draw_intro<S: Surface + ?Sized>(surface: &mut S, assets: &AssetTable) {
    draw_backdrop(surface, assets, "intro");
    surface.text(
        "CLICK TO PLAY",
        Vec2::new(GAME_WIDTH / 2.0, 700.0),
        70.0,
        colors::TEXT,
        TextAlign::Center,
    );
}

pub fn draw_game_over<S: Surface + ?Sized>(score: u64, surface: &mut S) {
    surface.clear(colors::BACKGROUND);
    let center_x = GAME_WIDTH / 2.0;
    surface.text(
        "GAME OVER",
        Vec2::new(center_x, 400.0),
        100.0,
        colors::GAME_OVER,
        TextAlign::Center,
    );
    surface.text(
        &format!("SCORE : {}", score),
        Vec2::new(center_x, 520.0),
        50.0,
        colors::TEXT,
        TextAlign::Center,
    );
}
