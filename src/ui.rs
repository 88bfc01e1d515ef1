//! Clickable screen regions
//!
//! Buttons belong to one screen. Hit-testing only considers the active
//! screen's buttons, in registration order; the first hit consumes the input.

use glam::Vec2;

use crate::consts::GAME_WIDTH;
use crate::screen::Screen;

/// Axis-aligned rectangle in game space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    /// Edges are inclusive
    pub fn contains(&self, p: Vec2) -> bool {
        let max = self.min + self.size;
        p.x >= self.min.x && p.x <= max.x && p.y >= self.min.y && p.y <= max.y
    }

    pub fn center(&self) -> Vec2 {
        self.min + self.size * 0.5
    }
}

/// What a button does when clicked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonAction {
    /// Title screen → gameplay
    StartGame,
    /// Game over → fresh session, straight into gameplay
    PlayAgain,
    /// Game over → fresh session, back to the title
    ReturnToTitle,
}

#[derive(Debug, Clone)]
pub struct Button {
    pub label: String,
    pub bounds: Rect,
    pub screen: Screen,
    pub action: ButtonAction,
}

#[derive(Debug, Clone, Default)]
pub struct ButtonRegistry {
    buttons: Vec<Button>,
}

impl ButtonRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard title and game-over buttons
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        let center_x = GAME_WIDTH / 2.0;
        registry.register(
            "PLAY",
            Rect::new(center_x - 100.0, 560.0, 200.0, 64.0),
            Screen::Intro,
            ButtonAction::StartGame,
        );
        registry.register(
            "PLAY AGAIN",
            Rect::new(center_x - 130.0, 600.0, 260.0, 64.0),
            Screen::GameOver,
            ButtonAction::PlayAgain,
        );
        registry.register(
            "MENU",
            Rect::new(center_x - 100.0, 690.0, 200.0, 64.0),
            Screen::GameOver,
            ButtonAction::ReturnToTitle,
        );
        registry
    }

    pub fn register(
        &mut self,
        label: impl Into<String>,
        bounds: Rect,
        screen: Screen,
        action: ButtonAction,
    ) {
        self.buttons.push(Button {
            label: label.into(),
            bounds,
            screen,
            action,
        });
    }

    /// First button on `screen` containing `point`
    pub fn hit_test(&self, screen: Screen, point: Vec2) -> Option<ButtonAction> {
        self.on_screen(screen)
            .find(|b| b.bounds.contains(point))
            .map(|b| b.action)
    }

    /// Buttons owned by `screen`, in registration order
    pub fn on_screen(&self, screen: Screen) -> impl Iterator<Item = &Button> {
        self.buttons.iter().filter(move |b| b.screen == screen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_edges_inclusive() {
        let r = Rect::new(10.0, 10.0, 20.0, 20.0);
        assert!(r.contains(Vec2::new(10.0, 10.0)));
        assert!(r.contains(Vec2::new(30.0, 30.0)));
        assert!(!r.contains(Vec2::new(30.1, 20.0)));
        assert_eq!(r.center(), Vec2::new(20.0, 20.0));
    }

    #[test]
    fn test_only_active_screen_is_hit() {
        let registry = ButtonRegistry::with_defaults();
        let play = Vec2::new(300.0, 590.0);
        assert_eq!(registry.hit_test(Screen::Intro, play), Some(ButtonAction::StartGame));
        assert_eq!(registry.hit_test(Screen::Playing, play), None);
    }

    #[test]
    fn test_first_registered_wins() {
        let mut registry = ButtonRegistry::new();
        let bounds = Rect::new(0.0, 0.0, 100.0, 100.0);
        registry.register("A", bounds, Screen::GameOver, ButtonAction::PlayAgain);
        registry.register("B", bounds, Screen::GameOver, ButtonAction::ReturnToTitle);
        assert_eq!(
            registry.hit_test(Screen::GameOver, Vec2::new(50.0, 50.0)),
            Some(ButtonAction::PlayAgain)
        );
        assert_eq!(registry.on_screen(Screen::GameOver).count(), 2);
    }
}
