//! Screen flow: title → gameplay → game over
//!
//! `Game` is the top-level controller. The frame driver calls `frame` once
//! per animation frame and `handle_pointer` for each click/tap; the active
//! screen decides what runs.

use glam::Vec2;

use crate::platform::Clock;
use crate::renderer::{AssetTable, Surface, scene};
use crate::sim::{GameEvent, GameState, tick};
use crate::tuning::Tuning;
use crate::ui::{ButtonAction, ButtonRegistry};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    Intro,
    Playing,
    GameOver,
}

/// What a pointer event ended up doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    /// A button consumed it
    Button(ButtonAction),
    /// Title screen click-anywhere start
    Started,
    /// A projectile was fired
    Fired,
    /// Cooldown, or nothing to do on this screen
    Ignored,
}

pub struct Game<C: Clock> {
    screen: Screen,
    pub state: GameState,
    pub buttons: ButtonRegistry,
    clock: C,
    /// Events drained during the last gameplay frame
    recent_events: Vec<GameEvent>,
}

impl<C: Clock> Game<C> {
    pub fn new(seed: u64, tuning: Tuning, clock: C) -> Self {
        let state = GameState::new(seed, tuning, clock.now());
        log::info!("Game initialized with seed: {}", seed);
        Self {
            screen: Screen::Intro,
            state,
            buttons: ButtonRegistry::with_defaults(),
            clock,
            recent_events: Vec::new(),
        }
    }

    #[inline]
    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn recent_events(&self) -> &[GameEvent] {
        &self.recent_events
    }

    /// Route one pointer event (already in game coordinates).
    ///
    /// Buttons on the active screen get first refusal; otherwise the title
    /// screen may start a game and the gameplay screen fires if off cooldown.
    pub fn handle_pointer(&mut self, pos: Vec2) -> InputOutcome {
        if let Some(action) = self.buttons.hit_test(self.screen, pos) {
            self.perform(action);
            return InputOutcome::Button(action);
        }

        match self.screen {
            Screen::Intro if self.state.tuning.click_anywhere_to_start => {
                self.perform(ButtonAction::StartGame);
                InputOutcome::Started
            }
            Screen::Playing if self.state.player.can_fire() => {
                self.state.fire_at(pos);
                InputOutcome::Fired
            }
            _ => InputOutcome::Ignored,
        }
    }

    /// Run a button action. Every action starts from a fresh session.
    pub fn perform(&mut self, action: ButtonAction) {
        self.state.reset(self.clock.now());
        match action {
            ButtonAction::StartGame | ButtonAction::PlayAgain => self.set_screen(Screen::Playing),
            ButtonAction::ReturnToTitle => self.set_screen(Screen::Intro),
        }
    }

    fn set_screen(&mut self, screen: Screen) {
        if self.screen != screen {
            log::info!("Screen {:?} -> {:?}", self.screen, screen);
            self.screen = screen;
        }
    }

    /// Advance and draw one frame of whichever screen is active.
    /// `raw_dt` is the unclamped frame delta in seconds.
    pub fn frame<S: Surface + ?Sized>(
        &mut self,
        raw_dt: f32,
        surface: &mut S,
        assets: &AssetTable,
    ) {
        match self.screen {
            Screen::Intro => self.intro_screen(surface, assets),
            Screen::Playing => self.game_screen(raw_dt, surface, assets),
            Screen::GameOver => self.game_over_screen(surface, assets),
        }
    }

    fn intro_screen<S: Surface + ?Sized>(&mut self, surface: &mut S, assets: &AssetTable) {
        scene::draw_intro(surface, assets);
        scene::draw_buttons(&self.buttons, Screen::Intro, surface);
    }

    fn game_screen<S: Surface + ?Sized>(
        &mut self,
        raw_dt: f32,
        surface: &mut S,
        assets: &AssetTable,
    ) {
        tick(&mut self.state, raw_dt, self.clock.now());

        self.recent_events = self.state.drain_events();
        let game_over = self.recent_events.iter().find_map(|e| match e {
            GameEvent::GameOver { score } => Some(*score),
            _ => None,
        });

        scene::draw_world(&self.state, surface, assets);
        scene::draw_hud(&self.state, surface);
        scene::draw_buttons(&self.buttons, Screen::Playing, surface);

        if let Some(score) = game_over {
            log::info!("Game over, final score {}", score);
            self.set_screen(Screen::GameOver);
        }
    }

    fn game_over_screen<S: Surface + ?Sized>(&mut self, surface: &mut S, _assets: &AssetTable) {
        scene::draw_game_over(self.state.score, surface);
        scene::draw_buttons(&self.buttons, Screen::GameOver, surface);
    }
}
