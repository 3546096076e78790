//! Per-frame simulation tick
//!
//! Core game loop that advances the simulation by one host frame. The stage
//! order is fixed: steering and movement, bounds, spawning, collisions, then
//! the train. Collisions must see post-movement positions and the train must
//! see post-collision membership.

use glam::Vec2;

use super::state::{ActorSnapshot, EffectKind, GameEvent, GamePhase, GameState, MotionState};
use super::{bounds, collision, spawn, train};
use crate::error::ConfigError;
use crate::settings::Settings;

/// Input gathered since the previous frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Latest touch position, if the player touched the screen this frame
    pub touch: Option<Vec2>,
}

/// Advance the game state by one frame of `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    // Nothing moves once the run has ended
    if state.is_game_over() {
        return;
    }

    let dt = sanitize_dt(dt);

    if let Some(point) = input.touch {
        state.steering.set_target(&mut state.player, point);
    }

    state.time_ticks += 1;
    state.elapsed += dt;

    // Invulnerability countdown
    if state.player.is_invulnerable() {
        state.player.invulnerable = (state.player.invulnerable - dt).max(0.0);
    }

    // Player: steer, move, turn; reflect off the playable edges until snapped
    let rotate_rate = state.settings.rotate_rate;
    state.steering.update(&mut state.player, rotate_rate, dt);
    if state.player.state == MotionState::Moving {
        bounds::clamp(&mut state.player, &state.playable);
    }

    // Existing enemies/collectibles move and age before new ones arrive
    spawn::advance_actors(state, dt);
    spawn::update(state, dt);

    collision::update(state);
    train::update(state, dt);

    check_game_over(state);
}

/// Negative and NaN frame deltas never run time backwards
fn sanitize_dt(dt: f32) -> f32 {
    if !dt.is_finite() || dt < 0.0 {
        log::warn!("Ignoring invalid frame delta {dt}");
        return 0.0;
    }
    dt
}

/// Win on a long enough train, lose when out of lives
fn check_game_over(state: &mut GameState) {
    let won = if state.train_len() >= state.settings.win_train_length as usize {
        true
    } else if state.lives == 0 {
        false
    } else {
        return;
    };

    state.phase = GamePhase::GameOver { won };
    let effect = if won { EffectKind::Win } else { EffectKind::Lose };
    state.emit(GameEvent::PlayEffect(effect));
    state.emit(GameEvent::GameEnded { won });
    log::info!(
        "Game over ({}) after {:.1}s, train length {}",
        if won { "won" } else { "lost" },
        state.elapsed,
        state.train_len()
    );
}

/// Host-facing facade: feed it touches and frame deltas, get intents back
#[derive(Debug, Clone)]
pub struct Simulation {
    state: GameState,
    input: TickInput,
}

impl Simulation {
    /// Validate `settings` and set up a fresh run
    pub fn new(settings: Settings, seed: u64) -> Result<Self, ConfigError> {
        let state = GameState::new(settings, seed)?;
        log::info!("Simulation started with seed {seed}");
        Ok(Self {
            state,
            input: TickInput::default(),
        })
    }

    /// Resume from an existing state
    pub fn from_state(state: GameState) -> Self {
        Self {
            state,
            input: TickInput::default(),
        }
    }

    /// Record a touch; the latest one wins and is applied on the next update
    pub fn on_touch(&mut self, position: Vec2) {
        self.input.touch = Some(position);
    }

    /// Run one frame and return the intents it produced
    pub fn update(&mut self, dt: f32) -> Vec<GameEvent> {
        let input = std::mem::take(&mut self.input);
        tick(&mut self.state, &input, dt);
        self.state.drain_events()
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Read-only actor views for the renderer
    pub fn snapshot(&self) -> Vec<ActorSnapshot> {
        self.state.snapshot()
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    /// Tear down, handing back the final state
    pub fn into_state(self) -> GameState {
        self.state
    }
}
