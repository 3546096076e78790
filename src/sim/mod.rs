//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Frame delta supplied by the host, no wall clock
//! - Seeded RNG only
//! - Stable iteration order (by actor ID)
//! - No rendering, audio or platform dependencies

pub mod bounds;
pub mod collision;
pub mod rect;
pub mod spawn;
pub mod state;
pub mod steering;
pub mod tick;
pub mod train;
pub mod vector;

pub use collision::{Collisions, detect, resolve};
pub use rect::Rect;
pub use spawn::SpawnScheduler;
pub use state::{
    Actor, ActorId, ActorKind, ActorSnapshot, EffectKind, GameEvent, GamePhase, GameState,
    MotionState, PLAYER_ID,
};
pub use steering::SteeringController;
pub use tick::{Simulation, TickInput, tick};
