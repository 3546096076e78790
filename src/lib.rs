//! Zombie Conga - A conga-line chase arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (steering, spawning, collisions, train)
//! - `settings`: World configuration passed in at startup
//! - `error`: Configuration errors

pub mod error;
pub mod settings;
pub mod sim;

pub use error::ConfigError;
pub use settings::Settings;

use std::f32::consts::{PI, TAU};

/// Game configuration defaults
pub mod consts {
    /// Host frame delta used by the headless driver (60 Hz)
    pub const FRAME_DT: f32 = 1.0 / 60.0;
    /// Largest frame delta accepted in a single tick
    pub const MAX_FRAME_DT: f32 = 0.25;

    /// World dimensions (points)
    pub const WORLD_WIDTH: f32 = 2048.0;
    pub const WORLD_HEIGHT: f32 = 1536.0;
    /// Widest supported display aspect ratio
    pub const MAX_ASPECT_RATIO: f32 = 16.0 / 9.0;

    /// Player defaults
    pub const PLAYER_START_X: f32 = 400.0;
    pub const PLAYER_START_Y: f32 = 400.0;
    pub const PLAYER_SPEED: f32 = 480.0;
    pub const PLAYER_ROTATE_RATE: f32 = 4.0 * std::f32::consts::PI;
    pub const PLAYER_WIDTH: f32 = 157.0;
    pub const PLAYER_HEIGHT: f32 = 102.0;
    pub const PLAYER_LIVES: u8 = 5;

    /// Enemy defaults
    pub const ENEMY_WIDTH: f32 = 180.0;
    pub const ENEMY_HEIGHT: f32 = 82.0;
    pub const ENEMY_SPAWN_PERIOD: f32 = 2.0;
    pub const ENEMY_TRAVERSAL_DURATION: f32 = 2.0;
    /// Hitbox shrink on every side (near misses don't count)
    pub const ENEMY_HIT_INSET: f32 = 20.0;

    /// Collectible (cat) defaults
    pub const COLLECTIBLE_WIDTH: f32 = 110.0;
    pub const COLLECTIBLE_HEIGHT: f32 = 100.0;
    pub const COLLECTIBLE_SPAWN_PERIOD: f32 = 1.0;
    pub const COLLECTIBLE_LIFETIME: f32 = 10.0;

    /// Train defaults
    pub const TRAIN_SPEED: f32 = 480.0;
    pub const TRAIN_MOVE_DURATION: f32 = 0.3;
    pub const WIN_TRAIN_LENGTH: u32 = 15;

    /// Invulnerability window after an enemy hit
    pub const INVULNERABLE_DURATION: f32 = 3.0;
    pub const INVULNERABLE_BLINKS: u32 = 10;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    while angle >= PI {
        angle -= TAU;
    }
    while angle < -PI {
        angle += TAU;
    }
    angle
}

/// Signed shortest rotation taking `from` onto `to`, in (-π, π]
#[inline]
pub fn shortest_angle_between(from: f32, to: f32) -> f32 {
    let mut angle = (to - from) % TAU;
    if angle > PI {
        angle -= TAU;
    }
    if angle <= -PI {
        angle += TAU;
    }
    angle
}
