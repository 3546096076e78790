//! World configuration
//!
//! Everything the simulation needs to know up front: world geometry, actor
//! sizes, speeds, spawn timing and win/lose rules. Loaded from JSON (partial
//! files fall back to defaults field by field) and validated once before the
//! simulation starts.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
use crate::sim::rect::Rect;

/// Game settings supplied by the host at init
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === World ===
    /// Full world (scene) size in points
    pub world_size: Vec2,
    /// Widest display aspect ratio the playable area must survive
    pub aspect_ratio: f32,

    // === Player ===
    pub player_start: Vec2,
    pub player_size: Vec2,
    /// Pursuit speed (points/sec)
    pub player_speed: f32,
    /// Max turn rate toward the direction of travel (radians/sec)
    pub rotate_rate: f32,
    pub lives: u8,

    // === Enemies ===
    pub enemy_size: Vec2,
    /// Seconds between enemy spawns
    pub enemy_spawn_period: f32,
    /// Seconds an enemy takes to cross the world
    pub enemy_traversal_duration: f32,
    /// Enemy hitbox shrink on every side
    pub enemy_hit_inset: f32,

    // === Collectibles ===
    pub collectible_size: Vec2,
    /// Seconds between collectible spawns
    pub collectible_spawn_period: f32,
    /// Seconds an uncaptured collectible stays in the world
    pub collectible_lifetime: f32,

    // === Train ===
    /// Follower speed (points/sec)
    pub train_speed: f32,
    /// Length of each follower move before it re-targets (seconds)
    pub train_move_duration: f32,
    /// Train length that wins the game
    pub win_train_length: u32,

    // === Damage ===
    pub invulnerable_duration: f32,
    /// Visibility toggles shown over the invulnerability window
    pub invulnerable_blinks: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            world_size: Vec2::new(WORLD_WIDTH, WORLD_HEIGHT),
            aspect_ratio: MAX_ASPECT_RATIO,

            player_start: Vec2::new(PLAYER_START_X, PLAYER_START_Y),
            player_size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            player_speed: PLAYER_SPEED,
            rotate_rate: PLAYER_ROTATE_RATE,
            lives: PLAYER_LIVES,

            enemy_size: Vec2::new(ENEMY_WIDTH, ENEMY_HEIGHT),
            enemy_spawn_period: ENEMY_SPAWN_PERIOD,
            enemy_traversal_duration: ENEMY_TRAVERSAL_DURATION,
            enemy_hit_inset: ENEMY_HIT_INSET,

            collectible_size: Vec2::new(COLLECTIBLE_WIDTH, COLLECTIBLE_HEIGHT),
            collectible_spawn_period: COLLECTIBLE_SPAWN_PERIOD,
            collectible_lifetime: COLLECTIBLE_LIFETIME,

            train_speed: TRAIN_SPEED,
            train_move_duration: TRAIN_MOVE_DURATION,
            win_train_length: WIN_TRAIN_LENGTH,

            invulnerable_duration: INVULNERABLE_DURATION,
            invulnerable_blinks: INVULNERABLE_BLINKS,
        }
    }
}

impl Settings {
    /// Playable rectangle: full width, height fixed by the aspect ratio,
    /// centered vertically in the world
    pub fn playable_rect(&self) -> Rect {
        let playable_height = self.world_size.x / self.aspect_ratio;
        let margin = (self.world_size.y - playable_height) / 2.0;
        Rect::new(
            Vec2::new(0.0, margin),
            Vec2::new(self.world_size.x, margin + playable_height),
        )
    }

    /// Reject configurations the simulation can't run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let world = self.world_size;
        if !(world.is_finite() && world.x > 0.0 && world.y > 0.0) {
            return Err(ConfigError::DegenerateWorld {
                width: world.x,
                height: world.y,
            });
        }
        if !(self.aspect_ratio.is_finite() && self.aspect_ratio > 0.0) {
            return Err(ConfigError::InvalidAspectRatio(self.aspect_ratio));
        }

        positive("player_speed", self.player_speed)?;
        positive("rotate_rate", self.rotate_rate)?;
        positive("train_speed", self.train_speed)?;
        positive("train_move_duration", self.train_move_duration)?;
        positive("enemy_spawn_period", self.enemy_spawn_period)?;
        positive("enemy_traversal_duration", self.enemy_traversal_duration)?;
        positive("collectible_spawn_period", self.collectible_spawn_period)?;
        positive("collectible_lifetime", self.collectible_lifetime)?;
        non_negative("enemy_hit_inset", self.enemy_hit_inset)?;
        non_negative("invulnerable_duration", self.invulnerable_duration)?;

        if !self.player_start.is_finite() {
            return Err(ConfigError::NonFinite("player_start"));
        }

        if self.lives == 0 {
            return Err(ConfigError::ZeroCount("lives"));
        }
        if self.win_train_length == 0 {
            return Err(ConfigError::ZeroCount("win_train_length"));
        }

        let playable = self.playable_rect().size();
        actor_size("player", self.player_size, None)?;
        actor_size("enemy", self.enemy_size, Some(playable))?;
        actor_size("collectible", self.collectible_size, Some(playable))?;

        Ok(())
    }

    /// Parse settings from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load and validate settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.as_ref().display());
        Ok(settings)
    }
}

fn positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { name, value })
    }
}

fn non_negative(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { name, value })
    }
}

/// Actor boxes must be non-empty; spawned actors must also fit the playable area
fn actor_size(name: &'static str, size: Vec2, fit: Option<Vec2>) -> Result<(), ConfigError> {
    let fits = fit.is_none_or(|area| size.x <= area.x && size.y <= area.y);
    if size.is_finite() && size.x > 0.0 && size.y > 0.0 && fits {
        Ok(())
    } else {
        Err(ConfigError::ActorSize {
            name,
            width: size.x,
            height: size.y,
        })
    }
}
