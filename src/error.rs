//! Configuration errors
//!
//! The simulation itself never fails at runtime; everything that can go wrong
//! is caught when the world configuration is validated.

use thiserror::Error;

/// Reasons a [`Settings`](crate::Settings) value is rejected
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("world size must be positive and finite, got {width}x{height}")]
    DegenerateWorld { width: f32, height: f32 },

    #[error("aspect ratio must be positive and finite, got {0}")]
    InvalidAspectRatio(f32),

    #[error("{name} must be positive and finite, got {value}")]
    NonPositive { name: &'static str, value: f32 },

    #[error("{name} must be non-negative and finite, got {value}")]
    Negative { name: &'static str, value: f32 },

    #[error("{0} must be finite")]
    NonFinite(&'static str),

    #[error("{name} size {width}x{height} must be positive and fit the playable area")]
    ActorSize {
        name: &'static str,
        width: f32,
        height: f32,
    },

    #[error("{0} must be at least 1")]
    ZeroCount(&'static str),

    #[error("invalid settings JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
}
