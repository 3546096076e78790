//! Touch-target pursuit for the player
//!
//! The player runs straight at the last touch point at a fixed speed, snaps
//! onto it once it is within one frame's travel, and turns toward its
//! direction of travel at a capped rate.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Actor, MotionState};
use super::vector;
use crate::{normalize_angle, shortest_angle_between};

/// Owns the touch target and drives the player toward it
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SteeringController {
    /// Last touch position; `None` until the first input event
    pub target: Option<Vec2>,
}

impl SteeringController {
    /// Record a new pursuit target and start moving
    pub fn set_target(&mut self, player: &mut Actor, point: Vec2) {
        self.target = Some(point);
        player.state = MotionState::Moving;
    }

    /// Steer, move and turn the player for one frame
    pub fn update(&mut self, player: &mut Actor, rotate_rate: f32, dt: f32) {
        if player.state != MotionState::Moving {
            return;
        }
        let Some(target) = self.target else {
            return;
        };

        let offset = target - player.pos;
        if offset.length() <= player.speed * dt {
            player.pos = target;
            player.vel = Vec2::ZERO;
            player.state = MotionState::Idle;
            return;
        }

        player.vel = vector::normalize(offset) * player.speed;
        player.pos = vector::integrate(player.pos, player.vel, dt);
        rotate_toward(player, player.vel, rotate_rate, dt);
    }
}

/// Turn `actor` toward the heading of `direction` by at most `rate * dt`,
/// never overshooting. A zero direction leaves the orientation alone.
pub fn rotate_toward(actor: &mut Actor, direction: Vec2, rate: f32, dt: f32) {
    if direction == Vec2::ZERO {
        return;
    }
    let shortest = shortest_angle_between(actor.orientation, vector::angle(direction));
    let amount = (rate * dt).min(shortest.abs());
    actor.orientation = normalize_angle(actor.orientation + amount * shortest.signum());
}
