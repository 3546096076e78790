//! Playable-area bounds for the player
//!
//! Each axis is handled independently: touching or crossing an edge pins the
//! position to that edge and flips the velocity component on that axis.

use glam::Vec2;

use super::rect::Rect;
use super::state::Actor;

/// Clamp `position` into `rect`, reflecting the velocity on any axis that hit
/// an edge. Pure: returns the new (position, velocity).
pub fn reflect(mut position: Vec2, mut velocity: Vec2, rect: &Rect) -> (Vec2, Vec2) {
    if position.x <= rect.min.x {
        position.x = rect.min.x;
        velocity.x = -velocity.x;
    }
    if position.x >= rect.max.x {
        position.x = rect.max.x;
        velocity.x = -velocity.x;
    }
    if position.y <= rect.min.y {
        position.y = rect.min.y;
        velocity.y = -velocity.y;
    }
    if position.y >= rect.max.y {
        position.y = rect.max.y;
        velocity.y = -velocity.y;
    }
    (position, velocity)
}

/// Apply [`reflect`] to an actor in place
pub fn clamp(actor: &mut Actor, rect: &Rect) {
    let (pos, vel) = reflect(actor.pos, actor.vel, rect);
    actor.pos = pos;
    actor.vel = vel;
}
