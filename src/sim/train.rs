//! The conga line of captured cats
//!
//! Each follower chases whatever is directly ahead of it: the player for the
//! head of the train, the previous follower for everyone else. A follower
//! commits to a short fixed-duration move toward its leader and only picks a
//! new heading once that move is finished. Links are processed head to tail
//! and each reads its leader's position *after* the leader moved this frame.

use glam::Vec2;

use super::state::{Actor, GameState, MotionState};
use super::vector;

/// Start a new move of `duration` seconds at `speed` toward `leader`
pub fn assign_move(follower: &mut Actor, leader: Vec2, speed: f32, duration: f32) {
    let direction = vector::normalize(leader - follower.pos);
    follower.vel = direction * speed;
    follower.destination = Some(follower.pos + follower.vel * duration);
    follower.move_remaining = duration;
    follower.state = if direction == Vec2::ZERO {
        MotionState::Idle
    } else {
        MotionState::Moving
    };
}

/// Advance a follower along its current move; lands exactly on the
/// destination when the move runs out
pub fn step(follower: &mut Actor, dt: f32) {
    if follower.move_remaining <= 0.0 {
        return;
    }
    let travel = dt.min(follower.move_remaining);
    follower.pos = vector::integrate(follower.pos, follower.vel, travel);
    follower.move_remaining -= dt;

    if follower.move_remaining <= 0.0 {
        if let Some(destination) = follower.destination.take() {
            follower.pos = destination;
        }
        follower.move_remaining = 0.0;
        follower.vel = Vec2::ZERO;
        follower.state = MotionState::Idle;
    }
}

/// Re-target idle followers and move the whole train one frame
pub fn update(state: &mut GameState, dt: f32) {
    let speed = state.settings.train_speed;
    let duration = state.settings.train_move_duration;

    let mut leader = state.player.pos;
    for id in &state.train {
        let Some(follower) = state.actors.get_mut(id) else {
            continue;
        };
        if follower.move_remaining <= 0.0 {
            assign_move(follower, leader, speed, duration);
        }
        step(follower, dt);
        leader = follower.pos;
    }
}
