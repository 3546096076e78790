//! 2D vector helpers on top of `glam::Vec2`
//!
//! glam already provides the arithmetic (add, sub, component and scalar
//! mul/div, length). These cover the pieces the game needs defined
//! explicitly: zero-safe normalization, heading angle and the
//! velocity-times-dt integration step shared by every moving actor.

use glam::Vec2;

/// Unit vector in the direction of `v`.
///
/// The zero vector (and anything non-finite) normalizes to zero, so "already
/// at the target" falls out as a no-op instead of a division fault.
#[inline]
pub fn normalize(v: Vec2) -> Vec2 {
    if !v.is_finite() {
        return Vec2::ZERO;
    }
    v.try_normalize().unwrap_or(Vec2::ZERO)
}

/// Heading of `v` in radians (atan2), 0 = facing +x
#[inline]
pub fn angle(v: Vec2) -> f32 {
    v.y.atan2(v.x)
}

/// One explicit Euler step: position advanced by velocity over `dt`
#[inline]
pub fn integrate(position: Vec2, velocity: Vec2, dt: f32) -> Vec2 {
    position + velocity * dt
}
