//! Equirectangular environment lookup.

use crate::texture::{lookup_scaled, Addressing};
use lux_core::{Color, Texture};
use lux_math::{Vec2, Vec3};
use std::f32::consts::{PI, TAU};

/// Map a unit direction to equirectangular coordinates.
///
/// Longitude comes from the xz plane (`+z` is `u = 0`, wrapped into
/// `[0, 1)`), latitude from y with straight up at `v = 1`.
#[inline]
pub fn direction_to_uv(dir: Vec3) -> Vec2 {
    let u = (dir.x.atan2(dir.z) / TAU).rem_euclid(1.0);
    // rem_euclid rounds tiny negative angles up to exactly 1.0.
    let u = if u >= 1.0 { 0.0 } else { u };
    let v = 1.0 - dir.y.clamp(-1.0, 1.0).acos() / PI;
    Vec2::new(u, v)
}

/// Radiance arriving from the environment along `dir`.
///
/// Without a texture this is the constant `ke`.
pub fn eval_env(ke: Color, texture: Option<&Texture>, dir: Vec3) -> Color {
    if texture.is_none() {
        return ke;
    }
    lookup_scaled(ke, texture, direction_to_uv(dir), Addressing::Wrap)
}
