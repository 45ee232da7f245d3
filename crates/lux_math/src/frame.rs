// Orthonormal placement frames.
//
// A frame is an origin plus three orthonormal axes. It plays the role a
// rigid Mat4 would, but keeps the axes around so the inverse transform is
// just three dot products.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// A rigid local-to-world frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Frame {
    pub origin: Vec3,
    pub x: Vec3,
    pub y: Vec3,
    pub z: Vec3,
}

impl Default for Frame {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Frame {
    /// The world frame.
    pub const IDENTITY: Frame = Frame {
        origin: Vec3::ZERO,
        x: Vec3::X,
        y: Vec3::Y,
        z: Vec3::Z,
    };

    /// Build a frame at `origin` whose z axis is `z` (normalized); x and y
    /// are an arbitrary orthonormal completion.
    pub fn from_z(origin: Vec3, z: Vec3) -> Self {
        let z = z.normalize();
        let (x, y) = z.any_orthonormal_pair();
        Self { origin, x, y, z }
    }

    /// Build a camera-style frame at `from` looking toward `to`.
    ///
    /// The frame's -z axis points at the target, so local directions with a
    /// negative z component go into the scene.
    pub fn look_at(from: Vec3, to: Vec3, up: Vec3) -> Self {
        let z = (from - to).normalize();
        let x = up.cross(z).normalize();
        let y = z.cross(x);
        Self { origin: from, x, y, z }
    }

    /// Transform a local point to world space.
    #[inline]
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        self.origin + self.transform_direction(p)
    }

    /// Transform a local direction to world space (no translation).
    #[inline]
    pub fn transform_direction(&self, d: Vec3) -> Vec3 {
        self.x * d.x + self.y * d.y + self.z * d.z
    }

    /// Transform a world point into local coordinates.
    #[inline]
    pub fn inverse_transform_point(&self, p: Vec3) -> Vec3 {
        self.inverse_transform_direction(p - self.origin)
    }

    /// Transform a world direction into local coordinates.
    #[inline]
    pub fn inverse_transform_direction(&self, d: Vec3) -> Vec3 {
        Vec3::new(d.dot(self.x), d.dot(self.y), d.dot(self.z))
    }
}
