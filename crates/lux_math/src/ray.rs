use crate::{Interval, Vec3};

/// Offset applied at both ends of a ray's parameter range so that rays
/// leaving a surface do not re-hit it.
pub const RAY_EPSILON: f32 = 5e-4;

/// A ray in 3D space with origin, unit direction, and a parameter range.
///
/// Rays built with [`Ray::new`] extend to infinity; shadow segments built
/// with [`Ray::segment`] stop just short of their end point.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
    pub range: Interval,
}

impl Ray {
    /// Create an infinite ray. `direction` is normalized.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
            range: Interval::new(RAY_EPSILON, f32::INFINITY),
        }
    }

    /// Create a finite segment from `from` to `to`.
    pub fn segment(from: Vec3, to: Vec3) -> Self {
        let delta = to - from;
        let length = delta.length();
        Self {
            origin: from,
            direction: delta / length,
            range: Interval::new(RAY_EPSILON, length - RAY_EPSILON),
        }
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_normalizes_direction() {
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 3.0, 0.0));

        assert_eq!(ray.direction, Vec3::Y);
        assert_eq!(ray.range.max, f32::INFINITY);
        assert_eq!(ray.range.min, RAY_EPSILON);
    }

    #[test]
    fn test_ray_at() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X);

        assert_eq!(ray.at(0.0), Vec3::ZERO);
        assert_eq!(ray.at(1.0), Vec3::X);
        assert_eq!(ray.at(2.0), Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(ray.at(-1.0), Vec3::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn test_segment_stops_short_of_target() {
        let from = Vec3::new(1.0, 0.0, 0.0);
        let to = Vec3::new(1.0, 4.0, 0.0);
        let ray = Ray::segment(from, to);

        assert!(ray.range.max.is_finite());
        assert_eq!(ray.direction, Vec3::Y);
        assert!((ray.range.max - (4.0 - RAY_EPSILON)).abs() < 1e-6);
        assert!(!ray.range.contains(4.0));
        assert!(ray.range.contains(2.0));
    }
}
