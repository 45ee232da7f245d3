//! Ray-surface intersection.
//!
//! The integrator only talks to the [`Intersector`] trait. [`SurfaceList`]
//! is the stock implementation: a linear scan over the scene's quads and
//! disks.

use lux_core::{Material, Scene, Shape, Surface};
use lux_math::{Ray, Vec2, Vec3};

/// Record of the nearest hit along a ray.
#[derive(Debug, Clone, Copy)]
pub struct Intersection<'a> {
    /// Ray parameter of the hit
    pub t: f32,
    /// World-space hit position
    pub position: Vec3,
    /// Geometric normal (surface frame z, never flipped toward the ray)
    pub normal: Vec3,
    /// Surface coordinate in `[0, 1]²`
    pub texcoord: Vec2,
    /// Material of the surface that was hit
    pub material: &'a Material,
}

/// Scene queries the integrator needs.
pub trait Intersector: Send + Sync {
    /// Nearest hit within the ray's range.
    fn intersect(&self, ray: &Ray) -> Option<Intersection<'_>>;

    /// Whether anything blocks the ray within its range.
    fn occluded(&self, ray: &Ray) -> bool {
        self.intersect(ray).is_some()
    }
}

/// Hit `surface` with `ray`, returning the ray parameter and local
/// coordinates of the hit.
fn hit_surface(surface: &Surface, ray: &Ray, t_max: f32) -> Option<(f32, Vec2)> {
    let origin = surface.frame.inverse_transform_point(ray.origin);
    let direction = surface.frame.inverse_transform_direction(ray.direction);
    if direction.z == 0.0 {
        return None;
    }

    let t = -origin.z / direction.z;
    if !ray.range.with_max(t_max).contains(t) {
        return None;
    }

    let p = origin + direction * t;
    let size = surface.shape.size();
    let inside = match surface.shape {
        Shape::Quad { .. } => p.x.abs() <= size && p.y.abs() <= size,
        Shape::Disk { .. } => p.x * p.x + p.y * p.y <= size * size,
    };
    if !inside {
        return None;
    }

    let texcoord = Vec2::new((p.x / size + 1.0) / 2.0, (p.y / size + 1.0) / 2.0);
    Some((t, texcoord))
}

/// Brute-force intersector over a scene's surfaces.
pub struct SurfaceList<'s> {
    surfaces: &'s [Surface],
}

impl<'s> SurfaceList<'s> {
    pub fn new(surfaces: &'s [Surface]) -> Self {
        Self { surfaces }
    }

    pub fn from_scene(scene: &'s Scene) -> Self {
        Self::new(&scene.surfaces)
    }
}

impl Intersector for SurfaceList<'_> {
    fn intersect(&self, ray: &Ray) -> Option<Intersection<'_>> {
        let mut closest_so_far = ray.range.max;
        let mut nearest: Option<(&Surface, f32, Vec2)> = None;

        for surface in self.surfaces {
            if let Some((t, texcoord)) = hit_surface(surface, ray, closest_so_far) {
                closest_so_far = t;
                nearest = Some((surface, t, texcoord));
            }
        }

        nearest.map(|(surface, t, texcoord)| Intersection {
            t,
            position: ray.at(t),
            normal: surface.frame.z,
            texcoord,
            material: &surface.material,
        })
    }

    fn occluded(&self, ray: &Ray) -> bool {
        self.surfaces
            .iter()
            .any(|surface| hit_surface(surface, ray, ray.range.max).is_some())
    }
}
