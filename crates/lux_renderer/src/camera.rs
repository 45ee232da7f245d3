//! Primary ray generation.

use crate::rng::gen_vec2;
use crate::sampling::sample_disk_concentric;
use lux_core::{Camera, RenderParams};
use lux_math::{Ray, Vec2, Vec3};
use rand::{Rng, RngCore};

/// Generates stratified, jittered camera rays for one image.
#[derive(Debug, Clone)]
pub struct CameraSampler {
    camera: Camera,
    image_width: u32,
    image_height: u32,
    // Sub-samples per axis
    samples: u32,
    aperture: f32,
    focus_distance: f32,
}

impl CameraSampler {
    pub fn new(camera: &Camera, params: &RenderParams) -> Self {
        Self {
            camera: *camera,
            image_width: params.image_width,
            image_height: params.image_height,
            samples: params.samples,
            aperture: params.aperture,
            focus_distance: params.focus_distance,
        }
    }

    /// Image-plane coordinates in `[0, 1)²` for sub-sample `(ii, jj)` of
    /// pixel `(i, j)`, jittered by `xi`.
    #[inline]
    fn image_uv(&self, i: u32, j: u32, ii: u32, jj: u32, xi: Vec2) -> Vec2 {
        let ns = self.samples as f32;
        Vec2::new(
            (i as f32 + (ii as f32 + xi.x) / ns) / self.image_width as f32,
            (j as f32 + (jj as f32 + xi.y) / ns) / self.image_height as f32,
        )
    }

    /// Camera-space point on the image plane at unit distance.
    #[inline]
    fn image_plane_point(&self, uv: Vec2) -> Vec3 {
        Vec3::new(
            (uv.x - 0.5) * self.camera.width,
            (uv.y - 0.5) * self.camera.height,
            -1.0,
        )
    }

    /// Ray through sub-sample `(ii, jj)` of pixel `(i, j)`.
    ///
    /// Draws two numbers for the pixel jitter; a thin lens draws two more
    /// pairs, one for the lens point and one for the focus-plane jitter.
    pub fn primary_ray(&self, i: u32, j: u32, ii: u32, jj: u32, rng: &mut dyn RngCore) -> Ray {
        let x1 = rng.gen::<f32>();
        let x2 = rng.gen::<f32>();
        let uv = self.image_uv(i, j, ii, jj, Vec2::new(x1, x2));
        let frame = &self.camera.frame;

        if self.aperture == 0.0 {
            let direction = self.image_plane_point(uv);
            return Ray::new(frame.origin, frame.transform_direction(direction));
        }

        let lens = sample_disk_concentric(gen_vec2(rng)) * (self.aperture / 2.0);
        let focus_uv = self.image_uv(i, j, ii, jj, gen_vec2(rng));
        let focus = self.image_plane_point(focus_uv) * self.focus_distance;

        let origin = lens.extend(0.0);
        Ray::new(frame.transform_point(origin), frame.transform_direction(focus - origin))
    }
}
