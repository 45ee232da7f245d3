//! Recursive Monte Carlo radiance estimator.
//!
//! At every hit the estimate gathers, in order: ambient, emission (camera
//! rays only), point lights, one sample per emissive surface, one BRDF
//! sample of the environment map, and one indirect bounce while the depth
//! budget lasts. The random draws happen in that order too, so a pixel's
//! stream fully determines its value.

use crate::brdf::Brdf;
use crate::environment::eval_env;
use crate::intersect::Intersector;
use crate::light::sample_shape;
use crate::rng::gen_vec2;
use crate::texture::{lookup_scaled, Addressing};
use lux_core::{Color, Scene};
use lux_math::{Ray, Vec3};
use rand::{Rng, RngCore};

/// Path tracer over a scene and an intersector for its geometry.
pub struct PathTracer<'a, I: Intersector + ?Sized> {
    scene: &'a Scene,
    intersector: &'a I,
}

impl<'a, I: Intersector + ?Sized> PathTracer<'a, I> {
    pub fn new(scene: &'a Scene, intersector: &'a I) -> Self {
        Self { scene, intersector }
    }

    /// Whether light travelling along `shadow_ray` reaches its origin.
    #[inline]
    fn unoccluded(&self, shadow_ray: &Ray) -> bool {
        !self.scene.params.shadows || !self.intersector.occluded(shadow_ray)
    }

    /// Radiance arriving at the origin of `ray` from its direction.
    ///
    /// `depth` is 0 for camera rays and grows by one per bounce; bounces
    /// stop once it reaches the scene's `max_depth`. Nothing is clamped:
    /// degenerate geometry can yield non-finite values.
    pub fn radiance(&self, ray: &Ray, rng: &mut dyn RngCore, depth: u32) -> Color {
        let scene = self.scene;

        let Some(hit) = self.intersector.intersect(ray) else {
            return eval_env(scene.background, scene.background_texture.as_deref(), ray.direction);
        };

        let material = hit.material;
        let uv = hit.texcoord;
        let pos = hit.position;
        let v = -ray.direction;

        let ke = lookup_scaled(material.emission, material.emission_texture.as_deref(), uv, Addressing::Wrap);
        let kd = lookup_scaled(material.diffuse, material.diffuse_texture.as_deref(), uv, Addressing::Wrap);
        let ks = lookup_scaled(material.specular, material.specular_texture.as_deref(), uv, Addressing::Wrap);
        let n = match material.normal_texture.as_deref() {
            Some(texture) => lookup_scaled(hit.normal, Some(texture), uv, Addressing::Wrap).normalize(),
            None => hit.normal,
        };

        let brdf = Brdf {
            diffuse: kd,
            specular: ks,
            exponent: material.exponent,
            microfacet: material.microfacet,
        };
        let brdf_cos = |l: Vec3| n.dot(l).max(0.0) * brdf.eval(v, l, n);

        let mut c = scene.ambient * kd;
        if depth == 0 {
            c += ke;
        }

        for light in &scene.lights {
            let cl = light.intensity / pos.distance_squared(light.position);
            let l = (light.position - pos).normalize();
            let shade = cl * brdf_cos(l);
            if shade == Color::ZERO {
                continue;
            }
            if self.unoccluded(&Ray::segment(pos, light.position)) {
                c += shade;
            }
        }

        for surface in scene.emissive_surfaces() {
            let luv = gen_vec2(rng);
            let sample = sample_shape(&surface.frame, &surface.shape, luv);

            let emitted = lookup_scaled(
                surface.material.emission,
                surface.material.emission_texture.as_deref(),
                luv,
                Addressing::Clamp,
            ) * sample.area;
            let l = (sample.point - pos).normalize();
            let cl = emitted * (-sample.normal.dot(l)).max(0.0) / pos.distance_squared(sample.point);

            let shade = cl * brdf_cos(l);
            if shade == Color::ZERO {
                continue;
            }
            if self.unoccluded(&Ray::segment(pos, sample.point)) {
                c += shade;
            }
        }

        if let Some(env) = scene.background_texture.as_deref() {
            let ruv = gen_vec2(rng);
            let rl = rng.gen::<f32>();
            let sample = brdf.sample(v, n, ruv, rl);

            let cl = eval_env(scene.background, Some(env), sample.direction) / sample.pdf;
            let shade = cl * brdf_cos(sample.direction);
            if self.unoccluded(&Ray::new(pos, sample.direction)) {
                c += shade;
            }
        }

        if depth < scene.params.max_depth {
            let ruv = gen_vec2(rng);
            let rl = rng.gen::<f32>();
            let sample = brdf.sample(v, n, ruv, rl);

            let bounce = self.radiance(&Ray::new(pos, sample.direction), rng, depth + 1) / sample.pdf;
            c += brdf_cos(sample.direction) * bounce;
        }

        c
    }
}
