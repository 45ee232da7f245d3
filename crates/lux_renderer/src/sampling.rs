//! Importance sampling of reflection directions.
//!
//! Warps take uniform numbers in `[0, 1)` and return local-frame
//! directions (z up) together with their solid-angle density. The combined
//! BRDF sampler mixes a cosine lobe for the diffuse part with a
//! cosine-power lobe over half vectors for the specular part, and always
//! reports the density of the full mixture.

use crate::brdf::Brdf;
use lux_core::Color;
use lux_math::{mean, Frame, Vec2, Vec3};
use std::f32::consts::{FRAC_1_PI, FRAC_PI_4, PI, TAU};

/// A sampled direction and its probability density (per solid angle).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionSample {
    pub direction: Vec3,
    pub pdf: f32,
}

/// Cosine-weighted direction on the local upper hemisphere.
#[inline]
pub fn sample_hemisphere_cosine(ruv: Vec2) -> Vec3 {
    let z = ruv.y.sqrt();
    let r = (1.0 - z * z).max(0.0).sqrt();
    let phi = TAU * ruv.x;
    Vec3::new(r * phi.cos(), r * phi.sin(), z)
}

/// Density of [`sample_hemisphere_cosine`].
#[inline]
pub fn hemisphere_cosine_pdf(local: Vec3) -> f32 {
    if local.z <= 0.0 {
        0.0
    } else {
        local.z * FRAC_1_PI
    }
}

/// Cosine-power-weighted direction on the local upper hemisphere.
#[inline]
pub fn sample_hemisphere_cospower(ruv: Vec2, exponent: f32) -> Vec3 {
    let z = ruv.y.powf(1.0 / (exponent + 1.0));
    let r = (1.0 - z * z).max(0.0).sqrt();
    let phi = TAU * ruv.x;
    Vec3::new(r * phi.cos(), r * phi.sin(), z)
}

/// Density of [`sample_hemisphere_cospower`].
#[inline]
pub fn hemisphere_cospower_pdf(local: Vec3, exponent: f32) -> f32 {
    if local.z <= 0.0 {
        0.0
    } else {
        local.z.powf(exponent) * (exponent + 1.0) / TAU
    }
}

/// Map the unit square onto the unit disk, preserving stratification.
pub fn sample_disk_concentric(ruv: Vec2) -> Vec2 {
    let offset = ruv * 2.0 - Vec2::ONE;
    if offset == Vec2::ZERO {
        return Vec2::ZERO;
    }

    let (r, theta) = if offset.x.abs() > offset.y.abs() {
        (offset.x, FRAC_PI_4 * (offset.y / offset.x))
    } else {
        (offset.y, PI / 2.0 - FRAC_PI_4 * (offset.x / offset.y))
    };
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Pick a cosine-weighted direction around `normal`.
pub fn sample_cosine(normal: Vec3, ruv: Vec2) -> DirectionSample {
    let frame = Frame::from_z(Vec3::ZERO, normal);
    let local = sample_hemisphere_cosine(ruv);
    DirectionSample {
        direction: frame.transform_direction(local),
        pdf: hemisphere_cosine_pdf(local),
    }
}

impl Brdf {
    /// Probability of choosing the diffuse lobe.
    #[inline]
    fn diffuse_weight(&self) -> f32 {
        let kd = mean(self.diffuse);
        kd / (kd + mean(self.specular))
    }

    /// Pick a reflection direction for view direction `v` around `normal`.
    ///
    /// `ruv` drives the lobe warp, `rl` chooses between the lobes. Without
    /// a specular component this is exactly [`sample_cosine`].
    pub fn sample(&self, v: Vec3, normal: Vec3, ruv: Vec2, rl: f32) -> DirectionSample {
        if self.specular == Color::ZERO {
            return sample_cosine(normal, ruv);
        }

        let frame = Frame::from_z(Vec3::ZERO, normal);
        let dw = self.diffuse_weight();
        let v_local = frame.inverse_transform_direction(v);

        let (l_local, h_local) = if rl < dw {
            let l = sample_hemisphere_cosine(ruv);
            (l, (l + v_local).normalize())
        } else {
            let h = sample_hemisphere_cospower(ruv, self.exponent);
            (-v_local + h * 2.0 * v_local.dot(h), h)
        };

        DirectionSample {
            direction: frame.transform_direction(l_local),
            pdf: self.mixture_pdf(dw, v_local, l_local, h_local),
        }
    }

    /// Density with which [`Brdf::sample`] picks `l` for view direction `v`.
    pub fn pdf(&self, v: Vec3, l: Vec3, normal: Vec3) -> f32 {
        if self.specular == Color::ZERO {
            return hemisphere_cosine_pdf(Vec3::new(0.0, 0.0, l.dot(normal)));
        }

        let frame = Frame::from_z(Vec3::ZERO, normal);
        let v_local = frame.inverse_transform_direction(v);
        let l_local = frame.inverse_transform_direction(l);
        let h_local = (l_local + v_local).normalize();
        self.mixture_pdf(self.diffuse_weight(), v_local, l_local, h_local)
    }

    /// Both lobes' densities at `l`, the specular one moved from half-vector
    /// to direction measure.
    #[inline]
    fn mixture_pdf(&self, dw: f32, v_local: Vec3, l_local: Vec3, h_local: Vec3) -> f32 {
        let diffuse_pdf = hemisphere_cosine_pdf(l_local);
        let specular_pdf = hemisphere_cospower_pdf(h_local, self.exponent) / (4.0 * v_local.dot(h_local));
        dw * diffuse_pdf + (1.0 - dw) * specular_pdf
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn glossy() -> Brdf {
        Brdf {
            diffuse: Color::splat(0.3),
            specular: Color::splat(0.6),
            exponent: 20.0,
            microfacet: false,
        }
    }

    #[test]
    fn test_cosine_sample_in_hemisphere() {
        let mut rng = StdRng::seed_from_u64(7);
        let normal = Vec3::new(1.0, 2.0, -0.5).normalize();

        for _ in 0..1000 {
            let ruv = Vec2::new(rng.gen(), rng.gen());
            let s = sample_cosine(normal, ruv);
            let cos = s.direction.dot(normal);

            assert!((s.direction.length() - 1.0).abs() < 1e-4);
            assert!(cos >= -1e-5);
            assert!((s.pdf - cos.max(0.0) * FRAC_1_PI).abs() < 1e-4);
        }
    }

    #[test]
    fn test_zero_specular_matches_cosine_sampler() {
        let brdf = Brdf {
            diffuse: Color::new(0.7, 0.2, 0.1),
            specular: Color::ZERO,
            exponent: 50.0,
            microfacet: false,
        };
        let normal = Vec3::Y;
        let v = Vec3::new(0.3, 0.9, 0.0).normalize();
        let mut rng = StdRng::seed_from_u64(11);

        for _ in 0..256 {
            let ruv = Vec2::new(rng.gen(), rng.gen());
            let rl: f32 = rng.gen();
            assert_eq!(brdf.sample(v, normal, ruv, rl), sample_cosine(normal, ruv));
        }
    }

    #[test]
    fn test_sample_reports_mixture_pdf() {
        let brdf = glossy();
        let normal = Vec3::Z;
        let v = Vec3::new(0.4, 0.0, 0.9).normalize();
        let mut rng = StdRng::seed_from_u64(3);

        for _ in 0..256 {
            let ruv = Vec2::new(rng.gen(), rng.gen());
            let rl: f32 = rng.gen();
            let s = brdf.sample(v, normal, ruv, rl);
            if s.direction.dot(normal) <= 0.05 {
                continue;
            }
            let expected = brdf.pdf(v, s.direction, normal);
            assert!(
                (s.pdf - expected).abs() <= 1e-3 * expected.max(1.0),
                "pdf {} vs {}",
                s.pdf,
                expected
            );
        }
    }

    #[test]
    fn test_mixture_pdf_integrates_to_about_one() {
        // Uniform hemisphere estimate of the density's integral. Only mass
        // reflected below the horizon is missing, which is small for a
        // near-normal view and a tight lobe.
        let brdf = glossy();
        let normal = Vec3::Z;
        let v = Vec3::new(0.1, 0.0, 1.0).normalize();
        let mut rng = StdRng::seed_from_u64(5);

        let n = 200_000;
        let mut sum = 0.0f64;
        for _ in 0..n {
            let z: f32 = rng.gen();
            let phi = TAU * rng.gen::<f32>();
            let r = (1.0 - z * z).sqrt();
            let l = Vec3::new(r * phi.cos(), r * phi.sin(), z);
            sum += brdf.pdf(v, l, normal) as f64;
        }
        let integral = sum / n as f64 * std::f64::consts::TAU;
        assert!((integral - 1.0).abs() < 0.05, "integral = {integral}");
    }

    #[test]
    fn test_cospower_concentrates_with_exponent() {
        let ruv = Vec2::new(0.3, 0.5);
        let wide = sample_hemisphere_cospower(ruv, 1.0);
        let tight = sample_hemisphere_cospower(ruv, 100.0);
        assert!(tight.z > wide.z);
        assert!((tight.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_concentric_disk_stays_inside() {
        let mut rng = StdRng::seed_from_u64(13);
        for _ in 0..1000 {
            let p = sample_disk_concentric(Vec2::new(rng.gen(), rng.gen()));
            assert!(p.length() <= 1.0 + 1e-5);
        }
        assert_eq!(sample_disk_concentric(Vec2::splat(0.5)), Vec2::ZERO);
    }
}
