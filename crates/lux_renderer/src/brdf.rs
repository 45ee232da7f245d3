//! Reflectance models.
//!
//! Two models share one parameter set: an energy-normalized Phong-like
//! lobe over a Lambertian base, and a Cook-Torrance-like microfacet lobe.
//! Both are pure and unguarded: grazing configurations can divide by values
//! near zero and the resulting non-finite values are left to propagate.

use lux_core::Color;
use lux_math::Vec3;
use std::f32::consts::PI;

/// Shaded BRDF parameters at a surface point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Brdf {
    /// Diffuse reflectance (after texturing)
    pub diffuse: Color,
    /// Specular reflectance (after texturing)
    pub specular: Color,
    /// Shininess exponent
    pub exponent: f32,
    /// Use the microfacet model
    pub microfacet: bool,
}

impl Brdf {
    /// Evaluate the BRDF for view direction `v`, light direction `l` and
    /// normal `n`, all unit vectors pointing away from the surface.
    pub fn eval(&self, v: Vec3, l: Vec3, n: Vec3) -> Color {
        let h = (v + l).normalize();
        let n_dot_h = n.dot(h).max(0.0);

        if !self.microfacet {
            return self.diffuse / PI
                + self.specular * ((self.exponent + 8.0) / (8.0 * PI)) * n_dot_h.powf(self.exponent);
        }

        let d = (self.exponent + 2.0) / (2.0 * PI) * n_dot_h.powf(self.exponent);
        // Schlick-style blend without the usual fifth power.
        let f = self.specular + (Color::ONE - self.specular) * (1.0 - h.dot(l));
        let g = (2.0 * h.dot(n) * v.dot(n) / v.dot(h))
            .min(2.0 * h.dot(n) * l.dot(n) / l.dot(h))
            .min(1.0);

        f * (d * g / (4.0 * l.dot(n) * v.dot(n)))
    }
}
