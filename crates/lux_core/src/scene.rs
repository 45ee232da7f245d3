//! Scene description types for Lux.
//!
//! The scene is plain data: the renderer reads it concurrently from every
//! worker and never mutates it.

use std::sync::Arc;

use lux_math::{Frame, Vec3};

use crate::texture::Texture;

/// Color type alias (linear RGB)
pub type Color = Vec3;

/// Surface reflectance and emission.
///
/// Each optional texture modulates the matching constant component-wise at
/// the hit's surface coordinate.
#[derive(Clone, Debug)]
pub struct Material {
    /// Emitted radiance; a non-zero value turns the surface into an area light
    pub emission: Color,

    /// Diffuse reflectance
    pub diffuse: Color,

    /// Specular reflectance
    pub specular: Color,

    /// Shininess exponent of the specular lobe
    pub exponent: f32,

    /// Use the microfacet model instead of the analytic one
    pub microfacet: bool,

    pub emission_texture: Option<Arc<Texture>>,
    pub diffuse_texture: Option<Arc<Texture>>,
    pub specular_texture: Option<Arc<Texture>>,
    pub normal_texture: Option<Arc<Texture>>,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            emission: Color::ZERO,
            diffuse: Color::splat(0.75),
            specular: Color::ZERO,
            exponent: 10.0,
            microfacet: false,
            emission_texture: None,
            diffuse_texture: None,
            specular_texture: None,
            normal_texture: None,
        }
    }
}

impl Material {
    /// A purely diffuse material.
    pub fn diffuse(diffuse: Color) -> Self {
        Self {
            diffuse,
            ..Default::default()
        }
    }

    /// A black emitter.
    pub fn emissive(emission: Color) -> Self {
        Self {
            emission,
            diffuse: Color::ZERO,
            ..Default::default()
        }
    }

    /// Check if this material emits light.
    ///
    /// Only the emission constant counts: a texture cannot make a zero
    /// constant emit.
    pub fn is_emissive(&self) -> bool {
        self.emission != Color::ZERO
    }
}

/// Geometric primitive kind with its size parameter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    /// Square of side `2 * size` centred on the frame origin, in its xy plane
    Quad { size: f32 },
    /// Disk of radius `size` centred on the frame origin, in its xy plane
    Disk { size: f32 },
}

impl Shape {
    /// The size parameter of either kind.
    pub fn size(&self) -> f32 {
        match *self {
            Shape::Quad { size } | Shape::Disk { size } => size,
        }
    }
}

/// A placed primitive with its material.
#[derive(Clone, Debug)]
pub struct Surface {
    pub frame: Frame,
    pub shape: Shape,
    pub material: Material,
}

impl Surface {
    pub fn new(frame: Frame, shape: Shape, material: Material) -> Self {
        Self {
            frame,
            shape,
            material,
        }
    }

    /// Check if this surface acts as an area light.
    pub fn is_emissive(&self) -> bool {
        self.material.is_emissive()
    }
}

/// An isotropic point light.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub intensity: Color,
}

/// Pinhole camera placement.
///
/// The camera looks down its frame's local -z axis. `width` and `height`
/// are the extents of the image plane at unit distance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub frame: Frame,
    pub width: f32,
    pub height: f32,
}

impl Camera {
    /// Create a camera at `from` looking toward `to`.
    pub fn look_at(from: Vec3, to: Vec3, up: Vec3, width: f32, height: f32) -> Self {
        Self {
            frame: Frame::look_at(from, to, up),
            width,
            height,
        }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::look_at(Vec3::new(0.0, 0.0, 1.0), Vec3::ZERO, Vec3::Y, 1.0, 1.0)
    }
}

/// Image and path-tracing parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderParams {
    /// Image width in pixels
    pub image_width: u32,
    /// Image height in pixels
    pub image_height: u32,
    /// Sub-samples per pixel along each axis (total is `samples²`)
    pub samples: u32,
    /// Maximum number of indirect bounces
    pub max_depth: u32,
    /// Test occlusion for direct lighting
    pub shadows: bool,
    /// Lens diameter; zero gives a pinhole camera
    pub aperture: f32,
    /// Distance to the plane of perfect focus
    pub focus_distance: f32,
}

impl Default for RenderParams {
    fn default() -> Self {
        Self {
            image_width: 512,
            image_height: 512,
            samples: 1,
            max_depth: 0,
            shadows: true,
            aperture: 0.0,
            focus_distance: 1.0,
        }
    }
}

impl RenderParams {
    /// Total sub-samples per pixel.
    pub fn samples_per_pixel(&self) -> u32 {
        self.samples * self.samples
    }
}

/// A complete scene ready to render.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    pub camera: Camera,
    pub lights: Vec<PointLight>,
    pub surfaces: Vec<Surface>,
    /// Constant ambient term, scaled by diffuse reflectance
    pub ambient: Color,
    /// Radiance of rays that escape the scene
    pub background: Color,
    /// Equirectangular environment map modulating `background`
    pub background_texture: Option<Arc<Texture>>,
    pub params: RenderParams,
}

impl Scene {
    /// Override the vertical resolution, deriving the width from the
    /// camera's aspect ratio.
    pub fn set_resolution(&mut self, height: u32) {
        self.params.image_height = height;
        self.params.image_width = (self.camera.width * height as f32 / self.camera.height) as u32;
    }

    /// Iterate over the surfaces that act as area lights.
    pub fn emissive_surfaces(&self) -> impl Iterator<Item = &Surface> {
        self.surfaces.iter().filter(|s| s.is_emissive())
    }
}
