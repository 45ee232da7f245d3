//! JSON scene loading.
//!
//! Scene files are deserialized into description structs that mirror the
//! file layout, then resolved into a [`Scene`]: camera frames are built,
//! texture paths are loaded through a shared [`TextureCache`] rooted at
//! the scene file's directory.

use std::path::Path;
use std::sync::Arc;

use lux_math::{Frame, Vec3};
use serde::Deserialize;
use thiserror::Error;

use crate::scene::{Camera, Color, Material, PointLight, RenderParams, Scene, Shape, Surface};
use crate::texture::{Texture, TextureCache, TextureError};

/// Errors that can occur during scene loading.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Texture error: {0}")]
    Texture(#[from] TextureError),

    #[error("Invalid scene: {0}")]
    Invalid(String),
}

/// Result type for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct SceneDesc {
    camera: CameraDesc,
    #[serde(default)]
    lights: Vec<LightDesc>,
    #[serde(default)]
    surfaces: Vec<SurfaceDesc>,
    #[serde(default)]
    ambient: Vec3,
    #[serde(default)]
    background: Vec3,
    background_texture: Option<String>,

    #[serde(default = "default_resolution")]
    image_width: u32,
    #[serde(default = "default_resolution")]
    image_height: u32,
    #[serde(default = "default_samples")]
    samples: u32,
    #[serde(default)]
    max_depth: u32,
    #[serde(default = "default_true")]
    shadows: bool,
    #[serde(default)]
    aperture: f32,
    #[serde(default = "default_focus_distance")]
    focus_distance: f32,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct CameraDesc {
    from: Vec3,
    to: Vec3,
    #[serde(default = "default_up")]
    up: Vec3,
    #[serde(default = "default_extent")]
    width: f32,
    #[serde(default = "default_extent")]
    height: f32,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct LightDesc {
    position: Vec3,
    intensity: Vec3,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct SurfaceDesc {
    #[serde(default)]
    frame: Frame,
    shape: ShapeDesc,
    #[serde(default)]
    material: MaterialDesc,
}

#[derive(Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
enum ShapeDesc {
    Quad { size: f32 },
    Disk { size: f32 },
}

#[derive(Deserialize)]
#[serde(default, deny_unknown_fields)]
struct MaterialDesc {
    emission: Vec3,
    diffuse: Vec3,
    specular: Vec3,
    exponent: f32,
    microfacet: bool,
    emission_texture: Option<String>,
    diffuse_texture: Option<String>,
    specular_texture: Option<String>,
    normal_texture: Option<String>,
}

impl Default for MaterialDesc {
    fn default() -> Self {
        let material = Material::default();
        Self {
            emission: material.emission,
            diffuse: material.diffuse,
            specular: material.specular,
            exponent: material.exponent,
            microfacet: material.microfacet,
            emission_texture: None,
            diffuse_texture: None,
            specular_texture: None,
            normal_texture: None,
        }
    }
}

fn default_resolution() -> u32 {
    RenderParams::default().image_width
}

fn default_samples() -> u32 {
    1
}

fn default_true() -> bool {
    true
}

fn default_focus_distance() -> f32 {
    1.0
}

fn default_up() -> Vec3 {
    Vec3::Y
}

fn default_extent() -> f32 {
    1.0
}

/// Load a JSON scene file.
///
/// Relative texture paths are resolved against the file's directory.
pub fn load_scene<P: AsRef<Path>>(path: P) -> LoadResult<Scene> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));

    let scene = load_scene_from_str(&text, base_dir)?;

    log::info!(
        "Loaded {}: {}x{} @ {} spp, {} surfaces ({} emissive), {} point lights",
        path.display(),
        scene.params.image_width,
        scene.params.image_height,
        scene.params.samples_per_pixel(),
        scene.surfaces.len(),
        scene.emissive_surfaces().count(),
        scene.lights.len()
    );

    Ok(scene)
}

/// Parse a scene from JSON text, resolving textures against `base_dir`.
pub fn load_scene_from_str(text: &str, base_dir: &Path) -> LoadResult<Scene> {
    let desc: SceneDesc = serde_json::from_str(text)?;
    let mut textures = TextureCache::with_base_dir(base_dir);
    build_scene(desc, &mut textures)
}

fn build_scene(desc: SceneDesc, textures: &mut TextureCache) -> LoadResult<Scene> {
    if desc.samples == 0 {
        return Err(LoadError::Invalid("samples must be at least 1".into()));
    }
    if desc.image_width == 0 || desc.image_height == 0 {
        return Err(LoadError::Invalid("image resolution must be non-zero".into()));
    }
    if desc.camera.width <= 0.0 || desc.camera.height <= 0.0 {
        return Err(LoadError::Invalid("camera extents must be positive".into()));
    }

    let camera = Camera::look_at(
        desc.camera.from,
        desc.camera.to,
        desc.camera.up,
        desc.camera.width,
        desc.camera.height,
    );

    let lights = desc
        .lights
        .into_iter()
        .map(|l| PointLight {
            position: l.position,
            intensity: l.intensity,
        })
        .collect();

    let surfaces = desc
        .surfaces
        .into_iter()
        .map(|s| build_surface(s, textures))
        .collect::<LoadResult<Vec<_>>>()?;

    let background_texture = load_optional(textures, desc.background_texture.as_deref())?;

    Ok(Scene {
        camera,
        lights,
        surfaces,
        ambient: desc.ambient,
        background: desc.background,
        background_texture,
        params: RenderParams {
            image_width: desc.image_width,
            image_height: desc.image_height,
            samples: desc.samples,
            max_depth: desc.max_depth,
            shadows: desc.shadows,
            aperture: desc.aperture,
            focus_distance: desc.focus_distance,
        },
    })
}

fn build_surface(desc: SurfaceDesc, textures: &mut TextureCache) -> LoadResult<Surface> {
    let shape = match desc.shape {
        ShapeDesc::Quad { size } => Shape::Quad { size },
        ShapeDesc::Disk { size } => Shape::Disk { size },
    };
    if !(shape.size() > 0.0) {
        return Err(LoadError::Invalid(format!("surface size must be positive, got {}", shape.size())));
    }

    let m = desc.material;
    let material = Material {
        emission: m.emission,
        diffuse: m.diffuse,
        specular: m.specular,
        exponent: m.exponent,
        microfacet: m.microfacet,
        emission_texture: load_optional(textures, m.emission_texture.as_deref())?,
        diffuse_texture: load_optional(textures, m.diffuse_texture.as_deref())?,
        specular_texture: load_optional(textures, m.specular_texture.as_deref())?,
        normal_texture: load_optional(textures, m.normal_texture.as_deref())?,
    };

    Ok(Surface::new(desc.frame, shape, material))
}

fn load_optional(textures: &mut TextureCache, path: Option<&str>) -> LoadResult<Option<Arc<Texture>>> {
    path.map(|p| textures.load(p)).transpose().map_err(LoadError::from)
}
