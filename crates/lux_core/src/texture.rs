//! Texel grids and texture file loading.
//!
//! A `Texture` is a plain 2D grid of linear RGB values. Filtering and
//! addressing live in the renderer; this module only owns storage and
//! the path-keyed cache used by the scene loader.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::DynamicImage;
use lux_math::Vec3;
use thiserror::Error;

/// Errors that can occur during texture loading.
#[derive(Error, Debug)]
pub enum TextureError {
    #[error("Failed to load texture {path}: {source}")]
    Load {
        path: String,
        #[source]
        source: image::ImageError,
    },

    #[error("Texture {0} has zero width or height")]
    Empty(String),
}

pub type TextureResult<T> = Result<T, TextureError>;

/// A 2D grid of linear RGB texels.
///
/// Texel `(0, 0)` is the bottom-left corner: `v = 0` maps to row 0.
#[derive(Clone, Debug)]
pub struct Texture {
    width: usize,
    height: usize,
    texels: Vec<Vec3>,
}

impl Texture {
    /// Create a texture from row-major texels, bottom row first.
    ///
    /// Panics if `texels.len() != width * height` or either dimension is 0.
    pub fn new(width: usize, height: usize, texels: Vec<Vec3>) -> Self {
        assert!(width > 0 && height > 0, "texture dimensions must be non-zero");
        assert_eq!(texels.len(), width * height, "texel count does not match dimensions");
        Self {
            width,
            height,
            texels,
        }
    }

    /// Create a solid color texture (1x1).
    pub fn solid(color: Vec3) -> Self {
        Self::new(1, 1, vec![color])
    }

    /// Texture width in texels.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Texture height in texels.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Get the texel at column `i`, row `j`.
    #[inline]
    pub fn at(&self, i: usize, j: usize) -> Vec3 {
        self.texels[j * self.width + i]
    }

    /// Get total size in bytes (approximate).
    pub fn size_bytes(&self) -> usize {
        self.texels.len() * std::mem::size_of::<Vec3>()
    }

    /// Load a texture from an image file.
    ///
    /// 8-bit images are decoded from sRGB to linear; float images (such as
    /// Radiance `.hdr`) are taken as already linear.
    pub fn load(path: &Path) -> TextureResult<Self> {
        let display = path.display().to_string();
        let img = image::open(path).map_err(|source| TextureError::Load {
            path: display.clone(),
            source,
        })?;
        Self::from_image(&img).ok_or(TextureError::Empty(display))
    }

    /// Convert a decoded image, flipping rows so the bottom row comes first.
    fn from_image(img: &DynamicImage) -> Option<Self> {
        let (width, height) = (img.width() as usize, img.height() as usize);
        if width == 0 || height == 0 {
            return None;
        }

        let is_float = matches!(img, DynamicImage::ImageRgb32F(_) | DynamicImage::ImageRgba32F(_));

        let mut texels = Vec::with_capacity(width * height);
        if is_float {
            let rgb = img.to_rgb32f();
            for row in (0..height).rev() {
                for col in 0..width {
                    let p = rgb.get_pixel(col as u32, row as u32);
                    texels.push(Vec3::new(p[0], p[1], p[2]));
                }
            }
        } else {
            let rgb = img.to_rgb8();
            for row in (0..height).rev() {
                for col in 0..width {
                    let p = rgb.get_pixel(col as u32, row as u32);
                    texels.push(Vec3::new(
                        srgb_to_linear(p[0]),
                        srgb_to_linear(p[1]),
                        srgb_to_linear(p[2]),
                    ));
                }
            }
        }

        Some(Self::new(width, height, texels))
    }
}

/// Cache for loaded textures.
///
/// Textures are loaded on first request and shared afterwards, so two
/// materials naming the same file point at the same grid.
pub struct TextureCache {
    /// Cached textures by the path they were requested with
    textures: HashMap<String, Arc<Texture>>,

    /// Base directory for resolving relative paths
    base_dir: Option<PathBuf>,
}

impl TextureCache {
    /// Create a new empty texture cache.
    pub fn new() -> Self {
        Self {
            textures: HashMap::new(),
            base_dir: None,
        }
    }

    /// Create a texture cache with a base directory for relative paths.
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            textures: HashMap::new(),
            base_dir: Some(base_dir.into()),
        }
    }

    /// Load a texture from file, using cache if available.
    pub fn load(&mut self, path: &str) -> TextureResult<Arc<Texture>> {
        if let Some(texture) = self.textures.get(path) {
            return Ok(texture.clone());
        }

        let full_path = self.resolve_path(path);
        let texture = Arc::new(Texture::load(&full_path)?);
        self.textures.insert(path.to_string(), texture.clone());

        log::debug!(
            "Loaded texture: {} ({}x{}, {:.1} KB)",
            path,
            texture.width(),
            texture.height(),
            texture.size_bytes() as f32 / 1024.0
        );

        Ok(texture)
    }

    /// Get the number of cached textures.
    pub fn len(&self) -> usize {
        self.textures.len()
    }

    /// Check if cache is empty.
    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    /// Resolve a path relative to the base directory.
    fn resolve_path(&self, path: &str) -> PathBuf {
        let path = Path::new(path);

        if path.is_absolute() {
            path.to_path_buf()
        } else if let Some(base) = &self.base_dir {
            base.join(path)
        } else {
            path.to_path_buf()
        }
    }
}

impl Default for TextureCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert sRGB byte value to linear float.
fn srgb_to_linear(value: u8) -> f32 {
    let v = value as f32 / 255.0;
    if v <= 0.04045 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}
