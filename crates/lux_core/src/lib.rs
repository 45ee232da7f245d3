//! Lux Core - Scene description and asset loading for the Lux path tracer.
//!
//! This crate provides:
//!
//! - **Scene types**: `Scene`, `Camera`, `Surface`, `Shape`, `Material`,
//!   `PointLight`, `RenderParams`
//! - **Textures**: `Texture` texel grids and a path-keyed `TextureCache`
//! - **Loading**: JSON scene files via `load_scene`
//!
//! # Example
//!
//! ```ignore
//! use lux_core::load_scene;
//!
//! let scene = load_scene("scenes/room.json")?;
//! println!("{} surfaces, {} point lights",
//!     scene.surfaces.len(),
//!     scene.lights.len());
//! ```

pub mod loader;
pub mod scene;
pub mod texture;

// Re-export commonly used types
pub use loader::{load_scene, load_scene_from_str, LoadError, LoadResult};
pub use scene::{Camera, Color, Material, PointLight, RenderParams, Scene, Shape, Surface};
pub use texture::{Texture, TextureCache, TextureError, TextureResult};
