//! Lux renderer - CPU path tracing
//!
//! A recursive Monte Carlo path tracer for scenes of textured quads and
//! disks lit by point lights, emissive surfaces and an environment map.
//! Rendering is spread over a fixed pool of worker threads and is
//! deterministic for a given seed, whatever the worker count.

pub mod brdf;
pub mod camera;
pub mod environment;
pub mod error;
pub mod image_buffer;
pub mod integrator;
pub mod intersect;
pub mod light;
pub mod rng;
pub mod sampling;
pub mod scheduler;
pub mod texture;

pub use brdf::Brdf;
pub use camera::CameraSampler;
pub use environment::eval_env;
pub use error::{RenderError, RenderResult};
pub use image_buffer::ImageBuffer;
pub use integrator::PathTracer;
pub use intersect::{Intersection, Intersector, SurfaceList};
pub use light::{sample_shape, ShapeSample};
pub use rng::{gen_vec2, RngImage, DEFAULT_SEED};
pub use sampling::{sample_cosine, DirectionSample};
pub use scheduler::{render, RenderOptions};
pub use texture::{lookup_scaled, Addressing};

/// Re-export the math and scene types callers need alongside the renderer.
pub use lux_core::{Color, Scene};
pub use lux_math::{Ray, Vec2, Vec3};
