//! Row-striped parallel rendering.
//!
//! The image is cut into `workers` stripes: stripe `k` owns rows `k`,
//! `k + workers`, `k + 2 * workers` and so on, together with the random
//! streams of those rows. Stripes are disjoint `&mut` borrows, so workers
//! never share a pixel or a generator, and since every pixel's stream is
//! seeded from its coordinates the result does not depend on the worker
//! count.

use crate::camera::CameraSampler;
use crate::error::RenderResult;
use crate::image_buffer::ImageBuffer;
use crate::integrator::PathTracer;
use crate::intersect::Intersector;
use crate::rng::{RngImage, DEFAULT_SEED};
use log::{debug, info, warn};
use lux_core::{Color, Scene};
use rand::rngs::SmallRng;
use rayon::prelude::*;

/// Render-time knobs that are not part of the scene.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Worker thread count
    pub workers: usize,
    /// Base seed of the per-pixel random streams
    pub seed: u64,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            workers: num_cpus::get(),
            seed: DEFAULT_SEED,
        }
    }
}

impl RenderOptions {
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

/// One image row with its random streams.
struct Row<'a> {
    y: u32,
    pixels: &'a mut [Color],
    rngs: &'a mut [SmallRng],
}

/// Deal rows round-robin into `workers` stripes.
fn stripe_rows<'a>(image: &'a mut ImageBuffer, rngs: &'a mut RngImage, workers: usize) -> Vec<Vec<Row<'a>>> {
    let mut stripes: Vec<Vec<Row<'a>>> = (0..workers).map(|_| Vec::new()).collect();
    for (j, (pixels, rngs)) in image.rows_mut().zip(rngs.rows_mut()).enumerate() {
        stripes[j % workers].push(Row {
            y: j as u32,
            pixels,
            rngs,
        });
    }
    stripes
}

fn render_row<I: Intersector + ?Sized>(tracer: &PathTracer<'_, I>, camera: &CameraSampler, samples: u32, row: Row<'_>) {
    let y = row.y;
    for (x, (pixel, rng)) in row.pixels.iter_mut().zip(row.rngs.iter_mut()).enumerate() {
        let x = x as u32;
        *pixel = Color::ZERO;
        for jj in 0..samples {
            for ii in 0..samples {
                let ray = camera.primary_ray(x, y, ii, jj, rng);
                *pixel += tracer.radiance(&ray, rng, 0);
            }
        }
        *pixel /= (samples * samples) as f32;
    }
}

/// Render `scene` with `intersector` answering its ray queries.
///
/// Blocks until every row is done. Fails only if the worker pool cannot be
/// created.
pub fn render<I: Intersector + ?Sized>(
    scene: &Scene,
    intersector: &I,
    options: &RenderOptions,
) -> RenderResult<ImageBuffer> {
    let params = &scene.params;
    let (width, height) = (params.image_width, params.image_height);
    let workers = options.workers.max(1);

    info!(
        "Rendering {}x{} at {} spp, max depth {}, {} workers",
        width,
        height,
        params.samples_per_pixel(),
        params.max_depth,
        workers
    );

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|i| format!("lux-render-{i}"))
        .build()?;

    let mut image = ImageBuffer::new(width, height);
    let mut rngs = RngImage::new(width, height, options.seed);
    let tracer = PathTracer::new(scene, intersector);
    let camera = CameraSampler::new(&scene.camera, params);

    let stripes = stripe_rows(&mut image, &mut rngs, workers);
    pool.install(|| {
        stripes.into_par_iter().enumerate().for_each(|(k, stripe)| {
            for row in stripe {
                if k == 0 {
                    debug!("row {}/{}", row.y + 1, height);
                }
                render_row(&tracer, &camera, params.samples, row);
            }
        });
    });

    let non_finite = image.count_non_finite();
    if non_finite > 0 {
        warn!("{} pixels have non-finite values", non_finite);
    }
    info!("Render complete");

    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intersect::SurfaceList;
    use lux_core::{Camera, Material, PointLight, Shape, Surface};
    use lux_math::{Frame, Vec3};

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn lit_room() -> Scene {
        let mut scene = Scene {
            camera: Camera::look_at(Vec3::new(0.0, 2.0, 4.0), Vec3::ZERO, Vec3::Y, 1.0, 0.75),
            lights: vec![PointLight {
                position: Vec3::new(1.0, 3.0, 1.0),
                intensity: Color::splat(6.0),
            }],
            surfaces: vec![
                Surface::new(
                    Frame::from_z(Vec3::ZERO, Vec3::Y),
                    Shape::Quad { size: 2.0 },
                    Material {
                        specular: Color::splat(0.2),
                        exponent: 30.0,
                        ..Material::diffuse(Color::new(0.7, 0.5, 0.3))
                    },
                ),
                Surface::new(
                    Frame::from_z(Vec3::new(0.0, 2.5, 0.0), -Vec3::Y),
                    Shape::Disk { size: 0.5 },
                    Material::emissive(Color::splat(4.0)),
                ),
            ],
            background: Color::new(0.1, 0.2, 0.3),
            ..Default::default()
        };
        scene.params.image_width = 12;
        scene.params.image_height = 9;
        scene.params.samples = 2;
        scene.params.max_depth = 2;
        scene
    }

    #[test]
    fn test_empty_scene_is_background() {
        init_logger();
        let mut scene = Scene {
            background: Color::new(0.25, 0.5, 0.75),
            ..Default::default()
        };
        scene.params.image_width = 7;
        scene.params.image_height = 5;
        scene.params.samples = 2;

        let list = SurfaceList::from_scene(&scene);
        let image = render(&scene, &list, &RenderOptions::default().with_workers(3)).unwrap();

        assert_eq!((image.width, image.height), (7, 5));
        assert!(image.pixels.iter().all(|&p| p == scene.background));
    }

    #[test]
    fn test_worker_count_does_not_change_output() {
        init_logger();
        let scene = lit_room();
        let list = SurfaceList::from_scene(&scene);

        let single = render(&scene, &list, &RenderOptions::default().with_workers(1)).unwrap();
        let many = render(&scene, &list, &RenderOptions::default().with_workers(4)).unwrap();
        let more_than_rows = render(&scene, &list, &RenderOptions::default().with_workers(16)).unwrap();

        assert_eq!(single, many);
        assert_eq!(single, more_than_rows);
        assert!(single.pixels.iter().any(|p| p.x > scene.background.x));
    }

    #[test]
    fn test_seed_changes_noise() {
        let scene = lit_room();
        let list = SurfaceList::from_scene(&scene);

        let a = render(&scene, &list, &RenderOptions::default().with_workers(2).with_seed(1)).unwrap();
        let b = render(&scene, &list, &RenderOptions::default().with_workers(2).with_seed(2)).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_stripes_are_round_robin() {
        let mut image = ImageBuffer::new(2, 5);
        let mut rngs = RngImage::new(2, 5, 0);
        let stripes = stripe_rows(&mut image, &mut rngs, 2);

        let rows: Vec<Vec<u32>> = stripes.iter().map(|s| s.iter().map(|r| r.y).collect()).collect();
        assert_eq!(rows, vec![vec![0, 2, 4], vec![1, 3]]);
        assert!(stripes.iter().flatten().all(|r| r.pixels.len() == 2 && r.rngs.len() == 2));
    }

    #[test]
    fn test_default_options() {
        let options = RenderOptions::default();
        assert!(options.workers >= 1);
        assert_eq!(options.seed, DEFAULT_SEED);
    }
}
