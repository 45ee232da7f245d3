//! Linear RGB accumulation buffer and PNG output.

use crate::error::RenderResult;
use lux_core::Color;
use std::path::Path;

/// Display gamma applied when encoding.
pub const DISPLAY_GAMMA: f32 = 2.2;

/// Encode a linear value as an 8-bit display value.
#[inline]
pub fn linear_to_display(linear: f32) -> u8 {
    // f32::max drops NaN, so it encodes as black.
    (255.0 * linear.max(0.0).powf(1.0 / DISPLAY_GAMMA).clamp(0.0, 1.0)) as u8
}

/// A `width x height` grid of linear RGB values, row-major with row 0 at
/// the bottom of the image.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let i = self.index(x, y);
        self.pixels[i] = color;
    }

    /// Accumulate `color` into pixel (x, y).
    pub fn add(&mut self, x: u32, y: u32, color: Color) {
        let i = self.index(x, y);
        self.pixels[i] += color;
    }

    /// Multiply every pixel by `factor`.
    pub fn scale(&mut self, factor: f32) {
        for pixel in &mut self.pixels {
            *pixel *= factor;
        }
    }

    /// Disjoint mutable rows, bottom row first.
    pub fn rows_mut(&mut self) -> impl Iterator<Item = &mut [Color]> {
        self.pixels.chunks_mut(self.width.max(1) as usize)
    }

    /// Number of pixels with a NaN or infinite channel.
    pub fn count_non_finite(&self) -> usize {
        self.pixels.iter().filter(|p| !p.is_finite()).count()
    }

    /// Convert to top-down 8-bit RGB with display gamma.
    pub fn to_rgb8(&self) -> image::RgbImage {
        image::RgbImage::from_fn(self.width, self.height, |x, y| {
            let c = self.get(x, self.height - 1 - y);
            image::Rgb([linear_to_display(c.x), linear_to_display(c.y), linear_to_display(c.z)])
        })
    }

    /// Write the buffer as a PNG file.
    pub fn save_png(&self, path: impl AsRef<Path>) -> RenderResult<()> {
        self.to_rgb8()
            .save_with_format(path.as_ref(), image::ImageFormat::Png)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_scale() {
        let mut image = ImageBuffer::new(2, 2);
        image.add(1, 0, Color::ONE);
        image.add(1, 0, Color::splat(3.0));
        image.scale(0.25);

        assert_eq!(image.get(1, 0), Color::ONE);
        assert_eq!(image.get(0, 1), Color::ZERO);
    }

    #[test]
    fn test_rows_are_disjoint_and_ordered() {
        let mut image = ImageBuffer::new(3, 2);
        for (y, row) in image.rows_mut().enumerate() {
            for pixel in row.iter_mut() {
                *pixel = Color::splat(y as f32);
            }
        }
        assert_eq!(image.get(2, 0), Color::ZERO);
        assert_eq!(image.get(0, 1), Color::ONE);
    }

    #[test]
    fn test_display_encoding() {
        assert_eq!(linear_to_display(0.0), 0);
        assert_eq!(linear_to_display(1.0), 255);
        assert_eq!(linear_to_display(7.5), 255);
        assert_eq!(linear_to_display(-1.0), 0);
        assert_eq!(linear_to_display(f32::NAN), 0);
        // 0.5^(1/2.2) ~ 0.7297
        assert_eq!(linear_to_display(0.5), 186);
    }

    #[test]
    fn test_encoding_flips_rows() {
        let mut image = ImageBuffer::new(1, 2);
        image.set(0, 0, Color::ONE);

        let rgb = image.to_rgb8();
        assert_eq!(rgb.get_pixel(0, 1).0, [255, 255, 255]);
        assert_eq!(rgb.get_pixel(0, 0).0, [0, 0, 0]);
    }

    #[test]
    fn test_non_finite_count() {
        let mut image = ImageBuffer::new(2, 1);
        image.set(0, 0, Color::new(f32::NAN, 0.0, 0.0));
        assert_eq!(image.count_non_finite(), 1);
    }

    #[test]
    fn test_save_png() {
        let dir = std::env::temp_dir().join(format!("lux_image_buffer_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("out.png");

        let mut image = ImageBuffer::new(4, 3);
        image.set(1, 2, Color::new(1.0, 0.0, 0.5));
        image.save_png(&path).unwrap();

        let decoded = image::open(&path).unwrap().to_rgb8();
        assert_eq!(decoded.dimensions(), (4, 3));
        assert_eq!(decoded.get_pixel(1, 0).0[0], 255);

        std::fs::remove_dir_all(&dir).ok();
    }
}
