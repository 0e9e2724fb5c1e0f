/// Color frame buffer and its 8-bit image encoding
use image::RgbImage;
use nalgebra::Vector3;
use std::path::Path;

use crate::error::FrameError;

/// A `width x height` grid of float RGB triples in `0.0..=255.0`, row 0 at the top
#[derive(Debug, Clone, PartialEq)]
pub struct FrameBuffer {
    width: usize,
    height: usize,
    pixels: Vec<Vector3<f32>>,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![Vector3::zeros(); width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[Vector3<f32>] {
        &self.pixels
    }

    /// Color at column `x`, row `y` (row 0 is the top of the image)
    pub fn get(&self, x: usize, y: usize) -> Option<Vector3<f32>> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[y * self.width + x])
    }

    pub(crate) fn set(&mut self, x: usize, y: usize, color: Vector3<f32>) {
        let idx = y * self.width + x;
        self.pixels[idx] = color;
    }

    pub(crate) fn fill(&mut self, color: Vector3<f32>) {
        self.pixels.fill(color);
    }

    /// Number of pixels that are not pure black
    pub fn lit_pixel_count(&self) -> usize {
        self.pixels.iter().filter(|p| **p != Vector3::zeros()).count()
    }

    /// Convert to packed 8-bit RGB.
    ///
    /// Each channel goes through a plain `as u8` cast: the fractional part is
    /// truncated and values saturate at 0 and 255.
    pub fn to_rgb8(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|p| [p.x as u8, p.y as u8, p.z as u8])
            .collect()
    }

    pub fn to_image(&self) -> Result<RgbImage, FrameError> {
        let mismatch = || FrameError::SizeMismatch {
            width: self.width,
            height: self.height,
            len: self.pixels.len(),
        };
        let width = u32::try_from(self.width).map_err(|_| mismatch())?;
        let height = u32::try_from(self.height).map_err(|_| mismatch())?;
        RgbImage::from_raw(width, height, self.to_rgb8()).ok_or_else(mismatch)
    }

    /// Encode the frame and write it to `path`; the format follows the extension
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), FrameError> {
        let path = path.as_ref();
        self.to_image()?.save(path)?;
        log::info!("wrote {}x{} frame to {}", self.width, self.height, path.display());
        Ok(())
    }
}
