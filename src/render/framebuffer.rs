//! Frame buffer abstraction for 2D pixel access.
//!
//! [`PixelTarget`] is the only output interface the rasterizer and ray
//! tracer write through. Coordinates are origin-at-corner, y-down.
//! [`FrameBuffer`] is the in-memory implementation.

use std::path::Path;

use image::{ImageBuffer, Rgba, RgbaImage};

use crate::colors;

/// Destination for pixel writes.
///
/// `(0, 0)` is the top-left pixel. Implementations silently ignore
/// out-of-bounds coordinates.
pub trait PixelTarget {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn draw_pixel(&mut self, x: i32, y: i32, color: u32);
}

/// Owning ARGB8888 color buffer.
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    color_buffer: Vec<u32>,
    width: u32,
    height: u32,
}

impl FrameBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            color_buffer: vec![colors::BLACK; (width * height) as usize],
            width,
            height,
        }
    }

    pub fn clear(&mut self, color: u32) {
        self.color_buffer.fill(color);
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            Some((y as u32 * self.width + x as u32) as usize)
        } else {
            None
        }
    }

    /// Get the color at (x, y), or None if out of bounds.
    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<u32> {
        self.index(x, y).map(|i| self.color_buffer[i])
    }

    pub fn pixels(&self) -> &[u32] {
        &self.color_buffer
    }

    /// Converts the ARGB buffer into an RGBA image.
    pub fn to_image(&self) -> RgbaImage {
        ImageBuffer::from_fn(self.width, self.height, |x, y| {
            let (a, r, g, b) = colors::unpack(self.color_buffer[(y * self.width + x) as usize]);
            Rgba([r, g, b, a])
        })
    }

    /// Writes the buffer to disk; the format follows the file extension.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), image::ImageError> {
        self.to_image().save(path)
    }
}

impl PixelTarget for FrameBuffer {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn draw_pixel(&mut self, x: i32, y: i32, color: u32) {
        if let Some(i) = self.index(x, y) {
            self.color_buffer[i] = color;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_bounds_writes_are_ignored() {
        let mut fb = FrameBuffer::new(4, 3);
        fb.draw_pixel(-1, 0, colors::RED);
        fb.draw_pixel(4, 0, colors::RED);
        fb.draw_pixel(0, 3, colors::RED);
        assert!(fb.pixels().iter().all(|&c| c == colors::BLACK));
        assert_eq!(fb.get_pixel(4, 0), None);
    }

    #[test]
    fn image_conversion_reorders_channels() {
        let mut fb = FrameBuffer::new(2, 2);
        fb.draw_pixel(1, 0, 0x80112233);
        let image = fb.to_image();
        assert_eq!(image.get_pixel(1, 0), &Rgba([0x11, 0x22, 0x33, 0x80]));
        assert_eq!(image.get_pixel(0, 1), &Rgba([0, 0, 0, 0xFF]));
    }
}
