//! Centered canvas coordinates.
//!
//! The rasterizer works with the origin at the middle of the canvas and y
//! pointing up. [`Canvas`] maps those coordinates onto a [`PixelTarget`]:
//! canvas `(x, y)` lands on pixel `(w/2 + x, h/2 - y - 1)`.

use super::framebuffer::PixelTarget;

pub struct Canvas<'a> {
    target: &'a mut dyn PixelTarget,
    half_width: i32,
    half_height: i32,
}

impl<'a> Canvas<'a> {
    pub fn new(target: &'a mut dyn PixelTarget) -> Self {
        let half_width = target.width() as i32 / 2;
        let half_height = target.height() as i32 / 2;
        Self {
            target,
            half_width,
            half_height,
        }
    }

    pub fn width(&self) -> u32 {
        self.target.width()
    }

    pub fn height(&self) -> u32 {
        self.target.height()
    }

    /// Translates a canvas position to the target's corner-origin pixel.
    #[inline]
    pub fn to_screen(&self, x: i32, y: i32) -> (i32, i32) {
        (self.half_width + x, self.half_height - y - 1)
    }

    #[inline]
    pub fn put_pixel(&mut self, x: i32, y: i32, color: u32) {
        let (sx, sy) = self.to_screen(x, y);
        self.target.draw_pixel(sx, sy, color);
    }

    /// Writes a pixel already expressed in screen coordinates.
    #[inline]
    pub(crate) fn put_screen_pixel(&mut self, sx: i32, sy: i32, color: u32) {
        self.target.draw_pixel(sx, sy, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors;
    use crate::render::FrameBuffer;

    #[test]
    fn origin_maps_to_center() {
        let mut fb = FrameBuffer::new(10, 8);
        let mut canvas = Canvas::new(&mut fb);
        assert_eq!(canvas.to_screen(0, 0), (5, 3));
        canvas.put_pixel(-5, 3, colors::RED);
        canvas.put_pixel(4, -4, colors::BLUE);
        assert_eq!(fb.get_pixel(0, 0), Some(colors::RED));
        assert_eq!(fb.get_pixel(9, 7), Some(colors::BLUE));
    }
}
