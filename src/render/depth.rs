//! Inverse-depth buffer.
//!
//! Stores the largest `1/z` seen at each pixel (larger = closer). It is
//! sized lazily to the output resolution and reset to `-inf` at the start
//! of every depth-tested frame.

#[derive(Debug, Default)]
pub struct DepthBuffer {
    data: Vec<f32>,
    width: u32,
    height: u32,
}

impl DepthBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Reallocates if the resolution changed, then resets every entry.
    pub fn prepare(&mut self, width: u32, height: u32) {
        if width != self.width || height != self.height {
            log::debug!("resizing depth buffer to {width}x{height}");
            self.width = width;
            self.height = height;
            self.data = vec![f32::NEG_INFINITY; (width * height) as usize];
        } else {
            self.reset();
        }
    }

    pub fn reset(&mut self) {
        self.data.fill(f32::NEG_INFINITY);
    }

    /// Stored value at a screen pixel, or None if out of bounds.
    pub fn get(&self, x: i32, y: i32) -> Option<f32> {
        self.index(x, y).map(|i| self.data[i])
    }

    /// Records `inv_z` if it is strictly closer than the stored value.
    ///
    /// Returns true when the pixel should be drawn. Out-of-bounds pixels
    /// always fail.
    #[inline]
    pub fn test_and_set(&mut self, x: i32, y: i32, inv_z: f32) -> bool {
        match self.index(x, y) {
            Some(i) if inv_z > self.data[i] => {
                self.data[i] = inv_z;
                true
            }
            _ => false,
        }
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            Some((y as u32 * self.width + x as u32) as usize)
        } else {
            None
        }
    }
}
