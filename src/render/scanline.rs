//! Scanline rasterization primitives.
//!
//! Every routine here is built on [`interpolate`]: a dense, linear sequence
//! of values for each integer step between two positions.
//!
//! # Triangle fill
//!
//! All triangle variants share one algorithm:
//!
//! 1. **Sort vertices** by height so that `y0 <= y1 <= y2`
//! 2. **Interpolate edges**: x (and any attribute) along the long edge
//!    `v0 -> v2` and along the two short edges `v0 -> v1`, `v1 -> v2`
//! 3. **Merge** the short edges, dropping the duplicated sample at `y1`
//! 4. **Pick sides**: whichever sequence has the smaller x at the middle
//!    row is the left edge
//! 5. **Fill** each row from the left x to the right x
//!
//! ```text
//!        v0
//!        /|
//!  x012 / | x02
//!      /  |
//!   v1 \  |
//!       \ |
//!        \|
//!        v2
//! ```
//!
//! The variants differ only in what is interpolated across a row
//! (nothing, vertex brightness, or inverse depth) and in the per-pixel
//! policy applied before writing.
//!
//! All coordinates are centered canvas coordinates (see [`Canvas`]).

use super::canvas::Canvas;
use super::depth::DepthBuffer;
use crate::colors;
use crate::math::Vec2;

/// Longest sequence [`interpolate`] will produce.
///
/// Rows and edges longer than this are a caller error (for example an
/// unclipped vertex projected near infinity). Such spans produce an empty
/// sequence and the primitive using them draws nothing.
pub const MAX_INTERPOLATION_SPAN: usize = 16_384;

/// Values of a linear function sampled at every integer from `i0` to `i1`
/// inclusive, starting at `d0` and ending at `d1`.
///
/// `i0 == i1` yields the single value `d0`.
pub fn interpolate(i0: i32, d0: f32, i1: i32, d1: f32) -> Vec<f32> {
    if i0 == i1 {
        return vec![d0];
    }

    let steps = i0.abs_diff(i1) as usize;
    if steps >= MAX_INTERPOLATION_SPAN {
        log::warn!("interpolation span of {} steps exceeds the cap", steps + 1);
        return Vec::new();
    }

    let slope = (d1 - d0) / steps as f32;
    (0..=steps).map(|k| d0 + slope * k as f32).collect()
}

/// [`interpolate`] over integer values, rounded to the nearest integer.
pub fn interpolate_i32(i0: i32, d0: i32, i1: i32, d1: i32) -> Vec<i32> {
    interpolate(i0, d0 as f32, i1, d1 as f32)
        .into_iter()
        .map(|d| (d + 0.5).floor() as i32)
        .collect()
}

/// Draws a line by walking the major axis one pixel at a time.
pub fn draw_line(canvas: &mut Canvas, p0: Vec2, p1: Vec2, color: u32) {
    let (mut x0, mut y0) = (p0.x as i32, p0.y as i32);
    let (mut x1, mut y1) = (p1.x as i32, p1.y as i32);

    if (x1 - x0).abs() > (y1 - y0).abs() {
        // Horizontal-ish: step along x
        if x0 > x1 {
            std::mem::swap(&mut x0, &mut x1);
            std::mem::swap(&mut y0, &mut y1);
        }
        let ys = interpolate_i32(x0, y0, x1, y1);
        for (x, y) in (x0..=x1).zip(ys) {
            canvas.put_pixel(x, y, color);
        }
    } else {
        // Vertical-ish: step along y
        if y0 > y1 {
            std::mem::swap(&mut x0, &mut x1);
            std::mem::swap(&mut y0, &mut y1);
        }
        let xs = interpolate_i32(y0, x0, y1, x1);
        for (y, x) in (y0..=y1).zip(xs) {
            canvas.put_pixel(x, y, color);
        }
    }
}

pub fn draw_wireframe_triangle(canvas: &mut Canvas, p0: Vec2, p1: Vec2, p2: Vec2, color: u32) {
    draw_line(canvas, p0, p1, color);
    draw_line(canvas, p1, p2, color);
    draw_line(canvas, p0, p2, color);
}

/// Fills a triangle with a single color. Returns the number of pixels drawn.
pub fn draw_filled_triangle(canvas: &mut Canvas, p0: Vec2, p1: Vec2, p2: Vec2, color: u32) -> usize {
    let Some(spans) = TriangleSpans::new([p0, p1, p2], [0.0; 3]) else {
        return 0;
    };

    let mut drawn = 0;
    for (y, x_left, x_right, _, _) in spans.rows() {
        for x in x_left..=x_right {
            canvas.put_pixel(x, y, color);
            drawn += 1;
        }
    }
    drawn
}

/// Fills a triangle whose brightness varies linearly between its vertices.
///
/// `brightness` holds one value per point; each pixel gets `color` scaled
/// by the interpolated brightness clamped to `[0, 1]`.
pub fn draw_shaded_triangle(
    canvas: &mut Canvas,
    points: [Vec2; 3],
    brightness: [f32; 3],
    color: u32,
) -> usize {
    let Some(spans) = TriangleSpans::new(points, brightness) else {
        return 0;
    };

    let mut drawn = 0;
    for (y, x_left, x_right, h_left, h_right) in spans.rows() {
        let hs = interpolate(x_left, h_left, x_right, h_right);
        for (x, h) in (x_left..=x_right).zip(hs) {
            canvas.put_pixel(x, y, colors::shade(color, h));
            drawn += 1;
        }
    }
    drawn
}

/// Fills a triangle, interpolating `1/z` across it.
///
/// With a depth buffer, a pixel is written only when its `1/z` is strictly
/// greater than the stored one, and the buffer is updated. Without one,
/// every covered pixel is written.
pub fn draw_depth_tested_triangle(
    canvas: &mut Canvas,
    mut depth: Option<&mut DepthBuffer>,
    points: [Vec2; 3],
    inv_z: [f32; 3],
    color: u32,
) -> usize {
    let Some(spans) = TriangleSpans::new(points, inv_z) else {
        return 0;
    };

    let mut drawn = 0;
    for (y, x_left, x_right, z_left, z_right) in spans.rows() {
        let zs = interpolate(x_left, z_left, x_right, z_right);
        for (x, z) in (x_left..=x_right).zip(zs) {
            let (sx, sy) = canvas.to_screen(x, y);
            let visible = match depth.as_deref_mut() {
                Some(buffer) => buffer.test_and_set(sx, sy, z),
                None => true,
            };
            if visible {
                canvas.put_screen_pixel(sx, sy, color);
                drawn += 1;
            }
        }
    }
    drawn
}

/// Left and right x, plus one attribute, for every row of a triangle.
struct TriangleSpans {
    y_top: i32,
    x_left: Vec<i32>,
    x_right: Vec<i32>,
    attr_left: Vec<f32>,
    attr_right: Vec<f32>,
}

impl TriangleSpans {
    fn new(points: [Vec2; 3], attrs: [f32; 3]) -> Option<Self> {
        let mut v: [(i32, i32, f32); 3] = [0, 1, 2].map(|i| (points[i].x as i32, points[i].y as i32, attrs[i]));
        v.sort_by_key(|&(_, y, _)| y);
        let [(x0, y0, a0), (x1, y1, a1), (x2, y2, a2)] = v;

        let x02 = interpolate_i32(y0, x0, y2, x2);
        let x012 = merge_short_edges(interpolate_i32(y0, x0, y1, x1), interpolate_i32(y1, x1, y2, x2));
        let a02 = interpolate(y0, a0, y2, a2);
        let a012 = merge_short_edges(interpolate(y0, a0, y1, a1), interpolate(y1, a1, y2, a2));

        let rows = x02.len();
        if rows == 0 || x012.len() != rows || a02.len() != rows || a012.len() != rows {
            return None;
        }

        let m = rows / 2;
        let (x_left, x_right, attr_left, attr_right) = if x02[m] < x012[m] {
            (x02, x012, a02, a012)
        } else {
            (x012, x02, a012, a02)
        };

        Some(Self {
            y_top: y0,
            x_left,
            x_right,
            attr_left,
            attr_right,
        })
    }

    /// Yields `(y, x_left, x_right, attr_left, attr_right)` per row.
    fn rows(&self) -> impl Iterator<Item = (i32, i32, i32, f32, f32)> + '_ {
        (0..self.x_left.len()).map(move |i| {
            (
                self.y_top + i as i32,
                self.x_left[i],
                self.x_right[i],
                self.attr_left[i],
                self.attr_right[i],
            )
        })
    }
}

/// Joins `v0 -> v1` and `v1 -> v2`, dropping the sample shared at `v1`.
fn merge_short_edges<T>(mut first: Vec<T>, second: Vec<T>) -> Vec<T> {
    first.pop();
    first.extend(second);
    first
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{FrameBuffer, PixelTarget};
    use approx::assert_relative_eq;

    fn count(fb: &FrameBuffer, color: u32) -> usize {
        fb.pixels().iter().filter(|&&c| c == color).count()
    }

    #[test]
    fn interpolate_single_step() {
        assert_eq!(interpolate(3, 7.5, 3, 100.0), vec![7.5]);
        assert_eq!(interpolate_i32(3, 7, 3, 100), vec![7]);
    }

    #[test]
    fn interpolate_is_linear() {
        assert_eq!(interpolate(0, 0.0, 4, 8.0), vec![0.0, 2.0, 4.0, 6.0, 8.0]);
        assert_eq!(interpolate_i32(0, 0, 4, 8), vec![0, 2, 4, 6, 8]);
    }

    #[test]
    fn interpolate_rounds_to_nearest() {
        assert_eq!(interpolate_i32(0, 0, 3, 1), vec![0, 0, 1, 1]);
        assert_eq!(interpolate_i32(0, 0, 3, -1), vec![0, 0, -1, -1]);
    }

    #[test]
    fn interpolate_reaches_end_in_reverse() {
        let values = interpolate(4, 1.0, 0, 0.0);
        assert_eq!(values.len(), 5);
        assert_relative_eq!(values[4], 0.0);
    }

    #[test]
    fn oversized_span_is_empty() {
        assert!(interpolate(0, 0.0, MAX_INTERPOLATION_SPAN as i32, 1.0).is_empty());
    }

    #[test]
    fn horizontal_line_covers_every_column() {
        let mut fb = FrameBuffer::new(20, 20);
        let mut canvas = Canvas::new(&mut fb);
        draw_line(&mut canvas, Vec2::new(5.0, 0.0), Vec2::new(-5.0, 2.0), colors::RED);
        assert_eq!(count(&fb, colors::RED), 11);
        assert_eq!(fb.get_pixel(0, 9), Some(colors::BLACK));
        // canvas (-5, 2) -> screen (5, 7)
        assert_eq!(fb.get_pixel(5, 7), Some(colors::RED));
    }

    #[test]
    fn steep_line_covers_every_row() {
        let mut fb = FrameBuffer::new(20, 20);
        let mut canvas = Canvas::new(&mut fb);
        draw_line(&mut canvas, Vec2::new(0.0, -6.0), Vec2::new(1.0, 6.0), colors::GREEN);
        assert_eq!(count(&fb, colors::GREEN), 13);
    }

    #[test]
    fn filled_right_triangle_pixel_count() {
        let mut fb = FrameBuffer::new(20, 20);
        let mut canvas = Canvas::new(&mut fb);
        let drawn = draw_filled_triangle(
            &mut canvas,
            Vec2::new(0.0, 0.0),
            Vec2::new(4.0, 0.0),
            Vec2::new(0.0, 4.0),
            colors::BLUE,
        );
        // Rows of width 5, 4, 3, 2, 1
        assert_eq!(drawn, 15);
        assert_eq!(count(&fb, colors::BLUE), 15);
    }

    #[test]
    fn fill_is_independent_of_vertex_order() {
        let points = [Vec2::new(-3.0, -2.0), Vec2::new(5.0, 1.0), Vec2::new(0.0, 6.0)];
        let mut reference = None;
        for order in [[0, 1, 2], [2, 1, 0], [1, 0, 2], [1, 2, 0]] {
            let mut fb = FrameBuffer::new(20, 20);
            let mut canvas = Canvas::new(&mut fb);
            draw_filled_triangle(
                &mut canvas,
                points[order[0]],
                points[order[1]],
                points[order[2]],
                colors::CYAN,
            );
            let pixels = fb.pixels().to_vec();
            match &reference {
                None => reference = Some(pixels),
                Some(expected) => assert_eq!(&pixels, expected),
            }
        }
    }

    #[test]
    fn wireframe_leaves_interior_empty() {
        let mut fb = FrameBuffer::new(30, 30);
        let mut canvas = Canvas::new(&mut fb);
        draw_wireframe_triangle(
            &mut canvas,
            Vec2::new(-10.0, -10.0),
            Vec2::new(10.0, -10.0),
            Vec2::new(0.0, 10.0),
            colors::WHITE,
        );
        let (sx, sy) = (15, 15 - 0 - 1);
        assert_eq!(fb.get_pixel(sx, sy), Some(colors::BLACK));
        assert!(count(&fb, colors::WHITE) > 40);
    }

    #[test]
    fn shaded_triangle_interpolates_brightness() {
        let mut fb = FrameBuffer::new(20, 20);
        let mut canvas = Canvas::new(&mut fb);
        draw_shaded_triangle(
            &mut canvas,
            [Vec2::new(0.0, 0.0), Vec2::new(8.0, 0.0), Vec2::new(0.0, 8.0)],
            [0.0, 1.0, 0.0],
            0xFFC80000,
        );
        let start = fb.get_pixel(10, 9).unwrap();
        let end = fb.get_pixel(18, 9).unwrap();
        assert_eq!(start, 0xFF000000);
        assert_eq!(end, 0xFFC80000);
        let (_, mid_red, _, _) = colors::unpack(fb.get_pixel(14, 9).unwrap());
        assert!(mid_red > 0 && mid_red < 0xC8);
    }

    #[test]
    fn depth_test_keeps_nearest_regardless_of_order() {
        let near = [Vec2::new(-5.0, -5.0), Vec2::new(5.0, -5.0), Vec2::new(0.0, 5.0)];
        let far = [Vec2::new(-6.0, -6.0), Vec2::new(6.0, -6.0), Vec2::new(0.0, 6.0)];

        for near_first in [true, false] {
            let mut fb = FrameBuffer::new(20, 20);
            let mut depth = DepthBuffer::new();
            depth.prepare(fb.width(), fb.height());
            let mut canvas = Canvas::new(&mut fb);

            let mut draw = |points, inv_z, color| {
                draw_depth_tested_triangle(&mut canvas, Some(&mut depth), points, [inv_z; 3], color);
            };
            if near_first {
                draw(near, 0.5, colors::RED);
                draw(far, 0.25, colors::BLUE);
            } else {
                draw(far, 0.25, colors::BLUE);
                draw(near, 0.5, colors::RED);
            }

            // canvas (0, 0) is covered by both
            assert_eq!(fb.get_pixel(10, 9), Some(colors::RED));
        }
    }

    #[test]
    fn without_depth_buffer_last_triangle_wins() {
        let near = [Vec2::new(-5.0, -5.0), Vec2::new(5.0, -5.0), Vec2::new(0.0, 5.0)];
        let far = [Vec2::new(-6.0, -6.0), Vec2::new(6.0, -6.0), Vec2::new(0.0, 6.0)];
        let mut fb = FrameBuffer::new(20, 20);
        let mut canvas = Canvas::new(&mut fb);
        draw_depth_tested_triangle(&mut canvas, None, near, [0.5; 3], colors::RED);
        draw_depth_tested_triangle(&mut canvas, None, far, [0.25; 3], colors::BLUE);
        assert_eq!(fb.get_pixel(10, 9), Some(colors::BLUE));
    }
}
