//! Perspective projection parameters.
//!
//! The [`Viewport`] is the single source of truth for the projection: a
//! square window of side `size` placed at distance `projection_plane_z` in
//! front of the camera. It maps camera-space points onto the canvas and
//! derives the matching frustum planes for clipping.

use serde::{Deserialize, Serialize};

use crate::clipper::Plane;
use crate::math::{Vec2, Vec3};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Viewport {
    /// Side length of the square viewport in world units.
    pub size: f32,
    /// Distance from the camera to the projection plane.
    pub projection_plane_z: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            size: 1.0,
            projection_plane_z: 1.0,
        }
    }
}

impl Viewport {
    pub fn new(size: f32, projection_plane_z: f32) -> Self {
        Self {
            size,
            projection_plane_z,
        }
    }

    /// Full field of view in radians (identical horizontally and vertically).
    pub fn fov(&self) -> f32 {
        2.0 * (self.size / 2.0 / self.projection_plane_z).atan()
    }

    /// Builds the five frustum planes (near, left, right, bottom, top).
    ///
    /// There is no far plane. The side planes pass through the camera and
    /// their normals point into the visible volume.
    pub fn frustum_planes(&self, near: f32) -> Vec<Plane> {
        let slope = self.size / 2.0 / self.projection_plane_z;
        vec![
            Plane::new(Vec3::FORWARD, -near),
            Plane::new(Vec3::new(1.0, 0.0, slope).normalize(), 0.0),
            Plane::new(Vec3::new(-1.0, 0.0, slope).normalize(), 0.0),
            Plane::new(Vec3::new(0.0, 1.0, slope).normalize(), 0.0),
            Plane::new(Vec3::new(0.0, -1.0, slope).normalize(), 0.0),
        ]
    }
}

/// Maps viewport units to canvas units, truncating to whole pixels.
pub fn viewport_to_canvas(p: Vec2, canvas_width: u32, canvas_height: u32, viewport_size: f32) -> Vec2 {
    Vec2::new(
        p.x * canvas_width as f32 / viewport_size,
        p.y * canvas_height as f32 / viewport_size,
    )
    .trunc()
}

/// Perspective-projects a camera-space point onto the canvas.
///
/// The caller guarantees `v.z` is bounded away from zero; the near plane
/// clip is what normally ensures it.
pub fn project_vertex(v: Vec3, canvas_width: u32, canvas_height: u32, viewport: &Viewport) -> Vec2 {
    let d = viewport.projection_plane_z;
    let projected = Vec2::new(v.x * d / v.z, v.y * d / v.z);
    viewport_to_canvas(projected, canvas_width, canvas_height, viewport.size)
}
