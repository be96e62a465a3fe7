//! Light sources for the ray tracer.

use crate::math::Vec3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Light {
    /// Uniform light reaching every point regardless of geometry.
    Ambient { intensity: f32 },
    /// Light radiating from a position in world space.
    Point { intensity: f32, position: Vec3 },
    /// Parallel light; `direction` points from the surface toward the light.
    Directional { intensity: f32, direction: Vec3 },
}

impl Light {
    pub fn intensity(&self) -> f32 {
        match *self {
            Light::Ambient { intensity }
            | Light::Point { intensity, .. }
            | Light::Directional { intensity, .. } => intensity,
        }
    }

    /// Vector from `point` toward the light and the largest ray parameter
    /// along it that can still occlude the light.
    ///
    /// Returns `None` for ambient light, which has no direction.
    pub fn toward(&self, point: Vec3) -> Option<(Vec3, f32)> {
        match *self {
            Light::Ambient { .. } => None,
            // The light itself sits at t = 1
            Light::Point { position, .. } => Some((position - point, 1.0)),
            Light::Directional { direction, .. } => Some((direction, f32::INFINITY)),
        }
    }
}
