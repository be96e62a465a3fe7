use crate::math::Vec3;

/// A clipping plane given by a (near-)unit normal and a signed distance.
///
/// The inside half-space is `dot(normal, p) + distance > 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub normal: Vec3,
    pub distance: f32,
}

impl Plane {
    pub const fn new(normal: Vec3, distance: f32) -> Self {
        Self { normal, distance }
    }

    /// Returns the signed distance from a point to this plane.
    /// Positive = inside (same side as normal).
    #[inline]
    pub fn signed_distance(&self, point: Vec3) -> f32 {
        self.normal.dot(point) + self.distance
    }

    #[inline]
    pub fn contains(&self, point: Vec3) -> bool {
        self.signed_distance(point) > 0.0
    }
}
