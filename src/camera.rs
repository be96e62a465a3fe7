//! Scene camera.
//!
//! # Coordinate System
//!
//! Camera space has the camera at the origin looking along +Z, with
//! X to the right and Y up. The camera's `orientation` maps camera-space
//! directions to world space and is expected to be orthonormal, so its
//! transpose is its inverse.
//!
//! The clip planes are expressed in camera space and together bound the
//! convex view volume.

use crate::clipper::Plane;
use crate::math::{Matrix, MatrixError, Vec3};
use crate::projection::Viewport;

#[derive(Debug, Clone)]
pub struct Camera {
    position: Vec3,
    orientation: Matrix,
    planes: Vec<Plane>,
}

impl Camera {
    pub fn new(position: Vec3, orientation: Matrix, planes: Vec<Plane>) -> Self {
        Self {
            position,
            orientation,
            planes,
        }
    }

    /// Camera clipped by the viewport's five-plane frustum, with the near
    /// plane on the projection plane.
    pub fn with_frustum(position: Vec3, orientation: Matrix, viewport: &Viewport) -> Self {
        Self::new(
            position,
            orientation,
            viewport.frustum_planes(viewport.projection_plane_z),
        )
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec3) -> &mut Self {
        self.position = position;
        self
    }

    pub fn orientation(&self) -> &Matrix {
        &self.orientation
    }

    pub fn set_orientation(&mut self, orientation: Matrix) -> &mut Self {
        self.orientation = orientation;
        self
    }

    /// Turns the camera around the world Y axis.
    pub fn rotate_y(&mut self, angle: f32) -> &mut Self {
        self.orientation = &Matrix::rotation_y(angle) * &self.orientation;
        self
    }

    pub fn planes(&self) -> &[Plane] {
        &self.planes
    }

    pub fn set_planes(&mut self, planes: Vec<Plane>) -> &mut Self {
        self.planes = planes;
        self
    }

    /// World-to-camera transform: `transpose(orientation) * translate(-position)`.
    pub fn view_matrix(&self) -> Result<Matrix, MatrixError> {
        self.orientation
            .transpose()
            .try_mul(&Matrix::translation(-self.position))
    }
}
