//! Placement of a model in the scene.
//!
//! An [`Instance`] borrows its [`Model`] and adds a world-space position, an
//! orientation matrix and a uniform scale. Mutators return `&mut Self` so
//! they can be chained:
//!
//! ```ignore
//! instance
//!     .set_position(Vec3::new(-1.5, 0.0, 7.0))
//!     .rotate_y(0.3)
//!     .set_scale(0.75);
//! ```

use crate::math::{Matrix, Vec3};
use crate::model::Model;

#[derive(Debug, Clone)]
pub struct Instance<'m> {
    model: &'m Model,
    position: Vec3,
    orientation: Matrix,
    scale: f32,
}

impl<'m> Instance<'m> {
    /// Places `model` at the origin with identity orientation and scale 1.
    pub fn new(model: &'m Model) -> Self {
        Self {
            model,
            position: Vec3::ZERO,
            orientation: Matrix::identity(4),
            scale: 1.0,
        }
    }

    pub fn model(&self) -> &'m Model {
        self.model
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

    /// Applies an extra rotation around the Y axis on top of the current orientation.
    pub fn rotate_y(&mut self, angle: f32) -> &mut Self {
        self.orientation = &Matrix::rotation_y(angle) * &self.orientation;
        self
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn set_scale(&mut self, scale: f32) -> &mut Self {
        self.scale = scale;
        self
    }

    /// Model-to-world transform: `translate(position) * orientation * scale(scale)`.
    ///
    /// Scale is applied first, then orientation, then translation. Fails if
    /// the orientation is not 4x4.
    pub fn model_matrix(&self) -> Result<Matrix, crate::math::MatrixError> {
        Matrix::translation(self.position)
            .try_mul(&self.orientation)?
            .try_mul(&Matrix::scaling(self.scale))
    }
}
