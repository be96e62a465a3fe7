//! Dynamically sized, row-major matrix.
//!
//! # Convention
//! - Vectors are **column vectors** on the right: `M * v`
//! - Translation is stored in the **last column**
//! - Transforms chain **right-to-left**: `A * B * v` applies B first, then A
//!
//! The affine constructors ([`Matrix::translation`], [`Matrix::scaling`],
//! [`Matrix::rotation_y`], ...) always produce 4x4 matrices.
//!
//! # Degenerate products
//!
//! [`Matrix::try_mul`] reports a dimension mismatch as a [`MatrixError`].
//! The `*` operator keeps the sentinel contract instead: a mismatched
//! product yields an empty 0x0 matrix (see [`Matrix::is_empty`]) and logs a
//! warning. Transforming a vector by an empty matrix gives the zero vector.

use std::ops::{Add, Mul};

use approx::{AbsDiffEq, RelativeEq};
use thiserror::Error;

use super::vec3::Vec3;
use super::vec4::Vec4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MatrixError {
    #[error("dimension mismatch: {lhs:?} and {rhs:?}")]
    DimensionMismatch {
        lhs: (usize, usize),
        rhs: (usize, usize),
    },
    #[error("expected {expected} elements for the requested shape, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f32>,
}

impl Matrix {
    /// The 0x0 matrix returned by degenerate operations.
    pub const fn empty() -> Self {
        Self {
            rows: 0,
            cols: 0,
            data: Vec::new(),
        }
    }

    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    pub fn ones(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![1.0; rows * cols],
        }
    }

    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m.set(i, i, 1.0);
        }
        m
    }

    pub fn diag(values: &[f32]) -> Self {
        let mut m = Self::zeros(values.len(), values.len());
        for (i, &v) in values.iter().enumerate() {
            m.set(i, i, v);
        }
        m
    }

    /// Builds a matrix from row-major data.
    pub fn from_slice(rows: usize, cols: usize, data: &[f32]) -> Result<Self, MatrixError> {
        if data.len() != rows * cols {
            return Err(MatrixError::LengthMismatch {
                expected: rows * cols,
                actual: data.len(),
            });
        }
        Ok(Self {
            rows,
            cols,
            data: data.to_vec(),
        })
    }

    pub fn from_rows<const C: usize>(rows: &[[f32; C]]) -> Self {
        Self {
            rows: rows.len(),
            cols: C,
            data: rows.iter().flatten().copied().collect(),
        }
    }

    /// Creates a translation matrix.
    pub fn translation(offset: Vec3) -> Self {
        Self::from_rows(&[
            [1.0, 0.0, 0.0, offset.x],
            [0.0, 1.0, 0.0, offset.y],
            [0.0, 0.0, 1.0, offset.z],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a uniform scale matrix.
    pub fn scaling(factor: f32) -> Self {
        Self::diag(&[factor, factor, factor, 1.0])
    }

    /// Creates a rotation matrix around the X axis.
    pub fn rotation_x(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self::from_rows(&[
            [1.0, 0.0, 0.0, 0.0],
            [0.0, c, s, 0.0],
            [0.0, -s, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a rotation matrix around the Y axis.
    pub fn rotation_y(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self::from_rows(&[
            [c, 0.0, -s, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [s, 0.0, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a rotation matrix around the Z axis.
    pub fn rotation_z(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self::from_rows(&[
            [c, s, 0.0, 0.0],
            [-s, c, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// True for the 0x0 sentinel.
    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    /// Access element at [row][col].
    ///
    /// # Panics
    /// Panics if the position is outside the matrix.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        assert!(row < self.rows && col < self.cols, "matrix index out of range");
        self.data[row * self.cols + col]
    }

    /// Set element at [row][col].
    ///
    /// # Panics
    /// Panics if the position is outside the matrix.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f32) {
        assert!(row < self.rows && col < self.cols, "matrix index out of range");
        self.data[row * self.cols + col] = value;
    }

    pub fn transpose(&self) -> Self {
        let mut result = Self::zeros(self.cols, self.rows);
        for i in 0..self.rows {
            for j in 0..self.cols {
                result.set(j, i, self.get(i, j));
            }
        }
        result
    }

    pub fn try_add(&self, rhs: &Matrix) -> Result<Matrix, MatrixError> {
        if self.rows != rhs.rows || self.cols != rhs.cols {
            return Err(self.mismatch(rhs));
        }
        Ok(Self {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().zip(&rhs.data).map(|(a, b)| a + b).collect(),
        })
    }

    /// Matrix product, failing when `self.cols != rhs.rows`.
    pub fn try_mul(&self, rhs: &Matrix) -> Result<Matrix, MatrixError> {
        if self.cols != rhs.rows {
            return Err(self.mismatch(rhs));
        }
        let mut result = Self::zeros(self.rows, rhs.cols);
        for i in 0..self.rows {
            for j in 0..rhs.cols {
                let sum = (0..self.cols).map(|k| self.get(i, k) * rhs.get(k, j)).sum();
                result.set(i, j, sum);
            }
        }
        Ok(result)
    }

    /// Applies the top-left 3x3 block only (no translation). Used for directions.
    ///
    /// Returns the zero vector when the matrix is smaller than 3x3.
    pub fn mul_vec3(&self, v: Vec3) -> Vec3 {
        if self.rows < 3 || self.cols < 3 {
            return Vec3::ZERO;
        }
        let row = |r: usize| self.get(r, 0) * v.x + self.get(r, 1) * v.y + self.get(r, 2) * v.z;
        Vec3::new(row(0), row(1), row(2))
    }

    /// Full 4x4 homogeneous transform. Used for positions with `w = 1`.
    ///
    /// Returns the zero vector when the matrix is not 4x4.
    pub fn mul_vec4(&self, v: Vec4) -> Vec4 {
        if self.rows != 4 || self.cols != 4 {
            return Vec4::ZERO;
        }
        let row = |r: usize| {
            self.get(r, 0) * v.x + self.get(r, 1) * v.y + self.get(r, 2) * v.z + self.get(r, 3) * v.w
        };
        Vec4::new(row(0), row(1), row(2), row(3))
    }

    fn mismatch(&self, rhs: &Matrix) -> MatrixError {
        MatrixError::DimensionMismatch {
            lhs: (self.rows, self.cols),
            rhs: (rhs.rows, rhs.cols),
        }
    }
}

impl Mul<&Matrix> for &Matrix {
    type Output = Matrix;

    fn mul(self, rhs: &Matrix) -> Matrix {
        self.try_mul(rhs).unwrap_or_else(|err| {
            log::warn!("degenerate matrix product: {err}");
            Matrix::empty()
        })
    }
}

impl Mul<Matrix> for Matrix {
    type Output = Matrix;

    fn mul(self, rhs: Matrix) -> Matrix {
        &self * &rhs
    }
}

impl Add<&Matrix> for &Matrix {
    type Output = Matrix;

    fn add(self, rhs: &Matrix) -> Matrix {
        self.try_add(rhs).unwrap_or_else(|err| {
            log::warn!("degenerate matrix sum: {err}");
            Matrix::empty()
        })
    }
}

impl AbsDiffEq for Matrix {
    type Epsilon = f32;

    fn default_epsilon() -> f32 {
        f32::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.rows == other.rows
            && self.cols == other.cols
            && self
                .data
                .iter()
                .zip(&other.data)
                .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl RelativeEq for Matrix {
    fn default_max_relative() -> f32 {
        f32::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f32, max_relative: f32) -> bool {
        self.rows == other.rows
            && self.cols == other.cols
            && self
                .data
                .iter()
                .zip(&other.data)
                .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
    }
}
