//! Linear algebra primitives: fixed-size vectors and a dynamically sized matrix.

pub mod matrix;
pub mod vec2;
pub mod vec3;
pub mod vec4;

pub use matrix::{Matrix, MatrixError};
pub use vec2::Vec2;
pub use vec3::Vec3;
pub use vec4::Vec4;
