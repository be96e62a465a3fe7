//! Triangle clipping against convex plane sets.
//!
//! A mesh is clipped against each plane in sequence: plane 1, then the
//! *result* against plane 2, and so on. Each triangle is classified by the
//! signed distances of its vertices:
//!
//! | inside | result |
//! |--------|--------|
//! | 0 | discarded |
//! | 3 | passed through unchanged |
//! | 1 | one triangle: the inside vertex plus two edge intersections |
//! | 2 | two triangles fanned from the inside vertices and two intersections |
//!
//! Intersections lie at `t = d_in / (d_in - d_out)` along the
//! inside-to-outside edge and are appended to a shared [`ClipBuffer`].

mod clip;
mod mesh;
mod plane;

pub use clip::{clip_triangle, ClipBuffer};
pub use mesh::{transform_and_clip, ClippedMesh};
pub use plane::Plane;
