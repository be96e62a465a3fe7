//! Transform a whole model and clip it against a plane set.

use super::clip::{clip_triangle, ClipBuffer};
use super::plane::Plane;
use crate::math::{Matrix, Vec3, Vec4};
use crate::model::Model;
use crate::triangle::Triangle;

/// A model-shaped mesh produced by [`transform_and_clip`].
///
/// Vertices are in the target (camera) space: the transformed model
/// vertices first, followed by any vertices inserted by clipping.
#[derive(Debug, Clone, Default)]
pub struct ClippedMesh {
    pub vertices: Vec<Vec3>,
    pub triangles: Vec<Triangle>,
    /// Triangles rejected by the `keep` predicate before clipping.
    pub rejected: usize,
}

impl ClippedMesh {
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// The three vertex positions of a triangle of this mesh.
    pub fn corners(&self, triangle: &Triangle) -> [Vec3; 3] {
        triangle.indices.map(|i| self.vertices[i])
    }
}

/// Transforms every vertex of `model` by `transform`, then clips the mesh
/// against each plane in turn.
///
/// Triangles for which `keep` returns false (given their transformed
/// corners) are dropped before clipping. The model is never modified; the
/// result owns fresh vertex and triangle arrays.
pub fn transform_and_clip(
    model: &Model,
    transform: &Matrix,
    planes: &[Plane],
    keep: impl Fn(&[Vec3; 3]) -> bool,
) -> ClippedMesh {
    let vertices: Vec<Vec3> = model
        .vertices()
        .iter()
        .map(|&v| transform.mul_vec4(Vec4::from(v)).to_vec3())
        .collect();

    let mut triangles = Vec::with_capacity(model.triangles().len());
    let mut rejected = 0;
    for triangle in model.triangles() {
        let corners = triangle.indices.map(|i| vertices[i]);
        if keep(&corners) {
            triangles.push(*triangle);
        } else {
            rejected += 1;
        }
    }

    let mut buffer = ClipBuffer::for_mesh(vertices, triangles.len(), planes.len());
    let mut clipped = Vec::with_capacity(triangles.len());
    for plane in planes {
        clipped.clear();
        for triangle in &triangles {
            clip_triangle(triangle, plane, &mut buffer, &mut clipped);
        }
        std::mem::swap(&mut triangles, &mut clipped);
        if triangles.is_empty() {
            break;
        }
    }

    log::trace!(
        "clipped {} into {} triangles ({} vertices, {} rejected)",
        model.name(),
        triangles.len(),
        buffer.len(),
        rejected
    );

    ClippedMesh {
        vertices: buffer.into_vertices(),
        triangles,
        rejected,
    }
}
