//! Triangle-against-plane clipping.

use super::plane::Plane;
use crate::math::Vec3;
use crate::triangle::Triangle;

/// Growable vertex storage shared by every triangle of one clipped mesh.
///
/// Clip-inserted vertices are appended here and referenced by index. The
/// buffer has a hard vertex limit; once it is reached further clips that
/// need new vertices are dropped instead of growing the buffer.
#[derive(Debug, Clone)]
pub struct ClipBuffer {
    vertices: Vec<Vec3>,
    limit: usize,
}

impl ClipBuffer {
    /// Creates a buffer holding `vertices` that may grow up to `limit` entries.
    pub fn new(vertices: Vec<Vec3>, limit: usize) -> Self {
        Self { vertices, limit }
    }

    /// Sizes the limit for a mesh of `triangle_count` triangles clipped
    /// against `plane_count` planes.
    ///
    /// Against convex planes a triangle splits into at most `k + 1` pieces
    /// after `k` planes, each adding at most two vertices per plane, so
    /// `plane_count * (plane_count + 1)` new vertices per input triangle is
    /// never exceeded.
    pub fn for_mesh(vertices: Vec<Vec3>, triangle_count: usize, plane_count: usize) -> Self {
        let limit = vertices.len() + triangle_count * plane_count * (plane_count + 1);
        Self::new(vertices, limit)
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Number of vertices that can still be appended.
    pub fn remaining(&self) -> usize {
        self.limit.saturating_sub(self.vertices.len())
    }

    pub fn into_vertices(self) -> Vec<Vec3> {
        self.vertices
    }

    #[inline]
    fn vertex(&self, index: usize) -> Vec3 {
        self.vertices[index]
    }

    fn push(&mut self, vertex: Vec3) -> usize {
        self.vertices.push(vertex);
        self.vertices.len() - 1
    }

    /// Appends the point where edge `inside -> outside` crosses the plane.
    fn push_intersection(&mut self, inside: (usize, f32), outside: (usize, f32)) -> usize {
        let (a, d_in) = inside;
        let (b, d_out) = outside;
        let t = d_in / (d_in - d_out);
        let point = self.vertex(a).lerp(self.vertex(b), t);
        self.push(point)
    }
}

/// Clips one triangle against one plane, pushing the surviving pieces to `out`.
///
/// Returns how many triangles were emitted:
/// - 0 when every vertex is outside, or when the buffer is exhausted
/// - 1 unchanged when every vertex is inside
/// - 1 new triangle when one vertex is inside
/// - 2 new triangles when two vertices are inside
///
/// Emitted triangles keep the input's color and winding.
pub fn clip_triangle(
    triangle: &Triangle,
    plane: &Plane,
    buffer: &mut ClipBuffer,
    out: &mut Vec<Triangle>,
) -> usize {
    let idx = triangle.indices;
    let d = idx.map(|i| plane.signed_distance(buffer.vertex(i)));
    let inside = d.map(|d| d > 0.0);

    let inside_count = inside.iter().filter(|&&b| b).count();
    match inside_count {
        0 => 0,
        3 => {
            out.push(*triangle);
            1
        }
        _ if buffer.remaining() < 2 => {
            log::warn!("clip buffer exhausted, dropping triangle {idx:?}");
            0
        }
        1 => {
            // Rotate so the lone inside vertex comes first; winding is kept.
            let k = inside.iter().position(|&b| b).unwrap_or(0);
            let (a, b, c) = (k, (k + 1) % 3, (k + 2) % 3);
            let ab = buffer.push_intersection((idx[a], d[a]), (idx[b], d[b]));
            let ac = buffer.push_intersection((idx[a], d[a]), (idx[c], d[c]));
            out.push(Triangle::new(idx[a], ab, ac, triangle.color));
            1
        }
        _ => {
            // Rotate so the lone outside vertex comes first.
            let k = inside.iter().position(|&b| !b).unwrap_or(0);
            let (o, a, b) = (k, (k + 1) % 3, (k + 2) % 3);
            let bo = buffer.push_intersection((idx[b], d[b]), (idx[o], d[o]));
            let ao = buffer.push_intersection((idx[a], d[a]), (idx[o], d[o]));
            out.push(Triangle::new(idx[a], idx[b], bo, triangle.color));
            out.push(Triangle::new(idx[a], bo, ao, triangle.color));
            2
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors;
    use approx::assert_abs_diff_eq;

    fn near_plane() -> Plane {
        Plane::new(Vec3::FORWARD, -1.0)
    }

    fn normal(buffer: &ClipBuffer, t: &Triangle) -> Vec3 {
        let [a, b, c] = t.indices.map(|i| buffer.vertices()[i]);
        (b - a).cross(c - a)
    }

    fn setup(points: [Vec3; 3]) -> (ClipBuffer, Triangle) {
        let buffer = ClipBuffer::for_mesh(points.to_vec(), 1, 1);
        (buffer, Triangle::new(0, 1, 2, colors::GREEN))
    }

    #[test]
    fn fully_inside_passes_through() {
        let (mut buffer, tri) = setup([
            Vec3::new(0.0, 0.0, 2.0),
            Vec3::new(1.0, 0.0, 3.0),
            Vec3::new(0.0, 1.0, 4.0),
        ]);
        let mut out = Vec::new();
        assert_eq!(clip_triangle(&tri, &near_plane(), &mut buffer, &mut out), 1);
        assert_eq!(out, vec![tri]);
        assert_eq!(buffer.len(), 3);
    }

    #[test]
    fn fully_outside_is_discarded() {
        let (mut buffer, tri) = setup([
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(1.0, 0.0, 0.5),
            Vec3::new(0.0, 1.0, -4.0),
        ]);
        let mut out = Vec::new();
        assert_eq!(clip_triangle(&tri, &near_plane(), &mut buffer, &mut out), 0);
        assert!(out.is_empty());
    }

    #[test]
    fn one_inside_yields_one_triangle() {
        let (mut buffer, tri) = setup([
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 3.0),
            Vec3::new(2.0, 0.0, 0.0),
        ]);
        let mut out = Vec::new();
        assert_eq!(clip_triangle(&tri, &near_plane(), &mut buffer, &mut out), 1);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].indices[0], 1);
        assert_eq!(out[0].color, colors::GREEN);
        assert_eq!(buffer.len(), 5);

        for &i in &out[0].indices[1..] {
            assert_abs_diff_eq!(buffer.vertices()[i].z, 1.0, epsilon = 1e-6);
        }
        assert!(normal(&buffer, &out[0]).dot(normal(&buffer, &tri)) > 0.0);
    }

    #[test]
    fn two_inside_yields_two_triangles() {
        let (mut buffer, tri) = setup([
            Vec3::new(0.0, 0.0, 3.0),
            Vec3::new(0.0, 2.0, 0.0),
            Vec3::new(2.0, 0.0, 3.0),
        ]);
        let mut out = Vec::new();
        assert_eq!(clip_triangle(&tri, &near_plane(), &mut buffer, &mut out), 2);
        assert_eq!(out.len(), 2);
        assert_eq!(buffer.len(), 5);

        let original = normal(&buffer, &tri);
        for piece in &out {
            assert!(piece.indices.iter().all(|&i| near_plane().signed_distance(buffer.vertices()[i]) > -1e-6));
            assert!(normal(&buffer, piece).dot(original) > 0.0);
        }
        assert!(out.iter().any(|t| t.indices.contains(&0)));
        assert!(out.iter().any(|t| t.indices.contains(&2)));
    }

    #[test]
    fn exhausted_buffer_drops_the_clip() {
        let points = vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 3.0),
            Vec3::new(2.0, 0.0, 0.0),
        ];
        let mut buffer = ClipBuffer::new(points, 4);
        let mut out = Vec::new();
        let tri = Triangle::new(0, 1, 2, colors::RED);
        assert_eq!(clip_triangle(&tri, &near_plane(), &mut buffer, &mut out), 0);
        assert!(out.is_empty());
        assert_eq!(buffer.len(), 3);
    }

    #[test]
    fn exhausted_buffer_still_passes_whole_triangles() {
        let points = vec![
            Vec3::new(0.0, 0.0, 2.0),
            Vec3::new(0.0, 1.0, 3.0),
            Vec3::new(2.0, 0.0, 2.0),
        ];
        let mut buffer = ClipBuffer::new(points, 3);
        let mut out = Vec::new();
        let tri = Triangle::new(0, 1, 2, colors::RED);
        assert_eq!(clip_triangle(&tri, &near_plane(), &mut buffer, &mut out), 1);
    }
}
