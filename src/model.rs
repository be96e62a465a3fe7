//! Mesh assets.
//!
//! A [`Model`] owns its vertices and index-form triangles, plus a bounding
//! sphere. Models are immutable once built; placement in the scene is done
//! by [`Instance`](crate::instance::Instance)s that borrow them.

use std::io::BufRead;
use std::path::Path;

use crate::colors;
use crate::error::SceneError;
use crate::math::Vec3;
use crate::triangle::Triangle;

#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    name: String,
    vertices: Vec<Vec3>,
    triangles: Vec<Triangle>,
    bounds_center: Vec3,
    bounds_radius: f32,
}

impl Model {
    /// Builds a model, checking every triangle index against `vertices`.
    ///
    /// The bounding sphere is centered on the vertex centroid and encloses
    /// every vertex.
    pub fn new(
        name: impl Into<String>,
        vertices: Vec<Vec3>,
        triangles: Vec<Triangle>,
    ) -> Result<Self, SceneError> {
        let (center, radius) = bounding_sphere(&vertices);
        Self::with_bounds(name, vertices, triangles, center, radius)
    }

    /// Builds a model with an explicit bounding sphere.
    pub fn with_bounds(
        name: impl Into<String>,
        vertices: Vec<Vec3>,
        triangles: Vec<Triangle>,
        bounds_center: Vec3,
        bounds_radius: f32,
    ) -> Result<Self, SceneError> {
        let name = name.into();
        for (triangle_index, triangle) in triangles.iter().enumerate() {
            if let Some(&index) = triangle.indices.iter().find(|&&i| i >= vertices.len()) {
                return Err(SceneError::InvalidIndex {
                    model: name,
                    triangle: triangle_index,
                    index,
                    vertex_count: vertices.len(),
                });
            }
        }
        Ok(Self {
            name,
            vertices,
            triangles,
            bounds_center,
            bounds_radius,
        })
    }

    /// The 2x2x2 cube centered at the origin, one color per face pair.
    ///
    /// Triangles wind so that `cross(v1 - v0, v2 - v0)` points outward.
    pub fn cube() -> Self {
        Self {
            name: "cube".to_string(),
            vertices: CUBE_VERTICES.to_vec(),
            triangles: CUBE_TRIANGLES.to_vec(),
            bounds_center: Vec3::ZERO,
            bounds_radius: 3.0_f32.sqrt(),
        }
    }

    /// Loads every object of an OBJ file into one flat-colored model.
    pub fn from_obj(path: impl AsRef<Path>, color: u32) -> Result<Self, tobj::LoadError> {
        let path = path.as_ref();
        let (models, _materials) = tobj::load_obj(path, &load_options())?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "obj".to_string());
        Ok(Self::from_tobj(name, &models, color))
    }

    /// Like [`Model::from_obj`] but reads OBJ text from a reader.
    /// Material libraries are ignored.
    pub fn from_obj_reader(
        name: impl Into<String>,
        reader: &mut impl BufRead,
        color: u32,
    ) -> Result<Self, tobj::LoadError> {
        let (models, _materials) =
            tobj::load_obj_buf(reader, &load_options(), |_| Err(tobj::LoadError::OpenFileFailed))?;
        Ok(Self::from_tobj(name.into(), &models, color))
    }

    fn from_tobj(name: String, models: &[tobj::Model], color: u32) -> Self {
        let mut vertices = Vec::new();
        let mut triangles = Vec::new();

        for model in models {
            let base = vertices.len();
            let mesh = &model.mesh;
            vertices.extend(
                mesh.positions
                    .chunks_exact(3)
                    .map(|p| Vec3::new(p[0], p[1], p[2])),
            );
            triangles.extend(mesh.indices.chunks_exact(3).map(|f| {
                Triangle::new(
                    base + f[0] as usize,
                    base + f[1] as usize,
                    base + f[2] as usize,
                    color,
                )
            }));
        }

        log::debug!(
            "loaded model {name}: {} vertices, {} triangles",
            vertices.len(),
            triangles.len()
        );
        let (bounds_center, bounds_radius) = bounding_sphere(&vertices);
        Self {
            name,
            vertices,
            triangles,
            bounds_center,
            bounds_radius,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn bounds_center(&self) -> Vec3 {
        self.bounds_center
    }

    pub fn bounds_radius(&self) -> f32 {
        self.bounds_radius
    }
}

fn load_options() -> tobj::LoadOptions {
    tobj::LoadOptions {
        triangulate: true,
        single_index: true,
        ..Default::default()
    }
}

fn bounding_sphere(vertices: &[Vec3]) -> (Vec3, f32) {
    if vertices.is_empty() {
        return (Vec3::ZERO, 0.0);
    }
    let sum = vertices.iter().fold(Vec3::ZERO, |acc, &v| acc + v);
    let center = sum / vertices.len() as f32;
    let radius = vertices
        .iter()
        .map(|&v| (v - center).magnitude())
        .fold(0.0, f32::max);
    (center, radius)
}

pub const CUBE_VERTICES: [Vec3; 8] = [
    Vec3::new(1.0, 1.0, 1.0),
    Vec3::new(-1.0, 1.0, 1.0),
    Vec3::new(-1.0, -1.0, 1.0),
    Vec3::new(1.0, -1.0, 1.0),
    Vec3::new(1.0, 1.0, -1.0),
    Vec3::new(-1.0, 1.0, -1.0),
    Vec3::new(-1.0, -1.0, -1.0),
    Vec3::new(1.0, -1.0, -1.0),
];

pub const CUBE_TRIANGLES: [Triangle; 12] = [
    // +z
    Triangle::new(0, 1, 2, colors::RED),
    Triangle::new(0, 2, 3, colors::RED),
    // +x
    Triangle::new(4, 0, 3, colors::GREEN),
    Triangle::new(4, 3, 7, colors::GREEN),
    // -z
    Triangle::new(5, 4, 7, colors::BLUE),
    Triangle::new(5, 7, 6, colors::BLUE),
    // -x
    Triangle::new(1, 5, 6, colors::YELLOW),
    Triangle::new(1, 6, 2, colors::YELLOW),
    // +y
    Triangle::new(4, 5, 1, colors::PURPLE),
    Triangle::new(4, 1, 0, colors::PURPLE),
    // -y
    Triangle::new(2, 6, 7, colors::CYAN),
    Triangle::new(2, 7, 3, colors::CYAN),
];
