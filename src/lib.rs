//! A CPU software renderer.
//!
//! Two independent render paths share one math layer and one pixel
//! output interface ([`PixelTarget`](render::PixelTarget)):
//!
//! - a scanline **rasterizer** over triangle meshes with frustum clipping,
//!   backface culling and a `1/z` depth buffer ([`Renderer`])
//! - a recursive **ray tracer** over spheres ([`raytracer`])
//!
//! # Quick Start
//!
//! ```ignore
//! use softrast::prelude::*;
//!
//! let cube = Model::cube();
//! let mut instance = Instance::new(&cube);
//! instance.set_position(Vec3::new(0.0, 0.0, 6.0));
//!
//! let viewport = Viewport::default();
//! let camera = Camera::with_frustum(Vec3::ZERO, Matrix::identity(4), &viewport);
//! let mut renderer = Renderer::new(viewport, RenderSettings::default());
//! let mut frame = FrameBuffer::new(600, 600);
//! renderer.render_scene(&camera, &[instance], &mut frame);
//! frame.save("cube.png")?;
//! ```

pub mod camera;
pub mod clipper;
pub mod colors;
pub mod config;
pub mod error;
pub mod instance;
pub mod light;
pub mod math;
pub mod model;
pub mod projection;
pub mod raytracer;
pub mod render;
pub mod scene;
pub mod triangle;

pub use camera::Camera;
pub use config::{Config, RenderMode};
pub use error::{Error, Result, SceneError};
pub use instance::Instance;
pub use model::Model;
pub use projection::Viewport;
pub use render::{FrameStats, RenderSettings, Renderer};
pub use triangle::Triangle;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::camera::Camera;
    pub use crate::instance::Instance;
    pub use crate::model::Model;
    pub use crate::projection::Viewport;
    pub use crate::triangle::Triangle;

    pub use crate::math::{Matrix, Vec2, Vec3, Vec4};

    pub use crate::render::{FrameBuffer, PixelTarget, RenderSettings, Renderer};
}
