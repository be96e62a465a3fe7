//! Scene renderer.
//!
//! The [`Renderer`] owns the per-frame state of the rasterization pipeline:
//! the depth buffer and the render toggles. For every instance it runs
//!
//! ```text
//! model -> world -> camera -> clip -> cull -> project -> rasterize
//! ```
//!
//! writing through any [`PixelTarget`]. Nothing inside a frame aborts it;
//! instances whose transforms cannot be composed are dropped and logged.

use serde::{Deserialize, Serialize};

use super::canvas::Canvas;
use super::depth::DepthBuffer;
use super::framebuffer::PixelTarget;
use super::scanline::{draw_depth_tested_triangle, draw_wireframe_triangle};
use crate::camera::Camera;
use crate::clipper::transform_and_clip;
use crate::colors;
use crate::instance::Instance;
use crate::math::Vec3;
use crate::projection::{project_vertex, Viewport};

/// Render toggles, each settable independently between frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub depth_test: bool,
    pub backface_culling: bool,
    /// Redraw each triangle's edges in a darkened fill color.
    pub outline: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            depth_test: true,
            backface_culling: true,
            outline: false,
        }
    }
}

/// Counters for one [`Renderer::render_scene`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Instances with at least one triangle left after clipping.
    pub instances_drawn: usize,
    /// Triangles rasterized, counted after clipping.
    pub triangles_drawn: usize,
    pub triangles_culled: usize,
    /// Fill pixels that passed the depth test (outlines not included).
    pub pixels_written: usize,
}

pub struct Renderer {
    settings: RenderSettings,
    viewport: Viewport,
    depth: DepthBuffer,
}

impl Renderer {
    pub fn new(viewport: Viewport, settings: RenderSettings) -> Self {
        Self {
            settings,
            viewport,
            depth: DepthBuffer::new(),
        }
    }

    pub fn settings(&self) -> RenderSettings {
        self.settings
    }

    pub fn settings_mut(&mut self) -> &mut RenderSettings {
        &mut self.settings
    }

    pub fn set_settings(&mut self, settings: RenderSettings) {
        self.settings = settings;
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Depth buffer as left by the last depth-tested frame.
    pub fn depth_buffer(&self) -> &DepthBuffer {
        &self.depth
    }

    /// Renders every instance as seen from `camera` into `target`.
    ///
    /// With depth testing on, the depth buffer is sized to the target and
    /// reset first. Backfaces are rejected before clipping, so they never
    /// consume clip buffer space.
    pub fn render_scene(
        &mut self,
        camera: &Camera,
        instances: &[Instance],
        target: &mut dyn PixelTarget,
    ) -> FrameStats {
        let mut stats = FrameStats::default();

        let view = match camera.view_matrix() {
            Ok(view) => view,
            Err(e) => {
                log::warn!("skipping frame, invalid camera orientation: {e}");
                return stats;
            }
        };

        let (width, height) = (target.width(), target.height());
        if self.settings.depth_test {
            self.depth.prepare(width, height);
        }

        let RenderSettings {
            depth_test,
            backface_culling,
            outline,
        } = self.settings;
        let mut canvas = Canvas::new(target);

        for instance in instances {
            let model = instance.model();
            let transform = match instance
                .model_matrix()
                .and_then(|model_matrix| view.try_mul(&model_matrix))
            {
                Ok(transform) => transform,
                Err(e) => {
                    log::warn!("dropping instance of {}: {e}", model.name());
                    continue;
                }
            };

            let mesh = transform_and_clip(model, &transform, camera.planes(), |corners| {
                !(backface_culling && is_backface(corners))
            });
            stats.triangles_culled += mesh.rejected;
            if mesh.is_empty() {
                continue;
            }
            stats.instances_drawn += 1;

            for triangle in &mesh.triangles {
                let corners = mesh.corners(triangle);
                let points = corners.map(|v| project_vertex(v, width, height, &self.viewport));
                let inv_z = corners.map(|v| 1.0 / v.z);

                let depth = depth_test.then_some(&mut self.depth);
                stats.pixels_written +=
                    draw_depth_tested_triangle(&mut canvas, depth, points, inv_z, triangle.color);

                if outline {
                    let [p0, p1, p2] = points;
                    let color = colors::scale(triangle.color, colors::OUTLINE_BRIGHTNESS);
                    draw_wireframe_triangle(&mut canvas, p0, p1, p2, color);
                }
                stats.triangles_drawn += 1;
            }
        }

        log::debug!(
            "frame: {} instances, {} triangles, {} culled, {} pixels",
            stats.instances_drawn,
            stats.triangles_drawn,
            stats.triangles_culled,
            stats.pixels_written
        );
        stats
    }
}

/// True when a camera-space triangle faces away from the origin.
///
/// The normal is `cross(v1 - v0, v2 - v0)`; the triangle is a backface when
/// the vector from its centroid to the camera points against it.
pub fn is_backface(corners: &[Vec3; 3]) -> bool {
    let [a, b, c] = *corners;
    let normal = (b - a).cross(c - a);
    let centroid = (a + b + c) / 3.0;
    (-centroid).dot(normal) < 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Matrix;
    use crate::model::Model;
    use crate::render::FrameBuffer;
    use crate::triangle::Triangle;

    const SIZE: u32 = 100;
    // Canvas origin in corner coordinates
    const CENTER: (i32, i32) = (50, 49);

    /// A small triangle at depth `z`, wound to face the camera.
    fn facing_triangle(name: &str, z: f32, color: u32) -> Model {
        Model::new(
            name,
            vec![
                Vec3::new(-0.5, -0.5, z),
                Vec3::new(0.0, 0.5, z),
                Vec3::new(0.5, -0.5, z),
            ],
            vec![Triangle::new(0, 1, 2, color)],
        )
        .unwrap()
    }

    fn camera() -> Camera {
        Camera::with_frustum(Vec3::ZERO, Matrix::identity(4), &Viewport::default())
    }

    fn render(renderer: &mut Renderer, instances: &[Instance]) -> (FrameBuffer, FrameStats) {
        let mut fb = FrameBuffer::new(SIZE, SIZE);
        let stats = renderer.render_scene(&camera(), instances, &mut fb);
        (fb, stats)
    }

    fn center(fb: &FrameBuffer) -> Option<u32> {
        fb.get_pixel(CENTER.0, CENTER.1)
    }

    #[test]
    fn backface_test_uses_winding() {
        let front = [
            Vec3::new(-1.0, -1.0, 5.0),
            Vec3::new(0.0, 1.0, 5.0),
            Vec3::new(1.0, -1.0, 5.0),
        ];
        let back = [front[0], front[2], front[1]];
        assert!(!is_backface(&front));
        assert!(is_backface(&back));
    }

    #[test]
    fn nearer_triangle_wins_regardless_of_order() {
        let near = facing_triangle("near", 2.0, colors::RED);
        let far = facing_triangle("far", 4.0, colors::GREEN);
        let mut renderer = Renderer::new(Viewport::default(), RenderSettings::default());

        let (fb, stats) = render(&mut renderer, &[Instance::new(&near), Instance::new(&far)]);
        assert_eq!(center(&fb), Some(colors::RED));
        assert_eq!(stats.triangles_drawn, 2);

        let (fb, _) = render(&mut renderer, &[Instance::new(&far), Instance::new(&near)]);
        assert_eq!(center(&fb), Some(colors::RED));
    }

    #[test]
    fn without_depth_test_last_triangle_wins() {
        let near = facing_triangle("near", 2.0, colors::RED);
        let far = facing_triangle("far", 4.0, colors::GREEN);
        let settings = RenderSettings {
            depth_test: false,
            ..Default::default()
        };
        let mut renderer = Renderer::new(Viewport::default(), settings);

        let (fb, _) = render(&mut renderer, &[Instance::new(&near), Instance::new(&far)]);
        assert_eq!(center(&fb), Some(colors::GREEN));
    }

    #[test]
    fn backfaces_are_skipped_when_culling() {
        let front = facing_triangle("front", 2.0, colors::RED);
        let model = Model::new(
            "back",
            front.vertices().to_vec(),
            vec![Triangle::new(0, 2, 1, colors::RED)],
        )
        .unwrap();
        let mut renderer = Renderer::new(Viewport::default(), RenderSettings::default());

        let (fb, stats) = render(&mut renderer, &[Instance::new(&model)]);
        assert_eq!(stats.triangles_culled, 1);
        assert_eq!(stats.pixels_written, 0);
        assert!(fb.pixels().iter().all(|&c| c == colors::BLACK));
        assert!(renderer
            .depth_buffer()
            .get(CENTER.0, CENTER.1)
            .is_some_and(|z| z == f32::NEG_INFINITY));

        renderer.settings_mut().backface_culling = false;
        let (fb, stats) = render(&mut renderer, &[Instance::new(&model)]);
        assert_eq!(stats.triangles_culled, 0);
        assert_eq!(center(&fb), Some(colors::RED));
    }

    #[test]
    fn cube_shows_its_front_face() {
        let cube = Model::cube();
        let mut instance = Instance::new(&cube);
        instance.set_position(Vec3::new(0.0, 0.0, 8.0));
        let mut renderer = Renderer::new(Viewport::default(), RenderSettings::default());

        let (fb, stats) = render(&mut renderer, std::slice::from_ref(&instance));
        assert_eq!(stats.instances_drawn, 1);
        assert_eq!(stats.triangles_drawn, 2);
        assert_eq!(stats.triangles_culled, 10);
        assert_eq!(center(&fb), Some(colors::BLUE));

        renderer.settings_mut().backface_culling = false;
        let (fb, stats) = render(&mut renderer, std::slice::from_ref(&instance));
        assert_eq!(stats.triangles_drawn, 12);
        assert_eq!(center(&fb), Some(colors::BLUE));
    }

    #[test]
    fn outline_uses_darkened_fill_color() {
        let near = facing_triangle("near", 2.0, colors::RED);
        let settings = RenderSettings {
            outline: true,
            ..Default::default()
        };
        let mut renderer = Renderer::new(Viewport::default(), settings);

        let (fb, _) = render(&mut renderer, &[Instance::new(&near)]);
        let outline = colors::scale(colors::RED, colors::OUTLINE_BRIGHTNESS);
        assert!(fb.pixels().contains(&outline));
        assert_eq!(center(&fb), Some(colors::RED));
    }

    #[test]
    fn consecutive_frames_reset_depth() {
        let near = facing_triangle("near", 2.0, colors::RED);
        let mut renderer = Renderer::new(Viewport::default(), RenderSettings::default());

        let (_, first) = render(&mut renderer, &[Instance::new(&near)]);
        let (_, second) = render(&mut renderer, &[Instance::new(&near)]);
        assert!(first.pixels_written > 0);
        assert_eq!(first, second);
    }

    #[test]
    fn instance_with_bad_orientation_is_dropped() {
        let near = facing_triangle("near", 2.0, colors::RED);
        let mut broken = Instance::new(&near);
        broken.set_orientation(Matrix::identity(3));
        let mut renderer = Renderer::new(Viewport::default(), RenderSettings::default());

        let (fb, stats) = render(&mut renderer, &[broken, Instance::new(&near)]);
        assert_eq!(stats.instances_drawn, 1);
        assert_eq!(center(&fb), Some(colors::RED));
    }
}
