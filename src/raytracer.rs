//! Recursive ray tracer over spheres.
//!
//! An alternate render path sharing the math layer and the pixel target with
//! the rasterizer. Each canvas pixel shoots one ray through the viewport;
//! hits are lit by ambient, point and directional lights (diffuse plus
//! optional specular), shadowed by any sphere in between, and blended with
//! a recursively traced reflection.

use serde::{Deserialize, Serialize};

use crate::camera::Camera;
use crate::colors;
use crate::light::Light;
use crate::math::Vec3;
use crate::projection::Viewport;
use crate::render::{Canvas, PixelTarget};

/// Minimum ray parameter for shadow and reflection rays leaving a surface,
/// keeping them from hitting the surface they start on.
pub const SURFACE_EPSILON: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
    pub color: u32,
    /// Specular exponent; `None` for a matte surface.
    pub specular: Option<f32>,
    /// Fraction of the final color taken from the reflection, in `[0, 1]`.
    pub reflective: f32,
}

impl Sphere {
    /// Ray parameters of both intersections, nearest first, or `None` when
    /// the ray misses.
    pub fn intersect(&self, origin: Vec3, direction: Vec3) -> Option<(f32, f32)> {
        let co = origin - self.center;
        let k1 = direction.dot(direction);
        let k2 = 2.0 * co.dot(direction);
        let k3 = co.dot(co) - self.radius * self.radius;

        let discriminant = k2 * k2 - 4.0 * k1 * k3;
        if discriminant < 0.0 || k1 == 0.0 {
            return None;
        }
        let root = discriminant.sqrt();
        Some(((-k2 - root) / (2.0 * k1), (-k2 + root) / (2.0 * k1)))
    }
}

/// Ray tracer settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RayConfig {
    /// Number of reflection bounces after the primary hit.
    pub recursion_depth: u32,
    /// Color of rays that hit nothing.
    pub background: u32,
}

impl Default for RayConfig {
    fn default() -> Self {
        Self {
            recursion_depth: 3,
            background: colors::WHITE,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RayScene {
    pub spheres: Vec<Sphere>,
    pub lights: Vec<Light>,
    pub background: u32,
}

impl Default for RayScene {
    /// Three spheres resting on a large yellow floor sphere, lit by one
    /// light of each kind.
    fn default() -> Self {
        Self {
            spheres: vec![
                Sphere {
                    center: Vec3::new(0.0, -1.0, 3.0),
                    radius: 1.0,
                    color: colors::RED,
                    specular: Some(500.0),
                    reflective: 0.2,
                },
                Sphere {
                    center: Vec3::new(-2.0, 0.0, 4.0),
                    radius: 1.0,
                    color: colors::GREEN,
                    specular: Some(10.0),
                    reflective: 0.4,
                },
                Sphere {
                    center: Vec3::new(2.0, 0.0, 4.0),
                    radius: 1.0,
                    color: colors::BLUE,
                    specular: Some(500.0),
                    reflective: 0.3,
                },
                Sphere {
                    center: Vec3::new(0.0, -5001.0, 0.0),
                    radius: 5000.0,
                    color: colors::YELLOW,
                    specular: Some(1000.0),
                    reflective: 0.5,
                },
            ],
            lights: vec![
                Light::Ambient { intensity: 0.2 },
                Light::Point {
                    intensity: 0.6,
                    position: Vec3::new(2.0, 1.0, 0.0),
                },
                Light::Directional {
                    intensity: 0.2,
                    direction: Vec3::new(1.0, 4.0, 4.0),
                },
            ],
            background: colors::WHITE,
        }
    }
}

impl RayScene {
    /// Nearest sphere hit with `t_min < t < t_max`.
    pub fn closest_intersection(
        &self,
        origin: Vec3,
        direction: Vec3,
        t_min: f32,
        t_max: f32,
    ) -> Option<(&Sphere, f32)> {
        let in_range = |t: f32| t_min < t && t < t_max;
        let mut closest: Option<(&Sphere, f32)> = None;

        for sphere in &self.spheres {
            let Some((t1, t2)) = sphere.intersect(origin, direction) else {
                continue;
            };
            for t in [t1, t2] {
                if in_range(t) && closest.map_or(true, |(_, best)| t < best) {
                    closest = Some((sphere, t));
                }
            }
        }
        closest
    }

    /// Total light intensity at `point`.
    ///
    /// `view` points from the surface back toward the viewer. Lights with
    /// any sphere between them and the point contribute nothing.
    pub fn compute_lighting(&self, point: Vec3, normal: Vec3, view: Vec3, specular: Option<f32>) -> f32 {
        let length_n = normal.magnitude();
        let length_v = view.magnitude();
        let mut intensity = 0.0;

        for light in &self.lights {
            let Some((l, t_max)) = light.toward(point) else {
                intensity += light.intensity();
                continue;
            };

            if self
                .closest_intersection(point, l, SURFACE_EPSILON, t_max)
                .is_some()
            {
                continue;
            }

            let n_dot_l = normal.dot(l);
            if n_dot_l > 0.0 {
                intensity += light.intensity() * n_dot_l / (length_n * l.magnitude());
            }

            if let Some(exponent) = specular {
                let r = l.reflect(normal);
                let r_dot_v = r.dot(view);
                if r_dot_v > 0.0 {
                    intensity += light.intensity() * (r_dot_v / (r.magnitude() * length_v)).powf(exponent);
                }
            }
        }
        intensity
    }

    /// Color seen along a ray, following up to `depth` reflections.
    pub fn trace_ray(&self, origin: Vec3, direction: Vec3, t_min: f32, t_max: f32, depth: u32) -> u32 {
        let Some((sphere, t)) = self.closest_intersection(origin, direction, t_min, t_max) else {
            return self.background;
        };

        let point = origin + direction * t;
        let normal = (point - sphere.center).normalize();
        let view = -direction;
        let lighting = self.compute_lighting(point, normal, view, sphere.specular);
        let local = colors::scale(sphere.color, lighting);

        if sphere.reflective <= 0.0 || depth == 0 {
            return local;
        }

        let reflected = self.trace_ray(
            point,
            view.reflect(normal),
            SURFACE_EPSILON,
            f32::INFINITY,
            depth - 1,
        );
        colors::add(
            colors::scale(local, 1.0 - sphere.reflective),
            colors::scale(reflected, sphere.reflective),
        )
    }
}

/// Point on the projection plane behind canvas pixel `(x, y)`.
pub fn canvas_to_viewport(x: i32, y: i32, canvas_width: u32, canvas_height: u32, viewport: &Viewport) -> Vec3 {
    Vec3::new(
        x as f32 * viewport.size / canvas_width as f32,
        y as f32 * viewport.size / canvas_height as f32,
        viewport.projection_plane_z,
    )
}

/// Traces one primary ray per pixel of `target` from the camera.
///
/// Primary rays are unit length and ignore hits closer than one unit.
pub fn render(
    scene: &RayScene,
    camera: &Camera,
    viewport: &Viewport,
    recursion_depth: u32,
    target: &mut dyn PixelTarget,
) {
    let (width, height) = (target.width(), target.height());
    let (half_w, half_h) = (width as i32 / 2, height as i32 / 2);
    let mut canvas = Canvas::new(target);

    for x in -half_w..half_w {
        for y in -half_h..half_h {
            let direction = camera
                .orientation()
                .mul_vec3(canvas_to_viewport(x, y, width, height, viewport))
                .normalize();
            let color = scene.trace_ray(camera.position(), direction, 1.0, f32::INFINITY, recursion_depth);
            canvas.put_pixel(x, y, color);
        }
    }
    log::debug!(
        "ray traced {width}x{height} frame, {} spheres, {} lights",
        scene.spheres.len(),
        scene.lights.len()
    );
}
