//! Declarative scene description.
//!
//! A [`SceneDescription`] names the models to build, places instances of
//! them by name, and positions the camera. Angles are in degrees here and
//! converted to radians when the scene is built.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::camera::Camera;
use crate::error::{Result, SceneError};
use crate::instance::Instance;
use crate::math::{Matrix, Vec3};
use crate::model::Model;
use crate::projection::Viewport;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ModelSource {
    /// The built-in colored cube.
    Cube,
    /// A Wavefront OBJ file drawn in one flat color.
    Obj { path: PathBuf, color: u32 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelDescription {
    pub name: String,
    pub source: ModelSource,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceDescription {
    pub model: String,
    #[serde(default)]
    pub position: Vec3,
    #[serde(default)]
    pub rotation_y_degrees: f32,
    #[serde(default = "unit_scale")]
    pub scale: f32,
}

fn unit_scale() -> f32 {
    1.0
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraDescription {
    pub position: Vec3,
    pub rotation_y_degrees: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneDescription {
    pub models: Vec<ModelDescription>,
    pub instances: Vec<InstanceDescription>,
    pub camera: CameraDescription,
}

impl Default for SceneDescription {
    /// Two cubes seen by a camera turned 30 degrees to the right.
    fn default() -> Self {
        Self {
            models: vec![ModelDescription {
                name: "cube".to_string(),
                source: ModelSource::Cube,
            }],
            instances: vec![
                InstanceDescription {
                    model: "cube".to_string(),
                    position: Vec3::new(-1.5, 0.0, 7.0),
                    rotation_y_degrees: 0.0,
                    scale: 0.75,
                },
                InstanceDescription {
                    model: "cube".to_string(),
                    position: Vec3::new(1.25, 2.5, 7.5),
                    rotation_y_degrees: 195.0,
                    scale: 1.0,
                },
            ],
            camera: CameraDescription {
                position: Vec3::new(-3.0, 1.0, 2.0),
                rotation_y_degrees: -30.0,
            },
        }
    }
}

impl SceneDescription {
    /// Builds every described model, in declaration order.
    pub fn load_models(&self) -> Result<Vec<Model>> {
        self.models
            .iter()
            .map(|description| -> Result<Model> {
                match &description.source {
                    ModelSource::Cube => Ok(Model::cube()),
                    ModelSource::Obj { path, color } => {
                        log::info!("loading {} from {}", description.name, path.display());
                        Ok(Model::from_obj(path, *color)?)
                    }
                }
            })
            .collect()
    }

    /// Places the described instances, borrowing from `models` as returned
    /// by [`SceneDescription::load_models`].
    pub fn instances<'m>(&self, models: &'m [Model]) -> std::result::Result<Vec<Instance<'m>>, SceneError> {
        self.instances
            .iter()
            .map(|description| -> std::result::Result<Instance<'m>, SceneError> {
                let model = self
                    .models
                    .iter()
                    .position(|m| m.name == description.model)
                    .and_then(|index| models.get(index))
                    .ok_or_else(|| SceneError::UnknownModel(description.model.clone()))?;

                let mut instance = Instance::new(model);
                instance
                    .set_position(description.position)
                    .set_orientation(Matrix::rotation_y(description.rotation_y_degrees.to_radians()))
                    .set_scale(description.scale);
                Ok(instance)
            })
            .collect()
    }

    /// Camera with the viewport's frustum planes.
    pub fn camera(&self, viewport: &Viewport) -> Camera {
        Camera::with_frustum(
            self.camera.position,
            Matrix::rotation_y(self.camera.rotation_y_degrees.to_radians()),
            viewport,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn default_scene_builds() {
        let scene = SceneDescription::default();
        let models = scene.load_models().unwrap();
        let instances = scene.instances(&models).unwrap();

        assert_eq!(models.len(), 1);
        assert_eq!(instances.len(), 2);
        assert_eq!(instances[0].scale(), 0.75);
        assert_eq!(scene.camera(&Viewport::default()).planes().len(), 5);
    }

    #[test]
    fn unknown_model_is_reported() {
        let scene = SceneDescription {
            instances: vec![InstanceDescription {
                model: "teapot".to_string(),
                position: Vec3::ZERO,
                rotation_y_degrees: 0.0,
                scale: 1.0,
            }],
            ..Default::default()
        };
        let models = scene.load_models().unwrap();
        let err = scene.instances(&models).unwrap_err();
        assert!(matches!(err, SceneError::UnknownModel(name) if name == "teapot"));
    }

    #[test]
    fn missing_obj_file_is_an_error() {
        let scene = SceneDescription {
            models: vec![ModelDescription {
                name: "ghost".to_string(),
                source: ModelSource::Obj {
                    path: PathBuf::from("does/not/exist.obj"),
                    color: crate::colors::WHITE,
                },
            }],
            instances: Vec::new(),
            camera: CameraDescription::default(),
        };
        assert!(matches!(scene.load_models(), Err(Error::Obj(_))));
    }

    #[test]
    fn instance_fields_default_when_omitted() {
        let description: InstanceDescription = ron::from_str(r#"(model: "cube")"#).unwrap();
        assert_eq!(description.position, Vec3::ZERO);
        assert_eq!(description.rotation_y_degrees, 0.0);
        assert_eq!(description.scale, 1.0);
    }
}
