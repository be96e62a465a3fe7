//! Render configuration.
//!
//! Stored as RON. Every field is optional; omitted fields take the values
//! of [`Config::default`]:
//!
//! ```ron
//! (
//!     width: 800,
//!     height: 600,
//!     mode: Raster,
//!     settings: (outline: true),
//!     scene: (
//!         models: [(name: "cube", source: Cube)],
//!         instances: [(model: "cube", position: (x: 0.0, y: 0.0, z: 6.0))],
//!     ),
//! )
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::projection::Viewport;
use crate::raytracer::RayConfig;
use crate::render::RenderSettings;
use crate::scene::SceneDescription;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RenderMode {
    /// Scanline rasterization of the scene's triangle meshes.
    #[default]
    Raster,
    /// Ray tracing of the built-in sphere scene.
    RayTrace,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub width: u32,
    pub height: u32,
    pub mode: RenderMode,
    pub viewport: Viewport,
    pub settings: RenderSettings,
    pub ray: RayConfig,
    pub scene: SceneDescription,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: 600,
            height: 600,
            mode: RenderMode::default(),
            viewport: Viewport::default(),
            settings: RenderSettings::default(),
            ray: RayConfig::default(),
            scene: SceneDescription::default(),
        }
    }
}

impl Config {
    /// Load a configuration from a RON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let config = Self::from_ron_str(&contents)?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_ron_str(s: &str) -> Result<Self> {
        Ok(ron::from_str(s)?)
    }

    pub fn to_ron_string(&self) -> Result<String> {
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(4)
            .indentor("  ".to_string());
        Ok(ron::ser::to_string_pretty(self, pretty)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn empty_document_is_default() {
        assert_eq!(Config::from_ron_str("()").unwrap(), Config::default());
    }

    #[test]
    fn partial_document_overrides_only_given_fields() {
        let config = Config::from_ron_str(
            "(width: 320, mode: RayTrace, settings: (outline: true), ray: (recursion_depth: 1))",
        )
        .unwrap();

        assert_eq!(config.width, 320);
        assert_eq!(config.height, 600);
        assert_eq!(config.mode, RenderMode::RayTrace);
        assert!(config.settings.outline);
        assert!(config.settings.depth_test);
        assert_eq!(config.ray.recursion_depth, 1);
        assert_eq!(config.ray.background, crate::colors::WHITE);
        assert_eq!(config.scene, SceneDescription::default());
    }

    #[test]
    fn serialized_default_parses_back() {
        let text = Config::default().to_ron_string().unwrap();
        assert_eq!(Config::from_ron_str(&text).unwrap(), Config::default());
    }

    #[test]
    fn malformed_document_is_a_config_error() {
        assert!(matches!(
            Config::from_ron_str("(width: \"wide\")"),
            Err(Error::Config(_))
        ));
    }
}
