/// Viewer configuration loaded from TOML
use std::fs;
use std::path::{Path, PathBuf};

use polyview_core::{CameraPose, RenderStyle, Rgb};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Step sizes for keyboard and mouse input
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Controls {
    /// World units per movement key press
    pub move_step: f64,
    /// Radians per arrow key press
    pub rotate_step: f64,
    /// Radians per cell of mouse drag
    pub drag_sensitivity: f64,
}

impl Default for Controls {
    fn default() -> Self {
        Self {
            move_step: 0.3,
            rotate_step: 0.05,
            drag_sensitivity: 0.02,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub fill: Rgb,
    pub outline: Rgb,
    /// Edge length of the displayed cube
    pub cube_size: f64,
    /// Height of a terminal cell relative to its width
    pub cell_aspect: f64,
}

impl RenderConfig {
    pub fn style(&self) -> RenderStyle {
        RenderStyle {
            fill: self.fill,
            outline: self.outline,
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        let style = RenderStyle::default();
        Self {
            fill: style.fill,
            outline: style.outline,
            cube_size: 1.0,
            cell_aspect: 2.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub camera: CameraPose,
    pub controls: Controls,
    pub render: RenderConfig,
    /// Log destination; the alternate screen owns the terminal while running
    pub log_file: Option<PathBuf>,
}

impl ViewerConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = ViewerConfig::from_toml("").unwrap();
        assert_eq!(config, ViewerConfig::default());
        assert_eq!(config.camera.position, [-1.0, 1.0, -1.0]);
        assert_eq!(config.controls.move_step, 0.3);
        assert_eq!(config.render.fill, Rgb::SKY_BLUE);
    }

    #[test]
    fn test_partial_config() {
        let config = ViewerConfig::from_toml(
            r#"
            log_file = "polyview.log"

            [camera]
            position = [0.0, 0.0, -3.0]
            angle_h = 1.5707963267948966

            [controls]
            rotate_step = 0.1

            [render]
            cube_size = 2.0
            fill = { r = 255, g = 0, b = 0 }
            "#,
        )
        .unwrap();

        assert_eq!(config.camera.position, [0.0, 0.0, -3.0]);
        assert_eq!(config.camera.distance, 0.4);
        assert_eq!(config.controls.rotate_step, 0.1);
        assert_eq!(config.controls.move_step, 0.3);
        assert_eq!(config.render.cube_size, 2.0);
        assert_eq!(config.render.style().fill, Rgb::new(255, 0, 0));
        assert_eq!(config.render.style().outline, Rgb::GRAY);
        assert_eq!(config.log_file, Some(PathBuf::from("polyview.log")));
    }

    #[test]
    fn test_malformed_config() {
        let err = ViewerConfig::from_toml("[controls]\nmove_step = \"fast\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = ViewerConfig::load(Path::new("/nonexistent/polyview.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
