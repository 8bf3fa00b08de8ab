//! Configuration sections, their defaults, and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const CONFIG_FILE_NAME: &str = "config.ron";

/// Platform config directory for the viewer, e.g. `~/.config/moonvis`.
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("moonvis")
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub window: WindowConfig,
    pub render: RenderConfig,
    pub sphere: SphereConfig,
    pub texture: TextureConfig,
    pub camera: CameraConfig,
    pub debug: DebugConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    /// Inner width in logical pixels.
    pub width: u32,
    /// Inner height in logical pixels.
    pub height: u32,
    pub title: String,
    /// Present with `Fifo` when set, otherwise prefer `Mailbox`/`Immediate`.
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            title: "Moon Visualization".to_string(),
            vsync: true,
        }
    }
}

/// Fixed projection and framebuffer settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RenderConfig {
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Linear RGB.
    pub clear_color: [f64; 3],
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            fov_y_degrees: 45.0,
            near: 0.1,
            far: 100.0,
            clear_color: [0.1, 0.1, 0.1],
        }
    }
}

/// Tessellation of the body. Validated at mesh generation time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SphereConfig {
    pub radius: f32,
    pub sectors: u32,
    pub stacks: u32,
}

impl Default for SphereConfig {
    fn default() -> Self {
        Self {
            radius: 1.0,
            sectors: 360,
            stacks: 180,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TextureConfig {
    /// Equirectangular surface map. Relative paths resolve against the
    /// working directory.
    pub path: PathBuf,
    pub generate_mipmaps: bool,
}

impl Default for TextureConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data/lroc_color_poles_8k.tif"),
            generate_mipmaps: true,
        }
    }
}

/// Interaction tuning. Positions and directions are world-space `[x, y, z]`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// Radians per logical pixel of drag.
    pub drag_sensitivity: f32,
    /// World units per scroll line.
    pub zoom_speed: f32,
    pub zoom_near: f32,
    pub zoom_far: f32,
    /// World units per second.
    pub move_speed: f32,
    pub start_position: [f32; 3],
    pub forward: [f32; 3],
    pub up: [f32; 3],
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            drag_sensitivity: 0.005,
            zoom_speed: 0.1,
            zoom_near: 1.4,
            zoom_far: 10.0,
            move_speed: 2.5,
            start_position: [0.0, 0.0, 3.5],
            forward: [0.0, 0.0, -1.0],
            up: [0.0, 1.0, 0.0],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Filter directive used when `RUST_LOG` is unset, e.g. `"debug"` or
    /// `"info,moonvis_render=trace"`.
    pub log_level: String,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Loads `config.ron` from `config_dir`, writing the defaults there first
    /// if the file does not exist yet.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let path = config_dir.join(CONFIG_FILE_NAME);

        if path.exists() {
            let contents = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
                path: path.clone(),
                source,
            })?;
            let config: Config = ron::from_str(&contents)
                .map_err(|source| ConfigError::Parse { path: path.clone(), source })?;
            log::info!("Loaded config from {}", path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", path.display());
            Ok(config)
        }
    }

    /// Writes the config as pretty RON to `config_dir/config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(|source| ConfigError::Write {
            path: config_dir.to_path_buf(),
            source,
        })?;

        let path = config_dir.join(CONFIG_FILE_NAME);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(2)
            .separate_tuple_members(false)
            .enumerate_arrays(false);
        let serialized = ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::Serialize)?;

        std::fs::write(&path, serialized).map_err(|source| ConfigError::Write { path, source })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.window.width, 1280);
        assert_eq!(config.window.height, 720);
        assert_eq!(config.window.title, "Moon Visualization");
        assert_eq!(config.render.fov_y_degrees, 45.0);
        assert_eq!(config.sphere.sectors, 360);
        assert_eq!(config.sphere.stacks, 180);
        assert_eq!(config.camera.zoom_near, 1.4);
        assert_eq!(config.camera.zoom_far, 10.0);
        assert_eq!(
            config.texture.path,
            PathBuf::from("data/lroc_color_poles_8k.tif")
        );
    }

    #[test]
    fn test_default_config_serializes() {
        let ron_str =
            ron::ser::to_string_pretty(&Config::default(), ron::ser::PrettyConfig::new()).unwrap();
        assert!(ron_str.contains("width: 1280"));
        assert!(ron_str.contains("sectors: 360"));
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = Config::default();
        config.sphere.sectors = 64;
        config.camera.start_position = [0.0, 1.0, 4.0];
        let ron_str = ron::to_string(&config).unwrap();
        let parsed: Config = ron::from_str(&ron_str).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config: Config = ron::from_str("(window: (width: 800))").unwrap();
        assert_eq!(config.window.width, 800);
        assert_eq!(config.window.height, 720);
        assert_eq!(config.sphere, SphereConfig::default());
        assert_eq!(config.camera, CameraConfig::default());
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let result: Result<Config, _> = ron::from_str("(future_setting: true, sphere: (lod: 3))");
        assert!(result.is_ok());
    }

    #[test]
    fn test_comments_allowed() {
        let config: Config = ron::from_str("// viewer settings\n(\n  // nothing yet\n)").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_or_create_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, Config::default());
        assert!(dir.path().join(CONFIG_FILE_NAME).exists());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.window.width = 1920;
        config.texture.path = PathBuf::from("/data/moon.png");
        config.debug.log_level = "debug".to_string();

        config.save(dir.path()).unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_invalid_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "{{not valid}}").unwrap();
        let err = Config::load_or_create(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains(CONFIG_FILE_NAME));
    }

    #[test]
    fn test_default_config_dir_ends_with_app_name() {
        assert!(default_config_dir().ends_with("moonvis"));
    }
}
