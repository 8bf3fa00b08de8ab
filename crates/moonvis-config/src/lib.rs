//! Viewer settings persisted as `config.ron`, with command-line overrides.
//!
//! Every section falls back to its defaults when missing, and unknown fields
//! are ignored, so config files survive upgrades in both directions.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    CONFIG_FILE_NAME, CameraConfig, Config, DebugConfig, RenderConfig, SphereConfig,
    TextureConfig, WindowConfig, default_config_dir,
};
pub use error::ConfigError;
