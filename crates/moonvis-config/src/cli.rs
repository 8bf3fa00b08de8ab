//! Command-line arguments for the `moonvis` binary.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Values given on the command line win over `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "moonvis", about = "Interactive textured moon viewer")]
pub struct CliArgs {
    /// Window width.
    #[arg(long)]
    pub width: Option<u32>,

    /// Window height.
    #[arg(long)]
    pub height: Option<u32>,

    /// Surface texture (PNG, JPEG or TIFF).
    #[arg(long)]
    pub texture: Option<PathBuf>,

    /// Longitude slices of the sphere mesh.
    #[arg(long)]
    pub sectors: Option<u32>,

    /// Latitude bands of the sphere mesh.
    #[arg(long)]
    pub stacks: Option<u32>,

    /// Log filter (error, warn, info, debug, trace, or a full directive).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Config directory (defaults to the platform config dir).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(w) = args.width {
            self.window.width = w;
        }
        if let Some(h) = args.height {
            self.window.height = h;
        }
        if let Some(ref path) = args.texture {
            self.texture.path = path.clone();
        }
        if let Some(sectors) = args.sectors {
            self.sphere.sectors = sectors;
        }
        if let Some(stacks) = args.stacks {
            self.sphere.stacks = stacks;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs {
            width: Some(1920),
            texture: Some(PathBuf::from("moon.jpg")),
            sectors: Some(72),
            ..CliArgs::default()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.window.width, 1920);
        assert_eq!(config.texture.path, PathBuf::from("moon.jpg"));
        assert_eq!(config.sphere.sectors, 72);
        assert_eq!(config.window.height, 720);
        assert_eq!(config.sphere.stacks, 180);
    }

    #[test]
    fn test_cli_no_override() {
        let mut config = Config::default();
        config.apply_cli_overrides(&CliArgs::default());
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_parse_flags() {
        let args = CliArgs::try_parse_from([
            "moonvis",
            "--stacks",
            "90",
            "--log-level",
            "debug",
            "--config",
            "/tmp/moonvis",
        ])
        .unwrap();
        assert_eq!(args.stacks, Some(90));
        assert_eq!(args.log_level.as_deref(), Some("debug"));
        assert_eq!(args.config, Some(PathBuf::from("/tmp/moonvis")));
        assert_eq!(args.width, None);
    }

    #[test]
    fn test_rejects_non_numeric_size() {
        assert!(CliArgs::try_parse_from(["moonvis", "--width", "wide"]).is_err());
    }
}
