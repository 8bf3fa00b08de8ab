//! Where the viewer keeps its files on disk.

use std::path::{Path, PathBuf};

const APP_NAME: &str = "moonvis";

/// Config and log directories for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppDirs {
    /// Holds `config.ron`.
    pub config_dir: PathBuf,
    pub log_dir: PathBuf,
}

impl AppDirs {
    /// Platform directories, with `config_override` (from `--config`)
    /// replacing the config location. Logs go to the platform cache dir,
    /// or next to the config when the OS has none.
    pub fn resolve(config_override: Option<&Path>) -> Self {
        let config_dir = config_override
            .map(Path::to_path_buf)
            .unwrap_or_else(moonvis_config::default_config_dir);
        let log_dir = dirs::cache_dir()
            .map(|cache| cache.join(APP_NAME))
            .unwrap_or_else(|| config_dir.clone())
            .join("logs");
        Self {
            config_dir,
            log_dir,
        }
    }

    /// Everything under `root`, for tests and portable installs.
    pub fn resolve_with_root(root: &Path) -> Self {
        let app_dir = root.join(APP_NAME);
        Self {
            config_dir: app_dir.join("config"),
            log_dir: app_dir.join("logs"),
        }
    }

    pub fn create_dirs(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.config_dir)?;
        std::fs::create_dir_all(&self.log_dir)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_replaces_config_dir() {
        let dirs = AppDirs::resolve(Some(Path::new("/tmp/moonvis-custom")));
        assert_eq!(dirs.config_dir, PathBuf::from("/tmp/moonvis-custom"));
        assert!(dirs.log_dir.ends_with("logs"));
    }

    #[test]
    fn test_default_config_dir_is_app_specific() {
        let dirs = AppDirs::resolve(None);
        assert!(dirs.config_dir.ends_with(APP_NAME));
    }

    #[test]
    fn test_directory_creation() {
        let tmp = tempfile::tempdir().unwrap();
        let dirs = AppDirs::resolve_with_root(tmp.path());
        dirs.create_dirs().unwrap();
        assert!(dirs.config_dir.is_dir());
        assert!(dirs.log_dir.is_dir());
        assert!(dirs.config_dir.starts_with(tmp.path()));
    }
}
