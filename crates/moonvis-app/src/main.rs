//! The `moonvis` binary.

use clap::Parser;
use moonvis_app::platform::AppDirs;
use moonvis_config::{CliArgs, Config};

fn main() {
    let args = CliArgs::parse();
    let dirs = AppDirs::resolve(args.config.as_deref());
    if let Err(e) = dirs.create_dirs() {
        eprintln!("Failed to create application directories: {e}");
    }

    // Logging is not up yet, so config problems go to stderr.
    let mut config = Config::load_or_create(&dirs.config_dir).unwrap_or_else(|e| {
        eprintln!("Using default config: {e}");
        Config::default()
    });
    config.apply_cli_overrides(&args);

    if let Err(e) = moonvis_log::init_logging(Some(dirs.log_dir.as_path()), cfg!(debug_assertions), Some(&config)) {
        eprintln!("Failed to initialize logging: {e}");
    }
    tracing::info!(config_dir = %dirs.config_dir.display(), "Starting moonvis");

    if let Err(e) = moonvis_app::run(config) {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}
