//! Tracing subscriber setup for the viewer.
//!
//! Console output always; a JSON log file as well in debug builds. `log`
//! records from the render and config crates reach the same subscriber
//! through `tracing-subscriber`'s `tracing-log` bridge.

use std::path::Path;

use moonvis_config::Config;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Used when neither `RUST_LOG` nor the config names a filter. GPU backends
/// are very chatty at `info`.
pub const DEFAULT_FILTER: &str = "info,wgpu=warn,naga=warn";

/// Name of the JSON log written in debug builds.
pub const LOG_FILE_NAME: &str = "moonvis.log";

/// Filter directive taken from the config, falling back to [`DEFAULT_FILTER`].
pub fn filter_directive(config: Option<&Config>) -> String {
    config
        .map(|c| c.debug.log_level.trim())
        .filter(|level| !level.is_empty())
        .map_or_else(|| DEFAULT_FILTER.to_string(), str::to_string)
}

/// Installs the global subscriber.
///
/// `RUST_LOG` takes precedence over `config.debug.log_level`. When
/// `debug_build` is set and `log_dir` is writable, records are also written
/// as JSON lines to `log_dir/moonvis.log`.
///
/// Fails if a global subscriber is already installed.
pub fn init_logging(
    log_dir: Option<&Path>,
    debug_build: bool,
    config: Option<&Config>,
) -> Result<(), TryInitError> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(config)));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer);

    if debug_build
        && let Some(log_dir) = log_dir
        && std::fs::create_dir_all(log_dir).is_ok()
        && let Ok(log_file) = std::fs::File::create(log_dir.join(LOG_FILE_NAME))
    {
        let file_layer = fmt::layer()
            .with_writer(log_file)
            .with_ansi(false)
            .with_target(true)
            .with_timer(fmt::time::uptime())
            .json();

        return subscriber.with(file_layer).try_init();
    }

    subscriber.try_init()
}
