//! Logging setup.
//!
//! Human-readable events go to stderr. When a log file is configured the
//! same events are also appended to it, without ANSI codes.

use std::path::PathBuf;

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const LOG_PATH_VAR: &str = "TEXCHECK_LOG_PATH";
const LOG_FILE_NAME: &str = "texcheck.log";

/// Where file logs go, if anywhere.
#[derive(Debug, Clone, Default)]
pub struct ObservabilityConfig {
    /// Full path of the log file.
    pub log_file: Option<PathBuf>,
}

impl ObservabilityConfig {
    /// `TEXCHECK_LOG_PATH` if set, else `texcheck.log` inside `log_dir`.
    ///
    /// `log_dir` already reflects `TEXCHECK_LOG_DIR`, which the config
    /// loader reads.
    pub fn from_env_with_overrides(log_dir: Option<PathBuf>) -> Self {
        let log_file = std::env::var_os(LOG_PATH_VAR)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .or_else(|| log_dir.map(|dir| dir.join(LOG_FILE_NAME)));
        Self { log_file }
    }
}

/// `RUST_LOG` when set; otherwise derived from the flags and config level.
pub fn env_filter(quiet: bool, verbose: u8, level: &str) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => level,
        (false, 1) => "debug",
        (false, _) => "trace",
    };
    EnvFilter::new(level)
}

/// Install the global subscriber.
///
/// Keep the returned guard alive until exit so buffered file output is
/// flushed.
pub fn init_observability(
    config: &ObservabilityConfig,
    filter: EnvFilter,
) -> anyhow::Result<Option<WorkerGuard>> {
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let (file_layer, guard) = match config.log_file {
        Some(ref path) => {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map_or_else(|| PathBuf::from("."), PathBuf::from);
            let name = path
                .file_name()
                .with_context(|| format!("log path has no file name: {}", path.display()))?;
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("failed to create log directory {}", dir.display()))?;
            let (writer, guard) =
                tracing_appender::non_blocking(tracing_appender::rolling::never(&dir, name));
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("a global tracing subscriber is already installed")?;
    Ok(guard)
}
