//! Tracing subscriber setup for the command line binary

use std::path::PathBuf;

use compact_str::CompactString;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::result::{AppError, Result};

const LOG_FILE_PREFIX: &str = "repolens.log";

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is not set
    pub level: CompactString,
    /// When set, JSON logs are also written to a daily rolling file here
    pub log_dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "warn".into(), log_dir: None }
    }
}

impl LoggingConfig {
    /// Reads `REPOLENS_LOG` and `REPOLENS_LOG_DIR`. `REPOLENS_LOG` wins over
    /// `config_level`, which wins over the default.
    pub fn from_env(config_level: Option<&str>) -> Self {
        Self::resolve(
            std::env::var("REPOLENS_LOG").ok().as_deref(),
            config_level,
            std::env::var_os("REPOLENS_LOG_DIR").map(PathBuf::from),
        )
    }

    fn resolve(
        env_level: Option<&str>,
        config_level: Option<&str>,
        log_dir: Option<PathBuf>,
    ) -> Self {
        let level = env_level
            .or(config_level)
            .map(CompactString::from)
            .unwrap_or_else(|| Self::default().level);

        Self { level, log_dir }
    }
}

/// Keeps the background log writers alive; drop it last.
#[derive(Debug)]
pub struct LoggingGuard {
    _stderr: WorkerGuard,
    _file: Option<WorkerGuard>,
}

pub fn init_logging(config: LoggingConfig) -> Result<LoggingGuard> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.level.as_str()))
        .map_err(AppError::logging_error)?;

    let (stderr_writer, stderr_guard) = tracing_appender::non_blocking(std::io::stderr());
    let stderr_layer = fmt::layer()
        .with_writer(stderr_writer)
        .with_target(false);

    let (file_layer, file_guard) = match &config.log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .json()
                .with_ansi(false)
                .with_writer(writer);
            (Some(layer), Some(guard))
        },
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .map_err(AppError::logging_error)?;

    Ok(LoggingGuard { _stderr: stderr_guard, _file: file_guard })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_level_wins_over_config_level() {
        let config = LoggingConfig::resolve(Some("trace"), Some("debug"), None);
        assert_eq!(config.level, "trace");
    }

    #[test]
    fn config_level_used_without_env() {
        let config = LoggingConfig::resolve(None, Some("debug"), Some(PathBuf::from("/tmp/logs")));
        assert_eq!(config.level, "debug");
        assert_eq!(config.log_dir, Some(PathBuf::from("/tmp/logs")));
    }

    #[test]
    fn default_level_is_warn() {
        assert_eq!(LoggingConfig::resolve(None, None, None).level, "warn");
    }
}
