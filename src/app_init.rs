use std::path::{Path, PathBuf};

use crate::{
    client::{ClientConfig, RepositoryApi},
    config::{AppConfig, load_config},
    logging::{LoggingConfig, LoggingGuard, init_logging},
    result::Result,
};

/// Directory that receives response dumps when `--debug` is passed
pub const RESPONSE_DUMP_DIR: &str = "repolens-responses";

pub struct AppComponents {
    pub api: RepositoryApi,
    pub _log_guard: LoggingGuard,
}

pub fn initialize_app(config_path: &Path, debug: bool) -> Result<AppComponents> {
    let config = load_config(config_path)?;

    let log_guard = initialize_logging(&config)?;
    tracing::debug!(
        version = env!("CARGO_PKG_VERSION"),
        config = %config_path.display(),
        "repolens starting up"
    );

    let api = create_api(&config, debug)?;

    Ok(AppComponents { api, _log_guard: log_guard })
}

fn initialize_logging(config: &AppConfig) -> Result<LoggingGuard> {
    init_logging(LoggingConfig::from_env(config.log_level.as_deref()))
}

fn create_api(config: &AppConfig, debug: bool) -> Result<RepositoryApi> {
    let mut client_config = ClientConfig::from(config);
    if debug {
        client_config = client_config.with_response_dump(PathBuf::from(RESPONSE_DUMP_DIR));
    }

    Ok(RepositoryApi::new(client_config)?)
}
