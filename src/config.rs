use std::path::{Path, PathBuf};

use compact_str::CompactString;
use directories::BaseDirs;
use serde::{Deserialize, Serialize};

use crate::{
    client::config::{DEFAULT_OFFICIAL_URL, DEFAULT_TRENDING_URL},
    result::{AppError, Result},
};

/// Settings read from `repolens.toml`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub official_url: CompactString,
    pub trending_url: CompactString,
    pub timeout_secs: u64,
    /// Filter directive for logging, e.g. `debug` or `repolens=trace`
    pub log_level: Option<CompactString>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            official_url: DEFAULT_OFFICIAL_URL.into(),
            trending_url: DEFAULT_TRENDING_URL.into(),
            timeout_secs: 30,
            log_level: None,
        }
    }
}

pub fn default_config_path() -> PathBuf {
    if let Some(dirs) = BaseDirs::new() {
        dirs.config_dir().join("repolens.toml")
    } else {
        PathBuf::from("repolens.toml")
    }
}

/// Load the config file, falling back to defaults when it does not exist
pub fn load_config(config_file: &Path) -> Result<AppConfig> {
    if !config_file.exists() {
        return Ok(AppConfig::default());
    }

    confy::load_path(config_file)
        .map_err(|e| AppError::config_load_error(config_file.to_path_buf(), e))
}

pub fn save_config(config_file: &Path, config: &AppConfig) -> Result<()> {
    confy::store_path(config_file, config)
        .map_err(|e| AppError::config_save_error(config_file.to_path_buf(), e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_file(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("repolens-test-{}", std::process::id()))
            .join(name)
    }

    #[test]
    fn missing_file_gives_defaults() {
        let config = load_config(&scratch_file("missing.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn saved_config_is_loaded_back() {
        let path = scratch_file("saved.toml");
        let config = AppConfig {
            official_url: "http://localhost:9000".into(),
            timeout_secs: 5,
            log_level: Some("debug".into()),
            ..Default::default()
        };

        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        save_config(&path, &config).unwrap();
        assert_eq!(load_config(&path).unwrap(), config);

        let _ = std::fs::remove_file(&path);
    }
}
