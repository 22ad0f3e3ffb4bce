//! Configuration loader for Sewage Watch.
//!
//! Reads `config.toml` from the data directory (`~/.sewage-watch/` in
//! production) or an explicit path, deserializes it into [`AppConfig`], then
//! applies environment overrides. Falls back to defaults when the file is
//! missing or malformed.

use std::path::{Path, PathBuf};

use sewage_types::config::AppConfig;
use sewage_types::error::ConfigError;

use crate::sqlite::pool::default_database_url;

pub const ENV_DATA_DIR: &str = "SEWAGE_WATCH_DATA_DIR";
pub const ENV_API_KEY: &str = "DEEPSEEK_API_KEY";
pub const ENV_BASE_URL: &str = "DEEPSEEK_BASE_URL";
pub const ENV_MODEL: &str = "DEEPSEEK_MODEL";
pub const ENV_AI_ENABLED: &str = "SEWAGE_WATCH_AI_ENABLED";
pub const ENV_DATABASE_URL: &str = "SEWAGE_WATCH_DATABASE_URL";

/// Resolve the data directory.
///
/// Uses `SEWAGE_WATCH_DATA_DIR` if set, then `~/.sewage-watch`, then
/// `./.sewage-watch` when no home directory is known.
pub fn resolve_data_dir() -> PathBuf {
    data_dir_from(|key| std::env::var(key).ok())
}

fn data_dir_from(lookup: impl Fn(&str) -> Option<String>) -> PathBuf {
    if let Some(dir) = lookup(ENV_DATA_DIR).filter(|d| !d.trim().is_empty()) {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".sewage-watch");
    }

    PathBuf::from(".sewage-watch")
}

/// Load configuration from `config_path`, or `{data_dir}/config.toml` when
/// no path is given, then apply environment overrides.
///
/// - Missing file: defaults.
/// - Unreadable or unparsable file: warning, then defaults.
/// - `database.url` unset after overrides: `sqlite://{data_dir}/sewage-watch.db?mode=rwc`.
pub async fn load_config(config_path: Option<&Path>, data_dir: &Path) -> AppConfig {
    let path = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| data_dir.join("config.toml"));

    let mut config = read_config_file(&path).await;
    apply_env_overrides(&mut config, |key| std::env::var(key).ok());

    if config.database.url.is_none() {
        config.database.url = Some(default_database_url(data_dir));
    }

    config
}

async fn read_config_file(path: &Path) -> AppConfig {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config file found at {}, using defaults", path.display());
            return AppConfig::default();
        }
        Err(err) => {
            let err = ConfigError::Read {
                path: path.display().to_string(),
                message: err.to_string(),
            };
            tracing::warn!("{err}, using defaults");
            return AppConfig::default();
        }
    };

    match toml::from_str::<AppConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            let err = ConfigError::Parse {
                path: path.display().to_string(),
                message: err.to_string(),
            };
            tracing::warn!("{err}, using defaults");
            AppConfig::default()
        }
    }
}

/// Apply environment overrides to `config`. Invalid values are logged and ignored.
pub fn apply_env_overrides(config: &mut AppConfig, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(key) = lookup(ENV_API_KEY) {
        config.ai.api_key = Some(key);
    }
    if let Some(url) = lookup(ENV_BASE_URL) {
        config.ai.base_url = url;
    }
    if let Some(model) = lookup(ENV_MODEL) {
        config.ai.model = model;
    }
    if let Some(raw) = lookup(ENV_AI_ENABLED) {
        match parse_bool(ENV_AI_ENABLED, &raw) {
            Ok(enabled) => config.ai.enabled = enabled,
            Err(err) => tracing::warn!("{err}, keeping ai.enabled = {}", config.ai.enabled),
        }
    }
    if let Some(url) = lookup(ENV_DATABASE_URL) {
        config.database.url = Some(url);
    }
}

fn parse_bool(key: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("expected a boolean, got '{other}'"),
        }),
    }
}
