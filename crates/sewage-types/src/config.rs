//! Configuration types for Sewage Watch.
//!
//! `AppConfig` mirrors the top-level `config.toml`. Every section and field
//! has a default, so an empty or missing file yields a working configuration
//! (with the AI gateway degrading to fallback answers until a key is set).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::history::HistoryMatchMode;

/// Top-level configuration, loaded once at start and read-only afterwards.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub ai: AiConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub history: HistoryConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Settings for the chat-completion gateway.
#[derive(Clone, Serialize, Deserialize)]
pub struct AiConfig {
    /// Administrative switch. When false no external call is ever attempted.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Bearer credential. `None`, blank, or a value containing "placeholder"
    /// counts as not configured.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Full chat-completions endpoint URL.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_temperature")]
    pub temperature: f64,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,

    #[serde(default = "default_read_timeout_ms")]
    pub read_timeout_ms: u64,
}

impl AiConfig {
    /// Returns the credential if it looks usable.
    pub fn usable_api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty() && !k.contains("placeholder"))
    }
}

fn default_enabled() -> bool {
    true
}

fn default_base_url() -> String {
    "https://api.deepseek.com/chat/completions".to_string()
}

fn default_model() -> String {
    "deepseek-chat".to_string()
}

fn default_temperature() -> f64 {
    0.7
}

fn default_max_tokens() -> u32 {
    1500
}

fn default_connect_timeout_ms() -> u64 {
    10_000
}

fn default_read_timeout_ms() -> u64 {
    30_000
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            api_key: None,
            base_url: default_base_url(),
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            connect_timeout_ms: default_connect_timeout_ms(),
            read_timeout_ms: default_read_timeout_ms(),
        }
    }
}

// Hand-written so the credential never ends up in logs.
impl fmt::Debug for AiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AiConfig")
            .field("enabled", &self.enabled)
            .field("api_key", &self.api_key.as_ref().map(|_| "****"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("connect_timeout_ms", &self.connect_timeout_ms)
            .field("read_timeout_ms", &self.read_timeout_ms)
            .finish()
    }
}

/// HTTP listener settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Database location. `None` means `<data_dir>/sewage-watch.db`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistoryConfig {
    #[serde(default)]
    pub match_mode: HistoryMatchMode,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Export spans through OpenTelemetry (stdout exporter).
    #[serde(default)]
    pub otel: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert!(config.ai.enabled);
        assert!(config.ai.api_key.is_none());
        assert_eq!(config.ai.base_url, "https://api.deepseek.com/chat/completions");
        assert_eq!(config.ai.model, "deepseek-chat");
        assert_eq!(config.ai.max_tokens, 1500);
        assert_eq!(config.ai.connect_timeout_ms, 10_000);
        assert_eq!(config.ai.read_timeout_ms, 30_000);
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.history.match_mode, HistoryMatchMode::Exact);
        assert!(!config.logging.otel);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
[ai]
api_key = "sk-live"
model = "deepseek-reasoner"

[history]
match_mode = "contains"
"#,
        )
        .unwrap();
        assert_eq!(config.ai.model, "deepseek-reasoner");
        assert_eq!(config.ai.temperature, 0.7);
        assert!(config.ai.enabled);
        assert_eq!(config.history.match_mode, HistoryMatchMode::Contains);
        assert_eq!(config.server.host, "127.0.0.1");
    }

    #[test]
    fn test_usable_api_key() {
        let mut ai = AiConfig::default();
        assert_eq!(ai.usable_api_key(), None);

        ai.api_key = Some("   ".to_string());
        assert_eq!(ai.usable_api_key(), None);

        ai.api_key = Some("sk-placeholder-key".to_string());
        assert_eq!(ai.usable_api_key(), None);

        ai.api_key = Some("sk-real".to_string());
        assert_eq!(ai.usable_api_key(), Some("sk-real"));
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let ai = AiConfig {
            api_key: Some("sk-very-secret".to_string()),
            ..Default::default()
        };
        let printed = format!("{ai:?}");
        assert!(!printed.contains("sk-very-secret"));
        assert!(printed.contains("****"));
    }
}
