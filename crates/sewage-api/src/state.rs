//! Application state wiring all services together.
//!
//! AppState holds the concrete service instances used by both CLI and REST API.
//! The gateway and history service are generic over core ports; AppState pins
//! them to the infra implementations.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;

use sewage_core::ai::gateway::AiReplyGateway;
use sewage_core::service::history::HistoryQueryService;
use sewage_infra::llm::deepseek::DeepSeekClient;
use sewage_infra::sqlite::history::SqliteHistoryRepository;
use sewage_infra::sqlite::pool::{DatabasePool, default_database_url};
use sewage_types::config::AppConfig;

/// Concrete type aliases for the service generics pinned to infra implementations.
pub type ConcreteGateway = AiReplyGateway<DeepSeekClient>;

pub type ConcreteHistoryService = HistoryQueryService<SqliteHistoryRepository>;

/// Shared application state holding all services.
///
/// Cloned into every request; everything inside is behind `Arc` or
/// internally reference-counted.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub gateway: Arc<ConcreteGateway>,
    pub history: Arc<ConcreteHistoryService>,
    pub data_dir: PathBuf,
}

impl AppState {
    /// Initialize the application state: connect to DB, build the HTTP client, wire services.
    pub async fn init(config: AppConfig, data_dir: PathBuf) -> anyhow::Result<Self> {
        tokio::fs::create_dir_all(&data_dir)
            .await
            .with_context(|| format!("failed to create data directory {}", data_dir.display()))?;

        let db_url = config
            .database
            .url
            .clone()
            .unwrap_or_else(|| default_database_url(&data_dir));
        let db_pool = DatabasePool::new(&db_url)
            .await
            .with_context(|| format!("failed to open database {db_url}"))?;

        let history = HistoryQueryService::new(SqliteHistoryRepository::new(
            db_pool,
            config.history.match_mode,
        ));

        let client = DeepSeekClient::from_config(&config.ai)
            .context("failed to build DeepSeek HTTP client")?;
        let gateway = AiReplyGateway::new(config.ai.clone(), client);

        tracing::info!(
            ai_enabled = config.ai.enabled,
            ai_key_configured = config.ai.usable_api_key().is_some(),
            model = %config.ai.model,
            match_mode = %config.history.match_mode,
            "application state ready"
        );

        Ok(Self {
            config: Arc::new(config),
            gateway: Arc::new(gateway),
            history: Arc::new(history),
            data_dir,
        })
    }
}
