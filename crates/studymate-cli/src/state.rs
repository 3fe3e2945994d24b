//! Application state wiring all services together.
//!
//! Services are generic over the `KvStore` port; AppState pins them to the
//! SQLite implementation and builds the remote provider on demand from the
//! stored API configuration.

use std::path::PathBuf;

use anyhow::Context;

use studymate_core::chat::engine::ChatResponseEngine;
use studymate_core::llm::box_provider::BoxLlmProvider;
use studymate_core::notify::NotificationBus;
use studymate_core::service::roster::PersonaRoster;
use studymate_core::service::settings::SettingsService;
use studymate_core::study::StudyAssistant;
use studymate_infra::config::load_global_config;
use studymate_infra::filesystem::resolve_data_dir;
use studymate_infra::llm::create_provider;
use studymate_infra::sqlite::kv::SqliteKvStore;
use studymate_infra::sqlite::pool::{database_url, DatabasePool};
use studymate_types::config::{ApiConfig, GlobalConfig};

/// Concrete type aliases for the service generics pinned to infra implementations.
pub type ConcreteRoster = PersonaRoster<SqliteKvStore>;
pub type ConcreteSettings = SettingsService<SqliteKvStore>;

/// Shared application state for all CLI commands.
pub struct AppState {
    pub roster: ConcreteRoster,
    pub settings: ConcreteSettings,
    pub notifications: NotificationBus,
    pub config: GlobalConfig,
    pub data_dir: PathBuf,
}

impl AppState {
    /// Initialize the application state: load config, connect to DB, wire services.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();
        tokio::fs::create_dir_all(&data_dir)
            .await
            .with_context(|| format!("failed to create data directory {}", data_dir.display()))?;

        let config = load_global_config(&data_dir).await;

        let db_pool = DatabasePool::new(&database_url(&data_dir))
            .await
            .context("failed to open the StudyMate database")?;
        let kv = SqliteKvStore::new(db_pool);

        tracing::debug!(data_dir = %data_dir.display(), "application state ready");

        Ok(Self {
            roster: PersonaRoster::new(kv.clone()),
            settings: SettingsService::new(kv),
            notifications: NotificationBus::default(),
            config,
            data_dir,
        })
    }

    /// The stored API configuration and, when it is complete, a provider for it.
    pub async fn provider(&self) -> anyhow::Result<(ApiConfig, Option<BoxLlmProvider>)> {
        let api = self.settings.api_config().await?;
        let provider = create_provider(&api, &self.config.chat);
        Ok((api, provider))
    }

    pub async fn chat_engine(&self) -> anyhow::Result<ChatResponseEngine> {
        let (_, provider) = self.provider().await?;
        Ok(ChatResponseEngine::new(provider, self.config.chat.clone()))
    }

    pub async fn study_assistant(&self) -> anyhow::Result<StudyAssistant> {
        let (_, provider) = self.provider().await?;
        Ok(StudyAssistant::new(provider, self.config.chat.model.clone()))
    }
}
