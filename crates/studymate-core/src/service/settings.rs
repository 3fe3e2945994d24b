//! API configuration and study document persistence.

use studymate_types::config::{ApiConfig, DEFAULT_CONFIG_NAME, DEFAULT_ENDPOINT};
use studymate_types::document::Document;
use studymate_types::error::RepositoryError;

use crate::storage::kv_store::{
    KvStore, KEY_API_CONFIG_NAME, KEY_API_ENDPOINT, KEY_API_KEY, KEY_STUDY_CONTENT,
};

/// Reads and writes the settings kept in the key-value store.
pub struct SettingsService<K: KvStore> {
    kv: K,
}

impl<K: KvStore> SettingsService<K> {
    pub fn new(kv: K) -> Self {
        Self { kv }
    }

    /// Stored API configuration. Missing name or endpoint take their
    /// defaults; a missing key stays `None`.
    pub async fn api_config(&self) -> Result<ApiConfig, RepositoryError> {
        let name = self.get_string(KEY_API_CONFIG_NAME).await?;
        let api_key = self.get_string(KEY_API_KEY).await?;
        let endpoint = self.get_string(KEY_API_ENDPOINT).await?;

        Ok(ApiConfig {
            name: name.unwrap_or_else(|| DEFAULT_CONFIG_NAME.to_string()),
            api_key: api_key.filter(|k| !k.is_empty()),
            endpoint: endpoint.unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
        })
    }

    pub async fn save_api_config(&self, config: &ApiConfig) -> Result<(), RepositoryError> {
        self.set_string(KEY_API_CONFIG_NAME, &config.name).await?;
        match config.api_key.as_deref() {
            Some(key) => self.set_string(KEY_API_KEY, key).await?,
            None => self.kv.delete(KEY_API_KEY).await?,
        }
        self.set_string(KEY_API_ENDPOINT, &config.endpoint).await?;
        tracing::info!(name = %config.name, endpoint = %config.endpoint, "api configuration saved");
        Ok(())
    }

    /// The persisted study document, if any.
    pub async fn document(&self) -> Result<Option<Document>, RepositoryError> {
        match self.kv.get(KEY_STUDY_CONTENT).await? {
            Some(value) => serde_json::from_value(value)
                .map(Some)
                .map_err(|e| RepositoryError::Query(format!("invalid study document: {e}"))),
            None => Ok(None),
        }
    }

    pub async fn save_document(&self, document: &Document) -> Result<(), RepositoryError> {
        let value = serde_json::to_value(document)
            .map_err(|e| RepositoryError::Query(format!("failed to serialize document: {e}")))?;
        self.kv.set(KEY_STUDY_CONTENT, &value).await
    }

    async fn get_string(&self, key: &str) -> Result<Option<String>, RepositoryError> {
        Ok(self
            .kv
            .get(key)
            .await?
            .and_then(|value| value.as_str().map(str::to_string)))
    }

    async fn set_string(&self, key: &str, value: &str) -> Result<(), RepositoryError> {
        self.kv
            .set(key, &serde_json::Value::String(value.to_string()))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MemoryKvStore;
    use studymate_types::document::Chapter;

    #[tokio::test]
    async fn test_api_config_defaults_when_empty() {
        let settings = SettingsService::new(MemoryKvStore::default());
        let config = settings.api_config().await.unwrap();
        assert_eq!(config.endpoint, "https://api.deepseek.com/v1");
        assert!(config.api_key.is_none());
        assert!(!config.is_configured());
    }

    #[tokio::test]
    async fn test_api_config_roundtrip() {
        let settings = SettingsService::new(MemoryKvStore::default());
        let config = ApiConfig {
            name: "work".to_string(),
            api_key: Some("sk-1".to_string()),
            endpoint: "https://proxy.example/v1".to_string(),
        };
        settings.save_api_config(&config).await.unwrap();
        assert_eq!(settings.api_config().await.unwrap(), config);

        let cleared = ApiConfig {
            api_key: None,
            ..config
        };
        settings.save_api_config(&cleared).await.unwrap();
        assert!(settings.api_config().await.unwrap().api_key.is_none());
    }

    #[tokio::test]
    async fn test_document_roundtrip() {
        let settings = SettingsService::new(MemoryKvStore::default());
        assert!(settings.document().await.unwrap().is_none());

        let mut chapter = Chapter::new("第一章", "正文");
        chapter.translation = Some("Body".to_string());
        let document = Document {
            title: "书".to_string(),
            chapters: vec![chapter],
        };
        settings.save_document(&document).await.unwrap();
        assert_eq!(settings.document().await.unwrap(), Some(document));
    }
}
