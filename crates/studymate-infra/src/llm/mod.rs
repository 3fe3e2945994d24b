//! LLM provider implementations.
//!
//! Contains the concrete [`LlmProvider`](studymate_core::llm::provider::LlmProvider)
//! used by StudyMate and the factory ([`create_provider`]) that builds it
//! from the stored [`ApiConfig`].

pub mod chat_completions;

use std::time::Duration;

use secrecy::SecretString;

use studymate_core::llm::box_provider::BoxLlmProvider;
use studymate_types::config::{ApiConfig, ChatSettings};

use self::chat_completions::ChatCompletionsProvider;

/// Create a [`BoxLlmProvider`] from the stored API configuration.
///
/// Returns `None` when the configuration lacks a key or endpoint; callers
/// treat that as "not configured" and take their offline path.
pub fn create_provider(config: &ApiConfig, settings: &ChatSettings) -> Option<BoxLlmProvider> {
    if !config.is_configured() {
        return None;
    }
    let key = config.api_key.as_deref()?.trim().to_string();
    let provider = ChatCompletionsProvider::new(
        config.name.clone(),
        config.endpoint.trim(),
        SecretString::from(key),
        Duration::from_secs(settings.timeout_secs),
    );
    Some(BoxLlmProvider::new(provider))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_provider_configured() {
        let config = ApiConfig {
            api_key: Some("sk-test".to_string()),
            ..ApiConfig::default()
        };
        let provider = create_provider(&config, &ChatSettings::default()).unwrap();
        assert_eq!(provider.name(), "DeepSeek");
    }

    #[test]
    fn test_create_provider_missing_key() {
        assert!(create_provider(&ApiConfig::default(), &ChatSettings::default()).is_none());
    }

    #[test]
    fn test_create_provider_blank_endpoint() {
        let config = ApiConfig {
            api_key: Some("sk-test".to_string()),
            endpoint: "  ".to_string(),
            ..ApiConfig::default()
        };
        assert!(create_provider(&config, &ChatSettings::default()).is_none());
    }
}
