//! Key-value store trait.
//!
//! Application state (persona roster, API settings, the study document) is
//! persisted as JSON values under well-known keys. Implementations live in
//! studymate-infra.

use studymate_types::error::RepositoryError;

/// Persona roster (`Vec<Persona>`).
pub const KEY_CHARACTERS: &str = "characters";
/// Id of the active persona.
pub const KEY_ACTIVE_CHARACTER: &str = "active_character";
/// Imported study document.
pub const KEY_STUDY_CONTENT: &str = "study_content";
/// Display name of the API configuration.
pub const KEY_API_CONFIG_NAME: &str = "api_config_name";
/// API key of the remote endpoint.
pub const KEY_API_KEY: &str = "deepseek_key";
/// Base URL of the remote endpoint.
pub const KEY_API_ENDPOINT: &str = "deepseek_endpoint";

/// Trait for persistent key-value storage of JSON values.
///
/// Uses RPITIT (native async fn in traits, Rust 2024 edition).
pub trait KvStore: Send + Sync {
    /// Get a value by key. Returns None if the key does not exist.
    fn get(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = Result<Option<serde_json::Value>, RepositoryError>> + Send;

    /// Set a value for a key (upsert).
    fn set(
        &self,
        key: &str,
        value: &serde_json::Value,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Delete a key. No-op if key does not exist.
    fn delete(&self, key: &str) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// List all keys, sorted.
    fn list_keys(&self) -> impl std::future::Future<Output = Result<Vec<String>, RepositoryError>> + Send;
}
