//! Hand-written test doubles shared by the unit tests in this crate.

use std::future::Future;
use std::sync::{Arc, Mutex};

use studymate_types::error::RepositoryError;
use studymate_types::llm::{CompletionRequest, CompletionResponse, LlmError};

use crate::llm::provider::LlmProvider;
use crate::storage::kv_store::KvStore;

/// Scripted provider that records every request it receives.
#[derive(Clone)]
pub struct MockProvider {
    result: Result<String, LlmError>,
    requests: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl MockProvider {
    pub fn replying(content: &str) -> Self {
        Self {
            result: Ok(content.to_string()),
            requests: Arc::default(),
        }
    }

    pub fn failing(error: LlmError) -> Self {
        Self {
            result: Err(error),
            requests: Arc::default(),
        }
    }

    /// Handle to the recorded requests; stays valid after the provider is boxed.
    pub fn requests(&self) -> Arc<Mutex<Vec<CompletionRequest>>> {
        Arc::clone(&self.requests)
    }
}

impl LlmProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl Future<Output = Result<CompletionResponse, LlmError>> + Send {
        self.requests.lock().unwrap().push(request.clone());
        let result = self.result.clone().map(|content| CompletionResponse {
            content,
            model: request.model.clone(),
        });
        async move { result }
    }
}

/// In-memory `KvStore` backed by a sorted map.
#[derive(Clone, Default)]
pub struct MemoryKvStore {
    entries: Arc<Mutex<std::collections::BTreeMap<String, serde_json::Value>>>,
}

impl KvStore for MemoryKvStore {
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>, RepositoryError> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &serde_json::Value) -> Result<(), RepositoryError> {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.clone());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), RepositoryError> {
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }

    async fn list_keys(&self) -> Result<Vec<String>, RepositoryError> {
        Ok(self.entries.lock().unwrap().keys().cloned().collect())
    }
}
