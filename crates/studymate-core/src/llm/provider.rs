//! LlmProvider trait definition.
//!
//! This is the abstraction every chat-completions backend implements.
//! Uses RPITIT for `complete`; [`super::box_provider::BoxLlmProvider`]
//! provides the type-erased form the engine holds at runtime.

use studymate_types::llm::{CompletionRequest, CompletionResponse, LlmError};

/// Trait for chat-completions backends.
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
/// Implementations live in studymate-infra (e.g., `ChatCompletionsProvider`).
pub trait LlmProvider: Send + Sync {
    /// Human-readable provider name (e.g., "deepseek").
    fn name(&self) -> &str;

    /// Send a completion request and receive the full response.
    ///
    /// Exactly one request is issued; retries are the caller's concern.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<CompletionResponse, LlmError>> + Send;
}
