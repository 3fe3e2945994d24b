//! ChatCompletionsProvider -- concrete [`LlmProvider`] for any endpoint that
//! speaks the `/chat/completions` protocol (DeepSeek by default).
//!
//! The API key is wrapped in [`secrecy::SecretString`] and is only exposed
//! when building the `Authorization` header.

pub mod types;

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use studymate_core::llm::provider::LlmProvider;
use studymate_types::llm::{CompletionRequest, CompletionResponse, LlmError};

use self::types::{ChatRequest, ChatResponse};

/// Chat-completions provider.
///
/// Does NOT derive Debug so the key cannot leak through formatting.
pub struct ChatCompletionsProvider {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
    name: String,
}

impl ChatCompletionsProvider {
    /// Create a provider for `endpoint` (e.g. `https://api.deepseek.com/v1`).
    ///
    /// A trailing slash on the endpoint is ignored.
    pub fn new(
        name: impl Into<String>,
        endpoint: &str,
        api_key: SecretString,
        timeout: Duration,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("failed to create reqwest client");

        Self {
            client,
            api_key,
            base_url: endpoint.trim_end_matches('/').to_string(),
            name: name.into(),
        }
    }

    fn url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

impl LlmProvider for ChatCompletionsProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let body = ChatRequest::from(request);

        let response = self
            .client
            .post(self.url())
            .bearer_auth(self.api_key.expose_secret())
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Unreachable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            tracing::debug!(status = status.as_u16(), body = %error_body, "chat completion rejected");
            return Err(LlmError::from_status(
                status.as_u16(),
                status.canonical_reason().unwrap_or("unknown status"),
            ));
        }

        let chat_resp: ChatResponse = response
            .json()
            .await
            .map_err(|e| LlmError::MalformedResponse(format!("failed to parse response: {e}")))?;

        let model = chat_resp.model.clone().unwrap_or_else(|| request.model.clone());
        let content = chat_resp.first_content()?;

        Ok(CompletionResponse { content, model })
    }
}
