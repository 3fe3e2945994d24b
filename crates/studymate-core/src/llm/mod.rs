//! Chat-completions provider abstraction.

pub mod box_provider;
pub mod provider;

use tracing::Instrument;

use studymate_types::llm::{CompletionRequest, LlmError};

use box_provider::BoxLlmProvider;

/// Issue one request and return the non-empty content of the first choice.
///
/// Wraps the call in a `gen_ai.*` span. An empty reply counts as malformed.
pub async fn complete_text(
    provider: &BoxLlmProvider,
    operation: &'static str,
    request: &CompletionRequest,
) -> Result<String, LlmError> {
    let span = tracing::info_span!(
        "gen_ai.complete",
        gen_ai.operation.name = operation,
        gen_ai.system = provider.name(),
        gen_ai.request.model = %request.model,
        gen_ai.request.max_tokens = request.max_tokens,
        gen_ai.request.temperature = ?request.temperature,
        gen_ai.response.length = tracing::field::Empty,
    );

    async {
        let response = provider.complete(request).await?;
        if response.content.is_empty() {
            return Err(LlmError::MalformedResponse(
                "first choice has empty message content".to_string(),
            ));
        }
        tracing::Span::current().record("gen_ai.response.length", response.content.len());
        Ok(response.content)
    }
    .instrument(span)
    .await
}
