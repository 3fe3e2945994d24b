//! Chat-completion request/response types.
//!
//! These model the data shapes exchanged with an OpenAI-compatible
//! chat-completions endpoint, plus the error taxonomy used to turn
//! transport and protocol failures into user-facing notices.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role of a message in a chat-completion conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageRole::System => write!(f, "system"),
            MessageRole::User => write!(f, "user"),
            MessageRole::Assistant => write!(f, "assistant"),
        }
    }
}

impl FromStr for MessageRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "system" => Ok(MessageRole::System),
            "user" => Ok(MessageRole::User),
            "assistant" => Ok(MessageRole::Assistant),
            other => Err(format!("invalid message role: '{other}'")),
        }
    }
}

/// A single message in a chat-completion conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

/// Request to a chat-completions provider.
///
/// The system prompt travels as the first message rather than a separate field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
}

/// Text content of the first choice returned by the provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    pub content: String,
    pub model: String,
}

/// Errors from chat-completion providers.
///
/// Each variant maps to exactly one user-facing notice via [`LlmError::notice`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LlmError {
    #[error("authentication failed (401)")]
    Unauthorized,

    #[error("access forbidden (403)")]
    Forbidden,

    #[error("rate limited (429)")]
    RateLimited,

    #[error("provider internal error (500)")]
    InternalServerError,

    #[error("request failed with status {status}: {reason}")]
    Http { status: u16, reason: String },

    #[error("endpoint unreachable: {0}")]
    Unreachable(String),

    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl LlmError {
    /// Classify a non-success HTTP status.
    pub fn from_status(status: u16, reason: &str) -> Self {
        match status {
            401 => LlmError::Unauthorized,
            403 => LlmError::Forbidden,
            429 => LlmError::RateLimited,
            500 => LlmError::InternalServerError,
            _ => LlmError::Http {
                status,
                reason: reason.to_string(),
            },
        }
    }

    /// Human-readable notice for this failure.
    pub fn notice(&self) -> String {
        match self {
            LlmError::Unauthorized => "API密钥无效，请检查API密钥是否正确".to_string(),
            LlmError::Forbidden => "API访问被拒绝，可能是API密钥权限不足".to_string(),
            LlmError::RateLimited => "API请求频率过高，请稍后再试".to_string(),
            LlmError::InternalServerError => "API服务内部错误，请稍后再试".to_string(),
            LlmError::Http { reason, .. } => format!("API请求失败：{reason}"),
            LlmError::Unreachable(detail) => format!("无法连接到API服务：{detail}"),
            LlmError::MalformedResponse(_) => "API响应格式错误，无法解析响应内容".to_string(),
        }
    }
}
