//! Chat-completion client port.
//!
//! The gateway never sees transport errors. A client reports every call as a
//! [`CallOutcome`], and only `Success` is treated as an authoritative answer.

use std::fmt;

/// Role of a message in a chat-completion request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageRole {
    System,
    User,
}

impl MessageRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::System => "system",
            MessageRole::User => "user",
        }
    }
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
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
}

/// Provider-agnostic chat-completion request.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub model: String,
    pub temperature: f64,
    pub max_tokens: u32,
    pub messages: Vec<ChatMessage>,
}

/// Result of a single chat-completion call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallOutcome {
    /// The call succeeded. Holds the first choice's content, empty when the
    /// response carried no usable content.
    Success(String),
    /// HTTP 401: credential rejected.
    AuthError,
    /// HTTP 429: request rate exceeded.
    RateLimited,
    /// Connect failure, timeout, or broken connection.
    NetworkError(String),
    /// Response body could not be decoded.
    MalformedResponse(String),
    /// Any other non-success HTTP status.
    UnexpectedStatus(u16),
}

impl CallOutcome {
    /// Short label for logs.
    pub fn label(&self) -> &'static str {
        match self {
            CallOutcome::Success(_) => "success",
            CallOutcome::AuthError => "auth_error",
            CallOutcome::RateLimited => "rate_limited",
            CallOutcome::NetworkError(_) => "network_error",
            CallOutcome::MalformedResponse(_) => "malformed_response",
            CallOutcome::UnexpectedStatus(_) => "unexpected_status",
        }
    }
}

/// Trait for chat-completion backends (DeepSeek and other OpenAI-compatible APIs).
///
/// Implementations live in sewage-infra (e.g., `DeepSeekClient`) and must not
/// panic or return early errors: every failure maps onto a [`CallOutcome`].
pub trait ChatCompletionClient: Send + Sync {
    fn complete(
        &self,
        request: &ChatRequest,
    ) -> impl std::future::Future<Output = CallOutcome> + Send;
}
