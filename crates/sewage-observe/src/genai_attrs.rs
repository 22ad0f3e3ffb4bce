//! OpenTelemetry GenAI Semantic Convention attribute constants.
//!
//! Field names for the span wrapped around each chat-completion call. All
//! constants are string slices usable as `tracing` span field names.
//!
//! Span naming convention: `"{operation} {model}"` (e.g., `"chat deepseek-chat"`)

// --- Required attributes ---

/// The name of the operation being performed (e.g., "chat").
pub const GEN_AI_OPERATION_NAME: &str = "gen_ai.operation.name";

/// The name of the GenAI provider (e.g., "deepseek").
pub const GEN_AI_PROVIDER_NAME: &str = "gen_ai.provider.name";

// --- Recommended attributes ---

/// The model ID requested (e.g., "deepseek-chat").
pub const GEN_AI_REQUEST_MODEL: &str = "gen_ai.request.model";

/// The sampling temperature for the request.
pub const GEN_AI_REQUEST_TEMPERATURE: &str = "gen_ai.request.temperature";

/// The maximum number of output tokens requested.
pub const GEN_AI_REQUEST_MAX_TOKENS: &str = "gen_ai.request.max_tokens";

/// HTTP status code of the provider response, when one was received.
pub const HTTP_RESPONSE_STATUS_CODE: &str = "http.response.status_code";

// --- Operation name values ---

/// Standard chat completion operation.
pub const OP_CHAT: &str = "chat";

// --- Provider name values ---

/// DeepSeek provider identifier.
pub const PROVIDER_DEEPSEEK: &str = "deepseek";

/// Span name for `operation` against `model`.
pub fn span_name(operation: &str, model: &str) -> String {
    format!("{operation} {model}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_name_follows_convention() {
        assert_eq!(span_name(OP_CHAT, "deepseek-chat"), "chat deepseek-chat");
    }
}
