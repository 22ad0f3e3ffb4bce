//! DeepSeek chat-completions wire types.
//!
//! DeepSeek speaks the OpenAI chat-completions format. Only the fields this
//! client sends or reads are modelled; everything else in a response is ignored.

use serde::{Deserialize, Serialize};

/// Request body for `POST /chat/completions`.
#[derive(Debug, Clone, Serialize)]
pub struct DeepSeekRequest {
    pub model: String,
    pub temperature: f64,
    pub max_tokens: u32,
    pub messages: Vec<DeepSeekMessage>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeepSeekMessage {
    pub role: String,
    pub content: String,
}

/// Non-streaming response body.
#[derive(Debug, Clone, Deserialize)]
pub struct DeepSeekResponse {
    #[serde(default)]
    pub choices: Vec<DeepSeekChoice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeepSeekChoice {
    pub message: DeepSeekChoiceMessage,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeepSeekChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl DeepSeekResponse {
    /// Content of the first choice, empty when there is none.
    pub fn first_content(self) -> String {
        self.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default()
    }
}
