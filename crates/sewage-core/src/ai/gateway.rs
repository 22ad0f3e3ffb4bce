//! AI reply gateway.
//!
//! Turns a user question into an [`AiAnswer`]. The gateway never fails from
//! the caller's point of view: when the service is disabled, the credential is
//! missing, or the remote call goes wrong, a canned fallback answer is
//! returned and tagged [`AnswerSource::Fallback`].
//!
//! [`AnswerSource::Fallback`]: sewage_types::ai::AnswerSource::Fallback

use std::time::Instant;

use chrono::Local;

use sewage_types::ai::{AiAnswer, AiQuery};
use sewage_types::config::AiConfig;

use super::client::{CallOutcome, ChatCompletionClient, ChatMessage, ChatRequest};
use super::fallback::fallback_response;
use super::prompt::system_prompt;

/// Answer text while the service is administratively disabled.
pub const DISABLED_REPLY: &str = "AI服务当前已禁用，请联系管理员。";

/// Answer text when the API call succeeded but carried no content.
pub const NO_VALID_REPLY: &str = "未能从AI服务获取有效回复。";

pub const MISSING_KEY_NOTE: &str = "\n【调试：API密钥未正确配置】";
pub const AUTH_FAILED_NOTE: &str = "\n【API密钥无效或已过期，请检查配置】";
pub const RATE_LIMITED_NOTE: &str = "\n【API调用频率超限，请稍后再试】";
pub const NETWORK_FAILED_NOTE: &str = "\n【网络请求失败，请检查超时设置与网络连接】";

/// Gateway between callers and the chat-completion backend.
///
/// Generic over [`ChatCompletionClient`] so tests can swap in a scripted client.
pub struct AiReplyGateway<C: ChatCompletionClient> {
    config: AiConfig,
    client: C,
}

impl<C: ChatCompletionClient> AiReplyGateway<C> {
    pub fn new(config: AiConfig, client: C) -> Self {
        Self { config, client }
    }

    pub fn config(&self) -> &AiConfig {
        &self.config
    }

    /// Answer `query`, falling back to a canned reply on any problem.
    pub async fn get_reply(&self, query: &AiQuery) -> AiAnswer {
        let start = Instant::now();
        let elapsed = || start.elapsed().as_millis() as u64;

        if !self.config.enabled {
            tracing::info!("AI service disabled, returning fixed reply");
            return AiAnswer::fallback(DISABLED_REPLY, elapsed());
        }

        if self.config.usable_api_key().is_none() {
            tracing::warn!("AI API key missing or placeholder, skipping remote call");
            let text = format!("{}{MISSING_KEY_NOTE}", fallback_response(query.as_str()));
            return AiAnswer::fallback(text, elapsed());
        }

        let request = self.build_request(query);
        let outcome = self.client.complete(&request).await;

        match outcome {
            CallOutcome::Success(content) => {
                let latency_ms = elapsed();
                tracing::info!(latency_ms, "AI reply received");
                if content.trim().is_empty() {
                    AiAnswer::from_api(NO_VALID_REPLY, latency_ms)
                } else {
                    AiAnswer::from_api(content, latency_ms)
                }
            }
            failure => {
                let note = match &failure {
                    CallOutcome::AuthError => AUTH_FAILED_NOTE,
                    CallOutcome::RateLimited => RATE_LIMITED_NOTE,
                    CallOutcome::NetworkError(_) => NETWORK_FAILED_NOTE,
                    _ => "",
                };
                tracing::warn!(
                    outcome = failure.label(),
                    detail = ?failure,
                    "AI call failed, using fallback reply"
                );
                let text = format!("{}{note}", fallback_response(query.as_str()));
                AiAnswer::fallback(text, elapsed())
            }
        }
    }

    /// Build the chat request: expert persona as system message, then the question.
    pub fn build_request(&self, query: &AiQuery) -> ChatRequest {
        ChatRequest {
            model: self.config.model.clone(),
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
            messages: vec![
                ChatMessage::system(system_prompt(&Local::now())),
                ChatMessage::user(query.as_str()),
            ],
        }
    }
}
