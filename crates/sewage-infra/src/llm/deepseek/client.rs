//! DeepSeekClient -- concrete [`ChatCompletionClient`] for the DeepSeek API.
//!
//! Sends one non-streaming request to the configured chat-completions
//! endpoint with a bearer token and maps every result, including transport
//! failures, onto a [`CallOutcome`].
//!
//! The API key is wrapped in [`secrecy::SecretString`] and is never logged
//! or included in `Debug` output.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use tracing::Instrument;

use sewage_core::ai::client::{CallOutcome, ChatCompletionClient, ChatRequest};
use sewage_observe::genai_attrs::{OP_CHAT, PROVIDER_DEEPSEEK, span_name};
use sewage_types::config::AiConfig;

use super::types::{DeepSeekMessage, DeepSeekRequest, DeepSeekResponse};

/// DeepSeek chat-completion client.
///
/// # API Key Security
///
/// The API key is stored as a [`SecretString`] and is only exposed when
/// building the `Authorization` header.
pub struct DeepSeekClient {
    client: reqwest::Client,
    api_key: Option<SecretString>,
    endpoint: String,
}

impl DeepSeekClient {
    /// Build a client from the AI section of the configuration.
    ///
    /// Connect and read timeouts come from the config; their sum also caps
    /// the whole call. A missing or placeholder key is accepted here, calls
    /// made without one report [`CallOutcome::AuthError`] without touching
    /// the network.
    pub fn from_config(config: &AiConfig) -> Result<Self, reqwest::Error> {
        let connect = Duration::from_millis(config.connect_timeout_ms);
        let read = Duration::from_millis(config.read_timeout_ms);

        let client = reqwest::Client::builder()
            .connect_timeout(connect)
            .read_timeout(read)
            .timeout(connect + read)
            .build()?;

        Ok(Self {
            client,
            api_key: config
                .usable_api_key()
                .map(|key| SecretString::from(key.to_string())),
            endpoint: config.base_url.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn to_wire_request(request: &ChatRequest) -> DeepSeekRequest {
        DeepSeekRequest {
            model: request.model.clone(),
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            messages: request
                .messages
                .iter()
                .map(|m| DeepSeekMessage {
                    role: m.role.to_string(),
                    content: m.content.clone(),
                })
                .collect(),
        }
    }

    async fn send(&self, api_key: &SecretString, request: &ChatRequest) -> CallOutcome {
        let body = Self::to_wire_request(request);

        let response = match self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key.expose_secret())
            .json(&body)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => return CallOutcome::NetworkError(e.to_string()),
        };

        let status = response.status();
        tracing::Span::current().record("http.response.status_code", status.as_u16());

        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            tracing::debug!(%status, body = %error_body, "DeepSeek returned an error status");
            return match status.as_u16() {
                401 => CallOutcome::AuthError,
                429 => CallOutcome::RateLimited,
                other => CallOutcome::UnexpectedStatus(other),
            };
        }

        match response.json::<DeepSeekResponse>().await {
            Ok(parsed) => CallOutcome::Success(parsed.first_content()),
            Err(e) if e.is_decode() => CallOutcome::MalformedResponse(e.to_string()),
            Err(e) => CallOutcome::NetworkError(e.to_string()),
        }
    }
}

// No Debug derive: the struct holds the API key.

impl ChatCompletionClient for DeepSeekClient {
    async fn complete(&self, request: &ChatRequest) -> CallOutcome {
        let Some(api_key) = self.api_key.as_ref() else {
            return CallOutcome::AuthError;
        };

        let span = tracing::info_span!(
            "gen_ai.chat",
            otel.name = %span_name(OP_CHAT, &request.model),
            gen_ai.operation.name = OP_CHAT,
            gen_ai.provider.name = PROVIDER_DEEPSEEK,
            gen_ai.request.model = %request.model,
            gen_ai.request.max_tokens = request.max_tokens,
            gen_ai.request.temperature = request.temperature,
            http.response.status_code = tracing::field::Empty,
        );

        self.send(api_key, request).instrument(span).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sewage_core::ai::client::ChatMessage;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_for(server: &MockServer, key: Option<&str>) -> AiConfig {
        AiConfig {
            api_key: key.map(str::to_string),
            base_url: format!("{}/chat/completions", server.uri()),
            connect_timeout_ms: 500,
            read_timeout_ms: 500,
            ..Default::default()
        }
    }

    fn request() -> ChatRequest {
        ChatRequest {
            model: "deepseek-chat".into(),
            temperature: 0.7,
            max_tokens: 1500,
            messages: vec![
                ChatMessage::system("你是一位资深的污水监控与处理专家"),
                ChatMessage::user("氨氮超标怎么办"),
            ],
        }
    }

    async fn mount(server: &MockServer, template: ResponseTemplate) {
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(template)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_success_sends_bearer_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer sk-test"))
            .and(body_partial_json(serde_json::json!({
                "model": "deepseek-chat",
                "max_tokens": 1500,
                "messages": [
                    {"role": "system", "content": "你是一位资深的污水监控与处理专家"},
                    {"role": "user", "content": "氨氮超标怎么办"}
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{"message": {"role": "assistant", "content": "**问题分析**：..."}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = DeepSeekClient::from_config(&config_for(&server, Some("sk-test"))).unwrap();
        let outcome = client.complete(&request()).await;

        assert_eq!(outcome, CallOutcome::Success("**问题分析**：...".into()));
    }

    #[tokio::test]
    async fn test_empty_choices_is_success_with_empty_content() {
        let server = MockServer::start().await;
        mount(
            &server,
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"choices": []})),
        )
        .await;

        let client = DeepSeekClient::from_config(&config_for(&server, Some("sk-test"))).unwrap();

        assert_eq!(
            client.complete(&request()).await,
            CallOutcome::Success(String::new())
        );
    }

    #[tokio::test]
    async fn test_401_is_auth_error() {
        let server = MockServer::start().await;
        mount(
            &server,
            ResponseTemplate::new(401).set_body_string(r#"{"error":"invalid api key"}"#),
        )
        .await;

        let client = DeepSeekClient::from_config(&config_for(&server, Some("sk-bad"))).unwrap();

        assert_eq!(client.complete(&request()).await, CallOutcome::AuthError);
    }

    #[tokio::test]
    async fn test_429_is_rate_limited() {
        let server = MockServer::start().await;
        mount(&server, ResponseTemplate::new(429)).await;

        let client = DeepSeekClient::from_config(&config_for(&server, Some("sk-test"))).unwrap();

        assert_eq!(client.complete(&request()).await, CallOutcome::RateLimited);
    }

    #[tokio::test]
    async fn test_other_status_is_unexpected() {
        let server = MockServer::start().await;
        mount(&server, ResponseTemplate::new(503)).await;

        let client = DeepSeekClient::from_config(&config_for(&server, Some("sk-test"))).unwrap();

        assert_eq!(
            client.complete(&request()).await,
            CallOutcome::UnexpectedStatus(503)
        );
    }

    #[tokio::test]
    async fn test_garbage_body_is_malformed() {
        let server = MockServer::start().await;
        mount(
            &server,
            ResponseTemplate::new(200).set_body_string("<html>gateway</html>"),
        )
        .await;

        let client = DeepSeekClient::from_config(&config_for(&server, Some("sk-test"))).unwrap();

        assert!(matches!(
            client.complete(&request()).await,
            CallOutcome::MalformedResponse(_)
        ));
    }

    #[tokio::test]
    async fn test_slow_server_is_network_error() {
        let server = MockServer::start().await;
        mount(
            &server,
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"choices": []}))
                .set_delay(Duration::from_secs(3)),
        )
        .await;

        let client = DeepSeekClient::from_config(&config_for(&server, Some("sk-test"))).unwrap();

        assert!(matches!(
            client.complete(&request()).await,
            CallOutcome::NetworkError(_)
        ));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_network_error() {
        let config = AiConfig {
            api_key: Some("sk-test".into()),
            base_url: "http://127.0.0.1:9/chat/completions".into(),
            connect_timeout_ms: 500,
            read_timeout_ms: 500,
            ..Default::default()
        };
        let client = DeepSeekClient::from_config(&config).unwrap();

        assert!(matches!(
            client.complete(&request()).await,
            CallOutcome::NetworkError(_)
        ));
    }

    #[tokio::test]
    async fn test_missing_key_never_sends() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client =
            DeepSeekClient::from_config(&config_for(&server, Some("placeholder"))).unwrap();

        assert_eq!(client.complete(&request()).await, CallOutcome::AuthError);
    }
}
