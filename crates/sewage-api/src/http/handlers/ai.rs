//! AI chat handlers.
//!
//! The chat endpoint answers 200 even when the gateway degraded to a canned
//! answer. `source` tells the two apart. A blank question also gets 200, with
//! `status: "error"` in the body.

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};

use sewage_types::ai::{AiQuery, AnswerSource};
use sewage_types::envelope::EnvelopeStatus;

use crate::http::error::AppError;
use crate::state::AppState;

pub const SERVICE_NAME: &str = "Sewage Watch AI Service";
pub const HEALTH_MESSAGE: &str = "API健康检查通过，服务运行正常";

#[derive(Debug, Deserialize)]
pub struct ChatBody {
    #[serde(default)]
    pub question: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatReply {
    pub status: EnvelopeStatus,
    pub answer: String,
    /// Unix epoch milliseconds.
    pub timestamp: i64,
    pub response_time_ms: u64,
    pub source: AnswerSource,
}

#[derive(Debug, Serialize)]
pub struct HealthReply {
    pub status: EnvelopeStatus,
    pub service: &'static str,
    pub timestamp: i64,
    pub message: &'static str,
}

/// POST /api/ai/chat - Ask the wastewater expert a question.
pub async fn chat(
    State(state): State<AppState>,
    Json(body): Json<ChatBody>,
) -> Result<Json<ChatReply>, AppError> {
    let query = AiQuery::parse(body.question.as_deref())?;

    let answer = state.gateway.get_reply(&query).await;

    tracing::info!(
        source = %answer.source,
        response_time_ms = answer.latency_ms,
        "answered chat question"
    );

    Ok(Json(ChatReply {
        status: EnvelopeStatus::Success,
        answer: answer.text,
        timestamp: chrono::Utc::now().timestamp_millis(),
        response_time_ms: answer.latency_ms,
        source: answer.source,
    }))
}

/// GET /api/ai/health - Static liveness answer.
pub async fn health() -> Json<HealthReply> {
    Json(HealthReply {
        status: EnvelopeStatus::Success,
        service: SERVICE_NAME,
        timestamp: chrono::Utc::now().timestamp_millis(),
        message: HEALTH_MESSAGE,
    })
}
