//! History handlers. Each one forwards to the history service and renders
//! its envelope.

use axum::Json;
use axum::extract::{Path, State};

use sewage_types::history::{HistoryFilter, HistoryId, HistoryRecord, HistoryUpdate};

use crate::http::response::EnvelopeResponse;
use crate::state::AppState;

/// GET /history - All records, newest first.
pub async fn list_history(State(state): State<AppState>) -> EnvelopeResponse<Vec<HistoryRecord>> {
    state.history.list_all().await.into()
}

/// POST /history/search - Records matching the filter body.
pub async fn search_history(
    State(state): State<AppState>,
    Json(filter): Json<HistoryFilter>,
) -> EnvelopeResponse<Vec<HistoryRecord>> {
    state.history.find_matching(&filter).await.into()
}

/// PUT /history - Update `taskId`, `type`, `src` of the record named by `id`.
pub async fn update_history(
    State(state): State<AppState>,
    Json(update): Json<HistoryUpdate>,
) -> EnvelopeResponse<String> {
    state.history.update(&update).await.into()
}

/// DELETE /history/{id} - Remove one record.
pub async fn delete_history(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> EnvelopeResponse<String> {
    state.history.delete_by_id(HistoryId(id)).await.into()
}
