//! Axum router configuration with middleware.
//!
//! Routes: `/api/ai/*` for the AI gateway, `/history` for detection history,
//! `/hello` as a smoke test. Middleware: CORS, tracing.

use axum::Router;
use axum::routing::{delete, get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let ai_routes = Router::new()
        .route("/chat", post(handlers::ai::chat))
        .route("/health", get(handlers::ai::health));

    Router::new()
        .nest("/api/ai", ai_routes)
        // History
        .route(
            "/history",
            get(handlers::history::list_history).put(handlers::history::update_history),
        )
        .route("/history/search", post(handlers::history::search_history))
        .route("/history/{id}", delete(handlers::history::delete_history))
        .route("/hello", get(hello))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /hello - Plain-text smoke test.
async fn hello() -> &'static str {
    tracing::info!("hello world");
    "hello world"
}
