//! HTTP/REST API layer for Sewage Watch.
//!
//! Axum-based REST API: the AI chat endpoints under `/api/ai`, the history
//! endpoints under `/history`, plus a `/hello` smoke test. CORS is open to
//! any origin since the web frontend is served separately.

pub mod error;
pub mod handlers;
pub mod response;
pub mod router;
