//! AI reply pipeline.
//!
//! - `client`: the chat-completion port and its `CallOutcome` result type
//! - `fallback`: keyword-driven canned answers used when the API is unusable
//! - `prompt`: the expert persona sent as the system message
//! - `gateway`: `AiReplyGateway`, which ties the above together

pub mod client;
pub mod fallback;
pub mod gateway;
pub mod prompt;
