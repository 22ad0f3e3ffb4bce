//! DeepSeek chat-completion client.
//!
//! This module provides the [`DeepSeekClient`] which implements the
//! [`ChatCompletionClient`](sewage_core::ai::client::ChatCompletionClient)
//! port against DeepSeek's OpenAI-compatible `/chat/completions` endpoint.

pub mod client;
pub mod types;

pub use client::DeepSeekClient;
