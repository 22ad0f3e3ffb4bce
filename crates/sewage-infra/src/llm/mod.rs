//! Chat-completion provider implementations.
//!
//! Contains concrete implementations of the
//! [`ChatCompletionClient`](sewage_core::ai::client::ChatCompletionClient)
//! trait defined in `sewage-core`.

pub mod deepseek;
