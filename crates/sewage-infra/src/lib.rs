//! Infrastructure layer for Sewage Watch.
//!
//! Contains implementations of the ports defined in `sewage-core`: SQLite
//! history storage, the DeepSeek chat-completion client, and configuration
//! loading from the data directory.

pub mod config;
pub mod llm;
pub mod sqlite;
