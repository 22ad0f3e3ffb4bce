//! Shared domain types for Sewage Watch.
//!
//! This crate contains the types used across the backend: history records
//! produced by the detection pipeline, AI answers with their origin tag, the
//! uniform result envelope, configuration, and the associated error types.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod ai;
pub mod config;
pub mod envelope;
pub mod error;
pub mod history;
