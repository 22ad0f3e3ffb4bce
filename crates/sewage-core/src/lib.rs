//! Business logic and port traits for Sewage Watch.
//!
//! This crate defines the "ports" (repository and chat-client traits) that the
//! infrastructure layer implements, plus the AI reply gateway and the history
//! query service built on top of them. It depends only on `sewage-types` --
//! never on `sewage-infra` or any database/HTTP crate.

pub mod ai;
pub mod repository;
pub mod service;
