//! HTTP request handlers for the REST API.

pub mod ai;
pub mod history;
