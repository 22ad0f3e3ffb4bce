//! Observability for Sewage Watch: subscriber setup and the attribute names
//! used on outbound AI call spans.

pub mod genai_attrs;
pub mod tracing_setup;
