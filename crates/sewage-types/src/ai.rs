//! AI question/answer types.
//!
//! An [`AiQuery`] is the validated user question; an [`AiAnswer`] is what the
//! reply gateway hands back. Neither is persisted.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::QueryError;

/// A non-blank user question.
///
/// The original text is kept untouched (including surrounding whitespace);
/// only the blank check looks at the trimmed form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AiQuery(String);

impl AiQuery {
    /// Validate a raw question. Missing or whitespace-only input is rejected.
    pub fn parse(raw: Option<&str>) -> Result<Self, QueryError> {
        match raw {
            Some(q) if !q.trim().is_empty() => Ok(Self(q.to_string())),
            _ => Err(QueryError::EmptyQuestion),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AiQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where the text of an [`AiAnswer`] came from.
///
/// Callers use this to tell authoritative answers from degraded ones, so it
/// must never claim `DeepseekApi` for locally generated text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnswerSource {
    #[serde(rename = "deepseek-api")]
    DeepseekApi,
    #[serde(rename = "fallback")]
    Fallback,
}

impl AnswerSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnswerSource::DeepseekApi => "deepseek-api",
            AnswerSource::Fallback => "fallback",
        }
    }
}

impl fmt::Display for AnswerSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reply produced for a single question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiAnswer {
    pub text: String,
    pub source: AnswerSource,
    /// Wall-clock time spent producing the answer.
    pub latency_ms: u64,
}

impl AiAnswer {
    pub fn from_api(text: impl Into<String>, latency_ms: u64) -> Self {
        Self {
            text: text.into(),
            source: AnswerSource::DeepseekApi,
            latency_ms,
        }
    }

    pub fn fallback(text: impl Into<String>, latency_ms: u64) -> Self {
        Self {
            text: text.into(),
            source: AnswerSource::Fallback,
            latency_ms,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.source == AnswerSource::Fallback
    }
}
