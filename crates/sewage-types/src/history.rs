use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

/// Store-assigned identifier of a history row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoryId(pub i64);

impl fmt::Display for HistoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for HistoryId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}

/// A persisted detection event.
///
/// Rows are written by the detection process whenever a frame contains one of
/// the watched object classes. `kind` holds the comma-joined class names and
/// `src` the path of the saved frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRecord {
    pub id: HistoryId,
    /// Analysis task that produced the row, if any.
    pub task_id: Option<i64>,
    #[serde(rename = "type")]
    pub kind: String,
    pub src: String,
    /// Set by the store on insert, never rewritten.
    pub created_time: DateTime<Utc>,
}

/// Fields of a record about to be inserted. Id and creation time come from the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewHistoryRecord {
    #[serde(default)]
    pub task_id: Option<i64>,
    #[serde(rename = "type")]
    pub kind: String,
    pub src: String,
}

/// Update payload for a single row.
///
/// Only the fields that are set are written. `createdTime` is not part of the
/// payload; a full record sent by a client deserializes fine and the field is
/// dropped.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryUpdate {
    pub id: HistoryId,
    #[serde(default)]
    pub task_id: Option<i64>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub src: Option<String>,
}

impl HistoryUpdate {
    /// True when no column would change.
    pub fn is_noop(&self) -> bool {
        self.task_id.is_none() && self.kind.is_none() && self.src.is_none()
    }
}

/// Filter for history lookups. Unset fields are wildcards, set fields are ANDed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryFilter {
    #[serde(default)]
    pub id: Option<HistoryId>,
    #[serde(default)]
    pub task_id: Option<i64>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub src: Option<String>,
}

impl HistoryFilter {
    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.task_id.is_none() && self.kind.is_none() && self.src.is_none()
    }
}

/// How string fields of a [`HistoryFilter`] are compared against stored rows.
///
/// - Exact: column must equal the filter value
/// - Contains: column must contain the filter value (numeric fields stay exact)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryMatchMode {
    #[default]
    Exact,
    Contains,
}

impl fmt::Display for HistoryMatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoryMatchMode::Exact => write!(f, "exact"),
            HistoryMatchMode::Contains => write!(f, "contains"),
        }
    }
}

impl FromStr for HistoryMatchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "exact" => Ok(HistoryMatchMode::Exact),
            "contains" => Ok(HistoryMatchMode::Contains),
            other => Err(format!("invalid match mode: '{other}'")),
        }
    }
}
