//! SQLite history repository implementation.
//!
//! Implements `HistoryRepository` from `sewage-core` using sqlx with split read/write pools.
//! The table is shared with the detection process, which writes `createdTime` as a
//! local `YYYY-MM-DD HH:MM:SS[.ffffff]` string; rows inserted here get an RFC 3339
//! UTC timestamp from the column default. Naive `T`-separated values are accepted
//! too. All forms are read back as UTC and ordered by `julianday`, never as text.
//! A row whose timestamp cannot be read is skipped with a warning.

use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use sewage_core::repository::history::HistoryRepository;
use sewage_types::error::RepositoryError;
use sewage_types::history::{
    HistoryFilter, HistoryId, HistoryMatchMode, HistoryRecord, HistoryUpdate, NewHistoryRecord,
};

use super::pool::DatabasePool;

const SELECT_COLUMNS: &str = "SELECT id, taskId, type, src, createdTime FROM history";
const NEWEST_FIRST: &str = " ORDER BY julianday(createdTime) DESC, id DESC";

/// SQLite-backed implementation of `HistoryRepository`.
pub struct SqliteHistoryRepository {
    pool: DatabasePool,
    match_mode: HistoryMatchMode,
}

impl SqliteHistoryRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool, match_mode: HistoryMatchMode) -> Self {
        Self { pool, match_mode }
    }
}

/// Internal row type for mapping SQLite rows to the domain record.
struct HistoryRow {
    id: i64,
    task_id: Option<i64>,
    kind: String,
    src: String,
    created_time: String,
}

impl HistoryRow {
    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            task_id: row.try_get("taskId")?,
            kind: row.try_get("type")?,
            src: row.try_get("src")?,
            created_time: row.try_get("createdTime")?,
        })
    }

    fn into_record(self) -> Result<HistoryRecord, RepositoryError> {
        Ok(HistoryRecord {
            id: HistoryId(self.id),
            task_id: self.task_id,
            kind: self.kind,
            src: self.src,
            created_time: parse_datetime(&self.created_time)?,
        })
    }
}

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f"))
        .map(|naive| naive.and_utc())
        .map_err(|e| RepositoryError::Query(format!("invalid datetime '{s}': {e}")))
}

fn map_sqlx_error(e: sqlx::Error) -> RepositoryError {
    match e {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            tracing::debug!(error = %e, "database unavailable");
            RepositoryError::Connection
        }
        other => RepositoryError::Query(other.to_string()),
    }
}

fn map_rows(rows: &[SqliteRow]) -> Vec<HistoryRecord> {
    rows.iter()
        .filter_map(|row| {
            let record = HistoryRow::from_row(row)
                .map_err(|e| RepositoryError::Query(e.to_string()))
                .and_then(HistoryRow::into_record);
            match record {
                Ok(record) => Some(record),
                Err(e) => {
                    let id: Option<i64> = row.try_get("id").ok();
                    tracing::warn!(?id, error = %e, "skipping unreadable history row");
                    None
                }
            }
        })
        .collect()
}

/// Escape LIKE wildcards so user input matches literally.
fn like_pattern(value: &str) -> String {
    let escaped = value
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

enum BindValue {
    Int(i64),
    Text(String),
}

impl HistoryRepository for SqliteHistoryRepository {
    async fn list_all(&self) -> Result<Vec<HistoryRecord>, RepositoryError> {
        let rows = sqlx::query(&format!("{SELECT_COLUMNS}{NEWEST_FIRST}"))
            .fetch_all(&self.pool.reader)
            .await
            .map_err(map_sqlx_error)?;

        Ok(map_rows(&rows))
    }

    async fn find(&self, filter: &HistoryFilter) -> Result<Vec<HistoryRecord>, RepositoryError> {
        let mut conditions: Vec<&str> = Vec::new();
        let mut binds: Vec<BindValue> = Vec::new();

        if let Some(id) = filter.id {
            conditions.push("id = ?");
            binds.push(BindValue::Int(id.0));
        }
        if let Some(task_id) = filter.task_id {
            conditions.push("taskId = ?");
            binds.push(BindValue::Int(task_id));
        }

        // (exact condition, substring condition, value)
        let text_fields = [
            ("type = ?", "type LIKE ? ESCAPE '\\'", &filter.kind),
            ("src = ?", "src LIKE ? ESCAPE '\\'", &filter.src),
        ];
        for (exact, contains, value) in text_fields {
            let Some(value) = value else { continue };
            match self.match_mode {
                HistoryMatchMode::Exact => {
                    conditions.push(exact);
                    binds.push(BindValue::Text(value.clone()));
                }
                HistoryMatchMode::Contains => {
                    conditions.push(contains);
                    binds.push(BindValue::Text(like_pattern(value)));
                }
            }
        }

        let mut sql = String::from(SELECT_COLUMNS);
        if !conditions.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&conditions.join(" AND "));
        }
        sql.push_str(NEWEST_FIRST);

        let mut query = sqlx::query(&sql);
        for value in binds {
            query = match value {
                BindValue::Int(v) => query.bind(v),
                BindValue::Text(v) => query.bind(v),
            };
        }

        let rows = query
            .fetch_all(&self.pool.reader)
            .await
            .map_err(map_sqlx_error)?;

        Ok(map_rows(&rows))
    }

    async fn insert(&self, record: &NewHistoryRecord) -> Result<HistoryRecord, RepositoryError> {
        let row = sqlx::query(
            "INSERT INTO history (taskId, type, src) VALUES (?, ?, ?)
             RETURNING id, taskId, type, src, createdTime",
        )
        .bind(record.task_id)
        .bind(&record.kind)
        .bind(&record.src)
        .fetch_one(&self.pool.writer)
        .await
        .map_err(map_sqlx_error)?;

        HistoryRow::from_row(&row)
            .map_err(|e| RepositoryError::Query(e.to_string()))?
            .into_record()
    }

    async fn update(&self, update: &HistoryUpdate) -> Result<u64, RepositoryError> {
        let mut assignments: Vec<&str> = Vec::new();
        let mut binds: Vec<BindValue> = Vec::new();

        if let Some(task_id) = update.task_id {
            assignments.push("taskId = ?");
            binds.push(BindValue::Int(task_id));
        }
        if let Some(ref kind) = update.kind {
            assignments.push("type = ?");
            binds.push(BindValue::Text(kind.clone()));
        }
        if let Some(ref src) = update.src {
            assignments.push("src = ?");
            binds.push(BindValue::Text(src.clone()));
        }

        if assignments.is_empty() {
            return Ok(0);
        }

        let sql = format!("UPDATE history SET {} WHERE id = ?", assignments.join(", "));
        let mut query = sqlx::query(&sql);
        for value in binds {
            query = match value {
                BindValue::Int(v) => query.bind(v),
                BindValue::Text(v) => query.bind(v),
            };
        }

        let result = query
            .bind(update.id.0)
            .execute(&self.pool.writer)
            .await
            .map_err(map_sqlx_error)?;

        Ok(result.rows_affected())
    }

    async fn delete(&self, id: HistoryId) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM history WHERE id = ?")
            .bind(id.0)
            .execute(&self.pool.writer)
            .await
            .map_err(map_sqlx_error)?;

        Ok(result.rows_affected())
    }
}
