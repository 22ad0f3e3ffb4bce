//! History query service.
//!
//! A thin use-case layer over [`HistoryRepository`]. Every operation answers
//! with an [`Envelope`]: store failures become `{"status":"error"}` and are
//! logged in full here, so callers never see the underlying error.

use sewage_types::envelope::Envelope;
use sewage_types::history::{
    HistoryFilter, HistoryId, HistoryRecord, HistoryUpdate, NewHistoryRecord,
};

use crate::repository::history::HistoryRepository;

pub const DELETE_OK: &str = "删除成功";
pub const UPDATE_OK: &str = "更新成功";

pub struct HistoryQueryService<R: HistoryRepository> {
    repo: R,
}

impl<R: HistoryRepository> HistoryQueryService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Every stored record, newest first.
    pub async fn list_all(&self) -> Envelope<Vec<HistoryRecord>> {
        match self.repo.list_all().await {
            Ok(records) => {
                tracing::debug!(count = records.len(), "listed history");
                Envelope::success(records)
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to list history");
                Envelope::error()
            }
        }
    }

    /// Delete one record. A missing id still reports success.
    pub async fn delete_by_id(&self, id: HistoryId) -> Envelope<String> {
        match self.repo.delete(id).await {
            Ok(removed) => {
                tracing::info!(%id, removed, "deleted history record");
                Envelope::success(DELETE_OK.to_string())
            }
            Err(e) => {
                tracing::error!(%id, error = %e, "failed to delete history record");
                Envelope::error()
            }
        }
    }

    /// Records matching every set field of `filter`.
    ///
    /// An empty filter matches everything.
    pub async fn find_matching(&self, filter: &HistoryFilter) -> Envelope<Vec<HistoryRecord>> {
        match self.repo.find(filter).await {
            Ok(records) => {
                tracing::debug!(count = records.len(), ?filter, "searched history");
                Envelope::success(records)
            }
            Err(e) => {
                tracing::error!(?filter, error = %e, "failed to search history");
                Envelope::error()
            }
        }
    }

    /// Write whichever of `taskId`, `type`, `src` the update carries.
    ///
    /// Unset fields keep their stored value, so a null `taskId` leaves the
    /// column alone. `createdTime` is never touched. A missing id is a no-op
    /// success, like delete.
    pub async fn update(&self, update: &HistoryUpdate) -> Envelope<String> {
        if update.is_noop() {
            tracing::debug!(id = %update.id, "history update carries no fields");
            return Envelope::success(UPDATE_OK.to_string());
        }

        match self.repo.update(update).await {
            Ok(touched) => {
                tracing::info!(id = %update.id, touched, "updated history record");
                Envelope::success(UPDATE_OK.to_string())
            }
            Err(e) => {
                tracing::error!(id = %update.id, error = %e, "failed to update history record");
                Envelope::error()
            }
        }
    }

    /// Append a record, as the detection process does after each run.
    pub async fn insert(&self, record: &NewHistoryRecord) -> Envelope<HistoryRecord> {
        match self.repo.insert(record).await {
            Ok(saved) => {
                tracing::info!(id = %saved.id, kind = %saved.kind, "saved history record");
                Envelope::success(saved)
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to save history record");
                Envelope::error()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use sewage_types::envelope::EnvelopeStatus;
    use sewage_types::error::RepositoryError;
    use std::sync::Mutex;

    // --- In-memory repository ---

    #[derive(Default)]
    struct MemoryRepo {
        rows: Mutex<Vec<HistoryRecord>>,
    }

    impl MemoryRepo {
        fn matches(filter: &HistoryFilter, r: &HistoryRecord) -> bool {
            filter.id.is_none_or(|id| id == r.id)
                && filter.task_id.is_none_or(|t| Some(t) == r.task_id)
                && filter.kind.as_deref().is_none_or(|k| k == r.kind)
                && filter.src.as_deref().is_none_or(|s| s == r.src)
        }

        fn newest_first(mut rows: Vec<HistoryRecord>) -> Vec<HistoryRecord> {
            rows.sort_by(|a, b| {
                b.created_time
                    .cmp(&a.created_time)
                    .then(b.id.0.cmp(&a.id.0))
            });
            rows
        }
    }

    impl HistoryRepository for MemoryRepo {
        async fn list_all(&self) -> Result<Vec<HistoryRecord>, RepositoryError> {
            Ok(Self::newest_first(self.rows.lock().unwrap().clone()))
        }

        async fn find(&self, filter: &HistoryFilter) -> Result<Vec<HistoryRecord>, RepositoryError> {
            let rows = self.rows.lock().unwrap();
            let hits = rows
                .iter()
                .filter(|r| Self::matches(filter, r))
                .cloned()
                .collect();
            Ok(Self::newest_first(hits))
        }

        async fn insert(&self, record: &NewHistoryRecord) -> Result<HistoryRecord, RepositoryError> {
            let mut rows = self.rows.lock().unwrap();
            let saved = HistoryRecord {
                id: HistoryId(rows.len() as i64 + 1),
                task_id: record.task_id,
                kind: record.kind.clone(),
                src: record.src.clone(),
                created_time: Utc::now() + Duration::seconds(rows.len() as i64),
            };
            rows.push(saved.clone());
            Ok(saved)
        }

        async fn update(&self, update: &HistoryUpdate) -> Result<u64, RepositoryError> {
            let mut rows = self.rows.lock().unwrap();
            let Some(row) = rows.iter_mut().find(|r| r.id == update.id) else {
                return Ok(0);
            };
            if let Some(task_id) = update.task_id {
                row.task_id = Some(task_id);
            }
            if let Some(kind) = &update.kind {
                row.kind = kind.clone();
            }
            if let Some(src) = &update.src {
                row.src = src.clone();
            }
            Ok(1)
        }

        async fn delete(&self, id: HistoryId) -> Result<u64, RepositoryError> {
            let mut rows = self.rows.lock().unwrap();
            let before = rows.len();
            rows.retain(|r| r.id != id);
            Ok((before - rows.len()) as u64)
        }
    }

    // --- Repository that always fails ---

    struct BrokenRepo;

    impl HistoryRepository for BrokenRepo {
        async fn list_all(&self) -> Result<Vec<HistoryRecord>, RepositoryError> {
            Err(RepositoryError::Connection)
        }

        async fn find(&self, _filter: &HistoryFilter) -> Result<Vec<HistoryRecord>, RepositoryError> {
            Err(RepositoryError::Query("no such table: history".into()))
        }

        async fn insert(&self, _record: &NewHistoryRecord) -> Result<HistoryRecord, RepositoryError> {
            Err(RepositoryError::Query("disk I/O error".into()))
        }

        async fn update(&self, _update: &HistoryUpdate) -> Result<u64, RepositoryError> {
            Err(RepositoryError::Query("readonly database".into()))
        }

        async fn delete(&self, _id: HistoryId) -> Result<u64, RepositoryError> {
            Err(RepositoryError::Connection)
        }
    }

    fn new_record(task_id: Option<i64>, kind: &str, src: &str) -> NewHistoryRecord {
        NewHistoryRecord {
            task_id,
            kind: kind.to_string(),
            src: src.to_string(),
        }
    }

    async fn seeded() -> HistoryQueryService<MemoryRepo> {
        let service = HistoryQueryService::new(MemoryRepo::default());
        service.insert(&new_record(Some(1), "image", "/uploads/a.jpg")).await;
        service.insert(&new_record(Some(1), "video", "/uploads/b.mp4")).await;
        service.insert(&new_record(None, "image", "/uploads/c.jpg")).await;
        service
    }

    // --- Tests ---

    #[tokio::test]
    async fn test_list_all_on_empty_store() {
        let service = HistoryQueryService::new(MemoryRepo::default());

        let envelope = service.list_all().await;

        assert_eq!(envelope.status, EnvelopeStatus::Success);
        assert_eq!(envelope.data, Some(vec![]));
    }

    #[tokio::test]
    async fn test_list_all_newest_first() {
        let service = seeded().await;

        let records = service.list_all().await.data.unwrap();

        let ids: Vec<i64> = records.iter().map(|r| r.id.0).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[tokio::test]
    async fn test_delete_missing_id_reports_success() {
        let service = HistoryQueryService::new(MemoryRepo::default());

        let envelope = service.delete_by_id(HistoryId(999)).await;

        assert!(envelope.is_success());
        assert_eq!(envelope.data.as_deref(), Some(DELETE_OK));
    }

    #[tokio::test]
    async fn test_delete_removes_record() {
        let service = seeded().await;

        service.delete_by_id(HistoryId(2)).await;

        let records = service.list_all().await.data.unwrap();
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.id != HistoryId(2)));
    }

    #[tokio::test]
    async fn test_find_matching_combines_fields() {
        let service = seeded().await;
        let filter = HistoryFilter {
            task_id: Some(1),
            kind: Some("image".into()),
            ..Default::default()
        };

        let records = service.find_matching(&filter).await.data.unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].src, "/uploads/a.jpg");
    }

    #[tokio::test]
    async fn test_empty_filter_matches_everything() {
        let service = seeded().await;

        let records = service
            .find_matching(&HistoryFilter::default())
            .await
            .data
            .unwrap();

        assert_eq!(records.len(), 3);
    }

    #[tokio::test]
    async fn test_update_keeps_created_time() {
        let service = seeded().await;
        let before = service.list_all().await.data.unwrap();
        let original = before.iter().find(|r| r.id == HistoryId(1)).unwrap().clone();

        let envelope = service
            .update(&HistoryUpdate {
                id: HistoryId(1),
                task_id: Some(7),
                kind: Some("video".into()),
                src: Some("/uploads/new.mp4".into()),
            })
            .await;

        assert_eq!(envelope.data.as_deref(), Some(UPDATE_OK));
        let after = service.list_all().await.data.unwrap();
        let updated = after.iter().find(|r| r.id == HistoryId(1)).unwrap();
        assert_eq!(updated.task_id, Some(7));
        assert_eq!(updated.kind, "video");
        assert_eq!(updated.src, "/uploads/new.mp4");
        assert_eq!(updated.created_time, original.created_time);
    }

    #[tokio::test]
    async fn test_update_missing_id_is_noop_success() {
        let service = seeded().await;

        let envelope = service
            .update(&HistoryUpdate {
                id: HistoryId(42),
                task_id: None,
                kind: Some("image".into()),
                src: None,
            })
            .await;

        assert!(envelope.is_success());
        assert_eq!(service.list_all().await.data.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_store_failures_become_error_envelopes() {
        let service = HistoryQueryService::new(BrokenRepo);
        let update = HistoryUpdate {
            id: HistoryId(1),
            task_id: None,
            kind: Some("image".into()),
            src: None,
        };

        assert_eq!(service.list_all().await, Envelope::error());
        assert_eq!(service.delete_by_id(HistoryId(1)).await, Envelope::error());
        assert_eq!(
            service.find_matching(&HistoryFilter::default()).await,
            Envelope::error()
        );
        assert_eq!(service.update(&update).await, Envelope::error());
        assert_eq!(
            service.insert(&new_record(None, "image", "x.jpg")).await,
            Envelope::error()
        );
    }
}
