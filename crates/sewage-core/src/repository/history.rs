//! History repository trait definition.

use sewage_types::error::RepositoryError;
use sewage_types::history::{
    HistoryFilter, HistoryId, HistoryRecord, HistoryUpdate, NewHistoryRecord,
};

/// Repository trait for history row persistence.
///
/// Implementations live in sewage-infra (e.g., SqliteHistoryRepository).
/// How filter fields are compared (exact or substring) is up to the
/// implementation. Uses native async fn in traits (no async_trait macro).
pub trait HistoryRepository: Send + Sync {
    /// All rows, newest first.
    fn list_all(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<HistoryRecord>, RepositoryError>> + Send;

    /// Rows matching every set field of `filter`, newest first.
    fn find(
        &self,
        filter: &HistoryFilter,
    ) -> impl std::future::Future<Output = Result<Vec<HistoryRecord>, RepositoryError>> + Send;

    /// Insert a row. The store assigns `id` and `createdTime`.
    fn insert(
        &self,
        record: &NewHistoryRecord,
    ) -> impl std::future::Future<Output = Result<HistoryRecord, RepositoryError>> + Send;

    /// Write the set fields of `update`. Returns the number of rows touched;
    /// a missing id touches zero rows and is not an error.
    fn update(
        &self,
        update: &HistoryUpdate,
    ) -> impl std::future::Future<Output = Result<u64, RepositoryError>> + Send;

    /// Delete a row by id. Returns the number of rows removed (0 or 1).
    fn delete(
        &self,
        id: HistoryId,
    ) -> impl std::future::Future<Output = Result<u64, RepositoryError>> + Send;
}
