use crate::Result as StoreErrorResult;

use portal_core::{ProfileCandidate, ProfileRecord};

use async_trait::async_trait;

/// Document-store boundary for profile records.
///
/// Upserts are merge-based, never blind overwrites: concurrent
/// reconciliation calls for the same subject may interleave, and a
/// partial candidate must not erase fields another call just wrote.
/// Deletion is soft (flag), never row removal.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Look up a live (non-deleted) record
    async fn find_by_subject_id(&self, subject_id: &str)
    -> StoreErrorResult<Option<ProfileRecord>>;

    /// Merge-upsert by subject id.
    ///
    /// Creates the record when absent (synthesizing a placeholder email if
    /// the candidate carries none), merges non-empty candidate fields into
    /// it otherwise. Upserting a soft-deleted record revives it.
    async fn upsert(
        &self,
        subject_id: &str,
        candidate: &ProfileCandidate,
    ) -> StoreErrorResult<ProfileRecord>;

    /// Set the deleted flag. Returns false when no live record existed.
    async fn soft_delete(&self, subject_id: &str) -> StoreErrorResult<bool>;

    /// All live records
    async fn list_all(&self) -> StoreErrorResult<Vec<ProfileRecord>>;
}
