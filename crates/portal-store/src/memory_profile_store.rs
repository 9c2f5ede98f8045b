use crate::{ProfileStore, Result as StoreErrorResult, StoreError};

use portal_core::{ErrorLocation, ProfileCandidate, ProfileRecord};

use std::collections::HashMap;
use std::panic::Location;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

/// In-memory profile store for tests and embedded setups
#[derive(Default)]
pub struct MemoryProfileStore {
    records: Mutex<HashMap<String, ProfileRecord>>,
}

impl MemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a record directly, bypassing merge semantics (test setup)
    pub fn insert(&self, record: ProfileRecord) {
        self.records
            .lock()
            .expect("profile store mutex poisoned")
            .insert(record.subject_id.clone(), record);
    }
}

#[async_trait]
impl ProfileStore for MemoryProfileStore {
    async fn find_by_subject_id(
        &self,
        subject_id: &str,
    ) -> StoreErrorResult<Option<ProfileRecord>> {
        let records = self.records.lock().expect("profile store mutex poisoned");
        Ok(records
            .get(subject_id)
            .filter(|r| !r.is_deleted())
            .cloned())
    }

    async fn upsert(
        &self,
        subject_id: &str,
        candidate: &ProfileCandidate,
    ) -> StoreErrorResult<ProfileRecord> {
        if subject_id.is_empty() {
            return Err(StoreError::CorruptRecord {
                subject_id: subject_id.to_string(),
                message: "subject id cannot be empty".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        // Reject a duplicate email belonging to a different subject, the
        // way the SQLite unique index would
        {
            let records = self.records.lock().expect("profile store mutex poisoned");
            if let Some(email) = candidate.email.as_deref()
                && records
                    .values()
                    .any(|r| r.subject_id != subject_id && r.email == email)
            {
                return Err(StoreError::UniqueViolation {
                    field: "email".to_string(),
                    location: ErrorLocation::from(Location::caller()),
                });
            }
        }

        let mut records = self.records.lock().expect("profile store mutex poisoned");
        let record = match records.get(subject_id) {
            Some(existing) => {
                let mut merged = existing.clone();
                merged.deleted = false;
                merged.apply(candidate);
                merged
            }
            None => ProfileRecord::from_candidate(subject_id.to_string(), candidate),
        };
        records.insert(subject_id.to_string(), record.clone());

        Ok(record)
    }

    async fn soft_delete(&self, subject_id: &str) -> StoreErrorResult<bool> {
        let mut records = self.records.lock().expect("profile store mutex poisoned");
        match records.get_mut(subject_id) {
            Some(record) if !record.deleted => {
                record.deleted = true;
                record.updated_at = Utc::now();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn list_all(&self) -> StoreErrorResult<Vec<ProfileRecord>> {
        let records = self.records.lock().expect("profile store mutex poisoned");
        let mut all: Vec<ProfileRecord> =
            records.values().filter(|r| !r.is_deleted()).cloned().collect();
        all.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(all)
    }
}
