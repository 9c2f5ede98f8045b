use portal_core::ProfileCandidate;

use serde::Deserialize;

/// Request body for POST /profile (merge-upsert)
#[derive(Debug, Deserialize)]
pub struct UpsertProfileRequest {
    #[serde(rename = "subjectId")]
    pub subject_id: String,

    /// Partial profile fields; absent and empty values are ignored
    #[serde(flatten)]
    pub fields: ProfileCandidate,
}
