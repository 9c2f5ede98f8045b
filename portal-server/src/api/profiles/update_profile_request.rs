use portal_core::ProfileCandidate;

use serde::Deserialize;

/// Request body for PUT /profile (partial update of an existing record)
#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    #[serde(rename = "subjectId")]
    pub subject_id: String,

    #[serde(flatten)]
    pub fields: ProfileCandidate,
}
