use serde::Deserialize;

/// Query parameters for GET /profile and DELETE /profile
#[derive(Debug, Deserialize)]
pub struct ProfileQuery {
    #[serde(rename = "subjectId")]
    pub subject_id: String,
}
