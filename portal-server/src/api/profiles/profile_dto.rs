use portal_core::{AccountStatus, ProfileRecord, Role};

use serde::Serialize;

/// Profile DTO for JSON serialization
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDto {
    pub subject_id: String,
    pub email: String,
    pub display_name: Option<String>,
    pub phone_number: Option<String>,
    #[serde(rename = "photoURL")]
    pub photo_url: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub university: Option<String>,
    pub college: Option<String>,
    pub department: Option<String>,
    pub course: Option<String>,
    pub year_of_study: Option<String>,
    pub semester: Option<String>,
    pub unit: Option<String>,
    pub role: Role,
    pub status: AccountStatus,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<ProfileRecord> for ProfileDto {
    fn from(r: ProfileRecord) -> Self {
        Self {
            subject_id: r.subject_id,
            email: r.email,
            display_name: r.display_name,
            phone_number: r.phone_number,
            photo_url: r.photo_url,
            first_name: r.first_name,
            last_name: r.last_name,
            university: r.university,
            college: r.college,
            department: r.department,
            course: r.course,
            year_of_study: r.year_of_study,
            semester: r.semester,
            unit: r.unit,
            role: r.role,
            status: r.status,
            created_at: r.created_at.timestamp(),
            updated_at: r.updated_at.timestamp(),
        }
    }
}
