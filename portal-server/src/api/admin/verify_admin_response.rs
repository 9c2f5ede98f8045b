use portal_core::Role;

use serde::Serialize;

/// Response for GET /admin/verify
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyAdminResponse {
    pub is_admin: bool,
    pub subject_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub role: Role,
}
