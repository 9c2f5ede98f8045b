use crate::ProfileDto;

use serde::Serialize;

/// Roster response for the admin users endpoint
#[derive(Debug, Serialize)]
pub struct ProfileListResponse {
    pub users: Vec<ProfileDto>,
}
