use serde::Serialize;

/// Response for soft-delete operations
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub deleted: bool,
}
