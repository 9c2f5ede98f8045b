use serde::{Deserialize, Serialize};

/// Transient snapshot of an identity-provider session.
///
/// Owned by the provider; this system only ever holds a reference long
/// enough to reconcile the profile record and forward the bearer token.
/// `primary_email` is absent for phone-only identities.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentitySession {
    pub subject_id: String,
    pub primary_email: Option<String>,
    pub phone_number: Option<String>,
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
    /// Short-lived bearer token, refreshable by the provider
    pub session_token: String,
}
