use crate::challenge_provider::ChallengeProof;
use crate::Result as IdentityErrorResult;

use portal_core::{IdentitySession, Role};

use async_trait::async_trait;

/// Opaque reference binding an in-flight OTP exchange to one phone number.
///
/// Abandoning a verification is just dropping this value; the provider's
/// own code expiry reclaims it.
#[derive(Debug, Clone)]
pub struct PendingVerification {
    pub verification_id: String,
    pub phone_number: String,
}

/// Identity-provider boundary.
///
/// Credential verification, token signing and the OAuth popup flow all
/// live behind this trait; this system only consumes the session and
/// claims operations as opaque calls.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn create_account(
        &self,
        email: &str,
        password: &str,
    ) -> IdentityErrorResult<IdentitySession>;

    async fn verify_password(
        &self,
        email: &str,
        password: &str,
    ) -> IdentityErrorResult<IdentitySession>;

    async fn federated_sign_in(&self) -> IdentityErrorResult<IdentitySession>;

    /// Request an OTP send, spending a challenge proof
    async fn send_otp(
        &self,
        phone_number: &str,
        proof: ChallengeProof,
    ) -> IdentityErrorResult<PendingVerification>;

    /// Exchange a pending verification and code for a session
    async fn confirm_otp(
        &self,
        pending: &PendingVerification,
        code: &str,
    ) -> IdentityErrorResult<IdentitySession>;

    /// Push display fields (name/photo) to the provider-held profile
    async fn update_display_fields(
        &self,
        session: &IdentitySession,
        display_name: Option<&str>,
        photo_url: Option<&str>,
    ) -> IdentityErrorResult<()>;

    /// Re-read the role claim; `force_refresh` mints a fresh token so a
    /// recent `set_custom_claims` becomes visible
    async fn refresh_claims(
        &self,
        session: &IdentitySession,
        force_refresh: bool,
    ) -> IdentityErrorResult<Role>;

    /// Administrative side-channel: set the role custom claim
    async fn set_custom_claims(&self, subject_id: &str, role: Role) -> IdentityErrorResult<()>;

    /// Invalidate the session provider-side
    async fn invalidate_session(&self, session: &IdentitySession) -> IdentityErrorResult<()>;
}
