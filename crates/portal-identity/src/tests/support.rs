//! Mock boundaries for the identity-provider and challenge-verifier SDKs

use crate::challenge_provider::{ChallengeProof, ChallengeProvider, ChallengeWidget};
use crate::provider::{IdentityProvider, PendingVerification};
use crate::{IdentityError, Result as IdentityErrorResult};

use portal_core::{ErrorLocation, IdentitySession, ProfileCandidate, ProfileRecord, Role};
use portal_store::{ProfileStore, Result as StoreErrorResult, StoreError};

use std::collections::HashSet;
use std::panic::Location;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

pub const VALID_CODE: &str = "123456";

fn provider_error(message: &str) -> IdentityError {
    IdentityError::Provider {
        message: message.to_string(),
        location: ErrorLocation::from(Location::caller()),
    }
}

pub fn session_for(subject_id: &str, email: Option<&str>) -> IdentitySession {
    IdentitySession {
        subject_id: subject_id.to_string(),
        primary_email: email.map(str::to_string),
        phone_number: None,
        display_name: None,
        photo_url: None,
        session_token: format!("token-{}", subject_id),
    }
}

// ---------------------------------------------------------------------- //
// Identity provider
// ---------------------------------------------------------------------- //

#[derive(Default)]
pub struct MockIdentityProvider {
    pub set_claims_calls: Mutex<Vec<(String, Role)>>,
    pub fail_set_claims: AtomicBool,
    pub sent_otps: Mutex<Vec<String>>,
    pub expire_codes: AtomicBool,
    pub invalidate_calls: AtomicUsize,
    pub fail_invalidate: AtomicBool,
    pub display_updates: Mutex<Vec<(Option<String>, Option<String>)>>,
}

impl MockIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn claim_calls(&self) -> Vec<(String, Role)> {
        self.set_claims_calls.lock().unwrap().clone()
    }

    pub fn sent_to(&self) -> Vec<String> {
        self.sent_otps.lock().unwrap().clone()
    }
}

#[async_trait]
impl IdentityProvider for MockIdentityProvider {
    async fn create_account(
        &self,
        email: &str,
        _password: &str,
    ) -> IdentityErrorResult<IdentitySession> {
        let subject = email.split('@').next().unwrap_or(email);
        Ok(session_for(&format!("sub-{}", subject), Some(email)))
    }

    async fn verify_password(
        &self,
        email: &str,
        _password: &str,
    ) -> IdentityErrorResult<IdentitySession> {
        let subject = email.split('@').next().unwrap_or(email);
        Ok(session_for(&format!("sub-{}", subject), Some(email)))
    }

    async fn federated_sign_in(&self) -> IdentityErrorResult<IdentitySession> {
        Ok(session_for("sub-federated", Some("federated@example.com")))
    }

    async fn send_otp(
        &self,
        phone_number: &str,
        _proof: ChallengeProof,
    ) -> IdentityErrorResult<PendingVerification> {
        let mut sent = self.sent_otps.lock().unwrap();
        sent.push(phone_number.to_string());
        Ok(PendingVerification {
            verification_id: format!("pending-{}", sent.len()),
            phone_number: phone_number.to_string(),
        })
    }

    async fn confirm_otp(
        &self,
        pending: &PendingVerification,
        code: &str,
    ) -> IdentityErrorResult<IdentitySession> {
        if self.expire_codes.load(Ordering::Acquire) {
            return Err(IdentityError::CodeExpired {
                location: ErrorLocation::from(Location::caller()),
            });
        }
        if code != VALID_CODE {
            return Err(IdentityError::InvalidCode {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let digits = pending.phone_number.trim_start_matches('+');
        let mut session = session_for(&format!("phone-{}", digits), None);
        session.phone_number = Some(pending.phone_number.clone());
        Ok(session)
    }

    async fn update_display_fields(
        &self,
        _session: &IdentitySession,
        display_name: Option<&str>,
        photo_url: Option<&str>,
    ) -> IdentityErrorResult<()> {
        self.display_updates.lock().unwrap().push((
            display_name.map(str::to_string),
            photo_url.map(str::to_string),
        ));
        Ok(())
    }

    async fn refresh_claims(
        &self,
        _session: &IdentitySession,
        _force_refresh: bool,
    ) -> IdentityErrorResult<Role> {
        Ok(self
            .set_claims_calls
            .lock()
            .unwrap()
            .last()
            .map(|(_, role)| *role)
            .unwrap_or_default())
    }

    async fn set_custom_claims(
        &self,
        subject_id: &str,
        role: Role,
    ) -> IdentityErrorResult<()> {
        if self.fail_set_claims.load(Ordering::Acquire) {
            return Err(provider_error("claims side-channel unavailable"));
        }
        self.set_claims_calls
            .lock()
            .unwrap()
            .push((subject_id.to_string(), role));
        Ok(())
    }

    async fn invalidate_session(&self, _session: &IdentitySession) -> IdentityErrorResult<()> {
        if self.fail_invalidate.load(Ordering::Acquire) {
            return Err(provider_error("sign-out rejected"));
        }
        self.invalidate_calls.fetch_add(1, Ordering::AcqRel);
        Ok(())
    }
}

// ---------------------------------------------------------------------- //
// Challenge verifier
// ---------------------------------------------------------------------- //

pub struct MockChallengeProvider {
    mounted: Mutex<HashSet<String>>,
    pub expire_challenges: Arc<AtomicBool>,
    pub fail_teardown: Arc<AtomicBool>,
    pub created: AtomicUsize,
    pub torn_down: Arc<AtomicUsize>,
}

impl MockChallengeProvider {
    pub fn with_anchor(anchor_id: &str) -> Self {
        let mut mounted = HashSet::new();
        mounted.insert(anchor_id.to_string());
        Self {
            mounted: Mutex::new(mounted),
            expire_challenges: Arc::new(AtomicBool::new(false)),
            fail_teardown: Arc::new(AtomicBool::new(false)),
            created: AtomicUsize::new(0),
            torn_down: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn mount(&self, anchor_id: &str) {
        self.mounted.lock().unwrap().insert(anchor_id.to_string());
    }
}

struct MockWidget {
    expired: Arc<AtomicBool>,
    fail_teardown: Arc<AtomicBool>,
    torn_down: Arc<AtomicUsize>,
    serial: usize,
}

#[async_trait]
impl ChallengeWidget for MockWidget {
    async fn solve(&self) -> IdentityErrorResult<ChallengeProof> {
        if self.expired.load(Ordering::Acquire) {
            return Err(IdentityError::ChallengeExpired {
                location: ErrorLocation::from(Location::caller()),
            });
        }
        Ok(ChallengeProof::new(format!("proof-{}", self.serial)))
    }

    async fn teardown(&self) -> IdentityErrorResult<()> {
        if self.fail_teardown.load(Ordering::Acquire) {
            return Err(IdentityError::ChallengeFailed {
                message: "teardown rejected".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        self.torn_down.fetch_add(1, Ordering::AcqRel);
        Ok(())
    }
}

#[async_trait]
impl ChallengeProvider for MockChallengeProvider {
    async fn create_widget(
        &self,
        anchor_id: &str,
    ) -> IdentityErrorResult<Box<dyn ChallengeWidget>> {
        if !self.mounted.lock().unwrap().contains(anchor_id) {
            return Err(IdentityError::AnchorNotFound {
                anchor_id: anchor_id.to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let serial = self.created.fetch_add(1, Ordering::AcqRel) + 1;
        Ok(Box::new(MockWidget {
            expired: Arc::clone(&self.expire_challenges),
            fail_teardown: Arc::clone(&self.fail_teardown),
            torn_down: Arc::clone(&self.torn_down),
            serial,
        }))
    }
}

// ---------------------------------------------------------------------- //
// Unreachable profile store
// ---------------------------------------------------------------------- //

pub struct UnreachableStore;

fn unavailable() -> StoreError {
    StoreError::Unavailable {
        message: "connection refused".to_string(),
        location: ErrorLocation::from(Location::caller()),
    }
}

#[async_trait]
impl ProfileStore for UnreachableStore {
    async fn find_by_subject_id(
        &self,
        _subject_id: &str,
    ) -> StoreErrorResult<Option<ProfileRecord>> {
        Err(unavailable())
    }

    async fn upsert(
        &self,
        _subject_id: &str,
        _candidate: &ProfileCandidate,
    ) -> StoreErrorResult<ProfileRecord> {
        Err(unavailable())
    }

    async fn soft_delete(&self, _subject_id: &str) -> StoreErrorResult<bool> {
        Err(unavailable())
    }

    async fn list_all(&self) -> StoreErrorResult<Vec<ProfileRecord>> {
        Err(unavailable())
    }
}
