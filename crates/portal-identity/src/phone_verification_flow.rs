use crate::challenge_widget_manager::{ChallengeHandle, ChallengeWidgetManager};
use crate::otp_rate_limiter::OtpRateLimiter;
use crate::profile_reconciler::ProfileReconciler;
use crate::provider::{IdentityProvider, PendingVerification};
use crate::{IdentityError, Result as IdentityErrorResult};

use portal_core::{AccountStatus, ErrorLocation, IdentitySession, ProfileCandidate};

use std::panic::Location;
use std::sync::Arc;

use tokio::sync::Mutex;

/// Phone verification flow state.
///
/// `Verified` and `Failed` are terminal; a fresh `request_code` re-enters
/// the flow from either.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    Idle,
    AwaitingProof,
    AwaitingCode,
    Verified,
    Failed,
}

struct FlowInner {
    state: FlowState,
    handle: Option<ChallengeHandle>,
}

/// Orchestrates one phone sign-in: challenge proof, code send, code
/// submit, session. Within one flow the steps run strictly in that
/// order; across flow instances no ordering is guaranteed, which the
/// reconciler's idempotent merge absorbs.
pub struct PhoneVerificationFlow {
    provider: Arc<dyn IdentityProvider>,
    widgets: Arc<ChallengeWidgetManager>,
    reconciler: Arc<ProfileReconciler>,
    limiter: OtpRateLimiter,
    anchor_id: String,
    inner: Mutex<FlowInner>,
}

impl PhoneVerificationFlow {
    pub fn new(
        provider: Arc<dyn IdentityProvider>,
        widgets: Arc<ChallengeWidgetManager>,
        reconciler: Arc<ProfileReconciler>,
        limiter: OtpRateLimiter,
        anchor_id: impl Into<String>,
    ) -> Self {
        Self {
            provider,
            widgets,
            reconciler,
            limiter,
            anchor_id: anchor_id.into(),
            inner: Mutex::new(FlowInner {
                state: FlowState::Idle,
                handle: None,
            }),
        }
    }

    pub async fn state(&self) -> FlowState {
        self.inner.lock().await.state
    }

    /// Normalize, prove human presence, and request a one-time code.
    ///
    /// Fails with `InvalidPhoneNumber`, `RateLimited`, or
    /// `ChallengeUnavailable` (any challenge-step failure).
    #[track_caller]
    pub async fn request_code(
        &self,
        phone_number: &str,
    ) -> IdentityErrorResult<PendingVerification> {
        let normalized = normalize_phone_number(phone_number)?;

        let mut inner = self.inner.lock().await;

        // Re-entry: reclaim whatever a previous attempt left behind
        self.release_handle(&mut inner).await;
        inner.state = FlowState::AwaitingProof;

        if let Err(e) = self.limiter.check(&normalized) {
            inner.state = FlowState::Failed;
            return Err(e);
        }

        let handle = match self.widgets.acquire(&self.anchor_id).await {
            Ok(handle) => handle,
            Err(e) => {
                inner.state = FlowState::Failed;
                return Err(IdentityError::ChallengeUnavailable {
                    message: e.to_string(),
                    location: ErrorLocation::from(Location::caller()),
                });
            }
        };

        let proof = match handle.get_proof().await {
            Ok(proof) => proof,
            Err(e) => {
                self.widgets.release(&handle).await;
                inner.state = FlowState::Failed;
                return Err(IdentityError::ChallengeUnavailable {
                    message: e.to_string(),
                    location: ErrorLocation::from(Location::caller()),
                });
            }
        };

        match self.provider.send_otp(&normalized, proof).await {
            Ok(pending) => {
                inner.handle = Some(handle);
                inner.state = FlowState::AwaitingCode;
                Ok(pending)
            }
            Err(e) => {
                self.widgets.release(&handle).await;
                inner.state = FlowState::Failed;
                Err(e)
            }
        }
    }

    /// Exchange the pending verification and code for a session.
    ///
    /// Fails with `InvalidCode` or `CodeExpired`; either way the caller
    /// restarts from `request_code` (no implicit retry). On success the
    /// reconciler fires exactly once before the session is returned;
    /// reconciliation is idempotent, so a caller-side retry on a network
    /// ambiguity stays safe even if it double-fires.
    pub async fn submit_code(
        &self,
        pending: &PendingVerification,
        code: &str,
    ) -> IdentityErrorResult<IdentitySession> {
        let mut inner = self.inner.lock().await;

        match self.provider.confirm_otp(pending, code).await {
            Ok(session) => {
                let explicit = ProfileCandidate {
                    phone_number: Some(pending.phone_number.clone()),
                    status: Some(AccountStatus::Active),
                    ..ProfileCandidate::default()
                };
                self.reconciler
                    .reconcile_quietly(&session, Some(explicit))
                    .await;

                self.release_handle(&mut inner).await;
                inner.state = FlowState::Verified;
                Ok(session)
            }
            Err(e) => {
                self.release_handle(&mut inner).await;
                inner.state = FlowState::Failed;
                Err(e)
            }
        }
    }

    async fn release_handle(&self, inner: &mut FlowInner) {
        if let Some(handle) = inner.handle.take() {
            self.widgets.release(&handle).await;
        }
    }
}

/// Normalize a user-entered phone number to E.164-ish form.
///
/// Separators are stripped and a leading `+` is prepended when absent,
/// so `"712345678"` becomes `"+712345678"`.
#[track_caller]
pub fn normalize_phone_number(phone_number: &str) -> IdentityErrorResult<String> {
    let invalid = || IdentityError::InvalidPhoneNumber {
        value: phone_number.to_string(),
        location: ErrorLocation::from(Location::caller()),
    };

    let trimmed = phone_number.trim();
    let digits: String = trimmed
        .trim_start_matches('+')
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')' | '.'))
        .collect();

    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }
    if !(7..=15).contains(&digits.len()) {
        return Err(invalid());
    }

    Ok(format!("+{}", digits))
}
