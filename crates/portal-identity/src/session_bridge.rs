use crate::profile_reconciler::ProfileReconciler;
use crate::provider::IdentityProvider;
use crate::{IdentityError, Result as IdentityErrorResult};

use portal_core::{
    AccountStatus, ErrorLocation, IdentitySession, ProfileCandidate, ProfileRecord, Role,
};

use std::panic::Location;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};

/// Session transition delivered to subscribers
#[derive(Debug, Clone)]
pub enum SessionEvent {
    SignedIn(IdentitySession),
    SignedOut { subject_id: String },
    TokenRefreshed(IdentitySession),
}

type SessionCallback = Arc<dyn Fn(&SessionEvent) + Send + Sync>;
type SubscriberList = Mutex<Vec<(u64, SessionCallback)>>;

/// Handle returned by [`IdentitySessionBridge::subscribe`]; dropping it
/// without calling `unsubscribe` keeps the subscription alive.
pub struct Subscription {
    id: u64,
    subscribers: Weak<SubscriberList>,
}

impl Subscription {
    pub fn unsubscribe(self) {
        if let Some(subscribers) = self.subscribers.upgrade() {
            subscribers
                .lock()
                .expect("subscriber list mutex poisoned")
                .retain(|(id, _)| *id != self.id);
        }
    }
}

/// Uniform interface over the identity provider's session primitives.
///
/// Every session-establishing operation reconciles the profile record
/// before returning; reconciliation failures are logged, never surfaced,
/// so identity success stays independent of sync success.
pub struct IdentitySessionBridge {
    provider: Arc<dyn IdentityProvider>,
    reconciler: Arc<ProfileReconciler>,
    subscribers: Arc<SubscriberList>,
    next_subscriber_id: AtomicU64,
    current: Mutex<Option<IdentitySession>>,
}

impl IdentitySessionBridge {
    pub fn new(provider: Arc<dyn IdentityProvider>, reconciler: Arc<ProfileReconciler>) -> Self {
        Self {
            provider,
            reconciler,
            subscribers: Arc::new(Mutex::new(Vec::new())),
            next_subscriber_id: AtomicU64::new(1),
            current: Mutex::new(None),
        }
    }

    /// Register a callback for every session transition. Subscribers are
    /// independent; unsubscribing one never affects the others.
    pub fn subscribe(
        &self,
        callback: impl Fn(&SessionEvent) + Send + Sync + 'static,
    ) -> Subscription {
        let id = self.next_subscriber_id.fetch_add(1, Ordering::Relaxed);
        let callback: SessionCallback = Arc::new(callback);
        self.subscribers
            .lock()
            .expect("subscriber list mutex poisoned")
            .push((id, callback));

        Subscription {
            id,
            subscribers: Arc::downgrade(&self.subscribers),
        }
    }

    pub fn current_session(&self) -> Option<IdentitySession> {
        self.current
            .lock()
            .expect("current session mutex poisoned")
            .clone()
    }

    pub async fn sign_up_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> IdentityErrorResult<IdentitySession> {
        let session = self.provider.create_account(email, password).await?;
        self.establish(session.clone(), None).await;
        Ok(session)
    }

    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> IdentityErrorResult<IdentitySession> {
        let session = self.provider.verify_password(email, password).await?;
        // Re-activation is a side effect of session establishment, not a
        // separate step the caller has to remember
        let explicit = ProfileCandidate {
            status: Some(AccountStatus::Active),
            ..ProfileCandidate::default()
        };
        self.establish(session.clone(), Some(explicit)).await;
        Ok(session)
    }

    pub async fn sign_in_with_federated_provider(&self) -> IdentityErrorResult<IdentitySession> {
        let session = self.provider.federated_sign_in().await?;
        let explicit = ProfileCandidate {
            status: Some(AccountStatus::Active),
            ..ProfileCandidate::default()
        };
        self.establish(session.clone(), Some(explicit)).await;
        Ok(session)
    }

    /// Adopt a session minted elsewhere (the phone verification flow).
    /// The flow already reconciled, so this only tracks and notifies.
    pub fn adopt_session(&self, session: IdentitySession) {
        *self
            .current
            .lock()
            .expect("current session mutex poisoned") = Some(session.clone());
        self.notify(&SessionEvent::SignedIn(session));
    }

    /// Sign out the current session.
    ///
    /// The status flip to inactive runs *before* invalidation so the
    /// update can still carry a valid bearer token; if it fails, sign-out
    /// proceeds and status stays stale until the next sign-in. The
    /// profile record itself is never deleted on logout.
    pub async fn sign_out(&self) -> IdentityErrorResult<()> {
        let session = self
            .current
            .lock()
            .expect("current session mutex poisoned")
            .clone()
            .ok_or_else(|| IdentityError::NoActiveSession {
                location: ErrorLocation::from(Location::caller()),
            })?;

        let explicit = ProfileCandidate {
            status: Some(AccountStatus::Inactive),
            ..ProfileCandidate::default()
        };
        self.reconciler
            .reconcile_quietly(&session, Some(explicit))
            .await;

        self.provider.invalidate_session(&session).await?;

        *self
            .current
            .lock()
            .expect("current session mutex poisoned") = None;
        self.notify(&SessionEvent::SignedOut {
            subject_id: session.subject_id,
        });

        Ok(())
    }

    /// Update provider-held display fields, then reconcile with the new
    /// values; explicitly passed values win over session-held ones.
    pub async fn update_profile_fields(
        &self,
        fields: ProfileCandidate,
    ) -> IdentityErrorResult<ProfileRecord> {
        let mut session = self
            .current
            .lock()
            .expect("current session mutex poisoned")
            .clone()
            .ok_or_else(|| IdentityError::NoActiveSession {
                location: ErrorLocation::from(Location::caller()),
            })?;

        self.provider
            .update_display_fields(
                &session,
                fields.display_name.as_deref(),
                fields.photo_url.as_deref(),
            )
            .await?;

        // Keep the local session snapshot in step with the provider
        if fields.display_name.is_some() {
            session.display_name = fields.display_name.clone();
        }
        if fields.photo_url.is_some() {
            session.photo_url = fields.photo_url.clone();
        }
        *self
            .current
            .lock()
            .expect("current session mutex poisoned") = Some(session.clone());

        self.reconciler.reconcile(&session, Some(fields)).await
    }

    /// Re-read the role claim, optionally forcing a token refresh so a
    /// recent role propagation becomes visible
    pub async fn refresh_role(&self, force_refresh: bool) -> IdentityErrorResult<Role> {
        let session = self
            .current
            .lock()
            .expect("current session mutex poisoned")
            .clone()
            .ok_or_else(|| IdentityError::NoActiveSession {
                location: ErrorLocation::from(Location::caller()),
            })?;

        let role = self.provider.refresh_claims(&session, force_refresh).await?;
        if force_refresh {
            self.notify(&SessionEvent::TokenRefreshed(session));
        }
        Ok(role)
    }

    async fn establish(&self, session: IdentitySession, explicit: Option<ProfileCandidate>) {
        self.reconciler.reconcile_quietly(&session, explicit).await;
        *self
            .current
            .lock()
            .expect("current session mutex poisoned") = Some(session.clone());
        self.notify(&SessionEvent::SignedIn(session));
    }

    fn notify(&self, event: &SessionEvent) {
        // Snapshot the list and invoke outside the lock, so a callback
        // may subscribe or unsubscribe without deadlocking the bridge
        let snapshot: Vec<SessionCallback> = self
            .subscribers
            .lock()
            .expect("subscriber list mutex poisoned")
            .iter()
            .map(|(_, callback)| Arc::clone(callback))
            .collect();
        for callback in snapshot {
            callback(event);
        }
    }
}
