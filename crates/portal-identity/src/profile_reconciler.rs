use crate::provider::IdentityProvider;
use crate::{IdentityError, Result as IdentityErrorResult};

use portal_core::{ErrorLocation, IdentitySession, ProfileCandidate, ProfileRecord};
use portal_store::ProfileStore;

use std::panic::Location;
use std::sync::Arc;

/// Synchronization protocol between a live session and the persisted
/// profile record.
///
/// Fired after every session-establishing event. Idempotent: the sign-up
/// and sign-in paths may both fire for the same subject in rapid
/// succession, and merge-upserts make that safe (last-write-wins on
/// physically concurrent writes, no stronger ordering promised).
pub struct ProfileReconciler {
    store: Arc<dyn ProfileStore>,
    provider: Arc<dyn IdentityProvider>,
}

impl ProfileReconciler {
    pub fn new(store: Arc<dyn ProfileStore>, provider: Arc<dyn IdentityProvider>) -> Self {
        Self { store, provider }
    }

    /// Upsert the profile record for `session`, explicit fields winning
    /// over session fields, and sync the role claim when it changed.
    ///
    /// Store failures surface as `PersistenceUnavailable`; callers on the
    /// identity path log them instead of failing the identity operation.
    /// Claim propagation is best-effort and never fails the reconcile.
    #[track_caller]
    pub async fn reconcile(
        &self,
        session: &IdentitySession,
        explicit: Option<ProfileCandidate>,
    ) -> IdentityErrorResult<ProfileRecord> {
        if session.subject_id.trim().is_empty() {
            // Never expected for a successfully authenticated session
            return Err(IdentityError::MissingSubjectId {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let mut candidate = ProfileCandidate::from_session(session);
        if let Some(explicit) = explicit {
            candidate = candidate.overlaid_with(explicit);
        }
        if candidate.email.is_none() {
            candidate.email = Some(ProfileRecord::placeholder_email(&session.subject_id));
        }

        let previous_role = self
            .store
            .find_by_subject_id(&session.subject_id)
            .await
            .map_err(persistence)?
            .map(|r| r.role)
            .unwrap_or_default();

        let record = self
            .store
            .upsert(&session.subject_id, &candidate)
            .await
            .map_err(persistence)?;

        if record.role != previous_role
            && let Err(e) = self
                .provider
                .set_custom_claims(&record.subject_id, record.role)
                .await
        {
            // Claim and stored role converge on the next successful sync;
            // callers tolerate staleness up to one token refresh cycle
            log::warn!(
                "Role claim propagation failed for subject '{}': {}",
                record.subject_id,
                e
            );
        }

        Ok(record)
    }

    /// Reconcile on the identity path: failures are logged, never raised,
    /// so a sync outage cannot fail the parent sign-in/sign-up.
    pub async fn reconcile_quietly(
        &self,
        session: &IdentitySession,
        explicit: Option<ProfileCandidate>,
    ) {
        if let Err(e) = self.reconcile(session, explicit).await {
            log::warn!(
                "Profile reconciliation failed for subject '{}': {}",
                session.subject_id,
                e
            );
        }
    }
}

#[track_caller]
fn persistence(source: portal_store::StoreError) -> IdentityError {
    IdentityError::PersistenceUnavailable {
        source,
        location: ErrorLocation::from(Location::caller()),
    }
}
