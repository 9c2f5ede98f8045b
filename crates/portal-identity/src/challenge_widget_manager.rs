use crate::challenge_provider::{ChallengeProof, ChallengeProvider, ChallengeWidget};
use crate::{IdentityError, Result as IdentityErrorResult};

use portal_core::ErrorLocation;

use std::collections::HashMap;
use std::panic::Location;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::Mutex;

struct WidgetSlot {
    anchor_id: String,
    widget: Box<dyn ChallengeWidget>,
    proof_taken: AtomicBool,
    released: AtomicBool,
}

/// Live handle to the widget bound to one anchor.
///
/// `get_proof` is single-use; the handle goes dead once the manager
/// releases it or replaces the widget under its anchor.
pub struct ChallengeHandle {
    slot: Arc<WidgetSlot>,
}

impl ChallengeHandle {
    pub fn anchor_id(&self) -> &str {
        &self.slot.anchor_id
    }

    /// Run the challenge and take its proof. Exactly one proof per handle.
    #[track_caller]
    pub async fn get_proof(&self) -> IdentityErrorResult<ChallengeProof> {
        if self.slot.released.load(Ordering::Acquire) {
            return Err(IdentityError::ChallengeFailed {
                message: "widget was torn down".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        if self.slot.proof_taken.swap(true, Ordering::AcqRel) {
            return Err(IdentityError::ProofConsumed {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        self.slot.widget.solve().await
    }
}

/// Registry of challenge widgets, keyed by anchor id.
///
/// Exactly one live widget per anchor at any time; widgets are never
/// shared across unrelated anchors. This replaces the historical pattern
/// of stashing a single verifier instance in ambient global state.
pub struct ChallengeWidgetManager {
    provider: Arc<dyn ChallengeProvider>,
    widgets: Mutex<HashMap<String, Arc<WidgetSlot>>>,
}

impl ChallengeWidgetManager {
    pub fn new(provider: Arc<dyn ChallengeProvider>) -> Self {
        Self {
            provider,
            widgets: Mutex::new(HashMap::new()),
        }
    }

    /// Acquire the widget for `anchor_id`, tearing down any stale one first.
    ///
    /// Idempotent per anchor: a prior live widget is reclaimed before the
    /// new one is created. Fails with `WidgetBusy` only when that teardown
    /// itself fails, `AnchorNotFound` when the anchor is not mounted.
    #[track_caller]
    pub async fn acquire(&self, anchor_id: &str) -> IdentityErrorResult<ChallengeHandle> {
        let mut widgets = self.widgets.lock().await;

        if let Some(stale) = widgets.remove(anchor_id) {
            stale.released.store(true, Ordering::Release);
            if let Err(e) = stale.widget.teardown().await {
                log::warn!("Stale widget teardown failed for anchor '{}': {}", anchor_id, e);
                return Err(IdentityError::WidgetBusy {
                    anchor_id: anchor_id.to_string(),
                    location: ErrorLocation::from(Location::caller()),
                });
            }
        }

        let widget = self.provider.create_widget(anchor_id).await?;

        let slot = Arc::new(WidgetSlot {
            anchor_id: anchor_id.to_string(),
            widget,
            proof_taken: AtomicBool::new(false),
            released: AtomicBool::new(false),
        });
        widgets.insert(anchor_id.to_string(), Arc::clone(&slot));

        Ok(ChallengeHandle { slot })
    }

    /// Tear down the handle's widget and forget it. No-op after the first
    /// call for a given handle.
    pub async fn release(&self, handle: &ChallengeHandle) {
        if handle.slot.released.swap(true, Ordering::AcqRel) {
            return;
        }

        {
            let mut widgets = self.widgets.lock().await;
            if let Some(current) = widgets.get(&handle.slot.anchor_id)
                && Arc::ptr_eq(current, &handle.slot)
            {
                widgets.remove(&handle.slot.anchor_id);
            }
        }

        if let Err(e) = handle.slot.widget.teardown().await {
            log::warn!(
                "Challenge widget teardown failed for anchor '{}': {}",
                handle.slot.anchor_id,
                e
            );
        }
    }

    /// Number of live widgets (diagnostics)
    pub async fn live_widgets(&self) -> usize {
        self.widgets.lock().await.len()
    }
}
