use portal_auth::SessionRoleGate;
use portal_store::ProfileStore;

use std::sync::Arc;

/// Shared application state for the HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ProfileStore>,
    pub gate: Arc<SessionRoleGate>,
}

impl AppState {
    pub fn new(store: Arc<dyn ProfileStore>, gate: Arc<SessionRoleGate>) -> Self {
        Self { store, gate }
    }
}
