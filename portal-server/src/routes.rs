use crate::health;
use crate::state::AppState;

use axum::{
    Router,
    routing::get,
};
use tower_http::cors::{Any, CorsLayer};

/// Build the application router with all endpoints
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Profile endpoints
        .route(
            "/profile",
            get(crate::get_profile)
                .post(crate::upsert_profile)
                .put(crate::update_profile)
                .delete(crate::delete_profile),
        )
        // Admin endpoints
        .route("/admin/verify", get(crate::verify_admin))
        .route("/admin/users", get(crate::list_users))
        // Health check endpoints
        .route("/health", get(health::health_check))
        .route("/live", get(health::liveness_check))
        .route("/ready", get(health::readiness_check))
        // Add shared state
        .with_state(state)
        // CORS middleware (browser portal calls these endpoints directly)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
