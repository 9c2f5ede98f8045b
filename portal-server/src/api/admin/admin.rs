//! Admin REST API handlers

use crate::{
    ApiResult, BearerToken, ProfileDto, ProfileListResponse, VerifyAdminResponse,
};
use crate::state::AppState;

use portal_core::Role;

use axum::{Json, extract::State};

/// GET /admin/verify
///
/// Verify the caller's token carries the admin role. An invalid token is
/// a 401; a valid non-admin token is a 403, never a silent `isAdmin:
/// false`.
pub async fn verify_admin(
    State(state): State<AppState>,
    bearer: BearerToken,
) -> ApiResult<Json<VerifyAdminResponse>> {
    let claims = state.gate.authorize(bearer.as_deref(), Some(Role::Admin))?;

    Ok(Json(VerifyAdminResponse {
        is_admin: true,
        subject_id: claims.sub,
        email: claims.email,
        role: claims.role,
    }))
}

/// GET /admin/users
///
/// Full roster of non-deleted profiles, admin only.
pub async fn list_users(
    State(state): State<AppState>,
    bearer: BearerToken,
) -> ApiResult<Json<ProfileListResponse>> {
    state.gate.authorize(bearer.as_deref(), Some(Role::Admin))?;

    let records = state.store.list_all().await?;

    Ok(Json(ProfileListResponse {
        users: records.into_iter().map(ProfileDto::from).collect(),
    }))
}
