//! Profile REST API handlers
//!
//! Merge-upsert, lookup, partial update, and soft-delete of profile
//! records. All handlers run behind the session role gate: a caller may
//! act on their own record, admins may act on anyone's.

use crate::{
    ApiError, ApiResult, BearerToken, DeleteResponse, ProfileDto, ProfileQuery, ProfileResponse,
    UpdateProfileRequest, UpsertProfileRequest,
};
use crate::state::AppState;

use portal_core::Role;

use std::panic::Location;

use axum::{
    Json,
    extract::{Query, State},
};
use error_location::ErrorLocation;

// =============================================================================
// Handlers
// =============================================================================

/// POST /profile
///
/// Merge-upsert a profile keyed by subject id. Creates the record when
/// absent, revives a soft-deleted one, and never lets an absent or empty
/// field erase a stored value. Phone-only subjects (no email anywhere)
/// get a deterministic placeholder email. Role changes are admin-only,
/// same as PUT.
pub async fn upsert_profile(
    State(state): State<AppState>,
    bearer: BearerToken,
    Json(request): Json<UpsertProfileRequest>,
) -> ApiResult<Json<ProfileResponse>> {
    if request.subject_id.trim().is_empty() {
        return Err(ApiError::Validation {
            message: "subjectId is required".to_string(),
            field: Some("subjectId".to_string()),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    let claims = state
        .gate
        .authorize_subject(bearer.as_deref(), &request.subject_id)?;

    if let Some(new_role) = request.fields.role
        && !claims.is_admin()
    {
        // Absent records count as role user, so a non-admin cannot
        // create themselves as admin either
        let current_role = state
            .store
            .find_by_subject_id(&request.subject_id)
            .await?
            .map(|existing| existing.role)
            .unwrap_or_default();
        if new_role != current_role {
            return Err(ApiError::Forbidden {
                message: "Only administrators may change roles".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }
    }

    let record = state.store.upsert(&request.subject_id, &request.fields).await?;

    Ok(Json(ProfileResponse {
        profile: Some(ProfileDto::from(record)),
    }))
}

/// GET /profile?subjectId=...
///
/// Look up a profile by subject id. Unknown or soft-deleted subjects
/// yield `profile: null`, not a 404.
pub async fn get_profile(
    State(state): State<AppState>,
    bearer: BearerToken,
    Query(query): Query<ProfileQuery>,
) -> ApiResult<Json<ProfileResponse>> {
    state
        .gate
        .authorize_subject(bearer.as_deref(), &query.subject_id)?;

    let record = state.store.find_by_subject_id(&query.subject_id).await?;

    Ok(Json(ProfileResponse {
        profile: record.map(ProfileDto::from),
    }))
}

/// PUT /profile
///
/// Partial update of an existing record. Unlike POST this never creates:
/// unknown subjects get a 404. Role changes are admin-only even when the
/// caller owns the record.
pub async fn update_profile(
    State(state): State<AppState>,
    bearer: BearerToken,
    Json(request): Json<UpdateProfileRequest>,
) -> ApiResult<Json<ProfileResponse>> {
    let claims = state
        .gate
        .authorize_subject(bearer.as_deref(), &request.subject_id)?;

    let existing = state
        .store
        .find_by_subject_id(&request.subject_id)
        .await?
        .ok_or_else(|| ApiError::NotFound {
            message: format!("Profile {} not found", request.subject_id),
            location: ErrorLocation::from(Location::caller()),
        })?;

    if let Some(new_role) = request.fields.role
        && new_role != existing.role
        && !claims.is_admin()
    {
        return Err(ApiError::Forbidden {
            message: "Only administrators may change roles".to_string(),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    let record = state.store.upsert(&request.subject_id, &request.fields).await?;

    Ok(Json(ProfileResponse {
        profile: Some(ProfileDto::from(record)),
    }))
}

/// DELETE /profile?subjectId=...
///
/// Soft-delete a profile (admin only). The record is hidden from lookups
/// but kept on disk; a later upsert revives it.
pub async fn delete_profile(
    State(state): State<AppState>,
    bearer: BearerToken,
    Query(query): Query<ProfileQuery>,
) -> ApiResult<Json<DeleteResponse>> {
    state.gate.authorize(bearer.as_deref(), Some(Role::Admin))?;

    let deleted = state.store.soft_delete(&query.subject_id).await?;
    if !deleted {
        return Err(ApiError::NotFound {
            message: format!("Profile {} not found", query.subject_id),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    Ok(Json(DeleteResponse { deleted: true }))
}
