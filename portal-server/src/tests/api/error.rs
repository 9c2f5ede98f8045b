use crate::ApiError;

use portal_auth::AuthError;
use portal_core::Role;
use portal_store::StoreError;

use std::panic::Location;

use axum::response::IntoResponse;
use error_location::ErrorLocation;
use http::StatusCode;
use http_body_util::BodyExt;

#[tokio::test]
async fn test_not_found_returns_404_with_json_body() {
    let error = ApiError::NotFound {
        message: "Profile abc not found".into(),
        location: ErrorLocation::from(Location::caller()),
    };
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(json["error"]["code"], "NOT_FOUND");
    assert_eq!(json["error"]["message"], "Profile abc not found");
}

#[tokio::test]
async fn test_validation_error_returns_400_with_field() {
    let error = ApiError::Validation {
        message: "subjectId is required".into(),
        field: Some("subjectId".into()),
        location: ErrorLocation::from(Location::caller()),
    };
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"]["field"], "subjectId");
}

#[tokio::test]
async fn test_conflict_error_returns_409_with_field() {
    let error = ApiError::Conflict {
        field: "email".into(),
        location: ErrorLocation::from(Location::caller()),
    };
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(json["error"]["code"], "CONFLICT");
    assert_eq!(json["error"]["field"], "email");
}

#[tokio::test]
async fn test_internal_error_returns_500() {
    let error = ApiError::Internal {
        message: "Profile store operation failed".into(),
        location: ErrorLocation::from(Location::caller()),
    };
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(json["error"]["code"], "INTERNAL_ERROR");
}

#[test]
fn test_missing_token_converts_to_unauthorized() {
    let auth_error = AuthError::MissingToken {
        location: ErrorLocation::from(Location::caller()),
    };

    let api_error = ApiError::from(auth_error);

    assert!(matches!(
        api_error,
        ApiError::Unauthorized {
            code: "MISSING_TOKEN",
            ..
        }
    ));
}

#[test]
fn test_insufficient_role_converts_to_forbidden() {
    let auth_error = AuthError::InsufficientRole {
        required: Role::Admin,
        location: ErrorLocation::from(Location::caller()),
    };

    let api_error = ApiError::from(auth_error);

    assert!(matches!(api_error, ApiError::Forbidden { .. }));
}

#[test]
fn test_unique_violation_converts_to_conflict() {
    let store_error = StoreError::UniqueViolation {
        field: "email".into(),
        location: ErrorLocation::from(Location::caller()),
    };

    let api_error = ApiError::from(store_error);

    assert!(matches!(
        api_error,
        ApiError::Conflict { ref field, .. } if field == "email"
    ));
}

#[test]
fn test_store_unavailable_converts_to_internal() {
    let store_error = StoreError::Unavailable {
        message: "pool closed".into(),
        location: ErrorLocation::from(Location::caller()),
    };

    let api_error = ApiError::from(store_error);

    assert!(matches!(api_error, ApiError::Internal { .. }));
}
