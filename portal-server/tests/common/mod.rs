#![allow(dead_code)]

//! Test infrastructure for portal-server API tests

use portal_auth::{JwtAlgorithm, JwtValidator, SessionRoleGate};
use portal_core::{ProfileCandidate, Role};
use portal_server::AppState;
use portal_store::{MemoryProfileStore, ProfileStore};

use std::sync::Arc;

use jsonwebtoken::{EncodingKey, Header, encode};
use serde::Serialize;

pub const TEST_SECRET: &[u8] = b"integration-test-secret-0123456789abcdef";

/// Create AppState backed by an in-memory store and an HS256 gate
pub fn create_test_app_state() -> (AppState, Arc<MemoryProfileStore>) {
    let store = Arc::new(MemoryProfileStore::new());
    let validator = JwtValidator::new(&JwtAlgorithm::HS256 {
        secret: TEST_SECRET.to_vec(),
    })
    .expect("HS256 validator");
    let gate = Arc::new(SessionRoleGate::new(validator));

    let state = AppState::new(store.clone() as Arc<dyn ProfileStore>, gate);
    (state, store)
}

#[derive(Serialize)]
struct TestClaims {
    sub: String,
    exp: i64,
    iat: i64,
    role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<String>,
}

/// Mint a signed token for the test secret
pub fn mint_token(sub: &str, role: Role) -> String {
    mint_token_with_expiry(sub, role, chrono::Utc::now().timestamp() + 3600)
}

/// Mint a token with an explicit expiry (use a past timestamp to expire it)
pub fn mint_token_with_expiry(sub: &str, role: Role, exp: i64) -> String {
    let claims = TestClaims {
        sub: sub.to_string(),
        exp,
        iat: chrono::Utc::now().timestamp() - 10,
        role,
        email: Some(format!("{}@test.local", sub)),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET),
    )
    .expect("failed to encode test token")
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

/// Seed a profile through the store's merge path
pub async fn seed_profile(store: &MemoryProfileStore, subject_id: &str, email: &str) {
    let candidate = ProfileCandidate {
        email: Some(email.to_string()),
        ..ProfileCandidate::default()
    };
    store
        .upsert(subject_id, &candidate)
        .await
        .expect("failed to seed profile");
}
