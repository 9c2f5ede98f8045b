//! Axum extractors for REST API authentication

use crate::ApiError;
use crate::state::AppState;

use std::future::Future;

use axum::{extract::FromRequestParts, http::request::Parts};

/// Extracts the raw `Authorization` header value from the request.
///
/// `None` when the header is absent or not valid UTF-8; scheme and token
/// validation happen downstream in the role gate so the 401 reason codes
/// stay in one place.
pub struct BearerToken(pub Option<String>);

impl BearerToken {
    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

impl FromRequestParts<AppState> for BearerToken {
    type Rejection = ApiError;

    #[allow(clippy::manual_async_fn)]
    fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        async move {
            let header = parts
                .headers
                .get(http::header::AUTHORIZATION)
                .and_then(|v| v.to_str().ok())
                .map(str::to_owned);

            Ok(BearerToken(header))
        }
    }
}
