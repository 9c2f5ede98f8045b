use crate::{AuthError, Claims, JwtValidator, Result as AuthErrorResult};

use portal_core::Role;

use std::panic::Location;

use error_location::ErrorLocation;

/// Server-side authorization check over a bearer session token.
///
/// Distinguishes "invalid/expired token" (401 class) from "valid token,
/// insufficient role" (403 class); callers must never collapse the two.
pub struct SessionRoleGate {
    validator: JwtValidator,
}

impl SessionRoleGate {
    pub fn new(validator: JwtValidator) -> Self {
        Self { validator }
    }

    /// Verify the `Authorization` header value and optionally require a role.
    ///
    /// `bearer` is the raw header value (`Bearer <token>`), or `None` when
    /// the header was absent.
    #[track_caller]
    pub fn authorize(
        &self,
        bearer: Option<&str>,
        required_role: Option<Role>,
    ) -> AuthErrorResult<Claims> {
        let token = Self::extract_token(bearer)?;
        let claims = self.validator.validate(token)?;

        if let Some(required) = required_role
            && claims.role != required
        {
            return Err(AuthError::InsufficientRole {
                required,
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(claims)
    }

    /// Self-service check: the owner of `subject_id` may always act on
    /// their own record; anyone else needs the admin role.
    #[track_caller]
    pub fn authorize_subject(
        &self,
        bearer: Option<&str>,
        subject_id: &str,
    ) -> AuthErrorResult<Claims> {
        let token = Self::extract_token(bearer)?;
        let claims = self.validator.validate(token)?;

        if claims.sub != subject_id && !claims.is_admin() {
            return Err(AuthError::InsufficientRole {
                required: Role::Admin,
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(claims)
    }

    #[track_caller]
    fn extract_token(bearer: Option<&str>) -> AuthErrorResult<&str> {
        let header = bearer.ok_or_else(|| AuthError::MissingToken {
            location: ErrorLocation::from(Location::caller()),
        })?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AuthError::InvalidScheme {
                location: ErrorLocation::from(Location::caller()),
            })?
            .trim();

        if token.is_empty() {
            return Err(AuthError::MissingToken {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(token)
    }
}
