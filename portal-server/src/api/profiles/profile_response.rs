use crate::ProfileDto;

use serde::Serialize;

/// Single-profile response envelope.
///
/// Lookups for an unknown (or soft-deleted) subject return `profile: null`
/// with a 200, so callers can distinguish "no record yet" from transport
/// errors.
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub profile: Option<ProfileDto>,
}
