use portal_core::ErrorLocation;
use portal_store::StoreError;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum IdentityError {
    #[error("Challenge anchor '{anchor_id}' not mounted {location}")]
    AnchorNotFound {
        anchor_id: String,
        location: ErrorLocation,
    },

    #[error("Challenge widget for anchor '{anchor_id}' could not be reclaimed {location}")]
    WidgetBusy {
        anchor_id: String,
        location: ErrorLocation,
    },

    #[error("Challenge expired, solve it again {location}")]
    ChallengeExpired { location: ErrorLocation },

    #[error("Challenge failed: {message} {location}")]
    ChallengeFailed {
        message: String,
        location: ErrorLocation,
    },

    #[error("Challenge proof already consumed {location}")]
    ProofConsumed { location: ErrorLocation },

    #[error("Challenge unavailable: {message} {location}")]
    ChallengeUnavailable {
        message: String,
        location: ErrorLocation,
    },

    #[error("Invalid phone number: {value} {location}")]
    InvalidPhoneNumber {
        value: String,
        location: ErrorLocation,
    },

    #[error("Rate limited: {limit} code sends per {window_secs}s {location}")]
    RateLimited {
        limit: u32,
        window_secs: u64,
        location: ErrorLocation,
    },

    #[error("The verification code is invalid {location}")]
    InvalidCode { location: ErrorLocation },

    #[error("The verification code has expired, request a new one {location}")]
    CodeExpired { location: ErrorLocation },

    #[error("Session has no subject id {location}")]
    MissingSubjectId { location: ErrorLocation },

    #[error("No active session {location}")]
    NoActiveSession { location: ErrorLocation },

    #[error("Profile persistence unavailable: {source} {location}")]
    PersistenceUnavailable {
        #[source]
        source: StoreError,
        location: ErrorLocation,
    },

    #[error("Identity provider error: {message} {location}")]
    Provider {
        message: String,
        location: ErrorLocation,
    },
}

pub type Result<T> = std::result::Result<T, IdentityError>;
