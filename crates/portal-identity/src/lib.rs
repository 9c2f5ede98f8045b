pub mod challenge_provider;
pub mod challenge_widget_manager;
pub mod error;
pub mod otp_rate_limiter;
pub mod phone_verification_flow;
pub mod profile_reconciler;
pub mod provider;
pub mod session_bridge;

pub use challenge_provider::{ChallengeProof, ChallengeProvider, ChallengeWidget};
pub use challenge_widget_manager::{ChallengeHandle, ChallengeWidgetManager};
pub use error::{IdentityError, Result};
pub use otp_rate_limiter::{OtpRateLimitConfig, OtpRateLimiter};
pub use phone_verification_flow::{FlowState, PhoneVerificationFlow, normalize_phone_number};
pub use profile_reconciler::ProfileReconciler;
pub use provider::{IdentityProvider, PendingVerification};
pub use session_bridge::{IdentitySessionBridge, SessionEvent, Subscription};

#[cfg(test)]
mod tests;
