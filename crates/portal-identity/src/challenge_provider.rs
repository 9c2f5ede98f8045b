use crate::Result as IdentityErrorResult;

use async_trait::async_trait;

/// Single-use token proving a human-presence check passed.
///
/// Consumed by value exactly once, by the send-code step of the phone
/// verification flow. The verifier invalidates it server-side after use,
/// after expiry, or when the owning widget is torn down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChallengeProof(String);

impl ChallengeProof {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn into_token(self) -> String {
        self.0
    }
}

/// A rendered human-presence challenge, bound to one anchor.
///
/// The widget's anti-automation algorithm is the verifier's business;
/// this side only asks it to produce a proof and to tear itself down.
#[async_trait]
pub trait ChallengeWidget: Send + Sync {
    /// Run the challenge and yield a proof.
    ///
    /// Fails with `ChallengeExpired` when the underlying challenge timed
    /// out, or `ChallengeFailed` for any other verifier-reported error.
    async fn solve(&self) -> IdentityErrorResult<ChallengeProof>;

    /// Destroy the rendered widget
    async fn teardown(&self) -> IdentityErrorResult<()>;
}

/// Factory boundary to the challenge verifier SDK
#[async_trait]
pub trait ChallengeProvider: Send + Sync {
    /// Create and render an invisible widget bound to `anchor_id`.
    ///
    /// Fails with `AnchorNotFound` when the anchor is not mounted at call
    /// time; callers poll/retry with backoff as a UI lifecycle concern.
    async fn create_widget(
        &self,
        anchor_id: &str,
    ) -> IdentityErrorResult<Box<dyn ChallengeWidget>>;
}
