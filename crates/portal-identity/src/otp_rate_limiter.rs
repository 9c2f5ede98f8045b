use crate::{IdentityError, Result as IdentityErrorResult};

use portal_core::ErrorLocation;

use std::num::NonZeroU32;
use std::panic::Location;
use std::time::Duration;

use governor::{
    Quota, RateLimiter,
    clock::DefaultClock,
    state::keyed::DefaultKeyedStateStore,
};

/// Configuration for OTP send throttling
#[derive(Debug, Clone)]
pub struct OtpRateLimitConfig {
    /// Maximum code sends per window, per phone number
    pub max_sends: u32,
    /// Window duration in seconds
    pub window_secs: u64,
}

impl Default for OtpRateLimitConfig {
    fn default() -> Self {
        Self {
            max_sends: 5,     // 5 code sends
            window_secs: 300, // per 5 minutes
        }
    }
}

/// Per-phone-number limiter on the send-code step.
///
/// The identity provider throttles on its end too; this limiter keeps
/// obviously abusive retry loops from ever reaching it.
pub struct OtpRateLimiter {
    limiter: RateLimiter<String, DefaultKeyedStateStore<String>, DefaultClock>,
    config: OtpRateLimitConfig,
}

impl OtpRateLimiter {
    pub fn new(config: OtpRateLimitConfig) -> Self {
        let one = NonZeroU32::MIN;
        let max_sends = NonZeroU32::new(config.max_sends).unwrap_or(one);
        let period =
            Duration::from_secs(config.window_secs.max(1)) / max_sends.get();

        let quota = Quota::with_period(period)
            .unwrap_or_else(|| Quota::per_second(one))
            .allow_burst(max_sends);

        Self {
            limiter: RateLimiter::keyed(quota),
            config,
        }
    }

    /// Check whether another code may be sent to `phone_number`
    #[track_caller]
    pub fn check(&self, phone_number: &str) -> IdentityErrorResult<()> {
        self.limiter
            .check_key(&phone_number.to_string())
            .map_err(|_| IdentityError::RateLimited {
                limit: self.config.max_sends,
                window_secs: self.config.window_secs,
                location: ErrorLocation::from(Location::caller()),
            })
    }
}

impl Default for OtpRateLimiter {
    fn default() -> Self {
        Self::new(OtpRateLimitConfig::default())
    }
}
