// ABOUTME: Bounded retry wrapper shared by every remote call.
// ABOUTME: Rate limits wait a longer fixed delay; transport failures wait the base delay.

use std::time::Duration;

use serde::Deserialize;

use super::error::Result;

/// Retry behaviour for a single remote call.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RetryPolicy {
    /// Maximum attempts per call, counting the first.
    pub max_attempts: u32,

    /// Delay before the next attempt after a transport failure.
    #[serde(with = "humantime_serde")]
    pub base_delay: Duration,

    /// Delay before the next attempt after a rate-limit signal.
    #[serde(with = "humantime_serde")]
    pub rate_limit_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
            rate_limit_delay: Duration::from_secs(2),
        }
    }
}

/// Run `operation` until it succeeds, the error is terminal, or the
/// attempt budget runs out.
///
/// Rate-limit and transport errors share the same budget; they differ
/// only in how long the wait before the next attempt is. Terminal errors
/// propagate immediately.
pub async fn with_retry<T, F, Fut>(policy: &RetryPolicy, mut operation: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T>>,
{
    let mut attempt: u32 = 1;
    loop {
        let error = match operation().await {
            Ok(value) => return Ok(value),
            Err(error) => error,
        };

        let delay = if error.is_rate_limited() {
            policy.rate_limit_delay
        } else if error.is_transient() {
            policy.base_delay
        } else {
            return Err(error);
        };

        if attempt >= policy.max_attempts {
            return Err(error);
        }

        tracing::debug!(
            attempt,
            max_attempts = policy.max_attempts,
            delay_ms = delay.as_millis() as u64,
            error = %error,
            "remote call failed, retrying"
        );
        attempt += 1;
        tokio::time::sleep(delay).await;
    }
}
