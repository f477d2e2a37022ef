//! Retry policy for the request executor.
//!
//! Only HTTP responses whose status is in the retriable set are retried.
//! Transport failures are surfaced immediately.

use std::collections::BTreeSet;
use std::time::Duration;

/// Default number of retries after the first attempt.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Default status codes that trigger a retry.
pub const DEFAULT_RETRIABLE_STATUS_CODES: [u16; 6] = [401, 429, 500, 502, 503, 504];

/// Default backoff unit (the delay before the first retry).
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_secs(1);

/// Default backoff cap.
pub const DEFAULT_MAX_DELAY: Duration = Duration::from_secs(20);

/// Capped exponential backoff over a configurable set of status codes.
///
/// The delay before retry number `attempt + 1` is
/// `min(base_delay * 2^attempt, max_delay)`, with `attempt` starting at 0.
/// With the defaults this is `min(2^attempt, 20)` seconds. No jitter is applied.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use uberdirect::clients::RetryPolicy;
///
/// let policy = RetryPolicy::default();
/// assert_eq!(policy.delay_for(0), Duration::from_secs(1));
/// assert_eq!(policy.delay_for(1), Duration::from_secs(2));
/// assert_eq!(policy.delay_for(5), Duration::from_secs(20));
/// assert!(policy.is_retriable(503));
/// assert!(!policy.is_retriable(404));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    max_retries: u32,
    retriable_status_codes: BTreeSet<u16>,
    base_delay: Duration,
    max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            retriable_status_codes: DEFAULT_RETRIABLE_STATUS_CODES.into_iter().collect(),
            base_delay: DEFAULT_BASE_DELAY,
            max_delay: DEFAULT_MAX_DELAY,
        }
    }
}

impl RetryPolicy {
    /// Sets the maximum number of retries after the first attempt.
    #[must_use]
    pub const fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Replaces the retriable status code set.
    #[must_use]
    pub fn with_retriable_status_codes(mut self, codes: impl IntoIterator<Item = u16>) -> Self {
        self.retriable_status_codes = codes.into_iter().collect();
        self
    }

    /// Sets the backoff unit and cap.
    #[must_use]
    pub const fn with_backoff(mut self, base_delay: Duration, max_delay: Duration) -> Self {
        self.base_delay = base_delay;
        self.max_delay = max_delay;
        self
    }

    /// Returns the maximum number of retries.
    #[must_use]
    pub const fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Returns the retriable status codes.
    #[must_use]
    pub const fn retriable_status_codes(&self) -> &BTreeSet<u16> {
        &self.retriable_status_codes
    }

    /// Returns `true` if a response with this status should be retried.
    #[must_use]
    pub fn is_retriable(&self, status: u16) -> bool {
        self.retriable_status_codes.contains(&status)
    }

    /// Returns the sleep before the retry that follows failed attempt `attempt`.
    #[must_use]
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 1u32.checked_shl(attempt).unwrap_or(u32::MAX);
        self.base_delay.saturating_mul(factor).min(self.max_delay)
    }
}
