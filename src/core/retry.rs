//! Bounded exponential-backoff retry over a single logical completion call.
//!
//! Only a rate-limit signal (429) is retried. Capacity (498) and server (500)
//! failures end the call at once with an advisory message, everything else is
//! passed through untouched.

use std::future::Future;
use std::time::Duration;

use tracing::{debug, warn};

use super::error::{
    CompletionError, STATUS_CAPACITY_EXCEEDED, STATUS_RATE_LIMITED, STATUS_SERVER_ERROR,
    TransportError,
};

/// Retry ceiling and backoff base for one logical call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryConfig {
    /// Retries after the first attempt (default: 3)
    pub max_retries: u32,
    /// Delay before the first retry, doubled for each following one (default: 1s)
    pub base_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_millis(1000),
        }
    }
}

impl RetryConfig {
    pub fn new(max_retries: u32, base_delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay,
        }
    }

    /// Upper bound on attempts for a single call.
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Drive `operation` until it succeeds or fails terminally.
    ///
    /// `operation` receives the zero-based attempt number. The backoff timer
    /// lives inside the returned future, so dropping it mid-wait releases the
    /// timer as well.
    pub async fn run<T, F, Fut>(
        &self,
        mut operation: F,
    ) -> Result<(T, RetryState), CompletionError>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, TransportError>>,
    {
        let mut state = RetryState::default();

        loop {
            let attempt = state.attempts;
            state.attempts += 1;

            let error = match operation(attempt).await {
                Ok(value) => {
                    debug!(attempts = state.attempts, "Completion request succeeded");
                    return Ok((value, state));
                }
                Err(error) => error,
            };

            let retries = state.retries();
            match FailureClass::of(&error) {
                FailureClass::RateLimited if retries < self.max_retries => {
                    let delay = backoff_delay(self.base_delay, retries);
                    warn!(
                        attempt = state.attempts,
                        max_attempts = self.max_attempts(),
                        delay_ms = delay.as_millis() as u64,
                        "Rate limited, backing off before retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                FailureClass::RateLimited => {
                    warn!(attempts = state.attempts, "Rate limited, retries exhausted");
                    return Err(CompletionError::RateLimited(error));
                }
                FailureClass::CapacityExceeded => {
                    warn!(status = ?error.status, "Service over capacity");
                    return Err(CompletionError::capacity_exceeded(error));
                }
                FailureClass::ServerError => {
                    warn!(status = ?error.status, "Service reported an internal error");
                    return Err(CompletionError::server_error(error));
                }
                FailureClass::Unknown => {
                    debug!(status = ?error.status, error = %error, "Unclassified failure");
                    return Err(CompletionError::Unknown(error));
                }
            }
        }
    }
}

/// Delay before retry number `retry + 1`: `base × 2^retry`, saturating.
pub fn backoff_delay(base: Duration, retry: u32) -> Duration {
    let factor = 2_u32.checked_pow(retry).unwrap_or(u32::MAX);
    base.checked_mul(factor).unwrap_or(Duration::MAX)
}

/// How the policy treats a failed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    RateLimited,
    CapacityExceeded,
    ServerError,
    Unknown,
}

impl FailureClass {
    pub fn of(error: &TransportError) -> Self {
        match error.status {
            Some(STATUS_RATE_LIMITED) => FailureClass::RateLimited,
            Some(STATUS_CAPACITY_EXCEEDED) => FailureClass::CapacityExceeded,
            Some(STATUS_SERVER_ERROR) => FailureClass::ServerError,
            _ => FailureClass::Unknown,
        }
    }
}

/// Attempts made so far by one call. Never shared between calls.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RetryState {
    attempts: u32,
}

impl RetryState {
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Retries already spent, i.e. the `n` of the backoff formula.
    fn retries(&self) -> u32 {
        self.attempts.saturating_sub(1)
    }
}
