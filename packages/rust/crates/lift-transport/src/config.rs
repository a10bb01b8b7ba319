//! Transport configuration and backoff schedule.

use std::time::Duration;

use reqwest::StatusCode;

/// Default per-attempt timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Upper bound on any single backoff sleep.
pub const DEFAULT_MAX_BACKOFF_SECS: u64 = 120;

/// Server-busy and server-error statuses that trigger a retry.
pub const DEFAULT_RETRY_STATUSES: [u16; 5] = [429, 500, 502, 503, 504];

/// Settings fixed at construction time of a [`crate::Transport`].
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// URL every request is POSTed to.
    pub endpoint: String,
    /// Total attempts per call, first attempt included. Zero acts as one.
    pub max_attempts: u32,
    /// Seconds multiplied by `2^(n-1)` before retry `n`.
    pub backoff_factor: f64,
    /// Ceiling for a single backoff sleep, `Retry-After` included.
    pub max_backoff: Duration,
    /// Bound on each attempt, connect through body read.
    pub timeout: Duration,
    /// Statuses worth another attempt.
    pub retry_statuses: Vec<u16>,
}

impl TransportConfig {
    /// Configuration for `endpoint` with default retry behaviour.
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            max_attempts: 4,
            backoff_factor: 1.0,
            max_backoff: Duration::from_secs(DEFAULT_MAX_BACKOFF_SECS),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            retry_statuses: DEFAULT_RETRY_STATUSES.to_vec(),
        }
    }

    /// Whether a response with `status` should be retried.
    #[must_use]
    pub fn is_retryable(&self, status: StatusCode) -> bool {
        self.retry_statuses.contains(&status.as_u16())
    }

    /// Sleep before retry number `retry` (1 for the first retry).
    #[must_use]
    pub fn backoff_delay(&self, retry: u32) -> Duration {
        if self.backoff_factor <= 0.0 || retry == 0 {
            return Duration::ZERO;
        }
        let exponent = retry.saturating_sub(1).min(32) as i32;
        let secs = self.backoff_factor * 2_f64.powi(exponent);
        Duration::try_from_secs_f64(secs)
            .unwrap_or(self.max_backoff)
            .min(self.max_backoff)
    }

    pub(crate) fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }
}
