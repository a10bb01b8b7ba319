//! Retrying POST client.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::{HeaderMap, RETRY_AFTER};

use crate::config::TransportConfig;
use crate::error::TransportError;

/// Shared, immutable client for the rewrite endpoint.
///
/// Cloning is cheap; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct Transport {
    client: reqwest::Client,
    config: TransportConfig,
}

/// What a single failed attempt left behind.
enum AttemptFailure {
    Status {
        status: StatusCode,
        body: String,
        retry_after: Option<Duration>,
    },
    Network(reqwest::Error),
}

impl Transport {
    /// Build the client. Every attempt is bounded by `config.timeout`.
    ///
    /// # Errors
    /// `TransportError::Build` when reqwest cannot construct the client.
    pub fn new(config: TransportConfig) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(TransportError::Build)?;
        Ok(Self { client, config })
    }

    /// Configuration this transport was built with.
    #[must_use]
    pub const fn config(&self) -> &TransportConfig {
        &self.config
    }

    /// POST `body` with `headers` to the configured endpoint, retrying
    /// transient failures, and return the response body of the first
    /// success.
    ///
    /// Each attempt re-sends the identical body and headers.
    ///
    /// # Errors
    /// `Status` for a non-retryable status (after one attempt) or when the
    /// attempts run out on a retryable one; `Timeout` / `Request` when the
    /// last attempt failed below HTTP.
    pub async fn send(&self, body: &[u8], headers: &HeaderMap) -> Result<String, TransportError> {
        let max_attempts = self.config.attempts();
        let mut attempt = 0;

        loop {
            attempt += 1;
            let failure = match self.attempt(body, headers).await {
                Ok(Ok(text)) => {
                    if attempt > 1 {
                        tracing::debug!(attempt, "request succeeded after retry");
                    }
                    return Ok(text);
                }
                Ok(Err(failure)) => failure,
                Err(error) => return Err(error.with_attempts(attempt)),
            };

            if attempt >= max_attempts {
                return Err(self.exhausted(failure, attempt));
            }

            let delay = match &failure {
                AttemptFailure::Status {
                    retry_after: Some(wait),
                    ..
                } => (*wait).min(self.config.max_backoff),
                _ => self.config.backoff_delay(attempt),
            };
            match &failure {
                AttemptFailure::Status { status, .. } => tracing::warn!(
                    attempt,
                    max_attempts,
                    status = %status,
                    delay_ms = delay.as_millis(),
                    "retryable status from rewrite endpoint; backing off"
                ),
                AttemptFailure::Network(error) => tracing::warn!(
                    attempt,
                    max_attempts,
                    error = %error,
                    delay_ms = delay.as_millis(),
                    "request to rewrite endpoint failed; backing off"
                ),
            }
            tokio::time::sleep(delay).await;
        }
    }

    /// One POST. The outer `Err` is a failure that must not be retried.
    async fn attempt(
        &self,
        body: &[u8],
        headers: &HeaderMap,
    ) -> Result<Result<String, AttemptFailure>, PendingError> {
        let response = match self
            .client
            .post(&self.config.endpoint)
            .headers(headers.clone())
            .body(body.to_vec())
            .send()
            .await
        {
            Ok(response) => response,
            Err(error) if error.is_builder() => return Err(PendingError::Request(error)),
            Err(error) => return Ok(Err(AttemptFailure::Network(error))),
        };

        let status = response.status();
        let retry_after = parse_retry_after(response.headers());
        let text = match response.text().await {
            Ok(text) => text,
            Err(error) => return Ok(Err(AttemptFailure::Network(error))),
        };

        if status.is_success() {
            return Ok(Ok(text));
        }
        if !self.config.is_retryable(status) {
            return Err(PendingError::Status { status, body: text });
        }
        Ok(Err(AttemptFailure::Status {
            status,
            body: text,
            retry_after,
        }))
    }

    fn exhausted(&self, failure: AttemptFailure, attempts: u32) -> TransportError {
        match failure {
            AttemptFailure::Status { status, body, .. } => TransportError::Status {
                status,
                body,
                attempts,
            },
            AttemptFailure::Network(error) if error.is_timeout() => TransportError::Timeout {
                timeout: self.config.timeout,
                attempts,
            },
            AttemptFailure::Network(source) => TransportError::Request { source, attempts },
        }
    }
}

/// Non-retryable failure whose attempt count is filled in by the loop.
enum PendingError {
    Status { status: StatusCode, body: String },
    Request(reqwest::Error),
}

impl PendingError {
    fn with_attempts(self, attempts: u32) -> TransportError {
        match self {
            Self::Status { status, body } => TransportError::Status {
                status,
                body,
                attempts,
            },
            Self::Request(source) => TransportError::Request { source, attempts },
        }
    }
}

/// `Retry-After` in delta-seconds form. HTTP-date values are ignored.
fn parse_retry_after(headers: &HeaderMap) -> Option<Duration> {
    headers
        .get(RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse::<u64>()
        .ok()
        .map(Duration::from_secs)
}
