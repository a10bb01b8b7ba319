//! Error types for the transport layer.

use std::time::Duration;

use reqwest::StatusCode;
use thiserror::Error;

/// Terminal failure of a [`crate::Transport::send`] call.
///
/// Intermediate failures that were retried are only logged; the error
/// carries what the last attempt observed.
#[derive(Error, Debug)]
pub enum TransportError {
    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("remote returned {status} after {attempts} attempt(s): {body}")]
    Status {
        /// Last status observed.
        status: StatusCode,
        /// Body of the last response.
        body: String,
        /// Attempts made.
        attempts: u32,
    },

    /// The last attempt exceeded the per-attempt timeout.
    #[error("request timed out after {timeout:?} ({attempts} attempt(s))")]
    Timeout {
        /// Configured per-attempt timeout.
        timeout: Duration,
        /// Attempts made.
        attempts: u32,
    },

    /// Connection or protocol failure on the last attempt.
    #[error("request failed after {attempts} attempt(s): {source}")]
    Request {
        /// Underlying reqwest error.
        #[source]
        source: reqwest::Error,
        /// Attempts made.
        attempts: u32,
    },
}

impl TransportError {
    /// Number of attempts made before giving up.
    #[must_use]
    pub const fn attempts(&self) -> u32 {
        match self {
            Self::Build(_) => 0,
            Self::Status { attempts, .. }
            | Self::Timeout { attempts, .. }
            | Self::Request { attempts, .. } => *attempts,
        }
    }

    /// Last HTTP status, when the service answered at all.
    #[must_use]
    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
