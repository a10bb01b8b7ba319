//! Seam between the orchestrator and the remote rewrite service.

use async_trait::async_trait;
use lift_transport::TransportError;
use thiserror::Error;

/// Turns one file's source into its rewritten form.
///
/// Implementations are shared read-only across all workers.
#[async_trait]
pub trait Rewriter: Send + Sync {
    /// Rewrite `source`, returning the complete new file text.
    async fn rewrite(&self, source: &str) -> Result<String, RewriteError>;
}

/// Why a rewrite produced no usable text.
#[derive(Error, Debug)]
pub enum RewriteError {
    /// The request could not be serialised.
    #[error("failed to encode request: {0}")]
    Encode(#[from] serde_json::Error),

    /// Transport gave up (network, timeout, or error status).
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The service answered, but not in the expected shape.
    #[error("unexpected response schema: {0}")]
    Schema(String),

    /// The credential cannot be carried in an HTTP header.
    #[error("invalid API key: {0}")]
    Credential(String),
}
