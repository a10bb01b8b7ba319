#![allow(clippy::doc_markdown)]

//! lift-transport - Retrying POST transport for the rewrite service
//!
//! One [`Transport`] is built before any worker starts and then shared
//! read-only. It wraps a pooled `reqwest::Client` with:
//!
//! - a fixed per-attempt timeout,
//! - a bounded number of attempts,
//! - exponential backoff between attempts (`factor * 2^(n-1)` seconds),
//! - retries only for network failures, timeouts and allow-listed statuses.
//!
//! # Architecture
//!
//! ```text
//! lift-transport/src/
//! ├── lib.rs       # Re-exports (this file)
//! ├── config.rs    # TransportConfig, backoff schedule
//! ├── error.rs     # TransportError enum
//! └── transport.rs # Transport::send retry loop
//! ```

mod config;
mod error;
mod transport;

pub use config::{
    DEFAULT_MAX_BACKOFF_SECS, DEFAULT_RETRY_STATUSES, DEFAULT_TIMEOUT_SECS, TransportConfig,
};
pub use error::TransportError;
pub use reqwest::{StatusCode, Url};
pub use reqwest::header::{self, HeaderMap, HeaderValue};
pub use transport::Transport;
