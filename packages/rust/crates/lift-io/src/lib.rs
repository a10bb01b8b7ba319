#![allow(clippy::doc_markdown)]

//! lift-io - Safe source reads and crash-safe writes for literal-lift
//!
//! # Features
//!
//! - **Safe reads**: size limits, binary detection, strict UTF-8
//! - **Dual API**: sync (std::fs) for classification on the rayon pool,
//!   async (tokio::fs) for the worker tasks
//! - **Atomic replace**: temp file in the target directory, fsync, rename
//! - **Sibling outputs**: `<name>.bak` backups and `<name>.new` dry-run shadows
//!
//! # Architecture
//!
//! ```text
//! lift-io/src/
//! ├── lib.rs      # Re-exports (this file)
//! ├── error.rs    # IoError enum
//! ├── detect.rs   # Binary detection & decoding
//! ├── sync.rs     # Synchronous reads
//! ├── async_io.rs # Asynchronous reads (Tokio)
//! └── atomic.rs   # Atomic replace, backups, shadow files
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use lift_io::{atomic_replace, read_text_safe};
//!
//! let source = read_text_safe("Greeting.java", 1024 * 1024)?;
//! let outcome = atomic_replace("Greeting.java", &rewritten, true)?;
//! ```

mod async_io;
mod atomic;
mod detect;
mod error;
mod sync;

pub use async_io::read_text_safe_async;
pub use atomic::{
    BACKUP_SUFFIX, SHADOW_SUFFIX, WriteMode, WriteOutcome, atomic_replace, sibling_path,
    write_sibling,
};
pub use detect::{decode_buffer, is_binary};
pub use error::IoError;
pub use sync::read_text_safe;
