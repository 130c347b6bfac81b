//! Error types shared across the crate.
//!
//! Public helpers never surface these; they collapse failures into empty
//! values. The typed errors exist for the lower-level queries that callers
//! may want to inspect directly.

use thiserror::Error;

/// Errors that can occur while querying process or host state.
#[derive(Debug, Error)]
pub enum MetaError {
    /// The operating system refused to enumerate network interfaces.
    #[error("interface enumeration failed: {0}")]
    Interfaces(#[from] std::io::Error),
}
