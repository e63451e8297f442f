//! Error types for queue orchestration

use cadence_core::CadenceError;
use thiserror::Error;

/// Queue errors
///
/// Precondition failures ("nothing to shuffle", "no active playlist") are
/// not errors: those operations return an empty result and emit a notice.
#[derive(Debug, Error)]
pub enum QueueError {
    /// A collaborator (resolver, device, catalog, downloads) failed
    #[error(transparent)]
    Core(#[from] CadenceError),

    /// No track survived availability filtering
    #[error("Nothing playable in the requested source")]
    NothingPlayable,

    /// Requested start index lies outside the source list
    #[error("Start index {index} out of bounds for {len} items")]
    StartIndexOutOfBounds { index: usize, len: usize },
}

/// Result type for queue operations
pub type Result<T> = std::result::Result<T, QueueError>;
