//! Error types for store operations.
//!
//! Only infrastructure faults surface as errors. Domain outcomes — duplicate
//! email, unknown id, bad OTP — are ordinary return values so callers branch
//! on them instead of catching anything.

use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Persistence failed underneath the store.
    #[error(transparent)]
    Storage(#[from] storage::StorageError),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
