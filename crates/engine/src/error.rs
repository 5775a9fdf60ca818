//! Engine error taxonomy.

use stride_storage::StorageError;

/// Error type for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors that can occur during engine operations.
///
/// All variants are recoverable and reported to the caller; no engine
/// operation is fatal, and no durable state is mutated on an error path.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// A referenced goal or obstacle id does not exist
    #[error("not found: {0}")]
    NotFound(String),

    /// A derived goal id collides with an existing one
    #[error("already exists: {0}")]
    AlreadyExists(String),

    /// Malformed input caught before any write
    #[error("invalid input: {0}")]
    Validation(String),

    /// Persistence failure, surfaced uninterpreted
    #[error(transparent)]
    Storage(#[from] StorageError),
}
