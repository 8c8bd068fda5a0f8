//! Error types for the settlement engine
//!
//! One error enum for the whole engine, partitioned the way failures are
//! handled: validation and not-found reject a request up front, consistency
//! parks a wager for manual review, conflict and store/ledger failures are
//! retryable.

use uuid::Uuid;

/// Root error type for all settlement operations
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Malformed submission, rejected before any mutation
    #[error("validation failed: {0}")]
    Validation(String),

    /// A referenced entity does not exist
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// A wager references catalog data that no longer exists, or carries a
    /// shape its modality does not allow; parked for manual review
    #[error("consistency violation: {0}")]
    Consistency(String),

    /// Another settlement run currently holds the draw
    #[error("draw {0} is already being settled")]
    ConcurrencyConflict(Uuid),

    /// Balance ledger rejected an operation
    #[error("ledger operation failed: {0}")]
    Ledger(String),

    /// Backing store failure
    #[error("store operation failed: {0}")]
    Store(String),
}

impl EngineError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Whether the operator can simply retry the failed operation
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            EngineError::ConcurrencyConflict(_) | EngineError::Ledger(_) | EngineError::Store(_)
        )
    }
}

/// Convenience alias used throughout the crate
pub type Result<T> = std::result::Result<T, EngineError>;
