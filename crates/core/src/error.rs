//! Domain error model.

use thiserror::Error;

/// Result type used across the simulation core.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Every variant is recoverable: the run stays intact and the caller may retry,
/// pick another action, or reset. Business halts (credit rejection, refused
/// shipment, disputed invoice) are sub-states, not errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Operator input failed validation (e.g. wrong picked quantity).
    #[error("validation failed: {0}")]
    Validation(String),

    /// The action is not available in the current stage or sub-state.
    #[error("invalid transition: {0}")]
    InvalidTransition(String),

    /// A domain invariant was violated (e.g. unbalanced journal entry).
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// Another action is still in flight.
    #[error("conflict: {0}")]
    Conflict(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_transition(msg: impl Into<String>) -> Self {
        Self::InvalidTransition(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    /// Whether the operator can fix this by correcting their input.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
