//! Error model for the selection subsystem.

use thiserror::Error;

/// Result type used across the selection subsystem.
pub type SelectionResult<T> = Result<T, SelectionError>;

/// Selection-level error.
///
/// Keep this focused on deterministic, local failures (validation, invariant
/// checks, state conflicts). Catalog transport failures live at the provider
/// boundary and are cached/surfaced per inventory, not raised through here.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SelectionError {
    /// A value failed validation (e.g. malformed quantity input).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A selection invariant was violated (double-booked asset, duplicate lot).
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A referenced line, item, or catalog entry was not found.
    #[error("not found")]
    NotFound,

    /// The operation conflicts with the current wizard or line state.
    #[error("conflict: {0}")]
    Conflict(String),

    /// A mutating operation was attempted on a read-only session.
    #[error("session is read-only")]
    ReadOnly,
}

impl SelectionError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }
}
