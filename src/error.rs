//! Error types for the timer store

use thiserror::Error;

/// Errors returned by store handle operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimerError {
    /// Timer creation input was rejected
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The store actor has stopped and can no longer accept commands
    #[error("Timer store is not running")]
    StoreUnavailable,
}

/// Reasons a new timer can be rejected when validation is enabled
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("duration must be a positive number of seconds, got {0}")]
    NonPositiveDuration(i64),

    #[error("timer name must not be empty")]
    EmptyName,

    #[error("category must not be empty")]
    EmptyCategory,
}
