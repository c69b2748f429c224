//! Error types for the enlistment layer.

use thiserror::Error;

/// Result type for enlistment operations.
pub type EnlistResult<T> = Result<T, EnlistError>;

/// Errors that can occur outside the enlistment calls themselves, which
/// never fail.
#[derive(Debug, Error)]
pub enum EnlistError {
    /// Invalid tracker configuration.
    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),

    /// Identity or bookmark resolution failed.
    #[error("identity error: {0}")]
    Identity(#[from] objtrack_types::Error),
}
