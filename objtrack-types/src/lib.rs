//! Core type definitions for objtrack.
//!
//! This crate defines the value types shared by identity resolution and
//! change enlistment:
//! - Process-local identity tokens and durable bookmarks
//! - Change kinds and the merge rule for repeated enlistment
//! - The error taxonomy for identity resolution
//!
//! Object handles and type descriptors live in `objtrack-model`.

mod change;
mod ids;

pub use change::{ChangeKind, MergeOutcome};
pub use ids::{Bookmark, IdentityToken, BOOKMARK_SEPARATOR};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while identifying or bookmarking objects.
///
/// None of these are retryable; they all describe a caller bug or a
/// misconfigured metamodel.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    #[error("missing {capability} capability for {kind} object")]
    MissingCapability {
        kind: String,
        capability: &'static str,
    },

    #[error("no handler could resolve identity: {0}")]
    UnresolvedIdentity(String),

    /// A bookmark string from outside failed validation. Resolvers report a
    /// bad logical type as [`Error::MissingCapability`] instead.
    #[error("invalid bookmark: {0}")]
    InvalidBookmark(String),
}
