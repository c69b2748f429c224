//! Identity resolution for objtrack.
//!
//! Two parallel handler chains, both dispatched on the handle's [`Kind`]:
//! - [`IdentityResolver`] derives process-local [`IdentityToken`]s; it assumes
//!   a fully loaded object and fails hard on a missing capability
//! - [`BookmarkResolver`] derives durable [`Bookmark`]s and also serves
//!   objects that are not persisted yet
//!
//! Both chains end in a handler that always matches. Its random identifiers
//! are logged at `warn` level rather than raised as errors.
//!
//! [`Kind`]: objtrack_model::Kind
//! [`IdentityToken`]: objtrack_types::IdentityToken
//! [`Bookmark`]: objtrack_types::Bookmark

pub mod bookmark;
mod config;
pub mod identity;

pub use bookmark::{BookmarkHandler, BookmarkResolver};
pub use config::{ResolverConfig, SERVICE_ID};
pub use identity::{IdentityHandler, IdentityResolver};

use objtrack_model::ObjectHandle;
use objtrack_types::{Bookmark, Error, IdentityToken};

/// Returns true if the handle wraps an already resolved identity.
fn is_double_wrapped(handle: &ObjectHandle) -> bool {
    handle.pojo_is::<IdentityToken>() || handle.pojo_is::<Bookmark>()
}

fn guard_against_double_wrap(handle: &ObjectHandle) -> Error {
    Error::InvariantViolation(format!(
        "handle of type {} wraps an identity or bookmark; it must not be identified again",
        handle.logical_type_name()
    ))
}
