//! Durable bookmarks, resolved by an ordered handler chain.
//!
//! Unlike identity tokens, bookmarks must also be derivable for objects that
//! are not persisted yet, so transient entities degrade to a random bookmark
//! instead of failing.

use crate::{guard_against_double_wrap, is_double_wrapped, ResolverConfig};
use objtrack_model::{Kind, ObjectHandle};
use objtrack_types::{Bookmark, Error, Result};
use tracing::{debug, warn};

/// One link of the bookmark chain.
pub trait BookmarkHandler: Send + Sync {
    /// Name used in diagnostics.
    fn name(&self) -> &'static str;

    /// Returns true if this handler is responsible for the handle.
    fn handles(&self, handle: &ObjectHandle) -> bool;

    fn bookmark(&self, handle: &ObjectHandle) -> Result<Bookmark>;
}

/// Builds a bookmark under the handle's logical type. A logical type that
/// cannot appear in a bookmark is a metamodel misconfiguration, whatever the
/// kind.
fn bookmark_for(handle: &ObjectHandle, identifier: Option<String>) -> Result<Bookmark> {
    let logical_type = handle.logical_type_name();
    let bookmark = match identifier {
        Some(identifier) => Bookmark::new(logical_type, identifier),
        None => Bookmark::random(logical_type),
    };
    bookmark.map_err(|_| Error::MissingCapability {
        kind: handle.kind().to_string(),
        capability: "bookmarkable logical type",
    })
}

/// Stores `bookmark` on the handle and returns whatever the handle now holds.
fn memoize(handle: &ObjectHandle, bookmark: Bookmark) -> Bookmark {
    if handle.memoize_bookmark(bookmark.clone()) {
        return bookmark;
    }
    handle.memoized_bookmark().cloned().unwrap_or(bookmark)
}

pub struct GuardAgainstDoubleWrap;

impl BookmarkHandler for GuardAgainstDoubleWrap {
    fn name(&self) -> &'static str {
        "guard-against-double-wrap"
    }

    fn handles(&self, handle: &ObjectHandle) -> bool {
        is_double_wrapped(handle)
    }

    fn bookmark(&self, handle: &ObjectHandle) -> Result<Bookmark> {
        Err(guard_against_double_wrap(handle))
    }
}

/// Bulk containers never carry identity.
pub struct PackedBookmark;

impl BookmarkHandler for PackedBookmark {
    fn name(&self) -> &'static str {
        "packed"
    }

    fn handles(&self, handle: &ObjectHandle) -> bool {
        handle.kind() == Kind::Packed
    }

    fn bookmark(&self, handle: &ObjectHandle) -> Result<Bookmark> {
        bookmark_for(handle, None)
    }
}

/// Services are bookmarkable by construction.
pub struct ServiceBookmark {
    service_id: String,
}

impl ServiceBookmark {
    pub fn new(service_id: impl Into<String>) -> Self {
        Self {
            service_id: service_id.into(),
        }
    }
}

impl BookmarkHandler for ServiceBookmark {
    fn name(&self) -> &'static str {
        "service"
    }

    fn handles(&self, handle: &ObjectHandle) -> bool {
        handle.kind() == Kind::Service
    }

    fn bookmark(&self, handle: &ObjectHandle) -> Result<Bookmark> {
        if let Some(bookmark) = handle.memoized_bookmark() {
            return Ok(bookmark.clone());
        }
        let bookmark = bookmark_for(handle, Some(self.service_id.clone()))?;
        Ok(memoize(handle, bookmark))
    }
}

/// Values must already be bookmarkable; anything else is a caller error.
pub struct ValueBookmark;

impl BookmarkHandler for ValueBookmark {
    fn name(&self) -> &'static str {
        "value"
    }

    fn handles(&self, handle: &ObjectHandle) -> bool {
        handle.kind() == Kind::Value
    }

    fn bookmark(&self, handle: &ObjectHandle) -> Result<Bookmark> {
        if let Some(bookmark) = handle.memoized_bookmark() {
            return Ok(bookmark.clone());
        }
        let encoded = handle.pojo().and_then(|pojo| {
            handle
                .descriptor()
                .value_capability()
                .and_then(|cap| cap.encode(pojo))
        });
        match encoded {
            Some(identifier) => {
                let bookmark = bookmark_for(handle, Some(identifier))?;
                Ok(memoize(handle, bookmark))
            }
            None => Err(Error::InvariantViolation(format!(
                "value of type {} cannot be bookmarked",
                handle.logical_type_name()
            ))),
        }
    }
}

pub struct ViewModelBookmark;

impl BookmarkHandler for ViewModelBookmark {
    fn name(&self) -> &'static str {
        "view-model"
    }

    fn handles(&self, handle: &ObjectHandle) -> bool {
        handle.kind() == Kind::ViewModel
    }

    fn bookmark(&self, handle: &ObjectHandle) -> Result<Bookmark> {
        if let Some(bookmark) = handle.memoized_bookmark() {
            return Ok(bookmark.clone());
        }
        let missing = || Error::MissingCapability {
            kind: handle.kind().to_string(),
            capability: "view-model",
        };
        let pojo = handle.pojo().ok_or_else(missing)?;
        let capability = handle
            .descriptor()
            .view_model_capability()
            .ok_or_else(missing)?;
        let memento = capability.memento_of(pojo).ok_or_else(missing)?;
        let bookmark = bookmark_for(handle, Some(memento))?;
        Ok(memoize(handle, bookmark))
    }
}

/// Persisted entities are bookmarked by their entity id, memoized. Transient
/// or detached ones get a random bookmark that is not memoized, so a later
/// real id can take its place.
pub struct EntityBookmark;

impl BookmarkHandler for EntityBookmark {
    fn name(&self) -> &'static str {
        "entity"
    }

    fn handles(&self, handle: &ObjectHandle) -> bool {
        handle.kind() == Kind::Entity
    }

    fn bookmark(&self, handle: &ObjectHandle) -> Result<Bookmark> {
        if let Some(bookmark) = handle.memoized_bookmark() {
            return Ok(bookmark.clone());
        }
        let id = handle.pojo().and_then(|pojo| {
            handle
                .descriptor()
                .entity_capability()
                .and_then(|cap| cap.identifier_of(pojo))
        });
        if let Some(id) = id {
            let bookmark = bookmark_for(handle, Some(id))?;
            return Ok(memoize(handle, bookmark));
        }
        let bookmark = bookmark_for(handle, None)?;
        debug!(bookmark = %bookmark, "transient entity, using a random bookmark");
        Ok(bookmark)
    }
}

pub struct FallbackBookmark;

impl BookmarkHandler for FallbackBookmark {
    fn name(&self) -> &'static str {
        "fallback"
    }

    fn handles(&self, _handle: &ObjectHandle) -> bool {
        true
    }

    fn bookmark(&self, handle: &ObjectHandle) -> Result<Bookmark> {
        let bookmark = bookmark_for(handle, None)?;
        warn!(
            kind = %handle.kind(),
            bookmark = %bookmark,
            "object has no natural bookmark, using a random one"
        );
        Ok(bookmark)
    }
}

/// Derives bookmarks by running the handler chain in order.
pub struct BookmarkResolver {
    handlers: Vec<Box<dyn BookmarkHandler>>,
}

impl BookmarkResolver {
    /// Creates a resolver with the default chain.
    pub fn new(config: &ResolverConfig) -> Self {
        Self::with_handlers(vec![
            Box::new(GuardAgainstDoubleWrap),
            Box::new(PackedBookmark),
            Box::new(ServiceBookmark::new(config.service_id.as_str())),
            Box::new(ValueBookmark),
            Box::new(ViewModelBookmark),
            Box::new(EntityBookmark),
            Box::new(FallbackBookmark),
        ])
    }

    /// Creates a resolver from an explicit chain.
    pub fn with_handlers(handlers: Vec<Box<dyn BookmarkHandler>>) -> Self {
        Self { handlers }
    }

    /// Names of the handlers, in evaluation order.
    pub fn handler_names(&self) -> Vec<&'static str> {
        self.handlers.iter().map(|h| h.name()).collect()
    }

    pub fn resolve(&self, handle: &ObjectHandle) -> Result<Bookmark> {
        let handler = self
            .handlers
            .iter()
            .find(|h| h.handles(handle))
            .ok_or_else(|| {
                Error::UnresolvedIdentity(format!(
                    "{} ({})",
                    handle.logical_type_name(),
                    handle.kind()
                ))
            })?;
        handler.bookmark(handle)
    }
}

impl Default for BookmarkResolver {
    fn default() -> Self {
        Self::new(&ResolverConfig::default())
    }
}
