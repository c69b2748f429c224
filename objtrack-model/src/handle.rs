use crate::{Kind, PropertyId, TypeDescriptor};
use objtrack_types::{Bookmark, IdentityToken};
use std::any::Any;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

/// A domain object, opaque to this crate.
pub type Pojo = Arc<dyn Any + Send + Sync>;

/// Reference to one domain object together with its type descriptor.
///
/// Clones share the same underlying handle. Equality and hashing are by
/// reference: two clones are equal, two handles wrapping the same pojo are
/// not. The kind is taken from the descriptor once and never changes.
///
/// Identity token and bookmark are write-once memo slots; the first value
/// stored wins.
#[derive(Clone)]
pub struct ObjectHandle(Arc<HandleInner>);

struct HandleInner {
    pojo: Option<Pojo>,
    descriptor: Arc<dyn TypeDescriptor>,
    kind: Kind,
    identity: OnceLock<IdentityToken>,
    bookmark: OnceLock<Bookmark>,
    destroyed: AtomicBool,
}

impl ObjectHandle {
    /// Wraps a pojo.
    pub fn new<T: Any + Send + Sync>(pojo: T, descriptor: Arc<dyn TypeDescriptor>) -> Self {
        Self::from_pojo(Some(Arc::new(pojo)), descriptor)
    }

    /// Wraps an already shared pojo, or none for a detached reference.
    pub fn from_pojo(pojo: Option<Pojo>, descriptor: Arc<dyn TypeDescriptor>) -> Self {
        let kind = descriptor.kind();
        Self(Arc::new(HandleInner {
            pojo,
            descriptor,
            kind,
            identity: OnceLock::new(),
            bookmark: OnceLock::new(),
            destroyed: AtomicBool::new(false),
        }))
    }

    /// Memoizes a bookmark on construction (e.g. an entity loaded by id).
    #[must_use]
    pub fn with_bookmark(self, bookmark: Bookmark) -> Self {
        self.memoize_bookmark(bookmark);
        self
    }

    #[must_use]
    pub fn kind(&self) -> Kind {
        self.0.kind
    }

    #[must_use]
    pub fn descriptor(&self) -> &dyn TypeDescriptor {
        self.0.descriptor.as_ref()
    }

    #[must_use]
    pub fn logical_type_name(&self) -> &str {
        self.0.descriptor.logical_type_name()
    }

    /// The wrapped pojo, if attached.
    #[must_use]
    pub fn pojo(&self) -> Option<&(dyn Any + Send + Sync)> {
        self.0.pojo.as_deref()
    }

    /// Returns true if the wrapped pojo is a `T`.
    #[must_use]
    pub fn pojo_is<T: Any>(&self) -> bool {
        self.pojo().is_some_and(|pojo| pojo.is::<T>())
    }

    /// Returns the wrapped pojo as a `T`, if it is one.
    #[must_use]
    pub fn pojo_as<T: Any>(&self) -> Option<&T> {
        self.pojo().and_then(|pojo| pojo.downcast_ref::<T>())
    }

    #[must_use]
    pub fn memoized_identity(&self) -> Option<&IdentityToken> {
        self.0.identity.get()
    }

    /// Stores the identity token. Returns false if one was already stored.
    pub fn memoize_identity(&self, token: IdentityToken) -> bool {
        self.0.identity.set(token).is_ok()
    }

    #[must_use]
    pub fn memoized_bookmark(&self) -> Option<&Bookmark> {
        self.0.bookmark.get()
    }

    /// Stores the bookmark. Returns false if one was already stored.
    pub fn memoize_bookmark(&self, bookmark: Bookmark) -> bool {
        self.0.bookmark.set(bookmark).is_ok()
    }

    /// Marks the underlying object as destroyed by the persistence layer.
    pub fn mark_destroyed(&self) {
        self.0.destroyed.store(true, Ordering::Release);
    }

    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.0.destroyed.load(Ordering::Acquire)
    }

    /// Reads the live value of a property. `None` when detached.
    ///
    /// Must not be called on a destroyed handle; some persistence backends
    /// fault when a destroyed object is read.
    #[must_use]
    pub fn current_value(&self, property: &PropertyId) -> Option<serde_json::Value> {
        let pojo = self.0.pojo.as_deref()?;
        Some(self.0.descriptor.current_value(pojo, property))
    }
}

impl PartialEq for ObjectHandle {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for ObjectHandle {}

impl Hash for ObjectHandle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::ptr::hash(Arc::as_ptr(&self.0), state);
    }
}

impl fmt::Debug for ObjectHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectHandle")
            .field("logical_type", &self.logical_type_name())
            .field("kind", &self.kind())
            .field("attached", &self.0.pojo.is_some())
            .field("bookmark", &self.memoized_bookmark())
            .field("destroyed", &self.is_destroyed())
            .finish()
    }
}
