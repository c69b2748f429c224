//! Before/after property values captured for one transaction.

use objtrack_model::{ObjectHandle, PropertyId};
use objtrack_types::Bookmark;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A captured property value, or one of the lifecycle sentinels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum PropertyValue {
    /// The object did not exist before this transaction.
    New,
    /// The object was destroyed; its state can no longer be read.
    Deleted,
    Value(serde_json::Value),
}

impl PropertyValue {
    /// Reads a property, substituting [`PropertyValue::Deleted`] for
    /// destroyed handles without touching the pojo.
    pub(crate) fn read(handle: &ObjectHandle, property: &PropertyId) -> Self {
        if handle.is_destroyed() {
            return Self::Deleted;
        }
        Self::Value(handle.current_value(property).unwrap_or_default())
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::New => f.write_str("[NEW]"),
            Self::Deleted => f.write_str("[DELETED]"),
            Self::Value(serde_json::Value::String(s)) => f.write_str(s),
            Self::Value(value) => write!(f, "{value}"),
        }
    }
}

/// Identifies one property of one object across handle churn: equality and
/// hashing use only the bookmark and the property id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PropertySnapshotKey {
    pub bookmark: Bookmark,
    pub property: PropertyId,
}

impl PropertySnapshotKey {
    #[must_use]
    pub fn new(bookmark: Bookmark, property: PropertyId) -> Self {
        Self { bookmark, property }
    }
}

impl fmt::Display for PropertySnapshotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.bookmark, self.property)
    }
}

/// Pre-value captured at enlistment, post-value captured once at finalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertySnapshot {
    pre: PropertyValue,
    post: Option<PropertyValue>,
}

impl PropertySnapshot {
    #[must_use]
    pub fn new(pre: PropertyValue) -> Self {
        Self { pre, post: None }
    }

    #[must_use]
    pub fn pre(&self) -> &PropertyValue {
        &self.pre
    }

    #[must_use]
    pub fn post(&self) -> Option<&PropertyValue> {
        self.post.as_ref()
    }

    /// Sets the post-value. Returns false (and keeps the first value) if it
    /// was already set.
    pub fn set_post(&mut self, post: PropertyValue) -> bool {
        if self.post.is_some() {
            return false;
        }
        self.post = Some(post);
        true
    }

    /// Only snapshots with an observable change are audited.
    #[must_use]
    pub fn should_audit(&self) -> bool {
        self.post.as_ref().is_some_and(|post| *post != self.pre)
    }
}
