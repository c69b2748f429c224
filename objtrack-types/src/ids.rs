//! Identifier types for tracked objects.
//!
//! Two flavours of identity exist side by side:
//! - [`IdentityToken`]: process-local, cheap, used to key maps within a session
//! - [`Bookmark`]: durable, round-trips through its `"logicalType:identifier"`
//!   string form and is the only representation that crosses process boundaries

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Separator between the logical type and the identifier of a bookmark.
pub const BOOKMARK_SEPARATOR: char = ':';

/// Process-local identity of an object: a type identifier plus a local identifier.
///
/// The empty token is a legitimate value, used for objects without persistent
/// identity (values).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct IdentityToken {
    type_identifier: String,
    local_identifier: String,
}

impl IdentityToken {
    /// Creates a token from its two parts.
    #[must_use]
    pub fn new(type_identifier: impl Into<String>, local_identifier: impl Into<String>) -> Self {
        Self {
            type_identifier: type_identifier.into(),
            local_identifier: local_identifier.into(),
        }
    }

    /// The empty token.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a token with a fresh random local identifier.
    #[must_use]
    pub fn random(type_identifier: impl Into<String>) -> Self {
        Self::new(type_identifier, Uuid::new_v4().to_string())
    }

    /// Returns true for the empty token.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.type_identifier.is_empty() && self.local_identifier.is_empty()
    }

    /// Returns the type identifier.
    #[must_use]
    pub fn type_identifier(&self) -> &str {
        &self.type_identifier
    }

    /// Returns the local identifier.
    #[must_use]
    pub fn local_identifier(&self) -> &str {
        &self.local_identifier
    }
}

impl fmt::Display for IdentityToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.type_identifier, self.local_identifier)
    }
}

/// Durable identity of an object: a logical type name plus an identifier.
///
/// Serialized as the single string `"logicalType:identifier"`, so it can be
/// used directly as a JSON map key. The logical type is never empty and never
/// contains [`BOOKMARK_SEPARATOR`]; the identifier may contain anything, which
/// is why parsing splits on the first separator only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Bookmark {
    logical_type: String,
    identifier: String,
}

impl Bookmark {
    /// Creates a bookmark, validating the logical type.
    pub fn new(logical_type: impl Into<String>, identifier: impl Into<String>) -> Result<Self> {
        let logical_type = logical_type.into();
        if logical_type.is_empty() {
            return Err(Error::InvalidBookmark("empty logical type".into()));
        }
        if logical_type.contains(BOOKMARK_SEPARATOR) {
            return Err(Error::InvalidBookmark(format!(
                "logical type {logical_type:?} contains '{BOOKMARK_SEPARATOR}'"
            )));
        }
        Ok(Self {
            logical_type,
            identifier: identifier.into(),
        })
    }

    /// Creates a bookmark with a fresh random (UUID v4) identifier.
    pub fn random(logical_type: impl Into<String>) -> Result<Self> {
        Self::new(logical_type, Uuid::new_v4().to_string())
    }

    /// Parses a bookmark from its `"logicalType:identifier"` form.
    pub fn parse(s: &str) -> Result<Self> {
        let (logical_type, identifier) = s
            .split_once(BOOKMARK_SEPARATOR)
            .ok_or_else(|| Error::InvalidBookmark(format!("missing separator in {s:?}")))?;
        Self::new(logical_type, identifier)
    }

    /// Returns the logical type name.
    #[must_use]
    pub fn logical_type(&self) -> &str {
        &self.logical_type
    }

    /// Returns the identifier.
    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }
}

impl fmt::Display for Bookmark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}",
            self.logical_type, BOOKMARK_SEPARATOR, self.identifier
        )
    }
}

impl FromStr for Bookmark {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Bookmark {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(&s)
    }
}

impl From<Bookmark> for String {
    fn from(bookmark: Bookmark) -> Self {
        bookmark.to_string()
    }
}
