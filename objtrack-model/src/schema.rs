use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification of a domain object, fixed by its type descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    /// Process-wide singleton; needs no instance discrimination.
    Service,
    /// Persistent object with an identifier derived from its state.
    Entity,
    /// Value object without persistent identity.
    Value,
    /// Object whose state is carried in a serializable memento.
    ViewModel,
    /// Homogeneous bulk/collection wrapper.
    Packed,
    Other,
}

impl Kind {
    /// Returns true if identity tokens for this kind are stable across resolutions.
    #[must_use]
    pub const fn has_stable_identity(&self) -> bool {
        matches!(self, Self::Service | Self::Entity | Self::Value | Self::ViewModel)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Service => "service",
            Self::Entity => "entity",
            Self::Value => "value",
            Self::ViewModel => "view-model",
            Self::Packed => "packed",
            Self::Other => "other",
        };
        f.write_str(s)
    }
}

/// Identifier of a property within its owning type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyId(String);

impl PropertyId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PropertyId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Describes one property of a type for change tracking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyDescriptor {
    pub id: PropertyId,
    /// Whether the property is stored by the persistence layer.
    pub persisted: bool,
    /// Whether the property is computed from other state.
    #[serde(default)]
    pub derived: bool,
}

impl PropertyDescriptor {
    /// Shorthand for a persisted, non-derived property.
    pub fn persisted(id: impl Into<String>) -> Self {
        Self {
            id: PropertyId::new(id),
            persisted: true,
            derived: false,
        }
    }

    /// Shorthand for a derived property (never audited).
    pub fn derived(id: impl Into<String>) -> Self {
        Self {
            id: PropertyId::new(id),
            persisted: false,
            derived: true,
        }
    }

    /// Shorthand for a non-persisted (transient) property.
    pub fn transient(id: impl Into<String>) -> Self {
        Self {
            id: PropertyId::new(id),
            persisted: false,
            derived: false,
        }
    }

    /// Only persisted, non-derived properties take part in change snapshots.
    #[must_use]
    pub fn is_auditable(&self) -> bool {
        self.persisted && !self.derived
    }
}
