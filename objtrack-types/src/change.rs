//! Change classification for objects enlisted in a transaction.
//!
//! An object touched several times within one transaction collapses to a
//! single [`ChangeKind`]. The collapse is a small deterministic state machine:
//!
//! | previous | requested       | result             | enlisted |
//! |----------|-----------------|--------------------|----------|
//! | none     | any             | requested          | yes      |
//! | Create   | Create / Update | Create             | no       |
//! | Create   | Delete          | entry removed      | no       |
//! | Update   | Create / Update | Update             | no       |
//! | Update   | Delete          | Delete             | yes      |
//! | Delete   | any             | Delete             | no       |

use serde::{Deserialize, Serialize};
use std::fmt;

/// How an object changed within a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    Create,
    Update,
    Delete,
}

/// Result of merging a requested change into the previously recorded one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The requested kind was recorded (new entry or kind changed).
    Recorded(ChangeKind),
    /// The previous kind stands; nothing new to enlist.
    Unchanged(ChangeKind),
    /// The entry cancels out and must be removed (created then deleted).
    Removed,
}

impl MergeOutcome {
    /// Returns true if the merge enlisted the object.
    #[must_use]
    pub const fn is_enlisted(&self) -> bool {
        matches!(self, Self::Recorded(_))
    }

    /// The kind the object holds after the merge, if it is still tracked.
    #[must_use]
    pub const fn kind(&self) -> Option<ChangeKind> {
        match self {
            Self::Recorded(kind) | Self::Unchanged(kind) => Some(*kind),
            Self::Removed => None,
        }
    }
}

impl ChangeKind {
    /// Merges a requested change into the previously recorded one.
    #[must_use]
    pub const fn merge(previous: Option<ChangeKind>, requested: ChangeKind) -> MergeOutcome {
        use ChangeKind::{Create, Delete, Update};

        match (previous, requested) {
            (None, requested) => MergeOutcome::Recorded(requested),
            (Some(Create), Delete) => MergeOutcome::Removed,
            (Some(Create), Create | Update) => MergeOutcome::Unchanged(Create),
            (Some(Update), Delete) => MergeOutcome::Recorded(Delete),
            (Some(Update), Create | Update) => MergeOutcome::Unchanged(Update),
            (Some(Delete), _) => MergeOutcome::Unchanged(Delete),
        }
    }

    /// All kinds, in lifecycle order.
    pub const ALL: [ChangeKind; 3] = [ChangeKind::Create, ChangeKind::Update, ChangeKind::Delete];
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        };
        f.write_str(s)
    }
}
