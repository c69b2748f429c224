//! Payloads assembled for change publishers and auditors.
//!
//! The tracker only builds these; sending them anywhere is up to the caller.

use crate::{ChangedProperties, PropertyValue};
use objtrack_model::PropertyId;
use objtrack_types::{Bookmark, ChangeKind};
use serde::{Deserialize, Serialize};

/// One enlisted object and how it changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectChange {
    pub bookmark: Bookmark,
    pub kind: ChangeKind,
}

/// Per-transaction overview of what changed, in enlistment order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeSummary {
    pub objects_loaded: usize,
    pub objects_created: usize,
    pub objects_updated: usize,
    pub objects_deleted: usize,
    pub properties_modified: usize,
    pub changes: Vec<ObjectChange>,
}

impl ChangeSummary {
    pub(crate) fn new(
        objects_loaded: usize,
        changes: Vec<ObjectChange>,
        properties_modified: usize,
    ) -> Self {
        let count = |kind| changes.iter().filter(|c| c.kind == kind).count();
        Self {
            objects_loaded,
            objects_created: count(ChangeKind::Create),
            objects_updated: count(ChangeKind::Update),
            objects_deleted: count(ChangeKind::Delete),
            properties_modified,
            changes,
        }
    }

    /// Nothing to publish.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty() && self.properties_modified == 0
    }
}

/// A single audited property change, values rendered as text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub target: Bookmark,
    pub property: PropertyId,
    pub pre: String,
    pub post: String,
}

pub(crate) fn audit_entries(changed: &ChangedProperties) -> Vec<AuditEntry> {
    changed
        .iter()
        .map(|(key, snapshot)| AuditEntry {
            target: key.bookmark.clone(),
            property: key.property.clone(),
            pre: snapshot.pre().to_string(),
            post: snapshot
                .post()
                .map_or_else(String::new, PropertyValue::to_string),
        })
        .collect()
}
