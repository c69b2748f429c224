//! Transaction-scoped change enlistment.
//!
//! The persistence layer enlists objects as it creates, updates and deletes
//! them. Each object collapses to one [`ChangeKind`] via [`ChangeKind::merge`];
//! each auditable property of a newly recorded object gets a pre-value. At
//! commit the post-values are captured once and the result is frozen.
//!
//! Not thread-safe: one tracker per transaction, reset by the transaction
//! boundary after commit or abort.

use crate::publish::{self, AuditEntry, ChangeSummary, ObjectChange};
use crate::{EnlistResult, PropertySnapshot, PropertySnapshotKey, PropertyValue, TrackerConfig};
use indexmap::IndexMap;
use objtrack_identity::BookmarkResolver;
use objtrack_model::{ObjectHandle, PropertyId};
use objtrack_types::{Bookmark, ChangeKind, MergeOutcome};
use std::sync::Arc;
use tracing::{debug, error};

/// Finalized snapshots, in enlistment order.
pub type ChangedProperties = IndexMap<PropertySnapshotKey, PropertySnapshot>;

/// Change kind of an enlisted object plus the bookmark its snapshots are keyed by.
#[derive(Debug, Clone)]
struct Enlisted {
    kind: ChangeKind,
    bookmark: Bookmark,
}

/// A snapshot awaiting its post-value, with every handle that enlisted its
/// object, oldest first. Never empty.
#[derive(Debug)]
struct Pending {
    handles: Vec<ObjectHandle>,
    snapshot: PropertySnapshot,
}

impl Pending {
    fn attach(&mut self, handle: &ObjectHandle) {
        if !self.handles.contains(handle) {
            self.handles.push(handle.clone());
        }
    }

    /// Reads the post-value. If any enlisting handle has been destroyed the
    /// object is gone, otherwise the newest handle holds its current state.
    fn capture_post(&self, property: &PropertyId) -> PropertyValue {
        let destroyed = self.handles.iter().find(|h| h.is_destroyed());
        match destroyed.or_else(|| self.handles.last()) {
            Some(handle) => PropertyValue::read(handle, property),
            None => PropertyValue::Deleted,
        }
    }
}

/// Records which objects a transaction touched and how their properties changed.
pub struct EnlistmentTracker {
    config: TrackerConfig,
    bookmarks: BookmarkResolver,
    enlisted: IndexMap<ObjectHandle, Enlisted>,
    pending: IndexMap<PropertySnapshotKey, Pending>,
    finalized: Option<Arc<ChangedProperties>>,
    loaded: usize,
}

impl EnlistmentTracker {
    /// Creates a tracker with the default bookmark chain.
    pub fn new(config: TrackerConfig) -> Self {
        let bookmarks = BookmarkResolver::new(&config.resolver);
        Self::with_resolver(config, bookmarks)
    }

    /// Creates a tracker with a custom bookmark chain.
    pub fn with_resolver(config: TrackerConfig, bookmarks: BookmarkResolver) -> Self {
        Self {
            config,
            bookmarks,
            enlisted: IndexMap::new(),
            pending: IndexMap::new(),
            finalized: None,
            loaded: 0,
        }
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    // ── Enlistment ───────────────────────────────────────────────

    /// Enlists a newly created object. Returns true if it was recorded.
    pub fn enlist_created(&mut self, handle: &ObjectHandle) -> bool {
        self.enlist(handle, ChangeKind::Create)
    }

    /// Enlists an object about to be updated. Returns true if it was recorded.
    pub fn enlist_updating(&mut self, handle: &ObjectHandle) -> bool {
        self.enlist(handle, ChangeKind::Update)
    }

    /// Enlists an object about to be deleted. Returns true if it was recorded
    /// (or changed from update to delete).
    pub fn enlist_deleting(&mut self, handle: &ObjectHandle) -> bool {
        self.enlist(handle, ChangeKind::Delete)
    }

    /// Counts an object loaded into the transaction. Never enlists it.
    pub fn recognize_loaded(&mut self, handle: &ObjectHandle) {
        if self.ignores(handle) {
            return;
        }
        self.loaded += 1;
    }

    fn ignores(&self, handle: &ObjectHandle) -> bool {
        !self.config.enabled || handle.descriptor().is_never_audited()
    }

    fn enlist(&mut self, handle: &ObjectHandle, requested: ChangeKind) -> bool {
        if self.ignores(handle) {
            return false;
        }

        let previous = self.enlisted.get(handle).map(|e| e.kind);
        match ChangeKind::merge(previous, requested) {
            MergeOutcome::Recorded(kind) => {
                let bookmark = match self.bookmark_of(handle) {
                    Ok(bookmark) => bookmark,
                    Err(e) => {
                        error!(
                            logical_type = %handle.logical_type_name(),
                            kind = %requested,
                            error = %e,
                            "cannot bookmark object, enlistment skipped"
                        );
                        return false;
                    }
                };
                debug!(bookmark = %bookmark, ?previous, %kind, "object enlisted");
                self.register_properties(handle, &bookmark, kind);
                self.enlisted.insert(handle.clone(), Enlisted { kind, bookmark });
                true
            }
            MergeOutcome::Unchanged(kind) => {
                debug!(%kind, %requested, "object already enlisted");
                false
            }
            MergeOutcome::Removed => {
                if let Some(removed) = self.enlisted.shift_remove(handle) {
                    debug!(bookmark = %removed.bookmark, "created and deleted in one transaction");
                }
                self.pending.retain(|_, pending| {
                    pending.handles.retain(|h| h != handle);
                    !pending.handles.is_empty()
                });
                false
            }
        }
    }

    fn register_properties(&mut self, handle: &ObjectHandle, bookmark: &Bookmark, kind: ChangeKind) {
        let auditable = handle
            .descriptor()
            .properties()
            .iter()
            .filter(|p| p.is_auditable());
        for property in auditable {
            let key = PropertySnapshotKey::new(bookmark.clone(), property.id.clone());
            if let Some(pending) = self.pending.get_mut(&key) {
                pending.attach(handle);
                continue;
            }
            let pre = match kind {
                ChangeKind::Create => PropertyValue::New,
                ChangeKind::Update | ChangeKind::Delete => PropertyValue::read(handle, &key.property),
            };
            self.pending.insert(
                key,
                Pending {
                    handles: vec![handle.clone()],
                    snapshot: PropertySnapshot::new(pre),
                },
            );
        }
    }

    /// The bookmark an object's snapshots are keyed by: the one cached at
    /// enlistment, otherwise freshly resolved.
    pub fn bookmark_of(&self, handle: &ObjectHandle) -> EnlistResult<Bookmark> {
        if let Some(enlisted) = self.enlisted.get(handle) {
            return Ok(enlisted.bookmark.clone());
        }
        Ok(self.bookmarks.resolve(handle)?)
    }

    // ── Finalization ─────────────────────────────────────────────

    /// Captures post-values and returns the audited snapshots.
    ///
    /// The first call drains the pending snapshots; every later call returns
    /// the same frozen result until [`reset_for_next_transaction`].
    ///
    /// [`reset_for_next_transaction`]: Self::reset_for_next_transaction
    pub fn get_changed_object_properties(&mut self) -> Arc<ChangedProperties> {
        if let Some(finalized) = &self.finalized {
            return Arc::clone(finalized);
        }

        let pending = std::mem::take(&mut self.pending);
        let captured = pending.len();
        let mut changed = ChangedProperties::with_capacity(captured);
        for (key, entry) in pending {
            let post = entry.capture_post(&key.property);
            let mut snapshot = entry.snapshot;
            snapshot.set_post(post);
            if snapshot.should_audit() {
                changed.insert(key, snapshot);
            }
        }
        debug!(captured, audited = changed.len(), "property snapshots finalized");

        let changed = Arc::new(changed);
        self.finalized = Some(Arc::clone(&changed));
        changed
    }

    /// Clears all state. Called by the transaction boundary after commit or abort.
    pub fn reset_for_next_transaction(&mut self) {
        debug!(
            dirtied = self.enlisted.len(),
            pending = self.pending.len(),
            "tracker reset"
        );
        self.enlisted.clear();
        self.pending.clear();
        self.finalized = None;
        self.loaded = 0;
    }

    // ── Queries ──────────────────────────────────────────────────

    pub fn is_enlisted(&self, handle: &ObjectHandle) -> bool {
        self.enlisted.contains_key(handle)
    }

    pub fn change_kind(&self, handle: &ObjectHandle) -> Option<ChangeKind> {
        self.enlisted.get(handle).map(|e| e.kind)
    }

    pub fn number_objects_dirtied(&self) -> usize {
        self.enlisted.len()
    }

    pub fn number_objects_loaded(&self) -> usize {
        self.loaded
    }

    /// Forces finalization if it has not happened yet.
    pub fn number_object_properties_modified(&mut self) -> usize {
        self.get_changed_object_properties().len()
    }

    // ── Publishing ───────────────────────────────────────────────

    /// Summary for change publishers. Forces finalization.
    pub fn change_summary(&mut self) -> ChangeSummary {
        let properties_modified = self.number_object_properties_modified();
        let changes = self
            .enlisted
            .values()
            .map(|e| ObjectChange {
                bookmark: e.bookmark.clone(),
                kind: e.kind,
            })
            .collect();
        ChangeSummary::new(self.loaded, changes, properties_modified)
    }

    /// One audit entry per changed property. Forces finalization.
    pub fn audit_entries(&mut self) -> Vec<AuditEntry> {
        publish::audit_entries(&self.get_changed_object_properties())
    }
}

impl Default for EnlistmentTracker {
    fn default() -> Self {
        Self::new(TrackerConfig::default())
    }
}
