//! Transactional change enlistment for objtrack.
//!
//! Tracks, for the lifetime of one transaction, which objects were created,
//! updated or deleted and how their persisted properties changed.
//!
//! # Components
//!
//! - **Tracker**: [`EnlistmentTracker`], the per-transaction merge state machine
//! - **Snapshots**: [`PropertySnapshot`] pre/post pairs keyed by
//!   [`PropertySnapshotKey`] (bookmark + property)
//! - **Publishing**: [`ChangeSummary`] and [`AuditEntry`] payloads assembled
//!   from the finalized snapshots
//!
//! # Transaction lifecycle
//!
//! 1. `enlist_created` / `enlist_updating` / `enlist_deleting` during the unit of work
//! 2. `get_changed_object_properties` once before commit
//! 3. `reset_for_next_transaction` after commit or abort
//!
//! # Example
//!
//! ```
//! use objtrack_enlist::{EnlistmentTracker, TrackerConfig};
//!
//! let mut tracker = EnlistmentTracker::new(TrackerConfig::default());
//! assert_eq!(tracker.number_objects_dirtied(), 0);
//! assert!(tracker.get_changed_object_properties().is_empty());
//! ```

mod config;
mod error;
pub mod publish;
mod snapshot;
mod tracker;

pub use config::TrackerConfig;
pub use error::{EnlistError, EnlistResult};
pub use publish::{AuditEntry, ChangeSummary, ObjectChange};
pub use snapshot::{PropertySnapshot, PropertySnapshotKey, PropertyValue};
pub use tracker::{ChangedProperties, EnlistmentTracker};
