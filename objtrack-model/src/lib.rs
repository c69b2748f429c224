//! Object model for objtrack.
//!
//! Defines the types that identity resolution and change enlistment read from:
//! - [`ObjectHandle`], a domain object plus its type descriptor and kind
//! - [`TypeDescriptor`], the metamodel seam (kind, capabilities, properties)
//! - [`Kind`], service, entity, value, view model, packed or other
//! - [`PropertyDescriptor`], which properties take part in change snapshots
//!
//! Descriptors are supplied by whatever layer classifies domain types; this
//! crate never inspects a pojo except through them.

mod descriptor;
mod handle;
mod schema;

pub use descriptor::{EntityCapability, TypeDescriptor, ValueCapability, ViewModelCapability};
pub use handle::{ObjectHandle, Pojo};
pub use schema::{Kind, PropertyDescriptor, PropertyId};
