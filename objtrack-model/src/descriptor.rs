use crate::{Kind, Pojo, PropertyDescriptor, PropertyId};
use std::any::Any;
use std::fmt;

/// Metamodel view of a domain type.
///
/// Implemented by the layer that classifies types. Capability lookups default
/// to `None`; a descriptor only provides the capabilities its kind needs:
/// - entities: [`EntityCapability`]
/// - view models: [`ViewModelCapability`]
/// - values: [`ValueCapability`]
pub trait TypeDescriptor: Send + Sync + fmt::Debug {
    /// Logical type name used in bookmarks. Must not contain `:`.
    fn logical_type_name(&self) -> &str;

    /// Type identifier used in identity tokens.
    fn type_identifier(&self) -> &str {
        self.logical_type_name()
    }

    fn kind(&self) -> Kind;

    fn entity_capability(&self) -> Option<&dyn EntityCapability> {
        None
    }

    fn view_model_capability(&self) -> Option<&dyn ViewModelCapability> {
        None
    }

    fn value_capability(&self) -> Option<&dyn ValueCapability> {
        None
    }

    /// Objects of a never-audited type are ignored by change enlistment.
    fn is_never_audited(&self) -> bool {
        false
    }

    /// All properties of the type; enlistment filters to auditable ones.
    fn properties(&self) -> &[PropertyDescriptor] {
        &[]
    }

    /// Reads the live value of a property from a pojo of this type.
    fn current_value(&self, pojo: &dyn Any, property: &PropertyId) -> serde_json::Value;
}

/// Derives the identifier of a persistent entity from its live state.
pub trait EntityCapability: Send + Sync {
    /// Returns `None` for detached or not-yet-persisted objects.
    fn identifier_of(&self, pojo: &dyn Any) -> Option<String>;
}

/// Serializes view models to and from a memento string.
pub trait ViewModelCapability: Send + Sync {
    fn memento_of(&self, pojo: &dyn Any) -> Option<String>;

    fn recreate(&self, memento: &str) -> Option<Pojo>;
}

/// Encodes value objects so they can be bookmarked.
pub trait ValueCapability: Send + Sync {
    fn encode(&self, pojo: &dyn Any) -> Option<String>;
}
