use objtrack_model::{
    EntityCapability, Kind, Pojo, PropertyDescriptor, PropertyId, TypeDescriptor,
    ViewModelCapability,
};
use std::any::Any;
use std::sync::Arc;

// ── Default implementations ──────────────────────────────────────

#[derive(Debug)]
struct BareType;

impl TypeDescriptor for BareType {
    fn logical_type_name(&self) -> &str {
        "demo.Bare"
    }

    fn kind(&self) -> Kind {
        Kind::Other
    }

    fn current_value(&self, _pojo: &dyn Any, _property: &PropertyId) -> serde_json::Value {
        serde_json::Value::Null
    }
}

#[test]
fn default_type_identifier_is_logical_name() {
    assert_eq!(BareType.type_identifier(), "demo.Bare");
}

#[test]
fn default_capabilities_are_absent() {
    assert!(BareType.entity_capability().is_none());
    assert!(BareType.view_model_capability().is_none());
    assert!(BareType.value_capability().is_none());
}

#[test]
fn default_is_audited_with_no_properties() {
    assert!(!BareType.is_never_audited());
    assert!(BareType.properties().is_empty());
}

// ── Custom capabilities ──────────────────────────────────────────

#[derive(Debug)]
struct Counter(u32);

struct CounterIds;

impl EntityCapability for CounterIds {
    fn identifier_of(&self, pojo: &dyn Any) -> Option<String> {
        pojo.downcast_ref::<Counter>().map(|c| c.0.to_string())
    }
}

struct CounterMemento;

impl ViewModelCapability for CounterMemento {
    fn memento_of(&self, pojo: &dyn Any) -> Option<String> {
        pojo.downcast_ref::<Counter>().map(|c| c.0.to_string())
    }

    fn recreate(&self, memento: &str) -> Option<Pojo> {
        let value = memento.parse().ok()?;
        Some(Arc::new(Counter(value)))
    }
}

#[derive(Debug)]
struct CounterType;

impl TypeDescriptor for CounterType {
    fn logical_type_name(&self) -> &str {
        "demo.Counter"
    }

    fn type_identifier(&self) -> &str {
        "demo::Counter"
    }

    fn kind(&self) -> Kind {
        Kind::ViewModel
    }

    fn entity_capability(&self) -> Option<&dyn EntityCapability> {
        Some(&CounterIds)
    }

    fn view_model_capability(&self) -> Option<&dyn ViewModelCapability> {
        Some(&CounterMemento)
    }

    fn is_never_audited(&self) -> bool {
        true
    }

    fn properties(&self) -> &[PropertyDescriptor] {
        &[]
    }

    fn current_value(&self, pojo: &dyn Any, _property: &PropertyId) -> serde_json::Value {
        pojo.downcast_ref::<Counter>()
            .map(|c| serde_json::json!(c.0))
            .unwrap_or_default()
    }
}

#[test]
fn overridden_type_identifier() {
    assert_eq!(CounterType.type_identifier(), "demo::Counter");
    assert!(CounterType.is_never_audited());
}

#[test]
fn entity_capability_reads_identifier() {
    let cap = CounterType.entity_capability().unwrap();
    assert_eq!(cap.identifier_of(&Counter(5)), Some("5".to_string()));
    assert_eq!(cap.identifier_of(&"not a counter"), None);
}

#[test]
fn view_model_memento_roundtrip() {
    let cap = CounterType.view_model_capability().unwrap();
    let memento = cap.memento_of(&Counter(12)).unwrap();
    let recreated = cap.recreate(&memento).unwrap();
    assert_eq!(recreated.downcast_ref::<Counter>().unwrap().0, 12);
}

#[test]
fn view_model_recreate_rejects_garbage() {
    let cap = CounterType.view_model_capability().unwrap();
    assert!(cap.recreate("twelve").is_none());
}
