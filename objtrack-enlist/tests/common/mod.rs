#![allow(dead_code)]

use objtrack_model::{Kind, ObjectHandle, PropertyDescriptor, PropertyId, TypeDescriptor};
use objtrack_types::Bookmark;
use serde_json::{Map, Value};
use std::any::Any;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// A schemaless domain object whose fields tests can mutate in place.
#[derive(Debug, Default)]
pub struct Record {
    fields: Mutex<Map<String, Value>>,
}

impl Record {
    pub fn with(fields: Value) -> Self {
        let fields = match fields {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        Self {
            fields: Mutex::new(fields),
        }
    }
}

/// Descriptor that counts every live read.
#[derive(Debug)]
pub struct RecordType {
    logical_type: &'static str,
    kind: Kind,
    never_audited: bool,
    properties: Vec<PropertyDescriptor>,
    reads: AtomicUsize,
}

impl RecordType {
    pub fn customer() -> Arc<Self> {
        Arc::new(Self {
            logical_type: "demo.Customer",
            kind: Kind::Entity,
            never_audited: false,
            properties: vec![
                PropertyDescriptor::persisted("name"),
                PropertyDescriptor::persisted("email"),
                PropertyDescriptor::derived("display_name"),
                PropertyDescriptor::transient("scratch"),
            ],
            reads: AtomicUsize::new(0),
        })
    }

    pub fn audit_log() -> Arc<Self> {
        Arc::new(Self {
            logical_type: "demo.AuditLog",
            kind: Kind::Entity,
            never_audited: true,
            properties: vec![PropertyDescriptor::persisted("line")],
            reads: AtomicUsize::new(0),
        })
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

impl TypeDescriptor for RecordType {
    fn logical_type_name(&self) -> &str {
        self.logical_type
    }

    fn kind(&self) -> Kind {
        self.kind
    }

    fn is_never_audited(&self) -> bool {
        self.never_audited
    }

    fn properties(&self) -> &[PropertyDescriptor] {
        &self.properties
    }

    fn current_value(&self, pojo: &dyn Any, property: &PropertyId) -> Value {
        self.reads.fetch_add(1, Ordering::SeqCst);
        pojo.downcast_ref::<Record>()
            .and_then(|r| r.fields.lock().unwrap().get(property.as_str()).cloned())
            .unwrap_or(Value::Null)
    }
}

/// A persisted customer with a memoized bookmark.
pub fn customer(ty: &Arc<RecordType>, id: &str, fields: Value) -> ObjectHandle {
    ObjectHandle::new(Record::with(fields), ty.clone())
        .with_bookmark(Bookmark::new("demo.Customer", id).unwrap())
}

/// A customer not yet persisted: no bookmark.
pub fn transient_customer(ty: &Arc<RecordType>, fields: Value) -> ObjectHandle {
    ObjectHandle::new(Record::with(fields), ty.clone())
}

pub fn set_field(handle: &ObjectHandle, field: &str, value: Value) {
    let record = handle.pojo_as::<Record>().unwrap();
    record.fields.lock().unwrap().insert(field.to_string(), value);
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
