use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;

use super::Value;

/// Property storage. Iteration follows insertion order.
pub type Properties = IndexMap<String, Value, FxBuildHasher>;

/// Payload of an object value.
#[derive(Clone, Default)]
pub struct Object {
    /// Consulted when a property is missing; the chain ends at any non-object.
    pub prototype: Value,
    pub properties: Properties,
}

impl Object {
    pub fn with_prototype(prototype: Value) -> Self {
        Object {
            prototype,
            properties: Properties::default(),
        }
    }
}

/// Shared, mutable handle to an [`Object`].
///
/// Cloning copies the handle; every clone observes the same properties.
#[derive(Clone)]
#[repr(transparent)]
pub struct ObjectRef(Rc<RefCell<Object>>);

impl ObjectRef {
    pub fn new(object: Object) -> Self {
        ObjectRef(Rc::new(RefCell::new(object)))
    }

    #[inline]
    pub fn borrow(&self) -> Ref<'_, Object> {
        self.0.borrow()
    }

    #[inline]
    pub fn borrow_mut(&self) -> RefMut<'_, Object> {
        self.0.borrow_mut()
    }

    /// Whether both handles name the same object.
    #[inline]
    pub fn ptr_eq(&self, other: &ObjectRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Identity of the shared payload, for cycle detection.
    #[inline]
    pub(crate) fn addr(&self) -> *const () {
        Rc::as_ptr(&self.0).cast()
    }

    /// Look `key` up on this object, then along its prototype chain.
    pub fn lookup(&self, key: &str) -> Option<Value> {
        let mut current = self.clone();
        loop {
            let prototype = {
                let object = current.borrow();
                if let Some(value) = object.properties.get(key) {
                    return Some(value.clone());
                }
                let Value::Object(prototype) = &object.prototype else {
                    return None;
                };
                prototype.clone()
            };
            current = prototype;
        }
    }

    /// Own property of this object, ignoring the prototype chain.
    pub fn get_own(&self, key: &str) -> Option<Value> {
        self.borrow().properties.get(key).cloned()
    }

    /// Insert or overwrite an own property. Prototypes are never written.
    pub fn insert(&self, key: impl Into<String>, value: Value) {
        self.borrow_mut().properties.insert(key.into(), value);
    }
}
