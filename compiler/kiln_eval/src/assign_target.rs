//! Resolved left-hand sides of the assignment family.

use kiln_ir::{Name, ObjectRef, Value};

/// Where an assignment writes.
///
/// Resolved only once both operands are known, so the right-hand side can be
/// evaluated before the slot is touched.
pub enum AssignTarget {
    /// A binding owned by this scope object.
    Binding(ObjectRef, Name),
    /// An own property of this object.
    Property(ObjectRef, String),
}

impl AssignTarget {
    /// Target for a write to binding `name` seen from `environment`.
    ///
    /// The scope that already holds `name` (the environment itself or a
    /// prototype) owns the write; an unknown name is created in `environment`.
    pub fn binding(environment: &ObjectRef, name: Name) -> Self {
        let owner = binding_owner(environment, &name).unwrap_or_else(|| environment.clone());
        AssignTarget::Binding(owner, name)
    }

    pub fn read(&self) -> Value {
        match self {
            AssignTarget::Binding(scope, name) => scope.lookup(name),
            AssignTarget::Property(object, key) => object.lookup(key),
        }
        .unwrap_or_default()
    }

    pub fn write(&self, value: Value) {
        match self {
            AssignTarget::Binding(scope, name) => scope.insert(name.as_ref(), value),
            AssignTarget::Property(object, key) => object.insert(key.as_str(), value),
        }
    }
}

/// First object along the prototype chain of `environment` with an own `name`.
fn binding_owner(environment: &ObjectRef, name: &str) -> Option<ObjectRef> {
    let mut scope = environment.clone();
    loop {
        if scope.get_own(name).is_some() {
            return Some(scope);
        }
        let prototype = scope.borrow().prototype.as_object().cloned()?;
        scope = prototype;
    }
}
