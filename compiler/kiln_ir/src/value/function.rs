use std::rc::Rc;

use crate::{Name, ParseTree};

use super::{Value, ValueError};

/// Signature of host-provided functions.
pub type NativeFn = dyn Fn(&[Value]) -> Result<Value, ValueError>;

/// A callable value.
#[derive(Clone)]
pub enum Function {
    /// Implemented by the host; runs to completion when called.
    Native(NativeFunction),
    /// Defined by script code; only the interpreter can run it.
    Script(Rc<ScriptFunction>),
}

impl Function {
    pub fn name(&self) -> &str {
        match self {
            Function::Native(native) => native.name(),
            Function::Script(script) => script.name.as_deref().unwrap_or("anonymous"),
        }
    }

    pub fn ptr_eq(&self, other: &Function) -> bool {
        match (self, other) {
            (Function::Native(a), Function::Native(b)) => Rc::ptr_eq(&a.func, &b.func),
            (Function::Script(a), Function::Script(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

#[derive(Clone)]
pub struct NativeFunction {
    name: Name,
    func: Rc<NativeFn>,
}

impl NativeFunction {
    pub fn new(
        name: &str,
        func: impl Fn(&[Value]) -> Result<Value, ValueError> + 'static,
    ) -> Self {
        NativeFunction {
            name: Name::from(name),
            func: Rc::new(func),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn call(&self, args: &[Value]) -> Result<Value, ValueError> {
        (self.func)(args)
    }
}

/// A closure created by evaluating a function literal.
pub struct ScriptFunction {
    pub name: Option<Name>,
    pub params: Vec<Name>,
    /// Standalone copy of the body block.
    pub body: Rc<ParseTree>,
    /// Defining environment; each call's scope uses it as prototype.
    pub environment: Value,
}
