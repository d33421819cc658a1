//! Dynamic runtime values.
//!
//! [`Value`] is a tagged union with cheap clones: primitives are copied,
//! strings share an `Rc<str>`, and objects and functions share their payload
//! through reference counting. Assigning a value to a binding or property
//! therefore aliases objects, which is what the interpreter relies on when it
//! mutates an object reached through several names.
//!
//! # Conversions
//!
//! | Tag | `to_string` | `to_number` | `to_bool` |
//! |-----|-------------|-------------|-----------|
//! | undefined | `undefined` | 0 | false |
//! | null | `null` | 0 | false |
//! | bool | `true`/`false` | 0 or 1 | itself |
//! | number | shortest round-trip form | itself | non-zero and not NaN |
//! | string | itself | numeric prefix or NaN | non-empty |
//! | function | `function` | unavailable | true |
//! | object | `{"key":value,...}` | `to_double` hook or 0 | `to_bool` hook or true |

mod error;
mod function;
mod number;
mod object;

use std::fmt::{self, Write as _};
use std::rc::Rc;

pub use error::ValueError;
pub use function::{Function, NativeFn, NativeFunction, ScriptFunction};
pub use number::{format_number, parse_number};
pub use object::{Object, ObjectRef, Properties};

/// Property consulted when an object is called like a function.
pub const CALL_OPERATOR: &str = "operator()";

/// Property consulted by [`Value::to_number`] on objects.
pub const TO_NUMBER_HOOK: &str = "to_double";

/// Property consulted by [`Value::to_bool`] on objects.
pub const TO_BOOL_HOOK: &str = "to_bool";

#[derive(Clone, Default)]
pub enum Value {
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(Rc<str>),
    Function(Function),
    Object(ObjectRef),
}

impl Value {
    pub fn string(text: impl Into<Rc<str>>) -> Self {
        Value::String(text.into())
    }

    /// A fresh object with no properties and a `null` prototype.
    pub fn object() -> Self {
        Value::object_with_prototype(Value::Null)
    }

    pub fn object_with_prototype(prototype: Value) -> Self {
        Value::Object(ObjectRef::new(Object::with_prototype(prototype)))
    }

    /// A fresh object holding `properties` in iteration order.
    pub fn from_properties<K: Into<String>>(
        properties: impl IntoIterator<Item = (K, Value)>,
    ) -> Self {
        let object = Object {
            prototype: Value::Null,
            properties: properties
                .into_iter()
                .map(|(key, value)| (key.into(), value))
                .collect(),
        };
        Value::Object(ObjectRef::new(object))
    }

    /// Wrap a host function.
    pub fn native(
        name: &str,
        func: impl Fn(&[Value]) -> Result<Value, ValueError> + 'static,
    ) -> Self {
        Value::Function(Function::Native(NativeFunction::new(name, func)))
    }

    /// Tag name used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Function(_) => "function",
            Value::Object(_) => "object",
        }
    }

    /// Result of the `typeof` operator.
    pub fn typeof_name(&self) -> &'static str {
        match self {
            Value::Null => "object",
            other => other.type_name(),
        }
    }

    #[inline]
    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    #[inline]
    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// Functions, and objects exposing a callable `operator()` property.
    pub fn is_callable(&self) -> bool {
        self.callee().is_ok()
    }

    pub fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Value::Object(object) => Some(object),
            _ => None,
        }
    }

    pub fn to_number(&self) -> Result<f64, ValueError> {
        match self {
            Value::Undefined | Value::Null => Ok(0.0),
            Value::Bool(b) => Ok(f64::from(u8::from(*b))),
            Value::Number(n) => Ok(*n),
            Value::String(text) => Ok(parse_number(text)),
            Value::Function(_) => Err(ValueError::Unavailable {
                operation: "convert to number",
                type_name: "function",
            }),
            Value::Object(object) => match run_hook(object, TO_NUMBER_HOOK)? {
                Some(result) => result.to_number(),
                None => Ok(0.0),
            },
        }
    }

    pub fn to_bool(&self) -> Result<bool, ValueError> {
        match self {
            Value::Undefined | Value::Null => Ok(false),
            Value::Bool(b) => Ok(*b),
            Value::Number(n) => Ok(*n != 0.0 && !n.is_nan()),
            Value::String(text) => Ok(!text.is_empty()),
            Value::Function(_) => Ok(true),
            Value::Object(object) => match run_hook(object, TO_BOOL_HOOK)? {
                Some(result) => result.to_bool(),
                None => Ok(true),
            },
        }
    }

    /// Read a property through the prototype chain without creating it.
    ///
    /// Missing properties read as `undefined`.
    pub fn get(&self, key: &str) -> Result<Value, ValueError> {
        let object = self.expect_object()?;
        Ok(object.lookup(key).unwrap_or_default())
    }

    /// Read a property through the prototype chain, creating an `undefined`
    /// own property on the receiver when no object in the chain has it.
    pub fn index(&self, key: &str) -> Result<Value, ValueError> {
        let object = self.expect_object()?;
        if let Some(value) = object.lookup(key) {
            return Ok(value);
        }
        object.insert(key, Value::Undefined);
        Ok(Value::Undefined)
    }

    /// Write an own property on the receiver.
    pub fn set(&self, key: &str, value: Value) -> Result<(), ValueError> {
        self.expect_object()?.insert(key, value);
        Ok(())
    }

    /// Resolve what a call on this value would invoke.
    pub fn callee(&self) -> Result<Function, ValueError> {
        match self {
            Value::Function(function) => Ok(function.clone()),
            Value::Object(object) => match object.lookup(CALL_OPERATOR) {
                Some(Value::Function(function)) => Ok(function),
                _ => Err(ValueError::NotCallable {
                    type_name: "object",
                }),
            },
            other => Err(ValueError::NotCallable {
                type_name: other.type_name(),
            }),
        }
    }

    /// Call a native function (directly or through `operator()`).
    pub fn call(&self, args: &[Value]) -> Result<Value, ValueError> {
        match self.callee()? {
            Function::Native(native) => native.call(args),
            Function::Script(script) => Err(ValueError::ScriptCall {
                name: script.name.as_deref().unwrap_or("anonymous").to_owned(),
            }),
        }
    }

    /// The script function behind conversion hook `hook`, if there is one.
    ///
    /// [`Value::to_number`] and [`Value::to_bool`] cannot run these; the
    /// interpreter calls them itself and converts their result instead.
    pub fn script_hook(&self, hook: &str) -> Option<Rc<ScriptFunction>> {
        let property = self.as_object()?.lookup(hook)?;
        match property.callee() {
            Ok(Function::Script(script)) => Some(script),
            _ => None,
        }
    }

    /// `===`: same tag and same payload; objects and functions by identity.
    #[allow(clippy::float_cmp)]
    pub fn strict_equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => a.ptr_eq(b),
            (Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
            _ => false,
        }
    }

    fn expect_object(&self) -> Result<&ObjectRef, ValueError> {
        self.as_object().ok_or(ValueError::Unavailable {
            operation: "access properties of",
            type_name: self.type_name(),
        })
    }
}

/// Invoke the conversion hook `hook` of `object`, if it has a callable one.
fn run_hook(object: &ObjectRef, hook: &'static str) -> Result<Option<Value>, ValueError> {
    let Some(property) = object.lookup(hook) else {
        return Ok(None);
    };
    match property.callee() {
        Ok(Function::Native(native)) => native.call(&[]).map(Some),
        Ok(Function::Script(_)) => Err(ValueError::ScriptHook { hook }),
        Err(_) => Ok(None),
    }
}

/// Loose equality: both sides render to the same string.
impl PartialEq for Value {
    fn eq(&self, other: &Value) -> bool {
        self.to_string() == other.to_string()
    }
}

impl From<f64> for Value {
    fn from(number: f64) -> Self {
        Value::Number(number)
    }
}

impl From<i32> for Value {
    fn from(number: i32) -> Self {
        Value::Number(f64::from(number))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::String(Rc::from(text))
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value::String(Rc::from(text))
    }
}

impl From<ObjectRef> for Value {
    fn from(object: ObjectRef) -> Self {
        Value::Object(object)
    }
}

impl From<Function> for Value {
    fn from(function: Function) -> Self {
        Value::Function(function)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => f.write_str("undefined"),
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => f.write_str(&format_number(*n)),
            Value::String(text) => f.write_str(text),
            Value::Function(_) => f.write_str("function"),
            Value::Object(object) => write_object(f, object, &mut Vec::new()),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => f.write_str("Undefined"),
            Value::Null => f.write_str("Null"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Number(n) => write!(f, "Number({})", format_number(*n)),
            Value::String(text) => write!(f, "String({text:?})"),
            Value::Function(function) => write!(f, "Function({})", function.name()),
            Value::Object(_) => write!(f, "Object({self})"),
        }
    }
}

/// `seen` holds the objects on the current rendering path; revisiting one
/// prints `{...}` instead of recursing forever.
fn write_object(
    f: &mut fmt::Formatter<'_>,
    object: &ObjectRef,
    seen: &mut Vec<*const ()>,
) -> fmt::Result {
    if seen.contains(&object.addr()) {
        return f.write_str("{...}");
    }
    seen.push(object.addr());
    f.write_char('{')?;
    for (position, (key, value)) in object.borrow().properties.iter().enumerate() {
        if position > 0 {
            f.write_char(',')?;
        }
        write_quoted(f, key)?;
        f.write_char(':')?;
        match value {
            Value::String(text) => write_quoted(f, text)?,
            Value::Object(inner) => write_object(f, inner, seen)?,
            other => write!(f, "{other}")?,
        }
    }
    f.write_char('}')?;
    seen.pop();
    Ok(())
}

fn write_quoted(f: &mut fmt::Formatter<'_>, text: &str) -> fmt::Result {
    f.write_char('"')?;
    for c in text.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\t' => f.write_str("\\t")?,
            '\r' => f.write_str("\\r")?,
            c => f.write_char(c)?,
        }
    }
    f.write_char('"')
}

#[cfg(test)]
mod tests;
