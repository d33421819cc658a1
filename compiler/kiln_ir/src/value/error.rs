/// Failure of a value-level operation.
///
/// None of these abort the interpreter by themselves: it converts them into
/// language-level `TypeError` completions.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValueError {
    /// The operation is not defined for this kind of value.
    #[error("cannot {operation} a value of type {type_name}")]
    Unavailable {
        operation: &'static str,
        type_name: &'static str,
    },

    #[error("{type_name} is not a function")]
    NotCallable { type_name: &'static str },

    /// A conversion hook (`to_double`, `to_bool`) is a script function, which
    /// only the interpreter can run.
    #[error("conversion hook `{hook}` is a script function")]
    ScriptHook { hook: &'static str },

    /// `Value::call` was given a script function.
    #[error("`{name}` must be called through the interpreter")]
    ScriptCall { name: String },

    /// Raised by a host-provided native function.
    #[error("{message}")]
    Host { message: String },
}

impl ValueError {
    /// Error for native functions to report a failure.
    pub fn host(message: impl Into<String>) -> Self {
        ValueError::Host {
            message: message.into(),
        }
    }
}
