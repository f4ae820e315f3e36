//! Positional argument signatures and their validation.

use std::fmt;

use serde_json::Value;

use super::operations::RemoteMethod;
use crate::{Result, RpcError};

/// Kind of one positional argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// JSON string.
    Text,
    /// JSON number.
    Number,
    /// JSON boolean.
    Boolean,
    /// JSON object or array (business payloads, batch data).
    Object,
}

impl ParamKind {
    /// Kind of a JSON value; `null` has none.
    pub fn of(value: &Value) -> Option<Self> {
        // ---
        match value {
            Value::String(_) => Some(Self::Text),
            Value::Number(_) => Some(Self::Number),
            Value::Bool(_) => Some(Self::Boolean),
            Value::Object(_) | Value::Array(_) => Some(Self::Object),
            Value::Null => None,
        }
    }

    pub fn matches(self, value: &Value) -> bool {
        Self::of(value) == Some(self)
    }
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Text => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Object => "object",
        };
        f.write_str(name)
    }
}

/// Check `args` against the signature of `method`.
///
/// # Errors
///
/// Returns `RpcError::Contract` on an arity mismatch or on the first
/// argument whose kind differs from the declared one.
pub fn check(method: &RemoteMethod, args: &[Value]) -> Result<()> {
    // ---
    if args.len() != method.signature.len() {
        return Err(RpcError::contract(
            method.name,
            format!(
                "expected {} argument(s), got {}",
                method.signature.len(),
                args.len()
            ),
        ));
    }

    for (position, (kind, arg)) in method.signature.iter().zip(args).enumerate() {
        if !kind.matches(arg) {
            let found = ParamKind::of(arg).map_or_else(|| "null".to_owned(), |k| k.to_string());
            return Err(RpcError::contract(
                method.name,
                format!("argument {position} must be of type {kind}, got {found}"),
            ));
        }
    }

    Ok(())
}
