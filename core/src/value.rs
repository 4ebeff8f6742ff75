//! Runtime values bound to filters.
//!
//! Two emptiness predicates exist on purpose. `is_blank` decides whether a
//! filter is active and is list-aware; `is_falsy` guards overwrites in
//! `set_value`/`set_default_value`, where a non-empty list counts as truthy
//! even when every element is falsy.

use serde::{Deserialize, Serialize};
use std::fmt::Display;

use crate::ast::ParamValue;
use crate::error::Error;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Null,
    String(String),
    Int(i64),
    List(Vec<Value>),
}

/// Coercion applied to a bound value exactly once, when construction
/// completes. Never re-applied on later mutation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CastPolicy {
    #[default]
    None,
    Int,
    Str,
}

impl CastPolicy {
    /// Policy named by a spec parameter. Unrecognized names coerce nothing.
    pub fn from_param(name: &str) -> Self {
        match name {
            "int" | "integer" => CastPolicy::Int,
            "str" | "string" => CastPolicy::Str,
            _ => CastPolicy::None,
        }
    }
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Blank check backing `is_active`. Unset, whitespace-only strings and
    /// integer zero are blank; a list is blank when every element is falsy.
    /// The string `"0"` is not blank.
    pub fn is_blank(&self) -> bool {
        match self {
            Value::Null => true,
            Value::String(s) => s.trim().is_empty(),
            Value::Int(n) => *n == 0,
            Value::List(items) => items.iter().all(Value::is_falsy),
        }
    }

    /// Truthiness guard for overwrite decisions.
    pub fn is_falsy(&self) -> bool {
        match self {
            Value::Null => true,
            Value::String(s) => s.is_empty() || s == "0",
            Value::Int(n) => *n == 0,
            Value::List(items) => items.is_empty(),
        }
    }

    /// Loose equality in the style of request data: values of different
    /// variants compare by their string forms.
    pub fn loose_eq(&self, other: &Value) -> bool {
        if self == other {
            return true;
        }
        self.to_string() == other.to_string()
    }

    /// Coerce under `policy`. Blank values pass through untouched.
    pub fn cast(self, policy: CastPolicy) -> Result<Value, Error> {
        if self.is_blank() {
            return Ok(self);
        }
        match policy {
            CastPolicy::None => Ok(self),
            CastPolicy::Int => self.cast_int(),
            CastPolicy::Str => Ok(self.cast_str()),
        }
    }

    fn cast_int(self) -> Result<Value, Error> {
        match self {
            Value::Null => Ok(Value::Null),
            Value::Int(n) => Ok(Value::Int(n)),
            Value::String(s) => s
                .trim()
                .parse::<i64>()
                .map(Value::Int)
                .map_err(|_| Error::Cast { value: s, target: "integer" }),
            // Element-wise; blank elements keep their shape so mixed lists
            // keep their activity semantics.
            Value::List(items) => items
                .into_iter()
                .map(|item| if item.is_blank() { Ok(item) } else { item.cast_int() })
                .collect::<Result<Vec<_>, _>>()
                .map(Value::List),
        }
    }

    fn cast_str(self) -> Value {
        match self {
            Value::Null => Value::Null,
            Value::String(s) => Value::String(s),
            Value::Int(n) => Value::String(n.to_string()),
            Value::List(items) => Value::List(
                items
                    .into_iter()
                    .map(|item| if item.is_blank() { item } else { item.cast_str() })
                    .collect(),
            ),
        }
    }

    /// Plain JSON shape (untagged scalars), for wire bodies and opaque
    /// payloads.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Int(n) => serde_json::Value::Number((*n).into()),
            Value::List(items) => {
                serde_json::Value::Array(items.iter().map(Value::to_json).collect())
            }
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::String(s) => write!(f, "{}", s),
            Value::Int(n) => write!(f, "{}", n),
            Value::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}", item)?;
                }
                Ok(())
            }
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<&ParamValue> for Value {
    fn from(param: &ParamValue) -> Self {
        match param {
            ParamValue::Scalar(s) => Value::String(s.clone()),
            ParamValue::List(items) => {
                Value::List(items.iter().map(|s| Value::String(s.clone())).collect())
            }
        }
    }
}
