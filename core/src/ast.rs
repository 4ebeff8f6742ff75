use serde::{Deserialize, Serialize};

/// Parsed representation of a filter specification string.
///
/// `params` preserves declaration order; each key appears at most once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    pub type_id: String,
    pub params: Vec<(String, ParamValue)>,
}

impl FilterSpec {
    /// Look up a parameter by key.
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.params.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }
}

/// A parameter value: a single scalar, or an ordered comma-split list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ParamValue {
    Scalar(String),
    List(Vec<String>),
}

impl ParamValue {
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            ParamValue::Scalar(s) => Some(s),
            ParamValue::List(_) => None,
        }
    }

    /// List view of the value. A scalar reads as a one-element list.
    pub fn items(&self) -> Vec<String> {
        match self {
            ParamValue::Scalar(s) => vec![s.clone()],
            ParamValue::List(items) => items.clone(),
        }
    }
}
