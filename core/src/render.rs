use serde::Serialize;
use std::collections::BTreeMap;

use crate::value::Value;

/// Everything the rendering bridge needs to draw one filter widget. The
/// bridge resolves `theme`/`view_path` to an actual template; no markup is
/// produced here.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Widget {
    pub name: String,
    pub label: Option<String>,
    pub value: Option<Value>,
    pub attributes: BTreeMap<String, Value>,
    pub error: Option<String>,
    pub theme: String,
    pub view_path: Option<String>,
}
