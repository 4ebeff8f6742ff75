//! Boundaries to the request state and the validation-rule engine. Both are
//! external collaborators; this crate only defines the seams.

use std::collections::BTreeMap;

use crate::value::Value;

/// Read-only access to raw submitted values, keyed by prepared field key
/// (`f_` prefix). Implemented by whatever holds request state.
pub trait ValueSource {
    fn get(&self, key: &str) -> Option<Value>;
}

/// No request at hand.
impl ValueSource for () {
    fn get(&self, _key: &str) -> Option<Value> {
        None
    }
}

impl ValueSource for BTreeMap<String, Value> {
    fn get(&self, key: &str) -> Option<Value> {
        BTreeMap::get(self, key).cloned()
    }
}

/// Per-field outcome of a validator run. Error lists keep the order the
/// validator reported them in; the engine only ever consumes the first one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationReport {
    errors: BTreeMap<String, Vec<String>>,
}

impl ValidationReport {
    pub fn ok() -> Self {
        Self::default()
    }

    pub fn push_error(&mut self, key: impl Into<String>, message: impl Into<String>) {
        self.errors.entry(key.into()).or_default().push(message.into());
    }

    pub fn passes(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn first_error(&self, key: &str) -> Option<&str> {
        self.errors.get(key).and_then(|e| e.first()).map(String::as_str)
    }
}

/// The external validation-rule engine. Gets parallel maps of raw values,
/// opaque rule expressions and human-readable labels, all keyed by field key.
pub trait Validator {
    fn check(
        &self,
        values: &BTreeMap<String, Value>,
        rules: &BTreeMap<String, String>,
        labels: &BTreeMap<String, String>,
    ) -> ValidationReport;
}
