//! Shared fixtures for the integration tests.

use std::collections::BTreeMap;

use tablesift_core::{Record, ValidationReport, Validator, Value};

/// Request state from key/value pairs.
pub fn request(pairs: &[(&str, Value)]) -> BTreeMap<String, Value> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

/// Validator that accepts everything.
pub struct AcceptAll;

impl Validator for AcceptAll {
    fn check(
        &self,
        _values: &BTreeMap<String, Value>,
        _rules: &BTreeMap<String, String>,
        _labels: &BTreeMap<String, String>,
    ) -> ValidationReport {
        ValidationReport::ok()
    }
}

/// Validator that rejects every checked field with a canned message.
pub struct RejectAll(pub &'static str);

impl Validator for RejectAll {
    fn check(
        &self,
        _values: &BTreeMap<String, Value>,
        _rules: &BTreeMap<String, String>,
        labels: &BTreeMap<String, String>,
    ) -> ValidationReport {
        let mut report = ValidationReport::ok();
        for key in labels.keys() {
            report.push_error(key.clone(), self.0);
        }
        report
    }
}

/// A small order dataset exercised by the collection hooks.
pub fn order_records() -> Vec<Record> {
    vec![
        Record::new()
            .with("status", 2i64)
            .with("kind", "buy")
            .with("customer", "Annika Larsson")
            .with("created_at", "2024-01-09"),
        Record::new()
            .with("status", 2i64)
            .with("kind", "sell")
            .with("customer", "Bob Okafor")
            .with("created_at", "2024-01-15"),
        Record::new()
            .with("status", 3i64)
            .with("kind", "buy")
            .with("customer", "Joanne Park")
            .with("created_at", "2024-01-21"),
    ]
}
