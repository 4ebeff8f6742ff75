//! Data source variants a filter can be applied to.
//!
//! The variant set is closed on purpose: the dispatcher switches on the tag,
//! and anything it does not recognize rides through untouched. The handle
//! types here are boundary contracts - the real backends live elsewhere.

pub mod log;
pub mod query;
pub mod search;

pub use log::{LogMatcher, LogQuery};
pub use query::{CompareOp, Condition, QueryBuilder};
pub use search::{SearchClause, SearchQuery};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::value::Value;

/// One row of an in-memory record collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    fields: BTreeMap<String, Value>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }
}

/// The closed set of backend representations.
#[derive(Debug, Clone, PartialEq)]
pub enum DataSource {
    Query(QueryBuilder),
    Records(Vec<Record>),
    Search(SearchQuery),
    Log(LogQuery),
    /// Opaque payload for backend kinds this crate does not know about.
    /// Always passes through dispatch unchanged.
    Unknown(serde_json::Value),
}

/// Variant tag, for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceVariant {
    Query,
    Records,
    Search,
    Log,
    Unknown,
}

impl DataSource {
    pub fn variant(&self) -> SourceVariant {
        match self {
            DataSource::Query(_) => SourceVariant::Query,
            DataSource::Records(_) => SourceVariant::Records,
            DataSource::Search(_) => SourceVariant::Search,
            DataSource::Log(_) => SourceVariant::Log,
            DataSource::Unknown(_) => SourceVariant::Unknown,
        }
    }
}
