//! Log store handle: a stream name plus accumulated matchers. The store
//! itself evaluates the matchers; this is only the contract surface.

use serde::{Deserialize, Serialize};

use crate::value::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LogMatcher {
    Field { name: String, value: Value },
    FieldIn { name: String, values: Vec<Value> },
    Contains { name: String, needle: String },
    TimeRange { from: Option<String>, to: Option<String> },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogQuery {
    stream: String,
    matchers: Vec<LogMatcher>,
}

impl LogQuery {
    pub fn new(stream: impl Into<String>) -> Self {
        Self { stream: stream.into(), matchers: Vec::new() }
    }

    pub fn stream(&self) -> &str {
        &self.stream
    }

    pub fn matchers(&self) -> &[LogMatcher] {
        &self.matchers
    }

    pub fn push(&mut self, matcher: LogMatcher) -> &mut Self {
        self.matchers.push(matcher);
        self
    }
}
