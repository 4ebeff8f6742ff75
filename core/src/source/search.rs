//! Search index handle. Clauses accumulate and render into a JSON query body
//! of the usual bool/filter shape.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as Json};

use crate::value::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SearchClause {
    Term { field: String, value: Value },
    Terms { field: String, values: Vec<Value> },
    Range { field: String, from: Option<Value>, to: Option<Value> },
    Match { field: String, text: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchQuery {
    index: String,
    clauses: Vec<SearchClause>,
}

impl SearchQuery {
    pub fn new(index: impl Into<String>) -> Self {
        Self { index: index.into(), clauses: Vec::new() }
    }

    pub fn index(&self) -> &str {
        &self.index
    }

    pub fn clauses(&self) -> &[SearchClause] {
        &self.clauses
    }

    pub fn push(&mut self, clause: SearchClause) -> &mut Self {
        self.clauses.push(clause);
        self
    }

    pub fn to_body(&self) -> Json {
        let clauses: Vec<Json> = self.clauses.iter().map(SearchClause::to_json).collect();
        let mut boolean = Map::new();
        boolean.insert("filter".to_string(), Json::Array(clauses));
        let mut query = Map::new();
        query.insert("bool".to_string(), Json::Object(boolean));
        let mut body = Map::new();
        body.insert("query".to_string(), Json::Object(query));
        Json::Object(body)
    }
}

impl SearchClause {
    fn to_json(&self) -> Json {
        match self {
            SearchClause::Term { field, value } => wrap("term", field, value.to_json()),
            SearchClause::Terms { field, values } => wrap(
                "terms",
                field,
                Json::Array(values.iter().map(Value::to_json).collect()),
            ),
            SearchClause::Range { field, from, to } => {
                let mut bounds = Map::new();
                if let Some(from) = from {
                    bounds.insert("gte".to_string(), from.to_json());
                }
                if let Some(to) = to {
                    bounds.insert("lte".to_string(), to.to_json());
                }
                wrap("range", field, Json::Object(bounds))
            }
            SearchClause::Match { field, text } => {
                wrap("match", field, Json::String(text.clone()))
            }
        }
    }
}

fn wrap(kind: &str, field: &str, body: Json) -> Json {
    let mut inner = Map::new();
    inner.insert(field.to_string(), body);
    let mut outer = Map::new();
    outer.insert(kind.to_string(), Json::Object(inner));
    Json::Object(outer)
}
