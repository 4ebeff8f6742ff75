//! Composable query handle: an ordered condition list over one table, with a
//! SQL rendering for backends that want a WHERE clause.

use serde::{Deserialize, Serialize};

use crate::value::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompareOp {
    Eq,
    NotEq,
    Gt,
    GtEq,
    Lt,
    LtEq,
}

impl CompareOp {
    fn as_sql(&self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::NotEq => "<>",
            CompareOp::Gt => ">",
            CompareOp::GtEq => ">=",
            CompareOp::Lt => "<",
            CompareOp::LtEq => "<=",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Condition {
    Compare {
        field: String,
        op: CompareOp,
        value: Value,
    },
    In {
        field: String,
        values: Vec<Value>,
    },
    Between {
        field: String,
        low: Value,
        high: Value,
    },
    Like {
        field: String,
        pattern: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryBuilder {
    table: String,
    conditions: Vec<Condition>,
}

impl QueryBuilder {
    pub fn new(table: impl Into<String>) -> Self {
        Self { table: table.into(), conditions: Vec::new() }
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn push(&mut self, condition: Condition) -> &mut Self {
        self.conditions.push(condition);
        self
    }

    pub fn to_sql(&self) -> String {
        let mut sql = String::from("SELECT * FROM ");
        push_ident(&mut sql, &self.table);
        for (i, condition) in self.conditions.iter().enumerate() {
            sql.push_str(if i == 0 { " WHERE " } else { " AND " });
            render_condition(condition, &mut sql);
        }
        sql
    }
}

fn render_condition(condition: &Condition, buffer: &mut String) {
    match condition {
        Condition::Compare { field, op, value } => {
            push_ident(buffer, field);
            buffer.push(' ');
            buffer.push_str(op.as_sql());
            buffer.push(' ');
            push_literal(buffer, value);
        }
        Condition::In { field, values } => {
            push_ident(buffer, field);
            buffer.push_str(" IN (");
            for (i, value) in values.iter().enumerate() {
                if i > 0 {
                    buffer.push_str(", ");
                }
                push_literal(buffer, value);
            }
            buffer.push(')');
        }
        Condition::Between { field, low, high } => {
            push_ident(buffer, field);
            buffer.push_str(" BETWEEN ");
            push_literal(buffer, low);
            buffer.push_str(" AND ");
            push_literal(buffer, high);
        }
        Condition::Like { field, pattern } => {
            push_ident(buffer, field);
            buffer.push_str(" LIKE ");
            push_string(buffer, pattern);
        }
    }
}

fn push_ident(buffer: &mut String, name: &str) {
    buffer.push('"');
    buffer.push_str(name);
    buffer.push('"');
}

fn push_literal(buffer: &mut String, value: &Value) {
    match value {
        Value::Null => buffer.push_str("NULL"),
        Value::Int(n) => buffer.push_str(&n.to_string()),
        Value::String(s) => push_string(buffer, s),
        // Lists render as their joined string form; IN builds its own
        // parentheses from element values.
        Value::List(_) => push_string(buffer, &value.to_string()),
    }
}

fn push_string(buffer: &mut String, s: &str) {
    buffer.push('\'');
    for c in s.chars() {
        match c {
            // Single quote -> doubled quote (SQL standard)
            '\'' => buffer.push_str("''"),
            // Null bytes can truncate strings in C-based drivers; drop them
            '\0' => continue,
            _ => buffer.push(c),
        }
    }
    buffer.push('\'');
}
