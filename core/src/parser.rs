use pest::iterators::Pair;
use pest::Parser;

use crate::ast::{FilterSpec, ParamValue};
use crate::error::Error;
use crate::grammar::{Rule, SpecParser};

/// Parse a filter specification string into a [`FilterSpec`].
///
/// `spec := type_id ('|' param)*`, `param := key ':' value`, where a
/// comma-joined value becomes an ordered list. Fragments without the `:`
/// separator and repeated keys are caller contract violations and fail with
/// [`Error::MalformedSpec`].
pub fn parse_filter_spec(input: &str) -> Result<FilterSpec, Error> {
    let pairs = SpecParser::parse(Rule::Spec, input)
        .map_err(|e| Error::MalformedSpec(e.to_string()))?;

    // Spec is a silent rule, so the type id and params come through directly.
    let mut type_id = String::new();
    let mut params: Vec<(String, ParamValue)> = Vec::new();
    for pair in pairs {
        match pair.as_rule() {
            Rule::TypeId => type_id = pair.as_str().trim().to_string(),
            Rule::Param => {
                let (key, value) = parse_param(pair)?;
                if params.iter().any(|(k, _)| *k == key) {
                    return Err(Error::MalformedSpec(format!(
                        "parameter \"{}\" appears more than once",
                        key
                    )));
                }
                params.push((key, value));
            }
            Rule::EOI => {}
            rule => {
                return Err(Error::MalformedSpec(format!(
                    "unexpected rule {:?} in spec",
                    rule
                )))
            }
        }
    }

    Ok(FilterSpec { type_id, params })
}

fn parse_param(pair: Pair<'_, Rule>) -> Result<(String, ParamValue), Error> {
    let mut inner = pair.into_inner();
    let key = inner
        .next()
        .ok_or_else(|| Error::MalformedSpec("parameter without key".to_string()))?
        .as_str()
        .trim()
        .to_string();
    let value_pair = inner
        .next()
        .ok_or_else(|| Error::MalformedSpec(format!("parameter \"{}\" without value", key)))?;
    let mut items: Vec<String> = value_pair
        .into_inner()
        .map(|item| item.as_str().to_string())
        .collect();
    let value = if items.len() == 1 {
        ParamValue::Scalar(items.remove(0))
    } else {
        ParamValue::List(items)
    };
    Ok((key, value))
}

/// Canonical registry key for a type identifier: words split on `_`, `-` and
/// spaces, capitalized, joined, with the fixed `Filter` suffix appended.
/// `date_range` becomes `DateRangeFilter`.
pub fn canonical_type_key(type_id: &str) -> String {
    let mut key = String::new();
    for word in type_id.split(|c: char| c == '_' || c == '-' || c.is_whitespace()) {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            key.extend(first.to_uppercase());
            key.push_str(chars.as_str());
        }
    }
    key.push_str("Filter");
    key
}
