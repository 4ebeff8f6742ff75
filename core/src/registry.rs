//! Type registry and factory.
//!
//! Each filter kind declares its construction parameters as static metadata;
//! the factory binds supplied values against that table (supplied, else
//! declared default, else fail) and hands the result to the kind's build
//! function. The process-wide table is populated once and never mutated, so
//! concurrent lookups need no locking.

use once_cell::sync::Lazy;
use std::collections::BTreeMap;
use tracing::debug;

use crate::ast::{FilterSpec, ParamValue};
use crate::error::Error;
use crate::filter::{date, date_range, multi_select, select, text, Filter};
use crate::parser::{canonical_type_key, parse_filter_spec};
use crate::validate::ValueSource;

/// Whether a declared parameter must be supplied, falls back to a default,
/// or is simply absent when not given.
#[derive(Debug, Clone, Copy)]
pub enum Requirement {
    Required,
    Optional,
    Default(&'static str),
}

/// One declared construction parameter of a filter kind.
#[derive(Debug, Clone, Copy)]
pub struct ParamSpec {
    pub name: &'static str,
    pub requirement: Requirement,
}

impl ParamSpec {
    pub const fn required(name: &'static str) -> Self {
        Self { name, requirement: Requirement::Required }
    }

    pub const fn optional(name: &'static str) -> Self {
        Self { name, requirement: Requirement::Optional }
    }

    pub const fn with_default(name: &'static str, default: &'static str) -> Self {
        Self { name, requirement: Requirement::Default(default) }
    }
}

/// Static description of one registrable filter kind.
#[derive(Debug, Clone, Copy)]
pub struct FilterType {
    /// Canonical key, e.g. `DateRangeFilter`.
    pub key: &'static str,
    /// Construction parameters, in declaration order.
    pub params: &'static [ParamSpec],
    pub build: fn(BuildContext<'_>) -> Result<Box<dyn Filter>, Error>,
}

/// What a build function gets to work with: the instance name, the resolved
/// parameters, and the request-state provider for reading the submitted
/// value.
pub struct BuildContext<'a> {
    pub name: &'a str,
    pub request: &'a dyn ValueSource,
    params: BTreeMap<&'static str, ParamValue>,
}

impl BuildContext<'_> {
    pub fn scalar(&self, key: &str) -> Option<&str> {
        self.params.get(key).and_then(ParamValue::as_scalar)
    }

    pub fn list(&self, key: &str) -> Option<Vec<String>> {
        self.params.get(key).map(ParamValue::items)
    }
}

/// Immutable type-to-implementation table.
#[derive(Debug, Clone)]
pub struct Registry {
    types: BTreeMap<&'static str, FilterType>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// Registry with the built-in kinds.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        for ty in [
            text::TYPE,
            select::TYPE,
            multi_select::TYPE,
            date::TYPE,
            date_range::TYPE,
        ] {
            registry.register(ty);
        }
        registry
    }

    pub fn empty() -> Self {
        Self { types: BTreeMap::new() }
    }

    pub fn register(&mut self, ty: FilterType) -> &mut Self {
        self.types.insert(ty.key, ty);
        self
    }

    /// Construct a filter from a parsed spec. Resolves the canonical type
    /// key, binds declared parameters, builds, then applies the cast policy
    /// exactly once.
    pub fn create(
        &self,
        name: &str,
        spec: &FilterSpec,
        request: &dyn ValueSource,
    ) -> Result<Box<dyn Filter>, Error> {
        let key = canonical_type_key(&spec.type_id);
        let ty = self
            .types
            .get(key.as_str())
            .ok_or_else(|| Error::UnknownFilterType(key.clone()))?;

        let mut params = BTreeMap::new();
        for param in ty.params {
            match spec.get(param.name) {
                Some(value) => {
                    params.insert(param.name, value.clone());
                }
                None => match param.requirement {
                    Requirement::Default(default) => {
                        params.insert(param.name, ParamValue::Scalar(default.to_string()));
                    }
                    Requirement::Optional => {}
                    Requirement::Required => {
                        return Err(Error::MissingRequiredArgument {
                            param: param.name.to_string(),
                            filter_type: ty.key,
                        });
                    }
                },
            }
        }

        debug!(filter = name, kind = ty.key, "constructing filter");
        let mut filter = (ty.build)(BuildContext { name, request, params })?;
        filter.core_mut().apply_cast()?;
        Ok(filter)
    }
}

static GLOBAL: Lazy<Registry> = Lazy::new(Registry::new);

/// The process-wide registry of built-in kinds.
pub fn global() -> &'static Registry {
    &GLOBAL
}

/// Input to [`make`]: a spec string, or a filter somebody already built.
pub enum FilterInput {
    Spec(String),
    Built(Box<dyn Filter>),
}

impl From<&str> for FilterInput {
    fn from(spec: &str) -> Self {
        FilterInput::Spec(spec.to_string())
    }
}

impl From<String> for FilterInput {
    fn from(spec: String) -> Self {
        FilterInput::Spec(spec)
    }
}

impl From<Box<dyn Filter>> for FilterInput {
    fn from(filter: Box<dyn Filter>) -> Self {
        FilterInput::Built(filter)
    }
}

/// Bare entry point. Parses and constructs via the process-wide registry; a
/// pre-built filter passes through unchanged, so call sites can mix spec
/// strings and hand-assembled filters freely.
pub fn make(
    input: impl Into<FilterInput>,
    name: &str,
    request: &dyn ValueSource,
) -> Result<Box<dyn Filter>, Error> {
    match input.into() {
        FilterInput::Built(filter) => Ok(filter),
        FilterInput::Spec(raw) => {
            let spec = parse_filter_spec(&raw)?;
            global().create(name, &spec, request)
        }
    }
}
