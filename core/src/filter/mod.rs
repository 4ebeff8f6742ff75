//! The filter value model and the backend dispatch.
//!
//! `FilterCore` carries the state every kind shares: the bound value, its
//! cast policy, display metadata and the validation outcome. Concrete kinds
//! embed one and implement [`Filter`], overriding the hooks for whichever
//! data source variants they support; everything else rides through
//! unchanged.

pub(crate) mod date;
pub(crate) mod date_range;
pub(crate) mod multi_select;
pub(crate) mod select;
pub(crate) mod text;

pub use date::DateFilter;
pub use date_range::DateRangeFilter;
pub use multi_select::MultiSelectFilter;
pub use select::SelectFilter;
pub use text::TextFilter;

use std::cell::Cell;
use std::collections::BTreeMap;
use tracing::{debug, warn};

use crate::error::Error;
use crate::registry::BuildContext;
use crate::render::Widget;
use crate::source::{DataSource, LogQuery, QueryBuilder, Record, SearchQuery};
use crate::validate::{Validator, ValueSource};
use crate::value::{CastPolicy, Value};

/// Shared state of one filter instance.
///
/// Mutable only during its construction+binding window: the first call to
/// `validate` or a dispatch seals it, and later setter calls are ignored
/// with a warning. There is no way back to the unbound state.
#[derive(Debug)]
pub struct FilterCore {
    name: String,
    label: Option<String>,
    theme: String,
    value: Value,
    cast: CastPolicy,
    validators: String,
    view_path: Option<String>,
    attributes: BTreeMap<String, Value>,
    error: Option<String>,
    sealed: Cell<bool>,
}

impl FilterCore {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: None,
            theme: "default".to_string(),
            value: Value::Null,
            cast: CastPolicy::None,
            validators: String::new(),
            view_path: None,
            attributes: BTreeMap::new(),
            error: None,
            sealed: Cell::new(false),
        }
    }

    /// Common build-time preparation: label and cast from the resolved
    /// parameters, then the submitted raw value from the request source.
    pub(crate) fn from_build(ctx: &BuildContext<'_>) -> Self {
        let mut core = FilterCore::new(ctx.name);
        if let Some(label) = ctx.scalar("label") {
            core.set_label(label);
        }
        if let Some(cast) = ctx.scalar("cast") {
            core.set_cast(CastPolicy::from_param(cast));
        }
        if let Some(raw) = ctx.request.get(&core.field_key()) {
            core.set_value(raw, false);
        }
        core
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn theme(&self) -> &str {
        &self.theme
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn cast(&self) -> CastPolicy {
        self.cast
    }

    pub fn validators(&self) -> &str {
        &self.validators
    }

    pub fn view_path(&self) -> Option<&str> {
        self.view_path.as_deref()
    }

    pub fn attributes(&self) -> &BTreeMap<String, Value> {
        &self.attributes
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// External name: namespacing dots become underscores.
    pub fn prepared_name(&self) -> String {
        self.name.replace('.', "_")
    }

    /// Field key used for request reads, validation and the widget.
    pub fn field_key(&self) -> String {
        format!("f_{}", self.prepared_name())
    }

    /// First write wins unless forced.
    pub fn set_value(&mut self, value: Value, force: bool) -> &mut Self {
        if !self.open("set_value") {
            return self;
        }
        if self.value.is_falsy() || force {
            self.value = value;
        }
        self
    }

    /// Weaker than `set_value`: only fills in when the current value is
    /// falsy, and never forces.
    pub fn set_default_value(&mut self, value: Value) -> &mut Self {
        if !self.open("set_default_value") {
            return self;
        }
        if self.value.is_falsy() {
            self.value = value;
        }
        self
    }

    /// Empty labels are ignored, like an absent spec parameter.
    pub fn set_label(&mut self, label: impl Into<String>) -> &mut Self {
        if !self.open("set_label") {
            return self;
        }
        let label = label.into();
        if !label.is_empty() {
            self.label = Some(label);
        }
        self
    }

    pub fn set_theme(&mut self, theme: impl Into<String>) -> &mut Self {
        if !self.open("set_theme") {
            return self;
        }
        self.theme = theme.into();
        self
    }

    pub fn set_cast(&mut self, cast: CastPolicy) -> &mut Self {
        if !self.open("set_cast") {
            return self;
        }
        self.cast = cast;
        self
    }

    pub fn set_validators(&mut self, validators: impl Into<String>) -> &mut Self {
        if !self.open("set_validators") {
            return self;
        }
        self.validators = validators.into();
        self
    }

    pub fn set_view_path(&mut self, view_path: impl Into<String>) -> &mut Self {
        if !self.open("set_view_path") {
            return self;
        }
        self.view_path = Some(view_path.into());
        self
    }

    pub fn set_attributes(&mut self, attributes: BTreeMap<String, Value>) -> &mut Self {
        if !self.open("set_attributes") {
            return self;
        }
        self.attributes = attributes;
        self
    }

    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        if !self.open("set_attribute") {
            return self;
        }
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// A filter affects a data source only while it carries a non-blank
    /// value.
    pub fn is_active(&self) -> bool {
        !self.value.is_blank()
    }

    /// Cast the bound value once, per policy. Called by the factory when the
    /// kind-specific preparation has completed.
    pub(crate) fn apply_cast(&mut self) -> Result<(), Error> {
        let value = std::mem::replace(&mut self.value, Value::Null);
        self.value = value.cast(self.cast)?;
        Ok(())
    }

    /// Inactive filters are always valid. Active ones go to the external
    /// validator; on failure the first reported error for this field is
    /// stored and `false` comes back. Seals the core either way.
    pub fn validate(&mut self, validator: &dyn Validator, request: &dyn ValueSource) -> bool {
        self.seal();
        if self.value.is_falsy() {
            return true;
        }

        let key = self.field_key();
        let mut values = BTreeMap::new();
        if let Some(raw) = request.get(&key) {
            values.insert(key.clone(), raw);
        }
        let mut rules = BTreeMap::new();
        rules.insert(key.clone(), self.validators.clone());
        let mut labels = BTreeMap::new();
        labels.insert(
            key.clone(),
            self.label.clone().unwrap_or_else(|| self.name.clone()),
        );

        let report = validator.check(&values, &rules, &labels);
        if report.passes() {
            return true;
        }
        self.error = report.first_error(&key).map(str::to_string);
        false
    }

    /// Snapshot for the rendering bridge. The value shown is the raw
    /// submitted one, not the cast bound value.
    pub fn widget(&self, request: &dyn ValueSource) -> Widget {
        Widget {
            name: self.prepared_name(),
            label: self.label.clone(),
            value: request.get(&self.field_key()),
            attributes: self.attributes.clone(),
            error: self.error.clone(),
            theme: self.theme.clone(),
            view_path: self.view_path.clone(),
        }
    }

    fn seal(&self) {
        self.sealed.set(true);
    }

    fn open(&self, operation: &str) -> bool {
        if self.sealed.get() {
            warn!(filter = %self.name, operation = operation, "mutation of a sealed filter ignored");
            return false;
        }
        true
    }
}

/// One concrete filter kind.
///
/// The default hook bodies pass the data source through unchanged; a kind
/// overrides only the variants it knows how to narrow.
pub trait Filter {
    fn core(&self) -> &FilterCore;
    fn core_mut(&mut self) -> &mut FilterCore;

    fn apply_query(&self, query: QueryBuilder) -> QueryBuilder {
        query
    }

    fn apply_records(&self, records: Vec<Record>) -> Vec<Record> {
        records
    }

    fn apply_search(&self, search: SearchQuery) -> SearchQuery {
        search
    }

    fn apply_log(&self, log: LogQuery) -> LogQuery {
        log
    }

    /// Variant dispatch. Inactive filters never touch the backend; unknown
    /// variants ride through so future backends do not need this crate to
    /// learn about them first.
    fn apply(&self, source: DataSource) -> DataSource {
        let core = self.core();
        core.seal();
        if !core.is_active() {
            debug!(filter = %core.name(), "inactive filter, source untouched");
            return source;
        }
        debug!(filter = %core.name(), variant = ?source.variant(), "applying filter");
        match source {
            DataSource::Query(query) => DataSource::Query(self.apply_query(query)),
            DataSource::Records(records) => DataSource::Records(self.apply_records(records)),
            DataSource::Search(search) => DataSource::Search(self.apply_search(search)),
            DataSource::Log(log) => DataSource::Log(self.apply_log(log)),
            DataSource::Unknown(payload) => DataSource::Unknown(payload),
        }
    }

    fn set_value(&mut self, value: Value, force: bool) -> &mut FilterCore {
        self.core_mut().set_value(value, force)
    }

    fn set_default_value(&mut self, value: Value) -> &mut FilterCore {
        self.core_mut().set_default_value(value)
    }

    fn is_active(&self) -> bool {
        self.core().is_active()
    }

    fn validate(&mut self, validator: &dyn Validator, request: &dyn ValueSource) -> bool {
        self.core_mut().validate(validator, request)
    }

    fn widget(&self, request: &dyn ValueSource) -> Widget {
        self.core().widget(request)
    }
}
