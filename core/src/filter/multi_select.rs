use crate::error::Error;
use crate::filter::{Filter, FilterCore};
use crate::registry::{BuildContext, FilterType, ParamSpec};
use crate::source::{
    Condition, LogMatcher, LogQuery, QueryBuilder, Record, SearchClause, SearchQuery,
};
use crate::value::Value;

/// Membership match: keeps rows whose column equals any of the chosen
/// values. Falsy list elements never reach a backend.
pub struct MultiSelectFilter {
    core: FilterCore,
    options: Vec<String>,
}

pub(crate) const TYPE: FilterType = FilterType {
    key: "MultiSelectFilter",
    params: &[
        ParamSpec::optional("label"),
        ParamSpec::optional("cast"),
        ParamSpec::optional("options"),
    ],
    build: MultiSelectFilter::build,
};

impl MultiSelectFilter {
    fn build(ctx: BuildContext<'_>) -> Result<Box<dyn Filter>, Error> {
        let mut core = FilterCore::from_build(&ctx);
        core.set_view_path("multi_select");
        let options = ctx.list("options").unwrap_or_default();
        if !options.is_empty() {
            core.set_attribute(
                "options",
                Value::List(options.iter().map(|o| Value::from(o.clone())).collect()),
            );
        }
        Ok(Box::new(MultiSelectFilter { core, options }))
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    fn chosen(&self) -> Vec<Value> {
        match self.core.value() {
            Value::List(items) => items.iter().filter(|v| !v.is_falsy()).cloned().collect(),
            v if !v.is_blank() => vec![v.clone()],
            _ => Vec::new(),
        }
    }
}

impl Filter for MultiSelectFilter {
    fn core(&self) -> &FilterCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut FilterCore {
        &mut self.core
    }

    fn apply_query(&self, mut query: QueryBuilder) -> QueryBuilder {
        query.push(Condition::In {
            field: self.core.name().to_string(),
            values: self.chosen(),
        });
        query
    }

    fn apply_records(&self, records: Vec<Record>) -> Vec<Record> {
        let chosen = self.chosen();
        records
            .into_iter()
            .filter(|record| {
                record
                    .get(self.core.name())
                    .map(|v| chosen.iter().any(|c| v.loose_eq(c)))
                    .unwrap_or(false)
            })
            .collect()
    }

    fn apply_search(&self, mut search: SearchQuery) -> SearchQuery {
        search.push(SearchClause::Terms {
            field: self.core.name().to_string(),
            values: self.chosen(),
        });
        search
    }

    fn apply_log(&self, mut log: LogQuery) -> LogQuery {
        log.push(LogMatcher::FieldIn {
            name: self.core.name().to_string(),
            values: self.chosen(),
        });
        log
    }
}
