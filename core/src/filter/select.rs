use crate::error::Error;
use crate::filter::{Filter, FilterCore};
use crate::registry::{BuildContext, FilterType, ParamSpec};
use crate::source::{
    CompareOp, Condition, LogMatcher, LogQuery, QueryBuilder, Record, SearchClause, SearchQuery,
};
use crate::value::Value;

/// Exact match against one column, usually rendered as a dropdown. The
/// option list, when given, is display metadata only and travels to the
/// widget through the attributes.
pub struct SelectFilter {
    core: FilterCore,
    options: Vec<String>,
}

pub(crate) const TYPE: FilterType = FilterType {
    key: "SelectFilter",
    params: &[
        ParamSpec::optional("label"),
        ParamSpec::optional("cast"),
        ParamSpec::optional("options"),
    ],
    build: SelectFilter::build,
};

impl SelectFilter {
    fn build(ctx: BuildContext<'_>) -> Result<Box<dyn Filter>, Error> {
        let mut core = FilterCore::from_build(&ctx);
        core.set_view_path("select");
        let options = ctx.list("options").unwrap_or_default();
        if !options.is_empty() {
            core.set_attribute(
                "options",
                Value::List(options.iter().map(|o| Value::from(o.clone())).collect()),
            );
        }
        Ok(Box::new(SelectFilter { core, options }))
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }
}

impl Filter for SelectFilter {
    fn core(&self) -> &FilterCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut FilterCore {
        &mut self.core
    }

    fn apply_query(&self, mut query: QueryBuilder) -> QueryBuilder {
        query.push(Condition::Compare {
            field: self.core.name().to_string(),
            op: CompareOp::Eq,
            value: self.core.value().clone(),
        });
        query
    }

    fn apply_records(&self, records: Vec<Record>) -> Vec<Record> {
        let bound = self.core.value();
        records
            .into_iter()
            .filter(|record| {
                record
                    .get(self.core.name())
                    .map(|v| v.loose_eq(bound))
                    .unwrap_or(false)
            })
            .collect()
    }

    fn apply_search(&self, mut search: SearchQuery) -> SearchQuery {
        search.push(SearchClause::Term {
            field: self.core.name().to_string(),
            value: self.core.value().clone(),
        });
        search
    }

    fn apply_log(&self, mut log: LogQuery) -> LogQuery {
        log.push(LogMatcher::Field {
            name: self.core.name().to_string(),
            value: self.core.value().clone(),
        });
        log
    }
}
