use crate::error::Error;
use crate::filter::{Filter, FilterCore};
use crate::registry::{BuildContext, FilterType, ParamSpec};
use crate::source::{
    Condition, LogMatcher, LogQuery, QueryBuilder, Record, SearchClause, SearchQuery,
};

/// Substring match over a single column.
pub struct TextFilter {
    core: FilterCore,
}

pub(crate) const TYPE: FilterType = FilterType {
    key: "TextFilter",
    params: &[ParamSpec::optional("label"), ParamSpec::optional("cast")],
    build: TextFilter::build,
};

impl TextFilter {
    fn build(ctx: BuildContext<'_>) -> Result<Box<dyn Filter>, Error> {
        let mut core = FilterCore::from_build(&ctx);
        core.set_view_path("text");
        Ok(Box::new(TextFilter { core }))
    }

    fn needle(&self) -> String {
        self.core.value().to_string()
    }
}

impl Filter for TextFilter {
    fn core(&self) -> &FilterCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut FilterCore {
        &mut self.core
    }

    fn apply_query(&self, mut query: QueryBuilder) -> QueryBuilder {
        query.push(Condition::Like {
            field: self.core.name().to_string(),
            pattern: format!("%{}%", self.needle()),
        });
        query
    }

    fn apply_records(&self, records: Vec<Record>) -> Vec<Record> {
        let needle = self.needle().to_lowercase();
        records
            .into_iter()
            .filter(|record| {
                record
                    .get(self.core.name())
                    .map(|v| v.to_string().to_lowercase().contains(&needle))
                    .unwrap_or(false)
            })
            .collect()
    }

    fn apply_search(&self, mut search: SearchQuery) -> SearchQuery {
        search.push(SearchClause::Match {
            field: self.core.name().to_string(),
            text: self.needle(),
        });
        search
    }

    fn apply_log(&self, mut log: LogQuery) -> LogQuery {
        log.push(LogMatcher::Contains {
            name: self.core.name().to_string(),
            needle: self.needle(),
        });
        log
    }
}
