use chrono::NaiveDate;

use crate::error::Error;
use crate::filter::{Filter, FilterCore};
use crate::registry::{BuildContext, FilterType, ParamSpec};
use crate::source::{
    CompareOp, Condition, LogMatcher, LogQuery, QueryBuilder, Record, SearchClause, SearchQuery,
};
use crate::value::Value;

pub(super) const DEFAULT_FORMAT: &str = "%Y-%m-%d";

/// Single-day match on a date column.
pub struct DateFilter {
    core: FilterCore,
    format: String,
}

pub(crate) const TYPE: FilterType = FilterType {
    key: "DateFilter",
    params: &[
        ParamSpec::optional("label"),
        ParamSpec::with_default("format", DEFAULT_FORMAT),
    ],
    build: DateFilter::build,
};

impl DateFilter {
    fn build(ctx: BuildContext<'_>) -> Result<Box<dyn Filter>, Error> {
        let mut core = FilterCore::from_build(&ctx);
        core.set_view_path("date");
        let format = ctx.scalar("format").unwrap_or(DEFAULT_FORMAT).to_string();
        ensure_date(core.value(), &format)?;
        Ok(Box::new(DateFilter { core, format }))
    }

    fn bound_date(&self) -> Option<NaiveDate> {
        parse_date(&self.core.value().to_string(), &self.format)
    }
}

impl Filter for DateFilter {
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
        let bound = match self.bound_date() {
            Some(date) => date,
            None => return records,
        };
        records
            .into_iter()
            .filter(|record| {
                record
                    .get(self.core.name())
                    .and_then(|v| parse_date(&v.to_string(), &self.format))
                    .map(|date| date == bound)
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

pub(super) fn parse_date(s: &str, format: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), format).ok()
}

/// Construction-time check: a non-blank bound value must parse with the
/// configured format. Lists check each non-falsy element.
pub(super) fn ensure_date(value: &Value, format: &str) -> Result<(), Error> {
    match value {
        Value::List(items) => {
            for item in items {
                if !item.is_falsy() {
                    ensure_date(item, format)?;
                }
            }
            Ok(())
        }
        v if v.is_blank() => Ok(()),
        v => {
            let s = v.to_string();
            parse_date(&s, format).map(|_| ()).ok_or(Error::Date {
                value: s,
                format: format.to_string(),
            })
        }
    }
}
