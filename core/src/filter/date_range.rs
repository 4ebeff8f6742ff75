use chrono::NaiveDate;

use crate::error::Error;
use crate::filter::date::{ensure_date, parse_date, DEFAULT_FORMAT};
use crate::filter::{Filter, FilterCore};
use crate::registry::{BuildContext, FilterType, ParamSpec};
use crate::source::{
    CompareOp, Condition, LogMatcher, LogQuery, QueryBuilder, Record, SearchClause, SearchQuery,
};
use crate::value::Value;

/// Inclusive date window. The bound value is a two-element list
/// `[from, to]`; a blank end leaves that side open.
pub struct DateRangeFilter {
    core: FilterCore,
    format: String,
}

pub(crate) const TYPE: FilterType = FilterType {
    key: "DateRangeFilter",
    params: &[
        ParamSpec::optional("label"),
        ParamSpec::with_default("format", DEFAULT_FORMAT),
    ],
    build: DateRangeFilter::build,
};

impl DateRangeFilter {
    fn build(ctx: BuildContext<'_>) -> Result<Box<dyn Filter>, Error> {
        let mut core = FilterCore::from_build(&ctx);
        core.set_view_path("date_range");
        let format = ctx.scalar("format").unwrap_or(DEFAULT_FORMAT).to_string();
        ensure_date(core.value(), &format)?;
        Ok(Box::new(DateRangeFilter { core, format }))
    }

    fn bound_strings(&self) -> (Option<String>, Option<String>) {
        match self.core.value() {
            Value::List(items) => {
                let mut items = items.iter();
                let from = items.next().filter(|v| !v.is_falsy()).map(|v| v.to_string());
                let to = items.next().filter(|v| !v.is_falsy()).map(|v| v.to_string());
                (from, to)
            }
            // A bare scalar reads as an open-ended "from".
            v if !v.is_blank() => (Some(v.to_string()), None),
            _ => (None, None),
        }
    }

    fn bound_dates(&self) -> (Option<NaiveDate>, Option<NaiveDate>) {
        let (from, to) = self.bound_strings();
        (
            from.and_then(|s| parse_date(&s, &self.format)),
            to.and_then(|s| parse_date(&s, &self.format)),
        )
    }
}

impl Filter for DateRangeFilter {
    fn core(&self) -> &FilterCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut FilterCore {
        &mut self.core
    }

    fn apply_query(&self, mut query: QueryBuilder) -> QueryBuilder {
        let field = self.core.name().to_string();
        match self.bound_strings() {
            (Some(from), Some(to)) => {
                query.push(Condition::Between {
                    field,
                    low: Value::String(from),
                    high: Value::String(to),
                });
            }
            (Some(from), None) => {
                query.push(Condition::Compare {
                    field,
                    op: CompareOp::GtEq,
                    value: Value::String(from),
                });
            }
            (None, Some(to)) => {
                query.push(Condition::Compare {
                    field,
                    op: CompareOp::LtEq,
                    value: Value::String(to),
                });
            }
            (None, None) => {}
        }
        query
    }

    fn apply_records(&self, records: Vec<Record>) -> Vec<Record> {
        let (from, to) = self.bound_dates();
        if from.is_none() && to.is_none() {
            return records;
        }
        records
            .into_iter()
            .filter(|record| {
                let date = record
                    .get(self.core.name())
                    .and_then(|v| parse_date(&v.to_string(), &self.format));
                match date {
                    Some(date) => {
                        from.map(|f| date >= f).unwrap_or(true)
                            && to.map(|t| date <= t).unwrap_or(true)
                    }
                    // Rows without a readable date cannot fall in the window.
                    None => false,
                }
            })
            .collect()
    }

    fn apply_search(&self, mut search: SearchQuery) -> SearchQuery {
        let (from, to) = self.bound_strings();
        search.push(SearchClause::Range {
            field: self.core.name().to_string(),
            from: from.map(Value::String),
            to: to.map(Value::String),
        });
        search
    }

    fn apply_log(&self, mut log: LogQuery) -> LogQuery {
        let (from, to) = self.bound_strings();
        log.push(LogMatcher::TimeRange { from, to });
        log
    }
}
