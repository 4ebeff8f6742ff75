//! Variant dispatch across the closed data source set.

use anyhow::Result;
use tablesift_core::{
    make, Condition, DataSource, Filter, FilterCore, LogMatcher, LogQuery, QueryBuilder,
    SearchClause, SearchQuery, Value,
};
use tablesift_tests::{order_records, request};

fn every_source() -> Vec<DataSource> {
    vec![
        DataSource::Query(QueryBuilder::new("orders")),
        DataSource::Records(order_records()),
        DataSource::Search(SearchQuery::new("orders")),
        DataSource::Log(LogQuery::new("orders")),
        DataSource::Unknown(serde_json::json!({"backend": "graph"})),
    ]
}

#[test]
fn test_inactive_filter_touches_nothing() -> Result<()> {
    for source in every_source() {
        let filter = make("text|label:Customer", "customer", &())?;
        assert!(!filter.is_active());
        let before = source.clone();
        assert_eq!(filter.apply(source), before);
    }
    Ok(())
}

#[test]
fn test_text_filter_over_records_and_search() -> Result<()> {
    let request = request(&[("f_customer", Value::from("ann"))]);

    let filter = make("text", "customer", &request)?;
    match filter.apply(DataSource::Records(order_records())) {
        // "Annika Larsson" and "Joanne Park" both contain "ann"
        DataSource::Records(records) => assert_eq!(records.len(), 2),
        other => panic!("unexpected variant: {:?}", other.variant()),
    }

    let filter = make("text", "customer", &request)?;
    match filter.apply(DataSource::Search(SearchQuery::new("orders"))) {
        DataSource::Search(search) => assert_eq!(
            search.clauses(),
            &[SearchClause::Match { field: "customer".to_string(), text: "ann".to_string() }]
        ),
        other => panic!("unexpected variant: {:?}", other.variant()),
    }
    Ok(())
}

#[test]
fn test_multi_select_drops_falsy_elements() -> Result<()> {
    let request = request(&[(
        "f_kind",
        Value::List(vec![Value::from("buy"), Value::from(""), Value::from("sell")]),
    )]);
    let filter = make("multi_select", "kind", &request)?;
    match filter.apply(DataSource::Query(QueryBuilder::new("orders"))) {
        DataSource::Query(query) => assert_eq!(
            query.to_sql(),
            r#"SELECT * FROM "orders" WHERE "kind" IN ('buy', 'sell')"#
        ),
        other => panic!("unexpected variant: {:?}", other.variant()),
    }
    Ok(())
}

#[test]
fn test_date_range_across_backends() -> Result<()> {
    let window = Value::List(vec![Value::from("2024-01-10"), Value::from("2024-01-20")]);

    let filter = make("date_range", "created_at", &request(&[("f_created_at", window.clone())]))?;
    match filter.apply(DataSource::Query(QueryBuilder::new("orders"))) {
        DataSource::Query(query) => assert_eq!(
            query.to_sql(),
            r#"SELECT * FROM "orders" WHERE "created_at" BETWEEN '2024-01-10' AND '2024-01-20'"#
        ),
        other => panic!("unexpected variant: {:?}", other.variant()),
    }

    let filter = make("date_range", "created_at", &request(&[("f_created_at", window.clone())]))?;
    match filter.apply(DataSource::Records(order_records())) {
        DataSource::Records(records) => assert_eq!(records.len(), 1),
        other => panic!("unexpected variant: {:?}", other.variant()),
    }

    let filter = make("date_range", "created_at", &request(&[("f_created_at", window.clone())]))?;
    match filter.apply(DataSource::Log(LogQuery::new("orders"))) {
        DataSource::Log(log) => assert_eq!(
            log.matchers(),
            &[LogMatcher::TimeRange {
                from: Some("2024-01-10".to_string()),
                to: Some("2024-01-20".to_string()),
            }]
        ),
        other => panic!("unexpected variant: {:?}", other.variant()),
    }
    Ok(())
}

struct QueryOnly {
    core: FilterCore,
}

impl Filter for QueryOnly {
    fn core(&self) -> &FilterCore {
        &self.core
    }
    fn core_mut(&mut self) -> &mut FilterCore {
        &mut self.core
    }
    fn apply_query(&self, mut query: QueryBuilder) -> QueryBuilder {
        query.push(Condition::Like {
            field: self.core.name().to_string(),
            pattern: self.core.value().to_string(),
        });
        query
    }
}

#[test]
fn test_unimplemented_hooks_pass_through() {
    let mut core = FilterCore::new("note");
    core.set_value(Value::from("x"), false);
    let filter = QueryOnly { core };

    let search = SearchQuery::new("orders");
    match filter.apply(DataSource::Search(search.clone())) {
        DataSource::Search(after) => assert_eq!(after, search),
        other => panic!("unexpected variant: {:?}", other.variant()),
    }

    match filter.apply(DataSource::Query(QueryBuilder::new("orders"))) {
        DataSource::Query(query) => assert_eq!(query.conditions().len(), 1),
        other => panic!("unexpected variant: {:?}", other.variant()),
    }
}
