//! Spec string to filtered data source, the whole path.

use anyhow::Result;
use tablesift_core::{
    make, CastPolicy, DataSource, Filter, LogMatcher, LogQuery, QueryBuilder, Value,
};
use tablesift_tests::{order_records, request};

#[test]
fn test_select_spec_to_query() -> Result<()> {
    let request = request(&[("f_status", Value::from("2"))]);
    let filter = make("select|label:Status|cast:int", "status", &request)?;

    assert_eq!(filter.core().label(), Some("Status"));
    assert_eq!(filter.core().cast(), CastPolicy::Int);
    assert_eq!(filter.core().value(), &Value::Int(2));
    assert!(filter.is_active());

    match filter.apply(DataSource::Query(QueryBuilder::new("orders"))) {
        DataSource::Query(query) => {
            assert_eq!(
                query.to_sql(),
                r#"SELECT * FROM "orders" WHERE "status" = 2"#
            );
        }
        other => panic!("query did not stay a query: {:?}", other.variant()),
    }
    Ok(())
}

#[test]
fn test_select_spec_against_every_other_variant() -> Result<()> {
    let request = request(&[("f_status", Value::from("2"))]);

    // Each construction binds and casts once, so build a fresh instance per
    // data source, the way one request cycle would.
    let filter = make("select|cast:int", "status", &request)?;
    let kept = filter.apply(DataSource::Records(order_records()));
    match kept {
        DataSource::Records(records) => assert_eq!(records.len(), 2),
        other => panic!("unexpected variant: {:?}", other.variant()),
    }

    let filter = make("select|cast:int", "status", &request)?;
    match filter.apply(DataSource::Log(LogQuery::new("orders"))) {
        DataSource::Log(log) => {
            assert_eq!(
                log.matchers(),
                &[LogMatcher::Field { name: "status".to_string(), value: Value::Int(2) }]
            );
        }
        other => panic!("unexpected variant: {:?}", other.variant()),
    }

    let filter = make("select|cast:int", "status", &request)?;
    let payload = serde_json::json!({"backend": "graph", "cursor": 17});
    match filter.apply(DataSource::Unknown(payload.clone())) {
        DataSource::Unknown(out) => assert_eq!(out, payload),
        other => panic!("unexpected variant: {:?}", other.variant()),
    }
    Ok(())
}

#[test]
fn test_widget_carries_raw_submitted_value() -> Result<()> {
    let request = request(&[("f_status", Value::from("2"))]);
    let filter = make("select|label:Status|cast:int", "status", &request)?;

    let widget = filter.widget(&request);
    assert_eq!(widget.name, "status");
    assert_eq!(widget.label.as_deref(), Some("Status"));
    // raw string as submitted, not the cast bound value
    assert_eq!(widget.value, Some(Value::from("2")));
    assert_eq!(widget.theme, "default");
    assert_eq!(widget.view_path.as_deref(), Some("select"));
    Ok(())
}

#[test]
fn test_dotted_name_uses_one_field_key() -> Result<()> {
    let request = request(&[("f_user_status", Value::from("active"))]);
    let filter = make("select", "user.status", &request)?;

    assert!(filter.is_active());
    assert_eq!(filter.core().value(), &Value::from("active"));
    assert_eq!(filter.widget(&request).name, "user_status");
    Ok(())
}

#[test]
fn test_options_reach_the_widget() -> Result<()> {
    let filter = make("multi_select|options:buy,sell,hold", "kind", &())?;
    let widget = filter.widget(&());
    assert_eq!(
        widget.attributes.get("options"),
        Some(&Value::List(vec![
            Value::from("buy"),
            Value::from("sell"),
            Value::from("hold"),
        ]))
    );
    Ok(())
}
