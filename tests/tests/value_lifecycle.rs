//! Binding, casting, activity and validation over one request cycle.

use anyhow::Result;
use tablesift_core::{make, DataSource, Filter, FilterCore, Value};
use tablesift_tests::{request, AcceptAll, RejectAll};

struct Bare {
    core: FilterCore,
}

impl Filter for Bare {
    fn core(&self) -> &FilterCore {
        &self.core
    }
    fn core_mut(&mut self) -> &mut FilterCore {
        &mut self.core
    }
}

fn bare(name: &str) -> Bare {
    Bare { core: FilterCore::new(name) }
}

#[test]
fn test_activity_table() {
    let cases: Vec<(Value, bool)> = vec![
        (Value::from(""), false),
        (Value::Null, false),
        (Value::List(vec![]), false),
        (Value::List(vec![Value::from(""), Value::Null]), false),
        (Value::from("x"), true),
        (Value::List(vec![Value::from(""), Value::from("y")]), true),
    ];
    for (value, expected) in cases {
        let mut filter = bare("f");
        filter.set_value(value.clone(), true);
        assert_eq!(filter.is_active(), expected, "value {:?}", value);
    }
}

#[test]
fn test_zero_is_inactive_with_and_without_cast() -> Result<()> {
    // no cast: the bound integer zero is blank
    let mut filter = bare("count");
    filter.set_value(Value::Int(0), true);
    assert!(!filter.is_active());

    // integer cast: "0" becomes Int(0) at construction and stays inactive
    let request = request(&[("f_count", Value::from("0"))]);
    let filter = make("select|cast:int", "count", &request)?;
    assert_eq!(filter.core().value(), &Value::Int(0));
    assert!(!filter.is_active());
    Ok(())
}

#[test]
fn test_cast_round_trip() -> Result<()> {
    let req = request(&[("f_n", Value::from("42"))]);
    let filter = make("select|cast:int", "n", &req)?;
    assert_eq!(filter.core().value(), &Value::Int(42));

    let req = request(&[("f_n", Value::from("42"))]);
    let filter = make("select|cast:str", "n", &req)?;
    assert_eq!(filter.core().value(), &Value::from("42"));
    Ok(())
}

#[test]
fn test_value_is_not_recast_after_construction() -> Result<()> {
    let mut filter = make("select|cast:int", "n", &())?;
    // bound after construction: the cast window is over
    filter.set_value(Value::from("7"), true);
    assert_eq!(filter.core().value(), &Value::from("7"));
    Ok(())
}

#[test]
fn test_default_value_precedence() {
    let mut filter = bare("status");
    filter.set_default_value(Value::from("open"));
    assert_eq!(filter.core().value(), &Value::from("open"));

    let mut filter = bare("status");
    filter.set_value(Value::from("closed"), false);
    filter.set_default_value(Value::from("open"));
    assert_eq!(filter.core().value(), &Value::from("closed"));

    filter.set_value(Value::from("forced"), true);
    assert_eq!(filter.core().value(), &Value::from("forced"));
}

#[test]
fn test_inactive_filter_is_always_valid() {
    let mut filter = bare("status");
    assert!(filter.validate(&RejectAll("nope"), &()));
    assert_eq!(filter.core().error(), None);
}

#[test]
fn test_validation_failure_reaches_the_widget() {
    let request = request(&[("f_status", Value::from("##"))]);
    let mut filter = bare("status");
    filter.set_value(Value::from("##"), false);
    filter.core_mut().set_validators("alpha_num");
    filter.core_mut().set_label("Status");

    assert!(!filter.validate(&RejectAll("The Status field is invalid."), &request));
    let widget = filter.widget(&request);
    assert_eq!(widget.error.as_deref(), Some("The Status field is invalid."));
}

#[test]
fn test_validation_pass_leaves_no_error() {
    let mut filter = bare("status");
    filter.set_value(Value::from("ok"), false);
    assert!(filter.validate(&AcceptAll, &()));
    assert_eq!(filter.core().error(), None);
}

#[test]
fn test_sealed_after_apply() {
    let mut filter = bare("status");
    filter.set_value(Value::from("x"), false);
    let _ = filter.apply(DataSource::Records(vec![]));
    filter.set_value(Value::from("y"), true);
    assert_eq!(filter.core().value(), &Value::from("x"));
}
