use serde_json::json;
use toolflow_core::{validate_value, Schema};

fn idea_input() -> Schema {
    Schema::object()
        .required_property("topic", Schema::string())
        .required_property("keywords", Schema::string())
}

#[test]
fn valid_object_passes() {
    validate_value(&idea_input(), &json!({"topic": "x", "keywords": "y"})).unwrap();
}

#[test]
fn reports_every_violation_with_field_paths() {
    let err = validate_value(&idea_input(), &json!({"topic": 5})).unwrap_err();
    assert_eq!(err.violations.len(), 2);
    let topic: Vec<_> = err.at("$.topic").collect();
    assert_eq!(topic.len(), 1);
    assert!(topic[0].message.contains("expected string, got integer"));
    assert_eq!(err.at("$.keywords").count(), 1);
}

#[test]
fn empty_schema_accepts_anything() {
    for v in [json!(null), json!(1), json!("s"), json!([1]), json!({"a": 1})] {
        validate_value(&Schema::any(), &v).unwrap();
    }
}

#[test]
fn integer_accepts_integral_floats_only() {
    validate_value(&Schema::integer(), &json!(4)).unwrap();
    validate_value(&Schema::integer(), &json!(4.0)).unwrap();
    assert!(validate_value(&Schema::integer(), &json!(4.5)).is_err());
    validate_value(&Schema::number(), &json!(4)).unwrap();
}

#[test]
fn array_items_are_checked_with_indexed_paths() {
    let schema = Schema::object().required_property(
        "ideas",
        Schema::array(Schema::object().required_property("idea", Schema::string())),
    );
    let err = validate_value(
        &schema,
        &json!({"ideas": [{"idea": "A"}, {"idea": 2}, {}]}),
    )
    .unwrap_err();
    assert_eq!(err.at("$.ideas[1].idea").count(), 1);
    assert_eq!(err.at("$.ideas[2].idea").count(), 1);
}

#[test]
fn closed_objects_reject_undeclared_keys() {
    let schema = Schema::object().property("a", Schema::string()).closed();
    let err = validate_value(&schema, &json!({"a": "x", "b": 1})).unwrap_err();
    assert_eq!(err.at("$.b").count(), 1);
}

#[test]
fn enum_membership() {
    let schema: Schema = serde_json::from_value(json!({"enum": ["draft", "final"]})).unwrap();
    validate_value(&schema, &json!("draft")).unwrap();
    let err = validate_value(&schema, &json!("other")).unwrap_err();
    assert_eq!(err.at("$").count(), 1);
}

#[test]
fn root_type_mismatch_reports_root_path() {
    let err = validate_value(&idea_input(), &json!("not an object")).unwrap_err();
    assert_eq!(err.violations.len(), 1);
    assert_eq!(err.violations[0].path, "$");
    assert!(err.violations[0].message.contains("expected object, got string"));
}
