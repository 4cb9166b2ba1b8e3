use searchable::query_builder::conditions::*;
use serde_json::json;
use std::collections::BTreeMap;

#[test]
fn test_simple_condition() {
    let condition = Condition::Simple {
        field: "name".to_string(),
        operator: "=".to_string(),
        value: serde_json::Value::String("test".to_string()),
    };
    assert_eq!(condition.to_sql(), "name = 'test'");
}

#[test]
fn test_in_condition() {
    let condition = Condition::eq("id", json!([1, 2, 3]));
    assert_eq!(condition.to_sql(), "id IN (1, 2, 3)");
    assert_eq!(Condition::eq("id", json!([])).to_sql(), "1=0");
}

#[test]
fn test_null_condition() {
    assert_eq!(
        Condition::eq("deleted_at", serde_json::Value::Null).to_sql(),
        "deleted_at IS NULL"
    );
}

#[test]
fn test_contains_trims_and_escapes() {
    let condition = Condition::contains("comments.comment", "  it's ");
    assert_eq!(condition.to_sql(), "comments.comment LIKE '%it''s%'");
}

#[test]
fn test_or_groups_nest() {
    let condition = Condition::eq("a", json!(1))
        .or(Condition::eq("b", json!(2)))
        .or(Condition::raw("c > 3"));
    assert_eq!(condition.to_sql(), "((a = 1 OR b = 2) OR (c > 3))");
}

#[test]
fn test_parameterized_placeholders_match_whole_keys() {
    let mut bindings = BTreeMap::new();
    bindings.insert("search1".to_string(), json!("one"));
    bindings.insert("search10".to_string(), json!("ten"));
    let condition = Condition::parameterized("a = :search1 or b = :search10::text", bindings);
    assert_eq!(condition.to_sql(), "a = 'one' or b = 'ten'::text");
}

#[test]
fn test_unbound_placeholder_is_left_alone() {
    let condition = Condition::parameterized("a = :missing", BTreeMap::new());
    assert_eq!(condition.to_sql(), "a = :missing");
}

#[test]
fn test_where_clause_rendering() {
    assert_eq!(WhereClause::and(vec![]).to_sql(), "1=1");
    assert_eq!(
        WhereClause::and(vec![Condition::eq("a", json!(true))]).to_sql(),
        "a = true"
    );
    assert_eq!(
        WhereClause::or(vec![Condition::eq("a", json!(1)), Condition::always_false()]).to_sql(),
        "(a = 1 OR (1=0))"
    );
}

#[test]
fn test_from_pairs() {
    let pairs = json!({"comments.post_id": 7, "comments.enabled": true});
    let conditions = Condition::from_pairs(pairs.as_object().unwrap());
    assert_eq!(conditions.len(), 2);
    assert!(conditions.contains(&Condition::eq("comments.post_id", json!(7))));
}
