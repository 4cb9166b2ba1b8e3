use searchable::model::Model;
use searchable::query_builder::{Condition, JoinKind, Scope};
use searchable::{Entity, SearchableError};
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::Arc;

fn comments() -> Entity {
    Entity::builder("Comment")
        .belongs_to("post", "posts")
        .association("author", "users", "users.id = comments.author_id")
        .build()
}

#[test]
fn test_basic_query_building() {
    let scope = Scope::new(Arc::new(Model::new("Comment")))
        .select(&["comments.id", "comments.comment"])
        .where_eq("comments.post_id", json!(1))
        .order_desc("comments.id");

    let sql = scope.build_sql();
    assert!(sql.contains("SELECT comments.id, comments.comment"));
    assert!(sql.contains("FROM comments"));
    assert!(sql.contains("WHERE comments.post_id = 1"));
    assert!(sql.ends_with("ORDER BY comments.id DESC"));
}

#[test]
fn test_join_query_building() {
    let scope = comments()
        .all()
        .joins(["post"])
        .unwrap()
        .eager_load(["author"])
        .unwrap()
        .where_eq("posts.title", json!("Cats"));

    let sql = scope.build_sql();
    assert!(sql.contains("INNER JOIN posts ON posts.id = comments.post_id"));
    assert!(sql.contains("LEFT OUTER JOIN users ON users.id = comments.author_id"));
}

#[test]
fn test_preload_is_tracked_but_not_joined() {
    let scope = comments().all().preload(["author"]).unwrap();
    assert_eq!(scope.join_values().get(JoinKind::Preload), ["author".to_string()]);
    assert!(!scope.build_sql().contains("JOIN"));
}

#[test]
fn test_association_requested_twice_is_joined_once() {
    let scope = comments()
        .all()
        .joins(["post"])
        .unwrap()
        .includes(["post"])
        .unwrap();
    assert_eq!(scope.build_sql().matches("JOIN posts").count(), 1);
}

#[test]
fn test_unknown_association() {
    let err = comments().all().joins(["tags"]).unwrap_err();
    assert_eq!(err, SearchableError::unknown_association("Comment", "tags"));
}

#[test]
fn test_parameterized_where() {
    let mut bindings = BTreeMap::new();
    bindings.insert("search".to_string(), json!("o'brien"));
    let scope = comments()
        .all()
        .where_eq("comments.post_id", json!(1))
        .where_params("comments.comment = :search", bindings);

    assert!(scope
        .build_sql()
        .ends_with("WHERE comments.post_id = 1 AND (comments.comment = 'o''brien')"));
}

#[test]
fn test_leaf_constraint() {
    let entity = comments();
    assert!(entity.all().leaf_constraint().is_none());

    let single = entity.all().where_eq("comments.id", json!(1));
    assert_eq!(
        single.leaf_constraint(),
        Some(Condition::eq("comments.id", json!(1)))
    );

    let many = single.where_eq("comments.post_id", json!(2));
    assert_eq!(
        many.leaf_constraint().map(|c| c.to_sql()),
        Some("(comments.id = 1 AND comments.post_id = 2)".to_string())
    );
}
