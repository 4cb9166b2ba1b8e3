use searchable::searchable::{ID_SEARCHES, TEXT_SEARCHES};
use searchable::{Condition, Entity, SearchTerm};
use serde_json::{json, Value};

fn first_arg(args: &[Value]) -> Value {
    args.first().cloned().unwrap_or_default()
}

/// Comments with the `enabled` default scope and a handful of named operations
pub fn comment_entity() -> Entity {
    Entity::builder("Comment")
        .belongs_to("post", "posts")
        .association("author", "users", "users.id = comments.author_id")
        .default_scope(Condition::eq("comments.enabled", json!(true)))
        .scope("snarky", |e, _| {
            Ok(e.all().where_eq("comments.comment", json!("cat pictures")))
        })
        .scope("smart", |e, _| {
            Ok(e.all().where_eq("comments.comment", json!("try googling it")))
        })
        .scope("by_post_title", |e, args| {
            Ok(e.all().joins(["post"])?.where_eq("posts.title", first_arg(args)))
        })
        .scope("by_author", |e, args| {
            Ok(e.all().joins(["author"])?.where_eq("users.name", first_arg(args)))
        })
        .scope("by_author_with_post", |e, args| {
            Ok(e.all()
                .joins(["author", "post"])?
                .where_eq("users.name", first_arg(args)))
        })
        .scope("preloading_author", |e, _| {
            Ok(e.all().preload(["author"])?.where_eq("comments.post_id", json!(2)))
        })
        .scope("unconstrained", |e, _| Ok(e.unscoped()))
        .scope(ID_SEARCHES, |e, args| e.searchable_by_id(first_arg(args), None))
        .scope(TEXT_SEARCHES, |e, args| {
            e.simple_search(SearchTerm::from(first_arg(args)), "comments.comment")
        })
        .build()
}

pub fn post_entity() -> Entity {
    Entity::builder("Post")
        .has_many("comments", "comments")
        .build()
}
