use crate::common::{comment_entity, comment_ids, setup_pool, CommentRow};
use searchable::{Entity, SearchValue, SearchableError};
use serde_json::json;

#[tokio::test]
async fn test_searchable_by_id() -> anyhow::Result<()> {
    let pool = setup_pool().await?;
    let comments = comment_entity();

    let scope = comments.searchable_by_id("42", None)?;
    assert_eq!(comment_ids(scope, &pool).await?, vec![42]);

    let scope = comments.searchable_by_id(" 42 ", None)?;
    assert_eq!(comment_ids(scope, &pool).await?, vec![42]);

    let scope = comments.searchable_by_id("abc", None)?;
    assert!(comment_ids(scope, &pool).await?.is_empty());

    let scope = comments.searchable_by_id("", None)?;
    assert_eq!(comment_ids(scope, &pool).await?, vec![1, 2, 4, 42]);

    // Default scope still applies to an id hit
    let scope = comments.searchable_by_id("3", None)?;
    assert!(comment_ids(scope, &pool).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_fetch_optional_by_id() -> anyhow::Result<()> {
    let pool = setup_pool().await?;
    let comments = comment_entity();

    let row: Option<CommentRow> = comments.searchable_by_id("42", None)?.fetch_optional(&pool).await?;
    assert_eq!(
        row,
        Some(CommentRow {
            id: 42,
            comment: "the answer".to_string(),
        })
    );

    let row: Option<CommentRow> = comments.searchable_by_id("abc", None)?.fetch_optional(&pool).await?;
    assert!(row.is_none());
    Ok(())
}

#[tokio::test]
async fn test_searchable_by_id_with_custom_condition() -> anyhow::Result<()> {
    let pool = setup_pool().await?;
    let comments = comment_entity();

    let scope = comments.searchable_by_id("2", Some("comments.author_id = :search"))?;
    assert_eq!(comment_ids(scope, &pool).await?, vec![2, 4, 42]);
    Ok(())
}

#[tokio::test]
async fn test_search_filter_guard() -> anyhow::Result<()> {
    let pool = setup_pool().await?;
    let comments = comment_entity();

    let scope = comments.search_filter("   ", || Ok(comments.none()))?;
    assert_eq!(comment_ids(scope, &pool).await?, vec![1, 2, 4, 42]);

    let scope = comments.search_filter("cat", || comments.call("snarky", &[]))?;
    assert_eq!(comment_ids(scope, &pool).await?, vec![1]);
    Ok(())
}

#[tokio::test]
async fn test_custom_search_guard() -> anyhow::Result<()> {
    let pool = setup_pool().await?;
    let comments = Entity::builder("Comment")
        .define_search_filter(|term| term.trim().len() < 3)
        .build();

    let scope = comments.simple_search("ca", "comments.comment")?;
    assert_eq!(comment_ids(scope, &pool).await?, vec![1, 2, 3, 4, 5, 42]);

    let scope = comments.simple_search("cat", "comments.comment")?;
    assert_eq!(comment_ids(scope, &pool).await?, vec![1, 3]);
    Ok(())
}

#[tokio::test]
async fn test_simple_search() -> anyhow::Result<()> {
    let pool = setup_pool().await?;
    let comments = comment_entity();

    let scope = comments.simple_search("cat", "comments.comment")?;
    assert_eq!(comment_ids(scope, &pool).await?, vec![1]);

    let scope = comments.simple_search(vec!["cat", "googl"], "comments.comment")?;
    assert_eq!(comment_ids(scope, &pool).await?, vec![1, 2]);

    let scope = comments.simple_search(vec!["cat", ""], "comments.comment")?;
    assert_eq!(comment_ids(scope, &pool).await?, vec![1, 2, 4, 42]);

    let pairs = json!({"comments.post_id": 2});
    let pairs = pairs.as_object().cloned().unwrap_or_default();
    let scope = comments.simple_search("anything", pairs)?;
    assert_eq!(comment_ids(scope, &pool).await?, vec![4]);
    Ok(())
}

#[tokio::test]
async fn test_matching_searchable() -> anyhow::Result<()> {
    let pool = setup_pool().await?;
    let comments = comment_entity();

    let scope = comments.matching_searchable("42")?;
    assert_eq!(comment_ids(scope, &pool).await?, vec![42]);

    let scope = comments.matching_searchable("answer")?;
    assert_eq!(comment_ids(scope, &pool).await?, vec![42]);

    let err = Entity::builder("Comment")
        .build()
        .matching_searchable("42")
        .unwrap_err();
    assert_eq!(err, SearchableError::unknown_operation("Comment", "id_searches"));
    Ok(())
}

#[tokio::test]
async fn test_widened_search() -> anyhow::Result<()> {
    let pool = setup_pool().await?;
    let comments = comment_entity();

    let texts = ["cat", "first"].map(SearchValue::from);
    let scope = comments.widened_search(&texts, "comments.comment")?;
    assert_eq!(comment_ids(scope, &pool).await?, vec![1, 4]);

    let ids = [SearchValue::from(1i64), SearchValue::from(42i64)];
    let scope = comments.widened_search(&ids, "comments.comment")?;
    assert_eq!(comment_ids(scope, &pool).await?, vec![1, 42]);

    let records = [SearchValue::record("Comment", 4)];
    let scope = comments.widened_search(&records, "comments.comment")?;
    assert_eq!(comment_ids(scope, &pool).await?, vec![4]);

    let mixed = [SearchValue::from("cat"), SearchValue::from(1i64)];
    let scope = comments.widened_search(&mixed, "comments.comment")?;
    assert!(comment_ids(scope, &pool).await?.is_empty());

    let foreign = [SearchValue::record("Post", 1)];
    let scope = comments.widened_search(&foreign, "comments.comment")?;
    assert!(comment_ids(scope, &pool).await?.is_empty());
    Ok(())
}
