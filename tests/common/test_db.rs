use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

const SCHEMA: &[&str] = &[
    "CREATE TABLE posts (id INTEGER PRIMARY KEY, title TEXT NOT NULL)",
    "CREATE TABLE users (id INTEGER PRIMARY KEY, name TEXT NOT NULL)",
    "CREATE TABLE comments (
        id INTEGER PRIMARY KEY,
        post_id INTEGER NOT NULL REFERENCES posts (id),
        author_id INTEGER NOT NULL REFERENCES users (id),
        comment TEXT NOT NULL,
        enabled BOOLEAN NOT NULL DEFAULT TRUE
    )",
];

const SEED: &[&str] = &[
    "INSERT INTO posts (id, title) VALUES (1, 'Cats'), (2, 'Dogs')",
    "INSERT INTO users (id, name) VALUES (1, 'ada'), (2, 'grace')",
    "INSERT INTO comments (id, post_id, author_id, comment, enabled) VALUES
        (1, 1, 1, 'cat pictures', TRUE),
        (2, 1, 2, 'try googling it', TRUE),
        (3, 2, 1, 'cat pictures', FALSE),
        (4, 2, 2, 'first!', TRUE),
        (5, 2, 1, 'try googling it', FALSE),
        (42, 1, 2, 'the answer', TRUE)",
];

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct CommentRow {
    pub id: i64,
    pub comment: String,
}

/// A single-connection in-memory database with the comment fixtures loaded.
///
/// Every connection to `sqlite::memory:` is its own database, so the pool must
/// never open a second one or drop the first.
pub async fn setup_pool() -> anyhow::Result<SqlitePool> {
    searchable::logging::init_structured_logging();

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await?;

    for statement in SCHEMA.iter().chain(SEED) {
        sqlx::query(statement).execute(&pool).await?;
    }

    Ok(pool)
}

/// Ids of the rows a scope returns, in id order
pub async fn comment_ids(scope: searchable::Scope, pool: &SqlitePool) -> anyhow::Result<Vec<i64>> {
    let rows: Vec<CommentRow> = scope.order_asc("comments.id").fetch_all(pool).await?;
    Ok(rows.into_iter().map(|row| row.id).collect())
}
