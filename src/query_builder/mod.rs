//! # Query Builder System
//!
//! The relational scope abstraction the searchable combinators are layered on.
//!
//! ## Key Components
//!
//! - [`builder`] - [`Scope`], an immutable-by-value query with SQL generation and
//!   materialization through any `sqlx` pool
//! - [`conditions`] - WHERE conditions, nested AND/OR groups and named bindings
//! - [`joins`] - JOIN clauses and the four association requirement kinds
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use searchable::query_builder::{Condition, Scope};
//!
//! let scope = Scope::new(model)
//!     .where_eq("comments.enabled", serde_json::json!(true))
//!     .joins(["post"])?;
//! let sql = scope.build_sql();
//! ```

pub mod builder;
pub mod conditions;
pub mod joins;

pub use builder::Scope;
pub use conditions::{quote, Condition, LogicalOperator, WhereClause};
pub use joins::{Join, JoinKind, JoinType, JoinValues};
