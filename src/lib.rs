#![allow(clippy::doc_markdown)] // Allow technical terms like PostgreSQL, SQLx in docs
#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Searchable Scopes
//!
//! Scope combination on top of a relational query builder.
//!
//! ## Overview
//!
//! Given several independently built sub-scopes, each a predicate plus a set of
//! join / eager-load / preload / include requirements, produce one scope whose
//! predicate is the OR of the sub-scopes' leaf conditions and whose association
//! requirements are the deduplicated union of theirs, applied once. On top of
//! that sit guarded search-term filtering and full-text "vector" predicates with
//! match and non-match modes.
//!
//! ## Module Organization
//!
//! - [`query_builder`] - scopes, conditions and joins rendered to SQL
//! - [`model`] - table metadata, associations and the default scope
//! - [`entity`] - entities and their setup-time operation registry
//! - [`searchable`] - OR chains, search guards, search patterns and vectors
//! - [`config`] - configuration management
//! - [`error`] - structured error handling
//! - [`logging`] - structured logging setup
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use searchable::{Condition, Entity};
//! use serde_json::json;
//!
//! # fn example() -> searchable::Result<()> {
//! let comments = Entity::builder("Comment")
//!     .belongs_to("post", "posts")
//!     .default_scope(Condition::eq("comments.enabled", json!(true)))
//!     .scope("snarky", |e, _| Ok(e.all().where_eq("comments.comment", json!("cat pictures"))))
//!     .scope("smart", |e, _| Ok(e.all().where_eq("comments.comment", json!("try googling it"))))
//!     .build();
//!
//! let scope = comments.or_chain(["snarky", "smart"])?;
//! println!("{}", scope.build_sql());
//! # Ok(())
//! # }
//! ```
//!
//! ## Testing
//!
//! ```bash
//! cargo test --lib    # Unit tests
//! cargo test          # All tests, including in-memory SQLite end-to-end checks
//! ```

pub mod config;
pub mod entity;
pub mod error;
pub mod logging;
pub mod model;
pub mod query_builder;
pub mod searchable;

pub use config::SearchableConfig;
pub use entity::{Entity, EntityBuilder, Operation, OperationRegistry};
pub use error::{Result, SearchableError};
pub use model::{Association, Model};
pub use query_builder::{Condition, JoinKind, Scope};
pub use searchable::{
    ChainArg, SearchQuery, SearchTerm, SearchTerms, SearchValue, TsQuery, VectorOptions,
};
