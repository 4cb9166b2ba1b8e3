//! # Searchable Combinators
//!
//! Entity-level search operations layered on [`crate::query_builder::Scope`].
//!
//! ## Key Components
//!
//! - [`search_filter`] - the guard deciding whether a term filters at all
//! - [`arguments`] - the argument forms an OR chain accepts and their resolution
//! - [`joins`] - per-chain accumulation of association requirements
//! - [`or_chain`] - OR-combination of resolved sub-scopes
//! - [`search`] - substring, id and kind-dispatched search
//! - [`vector`] - full-text vector predicates and their registration
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use searchable::entity::Entity;
//! use serde_json::json;
//!
//! let comments = Entity::builder("Comment")
//!     .default_scope(Condition::eq("comments.enabled", json!(true)))
//!     .scope("snarky", |e, _| Ok(e.all().where_eq("comments.comment", json!("cat pictures"))))
//!     .scope("smart", |e, _| Ok(e.all().where_eq("comments.comment", json!("try googling it"))))
//!     .build();
//!
//! let scope = comments.or_chain(["snarky", "smart"])?;
//! ```

pub mod arguments;
pub mod joins;
pub mod or_chain;
pub mod search;
pub mod search_filter;
pub mod vector;

pub use arguments::{ArgumentResolver, ChainArg};
pub use joins::JoinAccumulator;
pub use or_chain::OrChainBuilder;
pub use search::{SearchQuery, SearchTerms, SearchValue, ID_SEARCHES, TEXT_SEARCHES};
pub use search_filter::SearchTerm;
pub use vector::{TsQuery, VectorOptions, VectorQueryBuilder, MATCHING_VECTOR, NON_MATCHING_VECTOR};
