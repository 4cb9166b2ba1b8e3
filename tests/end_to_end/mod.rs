//! Combined scopes materialized against the SQLite comment fixtures.

pub mod search;
