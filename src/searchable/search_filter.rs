//! Guarded search filtering: skip the filter entirely when the search term is
//! empty, or when the entity's own guard says so.

use crate::entity::{Entity, EntityBuilder};
use crate::error::Result;
use crate::query_builder::Scope;
use regex::Regex;
use serde_json::Value;
use std::fmt;
use std::sync::{Arc, LazyLock};
use tracing::trace;

static NUMERIC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\A\s*[0-9]+\s*\z").expect("valid numeric pattern"));

/// A search term as received from request parameters. Never absent: missing
/// input is the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SearchTerm(String);

impl SearchTerm {
    pub fn new(term: impl Into<String>) -> Self {
        Self(term.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Blank after trimming
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Digits only, surrounding whitespace aside
    pub fn is_numeric(&self) -> bool {
        NUMERIC_RE.is_match(&self.0)
    }

    /// The id this term names, when it is numeric and fits an `i64`
    pub fn as_id(&self) -> Option<i64> {
        if self.is_numeric() {
            self.0.trim().parse().ok()
        } else {
            None
        }
    }
}

impl fmt::Display for SearchTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SearchTerm {
    fn from(term: &str) -> Self {
        Self(term.to_string())
    }
}

impl From<String> for SearchTerm {
    fn from(term: String) -> Self {
        Self(term)
    }
}

impl From<&String> for SearchTerm {
    fn from(term: &String) -> Self {
        Self(term.clone())
    }
}

impl From<&SearchTerm> for SearchTerm {
    fn from(term: &SearchTerm) -> Self {
        term.clone()
    }
}

impl<T: Into<SearchTerm>> From<Option<T>> for SearchTerm {
    fn from(term: Option<T>) -> Self {
        term.map(Into::into).unwrap_or_default()
    }
}

impl From<i64> for SearchTerm {
    fn from(term: i64) -> Self {
        Self(term.to_string())
    }
}

impl From<&Value> for SearchTerm {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => Self::default(),
            Value::String(s) => Self(s.clone()),
            other => Self(other.to_string()),
        }
    }
}

impl From<Value> for SearchTerm {
    fn from(value: Value) -> Self {
        Self::from(&value)
    }
}

impl From<SearchTerm> for Value {
    fn from(term: SearchTerm) -> Self {
        Value::String(term.0)
    }
}

impl Entity {
    /// Whether `term` skips filtering for this entity
    pub fn skips_search(&self, term: &SearchTerm) -> bool {
        match self.search_guard() {
            Some(guard) => guard(term.as_str()),
            None => term.is_blank(),
        }
    }

    /// Return the unfiltered scope when the guard skips `term`, else build the
    /// filtered scope with `fallback`
    pub fn search_filter<T, F>(&self, term: T, fallback: F) -> Result<Scope>
    where
        T: Into<SearchTerm>,
        F: FnOnce() -> Result<Scope>,
    {
        let term = term.into();
        if self.skips_search(&term) {
            trace!(entity = %self.name(), term = %term, "Search term skipped, returning unfiltered scope");
            Ok(self.all())
        } else {
            fallback()
        }
    }
}

impl EntityBuilder {
    /// Replace the default blank-term guard for this entity
    pub fn define_search_filter<F>(mut self, guard: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.search_guard = Some(Arc::new(guard));
        self
    }
}
