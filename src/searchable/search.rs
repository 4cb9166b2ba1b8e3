//! Higher-level search patterns: substring match, id match and dispatch on the
//! kind of the search values.
//!
//! None of these surface an error for bad search input. Blank terms degrade to
//! the unfiltered scope; malformed or mixed input degrades to the contradiction
//! scope.

use super::{ChainArg, SearchTerm};
use crate::entity::Entity;
use crate::error::{Result, SearchableError};
use crate::query_builder::{Condition, Scope};
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;
use tracing::debug;

/// Operation names `matching_searchable` routes to by default
pub const ID_SEARCHES: &str = "id_searches";
pub const TEXT_SEARCHES: &str = "text_searches";

/// What a simple search matches each term against
#[derive(Debug, Clone, PartialEq)]
pub enum SearchQuery {
    /// Substring match against this column
    Column(String),
    /// Equality match on every column/value pair; the term only gates the filter
    Conditions(Map<String, Value>),
}

impl From<&str> for SearchQuery {
    fn from(column: &str) -> Self {
        SearchQuery::Column(column.to_string())
    }
}

impl From<String> for SearchQuery {
    fn from(column: String) -> Self {
        SearchQuery::Column(column)
    }
}

impl From<Map<String, Value>> for SearchQuery {
    fn from(conditions: Map<String, Value>) -> Self {
        SearchQuery::Conditions(conditions)
    }
}

/// One or many search terms
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchTerms(Vec<SearchTerm>);

impl SearchTerms {
    pub fn iter(&self) -> std::slice::Iter<'_, SearchTerm> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for SearchTerms {
    fn from(term: &str) -> Self {
        Self(vec![term.into()])
    }
}

impl From<String> for SearchTerms {
    fn from(term: String) -> Self {
        Self(vec![term.into()])
    }
}

impl From<SearchTerm> for SearchTerms {
    fn from(term: SearchTerm) -> Self {
        Self(vec![term])
    }
}

impl<T: Into<SearchTerm>> From<Vec<T>> for SearchTerms {
    fn from(terms: Vec<T>) -> Self {
        Self(terms.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<SearchTerm>, const N: usize> From<[T; N]> for SearchTerms {
    fn from(terms: [T; N]) -> Self {
        Self(terms.into_iter().map(Into::into).collect())
    }
}

/// A value handed to [`Entity::widened_search`]
#[derive(Debug, Clone, PartialEq)]
pub enum SearchValue {
    Text(String),
    Integer(i64),
    /// A loaded record of some entity type, identified by its id
    Record { entity: String, id: i64 },
    Other(Value),
}

#[derive(Debug, PartialEq, Eq)]
enum SearchKind<'a> {
    Text,
    Integer,
    Record(&'a str),
    Other,
}

impl SearchValue {
    pub fn record(entity: &str, id: i64) -> Self {
        SearchValue::Record {
            entity: entity.to_string(),
            id,
        }
    }

    fn kind(&self) -> SearchKind<'_> {
        match self {
            SearchValue::Text(_) => SearchKind::Text,
            SearchValue::Integer(_) => SearchKind::Integer,
            SearchValue::Record { entity, .. } => SearchKind::Record(entity),
            SearchValue::Other(_) => SearchKind::Other,
        }
    }
}

impl From<&str> for SearchValue {
    fn from(text: &str) -> Self {
        SearchValue::Text(text.to_string())
    }
}

impl From<String> for SearchValue {
    fn from(text: String) -> Self {
        SearchValue::Text(text)
    }
}

impl From<i64> for SearchValue {
    fn from(id: i64) -> Self {
        SearchValue::Integer(id)
    }
}

impl From<i32> for SearchValue {
    fn from(id: i32) -> Self {
        SearchValue::Integer(i64::from(id))
    }
}

impl From<Value> for SearchValue {
    fn from(value: Value) -> Self {
        match value {
            Value::String(text) => SearchValue::Text(text),
            Value::Number(ref number) => match number.as_i64() {
                Some(id) => SearchValue::Integer(id),
                None => SearchValue::Other(value),
            },
            other => SearchValue::Other(other),
        }
    }
}

impl Entity {
    /// Substring (or condition) search per term; several terms are OR-chained
    pub fn simple_search<T, Q>(&self, terms: T, query: Q) -> Result<Scope>
    where
        T: Into<SearchTerms>,
        Q: Into<SearchQuery>,
    {
        let terms = terms.into();
        let query = query.into();

        // OR with an unfiltered term matches everything
        if terms.is_empty() || terms.iter().any(|term| self.skips_search(term)) {
            return Ok(self.all());
        }
        // No pairs means no per-term condition to OR together
        if matches!(&query, SearchQuery::Conditions(pairs) if pairs.is_empty()) {
            return Ok(self.all());
        }

        let mut scopes = terms
            .iter()
            .map(|term| self.term_search(term, &query))
            .collect::<Result<Vec<Scope>>>()?;

        if scopes.len() == 1 {
            if let Some(scope) = scopes.pop() {
                return Ok(scope);
            }
        }
        self.or_chain(scopes.into_iter().map(ChainArg::Scope))
    }

    fn term_search(&self, term: &SearchTerm, query: &SearchQuery) -> Result<Scope> {
        self.search_filter(term, || {
            Ok(match query {
                SearchQuery::Conditions(pairs) => self.all().where_pairs(pairs),
                SearchQuery::Column(column) => self
                    .all()
                    .where_clause(Condition::contains(column, term.as_str())),
            })
        })
    }

    /// Id equality for an all-digit term, the contradiction scope otherwise.
    ///
    /// `condition` is a raw template with a `:search` placeholder; it defaults to
    /// `<table>.<primary key> = :search`.
    pub fn searchable_by_id<T>(&self, term: T, condition: Option<&str>) -> Result<Scope>
    where
        T: Into<SearchTerm>,
    {
        let term = term.into();
        self.search_filter(&term, || match term.as_id() {
            Some(id) => {
                let default_condition;
                let condition = match condition {
                    Some(condition) => condition,
                    None => {
                        default_condition = format!(
                            "{}.{} = :search",
                            self.model().table_name,
                            self.model().primary_key
                        );
                        &default_condition
                    }
                };
                let mut bindings = BTreeMap::new();
                bindings.insert("search".to_string(), json!(id));
                Ok(self.all().where_params(condition, bindings))
            }
            None => {
                debug!(entity = %self.name(), term = %term, "Non-numeric id search, returning empty scope");
                Ok(self.none())
            }
        })
    }

    /// Route to `id_searches` for all-digit terms and `text_searches` otherwise
    pub fn matching_searchable<T: Into<SearchTerm>>(&self, term: T) -> Result<Scope> {
        self.matching_searchable_with(term, ID_SEARCHES, TEXT_SEARCHES)
    }

    pub fn matching_searchable_with<T>(&self, term: T, id_op: &str, text_op: &str) -> Result<Scope>
    where
        T: Into<SearchTerm>,
    {
        for name in [id_op, text_op] {
            if !self.respond_to(name) {
                return Err(SearchableError::unknown_operation(self.name(), name));
            }
        }

        let term = term.into();
        self.search_filter(&term, || {
            let operation = if term.is_numeric() { id_op } else { text_op };
            self.call(operation, &[term.clone().into()])
        })
    }

    /// Dispatch on the kind shared by every value
    pub fn widened_search<Q: Into<SearchQuery>>(&self, terms: &[SearchValue], query: Q) -> Result<Scope> {
        self.widened_search_on(self, terms, query)
    }

    /// Like [`Entity::widened_search`], building the result on `search_scope`
    pub fn widened_search_on<Q>(
        &self,
        search_scope: &Entity,
        terms: &[SearchValue],
        query: Q,
    ) -> Result<Scope>
    where
        Q: Into<SearchQuery>,
    {
        let Some(first) = terms.first() else {
            return Ok(search_scope.none());
        };
        if terms.iter().any(|term| term.kind() != first.kind()) {
            debug!(entity = %self.name(), "Mixed widened search values, returning empty scope");
            return Ok(search_scope.none());
        }

        match first.kind() {
            SearchKind::Text => {
                let texts: Vec<SearchTerm> = terms
                    .iter()
                    .filter_map(|term| match term {
                        SearchValue::Text(text) => Some(SearchTerm::from(text)),
                        _ => None,
                    })
                    .collect();
                search_scope.simple_search(texts, query)
            }
            SearchKind::Integer => {
                let ids = terms.iter().filter_map(|term| match term {
                    SearchValue::Integer(id) => Some(*id),
                    _ => None,
                });
                search_scope.ids_search(ids)
            }
            SearchKind::Record(entity) if entity == self.name() => {
                let ids = terms.iter().filter_map(|term| match term {
                    SearchValue::Record { id, .. } => Some(*id),
                    _ => None,
                });
                search_scope.ids_search(ids)
            }
            _ => Ok(search_scope.none()),
        }
    }

    fn ids_search(&self, ids: impl Iterator<Item = i64>) -> Result<Scope> {
        let mut scopes = ids
            .map(|id| self.searchable_by_id(id, None))
            .collect::<Result<Vec<Scope>>>()?;

        match scopes.len() {
            0 => Ok(self.none()),
            1 => Ok(scopes.pop().unwrap_or_else(|| self.none())),
            _ => self.or_chain(scopes.into_iter().map(ChainArg::Scope)),
        }
    }
}
