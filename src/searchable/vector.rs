//! Full-text "vector" predicates.
//!
//! A search string is split on commas and each fragment becomes one
//! `<column> @@ <fn>('<language>', :searchN)` predicate. Match mode ORs the
//! fragments (any accepted term); non-match mode negates each and ANDs them
//! (none of the excluded terms).

use super::SearchTerm;
use crate::config::SearchableConfig;
use crate::entity::{Entity, EntityBuilder};
use crate::error::Result;
use crate::query_builder::{quote, Condition, Scope};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

pub const MATCHING_VECTOR: &str = "matching_vector";
pub const NON_MATCHING_VECTOR: &str = "non_matching_vector";

/// Full-text query function and the language it is called with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TsQuery {
    pub function: String,
    pub language: String,
}

impl TsQuery {
    pub fn new(function: &str, language: &str) -> Self {
        Self {
            function: function.to_string(),
            language: language.to_string(),
        }
    }
}

/// Options for one vector predicate; unset fields fall back to the entity's configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VectorOptions {
    pub column: Option<String>,
    pub without: bool,
    pub tsvector: Option<TsQuery>,
}

impl VectorOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn column(mut self, column: &str) -> Self {
        self.column = Some(column.to_string());
        self
    }

    pub fn without(mut self, without: bool) -> Self {
        self.without = without;
        self
    }

    pub fn tsvector(mut self, function: &str, language: &str) -> Self {
        self.tsvector = Some(TsQuery::new(function, language));
        self
    }
}

/// Builds the parameterized predicate for one search string
#[derive(Debug, Clone)]
pub struct VectorQueryBuilder {
    column: String,
    tsquery: TsQuery,
    without: bool,
}

impl VectorQueryBuilder {
    pub fn new(column: &str, tsquery: TsQuery, without: bool) -> Self {
        Self {
            column: column.to_string(),
            tsquery,
            without,
        }
    }

    /// Resolve `options` against the entity's plural name and configuration
    pub fn for_entity(entity: &Entity, options: &VectorOptions) -> Self {
        let config: &SearchableConfig = entity.config();
        let column = options.column.clone().unwrap_or_else(|| {
            format!("{}.{}", entity.model().plural, config.vector_column)
        });
        let tsquery = options
            .tsvector
            .clone()
            .unwrap_or_else(|| TsQuery::new(&config.tsquery_function, &config.language));

        Self {
            column,
            tsquery,
            without: options.without,
        }
    }

    /// One predicate fragment bound to `key`
    fn fragment(&self, key: &str) -> String {
        let prefix = if self.without { "not " } else { "" };
        format!(
            "{prefix}{} @@ {}({}, :{key})",
            self.column,
            self.tsquery.function,
            quote(&self.tsquery.language)
        )
    }

    /// The combined predicate, or `None` when the term has no non-blank fragment
    pub fn build(&self, term: &str) -> Option<Condition> {
        let mut bindings = BTreeMap::new();
        let fragments: Vec<String> = term
            .split(',')
            .map(str::trim)
            .filter(|fragment| !fragment.is_empty())
            .enumerate()
            .map(|(index, fragment)| {
                let key = format!("search{index}");
                let sql = self.fragment(&key);
                bindings.insert(key, Value::String(fragment.to_string()));
                sql
            })
            .collect();

        if fragments.is_empty() {
            return None;
        }

        let joiner = if self.without { " and " } else { " or " };
        Some(Condition::parameterized(&fragments.join(joiner), bindings))
    }
}

impl Entity {
    /// Filter by the full-text vector predicate built from `term`
    pub fn match_terms_using_vector<T>(&self, term: T, options: &VectorOptions) -> Scope
    where
        T: Into<SearchTerm>,
    {
        let term = term.into();
        let builder = VectorQueryBuilder::for_entity(self, options);
        match builder.build(term.as_str()) {
            Some(condition) => {
                debug!(
                    entity = %self.name(),
                    column = %builder.column,
                    without = builder.without,
                    "Built vector predicate"
                );
                self.all().where_clause(condition)
            }
            None => self.all(),
        }
    }

    /// Rows whose vector matches any comma-separated fragment of `term`
    pub fn matching_vector<T: Into<SearchTerm>>(&self, term: T) -> Result<Scope> {
        self.call(MATCHING_VECTOR, &[term.into().into()])
    }

    /// Rows whose vector matches none of the comma-separated fragments of `term`
    pub fn non_matching_vector<T: Into<SearchTerm>>(&self, term: T) -> Result<Scope> {
        self.call(NON_MATCHING_VECTOR, &[term.into().into()])
    }
}

fn vector_method_name<'a>(default_name: &'a str, name: Option<&'a str>) -> &'a str {
    name.unwrap_or(default_name)
}

fn vector_operation(options: VectorOptions) -> crate::entity::Operation {
    Arc::new(move |entity: &Entity, args: &[Value]| -> Result<Scope> {
        let term = args.first().map(SearchTerm::from).unwrap_or_default();
        Ok(entity.match_terms_using_vector(term, &options))
    })
}

impl EntityBuilder {
    pub(crate) fn with_default_vectors(mut self) -> Self {
        self.register(MATCHING_VECTOR, vector_operation(VectorOptions::new()));
        self.register(
            NON_MATCHING_VECTOR,
            vector_operation(VectorOptions::new().without(true)),
        );
        self
    }

    /// Register a match-mode vector operation, `matching_vector` unless named
    pub fn define_matching_vector(mut self, name: Option<&str>, options: VectorOptions) -> Self {
        let name = vector_method_name(MATCHING_VECTOR, name);
        self.register(name, vector_operation(options));
        self
    }

    /// Register a non-match vector operation, `non_matching_vector` unless named
    pub fn define_non_matching_vector(mut self, name: Option<&str>, options: VectorOptions) -> Self {
        let name = vector_method_name(NON_MATCHING_VECTOR, name);
        self.register(name, vector_operation(options.without(true)));
        self
    }

    /// Register `name` in match mode and `non_<name>` in non-match mode
    pub fn define_matching_vectors(self, name: Option<&str>, options: VectorOptions) -> Self {
        let negated = name.map(|name| format!("non_{name}"));
        self.define_matching_vector(name, options.clone())
            .define_non_matching_vector(negated.as_deref(), options)
    }
}
