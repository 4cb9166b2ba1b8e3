//! Combinator arguments and their resolution into concrete scopes.

use super::SearchTerm;
use crate::entity::Entity;
use crate::error::{Result, SearchableError};
use crate::query_builder::Scope;
use serde_json::Value;
use std::fmt;
use tracing::trace;

/// One argument to an OR-chain
#[derive(Debug, Clone)]
pub enum ChainArg {
    /// An already built scope, used as is
    Scope(Scope),
    /// A declared operation, called with the chain's search term when present
    Operation(String),
    /// A declared operation called with explicit arguments
    OperationCall { name: String, args: Vec<Value> },
    /// Ambient search term; only valid as the trailing argument
    Search(SearchTerm),
}

impl ChainArg {
    pub fn operation(name: &str) -> Self {
        ChainArg::Operation(name.to_string())
    }

    pub fn call(name: &str, args: Vec<Value>) -> Self {
        ChainArg::OperationCall {
            name: name.to_string(),
            args,
        }
    }

    pub fn search(term: impl Into<SearchTerm>) -> Self {
        ChainArg::Search(term.into())
    }
}

impl fmt::Display for ChainArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChainArg::Scope(scope) => write!(f, "scope({})", scope.model().name),
            ChainArg::Operation(name) => write!(f, ":{name}"),
            ChainArg::OperationCall { name, args } => {
                write!(f, "[:{name}, {}]", Value::Array(args.clone()))
            }
            ChainArg::Search(term) => write!(f, "{{search: {:?}}}", term.as_str()),
        }
    }
}

impl From<Scope> for ChainArg {
    fn from(scope: Scope) -> Self {
        ChainArg::Scope(scope)
    }
}

impl From<&str> for ChainArg {
    fn from(name: &str) -> Self {
        ChainArg::Operation(name.to_string())
    }
}

impl From<String> for ChainArg {
    fn from(name: String) -> Self {
        ChainArg::Operation(name)
    }
}

/// Classify loosely typed input:
///
/// - `"name"` -> operation
/// - `["name", args...]` -> operation call
/// - `{"search": term, ...}` -> ambient search term
/// - `{"name": args}` -> operation call; an array spreads into positional args
impl TryFrom<Value> for ChainArg {
    type Error = SearchableError;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::String(name) => Ok(ChainArg::Operation(name)),
            Value::Array(items) => {
                let mut items = items.into_iter();
                match items.next() {
                    Some(Value::String(name)) => Ok(ChainArg::OperationCall {
                        name,
                        args: items.collect(),
                    }),
                    first => {
                        let all: Vec<Value> = first.into_iter().chain(items).collect();
                        Err(invalid(Value::Array(all)))
                    }
                }
            }
            Value::Object(mut map) => {
                if let Some(term) = map.remove("search") {
                    return Ok(ChainArg::Search(SearchTerm::from(term)));
                }
                let description = Value::Object(map.clone());
                let mut entries = map.into_iter();
                match (entries.next(), entries.next()) {
                    (Some((name, args)), None) => {
                        let args = match args {
                            Value::Array(args) => args,
                            single => vec![single],
                        };
                        Ok(ChainArg::OperationCall { name, args })
                    }
                    _ => Err(invalid(description)),
                }
            }
            other => Err(invalid(other)),
        }
    }
}

fn invalid(value: Value) -> SearchableError {
    SearchableError::unrecognized_argument(value.to_string())
}

/// Resolves combinator arguments against one entity's operation registry
#[derive(Debug, Clone, Copy)]
pub struct ArgumentResolver<'a> {
    entity: &'a Entity,
}

impl<'a> ArgumentResolver<'a> {
    pub fn new(entity: &'a Entity) -> Self {
        Self { entity }
    }

    pub fn resolve(&self, arg: ChainArg, search: &SearchTerm) -> Result<Scope> {
        trace!(entity = %self.entity.name(), argument = %arg, "Resolving chain argument");
        match arg {
            ChainArg::Scope(scope) => Ok(scope),
            ChainArg::Operation(name) if self.entity.respond_to(&name) => {
                if search.is_blank() {
                    self.entity.call(&name, &[])
                } else {
                    self.entity.call(&name, &[search.clone().into()])
                }
            }
            ChainArg::OperationCall { name, args } if self.entity.respond_to(&name) => {
                self.entity.call(&name, &args)
            }
            other => Err(SearchableError::invalid_argument(
                self.entity.name(),
                other.to_string(),
            )),
        }
    }
}
