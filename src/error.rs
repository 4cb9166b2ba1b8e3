//! # Searchable Error Types
//!
//! Structured error handling for scope construction. Only programmer misuse of the
//! combinator argument forms is fatal; bad search input degrades to "no filtering"
//! or "no results" and never reaches these variants.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchableError {
    #[error("Invalid combinator argument for {entity}: {argument} is neither a scope nor a declared operation")]
    InvalidCombinatorArgument { entity: String, argument: String },

    #[error("Unrecognized combinator argument {argument}: expected \"name\", [\"name\", args...], {{\"name\": args}} or {{\"search\": term}}")]
    UnrecognizedArgument { argument: String },

    #[error("Empty scope constraint for {entity}: sub-scope at position {position} has no condition to combine")]
    EmptyScopeConstraint { entity: String, position: usize },

    #[error("Unknown operation for {entity}: {name}")]
    UnknownOperation { entity: String, name: String },

    #[error("Unknown association for {model}: {association}")]
    UnknownAssociation { model: String, association: String },

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl SearchableError {
    /// Create an invalid combinator argument error
    pub fn invalid_argument(entity: impl Into<String>, argument: impl Into<String>) -> Self {
        Self::InvalidCombinatorArgument {
            entity: entity.into(),
            argument: argument.into(),
        }
    }

    /// Create an error for input that is not any argument shape
    pub fn unrecognized_argument(argument: impl Into<String>) -> Self {
        Self::UnrecognizedArgument {
            argument: argument.into(),
        }
    }

    /// Create an empty scope constraint error
    pub fn empty_constraint(entity: impl Into<String>, position: usize) -> Self {
        Self::EmptyScopeConstraint {
            entity: entity.into(),
            position,
        }
    }

    /// Create an unknown operation error
    pub fn unknown_operation(entity: impl Into<String>, name: impl Into<String>) -> Self {
        Self::UnknownOperation {
            entity: entity.into(),
            name: name.into(),
        }
    }

    /// Create an unknown association error
    pub fn unknown_association(model: impl Into<String>, association: impl Into<String>) -> Self {
        Self::UnknownAssociation {
            model: model.into(),
            association: association.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }
}

pub type Result<T> = std::result::Result<T, SearchableError>;
