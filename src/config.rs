use crate::error::{Result, SearchableError};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Defaults shared by every entity built from this configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchableConfig {
    /// Full-text query function used by vector predicates (`plainto_tsquery`)
    pub tsquery_function: String,
    /// Text-search language passed to the query function
    pub language: String,
    /// Column name appended to the plural entity name for vector predicates
    pub vector_column: String,
    /// Emit JSON log lines instead of human-readable ones
    pub log_json: bool,
}

impl Default for SearchableConfig {
    fn default() -> Self {
        Self {
            tsquery_function: "plainto_tsquery".to_string(),
            language: "english".to_string(),
            vector_column: "vector".to_string(),
            log_json: false,
        }
    }
}

impl SearchableConfig {
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(function) = std::env::var("SEARCHABLE_TSQUERY_FUNCTION") {
            config.tsquery_function = function;
        }

        if let Ok(language) = std::env::var("SEARCHABLE_LANGUAGE") {
            config.language = language;
        }

        if let Ok(column) = std::env::var("SEARCHABLE_VECTOR_COLUMN") {
            config.vector_column = column;
        }

        if let Ok(log_json) = std::env::var("SEARCHABLE_LOG_JSON") {
            config.log_json = log_json.parse().map_err(|e| {
                SearchableError::configuration(format!("Invalid log_json: {e}"))
            })?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Every configured name ends up inside generated SQL, so each must be a plain identifier
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("tsquery_function", &self.tsquery_function),
            ("language", &self.language),
            ("vector_column", &self.vector_column),
        ] {
            if !is_identifier(value) {
                return Err(SearchableError::configuration(format!(
                    "{field} must be a plain SQL identifier, got '{value}'"
                )));
            }
        }
        Ok(())
    }
}

static IDENTIFIER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\A[A-Za-z_][A-Za-z0-9_]*\z").expect("valid identifier pattern"));

fn is_identifier(value: &str) -> bool {
    IDENTIFIER_RE.is_match(value)
}
