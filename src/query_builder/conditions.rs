use regex::Regex;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// Represents different types of SQL conditions
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    Simple {
        field: String,
        operator: String,
        value: Value,
    },
    In {
        field: String,
        values: Vec<Value>,
    },
    IsNull {
        field: String,
    },
    Like {
        field: String,
        pattern: String,
    },
    Raw {
        sql: String,
    },
    /// Raw SQL with named `:key` placeholders
    Parameterized {
        sql: String,
        bindings: BTreeMap<String, Value>,
    },
    Group(WhereClause),
}

impl Condition {
    pub fn eq(field: &str, value: Value) -> Self {
        match value {
            Value::Null => Condition::IsNull {
                field: field.to_string(),
            },
            Value::Array(values) => Condition::In {
                field: field.to_string(),
                values,
            },
            value => Condition::Simple {
                field: field.to_string(),
                operator: "=".to_string(),
                value,
            },
        }
    }

    /// Substring match against a wildcard-wrapped, trimmed term
    pub fn contains(field: &str, term: &str) -> Self {
        Condition::Like {
            field: field.to_string(),
            pattern: format!("%{}%", term.trim()),
        }
    }

    pub fn raw(sql: &str) -> Self {
        Condition::Raw {
            sql: sql.to_string(),
        }
    }

    pub fn parameterized(sql: &str, bindings: BTreeMap<String, Value>) -> Self {
        Condition::Parameterized {
            sql: sql.to_string(),
            bindings,
        }
    }

    /// Condition that holds for every row
    pub fn always_true() -> Self {
        Self::raw("1=1")
    }

    /// Contradiction: holds for no row
    pub fn always_false() -> Self {
        Self::raw("1=0")
    }

    /// Equality conditions for every pair of a column/value mapping, ANDed
    pub fn from_pairs(pairs: &Map<String, Value>) -> Vec<Condition> {
        pairs
            .iter()
            .map(|(field, value)| Condition::eq(field, value.clone()))
            .collect()
    }

    /// Combine two conditions with OR
    pub fn or(self, other: Condition) -> Condition {
        Condition::Group(WhereClause::or(vec![self, other]))
    }

    /// Convert condition to SQL string
    pub fn to_sql(&self) -> String {
        match self {
            Condition::Simple {
                field,
                operator,
                value,
            } => {
                format!("{} {} {}", field, operator, format_value(value))
            }
            Condition::In { field, values } => {
                if values.is_empty() {
                    return "1=0".to_string();
                }
                let value_list = values
                    .iter()
                    .map(format_value)
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{field} IN ({value_list})")
            }
            Condition::IsNull { field } => {
                format!("{field} IS NULL")
            }
            Condition::Like { field, pattern } => {
                format!("{} LIKE {}", field, quote(pattern))
            }
            Condition::Raw { sql } => sql.clone(),
            Condition::Parameterized { sql, bindings } => interpolate(sql, bindings),
            Condition::Group(clause) => clause.to_sql(),
        }
    }

    /// SQL safe to place next to other conditions; raw fragments get parentheses
    pub fn to_nested_sql(&self) -> String {
        match self {
            Condition::Raw { .. } | Condition::Parameterized { .. } => {
                format!("({})", self.to_sql())
            }
            _ => self.to_sql(),
        }
    }
}

/// Represents a WHERE clause that can contain multiple conditions
#[derive(Debug, Clone, PartialEq)]
pub struct WhereClause {
    pub conditions: Vec<Condition>,
    pub operator: LogicalOperator,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOperator {
    And,
    Or,
}

impl WhereClause {
    /// Combine multiple conditions with AND
    pub fn and(conditions: Vec<Condition>) -> Self {
        Self {
            conditions,
            operator: LogicalOperator::And,
        }
    }

    /// Combine multiple conditions with OR
    pub fn or(conditions: Vec<Condition>) -> Self {
        Self {
            conditions,
            operator: LogicalOperator::Or,
        }
    }

    /// Convert to SQL string
    pub fn to_sql(&self) -> String {
        if self.conditions.is_empty() {
            return Condition::always_true().to_sql();
        }

        if self.conditions.len() == 1 {
            return self.conditions[0].to_sql();
        }

        let operator_str = match self.operator {
            LogicalOperator::And => " AND ",
            LogicalOperator::Or => " OR ",
        };

        let condition_sqls: Vec<String> = self
            .conditions
            .iter()
            .map(Condition::to_nested_sql)
            .collect();

        format!("({})", condition_sqls.join(operator_str))
    }
}

/// Quote raw text for safe embedding as a SQL string literal
pub fn quote(text: &str) -> String {
    format!("'{}'", text.replace('\'', "''"))
}

/// Format a JSON value for SQL
fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => quote(s),
        _ => quote(&value.to_string()),
    }
}

/// `::type` casts, or a `:key` placeholder with the key captured
static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(::)|:(\w+)").expect("valid placeholder pattern"));

/// Substitute `:key` placeholders with their formatted bindings.
///
/// Placeholders are matched on the whole identifier, so `:search1` never
/// captures the prefix of `:search10`, and `::type` casts are left alone.
fn interpolate(sql: &str, bindings: &BTreeMap<String, Value>) -> String {
    PLACEHOLDER_RE
        .replace_all(sql, |caps: &regex::Captures| match caps.get(2) {
            Some(key) => bindings
                .get(key.as_str())
                .map(format_value)
                .unwrap_or_else(|| caps[0].to_string()),
            None => caps[0].to_string(),
        })
        .to_string()
}
