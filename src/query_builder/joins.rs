use std::fmt;

/// Represents different types of SQL JOINs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinType {
    Inner,
    Left,
}

impl JoinType {
    pub fn to_sql(&self) -> &'static str {
        match self {
            JoinType::Inner => "INNER JOIN",
            JoinType::Left => "LEFT OUTER JOIN",
        }
    }
}

/// Represents a SQL JOIN clause
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Join {
    pub join_type: JoinType,
    pub table: String,
    pub on_condition: String,
}

impl Join {
    /// Create an INNER JOIN
    pub fn inner(table: &str, on_condition: &str) -> Self {
        Self {
            join_type: JoinType::Inner,
            table: table.to_string(),
            on_condition: on_condition.to_string(),
        }
    }

    /// Create a LEFT OUTER JOIN
    pub fn left(table: &str, on_condition: &str) -> Self {
        Self {
            join_type: JoinType::Left,
            table: table.to_string(),
            on_condition: on_condition.to_string(),
        }
    }

    /// Convert to SQL string
    pub fn to_sql(&self) -> String {
        format!(
            "{} {} ON {}",
            self.join_type.to_sql(),
            self.table,
            self.on_condition
        )
    }
}

/// The four ways a scope can require an association for materialization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JoinKind {
    Joins,
    EagerLoad,
    Preload,
    Includes,
}

impl JoinKind {
    /// Fixed application order
    pub const ALL: [JoinKind; 4] = [
        JoinKind::Joins,
        JoinKind::EagerLoad,
        JoinKind::Preload,
        JoinKind::Includes,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            JoinKind::Joins => "joins",
            JoinKind::EagerLoad => "eager_load",
            JoinKind::Preload => "preload",
            JoinKind::Includes => "includes",
        }
    }

    /// SQL join type used when the requirement is rendered into the main query.
    /// Preloads are loaded by a follow-up query and never join.
    pub fn join_type(&self) -> Option<JoinType> {
        match self {
            JoinKind::Joins => Some(JoinType::Inner),
            JoinKind::EagerLoad | JoinKind::Includes => Some(JoinType::Left),
            JoinKind::Preload => None,
        }
    }
}

impl fmt::Display for JoinKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Association names per requirement kind, deduplicated in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JoinValues {
    joins: Vec<String>,
    eager_load: Vec<String>,
    preload: Vec<String>,
    includes: Vec<String>,
}

impl JoinValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, kind: JoinKind) -> &[String] {
        match kind {
            JoinKind::Joins => &self.joins,
            JoinKind::EagerLoad => &self.eager_load,
            JoinKind::Preload => &self.preload,
            JoinKind::Includes => &self.includes,
        }
    }

    fn get_mut(&mut self, kind: JoinKind) -> &mut Vec<String> {
        match kind {
            JoinKind::Joins => &mut self.joins,
            JoinKind::EagerLoad => &mut self.eager_load,
            JoinKind::Preload => &mut self.preload,
            JoinKind::Includes => &mut self.includes,
        }
    }

    /// Add one association name; returns false when it was already present
    pub fn insert(&mut self, kind: JoinKind, name: &str) -> bool {
        let names = self.get_mut(kind);
        if names.iter().any(|existing| existing == name) {
            return false;
        }
        names.push(name.to_string());
        true
    }

    /// Union every set of `other` into this one
    pub fn union(&mut self, other: &JoinValues) {
        for kind in JoinKind::ALL {
            for name in other.get(kind) {
                self.insert(kind, name);
            }
        }
    }

    /// Non-empty sets in application order
    pub fn non_empty(&self) -> impl Iterator<Item = (JoinKind, &[String])> + '_ {
        JoinKind::ALL
            .into_iter()
            .map(move |kind| (kind, self.get(kind)))
            .filter(|(_, names)| !names.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.non_empty().next().is_none()
    }

    pub fn clear(&mut self) {
        for kind in JoinKind::ALL {
            self.get_mut(kind).clear();
        }
    }
}
