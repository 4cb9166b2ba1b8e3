//! Table-level metadata an entity type is built on: names, associations and the
//! default scope every query starts from.

use crate::query_builder::{Condition, Join, JoinType};
use std::collections::BTreeMap;

/// A named association and the join that reaches it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Association {
    pub name: String,
    pub table: String,
    pub on_condition: String,
}

impl Association {
    pub fn to_join(&self, join_type: JoinType) -> Join {
        match join_type {
            JoinType::Inner => Join::inner(&self.table, &self.on_condition),
            JoinType::Left => Join::left(&self.table, &self.on_condition),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    /// Entity name, e.g. `Comment`
    pub name: String,
    pub table_name: String,
    /// Pluralized, underscored entity name, e.g. `comments`
    pub plural: String,
    pub primary_key: String,
    pub associations: BTreeMap<String, Association>,
    pub default_scope: Vec<Condition>,
}

impl Model {
    pub fn new(name: &str) -> Self {
        let plural = pluralize(&underscore(name));
        Self {
            name: name.to_string(),
            table_name: plural.clone(),
            plural,
            primary_key: "id".to_string(),
            associations: BTreeMap::new(),
            default_scope: Vec::new(),
        }
    }

    pub fn association(&self, name: &str) -> Option<&Association> {
        self.associations.get(name)
    }

    /// Foreign key other tables use to point at this model
    pub fn foreign_key(&self) -> String {
        format!("{}_id", underscore(&self.name))
    }
}

/// `BlogPost` -> `blog_post`
pub fn underscore(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, c) in name.chars().enumerate() {
        if c.is_ascii_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// English pluralization for the regular cases; irregular plurals are set explicitly
pub fn pluralize(word: &str) -> String {
    if let Some(stem) = word.strip_suffix('y') {
        if !stem.ends_with(&['a', 'e', 'i', 'o', 'u'][..]) {
            return format!("{stem}ies");
        }
    }
    if ["s", "x", "z", "ch", "sh"]
        .iter()
        .any(|suffix| word.ends_with(suffix))
    {
        return format!("{word}es");
    }
    format!("{word}s")
}
