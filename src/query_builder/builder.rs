use super::{Condition, JoinKind, JoinValues, WhereClause};
use crate::error::{Result, SearchableError};
use crate::model::Model;
use serde_json::{Map, Value};
use sqlx::{ColumnIndex, Database, Decode, Executor, FromRow, IntoArguments, Pool, Row, Type};
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

/// An unexecuted query: conditions plus association-loading requirements.
///
/// Every combinator consumes the scope and returns a new one, so a scope handed
/// out by an entity operation is never changed behind its caller's back.
#[derive(Debug, Clone)]
pub struct Scope {
    model: Arc<Model>,
    select_fields: Vec<String>,
    where_clauses: Vec<Condition>,
    join_values: JoinValues,
    order_by: Vec<String>,
}

impl Scope {
    /// Create an unscoped query over the model's table
    pub fn new(model: Arc<Model>) -> Self {
        let select_fields = vec![format!("{}.*", model.table_name)];
        Self {
            model,
            select_fields,
            where_clauses: Vec::new(),
            join_values: JoinValues::new(),
            order_by: Vec::new(),
        }
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Set specific fields to select
    pub fn select(mut self, fields: &[&str]) -> Self {
        self.select_fields = fields.iter().map(|f| f.to_string()).collect();
        self
    }

    /// Add a WHERE condition
    pub fn where_clause(mut self, condition: Condition) -> Self {
        self.where_clauses.push(condition);
        self
    }

    /// Add a simple WHERE condition
    pub fn where_eq(self, field: &str, value: Value) -> Self {
        self.where_clause(Condition::eq(field, value))
    }

    /// Add one equality condition per column/value pair
    pub fn where_pairs(mut self, pairs: &Map<String, Value>) -> Self {
        self.where_clauses.extend(Condition::from_pairs(pairs));
        self
    }

    /// Add a raw SQL condition with named bindings
    pub fn where_params(self, sql: &str, bindings: BTreeMap<String, Value>) -> Self {
        self.where_clause(Condition::parameterized(sql, bindings))
    }

    /// Add ORDER BY clause
    pub fn order_by(mut self, field: &str, direction: &str) -> Self {
        self.order_by.push(format!("{field} {direction}"));
        self
    }

    /// Add ORDER BY ASC
    pub fn order_asc(self, field: &str) -> Self {
        self.order_by(field, "ASC")
    }

    /// Add ORDER BY DESC
    pub fn order_desc(self, field: &str) -> Self {
        self.order_by(field, "DESC")
    }

    /// Require associations of the given kind; names must be declared on the model
    pub fn with_associations<I, S>(mut self, kind: JoinKind, names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for name in names {
            let name = name.as_ref();
            if self.model.association(name).is_none() {
                return Err(SearchableError::unknown_association(
                    self.model.name.clone(),
                    name,
                ));
            }
            self.join_values.insert(kind, name);
        }
        Ok(self)
    }

    pub fn joins<I, S>(self, names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.with_associations(JoinKind::Joins, names)
    }

    pub fn eager_load<I, S>(self, names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.with_associations(JoinKind::EagerLoad, names)
    }

    pub fn preload<I, S>(self, names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.with_associations(JoinKind::Preload, names)
    }

    pub fn includes<I, S>(self, names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.with_associations(JoinKind::Includes, names)
    }

    pub fn join_values(&self) -> &JoinValues {
        &self.join_values
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.where_clauses
    }

    /// The scope's whole predicate as one top-level condition, or `None` when
    /// the scope carries no condition at all
    pub fn leaf_constraint(&self) -> Option<Condition> {
        match self.where_clauses.as_slice() {
            [] => None,
            [single] => Some(single.clone()),
            many => Some(Condition::Group(WhereClause::and(many.to_vec()))),
        }
    }

    /// Build the complete SQL query string
    pub fn build_sql(&self) -> String {
        let mut sql = format!(
            "SELECT {} FROM {}",
            self.select_fields.join(", "),
            self.model.table_name
        );

        // An association requested under several kinds is joined once
        let mut joined = HashSet::new();
        for (kind, names) in self.join_values.non_empty() {
            let Some(join_type) = kind.join_type() else {
                continue;
            };
            for name in names {
                if !joined.insert(name.as_str()) {
                    continue;
                }
                if let Some(association) = self.model.association(name) {
                    sql.push(' ');
                    sql.push_str(&association.to_join(join_type).to_sql());
                }
            }
        }

        if !self.where_clauses.is_empty() {
            sql.push_str(" WHERE ");
            let where_parts: Vec<String> = if self.where_clauses.len() == 1 {
                vec![self.where_clauses[0].to_sql()]
            } else {
                self.where_clauses
                    .iter()
                    .map(Condition::to_nested_sql)
                    .collect()
            };
            sql.push_str(&where_parts.join(" AND "));
        }

        if !self.order_by.is_empty() {
            sql.push_str(&format!(" ORDER BY {}", self.order_by.join(", ")));
        }

        sql
    }

    /// Execute the query and return all rows
    pub async fn fetch_all<DB, T>(&self, pool: &Pool<DB>) -> std::result::Result<Vec<T>, sqlx::Error>
    where
        DB: Database,
        for<'c> &'c mut DB::Connection: Executor<'c, Database = DB>,
        for<'q> DB::Arguments<'q>: IntoArguments<'q, DB>,
        T: for<'r> FromRow<'r, DB::Row> + Send + Unpin,
    {
        let sql = self.build_sql();
        sqlx::query_as::<DB, T>(&sql).fetch_all(pool).await
    }

    /// Execute the query and return optional row
    pub async fn fetch_optional<DB, T>(
        &self,
        pool: &Pool<DB>,
    ) -> std::result::Result<Option<T>, sqlx::Error>
    where
        DB: Database,
        for<'c> &'c mut DB::Connection: Executor<'c, Database = DB>,
        for<'q> DB::Arguments<'q>: IntoArguments<'q, DB>,
        T: for<'r> FromRow<'r, DB::Row> + Send + Unpin,
    {
        let sql = self.build_sql();
        sqlx::query_as::<DB, T>(&sql).fetch_optional(pool).await
    }

    /// Execute count query
    pub async fn count<DB>(&self, pool: &Pool<DB>) -> std::result::Result<i64, sqlx::Error>
    where
        DB: Database,
        for<'c> &'c mut DB::Connection: Executor<'c, Database = DB>,
        for<'q> DB::Arguments<'q>: IntoArguments<'q, DB>,
        for<'r> i64: Decode<'r, DB> + Type<DB>,
        usize: ColumnIndex<DB::Row>,
    {
        let mut count_scope = self.clone();
        count_scope.select_fields = vec!["COUNT(*)".to_string()];
        count_scope.order_by.clear();

        let sql = count_scope.build_sql();
        let row = sqlx::query::<DB>(&sql).fetch_one(pool).await?;

        row.try_get::<i64, _>(0)
    }

    /// Check if any rows exist
    pub async fn exists<DB>(&self, pool: &Pool<DB>) -> std::result::Result<bool, sqlx::Error>
    where
        DB: Database,
        for<'c> &'c mut DB::Connection: Executor<'c, Database = DB>,
        for<'q> DB::Arguments<'q>: IntoArguments<'q, DB>,
        for<'r> i64: Decode<'r, DB> + Type<DB>,
        usize: ColumnIndex<DB::Row>,
    {
        Ok(self.count(pool).await? > 0)
    }
}
