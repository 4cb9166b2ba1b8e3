//! # Entity Types
//!
//! An [`Entity`] is the queryable face of one model: its base scope plus an
//! immutable table of named operations registered at setup time through
//! [`EntityBuilder`]. Operations are looked up by name; nothing is resolved
//! through reflection at query time.

use crate::config::SearchableConfig;
use crate::error::{Result, SearchableError};
use crate::model::{underscore, Association, Model};
use crate::query_builder::{Condition, Scope};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// A named entity-level query operation
pub type Operation = Arc<dyn Fn(&Entity, &[Value]) -> Result<Scope> + Send + Sync>;

/// Decides whether a search term should skip filtering
pub type SearchGuardFn = Arc<dyn Fn(&str) -> bool + Send + Sync>;

#[derive(Clone, Default)]
pub struct OperationRegistry {
    operations: HashMap<String, Operation>,
}

impl OperationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an operation; a previous registration under the same name is replaced
    pub fn register(&mut self, name: &str, operation: Operation) -> Option<Operation> {
        self.operations.insert(name.to_string(), operation)
    }

    pub fn get(&self, name: &str) -> Option<&Operation> {
        self.operations.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.operations.contains_key(name)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.operations.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for OperationRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OperationRegistry")
            .field("operations", &self.names())
            .finish()
    }
}

pub struct Entity {
    model: Arc<Model>,
    operations: OperationRegistry,
    search_guard: Option<SearchGuardFn>,
    config: SearchableConfig,
}

impl Entity {
    pub fn builder(name: &str) -> EntityBuilder {
        EntityBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.model.name
    }

    pub fn model(&self) -> &Arc<Model> {
        &self.model
    }

    pub fn config(&self) -> &SearchableConfig {
        &self.config
    }

    pub fn operations(&self) -> &OperationRegistry {
        &self.operations
    }

    pub(crate) fn search_guard(&self) -> Option<&SearchGuardFn> {
        self.search_guard.as_ref()
    }

    /// The unfiltered scope: every row the default scope admits
    pub fn all(&self) -> Scope {
        self.model
            .default_scope
            .iter()
            .cloned()
            .fold(self.unscoped(), Scope::where_clause)
    }

    /// A scope ignoring the default scope
    pub fn unscoped(&self) -> Scope {
        Scope::new(Arc::clone(&self.model))
    }

    /// The contradiction scope: matches no row
    pub fn none(&self) -> Scope {
        self.all().where_clause(Condition::always_false())
    }

    pub fn respond_to(&self, name: &str) -> bool {
        self.operations.contains(name)
    }

    /// Invoke a declared operation by name
    pub fn call(&self, name: &str, args: &[Value]) -> Result<Scope> {
        let operation = self
            .operations
            .get(name)
            .ok_or_else(|| SearchableError::unknown_operation(self.name(), name))?;
        debug!(entity = %self.name(), operation = %name, args = args.len(), "Invoking operation");
        operation(self, args)
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entity")
            .field("model", &self.model)
            .field("operations", &self.operations)
            .field("search_guard", &self.search_guard.is_some())
            .field("config", &self.config)
            .finish()
    }
}

/// Setup-time registration of an entity's metadata and operations
pub struct EntityBuilder {
    pub(crate) model: Model,
    pub(crate) operations: OperationRegistry,
    pub(crate) search_guard: Option<SearchGuardFn>,
    pub(crate) config: SearchableConfig,
}

impl EntityBuilder {
    pub fn new(name: &str) -> Self {
        let builder = Self {
            model: Model::new(name),
            operations: OperationRegistry::new(),
            search_guard: None,
            config: SearchableConfig::default(),
        };
        builder.with_default_vectors()
    }

    pub fn table(mut self, table_name: &str) -> Self {
        self.model.table_name = table_name.to_string();
        self
    }

    /// Override the derived plural name used for default vector columns
    pub fn plural(mut self, plural: &str) -> Self {
        self.model.plural = plural.to_string();
        self
    }

    pub fn primary_key(mut self, column: &str) -> Self {
        self.model.primary_key = column.to_string();
        self
    }

    pub fn config(mut self, config: SearchableConfig) -> Self {
        self.config = config;
        self
    }

    /// Declare an association reached through an explicit join condition
    pub fn association(mut self, name: &str, table: &str, on_condition: &str) -> Self {
        self.model.associations.insert(
            name.to_string(),
            Association {
                name: name.to_string(),
                table: table.to_string(),
                on_condition: on_condition.to_string(),
            },
        );
        self
    }

    /// `belongs_to :post` -> `posts.id = comments.post_id`
    pub fn belongs_to(self, name: &str, table: &str) -> Self {
        let on_condition = format!(
            "{table}.id = {}.{}_id",
            self.model.table_name,
            underscore(name)
        );
        self.association(name, table, &on_condition)
    }

    /// `has_many :comments` -> `comments.post_id = posts.id`
    pub fn has_many(self, name: &str, table: &str) -> Self {
        let on_condition = format!(
            "{table}.{} = {}.{}",
            self.model.foreign_key(),
            self.model.table_name,
            self.model.primary_key
        );
        self.association(name, table, &on_condition)
    }

    /// Add a condition every `all()` scope starts from
    pub fn default_scope(mut self, condition: Condition) -> Self {
        self.model.default_scope.push(condition);
        self
    }

    /// Register a named operation
    pub fn scope<F>(mut self, name: &str, operation: F) -> Self
    where
        F: Fn(&Entity, &[Value]) -> Result<Scope> + Send + Sync + 'static,
    {
        self.register(name, Arc::new(operation));
        self
    }

    pub(crate) fn register(&mut self, name: &str, operation: Operation) {
        if self.operations.register(name, operation).is_some() {
            debug!(entity = %self.model.name, operation = %name, "Replaced previously registered operation");
        }
    }

    pub fn build(self) -> Entity {
        debug!(
            entity = %self.model.name,
            table = %self.model.table_name,
            operations = ?self.operations.names(),
            "Built entity"
        );
        Entity {
            model: Arc::new(self.model),
            operations: self.operations,
            search_guard: self.search_guard,
            config: self.config,
        }
    }
}
