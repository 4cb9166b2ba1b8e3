//! Accumulation of association requirements across the sub-scopes of one chain.

use crate::error::Result;
use crate::query_builder::{JoinValues, Scope};
use tracing::trace;

/// Scratch state for one chain build.
///
/// Owned by a single `or_chain` call, so accumulated joins never outlive it.
#[derive(Debug, Default)]
pub struct JoinAccumulator {
    values: JoinValues,
}

impl JoinAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Union `scope`'s four requirement sets into the running sets
    pub fn collect(&mut self, scope: &Scope) {
        self.values.union(scope.join_values());
    }

    pub fn values(&self) -> &JoinValues {
        &self.values
    }

    /// Apply the accumulated requirements to `base` in the fixed kind order,
    /// skipping empty kinds
    pub fn apply(&self, base: Scope) -> Result<Scope> {
        self.values
            .non_empty()
            .try_fold(base, |scope, (kind, names)| {
                trace!(kind = %kind, associations = ?names, "Applying accumulated associations");
                scope.with_associations(kind, names)
            })
    }

    /// Clear all four sets
    pub fn release(&mut self) {
        self.values.clear();
    }
}
