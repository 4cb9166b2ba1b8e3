//! Folding several sub-scopes into one OR-combined, fully joined scope.

use super::{ArgumentResolver, ChainArg, JoinAccumulator, SearchTerm};
use crate::entity::Entity;
use crate::error::{Result, SearchableError};
use crate::query_builder::{Condition, Scope};
use tracing::debug;

#[derive(Debug, Clone, Copy)]
pub struct OrChainBuilder<'a> {
    entity: &'a Entity,
}

impl<'a> OrChainBuilder<'a> {
    pub fn new(entity: &'a Entity) -> Self {
        Self { entity }
    }

    pub fn build(&self, mut args: Vec<ChainArg>) -> Result<Scope> {
        let search = match args.pop() {
            Some(ChainArg::Search(term)) => term,
            Some(positional) => {
                args.push(positional);
                SearchTerm::default()
            }
            None => SearchTerm::default(),
        };

        let mut accumulator = JoinAccumulator::new();
        let result = self.fold(args, &search, &mut accumulator);
        accumulator.release();
        result
    }

    fn fold(
        &self,
        args: Vec<ChainArg>,
        search: &SearchTerm,
        accumulator: &mut JoinAccumulator,
    ) -> Result<Scope> {
        let resolver = ArgumentResolver::new(self.entity);
        let scopes = args
            .into_iter()
            .map(|arg| resolver.resolve(arg, search))
            .collect::<Result<Vec<Scope>>>()?;

        if scopes.is_empty() {
            return Ok(self.entity.all());
        }

        for scope in &scopes {
            accumulator.collect(scope);
        }

        let constraints = scopes
            .iter()
            .enumerate()
            .map(|(position, scope)| {
                scope
                    .leaf_constraint()
                    .ok_or_else(|| SearchableError::empty_constraint(self.entity.name(), position))
            })
            .collect::<Result<Vec<Condition>>>()?;

        let mut constraints = constraints.into_iter();
        let Some(seed) = constraints.next() else {
            return Ok(self.entity.all());
        };
        let chain = constraints.fold(seed, Condition::or);

        debug!(
            entity = %self.entity.name(),
            terms = scopes.len(),
            search = %search,
            associations = ?accumulator.values(),
            "Built OR chain"
        );

        let joined = accumulator.apply(self.entity.all())?;
        Ok(joined.where_clause(chain))
    }
}

impl Entity {
    /// OR together the leaf conditions of every resolved argument, on top of the
    /// union of their association requirements.
    ///
    /// A trailing [`ChainArg::Search`] sets the term passed to bare operation names.
    pub fn or_chain<I, A>(&self, args: I) -> Result<Scope>
    where
        I: IntoIterator<Item = A>,
        A: Into<ChainArg>,
    {
        OrChainBuilder::new(self).build(args.into_iter().map(Into::into).collect())
    }

    /// `or_chain` behind the search guard, with `search` as the ambient term
    pub fn search_or_chain<T, I, A>(&self, search: T, args: I) -> Result<Scope>
    where
        T: Into<SearchTerm>,
        I: IntoIterator<Item = A>,
        A: Into<ChainArg>,
    {
        let search = search.into();
        self.search_filter(search.clone(), || {
            let mut args: Vec<ChainArg> = args.into_iter().map(Into::into).collect();
            if matches!(args.last(), Some(ChainArg::Search(term)) if term.is_blank()) {
                args.pop();
            }
            if !matches!(args.last(), Some(ChainArg::Search(_))) {
                args.push(ChainArg::Search(search));
            }
            OrChainBuilder::new(self).build(args)
        })
    }
}
