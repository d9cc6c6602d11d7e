//! Queries over the entities of a world.
//!
//! A query is described by its [`Data`] shape and an optional list of [`Filter`]s:
//!
//! - **[Parameter]**: one element of the result. `Entity` yields the handle, a component kind
//!   `C` yields `Shared<C>`, and `Option<C>` yields `Option<Shared<C>>`.
//! - **[Data]**: a parameter or a tuple of them, built positionally.
//! - **[Filter]**: `and::<K>()`, `not::<K>()` or an arbitrary rule over the entity signature.
//!
//! Evaluation is lazy. The returned [`Iter`] walks the live entities (or only the roots) in store
//! order, tests the kinds the data requires and then every filter, and builds a result for each
//! entity that passes. No entity is visited twice. The iterator borrows the store only while it
//! advances, so systems may mutate the world while iterating; what a concurrent mutation makes
//! visible is unspecified.
//!
//! # Usage
//!
//! ```rust,ignore
//! // Every entity with a Counter, skipping those marked Frozen.
//! for (entity, counter) in world.query::<(Entity, Counter)>([Filter::not::<Frozen>()]) {
//!     counter.borrow_mut().0 += 1;
//! }
//!
//! // A reusable, root-scoped query.
//! let roots = Query::<Node>::new().and::<Visible>().root();
//! let count = roots.iter(&world).count();
//! ```

mod data;
mod filter;
mod param;

use std::marker::PhantomData;

use crate::ecs::{component::IntoSpec, component::Spec, world::World};

pub use data::Data;
pub use filter::Filter;
pub use param::Parameter;

/// Which entities a query visits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Every live entity, roots and children alike.
    All,
    /// Only root entities.
    Roots,
}

/// A reusable query description.
pub struct Query<D: Data> {
    filters: Vec<Filter>,
    scope: Scope,
    _marker: PhantomData<fn() -> D>,
}

impl<D: Data> Default for Query<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: Data> Clone for Query<D> {
    fn clone(&self) -> Self {
        Self {
            filters: self.filters.clone(),
            scope: self.scope,
            _marker: PhantomData,
        }
    }
}

impl<D: Data> Query<D> {
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
            scope: Scope::All,
            _marker: PhantomData,
        }
    }

    /// Require every kind in `K`.
    pub fn and<K: IntoSpec>(mut self) -> Self {
        self.filters.push(Filter::and::<K>());
        self
    }

    /// Exclude entities carrying any kind in `K`.
    pub fn not<K: IntoSpec>(mut self) -> Self {
        self.filters.push(Filter::not::<K>());
        self
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Only visit root entities.
    pub fn root(mut self) -> Self {
        self.scope = Scope::Roots;
        self
    }

    #[inline]
    pub fn scope(&self) -> Scope {
        self.scope
    }

    #[inline]
    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    /// Start iterating over `world`.
    pub fn iter(&self, world: &World) -> Iter<D> {
        Iter::new(world.clone(), self.filters.clone(), self.scope)
    }
}

/// Lazy iterator over query results.
pub struct Iter<D: Data> {
    world: World,
    required: Spec,
    filters: Vec<Filter>,
    scope: Scope,
    cursor: usize,
    has_rules: bool,
    _marker: PhantomData<fn() -> D>,
}

impl<D: Data> Iter<D> {
    pub(crate) fn new(world: World, filters: Vec<Filter>, scope: Scope) -> Self {
        let mut required = Vec::new();
        <D as Data>::required(&mut required);
        Self {
            world,
            required: Spec::new(required),
            has_rules: filters.iter().any(Filter::is_rule),
            filters,
            scope,
            cursor: 0,
            _marker: PhantomData,
        }
    }
}

impl<D: Data> Iterator for Iter<D> {
    type Item = D::Item;

    fn next(&mut self) -> Option<D::Item> {
        loop {
            let position = self.cursor;
            self.cursor += 1;

            // Kinds are tested under the store borrow. Rules are user code and run without it.
            let (entity, signature) = {
                let store = self.world.store();
                let (entity, row) = match self.scope {
                    Scope::All => store.get_index(position)?,
                    Scope::Roots => {
                        let entity = *store.roots().get(position)?;
                        match store.row(entity) {
                            Ok(row) => (entity, row),
                            Err(_) => continue,
                        }
                    }
                };

                let signature = row.signature();
                if !signature.contains_all(&self.required)
                    || !self
                        .filters
                        .iter()
                        .filter(|filter| !filter.is_rule())
                        .all(|filter| filter.matches(signature))
                {
                    continue;
                }
                if !self.has_rules {
                    match <D as Data>::fetch(entity, row) {
                        Some(item) => return Some(item),
                        None => continue,
                    }
                }
                (entity, signature.clone())
            };

            if !self
                .filters
                .iter()
                .filter(|filter| filter.is_rule())
                .all(|filter| filter.matches(&signature))
            {
                continue;
            }

            // A rule may have despawned the candidate.
            let store = self.world.store();
            if let Some(item) = store
                .row(entity)
                .ok()
                .and_then(|row| <D as Data>::fetch(entity, row))
            {
                return Some(item);
            }
        }
    }
}
