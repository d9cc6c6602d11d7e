//! Resources: singleton values stored in a world.
//!
//! | Aspect | Resource | Component |
//! |--------|----------|-----------|
//! | Cardinality | One per kind per world | One per kind per entity |
//! | Access | Directly by kind | Query over matching entities |
//! | Use case | Global state, services, time | Entity data |
//!
//! Resources must be inserted before they are read; a missing resource is an error rather than
//! a default value.
//!
//! # Example
//!
//! ```rust,ignore
//! #[derive(Resource)]
//! struct Score(u32);
//!
//! let mut resources = Resources::new();
//! resources.insert(Score(0));
//! resources.get::<Score>()?.borrow_mut().0 += 10;
//! ```

use std::{any::Any, rc::Rc};

use indexmap::IndexMap;

use crate::ecs::{
    error::{Error, Result},
    ident::{self, Ident},
    storage::Shared,
};

/// Marker trait for resource kinds.
pub trait Resource: 'static {}

/// Type-erased storage for resources, keyed by kind identity.
#[derive(Default)]
pub struct Resources {
    data: IndexMap<Ident, Rc<dyn Any>>,
}

impl Resources {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a resource, replacing any previous value of the same kind.
    ///
    /// Handles to the previous value stay valid but no longer refer to the stored resource.
    #[inline]
    pub fn insert<R: Resource>(&mut self, value: R) {
        self.data
            .insert(ident::of::<R>(), Shared::new(value).into_any());
    }

    /// The resource of kind `R`, or `ResourceNotFound`.
    pub fn get<R: Resource>(&self) -> Result<Shared<R>> {
        self.get_optional::<R>()
            .ok_or_else(|| Error::ResourceNotFound(ident::of::<R>().name()))
    }

    /// The resource of kind `R`, if inserted.
    #[inline]
    pub fn get_optional<R: Resource>(&self) -> Option<Shared<R>> {
        self.data.get(&ident::of::<R>()).and_then(Shared::from_any)
    }

    /// Remove the resource of kind `R`, returning its handle if it existed.
    pub fn remove<R: Resource>(&mut self) -> Option<Shared<R>> {
        self.data
            .shift_remove(&ident::of::<R>())
            .as_ref()
            .and_then(Shared::from_any)
    }

    #[inline]
    pub fn contains<R: Resource>(&self) -> bool {
        self.data.contains_key(&ident::of::<R>())
    }

    /// Labels of every stored resource, in insertion order.
    pub fn names(&self) -> Vec<String> {
        self.data.keys().map(Ident::name).collect()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use rusty_ecs_macros::Resource;

    use super::*;

    #[derive(Resource, Debug, PartialEq)]
    struct Score(u32);

    #[derive(Resource, Debug, PartialEq)]
    struct Settings {
        volume: u8,
    }

    #[test]
    fn missing_resource_is_an_error() {
        let resources = Resources::new();
        assert_eq!(
            resources.get::<Score>().err(),
            Some(Error::ResourceNotFound("Score".to_string()))
        );
        assert!(resources.get_optional::<Score>().is_none());
    }

    #[test]
    fn insert_and_mutate_through_handle() {
        let mut resources = Resources::new();
        resources.insert(Score(1));

        resources.get::<Score>().unwrap().borrow_mut().0 += 2;
        assert_eq!(*resources.get::<Score>().unwrap().borrow(), Score(3));
    }

    #[test]
    fn reinsert_overwrites() {
        let mut resources = Resources::new();
        resources.insert(Settings { volume: 1 });
        let stale = resources.get::<Settings>().unwrap();
        resources.insert(Settings { volume: 9 });

        assert_eq!(resources.get::<Settings>().unwrap().borrow().volume, 9);
        assert_eq!(stale.borrow().volume, 1);
        assert_eq!(resources.len(), 1);
    }

    #[test]
    fn remove_and_contains() {
        let mut resources = Resources::new();
        resources.insert(Score(4));
        resources.insert(Settings { volume: 2 });
        assert_eq!(resources.names(), vec!["Score", "Settings"]);

        let removed = resources.remove::<Score>().unwrap();
        assert_eq!(*removed.borrow(), Score(4));
        assert!(!resources.contains::<Score>());
        assert!(resources.contains::<Settings>());
        assert!(resources.remove::<Score>().is_none());
    }
}
