//! Entity and component storage.
//!
//! The [`Store`] is the authority on which entities are live. It keeps one [`Row`] per entity in
//! an insertion-ordered map, plus the ordered list of root entities. Children are not a separate
//! storage: a child is an ordinary live entity that also appears in its parent's child list.
//!
//! ```text
//! Store
//! ├── rows:  IndexMap<Entity, Row>      every live entity, spawn order
//! │          Row ── components: IndexMap<Ident, Rc<dyn Any>>
//! │             ├── signature:  FixedBitSet over Ident::index
//! │             └── children:   Vec<Entity>
//! └── roots: Vec<Entity>                entities spawned without a parent
//! ```
//!
//! Components are stored as `Rc<RefCell<C>>` behind `Rc<dyn Any>` and handed out as
//! [`Shared`] handles, so queries never hold a borrow of the store itself.
//!
//! Despawning an entity does not despawn its children; they stay live (and queryable) but
//! become unreachable from the root tree.

mod row;
mod shared;

use indexmap::IndexMap;

use crate::ecs::{
    component::{Component, Set},
    entity::Entity,
    error::{Error, Result},
    ident,
};

pub use row::{ErasedComponent, Row, Signature};
pub use shared::Shared;

/// The set of live entities, their components, and the root/child tree.
#[derive(Default)]
pub struct Store {
    rows: IndexMap<Entity, Row>,
    roots: Vec<Entity>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn a new root entity with the given components.
    pub fn spawn<S: Set>(&mut self, set: S) -> Entity {
        let entity = self.insert_row(set);
        self.roots.push(entity);
        entity
    }

    /// Spawn a new entity as the last child of `parent`. The child is not a root.
    pub fn spawn_child<S: Set>(&mut self, parent: Entity, set: S) -> Result<Entity> {
        if !self.rows.contains_key(&parent) {
            return Err(not_found(parent));
        }
        let child = self.insert_row(set);
        self.row_mut(parent)?.push_child(child);
        Ok(child)
    }

    /// Attach components to a live entity, replacing any of the same kind in place.
    pub fn add_components<S: Set>(&mut self, entity: Entity, set: S) -> Result<()> {
        set.apply(self.row_mut(entity)?);
        Ok(())
    }

    /// Detach the component of kind `C`, returning it if it was attached.
    pub fn remove_component<C: Component>(&mut self, entity: Entity) -> Result<Option<Shared<C>>> {
        let removed = self.row_mut(entity)?.remove(ident::of::<C>());
        Ok(removed.as_ref().and_then(Shared::from_any))
    }

    /// Remove an entity and its components.
    ///
    /// The entity leaves the root list. Unless `keep_children` is set, it is also unlinked from
    /// every other entity's child list with a linear scan. Its own children are left live.
    pub fn despawn(&mut self, entity: Entity, keep_children: bool) -> Result<()> {
        if self.rows.shift_remove(&entity).is_none() {
            return Err(not_found(entity));
        }
        if let Some(index) = self.roots.iter().position(|root| *root == entity) {
            self.roots.remove(index);
        }
        if !keep_children {
            for row in self.rows.values_mut() {
                row.unlink_child(entity);
            }
        }
        Ok(())
    }

    /// The components of a live entity, in insertion order.
    pub fn components_of(&self, entity: Entity) -> Result<Vec<ErasedComponent>> {
        Ok(self.row(entity)?.components().collect())
    }

    /// Typed handle to one component of a live entity.
    pub fn get<C: Component>(&self, entity: Entity) -> Result<Option<Shared<C>>> {
        Ok(self.row(entity)?.get::<C>())
    }

    pub fn row(&self, entity: Entity) -> Result<&Row> {
        self.rows.get(&entity).ok_or_else(|| not_found(entity))
    }

    fn row_mut(&mut self, entity: Entity) -> Result<&mut Row> {
        self.rows.get_mut(&entity).ok_or_else(|| not_found(entity))
    }

    pub fn children(&self, entity: Entity) -> Result<&[Entity]> {
        Ok(self.row(entity)?.children())
    }

    /// Resolve a live entity by numeric identifier.
    pub fn entity_by_id(&self, id: u64) -> Result<Entity> {
        let entity = Entity::from_raw(id);
        if self.rows.contains_key(&entity) {
            Ok(entity)
        } else {
            Err(Error::EntityNotFound(id.to_string()))
        }
    }

    /// Resolve a live entity from its string form (`"42"` or `"Entity(42)"`).
    pub fn entity_by_str(&self, s: &str) -> Result<Entity> {
        let entity: Entity = s.parse()?;
        if self.rows.contains_key(&entity) {
            Ok(entity)
        } else {
            Err(Error::EntityNotFound(s.to_string()))
        }
    }

    #[inline]
    pub fn roots(&self) -> &[Entity] {
        &self.roots
    }

    /// Every live entity in store order.
    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.rows.keys().copied()
    }

    #[inline]
    pub fn contains(&self, entity: Entity) -> bool {
        self.rows.contains_key(&entity)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The entity and row at a position in store order.
    #[inline]
    pub(crate) fn get_index(&self, index: usize) -> Option<(Entity, &Row)> {
        self.rows.get_index(index).map(|(entity, row)| (*entity, row))
    }

    fn insert_row<S: Set>(&mut self, set: S) -> Entity {
        let entity = Entity::next();
        let mut row = Row::default();
        set.apply(&mut row);
        self.rows.insert(entity, row);
        entity
    }
}

fn not_found(entity: Entity) -> Error {
    Error::EntityNotFound(entity.to_string())
}
