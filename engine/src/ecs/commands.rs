//! Mutation helpers acting on the active world.
//!
//! These are the system-side counterparts of the `World` methods of the same names. Each one
//! fails with `NoActiveWorldContext` outside of a running system or world scope.

use crate::ecs::{
    component::Set,
    entity::Entity,
    error::Result,
    resource::Resource,
    storage::ErasedComponent,
    world::{World, context::with_world},
};

/// Spawn a root entity.
pub fn spawn<S: Set>(set: S) -> Result<Entity> {
    with_world(|world| world.spawn(set))
}

/// Spawn an entity as the last child of `parent`.
pub fn spawn_child<S: Set>(parent: Entity, set: S) -> Result<Entity> {
    with_world(|world| world.spawn_child(parent, set))?
}

/// Spawn `parent` as a root entity, then let `build` add its children.
pub fn spawn_with_children<S, F>(set: S, build: F) -> Result<Entity>
where
    S: Set,
    F: FnOnce(&mut ChildBuilder) -> Result<()>,
{
    with_world(|world| world.with_children(world.spawn(set), build))?
}

pub fn despawn(entity: Entity, keep_children: bool) -> Result<()> {
    with_world(|world| world.despawn(entity, keep_children))?
}

pub fn add_components<S: Set>(entity: Entity, set: S) -> Result<()> {
    with_world(|world| world.add_components(entity, set))?
}

pub fn insert_resource<R: Resource>(resource: R) -> Result<()> {
    with_world(|world| world.insert_resource(resource))
}

pub fn entity_by_id(id: u64) -> Result<Entity> {
    with_world(|world| world.entity_by_id(id))?
}

pub fn entity_by_str(s: &str) -> Result<Entity> {
    with_world(|world| world.entity_by_str(s))?
}

/// The children of a live entity, in spawn order.
pub fn children(entity: Entity) -> Result<Vec<Entity>> {
    with_world(|world| world.children(entity))?
}

/// The components of a live entity, in insertion order.
pub fn components(entity: Entity) -> Result<Vec<ErasedComponent>> {
    with_world(|world| world.components_of(entity))?
}

/// Spawns children under a fixed parent.
pub struct ChildBuilder {
    world: World,
    parent: Entity,
}

impl ChildBuilder {
    #[inline]
    pub fn parent(&self) -> Entity {
        self.parent
    }

    /// Spawn the next child of the parent.
    pub fn spawn<S: Set>(&mut self, set: S) -> Result<Entity> {
        self.world.spawn_child(self.parent, set)
    }

    /// Spawn the next child and let `build` add grandchildren under it.
    pub fn spawn_with_children<S, F>(&mut self, set: S, build: F) -> Result<Entity>
    where
        S: Set,
        F: FnOnce(&mut ChildBuilder) -> Result<()>,
    {
        let child = self.spawn(set)?;
        self.world.with_children(child, build)
    }
}

impl World {
    /// Run `build` with a builder spawning children of `parent`. Returns `parent`.
    pub fn with_children<F>(&self, parent: Entity, build: F) -> Result<Entity>
    where
        F: FnOnce(&mut ChildBuilder) -> Result<()>,
    {
        // Fail early for a missing parent even if `build` spawns nothing.
        self.store().row(parent)?;
        let mut builder = ChildBuilder {
            world: self.clone(),
            parent,
        };
        build(&mut builder)?;
        Ok(parent)
    }
}
