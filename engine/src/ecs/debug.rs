//! Introspection snapshots of worlds.
//!
//! A [`Snapshot`] captures the entity tree (starting from the roots), the registered systems
//! grouped by phase and by transition predicate, and the current state values. It renders as an
//! indented tree:
//!
//! ```text
//! World #0
//! entities
//!   3 [Node, Label]
//!     4 [Node]
//! systems
//!   Update: movement, render
//!   OnEnter(Home): enter_home
//! states
//!   Home
//! ```
//!
//! Apps register their worlds with [`register`] so that [`snapshot_all`] can report every live
//! app on the current thread.

use std::{cell::RefCell, fmt};

use crate::ecs::{
    entity::Entity,
    schedule::Phase,
    storage::Store,
    world::{self, WeakWorld, World},
};

/// A point-in-time description of a world.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub world: world::Id,
    pub entities: Vec<EntityNode>,
    pub systems: Vec<SystemGroup>,
    pub states: Vec<String>,
}

/// An entity with its component labels and its live children.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityNode {
    pub id: u64,
    pub components: Vec<String>,
    pub children: Vec<EntityNode>,
}

/// The systems registered under one phase or transition predicate.
#[derive(Debug, Clone, PartialEq)]
pub struct SystemGroup {
    pub label: String,
    pub systems: Vec<String>,
}

impl World {
    /// Capture a snapshot of this world. Systems that are currently running are listed too.
    pub fn debug_snapshot(&self) -> Snapshot {
        let entities: Vec<EntityNode> = {
            let store = self.store();
            store
                .roots()
                .iter()
                .filter_map(|root| entity_node(&store, *root))
                .collect()
        };

        let systems: Vec<SystemGroup> = {
            let scheduler = self.scheduler();
            let phases = Phase::ALL.into_iter().filter_map(|phase| {
                let systems = scheduler.phase_names(phase);
                (!systems.is_empty()).then(|| SystemGroup {
                    label: phase.name().to_string(),
                    systems,
                })
            });
            let groups = scheduler
                .group_names()
                .into_iter()
                .map(|(label, systems)| SystemGroup { label, systems });
            phases.chain(groups).collect()
        };

        let states: Vec<String> = self
            .states_ref()
            .values()
            .map(|value| format!("{value:?}"))
            .collect();

        Snapshot {
            world: self.id(),
            entities,
            systems,
            states,
        }
    }
}

/// Build the node for a live entity. Stale child links are skipped.
fn entity_node(store: &Store, entity: Entity) -> Option<EntityNode> {
    let row = store.row(entity).ok()?;
    Some(EntityNode {
        id: entity.id(),
        components: row.components().map(|c| c.name()).collect(),
        children: row
            .children()
            .iter()
            .filter_map(|child| entity_node(store, *child))
            .collect(),
    })
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "World {}", self.world)?;
        writeln!(f, "entities")?;
        for node in &self.entities {
            node.write(f, 1)?;
        }
        writeln!(f, "systems")?;
        for group in &self.systems {
            writeln!(f, "  {}: {}", group.label, group.systems.join(", "))?;
        }
        writeln!(f, "states")?;
        for state in &self.states {
            writeln!(f, "  {state}")?;
        }
        Ok(())
    }
}

impl EntityNode {
    fn write(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        writeln!(
            f,
            "{:indent$}{} [{}]",
            "",
            self.id,
            self.components.join(", "),
            indent = depth * 2
        )?;
        for child in &self.children {
            child.write(f, depth + 1)?;
        }
        Ok(())
    }

    /// Number of nodes in this subtree, including itself.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(EntityNode::count).sum::<usize>()
    }
}

thread_local! {
    static WORLDS: RefCell<Vec<WeakWorld>> = const { RefCell::new(Vec::new()) };
}

/// Track `world` for [`snapshot_all`]. Dropped worlds are forgotten automatically.
pub fn register(world: &World) {
    WORLDS.with(|worlds| worlds.borrow_mut().push(world.downgrade()));
}

/// Snapshots of every registered world on this thread that is still alive.
pub fn snapshot_all() -> Vec<Snapshot> {
    let live: Vec<World> = WORLDS.with(|worlds| {
        let mut worlds = worlds.borrow_mut();
        worlds.retain(|weak| weak.upgrade().is_some());
        worlds.iter().filter_map(WeakWorld::upgrade).collect()
    });
    live.iter().map(World::debug_snapshot).collect()
}
