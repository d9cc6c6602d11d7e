//! The World: the container for entities, resources, states and systems.
//!
//! A `World` is a cheap, clonable handle (`Rc` inside) and is not `Send`. All clones refer to the
//! same data. Mutation goes through interior mutability; borrows of the underlying stores are
//! only held for the duration of a single operation, never across user code, so systems are free
//! to call back into the world while they run.
//!
//! # Architecture
//!
//! - **Store**: live entities, their components and the root/child tree
//! - **Resources**: singleton values by kind
//! - **States**: current and staged state values
//! - **Scheduler**: systems by phase and by transition predicate
//!
//! Running a phase makes the world the thread's *active* world (see [`context`]) so that the
//! ambient accessors used inside systems resolve to it.
//!
//! Systems are owned by the world, so a system holding a `World` clone keeps its own world alive
//! forever. Systems should use the ambient accessors or capture a [`WeakWorld`] instead.
//!
//! # Example
//!
//! ```ignore
//! use rusty_ecs::prelude::*;
//!
//! let world = World::new();
//! let parent = world.spawn(Position { x: 0.0, y: 0.0 });
//! let child = world.spawn_child(parent, Position { x: 1.0, y: 0.0 })?;
//!
//! world.add_system(Phase::Update, || {
//!     for position in query::<Position>([])? {
//!         position.borrow_mut().x += 1.0;
//!     }
//!     Ok(())
//! })?;
//! world.run_phase(Phase::Update)?;
//! ```

pub mod context;

use std::{
    cell::{Ref, RefCell},
    fmt,
    rc::{Rc, Weak},
    sync::atomic::{AtomicU32, Ordering},
};

use log::debug;

use crate::ecs::{
    component::{Component, Set},
    entity::Entity,
    error::Result,
    query::{self, Data, Filter, Scope},
    resource::{Resource, Resources},
    schedule::{self, IntoSchedule, Phase, Scheduler},
    state::{State, StateValue, States, Transition},
    storage::{ErasedComponent, Shared, Store},
    system::{IntoSystem, IntoSystems},
};

static NEXT_WORLD_ID: AtomicU32 = AtomicU32::new(0);

/// A world identifier, unique within the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Id(u32);

impl Id {
    #[inline]
    pub const fn new(id: u32) -> Self {
        Id(id)
    }

    #[inline]
    pub const fn id(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

struct Inner {
    id: Id,
    store: RefCell<Store>,
    resources: RefCell<Resources>,
    states: RefCell<States>,
    scheduler: RefCell<Scheduler>,
}

/// A handle to a world. Clones share the same world.
#[derive(Clone)]
pub struct World {
    inner: Rc<Inner>,
}

/// A non-owning handle to a world, for systems and other values stored inside the world itself.
#[derive(Clone)]
pub struct WeakWorld(Weak<Inner>);

impl WeakWorld {
    pub fn upgrade(&self) -> Option<World> {
        self.0.upgrade().map(|inner| World { inner })
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for World {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("World")
            .field("id", &self.inner.id)
            .field("entities", &self.len())
            .finish()
    }
}

impl World {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(Inner {
                id: Id(NEXT_WORLD_ID.fetch_add(1, Ordering::Relaxed)),
                store: RefCell::new(Store::new()),
                resources: RefCell::new(Resources::new()),
                states: RefCell::new(States::new()),
                scheduler: RefCell::new(Scheduler::new()),
            }),
        }
    }

    #[inline]
    pub fn id(&self) -> Id {
        self.inner.id
    }

    /// Whether both handles refer to the same world.
    #[inline]
    pub fn ptr_eq(&self, other: &World) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    pub fn downgrade(&self) -> WeakWorld {
        WeakWorld(Rc::downgrade(&self.inner))
    }

    pub(crate) fn store(&self) -> Ref<'_, Store> {
        self.inner.store.borrow()
    }

    pub(crate) fn scheduler(&self) -> Ref<'_, Scheduler> {
        self.inner.scheduler.borrow()
    }

    pub(crate) fn states_ref(&self) -> Ref<'_, States> {
        self.inner.states.borrow()
    }

    // Entities

    /// Spawn a root entity with the given components.
    pub fn spawn<S: Set>(&self, set: S) -> Entity {
        self.inner.store.borrow_mut().spawn(set)
    }

    /// Spawn an entity as the last child of `parent`.
    pub fn spawn_child<S: Set>(&self, parent: Entity, set: S) -> Result<Entity> {
        self.inner.store.borrow_mut().spawn_child(parent, set)
    }

    pub fn add_components<S: Set>(&self, entity: Entity, set: S) -> Result<()> {
        self.inner.store.borrow_mut().add_components(entity, set)
    }

    pub fn remove_component<C: Component>(&self, entity: Entity) -> Result<Option<Shared<C>>> {
        self.inner.store.borrow_mut().remove_component::<C>(entity)
    }

    /// Despawn an entity. Its children stay live; see [`Store::despawn`].
    pub fn despawn(&self, entity: Entity, keep_children: bool) -> Result<()> {
        self.inner.store.borrow_mut().despawn(entity, keep_children)
    }

    pub fn components_of(&self, entity: Entity) -> Result<Vec<ErasedComponent>> {
        self.store().components_of(entity)
    }

    pub fn get<C: Component>(&self, entity: Entity) -> Result<Option<Shared<C>>> {
        self.store().get::<C>(entity)
    }

    pub fn children(&self, entity: Entity) -> Result<Vec<Entity>> {
        self.store().children(entity).map(<[Entity]>::to_vec)
    }

    pub fn roots(&self) -> Vec<Entity> {
        self.store().roots().to_vec()
    }

    /// Every live entity in store order.
    pub fn entities(&self) -> Vec<Entity> {
        self.store().entities().collect()
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.store().contains(entity)
    }

    pub fn len(&self) -> usize {
        self.store().len()
    }

    pub fn is_empty(&self) -> bool {
        self.store().is_empty()
    }

    pub fn entity_by_id(&self, id: u64) -> Result<Entity> {
        self.store().entity_by_id(id)
    }

    pub fn entity_by_str(&self, s: &str) -> Result<Entity> {
        self.store().entity_by_str(s)
    }

    // Queries

    /// Lazily query every live entity.
    pub fn query<D: Data>(&self, filters: impl IntoIterator<Item = Filter>) -> query::Iter<D> {
        query::Iter::new(self.clone(), filters.into_iter().collect(), Scope::All)
    }

    /// Lazily query root entities only.
    pub fn query_root<D: Data>(&self, filters: impl IntoIterator<Item = Filter>) -> query::Iter<D> {
        query::Iter::new(self.clone(), filters.into_iter().collect(), Scope::Roots)
    }

    // Resources

    pub fn insert_resource<R: Resource>(&self, resource: R) {
        self.inner.resources.borrow_mut().insert(resource);
    }

    pub fn resource<R: Resource>(&self) -> Result<Shared<R>> {
        self.inner.resources.borrow().get::<R>()
    }

    pub fn get_resource<R: Resource>(&self) -> Option<Shared<R>> {
        self.inner.resources.borrow().get_optional::<R>()
    }

    pub fn remove_resource<R: Resource>(&self) -> Option<Shared<R>> {
        self.inner.resources.borrow_mut().remove::<R>()
    }

    pub fn contains_resource<R: Resource>(&self) -> bool {
        self.inner.resources.borrow().contains::<R>()
    }

    // States

    pub fn insert_state<S: State>(&self, initial: S) {
        self.inner.states.borrow_mut().insert(initial);
    }

    pub fn state<S: State>(&self) -> Result<S> {
        self.inner.states.borrow().get::<S>()
    }

    /// Stage a state change, applied at the next commit.
    pub fn next_state<S: State>(&self, next: S) -> Result<()> {
        self.inner.states.borrow_mut().request_next(next)
    }

    /// Apply every staged state change.
    pub fn commit_states(&self) -> Transition {
        self.inner.states.borrow_mut().commit()
    }

    /// Current values of every state kind.
    pub fn states(&self) -> Vec<StateValue> {
        self.states_ref().values().cloned().collect()
    }

    // Systems

    /// Register a system. Fails with `InvalidScheduleRegistration` if the schedule is neither a
    /// phase nor a transition predicate.
    pub fn add_system<M>(&self, schedule: impl IntoSchedule, system: impl IntoSystem<M>) -> Result<()> {
        let schedule = schedule.into_schedule()?;
        let system = system.into_system();
        debug!("Registering system {} on {}", system.name(), schedule.label());
        self.inner.scheduler.borrow_mut().add(schedule, system);
        Ok(())
    }

    /// Register several systems under one schedule. Under a transition predicate they form a
    /// single group whose systems are launched together and joined as one batch.
    pub fn add_systems<M>(
        &self,
        schedule: impl IntoSchedule,
        systems: impl IntoSystems<M>,
    ) -> Result<()> {
        let schedule = schedule.into_schedule()?;
        let systems = systems.into_systems();
        for system in &systems {
            debug!("Registering system {} on {}", system.name(), schedule.label());
        }
        self.inner.scheduler.borrow_mut().add_group(schedule, systems);
        Ok(())
    }

    /// Run every system of a phase with this world active.
    pub fn run_phase(&self, phase: Phase) -> Result<()> {
        let _guard = context::enter(self)?;

        let mut systems = self.inner.scheduler.borrow_mut().take_phase(phase);
        let result = schedule::run_systems(phase.name(), &mut systems);
        self.inner
            .scheduler
            .borrow_mut()
            .restore_phase(phase, systems);

        result
    }

    /// Run the systems of every dynamic group whose predicate matches the transition, group by
    /// group in registration order. Returns the number of groups that ran.
    pub fn run_transition(&self, exited: &[StateValue], entered: &[StateValue]) -> Result<usize> {
        let _guard = context::enter(self)?;

        let mut groups = self.inner.scheduler.borrow_mut().take_groups();
        let mut ran = 0;
        let mut result = Ok(());
        for group in groups.iter_mut() {
            if !group.predicate().matches(exited, entered) {
                continue;
            }
            ran += 1;
            let label = group.predicate().label().to_string();
            result = schedule::run_systems(&label, group.systems_mut());
            if result.is_err() {
                break;
            }
        }
        self.inner.scheduler.borrow_mut().restore_groups(groups);

        result.map(|()| ran)
    }

    /// Run `f` with this world as the active world.
    pub fn scope<R>(&self, f: impl FnOnce(&World) -> R) -> Result<R> {
        let _guard = context::enter(self)?;
        Ok(f(self))
    }
}
