//! The active world of the current thread.
//!
//! Systems take no arguments; they reach their world through the accessors in this module
//! (`res`, `state`, `query`, ...) and the mutation helpers in [`commands`](crate::ecs::commands).
//! Those resolve the thread's active world, which is set for the duration of a phase run, a
//! transition run, a plugin build or an explicit [`World::scope`].
//!
//! Only one world may be active at a time. Entering the already active world nests: the guard
//! restores the previous activation when dropped. Entering a different world while one is
//! active fails with `WorldContextConflict`. Accessors used with no active world fail with
//! `NoActiveWorldContext`.

use std::{cell::RefCell, marker::PhantomData};

use crate::ecs::{
    error::{Error, Result},
    query::{self, Data, Filter},
    resource::Resource,
    state::State,
    storage::Shared,
    world::World,
};

thread_local! {
    static ACTIVE: RefCell<Option<World>> = const { RefCell::new(None) };
}

/// Keeps a world active until dropped.
#[must_use = "the world is only active while the guard is alive"]
pub struct Guard {
    previous: Option<World>,
    // Activation is per thread.
    _not_send: PhantomData<*const ()>,
}

impl Drop for Guard {
    fn drop(&mut self) {
        let previous = self.previous.take();
        ACTIVE.with(|active| *active.borrow_mut() = previous);
    }
}

/// Make `world` the active world of this thread.
pub fn enter(world: &World) -> Result<Guard> {
    ACTIVE.with(|active| {
        let mut active = active.borrow_mut();
        if let Some(current) = active.as_ref()
            && !current.ptr_eq(world)
        {
            return Err(Error::WorldContextConflict {
                active: current.id(),
                requested: world.id(),
            });
        }
        Ok(Guard {
            previous: active.replace(world.clone()),
            _not_send: PhantomData,
        })
    })
}

/// The active world, if any.
pub fn active() -> Option<World> {
    ACTIVE.with(|active| active.borrow().clone())
}

/// Run `f` against the active world.
pub fn with_world<R>(f: impl FnOnce(&World) -> R) -> Result<R> {
    // Clone the handle out first so `f` may enter the world again.
    let world = active().ok_or(Error::NoActiveWorldContext)?;
    Ok(f(&world))
}

/// The resource of kind `R` in the active world.
pub fn res<R: Resource>() -> Result<Shared<R>> {
    with_world(|world| world.resource::<R>())?
}

/// The resource of kind `R` in the active world, if inserted.
pub fn res_optional<R: Resource>() -> Result<Option<Shared<R>>> {
    with_world(|world| world.get_resource::<R>())
}

/// The current value of state `S` in the active world.
pub fn state<S: State>() -> Result<S> {
    with_world(|world| world.state::<S>())?
}

/// Stage a state change in the active world.
pub fn next_state<S: State>(next: S) -> Result<()> {
    with_world(|world| world.next_state(next))?
}

/// Query every live entity of the active world.
pub fn query<D: Data>(filters: impl IntoIterator<Item = Filter>) -> Result<query::Iter<D>> {
    with_world(|world| world.query::<D>(filters))
}

/// Query the root entities of the active world.
pub fn query_root<D: Data>(filters: impl IntoIterator<Item = Filter>) -> Result<query::Iter<D>> {
    with_world(|world| world.query_root::<D>(filters))
}

#[cfg(test)]
mod tests {
    use rusty_ecs_macros::{Component, Resource, State};

    use super::*;

    #[derive(Component)]
    struct Tag;

    #[derive(Resource, Debug, PartialEq)]
    struct Gold(u32);

    #[derive(State, Debug, Clone, PartialEq)]
    enum Phase {
        Day,
        Night,
    }

    #[test]
    fn accessors_fail_without_active_world() {
        assert!(active().is_none());
        assert_eq!(res::<Gold>().err(), Some(Error::NoActiveWorldContext));
        assert_eq!(state::<Phase>(), Err(Error::NoActiveWorldContext));
        assert!(matches!(query::<Tag>([]), Err(Error::NoActiveWorldContext)));
    }

    #[test]
    fn accessors_resolve_active_world() {
        let world = World::new();
        world.insert_resource(Gold(3));
        world.insert_state(Phase::Day);
        world.spawn(Tag);

        let _guard = enter(&world).unwrap();
        assert_eq!(res::<Gold>().unwrap().borrow().0, 3);
        assert_eq!(state::<Phase>().unwrap(), Phase::Day);
        assert_eq!(query::<Tag>([]).unwrap().count(), 1);
        assert_eq!(query_root::<Tag>([]).unwrap().count(), 1);

        next_state(Phase::Night).unwrap();
        assert_eq!(state::<Phase>().unwrap(), Phase::Day);
        world.commit_states();
        assert_eq!(state::<Phase>().unwrap(), Phase::Night);
    }

    #[test]
    fn missing_data_errors_pass_through() {
        let world = World::new();
        let _guard = enter(&world).unwrap();
        assert!(matches!(res::<Gold>(), Err(Error::ResourceNotFound(_))));
        assert!(res_optional::<Gold>().unwrap().is_none());
        assert!(matches!(state::<Phase>(), Err(Error::StateNotFound(_))));
        assert!(matches!(next_state(Phase::Night), Err(Error::StateNotFound(_))));
    }

    #[test]
    fn entering_a_different_world_conflicts() {
        let first = World::new();
        let second = World::new();

        let _guard = enter(&first).unwrap();
        assert_eq!(
            enter(&second).err(),
            Some(Error::WorldContextConflict {
                active: first.id(),
                requested: second.id(),
            })
        );
        assert!(active().unwrap().ptr_eq(&first));
    }

    #[test]
    fn entering_the_same_world_nests() {
        let world = World::new();
        {
            let _outer = enter(&world).unwrap();
            {
                let _inner = enter(&world).unwrap();
                assert!(active().is_some());
            }
            assert!(active().unwrap().ptr_eq(&world));
        }
        assert!(active().is_none());
    }

    #[test]
    fn world_can_be_reentered_after_leaving() {
        let first = World::new();
        let second = World::new();

        drop(enter(&first).unwrap());
        let _guard = enter(&second).unwrap();
        assert!(active().unwrap().ptr_eq(&second));
    }
}
