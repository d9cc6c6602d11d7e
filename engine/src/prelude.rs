//! Everything needed to write plugins and systems.

pub use rusty_ecs_macros::{Component, Resource, State};

pub use crate::core::{
    app::{App, Config, Plugin},
    frame::FixedRate,
    tasks::yield_now,
    time::Time,
};
pub use crate::ecs::{
    Component, Entity, Error, Filter, IntoSystemExt, OnEnter, OnExit, OnTransition, Phase, Query,
    Resource, Result, Schedule, Shared, State, StateValue, System, Transition, World, commands,
    in_state, next_state, query, query_root, res, res_optional, state,
};
