//! A small, single-threaded entity-component-system runtime.
//!
//! Worlds hold entities with dynamically attached components, singleton resources, and states
//! with buffered transitions. Systems are plain zero-argument functions (synchronous or async)
//! registered on fixed phases or on state transitions, and reach their world through ambient
//! accessors while they run. [`core::app::App`] drives startup and per-frame ticks.

extern crate self as rusty_ecs;

pub mod core;
pub mod ecs;
pub mod prelude;
