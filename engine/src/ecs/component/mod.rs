//! Components: the data attached to entities.
//!
//! Any `'static` type can become a component by deriving [`Component`]. A component carries no
//! back-reference to its entity or world. At most one value of a given kind is attached to an
//! entity at a time; attaching another replaces it.
//!
//! - [`Set`]: one or more component values handed to `spawn` / `add_components`, either a single
//!   component or a (nested) tuple of them.
//! - [`Spec`]: a set of component kinds, used by query filters.
//!
//! ## Usage
//!
//! ```ignore
//! use rusty_ecs::prelude::*;
//!
//! #[derive(Component)]
//! struct Position { x: f32, y: f32 }
//!
//! #[derive(Component)]
//! struct Marker;
//!
//! let world = World::new();
//! let entity = world.spawn((Position { x: 0.0, y: 0.0 }, Marker));
//! ```

mod set;
mod spec;

pub use set::{Set, Target};
pub use spec::{IntoSpec, Spec};

/// Marker trait for component kinds.
pub trait Component: 'static {}
