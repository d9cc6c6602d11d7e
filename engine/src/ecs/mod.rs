pub mod commands;
pub mod component;
pub mod debug;
pub mod entity;
pub mod error;
pub mod ident;
pub mod query;
pub mod resource;
pub mod schedule;
pub mod state;
pub mod storage;
pub mod system;
pub(crate) mod util;
pub mod world;

pub use component::Component;
pub use entity::Entity;
pub use error::{Error, Result};
pub use ident::Ident;
pub use query::{Filter, Query};
pub use resource::Resource;
pub use schedule::{IntoSchedule, OnEnter, OnExit, OnTransition, Phase, Schedule};
pub use state::{State, StateValue, Transition, in_state};
pub use storage::Shared;
pub use system::{IntoSystem, IntoSystemExt, IntoSystems, System};
pub use world::context::{next_state, query, query_root, res, res_optional, state};
pub use world::{Id as WorldId, WeakWorld, World};
