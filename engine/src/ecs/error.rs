use std::fmt;

use thiserror::Error;

use crate::ecs::world;

/// Errors raised by world operations and returned from systems.
///
/// Every error is reported synchronously at the point of violation. Nothing is retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("entity {0} does not exist in the world")]
    EntityNotFound(String),

    #[error("resource `{0}` has not been inserted")]
    ResourceNotFound(String),

    #[error("state `{0}` has not been inserted")]
    StateNotFound(String),

    #[error("cannot activate world {requested} while world {active} is active")]
    WorldContextConflict {
        active: world::Id,
        requested: world::Id,
    },

    #[error("no active world; world accessors are only usable inside a running system or a world scope")]
    NoActiveWorldContext,

    #[error("invalid schedule `{0}`: expected a fixed phase or a state transition predicate")]
    InvalidScheduleRegistration(String),

    /// A failure raised by user code inside a system.
    #[error("system `{system}` failed: {message}")]
    System { system: String, message: String },
}

impl Error {
    /// Convenience for systems reporting their own failures.
    pub fn system(system: impl Into<String>, message: impl fmt::Display) -> Self {
        Error::System {
            system: system.into(),
            message: message.to_string(),
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
