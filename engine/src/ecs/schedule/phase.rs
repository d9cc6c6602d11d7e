//! The fixed execution phases.
//!
//! ```text
//! startup (once)      PreStartup → Startup → [commit] → PostStartup
//! tick (every frame)  First → PreUpdate → Update → PostUpdate → Last → [commit]
//! ```
//!
//! Within a phase, systems are launched in registration order without waiting on each other;
//! the phase completes once every launched system has settled. See [`run_systems`].

use std::{fmt, str::FromStr};

use log::debug;

use crate::{
    core::tasks::Executor,
    ecs::{
        error::{Error, Result},
        system::{Launch, System},
    },
};

/// One of the eight fixed phases, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Phase {
    PreStartup,
    Startup,
    PostStartup,
    First,
    PreUpdate,
    Update,
    PostUpdate,
    Last,
}

impl Phase {
    /// Every phase, in execution order.
    pub const ALL: [Phase; 8] = [
        Phase::PreStartup,
        Phase::Startup,
        Phase::PostStartup,
        Phase::First,
        Phase::PreUpdate,
        Phase::Update,
        Phase::PostUpdate,
        Phase::Last,
    ];

    /// The phases run on every tick.
    pub const TICK: [Phase; 5] = [
        Phase::First,
        Phase::PreUpdate,
        Phase::Update,
        Phase::PostUpdate,
        Phase::Last,
    ];

    /// Position of the phase in execution order.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Phase::PreStartup => "PreStartup",
            Phase::Startup => "Startup",
            Phase::PostStartup => "PostStartup",
            Phase::First => "First",
            Phase::PreUpdate => "PreUpdate",
            Phase::Update => "Update",
            Phase::PostUpdate => "PostUpdate",
            Phase::Last => "Last",
        }
    }

    /// Whether the phase runs once at startup rather than on every tick.
    #[inline]
    pub fn is_startup(self) -> bool {
        self <= Phase::PostStartup
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Phase {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Phase::ALL
            .into_iter()
            .find(|phase| phase.name() == s)
            .ok_or_else(|| Error::InvalidScheduleRegistration(s.to_string()))
    }
}

impl TryFrom<u8> for Phase {
    type Error = Error;

    fn try_from(index: u8) -> Result<Self> {
        Phase::ALL
            .get(index as usize)
            .copied()
            .ok_or_else(|| Error::InvalidScheduleRegistration(index.to_string()))
    }
}

/// Launch every system in order, then join the asynchronous ones.
///
/// A synchronous failure stops further launches. Asynchronous systems already started are
/// dropped when the join ends with an error.
pub(crate) fn run_systems(label: &str, systems: &mut [System]) -> Result<()> {
    debug!("Running {} ({} systems)", label, systems.len());

    let mut executor = Executor::new();
    for system in systems.iter_mut() {
        match system.launch() {
            Launch::Skipped => {}
            Launch::Done(result) => result?,
            Launch::Pending(future) => executor.spawn(future)?,
        }
    }
    executor.join()
}
