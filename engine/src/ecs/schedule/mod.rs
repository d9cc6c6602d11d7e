//! System scheduling.
//!
//! Systems are registered against a [`Schedule`]: either a fixed [`Phase`] or a dynamic
//! [`Predicate`] over committed state transitions.
//!
//! ```text
//! Scheduler
//!   ├── phases[PreStartup .. Last]   Vec<System> each, registration order
//!   └── groups                        one per dynamic registration call
//!         ├── OnEnter(Route::Home)   → [enter_home]
//!         └── OnExit(Route::Home)    → [leave_home]
//! ```
//!
//! Anything accepted by `add_system` converts through [`IntoSchedule`]: phases, their labels
//! (`"Update"`) and indices (`5`), `OnEnter`/`OnExit`/`OnTransition`, and custom predicates from
//! [`Schedule::when`]. A label or index that names no phase is rejected with
//! `InvalidScheduleRegistration` at registration time.

mod phase;
mod transition;

use crate::ecs::{
    error::Result,
    state::{State, StateValue},
    system::System,
};

pub use phase::Phase;
pub(crate) use phase::run_systems;
pub use transition::{OnEnter, OnExit, OnTransition, Predicate};

/// Where a system runs.
#[derive(Debug, Clone)]
pub enum Schedule {
    Phase(Phase),
    Transition(Predicate),
}

impl Schedule {
    /// A dynamic schedule with a custom predicate over `(exited, entered)`.
    pub fn when<F>(test: F) -> Self
    where
        F: Fn(&[StateValue], &[StateValue]) -> bool + 'static,
    {
        Schedule::Transition(Predicate::new("When", test))
    }

    /// Human readable label: the phase name or the predicate label.
    pub fn label(&self) -> &str {
        match self {
            Schedule::Phase(phase) => phase.name(),
            Schedule::Transition(predicate) => predicate.label(),
        }
    }
}

/// Conversion into a [`Schedule`], validated at registration time.
pub trait IntoSchedule {
    fn into_schedule(self) -> Result<Schedule>;
}

impl IntoSchedule for Schedule {
    fn into_schedule(self) -> Result<Schedule> {
        Ok(self)
    }
}

impl IntoSchedule for Phase {
    fn into_schedule(self) -> Result<Schedule> {
        Ok(Schedule::Phase(self))
    }
}

impl IntoSchedule for Predicate {
    fn into_schedule(self) -> Result<Schedule> {
        Ok(Schedule::Transition(self))
    }
}

impl IntoSchedule for &str {
    fn into_schedule(self) -> Result<Schedule> {
        self.parse().map(Schedule::Phase)
    }
}

impl IntoSchedule for u8 {
    fn into_schedule(self) -> Result<Schedule> {
        Phase::try_from(self).map(Schedule::Phase)
    }
}

impl<S: State> IntoSchedule for OnEnter<S> {
    fn into_schedule(self) -> Result<Schedule> {
        Ok(Schedule::Transition(self.into()))
    }
}

impl<S: State> IntoSchedule for OnExit<S> {
    fn into_schedule(self) -> Result<Schedule> {
        Ok(Schedule::Transition(self.into()))
    }
}

impl<S: State> IntoSchedule for OnTransition<S> {
    fn into_schedule(self) -> Result<Schedule> {
        Ok(Schedule::Transition(self.into()))
    }
}

/// Systems registered under one dynamic predicate.
pub struct Group {
    predicate: Predicate,
    systems: Vec<System>,
}

impl Group {
    #[inline]
    pub fn predicate(&self) -> &Predicate {
        &self.predicate
    }

    #[inline]
    pub fn systems(&self) -> &[System] {
        &self.systems
    }

    #[inline]
    pub(crate) fn systems_mut(&mut self) -> &mut Vec<System> {
        &mut self.systems
    }
}

/// Registered systems, per phase and per dynamic group.
///
/// Systems are moved out while they run. Their names stay listed in `running` so that
/// introspection from inside a system still sees them.
pub struct Scheduler {
    phases: [Vec<System>; 8],
    groups: Vec<Group>,
    running: [Vec<String>; 8],
    running_groups: Vec<(String, Vec<String>)>,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            phases: Default::default(),
            groups: Vec::new(),
            running: Default::default(),
            running_groups: Vec::new(),
        }
    }

    /// Register a system. Each dynamic registration forms its own group.
    pub fn add(&mut self, schedule: Schedule, system: System) {
        self.add_group(schedule, vec![system]);
    }

    /// Register systems together. On a phase they are appended in order; on a predicate they
    /// form one group, launched together and joined as a batch.
    pub fn add_group(&mut self, schedule: Schedule, systems: Vec<System>) {
        match schedule {
            Schedule::Phase(phase) => self.phases[phase.index()].extend(systems),
            Schedule::Transition(predicate) => self.groups.push(Group { predicate, systems }),
        }
    }

    /// Systems of a phase, in registration order.
    #[inline]
    pub fn systems(&self, phase: Phase) -> &[System] {
        &self.phases[phase.index()]
    }

    #[inline]
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Total number of registered systems.
    pub fn len(&self) -> usize {
        self.phases.iter().map(Vec::len).sum::<usize>()
            + self.groups.iter().map(|g| g.systems.len()).sum::<usize>()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Names of a phase's systems in registration order, including those currently running.
    pub fn phase_names(&self, phase: Phase) -> Vec<String> {
        let running = self.running[phase.index()].iter().cloned();
        running
            .chain(self.phases[phase.index()].iter().map(|s| s.name().to_string()))
            .collect()
    }

    /// Label and system names of every dynamic group, including groups currently running.
    pub fn group_names(&self) -> Vec<(String, Vec<String>)> {
        let registered = self.groups.iter().map(|group| {
            (
                group.predicate.label().to_string(),
                system_names(&group.systems),
            )
        });
        self.running_groups.iter().cloned().chain(registered).collect()
    }

    /// Move a phase's systems out for execution.
    pub(crate) fn take_phase(&mut self, phase: Phase) -> Vec<System> {
        let systems = std::mem::take(&mut self.phases[phase.index()]);
        self.running[phase.index()].extend(system_names(&systems));
        systems
    }

    /// Put a phase's systems back after execution. Systems registered to the phase in the
    /// meantime are kept after the restored ones.
    pub(crate) fn restore_phase(&mut self, phase: Phase, mut systems: Vec<System>) {
        let running = &mut self.running[phase.index()];
        running.truncate(running.len().saturating_sub(systems.len()));

        let slot = &mut self.phases[phase.index()];
        systems.append(slot);
        *slot = systems;
    }

    pub(crate) fn take_groups(&mut self) -> Vec<Group> {
        let groups = std::mem::take(&mut self.groups);
        self.running_groups.extend(
            groups
                .iter()
                .map(|g| (g.predicate.label().to_string(), system_names(&g.systems))),
        );
        groups
    }

    pub(crate) fn restore_groups(&mut self, mut groups: Vec<Group>) {
        let running = &mut self.running_groups;
        running.truncate(running.len().saturating_sub(groups.len()));

        groups.append(&mut self.groups);
        self.groups = groups;
    }
}

fn system_names(systems: &[System]) -> Vec<String> {
    systems.iter().map(|s| s.name().to_string()).collect()
}
