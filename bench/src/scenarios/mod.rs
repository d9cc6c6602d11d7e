//! Realistic workloads driven through a full [`App`](rusty_ecs::core::app::App).
//!
//! # Scenarios
//!
//! - **Particles**: high entity count, flat iteration, constant despawn and respawn
//! - **Tree**: nested entities, root queries and subtree rebuilds on state transitions

pub mod particles;
pub mod tree;

use rusty_ecs::ecs::Result;

pub use particles::{ParticleConfig, ParticleScenario};
pub use tree::{TreeConfig, TreeScenario};

/// Common trait for benchmark scenarios.
pub trait Scenario {
    /// Human-readable name of the scenario.
    fn name(&self) -> &'static str;

    /// Brief description of what this scenario tests.
    fn description(&self) -> &'static str;

    /// Number of live entities.
    fn entity_count(&self) -> usize;

    /// Set up the scenario (spawn entities, register systems).
    fn setup(&mut self) -> Result<()>;

    /// Run one tick of the scenario.
    fn update(&mut self) -> Result<()>;

    /// Clean up the scenario.
    fn teardown(&mut self) -> Result<()>;
}
