//! Particle system benchmark scenario.
//!
//! Simulates a high-volume particle system with:
//! - 100,000 particles
//! - Simple components: Position, Velocity, Lifetime, Color
//! - Systems: movement, lifetime decay, fade, respawn of expired particles
//!
//! This scenario tests:
//! - High entity count iteration performance
//! - Multi-kind query matching
//! - Entity spawn/despawn throughput (particles dying and respawning)

use std::time::Duration;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rusty_ecs::prelude::*;

use crate::components::{Color, DeltaTime, Lifetime, Particle, Position, Velocity};
use crate::scenarios::Scenario;

/// Configuration for the particle benchmark.
pub struct ParticleConfig {
    /// Total number of particles to maintain.
    pub particle_count: usize,
    /// Simulated delta time per frame.
    pub delta_time: f32,
    /// Random seed for reproducibility.
    pub seed: u64,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            particle_count: 100_000,
            delta_time: 1.0 / 60.0, // 60 FPS
            seed: 12345,
        }
    }
}

#[derive(Resource)]
struct ParticleFactory(ChaCha8Rng);

impl ParticleFactory {
    fn create_particle(&mut self) -> (Particle, Position, Velocity, Lifetime, Color) {
        let rng = &mut self.0;
        let pos = Position {
            x: rng.gen_range(-100.0..100.0),
            y: rng.gen_range(-100.0..100.0),
            z: rng.gen_range(-100.0..100.0),
        };
        let vel = Velocity {
            x: rng.gen_range(-10.0..10.0),
            y: rng.gen_range(-10.0..10.0),
            z: rng.gen_range(-10.0..10.0),
        };
        let lifetime = Lifetime {
            remaining: rng.gen_range(1.0..5.0),
            total: 5.0,
        };
        let color = Color {
            r: rng.gen_range(0.0..1.0),
            g: rng.gen_range(0.0..1.0),
            b: rng.gen_range(0.0..1.0),
            a: 1.0,
        };

        (Particle, pos, vel, lifetime, color)
    }
}

/// System: Update particle positions based on velocity.
fn system_movement() -> Result<()> {
    let dt = res::<DeltaTime>()?.borrow().0;
    for (pos, vel) in query::<(Position, Velocity)>([])? {
        let vel = vel.borrow();
        let mut pos = pos.borrow_mut();
        pos.x += vel.x * dt;
        pos.y += vel.y * dt;
        pos.z += vel.z * dt;
    }
    Ok(())
}

/// System: Decay particle lifetimes.
fn system_lifetime_decay() -> Result<()> {
    let dt = res::<DeltaTime>()?.borrow().0;
    for lifetime in query::<Lifetime>([])? {
        lifetime.borrow_mut().remaining -= dt;
    }
    Ok(())
}

/// System: Fade particles based on remaining lifetime.
fn system_fade() -> Result<()> {
    for (lifetime, color) in query::<(Lifetime, Color)>([])? {
        let lifetime = lifetime.borrow();
        color.borrow_mut().a = (lifetime.remaining / lifetime.total).max(0.0);
    }
    Ok(())
}

/// System: Replace expired particles (lifetime <= 0) with fresh ones.
fn system_respawn_expired() -> Result<()> {
    let expired: Vec<Entity> = query::<(Entity, Lifetime)>([Filter::and::<Particle>()])?
        .filter(|(_, lifetime)| lifetime.borrow().remaining <= 0.0)
        .map(|(entity, _)| entity)
        .collect();
    if expired.is_empty() {
        return Ok(());
    }

    let factory = res::<ParticleFactory>()?;
    let mut factory = factory.borrow_mut();
    for entity in expired {
        commands::despawn(entity, false)?;
        commands::spawn(factory.create_particle())?;
    }
    Ok(())
}

/// Particle system benchmark scenario.
pub struct ParticleScenario {
    config: ParticleConfig,
    app: App,
    elapsed: Duration,
}

impl ParticleScenario {
    /// Create a new particle scenario with default config.
    pub fn new() -> Self {
        Self::with_config(ParticleConfig::default())
    }

    /// Create a new particle scenario with custom config.
    pub fn with_config(config: ParticleConfig) -> Self {
        Self {
            config,
            app: App::new(),
            elapsed: Duration::ZERO,
        }
    }

    /// Get current particle count.
    pub fn current_count(&self) -> usize {
        self.app.world().query::<()>([Filter::and::<Particle>()]).count()
    }
}

impl Default for ParticleScenario {
    fn default() -> Self {
        Self::new()
    }
}

impl Scenario for ParticleScenario {
    fn name(&self) -> &'static str {
        "particles"
    }

    fn description(&self) -> &'static str {
        "High-volume particle system with movement, lifetime, and respawn"
    }

    fn entity_count(&self) -> usize {
        self.app.world().len()
    }

    fn setup(&mut self) -> Result<()> {
        let mut factory = ParticleFactory(ChaCha8Rng::seed_from_u64(self.config.seed));
        for _ in 0..self.config.particle_count {
            self.app.world().spawn(factory.create_particle());
        }

        self.app
            .insert_resource(DeltaTime(self.config.delta_time))
            .insert_resource(factory)
            .add_system(Phase::Update, system_movement)?
            .add_system(Phase::Update, system_fade)?
            .add_system(Phase::Update, system_lifetime_decay)?
            .add_system(Phase::PostUpdate, system_respawn_expired)?;
        self.app.startup()
    }

    fn update(&mut self) -> Result<()> {
        self.elapsed += Duration::from_secs_f32(self.config.delta_time);
        self.app.update(self.elapsed)
    }

    fn teardown(&mut self) -> Result<()> {
        for entity in self.app.world().entities() {
            self.app.world().despawn(entity, false)?;
        }
        Ok(())
    }
}
