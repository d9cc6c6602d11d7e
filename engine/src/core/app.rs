//! The application run loop.
//!
//! An [`App`] owns a [`World`] and drives its schedule: startup once, then one steady tick per
//! frame reported by a frame source. State changes staged by systems are committed after the
//! startup phases and after every tick, and the transition groups matching the committed change
//! run right away.
//!
//! ```ignore
//! let mut app = App::new();
//! app.add_plugin(counter_plugin)?
//!     .insert_state(Route::Home)
//!     .add_system(Phase::Update, tick)?;
//! app.run_with_config(&Config::default())?;
//! ```

use std::time::Duration;

use log::{debug, error, info};

use crate::{
    core::{frame::FixedRate, time::{SIXTY_FPS, Time}},
    ecs::{
        error::{Error, Result},
        ident,
        resource::Resource,
        schedule::{IntoSchedule, Phase},
        state::{State, Transition},
        system::{IntoSystem, IntoSystems},
        world::{World, context},
    },
};

/// Run loop settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Time between two ticks
    pub frame_interval: Duration,
    /// Stop after this many ticks, or run until the frame source is stopped
    pub max_frames: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            frame_interval: Duration::from_nanos(SIXTY_FPS),
            max_frames: None,
        }
    }
}

/// A unit of app configuration.
pub trait Plugin {
    fn build(self, app: &mut App) -> Result<()>;

    fn name(&self) -> String {
        ident::short_name(std::any::type_name::<Self>())
    }
}

impl<F> Plugin for F
where
    F: FnOnce(&mut App) -> Result<()>,
{
    fn build(self, app: &mut App) -> Result<()> {
        self(app)
    }
}

/// Progress of the startup phases.
#[derive(Debug, Clone, PartialEq)]
enum Startup {
    Pending,
    Done,
    /// A startup system failed. The app does not tick after this.
    Failed(Error),
}

pub struct App {
    world: World,
    startup: Startup,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    /// An app over a fresh world holding a [`Time`] resource.
    pub fn new() -> Self {
        let world = World::new();
        world.insert_resource(Time::new());
        crate::ecs::debug::register(&world);
        Self {
            world,
            startup: Startup::Pending,
        }
    }

    #[inline]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Whether startup has completed successfully.
    #[inline]
    pub fn is_started(&self) -> bool {
        self.startup == Startup::Done
    }

    /// The error that failed startup, if it did.
    pub fn startup_error(&self) -> Option<&Error> {
        match &self.startup {
            Startup::Failed(error) => Some(error),
            _ => None,
        }
    }

    /// Build `plugin` with the app's world active, so it may use the ambient accessors.
    pub fn add_plugin<P: Plugin>(&mut self, plugin: P) -> Result<&mut Self> {
        debug!("Adding plugin {}", plugin.name());
        let _guard = context::enter(&self.world)?;
        plugin.build(self)?;
        Ok(self)
    }

    pub fn insert_resource<R: Resource>(&mut self, resource: R) -> &mut Self {
        self.world.insert_resource(resource);
        self
    }

    pub fn insert_state<S: State>(&mut self, initial: S) -> &mut Self {
        self.world.insert_state(initial);
        self
    }

    pub fn add_system<M>(
        &mut self,
        schedule: impl IntoSchedule,
        system: impl IntoSystem<M>,
    ) -> Result<&mut Self> {
        self.world.add_system(schedule, system)?;
        Ok(self)
    }

    /// Register several systems under one schedule; see [`World::add_systems`].
    pub fn add_systems<M>(
        &mut self,
        schedule: impl IntoSchedule,
        systems: impl IntoSystems<M>,
    ) -> Result<&mut Self> {
        self.world.add_systems(schedule, systems)?;
        Ok(self)
    }

    /// Run the startup phases. Later calls do nothing after a successful startup and return the
    /// same error after a failed one.
    pub fn startup(&mut self) -> Result<()> {
        match &self.startup {
            Startup::Done => return Ok(()),
            Startup::Failed(error) => return Err(error.clone()),
            Startup::Pending => {}
        }
        info!("Starting world {}", self.world.id());

        let result = self.run_startup();
        self.startup = match &result {
            Ok(()) => Startup::Done,
            Err(e) => {
                error!("Startup of world {} failed: {e}", self.world.id());
                Startup::Failed(e.clone())
            }
        };
        result
    }

    fn run_startup(&self) -> Result<()> {
        self.world.run_phase(Phase::PreStartup)?;
        self.world.run_phase(Phase::Startup)?;
        let transition = self.world.commit_states();
        if !transition.entered.is_empty() {
            self.world.run_transition(&[], &transition.entered)?;
        }
        self.world.run_phase(Phase::PostStartup)
    }

    /// Run one steady tick at `elapsed` time since the start. Runs startup first if needed, and
    /// does not tick if startup failed.
    pub fn update(&mut self, elapsed: Duration) -> Result<()> {
        self.startup()?;

        if let Some(time) = self.world.get_resource::<Time>() {
            time.borrow_mut().advance(elapsed);
        }
        for phase in Phase::TICK {
            self.world.run_phase(phase)?;
        }
        self.apply_transition(self.world.commit_states())
    }

    fn apply_transition(&self, transition: Transition) -> Result<()> {
        if transition.is_empty() {
            return Ok(());
        }
        let ran = self
            .world
            .run_transition(&transition.exited, &transition.entered)?;
        debug!("Transition ran {ran} group(s)");
        Ok(())
    }

    /// Start up, then tick once per frame. Returns the number of ticks run.
    pub fn run<I>(&mut self, frames: I) -> Result<u64>
    where
        I: IntoIterator<Item = Duration>,
    {
        self.startup()?;
        let mut ticks = 0;
        for elapsed in frames {
            self.update(elapsed)?;
            ticks += 1;
        }
        info!("World {} stopped after {ticks} tick(s)", self.world.id());
        Ok(ticks)
    }

    /// Run against a [`FixedRate`] frame source built from `config`.
    pub fn run_with_config(&mut self, config: &Config) -> Result<u64> {
        self.run(FixedRate::from_config(config))
    }
}
