//! Entity tree benchmark scenario.
//!
//! Simulates a screen-based UI over nested entities:
//! - One tree of `breadth` children per node, `depth` levels deep
//! - A `Screen` state that flips every few frames
//! - `OnEnter` systems tearing down and rebuilding the whole tree on every flip
//! - A layout pass walking the tree from the visible roots each frame
//!
//! This scenario tests:
//! - Root-scoped queries and child traversal
//! - Subtree spawn/despawn throughput
//! - Commit and transition dispatch overhead

use std::time::Duration;

use rusty_ecs::ecs::commands::{self, ChildBuilder};
use rusty_ecs::prelude::*;

use crate::components::{Label, Node, Visible};
use crate::scenarios::Scenario;

/// Configuration for the tree benchmark.
pub struct TreeConfig {
    /// Children per node.
    pub breadth: u32,
    /// Levels below the root.
    pub depth: u32,
    /// Flip the screen state every this many frames.
    pub switch_every: u64,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            breadth: 4,
            depth: 5,
            switch_every: 10,
        }
    }
}

impl TreeConfig {
    /// Number of nodes in one full tree.
    pub fn node_count(&self) -> usize {
        (0..=self.depth).map(|level| self.breadth.pow(level) as usize).sum()
    }
}

#[derive(State, Debug, Clone, PartialEq)]
pub enum Screen {
    Menu,
    Game,
}

#[derive(Resource, Clone, Copy)]
struct Shape {
    breadth: u32,
    depth: u32,
    switch_every: u64,
}

/// Results of the most recent frame.
#[derive(Resource, Debug, Default)]
pub struct LayoutStats {
    /// Nodes reached by the last layout pass.
    pub visited: u64,
    /// Tree rebuilds so far.
    pub rebuilds: u32,
}

fn grow(builder: &mut ChildBuilder, depth: u32, shape: Shape) -> Result<()> {
    if depth > shape.depth {
        return Ok(());
    }
    for i in 0..shape.breadth {
        let node = Node { depth };
        let label = Label(format!("{depth}.{i}"));
        if i % 2 == 0 {
            builder.spawn_with_children((node, label, Visible), |b| grow(b, depth + 1, shape))?;
        } else {
            builder.spawn_with_children((node, label), |b| grow(b, depth + 1, shape))?;
        }
    }
    Ok(())
}

fn despawn_subtree(entity: Entity) -> Result<()> {
    for child in commands::children(entity)? {
        despawn_subtree(child)?;
    }
    commands::despawn(entity, false)
}

/// System: Replace the current tree with a fresh one.
fn system_rebuild() -> Result<()> {
    let shape = *res::<Shape>()?.borrow();
    let roots: Vec<Entity> = query_root::<Entity>([Filter::and::<Node>()])?.collect();
    for root in roots {
        despawn_subtree(root)?;
    }

    commands::spawn_with_children(
        (Node { depth: 0 }, Label("root".to_string()), Visible),
        |children| grow(children, 1, shape),
    )?;
    res::<LayoutStats>()?.borrow_mut().rebuilds += 1;
    Ok(())
}

/// System: Flip the screen every `switch_every` frames.
fn system_switch_screen() -> Result<()> {
    let frame = res::<Time>()?.borrow().frame;
    let every = res::<Shape>()?.borrow().switch_every;
    if every > 0 && frame % every == 0 {
        let next = match state::<Screen>()? {
            Screen::Menu => Screen::Game,
            Screen::Game => Screen::Menu,
        };
        next_state(next)?;
    }
    Ok(())
}

fn visit(entity: Entity) -> Result<u64> {
    let mut count = 1;
    for child in commands::children(entity)? {
        count += visit(child)?;
    }
    Ok(count)
}

/// System: Walk every visible tree.
fn system_layout() -> Result<()> {
    let mut visited = 0;
    for root in query_root::<Entity>([Filter::and::<(Node, Visible)>()])? {
        visited += visit(root)?;
    }
    res::<LayoutStats>()?.borrow_mut().visited = visited;
    Ok(())
}

/// Entity tree benchmark scenario.
pub struct TreeScenario {
    config: TreeConfig,
    app: App,
    elapsed: Duration,
}

impl TreeScenario {
    pub fn new() -> Self {
        Self::with_config(TreeConfig::default())
    }

    pub fn with_config(config: TreeConfig) -> Self {
        Self {
            config,
            app: App::new(),
            elapsed: Duration::ZERO,
        }
    }

    pub fn stats(&self) -> Result<(u64, u32)> {
        let stats = self.app.world().resource::<LayoutStats>()?;
        let stats = stats.borrow();
        Ok((stats.visited, stats.rebuilds))
    }
}

impl Default for TreeScenario {
    fn default() -> Self {
        Self::new()
    }
}

impl Scenario for TreeScenario {
    fn name(&self) -> &'static str {
        "tree"
    }

    fn description(&self) -> &'static str {
        "Nested entity tree rebuilt on state transitions and walked every frame"
    }

    fn entity_count(&self) -> usize {
        self.app.world().len()
    }

    fn setup(&mut self) -> Result<()> {
        let shape = Shape {
            breadth: self.config.breadth,
            depth: self.config.depth,
            switch_every: self.config.switch_every,
        };
        self.app
            .insert_resource(shape)
            .insert_resource(LayoutStats::default())
            .insert_state(Screen::Menu)
            .add_system(OnEnter(Screen::Menu), system_rebuild)?
            .add_system(OnEnter(Screen::Game), system_rebuild)?
            .add_system(Phase::PreUpdate, system_switch_screen)?
            .add_system(Phase::Update, system_layout)?;
        self.app.startup()
    }

    fn update(&mut self) -> Result<()> {
        self.elapsed += Duration::from_millis(16);
        self.app.update(self.elapsed)
    }

    fn teardown(&mut self) -> Result<()> {
        for entity in self.app.world().roots() {
            self.app.world().scope(|_| despawn_subtree(entity))??;
        }
        Ok(())
    }
}
