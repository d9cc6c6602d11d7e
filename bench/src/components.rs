//! Common component types used across benchmarks.

use rusty_ecs_macros::{Component, Resource};

// =============================================================================
// Transform Components
// =============================================================================

#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Position {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Velocity {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// Simulated delta time, in seconds.
#[derive(Resource)]
pub struct DeltaTime(pub f32);

// =============================================================================
// Particle System Components
// =============================================================================

/// A Particle marker
#[derive(Component, Clone)]
pub struct Particle;

/// Particle lifetime tracking.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Lifetime {
    pub remaining: f32,
    pub total: f32,
}

/// RGBA color (16 bytes).
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

// =============================================================================
// Tree Components
// =============================================================================

/// A node of an entity tree.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Node {
    pub depth: u32,
}

#[derive(Component, Clone, Debug, Default)]
pub struct Label(pub String);

/// Marks nodes that should be visited by layout passes.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Visible;

// =============================================================================
// Filter Test Components (A-Z for wide signatures)
// =============================================================================

/// Shared data component for filter tests.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Data {
    pub value: f64,
}

macro_rules! define_marker_components {
    ($($name:ident),*) => {
        $(
            #[derive(Component, Clone, Copy, Debug, Default)]
            pub struct $name;
        )*
    };
}

define_marker_components!(
    MarkerA, MarkerB, MarkerC, MarkerD, MarkerE, MarkerF, MarkerG, MarkerH, MarkerI, MarkerJ,
    MarkerK, MarkerL, MarkerM, MarkerN, MarkerO, MarkerP, MarkerQ, MarkerR, MarkerS, MarkerT,
    MarkerU, MarkerV, MarkerW, MarkerX, MarkerY, MarkerZ
);
