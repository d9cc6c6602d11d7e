//! Entity handles.
//!
//! An [`Entity`] is an opaque, `Copy` handle carrying a process-unique numeric identifier.
//! Identifiers come from a single global counter and are never reused, so a handle to a
//! despawned entity simply stops resolving in its world instead of aliasing a newer entity.
//!
//! Entities own nothing themselves: components and the child list live in the world's store.

use std::{
    fmt,
    str::FromStr,
    sync::atomic::{AtomicU64, Ordering},
};

use crate::ecs::error::Error;

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

/// A handle to an entity. Equality and ordering follow the numeric identifier.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Entity(u64);

impl Entity {
    /// Allocate the next identifier from the process-wide counter.
    #[inline]
    pub(crate) fn next() -> Self {
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Wrap a raw identifier. The entity is not guaranteed to exist in any world.
    #[inline]
    pub const fn from_raw(id: u64) -> Self {
        Self(id)
    }

    /// The numeric identifier of this entity.
    #[inline]
    pub const fn id(&self) -> u64 {
        self.0
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

/// The string form of an entity is its bare identifier.
impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parses either the display form (`"42"`) or the debug form (`"Entity(42)"`).
impl FromStr for Entity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix("Entity(")
            .and_then(|rest| rest.strip_suffix(')'))
            .unwrap_or(trimmed);
        digits
            .parse::<u64>()
            .map(Entity)
            .map_err(|_| Error::EntityNotFound(s.to_string()))
    }
}
