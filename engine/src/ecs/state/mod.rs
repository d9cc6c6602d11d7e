//! States: singleton values describing a discrete mode, with buffered transitions.
//!
//! Changing a state is a two step process. [`States::request_next`] stages a value; the current
//! value stays visible until [`States::commit`] applies every staged value at once and reports
//! the [`Transition`]. The run loop commits at fixed points (after startup and after each tick)
//! and uses the transition to run `OnEnter` / `OnExit` / `OnTransition` systems.
//!
//! Requesting the value that is already current is not an error; it stages nothing and logs a
//! warning.

mod value;

use indexmap::IndexMap;
use log::{debug, warn};

use crate::ecs::{
    error::{Error, Result},
    ident::{self, Ident},
    world::context,
};

pub use value::StateValue;

/// Marker trait for state kinds.
pub trait State: 'static + Clone + PartialEq + std::fmt::Debug {}

/// The outcome of a commit: for every staged kind, the value left and the value entered.
///
/// `exited[i]` and `entered[i]` belong to the same kind.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Transition {
    pub exited: Vec<StateValue>,
    pub entered: Vec<StateValue>,
}

impl Transition {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.exited.is_empty() && self.entered.is_empty()
    }
}

/// Current and staged state values, keyed by kind identity.
#[derive(Default)]
pub struct States {
    current: IndexMap<Ident, StateValue>,
    pending: IndexMap<Ident, StateValue>,
}

impl States {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a state kind. Both the current and the staged value are set to `initial`, so the
    /// first commit reports the initial value as entered.
    pub fn insert<S: State>(&mut self, initial: S) {
        let value = StateValue::new(initial);
        let ident = value.ident();
        if self.current.contains_key(&ident) {
            warn!("State {} inserted again, overwriting {:?}", ident, value);
        }
        self.current.insert(ident, value.clone());
        self.pending.insert(ident, value);
    }

    /// A clone of the current value of kind `S`.
    pub fn get<S: State>(&self) -> Result<S> {
        self.current
            .get(&ident::of::<S>())
            .and_then(|value| value.downcast_ref::<S>())
            .cloned()
            .ok_or_else(|| Error::StateNotFound(ident::of::<S>().name()))
    }

    /// Stage `next` as the value of its kind for the next commit.
    ///
    /// If `next` equals the current value nothing is staged and a warning is logged. A value
    /// staged earlier for the same kind is kept in that case, and overwritten otherwise.
    pub fn request_next<S: State>(&mut self, next: S) -> Result<()> {
        let ident = ident::of::<S>();
        let current = self
            .current
            .get(&ident)
            .and_then(|value| value.downcast_ref::<S>())
            .ok_or_else(|| Error::StateNotFound(ident.name()))?;

        if *current == next {
            warn!(
                "Requested transition of {} to its current value {:?}, ignoring",
                ident, next
            );
            return Ok(());
        }

        self.pending.insert(ident, StateValue::new(next));
        Ok(())
    }

    /// Apply every staged value in staging order and clear the buffer.
    pub fn commit(&mut self) -> Transition {
        let mut transition = Transition::default();
        for (ident, next) in self.pending.drain(..) {
            if let Some(previous) = self.current.insert(ident, next.clone()) {
                transition.exited.push(previous);
            }
            transition.entered.push(next);
        }
        if !transition.is_empty() {
            debug!(
                "Committed state transition, exited: {:?}, entered: {:?}",
                transition.exited, transition.entered
            );
        }
        transition
    }

    /// Whether any value is staged.
    #[inline]
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Every current value, in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &StateValue> {
        self.current.values()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.current.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }
}

/// Run condition that holds while the active world's state of kind `S` equals `value`.
///
/// Evaluates to false, with a warning, if the kind was never inserted.
pub fn in_state<S: State>(value: S) -> impl FnMut() -> bool + 'static {
    move || match context::state::<S>() {
        Ok(current) => current == value,
        Err(error) => {
            warn!("in_state({:?}) evaluated as false: {}", value, error);
            false
        }
    }
}
