//! Dynamic schedules: systems triggered by committed state transitions.
//!
//! Predicates see the two parallel lists produced by a commit. The run loop evaluates every
//! registered predicate after each commit that changed something and runs the systems of the
//! ones that match, in registration order.

use std::{fmt, rc::Rc};

use crate::ecs::state::{State, StateValue};

/// A predicate over a committed transition: `(exited, entered) -> bool`.
#[derive(Clone)]
pub struct Predicate {
    label: String,
    test: Rc<dyn Fn(&[StateValue], &[StateValue]) -> bool>,
}

impl Predicate {
    pub fn new<F>(label: impl Into<String>, test: F) -> Self
    where
        F: Fn(&[StateValue], &[StateValue]) -> bool + 'static,
    {
        Self {
            label: label.into(),
            test: Rc::new(test),
        }
    }

    #[inline]
    pub fn matches(&self, exited: &[StateValue], entered: &[StateValue]) -> bool {
        (self.test)(exited, entered)
    }

    /// Diagnostic label, e.g. `OnEnter(Home)`.
    #[inline]
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

/// Matches when a commit enters the given value.
#[derive(Debug, Clone, PartialEq)]
pub struct OnEnter<S: State>(pub S);

/// Matches when a commit exits the given value.
#[derive(Debug, Clone, PartialEq)]
pub struct OnExit<S: State>(pub S);

/// Matches when a commit exits `from` and enters `to`.
#[derive(Debug, Clone, PartialEq)]
pub struct OnTransition<S: State> {
    pub from: S,
    pub to: S,
}

fn contains<S: State>(values: &[StateValue], value: &S) -> bool {
    values.iter().any(|candidate| candidate.is(value))
}

impl<S: State> From<OnEnter<S>> for Predicate {
    fn from(OnEnter(value): OnEnter<S>) -> Self {
        Predicate::new(format!("OnEnter({value:?})"), move |_, entered| {
            contains(entered, &value)
        })
    }
}

impl<S: State> From<OnExit<S>> for Predicate {
    fn from(OnExit(value): OnExit<S>) -> Self {
        Predicate::new(format!("OnExit({value:?})"), move |exited, _| {
            contains(exited, &value)
        })
    }
}

impl<S: State> From<OnTransition<S>> for Predicate {
    fn from(OnTransition { from, to }: OnTransition<S>) -> Self {
        Predicate::new(
            format!("OnTransition({from:?} -> {to:?})"),
            move |exited, entered| contains(exited, &from) && contains(entered, &to),
        )
    }
}
