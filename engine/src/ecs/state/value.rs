use std::{any::Any, fmt, rc::Rc};

use crate::ecs::{
    ident::{self, Ident},
    state::State,
};

trait AnyState: fmt::Debug {
    fn ident(&self) -> Ident;
    fn as_any(&self) -> &dyn Any;
    fn dyn_eq(&self, other: &dyn AnyState) -> bool;
}

impl<S: State> AnyState for S {
    fn ident(&self) -> Ident {
        ident::of::<S>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn dyn_eq(&self, other: &dyn AnyState) -> bool {
        other
            .as_any()
            .downcast_ref::<S>()
            .is_some_and(|other| other == self)
    }
}

/// A type-erased state value, as reported in a [`Transition`](super::Transition).
///
/// Two values are equal when they are of the same kind and equal as that kind.
#[derive(Clone)]
pub struct StateValue(Rc<dyn AnyState>);

impl StateValue {
    pub fn new<S: State>(value: S) -> Self {
        Self(Rc::new(value))
    }

    /// Identity of the value's kind.
    #[inline]
    pub fn ident(&self) -> Ident {
        self.0.ident()
    }

    pub fn downcast_ref<S: State>(&self) -> Option<&S> {
        self.0.as_any().downcast_ref::<S>()
    }

    /// Whether this is a value of kind `S` equal to `value`.
    pub fn is<S: State>(&self, value: &S) -> bool {
        self.downcast_ref::<S>().is_some_and(|current| current == value)
    }
}

impl PartialEq for StateValue {
    fn eq(&self, other: &Self) -> bool {
        self.0.dyn_eq(other.0.as_ref())
    }
}

impl fmt::Debug for StateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

impl<S: State> From<S> for StateValue {
    fn from(value: S) -> Self {
        Self::new(value)
    }
}
