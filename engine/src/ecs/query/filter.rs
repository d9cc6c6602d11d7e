use std::{fmt, rc::Rc};

use crate::ecs::{
    component::{IntoSpec, Spec},
    storage::Signature,
};

/// An extra condition on the component kinds of a query candidate.
#[derive(Clone)]
pub enum Filter {
    /// Every kind must be present.
    And(Spec),
    /// No kind may be present.
    Not(Spec),
    /// An arbitrary predicate over the candidate's signature.
    Rule(Rc<dyn Fn(&Signature) -> bool>),
}

impl Filter {
    /// Require every kind in `K`, a component or a tuple of components.
    pub fn and<K: IntoSpec>() -> Self {
        Filter::And(K::into_spec())
    }

    /// Reject candidates carrying any kind in `K`.
    pub fn not<K: IntoSpec>() -> Self {
        Filter::Not(K::into_spec())
    }

    pub fn rule<F>(rule: F) -> Self
    where
        F: Fn(&Signature) -> bool + 'static,
    {
        Filter::Rule(Rc::new(rule))
    }

    /// Whether this filter runs a user predicate.
    #[inline]
    pub fn is_rule(&self) -> bool {
        matches!(self, Filter::Rule(_))
    }

    #[inline]
    pub fn matches(&self, signature: &Signature) -> bool {
        match self {
            Filter::And(spec) => signature.contains_all(spec),
            Filter::Not(spec) => !signature.contains_any(spec),
            Filter::Rule(rule) => rule(signature),
        }
    }
}

impl fmt::Debug for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = |spec: &Spec| {
            spec.idents()
                .iter()
                .map(|ident| ident.name())
                .collect::<Vec<_>>()
        };
        match self {
            Filter::And(spec) => f.debug_tuple("And").field(&names(spec)).finish(),
            Filter::Not(spec) => f.debug_tuple("Not").field(&names(spec)).finish(),
            Filter::Rule(_) => f.write_str("Rule(..)"),
        }
    }
}
