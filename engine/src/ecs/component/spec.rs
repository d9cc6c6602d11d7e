use fixedbitset::FixedBitSet;

use crate::{
    all_tuples,
    ecs::{
        component::Component,
        ident::{self, Ident},
    },
};

/// A set of component kinds.
///
/// Kinds are kept sorted and deduplicated alongside a bitset indexed by [`Ident::index`], so a
/// spec can be tested against an entity signature with a couple of word-wise operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spec {
    idents: Vec<Ident>,
    bits: FixedBitSet,
}

impl Spec {
    /// An empty component specification.
    pub fn empty() -> Self {
        Self {
            idents: Vec::new(),
            bits: FixedBitSet::new(),
        }
    }

    /// Construct a new Spec from the given kinds.
    pub fn new(idents: impl Into<Vec<Ident>>) -> Self {
        let mut idents = idents.into();
        idents.sort();
        idents.dedup();

        let mut bits = FixedBitSet::with_capacity(idents.last().map_or(0, |last| last.index() + 1));
        for ident in &idents {
            bits.insert(ident.index());
        }

        Self { idents, bits }
    }

    /// The kinds in this spec, in ident order.
    #[inline]
    pub fn idents(&self) -> &[Ident] {
        &self.idents
    }

    /// The kinds in this spec as a bitset.
    #[inline]
    pub fn bits(&self) -> &FixedBitSet {
        &self.bits
    }

    #[inline]
    pub fn contains(&self, ident: Ident) -> bool {
        self.bits.contains(ident.index())
    }

    /// Union of both specs.
    pub fn union(&self, other: &Spec) -> Self {
        let mut idents = Vec::with_capacity(self.idents.len() + other.idents.len());
        idents.extend_from_slice(&self.idents);
        idents.extend_from_slice(&other.idents);
        Self::new(idents)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.idents.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.idents.len()
    }
}

impl Default for Spec {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<Vec<Ident>> for Spec {
    fn from(value: Vec<Ident>) -> Self {
        Spec::new(value)
    }
}

/// Types that describe a set of component kinds: a component, `()`, or tuples of these.
pub trait IntoSpec {
    fn into_spec() -> Spec;
}

impl IntoSpec for () {
    fn into_spec() -> Spec {
        Spec::empty()
    }
}

impl<C: Component> IntoSpec for C {
    fn into_spec() -> Spec {
        Spec::new([ident::of::<C>()])
    }
}

macro_rules! tuple_spec {
    ($($name: ident),*) => {
        impl<$($name: IntoSpec),*> IntoSpec for ($($name,)*) {
            fn into_spec() -> Spec {
                let mut idents = Vec::new();
                $(
                    idents.extend_from_slice(<$name>::into_spec().idents());
                )*
                Spec::new(idents)
            }
        }
    }
}

all_tuples!(tuple_spec);
