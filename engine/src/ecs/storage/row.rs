use std::{any::Any, rc::Rc};

use fixedbitset::FixedBitSet;
use indexmap::IndexMap;

use crate::ecs::{
    component::{Component, Spec, Target},
    entity::Entity,
    ident::{self, Ident},
    storage::Shared,
};

/// The set of component kinds attached to an entity, as a bitset over [`Ident::index`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Signature(FixedBitSet);

impl Signature {
    #[inline]
    pub fn contains(&self, ident: Ident) -> bool {
        self.0.contains(ident.index())
    }

    /// True if every kind in `spec` is present.
    #[inline]
    pub fn contains_all(&self, spec: &Spec) -> bool {
        spec.bits().is_subset(&self.0)
    }

    /// True if at least one kind in `spec` is present.
    #[inline]
    pub fn contains_any(&self, spec: &Spec) -> bool {
        !spec.bits().is_disjoint(&self.0)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.count_ones(..)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.count_ones(..) == 0
    }

    fn insert(&mut self, ident: Ident) {
        if ident.index() >= self.0.len() {
            self.0.grow(ident.index() + 1);
        }
        self.0.insert(ident.index());
    }

    fn remove(&mut self, ident: Ident) {
        if ident.index() < self.0.len() {
            self.0.set(ident.index(), false);
        }
    }
}

/// A type-erased component as seen through [`Row::components`].
#[derive(Clone)]
pub struct ErasedComponent {
    ident: Ident,
    value: Rc<dyn Any>,
}

impl ErasedComponent {
    #[inline]
    pub fn ident(&self) -> Ident {
        self.ident
    }

    /// Short label of the component kind.
    pub fn name(&self) -> String {
        self.ident.name()
    }

    pub fn is<C: Component>(&self) -> bool {
        self.ident == ident::of::<C>()
    }

    /// Typed handle to the component, `None` if it is not a `C`.
    pub fn downcast<C: Component>(&self) -> Option<Shared<C>> {
        Shared::from_any(&self.value)
    }
}

impl std::fmt::Debug for ErasedComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ErasedComponent({})", self.ident)
    }
}

/// One entity's storage: its components in insertion order, its signature, and its children.
#[derive(Default)]
pub struct Row {
    components: IndexMap<Ident, Rc<dyn Any>>,
    signature: Signature,
    children: Vec<Entity>,
}

impl Row {
    #[inline]
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    #[inline]
    pub fn children(&self) -> &[Entity] {
        &self.children
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Typed handle to the component of kind `C`, if attached.
    pub fn get<C: Component>(&self) -> Option<Shared<C>> {
        self.components
            .get(&ident::of::<C>())
            .and_then(Shared::from_any)
    }

    pub fn components(&self) -> impl Iterator<Item = ErasedComponent> + '_ {
        self.components.iter().map(|(ident, value)| ErasedComponent {
            ident: *ident,
            value: value.clone(),
        })
    }

    pub(crate) fn remove(&mut self, ident: Ident) -> Option<Rc<dyn Any>> {
        self.signature.remove(ident);
        self.components.shift_remove(&ident)
    }

    pub(crate) fn push_child(&mut self, child: Entity) {
        self.children.push(child);
    }

    /// Remove the first occurrence of `child` from the child list.
    pub(crate) fn unlink_child(&mut self, child: Entity) -> bool {
        match self.children.iter().position(|c| *c == child) {
            Some(index) => {
                self.children.remove(index);
                true
            }
            None => false,
        }
    }
}

impl Target for Row {
    fn apply<C: Component>(&mut self, ident: Ident, value: C) {
        // `IndexMap::insert` keeps the original position when the kind is already attached.
        self.components.insert(ident, Shared::new(value).into_any());
        self.signature.insert(ident);
    }
}
