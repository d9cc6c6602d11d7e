use crate::{
    all_tuples,
    ecs::{
        component::{Component, IntoSpec},
        ident::{self, Ident},
    },
};

/// Something that component values can be applied to, typically an entity's row in the store.
pub trait Target {
    fn apply<C: Component>(&mut self, ident: Ident, value: C);
}

/// A set of component values to attach to an entity.
///
/// Sets are a single component, `()`, or tuples of sets (up to 26 elements, nestable). Applying a
/// set hands every value, in order, to the target.
pub trait Set: IntoSpec + Sized + 'static {
    /// Apply the component values in this set to the given target. This takes ownership of self.
    fn apply<T: Target>(self, target: &mut T);
}

impl<C: Component> Set for C {
    fn apply<T: Target>(self, target: &mut T) {
        target.apply::<C>(ident::of::<C>(), self);
    }
}

impl Set for () {
    fn apply<T: Target>(self, _target: &mut T) {}
}

macro_rules! tuple_set {
    ($($name: ident),*) => {
        impl<$($name: Set),*> Set for ($($name,)*) {
            fn apply<CT: Target>(self, target: &mut CT) {
                #[allow(non_snake_case)]
                let ( $($name,)* ) = self;
                $(<$name as Set>::apply($name, target);)*
            }
        }
    }
}

all_tuples!(tuple_set);
