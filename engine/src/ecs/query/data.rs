use crate::{
    all_tuples,
    ecs::{entity::Entity, ident::Ident, query::Parameter, storage::Row},
};

/// The full shape of a query: a parameter, `()`, or a tuple of these.
///
/// Items are built positionally, so `(Entity, Position, Option<Velocity>)` yields
/// `(Entity, Shared<Position>, Option<Shared<Velocity>>)`.
pub trait Data {
    type Item;

    /// Append the component kinds every match must carry.
    fn required(out: &mut Vec<Ident>);

    fn fetch(entity: Entity, row: &Row) -> Option<Self::Item>;
}

impl<P: Parameter> Data for P {
    type Item = P::Item;

    fn required(out: &mut Vec<Ident>) {
        out.extend(<P as Parameter>::required());
    }

    #[inline]
    fn fetch(entity: Entity, row: &Row) -> Option<Self::Item> {
        <P as Parameter>::fetch(entity, row)
    }
}

impl Data for () {
    type Item = ();

    fn required(_out: &mut Vec<Ident>) {}

    #[inline]
    fn fetch(_entity: Entity, _row: &Row) -> Option<()> {
        Some(())
    }
}

macro_rules! tuple_data {
    ($($name: ident),*) => {
        impl<$($name: Data),*> Data for ($($name,)*) {
            type Item = ($(<$name as Data>::Item,)*);

            fn required(out: &mut Vec<Ident>) {
                $(<$name as Data>::required(out);)*
            }

            #[inline]
            fn fetch(entity: Entity, row: &Row) -> Option<Self::Item> {
                Some(($(<$name as Data>::fetch(entity, row)?,)*))
            }
        }
    }
}

all_tuples!(tuple_data);
