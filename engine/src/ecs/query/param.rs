use crate::ecs::{
    component::Component,
    entity::Entity,
    ident::{self, Ident},
    storage::{Row, Shared},
};

/// A single element of a query.
///
/// - `Entity` yields the entity handle itself and requires nothing.
/// - `C` for any component yields `Shared<C>` and requires `C`.
/// - `Option<C>` yields `Option<Shared<C>>` and requires nothing.
pub trait Parameter {
    type Item;

    /// The component kind an entity must carry to match, if any.
    fn required() -> Option<Ident>;

    /// Build the item for a matching entity. `None` means the entity does not match.
    fn fetch(entity: Entity, row: &Row) -> Option<Self::Item>;
}

impl Parameter for Entity {
    type Item = Entity;

    #[inline]
    fn required() -> Option<Ident> {
        None
    }

    #[inline]
    fn fetch(entity: Entity, _row: &Row) -> Option<Entity> {
        Some(entity)
    }
}

impl<C: Component> Parameter for C {
    type Item = Shared<C>;

    #[inline]
    fn required() -> Option<Ident> {
        Some(ident::of::<C>())
    }

    #[inline]
    fn fetch(_entity: Entity, row: &Row) -> Option<Shared<C>> {
        row.get::<C>()
    }
}

impl<C: Component> Parameter for Option<C> {
    type Item = Option<Shared<C>>;

    #[inline]
    fn required() -> Option<Ident> {
        None
    }

    #[inline]
    fn fetch(_entity: Entity, row: &Row) -> Option<Option<Shared<C>>> {
        Some(row.get::<C>())
    }
}
