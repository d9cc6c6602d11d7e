use std::{
    any::Any,
    cell::{Ref, RefCell, RefMut},
    fmt,
    rc::Rc,
};

/// A shared, mutable handle to a stored value (a component or a resource).
///
/// Handles are cheap to clone and all clones point at the same value, so a change made through
/// one handle is visible to every other holder and to later queries.
pub struct Shared<T: ?Sized>(Rc<RefCell<T>>);

impl<T: 'static> Shared<T> {
    pub fn new(value: T) -> Self {
        Self(Rc::new(RefCell::new(value)))
    }

    /// Recover a typed handle from a type-erased value. `None` if the value is not a `T`.
    pub(crate) fn from_any(value: &Rc<dyn Any>) -> Option<Self> {
        value.clone().downcast::<RefCell<T>>().ok().map(Shared)
    }

    pub(crate) fn into_any(self) -> Rc<dyn Any> {
        self.0
    }

    /// Replace the value, returning the old one.
    pub fn replace(&self, value: T) -> T {
        self.0.replace(value)
    }

    /// Clone the current value out of the handle.
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.0.borrow().clone()
    }
}

impl<T: ?Sized> Shared<T> {
    /// Immutably borrow the value. Panics if it is currently mutably borrowed.
    #[inline]
    pub fn borrow(&self) -> Ref<'_, T> {
        self.0.borrow()
    }

    /// Mutably borrow the value. Panics if it is currently borrowed.
    #[inline]
    pub fn borrow_mut(&self) -> RefMut<'_, T> {
        self.0.borrow_mut()
    }

    /// Whether both handles point at the same stored value.
    #[inline]
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Rc::ptr_eq(&a.0, &b.0)
    }
}

impl<T: ?Sized> Clone for Shared<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T: ?Sized + fmt::Debug> fmt::Debug for Shared<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.try_borrow() {
            Ok(value) => f.debug_tuple("Shared").field(&&*value).finish(),
            Err(_) => f.write_str("Shared(<borrowed>)"),
        }
    }
}
