//! Conversion of plain functions and closures into [`System`]s.
//!
//! The marker parameter of [`IntoSystem`] keeps the blanket implementations apart:
//!
//! - `System` itself converts as-is.
//! - `F: FnMut() -> O` where `O` is `()` or `Result<()>` becomes a synchronous system.
//! - `F: FnMut() -> Fut` where `Fut` is a future with one of those outputs becomes an
//!   asynchronous system.
//!
//! Callers never name the marker; it is inferred from the function signature.
//!
//! [`IntoSystems`] extends this to tuples, so several systems can be registered under one
//! schedule in a single call.

use std::{future::Future, marker::PhantomData};

use crate::{
    all_tuple_pairs,
    ecs::{
        error::Result,
        system::{LocalFuture, System, system_name},
    },
};

/// Values a system may return.
pub trait Output: 'static {
    fn into_result(self) -> Result<()>;
}

impl Output for () {
    #[inline]
    fn into_result(self) -> Result<()> {
        Ok(())
    }
}

impl Output for Result<()> {
    #[inline]
    fn into_result(self) -> Result<()> {
        self
    }
}

/// Marker for synchronous function systems.
pub struct SyncMarker<O>(PhantomData<fn() -> O>);

/// Marker for asynchronous function systems.
pub struct AsyncMarker<Fut>(PhantomData<fn() -> Fut>);

/// Conversion into a [`System`].
pub trait IntoSystem<Marker> {
    fn into_system(self) -> System;
}

impl IntoSystem<System> for System {
    #[inline]
    fn into_system(self) -> System {
        self
    }
}

impl<F, O> IntoSystem<SyncMarker<O>> for F
where
    F: FnMut() -> O + 'static,
    O: Output,
{
    fn into_system(mut self) -> System {
        System::from_fn(system_name(std::any::type_name::<F>()), move || {
            self().into_result()
        })
    }
}

impl<F, Fut> IntoSystem<AsyncMarker<Fut>> for F
where
    F: FnMut() -> Fut + 'static,
    Fut: Future + 'static,
    Fut::Output: Output,
{
    fn into_system(mut self) -> System {
        System::from_async(system_name(std::any::type_name::<F>()), move || {
            let future = self();
            Box::pin(async move { future.await.into_result() }) as LocalFuture
        })
    }
}

/// Builder methods available on anything convertible into a system.
pub trait IntoSystemExt<Marker>: IntoSystem<Marker> + Sized {
    /// Gate the system with a run condition evaluated right before each launch.
    fn run_if<C>(self, condition: C) -> System
    where
        C: FnMut() -> bool + 'static,
    {
        self.into_system().run_if(condition)
    }

    /// Override the diagnostic name of the system.
    fn named(self, name: impl Into<std::borrow::Cow<'static, str>>) -> System {
        self.into_system().named(name)
    }
}

impl<Marker, T: IntoSystem<Marker>> IntoSystemExt<Marker> for T {}

/// Marker for tuples of systems.
pub struct SystemTupleMarker;

/// Conversion into one or more [`System`]s: a single system or a tuple of them.
pub trait IntoSystems<Marker> {
    fn into_systems(self) -> Vec<System>;
}

impl<Marker, S: IntoSystem<Marker>> IntoSystems<Marker> for S {
    fn into_systems(self) -> Vec<System> {
        vec![self.into_system()]
    }
}

macro_rules! tuple_systems {
    ($(($name: ident, $marker: ident)),*) => {
        impl<$($name, $marker),*> IntoSystems<(SystemTupleMarker, $($marker,)*)> for ($($name,)*)
        where
            $($name: IntoSystem<$marker>),*
        {
            fn into_systems(self) -> Vec<System> {
                #[allow(non_snake_case)]
                let ( $($name,)* ) = self;
                vec![$($name.into_system()),*]
            }
        }
    }
}

all_tuple_pairs!(tuple_systems);

#[cfg(test)]
mod tests {
    use std::{cell::Cell, rc::Rc};

    use super::*;
    use crate::{
        core::tasks::Executor,
        ecs::{error::Error, system::Launch},
    };

    fn plain() {}

    fn fallible() -> Result<()> {
        Err(Error::system("fallible", "nope"))
    }

    async fn later() {}

    fn convert<M>(system: impl IntoSystem<M>) -> System {
        system.into_system()
    }

    fn convert_all<M>(systems: impl IntoSystems<M>) -> Vec<System> {
        systems.into_systems()
    }

    #[test]
    fn plain_functions_become_sync_systems() {
        let mut system = convert(plain);
        assert!(!system.is_async());
        assert_eq!(system.name(), "plain");
        assert!(matches!(system.launch(), Launch::Done(Ok(()))));
    }

    #[test]
    fn fallible_functions_report_errors() {
        let mut system = convert(fallible);
        assert!(matches!(system.launch(), Launch::Done(Err(_))));
    }

    #[test]
    fn async_functions_become_async_systems() {
        let mut system = convert(later);
        assert!(system.is_async());
        assert_eq!(system.name(), "later");

        let Launch::Pending(future) = system.launch() else {
            panic!("expected a pending launch");
        };
        let mut executor = Executor::new();
        executor.spawn(future).unwrap();
        assert!(executor.join().is_ok());
    }

    #[test]
    fn closures_capture_state() {
        let count = Rc::new(Cell::new(0));
        let counter = count.clone();
        let mut system = convert(move || counter.set(counter.get() + 1));

        system.launch();
        system.launch();
        assert_eq!(count.get(), 2);
        assert!(system.name().ends_with("{{closure}}"));
    }

    #[test]
    fn ext_methods_apply_to_functions() {
        let mut skipped = plain.run_if(|| false);
        assert!(matches!(skipped.launch(), Launch::Skipped));

        let renamed = later.named("renamed");
        assert_eq!(renamed.name(), "renamed");
        assert!(renamed.is_async());
    }

    #[test]
    fn tuples_convert_in_order() {
        let systems = convert_all((plain, later, fallible.named("checked")));
        let names: Vec<_> = systems.iter().map(System::name).collect();
        assert_eq!(names, vec!["plain", "later", "checked"]);
        assert!(systems[1].is_async());

        assert_eq!(convert_all(plain).len(), 1);
    }
}
