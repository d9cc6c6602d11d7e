//! Systems: the units of work run by the scheduler.
//!
//! A system is a zero-argument function. It reaches the world through the ambient accessors
//! (`res`, `state`, `query`, `commands::*`) which resolve the world that is running it.
//!
//! ```text
//! fn movement() -> ecs::Result<()> {
//!     for (velocity, position) in query::<(Velocity, Position)>([])? {
//!         position.borrow_mut().x += velocity.borrow().dx;
//!     }
//!     Ok(())
//! }
//!
//! async fn fetch() {
//!     tasks::yield_now().await;
//! }
//! ```
//!
//! Both forms convert through [`IntoSystem`]: synchronous functions returning `()` or
//! `Result<()>`, and functions returning a future with either output. A system can be gated
//! with a run condition ([`IntoSystemExt::run_if`]) which is evaluated right before each
//! launch; when it is false the system is skipped for that run.

mod function;

use std::{borrow::Cow, future::Future, pin::Pin};

use log::trace;

use crate::ecs::error::Result;

pub use function::{
    AsyncMarker, IntoSystem, IntoSystemExt, IntoSystems, Output, SyncMarker, SystemTupleMarker,
};

/// A boxed, single-threaded future produced by an asynchronous system.
pub type LocalFuture = Pin<Box<dyn Future<Output = Result<()>>>>;

enum Body {
    Sync(Box<dyn FnMut() -> Result<()>>),
    Async(Box<dyn FnMut() -> LocalFuture>),
}

/// The result of launching a system.
pub(crate) enum Launch {
    /// The run condition was false.
    Skipped,
    /// A synchronous system ran to completion.
    Done(Result<()>),
    /// An asynchronous system was started and must be driven to completion.
    Pending(LocalFuture),
}

/// A type-erased system with an optional run condition.
pub struct System {
    name: Cow<'static, str>,
    condition: Option<Box<dyn FnMut() -> bool>>,
    body: Body,
}

impl System {
    /// A synchronous system.
    pub fn from_fn<F>(name: impl Into<Cow<'static, str>>, body: F) -> Self
    where
        F: FnMut() -> Result<()> + 'static,
    {
        Self {
            name: name.into(),
            condition: None,
            body: Body::Sync(Box::new(body)),
        }
    }

    /// An asynchronous system. Each launch creates a new future.
    pub fn from_async<F>(name: impl Into<Cow<'static, str>>, body: F) -> Self
    where
        F: FnMut() -> LocalFuture + 'static,
    {
        Self {
            name: name.into(),
            condition: None,
            body: Body::Async(Box::new(body)),
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn is_async(&self) -> bool {
        matches!(self.body, Body::Async(_))
    }

    #[inline]
    pub fn has_condition(&self) -> bool {
        self.condition.is_some()
    }

    /// Rename the system. The name is only used for diagnostics.
    pub fn named(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = name.into();
        self
    }

    /// Gate the system with a run condition. Conditions added later are combined with `&&`.
    pub fn run_if<C>(mut self, mut condition: C) -> Self
    where
        C: FnMut() -> bool + 'static,
    {
        let combined: Box<dyn FnMut() -> bool> = match self.condition.take() {
            Some(mut existing) => Box::new(move || existing() && condition()),
            None => Box::new(condition),
        };
        self.condition = Some(combined);
        self
    }

    /// Evaluate the run condition and, if it holds, start the system.
    pub(crate) fn launch(&mut self) -> Launch {
        if let Some(condition) = self.condition.as_mut()
            && !condition()
        {
            trace!("Skipping system {}", self.name);
            return Launch::Skipped;
        }

        trace!("Launching system {}", self.name);
        match &mut self.body {
            Body::Sync(body) => Launch::Done(body()),
            Body::Async(body) => Launch::Pending(body()),
        }
    }
}

impl std::fmt::Debug for System {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("System")
            .field("name", &self.name)
            .field("async", &self.is_async())
            .field("conditional", &self.has_condition())
            .finish()
    }
}

/// Shorten a function type name to something readable: `my_system`, or `outer::{{closure}}`.
pub(crate) fn system_name(type_name: &'static str) -> Cow<'static, str> {
    let segments: Vec<&str> = type_name.split("::").collect();
    match segments.as_slice() {
        [.., parent, last] if last.starts_with("{{") => Cow::Owned(format!("{parent}::{last}")),
        [.., last] => Cow::Borrowed(*last),
        [] => Cow::Borrowed(type_name),
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, rc::Rc};

    use super::*;
    use crate::ecs::error::Error;

    #[test]
    fn sync_system_runs_on_launch() {
        let count = Rc::new(Cell::new(0));
        let counter = count.clone();
        let mut system = System::from_fn("count", move || {
            counter.set(counter.get() + 1);
            Ok(())
        });

        assert!(matches!(system.launch(), Launch::Done(Ok(()))));
        assert!(matches!(system.launch(), Launch::Done(Ok(()))));
        assert_eq!(count.get(), 2);
        assert!(!system.is_async());
    }

    #[test]
    fn false_condition_skips() {
        let count = Rc::new(Cell::new(0));
        let counter = count.clone();
        let mut system = System::from_fn("count", move || {
            counter.set(counter.get() + 1);
            Ok(())
        })
        .run_if(|| false);

        assert!(matches!(system.launch(), Launch::Skipped));
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn conditions_combine() {
        let gate = Rc::new(Cell::new(true));
        let open = gate.clone();
        let mut system = System::from_fn("noop", || Ok(()))
            .run_if(|| true)
            .run_if(move || open.get());

        assert!(matches!(system.launch(), Launch::Done(_)));
        gate.set(false);
        assert!(matches!(system.launch(), Launch::Skipped));
    }

    #[test]
    fn errors_are_reported() {
        let mut system = System::from_fn("fails", || Err(Error::system("fails", "boom")));
        match system.launch() {
            Launch::Done(Err(error)) => assert_eq!(error.to_string(), "system `fails` failed: boom"),
            _ => panic!("expected a failed launch"),
        }
    }

    #[test]
    fn async_system_launches_pending() {
        let mut system = System::from_async("later", || Box::pin(async { Ok(()) }));
        assert!(system.is_async());
        assert!(matches!(system.launch(), Launch::Pending(_)));
    }

    #[test]
    fn names_are_shortened() {
        assert_eq!(system_name("my_crate::systems::movement"), "movement");
        assert_eq!(
            system_name("my_crate::plugin::build::{{closure}}"),
            "build::{{closure}}"
        );
        assert_eq!(system_name("tick"), "tick");
        assert_eq!(System::from_fn("a", || Ok(())).named("b").name(), "b");
    }
}
