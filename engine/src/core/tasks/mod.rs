//! Cooperative task execution for asynchronous systems.
mod executor;

pub use executor::{Executor, YieldNow, yield_now};
