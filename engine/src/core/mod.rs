//! Hosting for worlds: the run loop, frame sources, timing, tasks and log collection.
pub mod app;
pub mod frame;
pub mod log;
pub mod tasks;
pub mod time;
