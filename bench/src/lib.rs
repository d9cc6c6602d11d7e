//! Benchmark utilities for the rusty_ecs runtime.
//!
//! - **Microbenchmarks**: individual world operations (spawn, query, filter, despawn)
//! - **Scenario benchmarks**: whole app ticks over realistic workloads (particles, entity trees
//!   driven by state transitions)
//!
//! # Running Benchmarks
//!
//! ```bash
//! # Run all benchmarks
//! cargo bench -p rusty_ecs_bench
//!
//! # Run specific benchmark group
//! cargo bench -p rusty_ecs_bench -- spawn
//! ```
//!
//! Results are written to `target/criterion/` with HTML reports for visualization.

pub mod components;
pub mod scenarios;
