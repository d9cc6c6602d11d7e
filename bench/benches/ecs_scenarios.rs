//! ECS scenario benchmarks using Criterion.
//!
//! These benchmarks measure whole app ticks over realistic workloads:
//! - Particle system (high entity count, simple components)
//! - Entity tree (nested entities, transitions, root queries)

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rusty_ecs_bench::scenarios::{
    ParticleConfig, ParticleScenario, Scenario, TreeConfig, TreeScenario,
};

// =============================================================================
// Particle System Benchmarks
// =============================================================================

fn bench_particles(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenario/particles");

    for count in [1_000, 10_000, 50_000] {
        group.throughput(Throughput::Elements(count as u64));

        group.bench_with_input(BenchmarkId::new("frame", count), &count, |b, &n| {
            let mut scenario = ParticleScenario::with_config(ParticleConfig {
                particle_count: n,
                ..Default::default()
            });
            scenario.setup().unwrap();

            b.iter(|| scenario.update().unwrap());
        });
    }

    group.finish();
}

// =============================================================================
// Entity Tree Benchmarks
// =============================================================================

fn bench_tree(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenario/tree");

    let configs = [
        (
            "small",
            TreeConfig {
                breadth: 3,
                depth: 3,
                ..Default::default()
            },
        ),
        ("medium", TreeConfig::default()),
        (
            "wide",
            TreeConfig {
                breadth: 10,
                depth: 3,
                ..Default::default()
            },
        ),
    ];

    for (name, config) in configs {
        group.throughput(Throughput::Elements(config.node_count() as u64));
        let mut scenario = TreeScenario::with_config(config);
        scenario.setup().unwrap();
        println!("{}: {} ({} entities)", scenario.name(), scenario.description(), scenario.entity_count());

        group.bench_function(BenchmarkId::new("frame", name), |b| {
            b.iter(|| scenario.update().unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_particles, bench_tree);
criterion_main!(benches);
