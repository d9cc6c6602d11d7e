//! ECS microbenchmarks using Criterion.
//!
//! These benchmarks measure individual world operations in isolation:
//! - Entity spawn/despawn
//! - Component iteration
//! - Filtered and root-scoped queries
//! - Phase dispatch

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rusty_ecs::ecs::{Entity, Filter, Phase, Query, World};
use rusty_ecs_bench::components::*;

// =============================================================================
// Spawn Benchmarks
// =============================================================================

fn bench_spawn(c: &mut Criterion) {
    let mut group = c.benchmark_group("spawn");

    for count in [100, 1_000, 10_000] {
        group.throughput(Throughput::Elements(count as u64));

        group.bench_with_input(BenchmarkId::new("single_component", count), &count, |b, &n| {
            b.iter(|| {
                let world = World::new();
                for _ in 0..n {
                    black_box(world.spawn(Position::default()));
                }
            });
        });

        group.bench_with_input(BenchmarkId::new("four_components", count), &count, |b, &n| {
            b.iter(|| {
                let world = World::new();
                for _ in 0..n {
                    black_box(world.spawn((
                        Position::default(),
                        Velocity::default(),
                        Lifetime::default(),
                        Color::default(),
                    )));
                }
            });
        });

        group.bench_with_input(BenchmarkId::new("children", count), &count, |b, &n| {
            b.iter(|| {
                let world = World::new();
                let root = world.spawn(Node::default());
                for depth in 0..n {
                    black_box(world.spawn_child(root, Node { depth }).unwrap());
                }
            });
        });
    }

    group.finish();
}

// =============================================================================
// Iteration Benchmarks
// =============================================================================

fn populated(n: u32) -> World {
    let world = World::new();
    for i in 0..n {
        world.spawn((
            Position {
                x: i as f32,
                y: 0.0,
                z: 0.0,
            },
            Velocity {
                x: 1.0,
                y: 0.0,
                z: 0.0,
            },
        ));
    }
    world
}

fn bench_simple_iter(c: &mut Criterion) {
    let mut group = c.benchmark_group("simple_iter");

    for count in [1_000, 10_000, 100_000] {
        group.throughput(Throughput::Elements(count as u64));

        group.bench_with_input(BenchmarkId::new("pos_vel", count), &count, |b, &n| {
            let world = populated(n);
            b.iter(|| {
                for (pos, vel) in world.query::<(Position, Velocity)>([]) {
                    let vel = vel.borrow();
                    let mut pos = pos.borrow_mut();
                    pos.x += vel.x;
                    pos.y += vel.y;
                    pos.z += vel.z;
                }
            });
        });

        group.bench_with_input(BenchmarkId::new("single", count), &count, |b, &n| {
            let world = populated(n);
            b.iter(|| {
                for pos in world.query::<Position>([]) {
                    pos.borrow_mut().x += 1.0;
                }
            });
        });

        group.bench_with_input(BenchmarkId::new("entities", count), &count, |b, &n| {
            let world = populated(n);
            b.iter(|| black_box(world.query::<Entity>([]).count()));
        });
    }

    group.finish();
}

// =============================================================================
// Filter Benchmarks
// =============================================================================

fn bench_filters(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter");
    let count = 10_000;
    group.throughput(Throughput::Elements(count as u64));

    // Spread entities over a few signatures so that filters reject a share of them.
    let world = World::new();
    for i in 0..count {
        let data = Data { value: i as f64 };
        match i % 4 {
            0 => world.spawn((data, MarkerA)),
            1 => world.spawn((data, MarkerB)),
            2 => world.spawn((data, MarkerA, MarkerB)),
            _ => world.spawn((data, MarkerA, MarkerB, MarkerZ)),
        };
    }

    group.bench_function("and", |b| {
        b.iter(|| black_box(world.query::<Data>([Filter::and::<(MarkerA, MarkerB)>()]).count()));
    });

    group.bench_function("not", |b| {
        b.iter(|| black_box(world.query::<Data>([Filter::not::<MarkerZ>()]).count()));
    });

    group.bench_function("rule", |b| {
        let wide = Filter::rule(|signature| signature.len() > 2);
        b.iter(|| black_box(world.query::<Data>([wide.clone()]).count()));
    });

    group.bench_function("reusable", |b| {
        let query = Query::<(Entity, Data)>::new().and::<MarkerA>().not::<MarkerB>();
        b.iter(|| black_box(query.iter(&world).count()));
    });

    group.finish();
}

// =============================================================================
// Hierarchy Benchmarks
// =============================================================================

fn bench_hierarchy(c: &mut Criterion) {
    let mut group = c.benchmark_group("hierarchy");

    for roots in [10, 100, 1_000] {
        let world = World::new();
        for _ in 0..roots {
            let root = world.spawn((Node::default(), Visible));
            for depth in 1..=10 {
                world.spawn_child(root, Node { depth }).unwrap();
            }
        }

        group.bench_with_input(BenchmarkId::new("query_root", roots), &world, |b, world| {
            b.iter(|| black_box(world.query_root::<Node>([Filter::and::<Visible>()]).count()));
        });

        group.bench_with_input(BenchmarkId::new("despawn_child", roots), &roots, |b, _| {
            b.iter(|| {
                let root = world.roots()[0];
                let child = world.spawn_child(root, Node::default()).unwrap();
                world.despawn(child, false).unwrap();
            });
        });
    }

    group.finish();
}

// =============================================================================
// Dispatch Benchmarks
// =============================================================================

fn bench_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch");

    for systems in [1, 10, 100] {
        group.throughput(Throughput::Elements(systems as u64));
        group.bench_with_input(BenchmarkId::new("sync", systems), &systems, |b, &n| {
            let world = World::new();
            for _ in 0..n {
                world.add_system(Phase::Update, || {}).unwrap();
            }
            b.iter(|| world.run_phase(Phase::Update).unwrap());
        });

        group.bench_with_input(BenchmarkId::new("async", systems), &systems, |b, &n| {
            let world = World::new();
            for _ in 0..n {
                world
                    .add_system(Phase::Update, || async {
                        rusty_ecs::core::tasks::yield_now().await;
                    })
                    .unwrap();
            }
            b.iter(|| world.run_phase(Phase::Update).unwrap());
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_spawn,
    bench_simple_iter,
    bench_filters,
    bench_hierarchy,
    bench_dispatch
);
criterion_main!(benches);
