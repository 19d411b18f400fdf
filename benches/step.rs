//! Benchmarks for the life engine step.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use life_engine::{compute::LifeEngine, schema::Seed};

fn bench_engine_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine_step");

    for size in [64, 128, 256, 512, 1024] {
        let seed = Seed::random(size, size, 25, Some(42));
        let mut engine = LifeEngine::from_seed(&seed).unwrap();

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}x{}", size, size)),
            &size,
            |b, _| {
                b.iter(|| {
                    black_box(&mut engine).step();
                });
            },
        );
    }

    group.finish();
}

fn bench_neighbor_count(c: &mut Criterion) {
    let seed = Seed::random(256, 256, 25, Some(7));
    let engine = LifeEngine::from_seed(&seed).unwrap();
    let grid = engine.grid();

    c.bench_function("live_neighbors_256x256", |b| {
        b.iter(|| {
            let mut total = 0u32;
            for row in 0..grid.rows() {
                for col in 0..grid.cols() {
                    total += grid.live_neighbors(black_box(row), black_box(col)) as u32;
                }
            }
            total
        });
    });
}

fn bench_observer_snapshot(c: &mut Criterion) {
    let mut group = c.benchmark_group("step_with_observer");

    for size in [128, 512] {
        let seed = Seed::random(size, size, 25, Some(3));
        let mut engine = LifeEngine::from_seed(&seed).unwrap();
        let (tx, rx) = std::sync::mpsc::sync_channel(1);
        engine.subscribe(life_engine::compute::ChannelObserver::new(tx));

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}x{}", size, size)),
            &size,
            |b, _| {
                b.iter(|| {
                    engine.step();
                    black_box(rx.try_recv().ok());
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_engine_step,
    bench_neighbor_count,
    bench_observer_snapshot
);
criterion_main!(benches);
