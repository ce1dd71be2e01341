//! Tiling benchmarks for performance profiling.
//!
//! Run with: `cargo bench -p tilings`
//!
//! These benchmarks measure:
//! - Voronoi tessellation cost as the point count grows
//! - Fixed-topology polygon measurement
//! - Short placement and relaxation searches

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use mcts::{run_mcts, MctsConfig};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use sphere_geometry::{GeometryEvaluator, HullEvaluator};
use tilings::{run_relaxation, CostWeights, PhaseSettings, Placement, SearchContext};

fn placement_context(size: usize) -> Arc<SearchContext> {
    Arc::new(SearchContext::with_hull(CostWeights::placement(size), 0.8))
}

// =============================================================================
// Geometry Benchmarks
// =============================================================================

fn bench_tessellation(c: &mut Criterion) {
    let mut group = c.benchmark_group("tessellation");

    for size in [5, 10, 20, 40, 80, 160] {
        let mut rng = ChaCha20Rng::seed_from_u64(42);
        let placement = Placement::random(size, placement_context(size), &mut rng).unwrap();
        let points = placement.points().to_vec();
        let evaluator = HullEvaluator::new();

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("hull", size), &points, |b, points| {
            b.iter(|| black_box(evaluator.build_tessellation(points).unwrap()));
        });
    }

    group.finish();
}

fn bench_polygons(c: &mut Criterion) {
    let mut group = c.benchmark_group("polygons");

    for size in [5, 10, 20, 40] {
        let mut rng = ChaCha20Rng::seed_from_u64(7);
        let placement = Placement::random(size, placement_context(size), &mut rng).unwrap();
        let tessellation = placement.into_tessellation();
        let evaluator = HullEvaluator::new();

        group.bench_with_input(
            BenchmarkId::new("fixed_topology", size),
            &tessellation,
            |b, tessellation| {
                b.iter(|| {
                    black_box(
                        evaluator
                            .build_polygons(&tessellation.vertices, &tessellation.topology)
                            .unwrap(),
                    )
                });
            },
        );
    }

    group.finish();
}

// =============================================================================
// Search Benchmarks
// =============================================================================

fn bench_placement_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("placement_search");
    group.sample_size(10);

    for iterations in [100u64, 500, 2000] {
        group.throughput(Throughput::Elements(iterations));
        group.bench_with_input(
            BenchmarkId::new("size_12", iterations),
            &iterations,
            |b, &iterations| {
                let config = MctsConfig::for_testing().with_iterations(iterations);
                let context = placement_context(12);

                b.iter(|| {
                    let mut rng = ChaCha20Rng::seed_from_u64(42);
                    let root = Placement::random(12, Arc::clone(&context), &mut rng).unwrap();
                    black_box(run_mcts(root, config.clone(), &mut rng).unwrap())
                });
            },
        );
    }

    group.finish();
}

fn bench_relaxation_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("relaxation_search");
    group.sample_size(10);

    let mut rng = ChaCha20Rng::seed_from_u64(3);
    let tessellation = Placement::random(12, placement_context(12), &mut rng)
        .unwrap()
        .into_tessellation();
    let evaluator: Arc<dyn GeometryEvaluator> = Arc::new(HullEvaluator::new());

    for iterations in [100u64, 500] {
        let mut settings = PhaseSettings::relaxation(12);
        settings.search = MctsConfig::for_testing()
            .with_iterations(iterations)
            .with_branching_cap(2_000);

        group.throughput(Throughput::Elements(iterations));
        group.bench_with_input(
            BenchmarkId::new("size_12", iterations),
            &settings,
            |b, settings| {
                b.iter(|| black_box(run_relaxation(&tessellation, settings, &evaluator, 42).unwrap()));
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_tessellation,
    bench_polygons,
    bench_placement_search,
    bench_relaxation_search,
);

criterion_main!(benches);
