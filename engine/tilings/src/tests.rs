//! End-to-end tests for the two search phases.

use std::f64::consts::PI;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use mcts::{run_mcts, Configuration, MctsConfig};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use sphere_geometry::{
    CellMetrics, GeometryError, GeometryEvaluator, HullEvaluator, Tessellation, Topology,
};

use super::*;

fn hull() -> Arc<dyn GeometryEvaluator> {
    Arc::new(HullEvaluator::new())
}

fn five_point_tessellation() -> Tessellation {
    let points = [
        [0.0, 0.0],
        [1.1, 0.3],
        [-2.0, 0.9],
        [2.7, -0.6],
        [-0.8, -1.1],
    ];
    HullEvaluator::new().build_tessellation(&points).unwrap()
}

fn quick_placement() -> PhaseSettings {
    PhaseSettings {
        search: MctsConfig::for_testing(),
        weights: CostWeights::new(25.0, 1.0, 0.0),
        decay: 0.8,
    }
}

fn quick_relaxation(iterations: u64) -> PhaseSettings {
    PhaseSettings {
        search: MctsConfig::for_testing()
            .with_iterations(iterations)
            .with_branching_cap(2_000),
        weights: CostWeights::new(0.0, 1.0, 0.0),
        decay: 0.9,
    }
}

/// Fails every other polygon measurement.
#[derive(Debug, Default)]
struct AlternatingEvaluator {
    inner: HullEvaluator,
    calls: AtomicUsize,
}

impl GeometryEvaluator for AlternatingEvaluator {
    fn build_tessellation(&self, points: &[[f64; 2]]) -> Result<Tessellation, GeometryError> {
        self.inner.build_tessellation(points)
    }

    fn build_polygons(
        &self,
        vertices: &[[f64; 2]],
        topology: &Topology,
    ) -> Result<CellMetrics, GeometryError> {
        if self.calls.fetch_add(1, Ordering::Relaxed) % 2 == 1 {
            return Err(GeometryError::DegenerateInput("rejected by test".into()));
        }
        self.inner.build_polygons(vertices, topology)
    }
}

#[test]
fn test_five_point_placement_end_to_end() {
    let settings = quick_placement();
    let context = Arc::new(SearchContext::new(settings.weights, settings.decay, hull()));
    let mut rng = ChaCha20Rng::seed_from_u64(42);

    let root = Placement::random(5, context, &mut rng).unwrap();
    let result = run_mcts(root, settings.search, &mut rng).unwrap();

    assert!(result.best_cost <= result.root_cost);
    assert_eq!(result.stats.iterations, 100);
    // The triangular bipyramid is the only simplicial polyhedron on 5 vertices
    assert_eq!(result.best.signature(), vec![3, 3, 4, 4, 4]);
    assert!((result.best.cost() - result.best_cost).abs() < 1e-12);
}

#[test]
fn test_placement_keeps_cheapest_run() {
    let outcome = run_placement(5, 3, &quick_placement(), &hull(), 7).unwrap();

    assert_eq!(outcome.run_costs.len(), 3);
    let min = outcome.run_costs.iter().copied().fold(f64::INFINITY, f64::min);
    assert_eq!(outcome.best_cost, min);
    assert_eq!(outcome.run_costs[outcome.best_run as usize], min);
    assert_eq!(outcome.best.signature(), vec![3, 3, 4, 4, 4]);
}

#[test]
fn test_placement_is_reproducible() {
    let settings = quick_placement();
    let a = run_placement(6, 2, &settings, &hull(), 99).unwrap();
    let b = run_placement(6, 2, &settings, &hull(), 99).unwrap();

    assert_eq!(a.best_cost.to_bits(), b.best_cost.to_bits());
    assert_eq!(a.best_run, b.best_run);
    assert!(a.best.equals(&b.best));

    let c = run_placement(6, 2, &settings, &hull(), 100).unwrap();
    assert!(!a.best.equals(&c.best));
}

#[test]
fn test_placement_rejects_small_sizes() {
    let err = run_placement(4, 1, &quick_placement(), &hull(), 0).unwrap_err();
    assert!(matches!(err, TilingError::InvalidSize { min: 5, got: 4 }));

    let err = run_placement(5, 0, &quick_placement(), &hull(), 0).unwrap_err();
    assert!(matches!(err, TilingError::NoRuns));
}

#[test]
fn test_relaxation_end_to_end() {
    let tessellation = five_point_tessellation();
    let initial_perimeter = tessellation.metrics.perimeter;

    let outcome = run_relaxation(&tessellation, &quick_relaxation(50), &hull(), 3).unwrap();

    assert!(outcome.best_cost <= outcome.root_cost);
    assert!(outcome.best.metrics().perimeter <= initial_perimeter + 1e-9);
    assert_eq!(outcome.best.topology(), &tessellation.topology);

    for [lat, lon] in outcome.best.vertices() {
        assert!((-PI..PI).contains(lat));
        assert!((-PI..PI).contains(lon));
    }

    let anchor = tessellation.vertices[0];
    assert_eq!(outcome.best.vertices()[0][0].to_bits(), anchor[0].to_bits());
    assert_eq!(outcome.best.vertices()[0][1].to_bits(), anchor[1].to_bits());
}

#[test]
fn test_relaxation_with_default_weights() {
    let tessellation = five_point_tessellation();
    let settings = PhaseSettings {
        search: MctsConfig::for_testing()
            .with_iterations(80)
            .with_branching_cap(2_000),
        ..PhaseSettings::relaxation(5)
    };
    assert_eq!(settings.weights, CostWeights::relaxation(5));

    let outcome = run_relaxation(&tessellation, &settings, &hull(), 11).unwrap();

    assert!(outcome.best_cost <= outcome.root_cost);
    assert!((outcome.best.cost() - outcome.best_cost).abs() < 1e-12);
    assert_eq!(outcome.best.topology(), &tessellation.topology);

    for [lat, lon] in outcome.best.vertices() {
        assert!((-PI..PI).contains(lat));
        assert!((-PI..PI).contains(lon));
    }

    let anchor = tessellation.vertices[0];
    assert_eq!(outcome.best.vertices()[0][0].to_bits(), anchor[0].to_bits());
    assert_eq!(outcome.best.vertices()[0][1].to_bits(), anchor[1].to_bits());
}

#[test]
fn test_relaxation_resamples_rejected_layouts() {
    let evaluator: Arc<dyn GeometryEvaluator> = Arc::new(AlternatingEvaluator::default());
    let tessellation = five_point_tessellation();

    let outcome = run_relaxation(&tessellation, &quick_relaxation(30), &evaluator, 5).unwrap();

    assert_eq!(outcome.stats.iterations, 30);
    assert_eq!(outcome.stats.expansions, 30);
    assert!(outcome.stats.invalid_samples > 0);
}

#[test]
fn test_seed_schedule() {
    assert_eq!(placement_seed(10, 0), 10);
    assert_eq!(placement_seed(10, 2), 12);
    assert_eq!(relaxation_seed(10, 3), 13);
    assert_eq!(placement_seed(u64::MAX, 1), 0);
}
