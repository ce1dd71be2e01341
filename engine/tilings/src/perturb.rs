//! Annealing step shared by both configuration types.

use rand::Rng;
use rand_chacha::ChaCha20Rng;
use sphere_geometry::wrap_angle;

/// Index of the pinned coordinate pair.
pub const ANCHOR: usize = 0;

/// Move every non-anchor pair by a random step of length at most `radius`.
///
/// The direction is uniform in the cube over the free coordinates and then
/// normalised, so the step length is `uniform(0, 1) * radius`. Results are
/// wrapped into `[-π, π)` and the anchor pair is copied bit for bit.
pub fn perturb(coords: &[[f64; 2]], radius: f64, rng: &mut ChaCha20Rng) -> Vec<[f64; 2]> {
    let direction: Vec<[f64; 2]> = (0..coords.len())
        .map(|i| {
            if i == ANCHOR {
                [0.0, 0.0]
            } else {
                [rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0)]
            }
        })
        .collect();

    let norm = direction
        .iter()
        .map(|[a, b]| a * a + b * b)
        .sum::<f64>()
        .sqrt();
    let length = rng.gen::<f64>() * radius;
    let scale = if norm > 0.0 { length / norm } else { 0.0 };

    coords
        .iter()
        .zip(&direction)
        .enumerate()
        .map(|(i, (&[a, b], &[da, db]))| {
            if i == ANCHOR {
                [a, b]
            } else {
                [wrap_angle(a + da * scale), wrap_angle(b + db * scale)]
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use std::f64::consts::PI;

    #[test]
    fn test_step_is_bounded_by_radius() {
        let mut rng = ChaCha20Rng::seed_from_u64(3);
        let coords = vec![[0.1, 0.2], [0.3, -0.4], [-0.5, 0.6], [1.0, 1.0]];

        for _ in 0..200 {
            let moved = perturb(&coords, 0.05, &mut rng);
            let step: f64 = coords
                .iter()
                .zip(&moved)
                .map(|(a, b)| (a[0] - b[0]).powi(2) + (a[1] - b[1]).powi(2))
                .sum::<f64>()
                .sqrt();
            assert!(step <= 0.05 + 1e-12);
            assert_eq!(moved[ANCHOR], coords[ANCHOR]);
        }
    }

    #[test]
    fn test_results_are_wrapped() {
        let mut rng = ChaCha20Rng::seed_from_u64(4);
        let coords = vec![[0.0, 0.0], [3.1, -3.1], [-3.1, 3.1]];

        for _ in 0..200 {
            for [a, b] in perturb(&coords, 20.0, &mut rng) {
                assert!((-PI..PI).contains(&a));
                assert!((-PI..PI).contains(&b));
            }
        }
    }

    #[test]
    fn test_anchor_is_bit_identical() {
        let mut rng = ChaCha20Rng::seed_from_u64(5);
        let coords = vec![[0.123456789, -2.5], [0.0, 0.0]];
        let moved = perturb(&coords, 100.0, &mut rng);
        assert_eq!(moved[0][0].to_bits(), coords[0][0].to_bits());
        assert_eq!(moved[0][1].to_bits(), coords[0][1].to_bits());
    }
}
