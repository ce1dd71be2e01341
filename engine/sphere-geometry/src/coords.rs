//! Angular coordinates and small spherical-trigonometry helpers.
//!
//! Angles are radians. Longitude/latitude follow the geographic convention:
//! `(lon, lat) = (0, 0)` maps to `+X`, and latitude `π/2` maps to `+Z`.

use std::f64::consts::{PI, TAU};

use glam::DVec3;

/// Unit vector for a longitude/latitude pair.
#[inline]
pub fn spherical_to_cartesian(lon: f64, lat: f64) -> DVec3 {
    DVec3::new(lat.cos() * lon.cos(), lat.cos() * lon.sin(), lat.sin())
}

/// Longitude/latitude of a (not necessarily unit) vector.
#[inline]
pub fn cartesian_to_spherical(p: DVec3) -> (f64, f64) {
    let lon = p.y.atan2(p.x);
    let lat = p.z.atan2((p.x * p.x + p.y * p.y).sqrt());
    (lon, lat)
}

/// Wrap an angle into the periodic domain `[-π, π)`.
#[inline]
pub fn wrap_angle(theta: f64) -> f64 {
    let wrapped = (theta + PI).rem_euclid(TAU) - PI;
    // rem_euclid may round up to exactly TAU for tiny negative inputs
    if wrapped >= PI {
        -PI
    } else {
        wrapped
    }
}

/// Great-circle distance between two unit vectors.
#[inline]
pub fn geodesic_distance(a: DVec3, b: DVec3) -> f64 {
    a.cross(b).length().atan2(a.dot(b))
}

/// Signed area of the spherical triangle `abc` on the unit sphere
/// (Van Oosterom–Strackee). Positive when `abc` winds counter-clockwise
/// seen from outside the sphere.
#[inline]
pub fn signed_triangle_area(a: DVec3, b: DVec3, c: DVec3) -> f64 {
    let det = a.dot(b.cross(c));
    let denom = 1.0 + a.dot(b) + b.dot(c) + c.dot(a);
    2.0 * det.atan2(denom)
}

/// Order vertices counter-clockwise around a centre when viewed from outside.
pub fn order_ccw_indices(center: DVec3, vertices: &[DVec3]) -> Vec<usize> {
    if vertices.len() <= 2 {
        return (0..vertices.len()).collect();
    }

    let up = if center.y.abs() < 0.9 { DVec3::Y } else { DVec3::X };
    let tangent_x = up.cross(center).normalize();
    let tangent_y = center.cross(tangent_x);

    let mut indexed: Vec<(usize, f64)> = vertices
        .iter()
        .enumerate()
        .map(|(i, &v)| {
            let to_point = v - center * center.dot(v);
            (i, to_point.dot(tangent_y).atan2(to_point.dot(tangent_x)))
        })
        .collect();

    indexed.sort_by(|a, b| a.1.total_cmp(&b.1));
    indexed.into_iter().map(|(i, _)| i).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_round_trip() {
        for &(lon, lat) in &[(0.0, 0.0), (1.0, 0.5), (-2.5, -1.2), (3.0, 1.4)] {
            let (lon2, lat2) = cartesian_to_spherical(spherical_to_cartesian(lon, lat));
            assert!((lon - lon2).abs() < 1e-12);
            assert!((lat - lat2).abs() < 1e-12);
        }
    }

    #[test]
    fn test_axes() {
        assert!((spherical_to_cartesian(0.0, 0.0) - DVec3::X).length() < 1e-12);
        assert!((spherical_to_cartesian(FRAC_PI_2, 0.0) - DVec3::Y).length() < 1e-12);
        assert!((spherical_to_cartesian(0.0, FRAC_PI_2) - DVec3::Z).length() < 1e-12);
    }

    #[test]
    fn test_wrap_angle() {
        assert_eq!(wrap_angle(0.0), 0.0);
        assert_eq!(wrap_angle(PI), -PI);
        assert_eq!(wrap_angle(-PI), -PI);
        assert!((wrap_angle(1.5 * PI) + FRAC_PI_2).abs() < 1e-12);
        assert!((wrap_angle(-1.5 * PI) - FRAC_PI_2).abs() < 1e-12);
        assert!((wrap_angle(7.0 * TAU + 0.25) - 0.25).abs() < 1e-9);

        for i in -100..100 {
            let w = wrap_angle(f64::from(i) * 0.37 - 1e-17);
            assert!((-PI..PI).contains(&w), "{w}");
        }
    }

    #[test]
    fn test_geodesic_distance() {
        assert!((geodesic_distance(DVec3::X, DVec3::Y) - FRAC_PI_2).abs() < 1e-12);
        assert!((geodesic_distance(DVec3::X, -DVec3::X) - PI).abs() < 1e-12);
        assert!(geodesic_distance(DVec3::Z, DVec3::Z).abs() < 1e-12);
    }

    #[test]
    fn test_octant_triangle_area() {
        // One octant covers an eighth of the sphere.
        let area = signed_triangle_area(DVec3::X, DVec3::Y, DVec3::Z);
        assert!((area - FRAC_PI_2).abs() < 1e-12);

        let reversed = signed_triangle_area(DVec3::X, DVec3::Z, DVec3::Y);
        assert!((reversed + FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn test_order_ccw() {
        // Around +Z seen from outside, counter-clockwise runs X -> Y -> -X -> -Y.
        let ring = [-DVec3::Y, DVec3::X, -DVec3::X, DVec3::Y];
        let order = order_ccw_indices(DVec3::Z, &ring);
        let start = order.iter().position(|&i| i == 1).unwrap();
        let rotated: Vec<usize> = (0..4).map(|k| order[(start + k) % 4]).collect();
        assert_eq!(rotated, vec![1, 3, 2, 0]);
    }
}
