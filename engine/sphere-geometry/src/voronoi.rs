//! Spherical Voronoi diagrams via the convex-hull dual.
//!
//! For generators on the unit sphere, every face of their convex hull is an
//! empty-circumcap (Delaunay) triangle, and the outward face normal is the
//! Voronoi vertex equidistant from its three generators. The Voronoi region
//! of a generator is the ring of normals of the hull faces around it.

use std::collections::HashSet;
use std::f64::consts::PI;

use glam::DVec3;

use crate::coords::{geodesic_distance, order_ccw_indices, signed_triangle_area};
use crate::error::GeometryError;
use crate::metrics::CellMetrics;

/// Smallest generator count with a closed hull.
pub const MIN_GENERATORS: usize = 4;

/// Generators closer than this (chord length) count as coincident.
const COINCIDENT_TOL: f64 = 1e-10;
/// Distance from a hull plane below which a point counts as lying on it.
const PLANE_TOL: f64 = 1e-12;
/// Allowed deviation of the summed cell areas from 4π.
const AREA_SUM_TOL: f64 = 1e-6;

/// A spherical Voronoi diagram on the unit sphere.
#[derive(Debug, Clone)]
pub struct SphericalVoronoi {
    generators: Vec<DVec3>,
    vertices: Vec<DVec3>,
    /// Vertex indices per generator, counter-clockwise seen from outside
    regions: Vec<Vec<usize>>,
}

impl SphericalVoronoi {
    /// Build the diagram of unit-vector generators.
    ///
    /// Fails when generators coincide or when four of them are cocircular
    /// on a hull face, since the region structure is then ambiguous.
    pub fn new(generators: Vec<DVec3>) -> Result<Self, GeometryError> {
        let n = generators.len();
        if n < MIN_GENERATORS {
            return Err(GeometryError::TooFewPoints {
                min: MIN_GENERATORS,
                got: n,
            });
        }

        for i in 0..n {
            for j in (i + 1)..n {
                if (generators[i] - generators[j]).length() < COINCIDENT_TOL {
                    return Err(GeometryError::DegenerateInput(format!(
                        "generators {i} and {j} coincide"
                    )));
                }
            }
        }

        let (faces, vertices) = hull_faces(&generators)?;

        let mut incident: Vec<Vec<usize>> = vec![Vec::new(); n];
        for (f, face) in faces.iter().enumerate() {
            for &g in face {
                incident[g].push(f);
            }
        }

        let mut regions = Vec::with_capacity(n);
        for (g, faces_of_g) in incident.into_iter().enumerate() {
            if faces_of_g.len() < 3 {
                return Err(GeometryError::DegenerateInput(format!(
                    "generator {g} touches only {} hull faces",
                    faces_of_g.len()
                )));
            }
            let ring: Vec<DVec3> = faces_of_g.iter().map(|&f| vertices[f]).collect();
            let order = order_ccw_indices(generators[g], &ring);
            regions.push(order.into_iter().map(|k| faces_of_g[k]).collect());
        }

        let voronoi = Self {
            generators,
            vertices,
            regions,
        };

        let total: f64 = voronoi.areas().iter().sum();
        if (total - 4.0 * PI).abs() > AREA_SUM_TOL {
            return Err(GeometryError::DegenerateInput(format!(
                "cell areas sum to {total}, expected 4π"
            )));
        }

        Ok(voronoi)
    }

    pub fn generators(&self) -> &[DVec3] {
        &self.generators
    }

    /// Voronoi vertices (unit vectors).
    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    /// Vertex indices bounding each generator's region.
    pub fn regions(&self) -> &[Vec<usize>] {
        &self.regions
    }

    /// Area of each region, in generator order.
    pub fn areas(&self) -> Vec<f64> {
        self.regions
            .iter()
            .zip(&self.generators)
            .map(|(region, &g)| {
                let k = region.len();
                (0..k)
                    .map(|i| {
                        let a = self.vertices[region[i]];
                        let b = self.vertices[region[(i + 1) % k]];
                        signed_triangle_area(g, a, b).abs()
                    })
                    .sum()
            })
            .collect()
    }

    /// Areas, per-region edge lengths and doubled perimeter.
    pub fn metrics(&self) -> CellMetrics {
        let mut edge_lengths = Vec::with_capacity(self.regions.iter().map(Vec::len).sum());
        for region in &self.regions {
            let k = region.len();
            for i in 0..k {
                let a = self.vertices[region[i]];
                let b = self.vertices[region[(i + 1) % k]];
                edge_lengths.push(geodesic_distance(a, b));
            }
        }

        CellMetrics {
            areas: self.areas(),
            perimeter: edge_lengths.iter().sum(),
            edge_lengths,
        }
    }
}

/// A hull face with its outward unit normal and plane offset.
#[derive(Debug, Clone, Copy)]
struct Face {
    corners: [usize; 3],
    normal: DVec3,
    offset: f64,
}

impl Face {
    /// Plane through three points, oriented so that `inside` lies below it.
    fn facing_away(points: &[DVec3], corners: [usize; 3], inside: DVec3) -> Option<Self> {
        let [a, b, c] = corners;
        let raw = (points[b] - points[a]).cross(points[c] - points[a]);
        let scale = raw.length();
        if scale < PLANE_TOL {
            return None;
        }
        let normal = raw / scale;
        let offset = normal.dot(points[a]);
        if normal.dot(inside) - offset > 0.0 {
            return Some(Self {
                corners: [a, c, b],
                normal: -normal,
                offset: -offset,
            });
        }
        Some(Self {
            corners,
            normal,
            offset,
        })
    }

    /// Signed distance of `p` above the face plane.
    #[inline]
    fn height(&self, p: DVec3) -> f64 {
        self.normal.dot(p) - self.offset
    }

    fn edges(&self) -> [(usize, usize); 3] {
        let [a, b, c] = self.corners;
        [(a, b), (b, c), (c, a)]
    }
}

/// Triangular faces of the convex hull of points on the sphere, together
/// with each face's outward unit normal.
///
/// Points are inserted one at a time: the faces a new point sees are
/// removed and the horizon is re-triangulated to it. Faces come out with
/// their lowest corner first and sorted, so the result does not depend on
/// insertion order.
fn hull_faces(points: &[DVec3]) -> Result<(Vec<[usize; 3]>, Vec<DVec3>), GeometryError> {
    let seed = initial_tetrahedron(points)?;
    let [a, b, c, d] = seed;
    let inside = (points[a] + points[b] + points[c] + points[d]) * 0.25;
    let sliver = |corners: [usize; 3]| {
        GeometryError::DegenerateInput(format!("hull face {corners:?} has no area"))
    };

    let mut faces = Vec::with_capacity(2 * points.len());
    for corners in [[a, b, c], [a, b, d], [a, c, d], [b, c, d]] {
        faces.push(Face::facing_away(points, corners, inside).ok_or_else(|| sliver(corners))?);
    }

    let mut visible_edges = HashSet::new();
    for (p, &point) in points.iter().enumerate() {
        if seed.contains(&p) {
            continue;
        }

        let (visible, kept): (Vec<Face>, Vec<Face>) = faces
            .into_iter()
            .partition(|face| face.height(point) > PLANE_TOL);
        if visible.is_empty() {
            return Err(GeometryError::DegenerateInput(format!(
                "generator {p} is not outside the hull of the others"
            )));
        }

        visible_edges.clear();
        visible_edges.extend(visible.iter().flat_map(Face::edges));

        faces = kept;
        for (u, v) in visible.iter().flat_map(Face::edges) {
            if visible_edges.contains(&(v, u)) {
                continue;
            }
            let corners = [u, v, p];
            faces.push(Face::facing_away(points, corners, inside).ok_or_else(|| sliver(corners))?);
        }
    }

    for face in &faces {
        for (l, &p) in points.iter().enumerate() {
            if face.corners.contains(&l) {
                continue;
            }
            let side = face.height(p);
            if side > PLANE_TOL {
                return Err(GeometryError::DegenerateInput(format!(
                    "generator {l} lies outside hull face {:?}",
                    face.corners
                )));
            }
            if side >= -PLANE_TOL {
                let [i, j, k] = face.corners;
                return Err(GeometryError::DegenerateInput(format!(
                    "generators {i}, {j}, {k} are cocircular with generator {l}"
                )));
            }
        }
    }

    // Every generator is a hull vertex, so Euler's formula fixes the count
    let expected = 2 * points.len() - 4;
    if faces.len() != expected {
        return Err(GeometryError::DegenerateInput(format!(
            "hull has {} faces, expected {expected}",
            faces.len()
        )));
    }

    for face in &mut faces {
        face.corners = lowest_first(face.corners);
    }
    faces.sort_unstable_by_key(|face| face.corners);

    Ok(faces
        .into_iter()
        .map(|face| (face.corners, face.normal))
        .unzip())
}

/// Four generators spanning a tetrahedron of positive volume.
fn initial_tetrahedron(points: &[DVec3]) -> Result<[usize; 4], GeometryError> {
    let a = 0;
    let origin = points[a];
    let b = farthest(points, |p| (p - origin).length_squared());
    let axis = points[b] - origin;
    let c = farthest(points, |p| axis.cross(p - origin).length_squared());

    let raw = axis.cross(points[c] - origin);
    if raw.length() < PLANE_TOL {
        return Err(GeometryError::DegenerateInput(
            "generators are collinear".into(),
        ));
    }
    let normal = raw.normalize();
    let d = farthest(points, |p| normal.dot(p - origin).abs());
    if normal.dot(points[d] - origin).abs() <= PLANE_TOL {
        return Err(GeometryError::DegenerateInput(
            "generators are coplanar".into(),
        ));
    }

    Ok([a, b, c, d])
}

fn farthest(points: &[DVec3], key: impl Fn(DVec3) -> f64) -> usize {
    let mut best = 0;
    let mut best_key = f64::NEG_INFINITY;
    for (i, &p) in points.iter().enumerate() {
        let k = key(p);
        if k > best_key {
            best = i;
            best_key = k;
        }
    }
    best
}

/// Rotate a face's corners so the lowest index comes first, keeping the
/// cyclic orientation.
fn lowest_first([a, b, c]: [usize; 3]) -> [usize; 3] {
    if a < b && a < c {
        [a, b, c]
    } else if b < c {
        [b, c, a]
    } else {
        [c, a, b]
    }
}
