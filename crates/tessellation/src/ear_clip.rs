//! Default triangulation engine: hole bridging followed by ear clipping.

use meshing_kernel::config::Tolerance;
use meshing_kernel::geometry::Point2d;
use meshing_kernel::shapes::Boundary;
use tracing::{debug, info, instrument};

use crate::error::TessellationError;
use crate::ring::{orient, point_in_ring, point_in_triangle, prepare_ring, segments_touch, signed_area};
use crate::traits::TriangulationPort;
use crate::types::Triangulation;

/// Ear-clipping triangulator for simple polygons with holes.
///
/// Output vertices are the distinct ring points in input order (outer ring
/// first, then each hole); faces wind counter-clockwise.
#[derive(Debug, Clone, Default)]
pub struct EarClipEngine {
    tolerance: Tolerance,
}

impl EarClipEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tolerance(tolerance: Tolerance) -> Self {
        Self { tolerance }
    }

    pub fn tolerance(&self) -> &Tolerance {
        &self.tolerance
    }
}

impl TriangulationPort for EarClipEngine {
    #[instrument(skip_all, fields(holes = boundary.hole_count()))]
    fn triangulate(&self, boundary: &Boundary) -> Result<Triangulation, TessellationError> {
        let tol = &self.tolerance;

        let outer = prepare_ring(boundary.outer(), tol)?;
        let mut polygon: Vec<usize> = (0..outer.len()).collect();
        if signed_area(&outer) < 0.0 {
            polygon.reverse();
        }
        let mut vertices = outer;

        let mut holes = Vec::with_capacity(boundary.hole_count());
        for ring in boundary.holes() {
            let hole = prepare_ring(ring, tol)?;
            let base = vertices.len();
            let mut indices: Vec<usize> = (base..base + hole.len()).collect();
            if signed_area(&hole) > 0.0 {
                indices.reverse();
            }
            vertices.extend(hole);
            holes.push(indices);
        }

        let polygon = bridge_holes(&vertices, polygon, holes, tol)?;
        let faces = clip_ears(&vertices, polygon, tol)?;

        info!(
            vertex_count = vertices.len(),
            face_count = faces.len(),
            "triangulated boundary"
        );
        Ok(Triangulation::new(vertices, faces))
    }
}

fn max_x(vertices: &[Point2d], ring: &[usize]) -> f64 {
    ring.iter()
        .map(|&i| vertices[i].x)
        .fold(f64::NEG_INFINITY, f64::max)
}

/// Splice every hole into the outer ring through a zero-width bridge,
/// rightmost hole first.
fn bridge_holes(
    vertices: &[Point2d],
    mut polygon: Vec<usize>,
    mut holes: Vec<Vec<usize>>,
    tol: &Tolerance,
) -> Result<Vec<usize>, TessellationError> {
    holes.sort_by(|a, b| max_x(vertices, b).total_cmp(&max_x(vertices, a)));

    for (order, hole) in holes.iter().enumerate() {
        let start = (0..hole.len())
            .max_by(|&a, &b| vertices[hole[a]].x.total_cmp(&vertices[hole[b]].x))
            .unwrap_or(0);
        let m = hole[start];

        let pos = find_bridge(vertices, &polygon, hole, &holes[order + 1..], m, tol).ok_or_else(|| {
            TessellationError::geometry(format!("hole {order} has no visible bridge to the outer ring"))
        })?;
        let p = polygon[pos];

        let mut spliced = Vec::with_capacity(polygon.len() + hole.len() + 2);
        spliced.extend_from_slice(&polygon[..=pos]);
        spliced.extend(hole[start..].iter().chain(&hole[..start]));
        spliced.push(m);
        spliced.push(p);
        spliced.extend_from_slice(&polygon[pos + 1..]);
        polygon = spliced;

        debug!(hole = order, from = m, to = p, "bridged hole");
    }
    Ok(polygon)
}

/// Position in `polygon` of the closest vertex visible from hole vertex `m`.
fn find_bridge(
    vertices: &[Point2d],
    polygon: &[usize],
    hole: &[usize],
    pending: &[Vec<usize>],
    m: usize,
    tol: &Tolerance,
) -> Option<usize> {
    let mp = vertices[m];
    let mut candidates: Vec<usize> = (0..polygon.len())
        .filter(|&pos| vertices[polygon[pos]] != mp)
        .collect();
    candidates.sort_by(|&a, &b| {
        mp.distance_to(&vertices[polygon[a]])
            .total_cmp(&mp.distance_to(&vertices[polygon[b]]))
    });

    let rings: Vec<&[usize]> = std::iter::once(polygon)
        .chain(std::iter::once(hole))
        .chain(pending.iter().map(Vec::as_slice))
        .collect();

    candidates.into_iter().find(|&pos| {
        let pp = vertices[polygon[pos]];
        let blocked = rings.iter().any(|ring| {
            (0..ring.len()).any(|i| {
                let a = vertices[ring[i]];
                let b = vertices[ring[(i + 1) % ring.len()]];
                if a == mp || a == pp || b == mp || b == pp {
                    return false;
                }
                segments_touch(&mp, &pp, &a, &b, tol.area)
            })
        });
        if blocked {
            return false;
        }

        let mid = Point2d::new((mp.x + pp.x) * 0.5, (mp.y + pp.y) * 0.5);
        point_in_ring(&mid, vertices, polygon)
            && !point_in_ring(&mid, vertices, hole)
            && !pending.iter().any(|h| point_in_ring(&mid, vertices, h))
    })
}

fn is_ear(vertices: &[Point2d], ring: &[usize], i: usize, tol: &Tolerance) -> bool {
    let n = ring.len();
    let (ia, ib, ic) = ((i + n - 1) % n, i, (i + 1) % n);
    let (a, b, c) = (vertices[ring[ia]], vertices[ring[ib]], vertices[ring[ic]]);

    if orient(&a, &b, &c) <= tol.area {
        return false;
    }

    ring.iter().enumerate().all(|(k, &v)| {
        if k == ia || k == ib || k == ic {
            return true;
        }
        let p = vertices[v];
        p == a || p == b || p == c || !point_in_triangle(&p, &a, &b, &c, tol.area)
    })
}

/// Clip ears off a CCW (possibly bridged) ring until one triangle remains.
fn clip_ears(
    vertices: &[Point2d],
    mut ring: Vec<usize>,
    tol: &Tolerance,
) -> Result<Vec<[usize; 3]>, TessellationError> {
    let mut faces = Vec::with_capacity(ring.len().saturating_sub(2));

    while ring.len() > 3 {
        let n = ring.len();
        if let Some(i) = (0..n).find(|&i| is_ear(vertices, &ring, i, tol)) {
            faces.push([ring[(i + n - 1) % n], ring[i], ring[(i + 1) % n]]);
            ring.remove(i);
            continue;
        }

        // A vertex with no turn encloses no area and can go without a face.
        let flat = (0..n).find(|&i| {
            let a = vertices[ring[(i + n - 1) % n]];
            let b = vertices[ring[i]];
            let c = vertices[ring[(i + 1) % n]];
            tol.is_zero_area(orient(&a, &b, &c))
        });
        match flat {
            Some(i) => {
                ring.remove(i);
            }
            None => {
                return Err(TessellationError::geometry(
                    "no ear found; ring is self-intersecting",
                ));
            }
        }
    }

    if let [a, b, c] = ring[..] {
        let turn = orient(&vertices[a], &vertices[b], &vertices[c]);
        if turn < -tol.area {
            return Err(TessellationError::geometry(
                "final triangle is inverted; ring is self-intersecting",
            ));
        }
        if turn > tol.area {
            faces.push([a, b, c]);
        }
    }
    Ok(faces)
}

#[cfg(test)]
mod tests {
    use super::*;
    use meshing_kernel::shapes::{Arc, Hole, Polygon, Rectangle};

    fn ring(coords: &[(f64, f64)]) -> Vec<Point2d> {
        coords.iter().map(|&c| Point2d::from(c)).collect()
    }

    fn closed(coords: &[(f64, f64)]) -> Vec<Point2d> {
        let mut r = ring(coords);
        r.push(r[0]);
        r
    }

    fn assert_ccw(tri: &Triangulation) {
        for &[a, b, c] in &tri.faces {
            let turn = orient(&tri.vertices[a], &tri.vertices[b], &tri.vertices[c]);
            assert!(turn > 0.0, "face {a},{b},{c} is not CCW");
        }
    }

    #[test]
    fn test_square() {
        let boundary = Boundary::from_rings(
            closed(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]),
            vec![],
        );
        let tri = EarClipEngine::new().triangulate(&boundary).unwrap();
        assert_eq!(tri.vertex_count(), 4);
        assert_eq!(tri.triangle_count(), 2);
        assert!((tri.area() - 100.0).abs() < 1e-9);
        assert_ccw(&tri);
    }

    #[test]
    fn test_clockwise_input_is_reoriented() {
        // Rectangle corner order walks clockwise.
        let mut poly = Polygon::rectangle([0.0, 0.0], [10.0, 10.0]);
        let tri = EarClipEngine::new().triangulate(poly.finalize().unwrap()).unwrap();
        assert_eq!(tri.vertices[1], Point2d::new(0.0, 10.0));
        assert!((tri.area() - 100.0).abs() < 1e-9);
        assert_ccw(&tri);
    }

    #[test]
    fn test_concave_l_shape() {
        let boundary = Boundary::from_rings(
            closed(&[
                (0.0, 0.0),
                (4.0, 0.0),
                (4.0, 1.0),
                (1.0, 1.0),
                (1.0, 4.0),
                (0.0, 4.0),
            ]),
            vec![],
        );
        let tri = EarClipEngine::new().triangulate(&boundary).unwrap();
        assert_eq!(tri.triangle_count(), 4);
        assert!((tri.area() - 7.0).abs() < 1e-9);
        assert_ccw(&tri);
    }

    #[test]
    fn test_square_with_square_hole() {
        let mut poly = Polygon::rectangle([0.0, 0.0], [10.0, 10.0]);
        poly.add_hole(Rectangle::new([3.0, 3.0], [6.0, 6.0]).to_hole()).unwrap();
        let tri = EarClipEngine::new().triangulate(poly.finalize().unwrap()).unwrap();

        assert_eq!(tri.vertex_count(), 8);
        assert!((tri.area() - 91.0).abs() < 1e-9);
        assert_ccw(&tri);
    }

    #[test]
    fn test_two_holes() {
        let mut poly = Polygon::rectangle([0.0, 0.0], [20.0, 10.0]);
        poly.add_hole(Rectangle::new([2.0, 2.0], [6.0, 6.0]).to_hole()).unwrap();
        poly.add_hole(Rectangle::new([12.0, 3.0], [15.0, 7.0]).to_hole()).unwrap();
        let tri = EarClipEngine::new().triangulate(poly.finalize().unwrap()).unwrap();
        assert!((tri.area() - (200.0 - 16.0 - 12.0)).abs() < 1e-9);
        assert_ccw(&tri);
    }

    #[test]
    fn test_circular_hole() {
        let mut poly = Polygon::rectangle([-5.0, -5.0], [5.0, 5.0]);
        let mut hole = Hole::new();
        hole.append(Arc::new([2.0, 0.0], [2.0, 0.0], [0.0, 0.0]).unwrap())
            .unwrap();
        poly.add_hole(hole).unwrap();
        let tri = EarClipEngine::new().triangulate(poly.finalize().unwrap()).unwrap();

        // 4 outer + 12 distinct hole points
        assert_eq!(tri.vertex_count(), 16);
        let hole_area = signed_area(&tri.vertices[4..]).abs();
        assert!((tri.area() - (100.0 - hole_area)).abs() < 1e-6);
        assert_ccw(&tri);
    }

    #[test]
    fn test_degenerate_ring_rejected() {
        let boundary = Boundary::from_rings(closed(&[(0.0, 0.0), (1.0, 1.0)]), vec![]);
        let err = EarClipEngine::new().triangulate(&boundary).unwrap_err();
        assert!(matches!(err, TessellationError::Geometry { .. }));
    }

    #[test]
    fn test_collinear_vertices_survive() {
        let boundary = Boundary::from_rings(
            closed(&[(0.0, 0.0), (5.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]),
            vec![],
        );
        let tri = EarClipEngine::new().triangulate(&boundary).unwrap();
        assert!((tri.area() - 100.0).abs() < 1e-9);
        assert_ccw(&tri);
    }
}
