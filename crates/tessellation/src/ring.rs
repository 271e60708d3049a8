//! Planar predicates shared by the triangulation engines.

use meshing_kernel::config::Tolerance;
use meshing_kernel::geometry::Point2d;

use crate::error::TessellationError;

/// Twice the signed area of triangle `abc`; positive when CCW.
pub fn orient(a: &Point2d, b: &Point2d, c: &Point2d) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

/// Shoelace area of an open ring; positive when CCW.
pub fn signed_area(ring: &[Point2d]) -> f64 {
    let n = ring.len();
    (0..n)
        .map(|i| {
            let (a, b) = (ring[i], ring[(i + 1) % n]);
            a.x * b.y - b.x * a.y
        })
        .sum::<f64>()
        * 0.5
}

/// Open a ring for triangulation: drop the closing duplicate and coincident
/// neighbours, then require at least three distinct points and non-zero area.
pub fn prepare_ring(ring: &[Point2d], tol: &Tolerance) -> Result<Vec<Point2d>, TessellationError> {
    let mut open: Vec<Point2d> = Vec::with_capacity(ring.len());
    for p in ring {
        if !p.is_finite() {
            return Err(TessellationError::geometry("ring contains a non-finite point"));
        }
        if open.last().is_none_or(|q| !tol.is_zero_length(q.distance_to(p))) {
            open.push(*p);
        }
    }
    while open.len() > 1
        && tol.is_zero_length(open[0].distance_to(&open[open.len() - 1]))
    {
        open.pop();
    }

    if open.len() < 3 {
        return Err(TessellationError::geometry(format!(
            "ring has {} distinct points, need at least 3",
            open.len()
        )));
    }
    if tol.is_zero_area(2.0 * signed_area(&open)) {
        return Err(TessellationError::geometry("ring encloses no area"));
    }
    Ok(open)
}

/// Crossing-number test against an indexed ring.
pub fn point_in_ring(p: &Point2d, vertices: &[Point2d], ring: &[usize]) -> bool {
    let n = ring.len();
    let mut inside = false;
    for i in 0..n {
        let a = vertices[ring[i]];
        let b = vertices[ring[(i + 1) % n]];
        if (a.y > p.y) != (b.y > p.y) {
            let x = a.x + (p.y - a.y) / (b.y - a.y) * (b.x - a.x);
            if p.x < x {
                inside = !inside;
            }
        }
    }
    inside
}

/// Inclusive point-in-triangle test for a CCW triangle.
pub fn point_in_triangle(p: &Point2d, a: &Point2d, b: &Point2d, c: &Point2d, eps: f64) -> bool {
    orient(a, b, p) >= -eps && orient(b, c, p) >= -eps && orient(c, a, p) >= -eps
}

fn within_bounds(a: &Point2d, b: &Point2d, p: &Point2d) -> bool {
    p.x >= a.x.min(b.x) && p.x <= a.x.max(b.x) && p.y >= a.y.min(b.y) && p.y <= a.y.max(b.y)
}

/// Whether segments `p1p2` and `q1q2` cross or touch.
pub fn segments_touch(p1: &Point2d, p2: &Point2d, q1: &Point2d, q2: &Point2d, eps: f64) -> bool {
    let d1 = orient(q1, q2, p1);
    let d2 = orient(q1, q2, p2);
    let d3 = orient(p1, p2, q1);
    let d4 = orient(p1, p2, q2);

    let straddles = |u: f64, v: f64| (u > eps && v < -eps) || (u < -eps && v > eps);
    if straddles(d1, d2) && straddles(d3, d4) {
        return true;
    }

    (d1.abs() <= eps && within_bounds(q1, q2, p1))
        || (d2.abs() <= eps && within_bounds(q1, q2, p2))
        || (d3.abs() <= eps && within_bounds(p1, p2, q1))
        || (d4.abs() <= eps && within_bounds(p1, p2, q2))
}
