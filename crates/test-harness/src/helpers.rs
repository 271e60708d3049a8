//! Helper functions: error types, profile builders, mesh math.

use std::collections::HashMap;

use meshing::{Mesh, MeshError};
use meshing_kernel::geometry::Point3d;
use meshing_kernel::shapes::{Arc, ArcOptions, Hole, Line, Polygon, Rectangle};
use meshing_kernel::ShapeError;

// ── Error Type ──────────────────────────────────────────────────────────────

/// Unified error type for the test harness.
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    #[error("profile not found: {name}")]
    ProfileNotFound { name: String },

    #[error("no mesh named: {name}")]
    NoMesh { name: String },

    #[error("assertion failed: {detail}")]
    AssertionFailed { detail: String },

    #[error("oracle failure ({oracle}): {detail}")]
    OracleFailure { oracle: String, detail: String },

    #[error("duplicate name: {name}")]
    DuplicateName { name: String },

    #[error(transparent)]
    Shape(#[from] ShapeError),

    #[error(transparent)]
    Mesh(#[from] MeshError),
}

// ── Profile Builders ────────────────────────────────────────────────────────

/// Axis-aligned rectangle with lower-left corner (x, y), width w, height h.
pub fn rect_profile(x: f64, y: f64, w: f64, h: f64) -> Polygon {
    Rectangle::new([x, y], [x + w, y + h]).into()
}

/// Rectangular hole with lower-left corner (x, y), width w, height h.
pub fn rect_hole(x: f64, y: f64, w: f64, h: f64) -> Hole {
    Rectangle::new([x, y], [x + w, y + h]).to_hole()
}

/// Full-circle hole at (cx, cy) built from a single arc.
pub fn circle_hole(cx: f64, cy: f64, r: f64, precision: u32) -> Result<Hole, ShapeError> {
    let start = [cx + r, cy];
    let arc = Arc::with_options(start, start, [cx, cy], ArcOptions::default().precision(precision))?;
    let mut hole = Hole::new();
    hole.append(arc)?;
    Ok(hole)
}

/// Stadium outline: a `length` x `2 * radius` slot along +X with rounded ends,
/// starting at the origin.
pub fn slot_profile(length: f64, radius: f64) -> Result<Polygon, ShapeError> {
    let d = 2.0 * radius;
    let ccw = ArcOptions::default().clockwise(false);
    let mut poly = Polygon::new();
    poly.append(Line::new([0.0, 0.0], [length, 0.0]))?
        .append(Arc::with_options([length, 0.0], [length, d], [length, radius], ccw)?)?
        .append(Line::new([length, d], [0.0, d]))?
        .append(Arc::with_options([0.0, d], [0.0, 0.0], [0.0, radius], ccw)?)?;
    Ok(poly)
}

/// Regular n-gon inscribed in a circle of radius r centered at the origin.
pub fn regular_polygon(n: usize, r: f64) -> Result<Polygon, ShapeError> {
    let coords: Vec<f64> = (0..n)
        .flat_map(|i| {
            let angle = std::f64::consts::TAU * i as f64 / n as f64;
            [r * angle.cos(), r * angle.sin()]
        })
        .collect();
    Polygon::from_flat_coords(&coords)
}

// ── Mesh Math Utilities ─────────────────────────────────────────────────────

/// Signed volume of the transformed mesh via the divergence theorem.
///
/// Positive when faces wind counter-clockwise seen from outside.
/// Meaningless for open meshes.
pub fn mesh_signed_volume(mesh: &Mesh) -> f64 {
    let volume: f64 = mesh
        .vectors()
        .iter_positions()
        .map(|[a, b, c]| {
            let (a, b, c) = (a.to_vec3(), b.to_vec3(), c.to_vec3());
            a.dot(&b.cross(&c))
        })
        .sum();
    volume / 6.0
}

/// Enclosed volume of a closed mesh.
pub fn mesh_volume(mesh: &Mesh) -> f64 {
    mesh_signed_volume(mesh).abs()
}

/// Total surface area of the transformed mesh.
pub fn mesh_surface_area(mesh: &Mesh) -> f64 {
    mesh.vectors()
        .iter_positions()
        .map(|[a, b, c]| {
            let ab = b.to_vec3() - a.to_vec3();
            let ac = c.to_vec3() - a.to_vec3();
            ab.cross(&ac).length() / 2.0
        })
        .sum()
}

/// Mean of every transformed vertex.
pub fn mesh_centroid(mesh: &Mesh) -> Option<Point3d> {
    Point3d::centroid(&mesh.transformed_vertices())
}

/// Quantize a position so coincident corners from different faces compare equal.
pub fn position_key(p: &Point3d) -> [i64; 3] {
    const SCALE: f64 = 1e6;
    [
        (p.x * SCALE).round() as i64,
        (p.y * SCALE).round() as i64,
        (p.z * SCALE).round() as i64,
    ]
}

/// Count directed edges by quantized position.
///
/// Works on the transformed vector array, so it checks what export writes
/// rather than the engine's index buffer.
pub fn directed_edge_counts(mesh: &Mesh) -> HashMap<([i64; 3], [i64; 3]), usize> {
    let mut counts = HashMap::new();
    for corners in mesh.vectors().iter_positions() {
        let keys = corners.map(|p| position_key(&p));
        for i in 0..3 {
            *counts.entry((keys[i], keys[(i + 1) % 3])).or_insert(0) += 1;
        }
    }
    counts
}

/// Count mesh edges: returns (total_edges, boundary_edges).
///
/// A boundary edge is shared by exactly 1 triangle.
/// For a watertight mesh, boundary_edges should be 0.
pub fn count_mesh_edges(mesh: &Mesh) -> (usize, usize) {
    let mut undirected: HashMap<([i64; 3], [i64; 3]), usize> = HashMap::new();
    for ((a, b), count) in directed_edge_counts(mesh) {
        let key = if a <= b { (a, b) } else { (b, a) };
        *undirected.entry(key).or_insert(0) += count;
    }
    let total = undirected.len();
    let boundary = undirected.values().filter(|&&c| c == 1).count();
    (total, boundary)
}
