//! Verification oracles - pure functions returning pass/fail verdicts.
//!
//! Each oracle returns an `OracleVerdict` with diagnostic detail, not panics.
//! This lets callers collect all failures in one pass.

use meshing::Mesh;
use meshing_kernel::geometry::Point2d;
use meshing_kernel::shapes::Boundary;
use meshing_tessellation::Triangulation;

use crate::helpers::{directed_edge_counts, mesh_signed_volume};

const AREA_EPSILON: f64 = 1e-12;

/// The result of a single oracle check.
#[derive(Debug, Clone)]
pub struct OracleVerdict {
    pub oracle_name: String,
    pub passed: bool,
    pub detail: String,
    pub value: Option<f64>,
}

impl OracleVerdict {
    fn pass(name: &str, detail: String) -> Self {
        Self {
            oracle_name: name.to_string(),
            passed: true,
            detail,
            value: None,
        }
    }

    fn pass_val(name: &str, detail: String, value: f64) -> Self {
        Self {
            oracle_name: name.to_string(),
            passed: true,
            detail,
            value: Some(value),
        }
    }

    fn fail(name: &str, detail: String) -> Self {
        Self {
            oracle_name: name.to_string(),
            passed: false,
            detail,
            value: None,
        }
    }

    fn fail_val(name: &str, detail: String, value: f64) -> Self {
        Self {
            oracle_name: name.to_string(),
            passed: false,
            detail,
            value: Some(value),
        }
    }
}

fn shoelace(ring: &[Point2d]) -> f64 {
    let twice: f64 = ring
        .iter()
        .zip(ring.iter().cycle().skip(1))
        .map(|(a, b)| a.x * b.y - b.x * a.y)
        .sum();
    twice / 2.0
}

// ── Boundary Oracles ────────────────────────────────────────────────────────

/// Check that every ring repeats its first point at the end and has at least
/// three distinct points.
pub fn check_closed_rings(boundary: &Boundary) -> OracleVerdict {
    for (i, ring) in boundary.rings().enumerate() {
        if ring.first() != ring.last() {
            return OracleVerdict::fail(
                "closed_rings",
                format!("ring {} is open: first {:?}, last {:?}", i, ring.first(), ring.last()),
            );
        }
        if ring.len() < 4 {
            return OracleVerdict::fail(
                "closed_rings",
                format!("ring {} has only {} points", i, ring.len()),
            );
        }
    }
    OracleVerdict::pass(
        "closed_rings",
        format!("{} rings closed", 1 + boundary.hole_count()),
    )
}

/// Check that no ring repeats a point back to back.
pub fn check_no_consecutive_duplicates(boundary: &Boundary) -> OracleVerdict {
    for (i, ring) in boundary.rings().enumerate() {
        if let Some(pos) = ring.windows(2).position(|w| w[0] == w[1]) {
            return OracleVerdict::fail(
                "no_consecutive_duplicates",
                format!("ring {} repeats {:?} at index {}", i, ring[pos], pos),
            );
        }
    }
    OracleVerdict::pass("no_consecutive_duplicates", "no repeated points".to_string())
}

// ── Triangulation Oracles ───────────────────────────────────────────────────

/// Check that the triangles cover the outer ring minus its holes.
pub fn check_area_preserved(
    boundary: &Boundary,
    triangulation: &Triangulation,
    tolerance: f64,
) -> OracleVerdict {
    let expected = shoelace(boundary.outer()).abs()
        - boundary.holes().iter().map(|h| shoelace(h).abs()).sum::<f64>();
    let actual = triangulation.area();

    if (actual - expected).abs() <= tolerance * expected.abs().max(1.0) {
        OracleVerdict::pass_val(
            "area_preserved",
            format!("triangulated area {:.6} matches {:.6}", actual, expected),
            actual,
        )
    } else {
        OracleVerdict::fail_val(
            "area_preserved",
            format!("triangulated area {:.6}, expected {:.6}", actual, expected),
            actual,
        )
    }
}

/// Check that every triangle winds counter-clockwise in the plane.
pub fn check_ccw_triangles(triangulation: &Triangulation) -> OracleVerdict {
    let clockwise = triangulation
        .faces
        .iter()
        .filter_map(|f| {
            let corners: Option<Vec<Point2d>> =
                f.iter().map(|&i| triangulation.vertices.get(i).copied()).collect();
            corners
        })
        .filter(|corners| shoelace(corners) < -AREA_EPSILON)
        .count();

    if clockwise == 0 {
        OracleVerdict::pass(
            "ccw_triangles",
            format!("all {} triangles counter-clockwise", triangulation.triangle_count()),
        )
    } else {
        OracleVerdict::fail(
            "ccw_triangles",
            format!(
                "{} of {} triangles wind clockwise",
                clockwise,
                triangulation.triangle_count()
            ),
        )
    }
}

// ── Mesh Oracles ────────────────────────────────────────────────────────────

/// Check that the mesh is watertight: every edge shared by exactly 2 triangles.
///
/// Uses position-based edge matching over the transformed vector array.
pub fn check_watertight_mesh(mesh: &Mesh) -> OracleVerdict {
    let (total, boundary) = crate::helpers::count_mesh_edges(mesh);
    if boundary == 0 && total > 0 {
        OracleVerdict::pass("watertight_mesh", format!("all {} edges paired", total))
    } else {
        OracleVerdict::fail(
            "watertight_mesh",
            format!("{} unpaired edges out of {} total", boundary, total),
        )
    }
}

/// Check that adjacent faces traverse their shared edge in opposite directions.
pub fn check_consistent_winding(mesh: &Mesh) -> OracleVerdict {
    let counts = directed_edge_counts(mesh);
    let bad = counts
        .iter()
        .filter(|&(&(a, b), &c)| c != 1 || counts.get(&(b, a)) != Some(&1))
        .count();

    if bad == 0 {
        OracleVerdict::pass(
            "consistent_winding",
            format!("all {} directed edges have a single twin", counts.len()),
        )
    } else {
        OracleVerdict::fail(
            "consistent_winding",
            format!("{} of {} directed edges lack a twin", bad, counts.len()),
        )
    }
}

/// Check that the faces wind outward, i.e. the signed volume is positive.
pub fn check_outward_orientation(mesh: &Mesh) -> OracleVerdict {
    let volume = mesh_signed_volume(mesh);
    if volume > 0.0 {
        OracleVerdict::pass_val("outward_orientation", format!("signed volume {:.6}", volume), volume)
    } else {
        OracleVerdict::fail_val(
            "outward_orientation",
            format!("signed volume {:.6}, faces wind inward", volume),
            volume,
        )
    }
}

/// Check that stored normals agree with the geometric winding of each face.
///
/// Stale normals are reported as a failure rather than recomputed.
pub fn check_consistent_normals(mesh: &Mesh) -> OracleVerdict {
    if !mesh.normals_fresh() {
        return OracleVerdict::fail(
            "consistent_normals",
            "normals are stale; call update_normals first".to_string(),
        );
    }
    let total = mesh.vectors().len();
    let inconsistent = mesh
        .vectors()
        .iter_positions()
        .zip(mesh.normals())
        .filter(|([a, b, c], n)| {
            let geometric = (*b - *a).cross(&(*c - *a));
            geometric.dot(n) < 0.0
        })
        .count();

    if inconsistent == 0 {
        OracleVerdict::pass(
            "consistent_normals",
            format!("all {} triangles have consistent winding", total),
        )
    } else {
        OracleVerdict::fail(
            "consistent_normals",
            format!("{} of {} triangles have reversed normals", inconsistent, total),
        )
    }
}

/// Check that no triangles have zero area (degenerate).
pub fn check_no_degenerate_triangles(mesh: &Mesh) -> OracleVerdict {
    let total = mesh.vectors().len();
    let degenerate = mesh
        .vectors()
        .iter_positions()
        .filter(|[a, b, c]| (*b - *a).cross(&(*c - *a)).length() / 2.0 < AREA_EPSILON)
        .count();

    if degenerate == 0 {
        OracleVerdict::pass(
            "no_degenerate_triangles",
            format!("all {} triangles have non-zero area", total),
        )
    } else {
        OracleVerdict::fail(
            "no_degenerate_triangles",
            format!("{} of {} triangles are degenerate", degenerate, total),
        )
    }
}

/// Check that every current face normal has unit length.
pub fn check_unit_normals(mesh: &Mesh) -> OracleVerdict {
    let normals = mesh.face_normals();
    let bad = normals
        .iter()
        .filter(|n| (n.length() - 1.0).abs() > 1e-6)
        .count();

    if bad == 0 {
        OracleVerdict::pass(
            "unit_normals",
            format!("all {} normals are unit length", normals.len()),
        )
    } else {
        OracleVerdict::fail(
            "unit_normals",
            format!("{} of {} normals are not unit length", bad, normals.len()),
        )
    }
}

/// Check that every vector-array row keeps w = 1 after transforms.
pub fn check_homogeneous_rows(mesh: &Mesh) -> OracleVerdict {
    let bad = mesh
        .vectors()
        .rows()
        .iter()
        .flatten()
        .filter(|row| (row[3] - 1.0).abs() > 1e-9)
        .count();

    if bad == 0 {
        OracleVerdict::pass(
            "homogeneous_rows",
            format!("all {} rows have w = 1", mesh.vectors().len() * 3),
        )
    } else {
        OracleVerdict::fail("homogeneous_rows", format!("{} rows have w != 1", bad))
    }
}

/// Check that all index values are within bounds.
pub fn check_valid_indices(mesh: &Mesh) -> OracleVerdict {
    let vertex_count = mesh.vertices().len();
    let bad: Vec<(usize, usize)> = mesh
        .faces()
        .iter()
        .flatten()
        .enumerate()
        .filter(|&(_, &idx)| idx >= vertex_count)
        .map(|(i, &idx)| (i, idx))
        .collect();

    if bad.is_empty() {
        OracleVerdict::pass("valid_indices", format!("all indices < {}", vertex_count))
    } else {
        OracleVerdict::fail(
            "valid_indices",
            format!(
                "{} out-of-bounds indices (vertex_count={}): {:?}",
                bad.len(),
                vertex_count,
                &bad[..bad.len().min(5)]
            ),
        )
    }
}

/// Check that the mesh bounding box falls within expected bounds.
pub fn check_bounding_box(
    mesh: &Mesh,
    expected_min: [f64; 3],
    expected_max: [f64; 3],
    tolerance: f64,
) -> OracleVerdict {
    let Some(bb) = mesh.bounding_box() else {
        return OracleVerdict::fail("bounding_box", "mesh is empty".to_string());
    };
    let actual_min = bb.min.to_array();
    let actual_max = bb.max.to_array();

    for i in 0..3 {
        if (actual_min[i] - expected_min[i]).abs() > tolerance {
            return OracleVerdict::fail(
                "bounding_box",
                format!(
                    "min[{}]: expected {:.3}, got {:.3} (tol={})",
                    i, expected_min[i], actual_min[i], tolerance
                ),
            );
        }
        if (actual_max[i] - expected_max[i]).abs() > tolerance {
            return OracleVerdict::fail(
                "bounding_box",
                format!(
                    "max[{}]: expected {:.3}, got {:.3} (tol={})",
                    i, expected_max[i], actual_max[i], tolerance
                ),
            );
        }
    }

    OracleVerdict::pass(
        "bounding_box",
        format!(
            "({:.1},{:.1},{:.1}) -> ({:.1},{:.1},{:.1})",
            actual_min[0], actual_min[1], actual_min[2], actual_max[0], actual_max[1], actual_max[2],
        ),
    )
}

// ── Composite ───────────────────────────────────────────────────────────────

/// Run every check that holds for any extruded solid.
pub fn run_all_mesh_checks(mesh: &Mesh) -> Vec<OracleVerdict> {
    vec![
        check_valid_indices(mesh),
        check_watertight_mesh(mesh),
        check_consistent_winding(mesh),
        check_outward_orientation(mesh),
        check_no_degenerate_triangles(mesh),
        check_unit_normals(mesh),
        check_homogeneous_rows(mesh),
    ]
}

/// Run every check on a finalized boundary.
pub fn run_boundary_checks(boundary: &Boundary) -> Vec<OracleVerdict> {
    vec![check_closed_rings(boundary), check_no_consecutive_duplicates(boundary)]
}
