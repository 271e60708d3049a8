//! Rich assertion helpers with diagnostic output.
//!
//! Every failure names the context, the expected value and the actual value.

use meshing::Mesh;
use meshing_kernel::shapes::Boundary;

use crate::helpers::{mesh_volume, HarnessError};
use crate::oracle::OracleVerdict;

/// Assert exact vertex and face counts for a mesh.
pub fn assert_mesh_counts(
    mesh: &Mesh,
    expected_vertices: usize,
    expected_faces: usize,
    ctx: &str,
) -> Result<(), HarnessError> {
    let v = mesh.vertices().len();
    let f = mesh.faces().len();
    if v == expected_vertices && f == expected_faces {
        Ok(())
    } else {
        Err(HarnessError::AssertionFailed {
            detail: format!(
                "[{}] expected {} vertices and {} faces, got {} and {}",
                ctx, expected_vertices, expected_faces, v, f,
            ),
        })
    }
}

/// Assert the mesh bounding box matches expected values within tolerance.
pub fn assert_bounding_box(
    mesh: &Mesh,
    expected_min: [f64; 3],
    expected_max: [f64; 3],
    tol: f64,
    ctx: &str,
) -> Result<(), HarnessError> {
    let bb = mesh.bounding_box().ok_or_else(|| HarnessError::AssertionFailed {
        detail: format!("[{}] mesh is empty, no bounding box", ctx),
    })?;
    let actual_min = bb.min.to_array();
    let actual_max = bb.max.to_array();

    for i in 0..3 {
        if (actual_min[i] - expected_min[i]).abs() > tol {
            return Err(HarnessError::AssertionFailed {
                detail: format!(
                    "[{}] bounding box min[{}]: expected {:.3}, got {:.3} (tol={})",
                    ctx, i, expected_min[i], actual_min[i], tol,
                ),
            });
        }
        if (actual_max[i] - expected_max[i]).abs() > tol {
            return Err(HarnessError::AssertionFailed {
                detail: format!(
                    "[{}] bounding box max[{}]: expected {:.3}, got {:.3} (tol={})",
                    ctx, i, expected_max[i], actual_max[i], tol,
                ),
            });
        }
    }
    Ok(())
}

/// Assert the enclosed volume within a relative tolerance.
pub fn assert_volume(mesh: &Mesh, expected: f64, rel_tol: f64, ctx: &str) -> Result<(), HarnessError> {
    let actual = mesh_volume(mesh);
    if (actual - expected).abs() <= rel_tol * expected.abs().max(1.0) {
        Ok(())
    } else {
        Err(HarnessError::AssertionFailed {
            detail: format!("[{}] volume: expected {:.6}, got {:.6}", ctx, expected, actual),
        })
    }
}

/// Assert the outer ring and each hole ring have the given point counts.
pub fn assert_ring_lengths(
    boundary: &Boundary,
    expected_outer: usize,
    expected_holes: &[usize],
    ctx: &str,
) -> Result<(), HarnessError> {
    let holes: Vec<usize> = boundary.holes().iter().map(Vec::len).collect();
    if boundary.outer().len() == expected_outer && holes == expected_holes {
        Ok(())
    } else {
        Err(HarnessError::AssertionFailed {
            detail: format!(
                "[{}] expected rings {} + {:?}, got {} + {:?}",
                ctx,
                expected_outer,
                expected_holes,
                boundary.outer().len(),
                holes,
            ),
        })
    }
}

/// Assert every verdict passed, listing all failures at once.
pub fn assert_all_pass(verdicts: &[OracleVerdict], ctx: &str) -> Result<(), HarnessError> {
    let failed: Vec<String> = verdicts
        .iter()
        .filter(|v| !v.passed)
        .map(|v| format!("{}: {}", v.oracle_name, v.detail))
        .collect();
    if failed.is_empty() {
        Ok(())
    } else {
        Err(HarnessError::AssertionFailed {
            detail: format!("[{}] {} checks failed: {}", ctx, failed.len(), failed.join("; ")),
        })
    }
}
