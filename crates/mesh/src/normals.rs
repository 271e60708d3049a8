use meshing_kernel::geometry::Vec3;
use tracing::{debug, instrument, warn};

use crate::vectors::VectorArray;

/// One unit normal per face, `(v1 - v0) × (v2 - v0)` normalized.
///
/// Zero-area faces get the zero vector instead of failing.
#[instrument(skip_all, fields(faces = vectors.len()))]
pub fn compute_normals(vectors: &VectorArray) -> Vec<Vec3> {
    let mut degenerate = 0usize;
    let normals: Vec<Vec3> = vectors
        .iter_positions()
        .map(|[v0, v1, v2]| {
            (v1 - v0).cross(&(v2 - v0)).normalized().unwrap_or_else(|| {
                degenerate += 1;
                Vec3::ZERO
            })
        })
        .collect();

    if degenerate > 0 {
        warn!(degenerate, "zero-area faces given zero normals");
    }
    debug!(count = normals.len(), "face normals computed");
    normals
}

#[cfg(test)]
mod tests {
    use super::*;
    use meshing_kernel::geometry::Point3d;

    #[test]
    fn test_ccw_triangle_faces_up() {
        let v = [
            Point3d::new(0.0, 0.0, 0.0),
            Point3d::new(2.0, 0.0, 0.0),
            Point3d::new(0.0, 2.0, 0.0),
        ];
        let arr = VectorArray::from_indexed(&v, &[[0, 1, 2], [0, 2, 1]]).unwrap();
        let n = compute_normals(&arr);
        assert_eq!(n, vec![Vec3::Z, -Vec3::Z]);
    }

    #[test]
    fn test_degenerate_face_gets_zero() {
        let v = [
            Point3d::new(0.0, 0.0, 0.0),
            Point3d::new(1.0, 1.0, 1.0),
            Point3d::new(2.0, 2.0, 2.0),
        ];
        let arr = VectorArray::from_indexed(&v, &[[0, 1, 2], [0, 0, 0]]).unwrap();
        let n = compute_normals(&arr);
        assert_eq!(n.len(), 2);
        assert!(n.iter().all(Vec3::is_zero));
    }
}
