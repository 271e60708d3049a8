use meshing_kernel::geometry::{Point3d, Transform};
use nalgebra::RowVector4;

use crate::error::MeshError;

/// Per-face vertex triples lifted to homogeneous row vectors, shape (faces, 3, 4).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VectorArray {
    rows: Vec<[RowVector4<f64>; 3]>,
}

impl VectorArray {
    /// Expand `faces` into their corner positions with w = 1.
    pub fn from_indexed(vertices: &[Point3d], faces: &[[usize; 3]]) -> Result<Self, MeshError> {
        let vertex_count = vertices.len();
        let rows = faces
            .iter()
            .enumerate()
            .map(|(face, tri)| -> Result<[RowVector4<f64>; 3], MeshError> {
                let mut corners = [RowVector4::zeros(); 3];
                for (corner, &index) in corners.iter_mut().zip(tri) {
                    let p = vertices.get(index).ok_or(MeshError::IndexOutOfRange {
                        face,
                        index,
                        vertex_count,
                    })?;
                    *corner = RowVector4::new(p.x, p.y, p.z, 1.0);
                }
                Ok(corners)
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { rows })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[[RowVector4<f64>; 3]] {
        &self.rows
    }

    /// Spatial part of face `face`'s three corners.
    pub fn positions(&self, face: usize) -> Option<[Point3d; 3]> {
        self.rows
            .get(face)
            .map(|corners| corners.map(|r| Point3d::new(r[0], r[1], r[2])))
    }

    pub fn iter_positions(&self) -> impl Iterator<Item = [Point3d; 3]> + '_ {
        self.rows
            .iter()
            .map(|corners| corners.map(|r| Point3d::new(r[0], r[1], r[2])))
    }

    /// Replace every row `v` with `v · M`.
    pub fn apply(&mut self, transform: &Transform) {
        for corners in &mut self.rows {
            for row in corners.iter_mut() {
                *row = transform.transform_row(row);
            }
        }
    }

    /// Write the current corner positions back onto `vertex_count` indexed vertices.
    ///
    /// Vertices no face references keep `fallback`'s position.
    pub fn scatter(&self, faces: &[[usize; 3]], fallback: &[Point3d]) -> Vec<Point3d> {
        let mut out = fallback.to_vec();
        for (corners, tri) in self.rows.iter().zip(faces) {
            for (row, &index) in corners.iter().zip(tri) {
                if let Some(slot) = out.get_mut(index) {
                    *slot = Point3d::new(row[0], row[1], row[2]);
                }
            }
        }
        out
    }
}
