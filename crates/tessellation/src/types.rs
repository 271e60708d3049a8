use meshing_kernel::geometry::{Point2d, Point3d};
use serde::{Deserialize, Serialize};

use crate::error::TessellationError;
use crate::ring::orient;

/// Planar triangulation of a boundary: distinct ring points and CCW index triples.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Triangulation {
    pub vertices: Vec<Point2d>,
    pub faces: Vec<[usize; 3]>,
}

impl Triangulation {
    pub fn new(vertices: Vec<Point2d>, faces: Vec<[usize; 3]>) -> Self {
        Self { vertices, faces }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.faces.len()
    }

    /// Sum of signed face areas; positive when every face winds CCW.
    /// Faces with out-of-range indices are skipped.
    pub fn area(&self) -> f64 {
        self.faces
            .iter()
            .filter_map(|&[a, b, c]| {
                let (a, b, c) = (self.vertices.get(a)?, self.vertices.get(b)?, self.vertices.get(c)?);
                Some(0.5 * orient(a, b, c))
            })
            .sum()
    }

    pub fn validate(&self) -> Result<(), TessellationError> {
        check_indices(&self.faces, self.vertices.len())
    }
}

/// Triangle mesh of an extruded solid, faces wound CCW seen from outside.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TriangulatedMesh {
    pub vertices: Vec<Point3d>,
    pub faces: Vec<[usize; 3]>,
}

impl TriangulatedMesh {
    pub fn new(vertices: Vec<Point3d>, faces: Vec<[usize; 3]>) -> Self {
        Self { vertices, faces }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    pub fn validate(&self) -> Result<(), TessellationError> {
        check_indices(&self.faces, self.vertices.len())
    }
}

fn check_indices(faces: &[[usize; 3]], vertex_count: usize) -> Result<(), TessellationError> {
    for (face, tri) in faces.iter().enumerate() {
        if let Some(&index) = tri.iter().find(|&&i| i >= vertex_count) {
            return Err(TessellationError::IndexOutOfRange {
                face,
                index,
                vertex_count,
            });
        }
    }
    Ok(())
}
