//! FanTriangulator: deterministic test double implementing TriangulationPort.
//!
//! Fans from the first distinct point of the outer ring and ignores holes,
//! so it is only correct for convex profiles. Used by the mesh and harness
//! tests to exercise the pipeline without the ear-clipping engine.

use meshing_kernel::config::Tolerance;
use meshing_kernel::shapes::Boundary;

use crate::error::TessellationError;
use crate::ring::{prepare_ring, signed_area};
use crate::traits::TriangulationPort;
use crate::types::Triangulation;

#[derive(Debug, Clone, Default)]
pub struct FanTriangulator {
    tolerance: Tolerance,
}

impl FanTriangulator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TriangulationPort for FanTriangulator {
    fn triangulate(&self, boundary: &Boundary) -> Result<Triangulation, TessellationError> {
        let vertices = prepare_ring(boundary.outer(), &self.tolerance)?;
        let n = vertices.len();
        let ccw = signed_area(&vertices) > 0.0;
        let faces = (1..n - 1)
            .map(|i| if ccw { [0, i, i + 1] } else { [0, i + 1, i] })
            .collect();
        Ok(Triangulation::new(vertices, faces))
    }
}
