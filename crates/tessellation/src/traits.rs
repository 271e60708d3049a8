use meshing_kernel::shapes::Boundary;

use crate::error::TessellationError;
use crate::extrude::{check_height, extrude_triangulation};
use crate::types::{TriangulatedMesh, Triangulation};

/// Capability that turns a resolved boundary into triangles and solids.
///
/// Implemented by [`EarClipEngine`](crate::EarClipEngine) and by the
/// [`FanTriangulator`](crate::FanTriangulator) test double. Only
/// `triangulate` is required; extrusion is shared.
pub trait TriangulationPort {
    /// Triangulate the region bounded by the outer ring minus the holes.
    ///
    /// Fails with a geometry error when a ring has fewer than 3 distinct points.
    fn triangulate(&self, boundary: &Boundary) -> Result<Triangulation, TessellationError>;

    /// Extrude an existing triangulation along +Z by `height`.
    fn extrude_triangulation(
        &self,
        triangulation: &Triangulation,
        height: f64,
    ) -> Result<TriangulatedMesh, TessellationError> {
        extrude_triangulation(triangulation, height)
    }

    /// Triangulate, then extrude. Height is checked before any triangulation work.
    fn extrude(&self, boundary: &Boundary, height: f64) -> Result<TriangulatedMesh, TessellationError> {
        check_height(height)?;
        let triangulation = self.triangulate(boundary)?;
        self.extrude_triangulation(&triangulation, height)
    }
}
