//! Exclusively-owned session over one boundary and its cached results.

use meshing_kernel::geometry::Point3d;
use meshing_kernel::shapes::Boundary;
use tracing::debug;

use crate::error::TessellationError;
use crate::extrude::check_height;
use crate::traits::TriangulationPort;
use crate::types::{TriangulatedMesh, Triangulation};

/// Holds a boundary, its last triangulation and its last extruded solid.
#[derive(Debug, Clone)]
pub struct Geometry {
    boundary: Boundary,
    triangles: Option<Triangulation>,
    solid: Option<TriangulatedMesh>,
}

/// Start a session over `boundary`.
pub fn open(boundary: Boundary) -> Geometry {
    Geometry {
        boundary,
        triangles: None,
        solid: None,
    }
}

impl Geometry {
    pub fn boundary(&self) -> &Boundary {
        &self.boundary
    }

    pub fn triangles(&self) -> Option<&Triangulation> {
        self.triangles.as_ref()
    }

    pub fn solid(&self) -> Option<&TriangulatedMesh> {
        self.solid.as_ref()
    }

    /// Vertices of the last extrusion, empty before one.
    pub fn vertices(&self) -> &[Point3d] {
        self.solid.as_ref().map(|s| s.vertices.as_slice()).unwrap_or_default()
    }

    /// Faces of the last extrusion, empty before one.
    pub fn faces(&self) -> &[[usize; 3]] {
        self.solid.as_ref().map(|s| s.faces.as_slice()).unwrap_or_default()
    }

    /// Triangulate and replace the cached triangles.
    pub fn triangulate(&mut self, port: &dyn TriangulationPort) -> Result<&Triangulation, TessellationError> {
        let triangles = port.triangulate(&self.boundary)?;
        Ok(self.triangles.insert(triangles))
    }

    /// Extrude the cached triangles, triangulating first when none are cached.
    pub fn extrude(
        &mut self,
        port: &dyn TriangulationPort,
        height: f64,
    ) -> Result<&TriangulatedMesh, TessellationError> {
        check_height(height)?;
        let triangles = match self.triangles.take() {
            Some(t) => t,
            None => {
                debug!("no cached triangulation; triangulating before extrusion");
                port.triangulate(&self.boundary)?
            }
        };
        let solid = port.extrude_triangulation(&triangles, height);
        self.triangles = Some(triangles);
        Ok(self.solid.insert(solid?))
    }
}
