//! Post-triangulation mesh pipeline.
//!
//! A [`Mesh`] owns the extruded solid produced by a
//! [`TriangulationPort`](meshing_tessellation::TriangulationPort), lifts every
//! face into homogeneous row vectors ([`VectorArray`]), recomputes per-face
//! normals on request, and applies affine transforms in call order.

pub mod config;
pub mod error;
pub mod export;
pub mod mesh;
pub mod normals;
pub mod transform;
pub mod vectors;

pub use config::{ExportConfig, MeshingConfig};
pub use error::MeshError;
pub use export::{ExportFormat, ExportMode};
pub use mesh::Mesh;
pub use normals::compute_normals;
pub use transform::TransformStack;
pub use vectors::VectorArray;

pub use meshing_kernel as kernel;
pub use meshing_tessellation as tessellation;
