//! Triangulation and extrusion of resolved boundaries.
//!
//! The [`TriangulationPort`] trait is the seam between boundary assembly and
//! whatever engine turns a 2D region into triangles. [`EarClipEngine`] is the
//! default implementation; [`FanTriangulator`] is a deterministic double for
//! convex test profiles.

pub mod ear_clip;
pub mod error;
pub mod extrude;
pub mod geometry;
pub mod mock;
pub mod ring;
pub mod traits;
pub mod types;

pub use ear_clip::EarClipEngine;
pub use error::TessellationError;
pub use extrude::extrude_triangulation;
pub use geometry::{open, Geometry};
pub use mock::FanTriangulator;
pub use traits::TriangulationPort;
pub use types::{TriangulatedMesh, Triangulation};
