pub mod point;
pub mod transform;
pub mod vector;

pub use point::{round_to, Point2d, Point3d};
pub use transform::{BoundingBox, Transform};
pub use vector::Vec3;
