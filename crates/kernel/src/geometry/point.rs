use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

use super::vector::Vec3;
use crate::error::ShapeError;

/// A point in 2D space, as produced by curve primitives.
///
/// Equality is exact: stitching compares coordinates that have already been
/// rounded by the primitive that emitted them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point2d {
    pub x: f64,
    pub y: f64,
}

impl Point2d {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Angle of `self` as seen from `center`, in radians.
    pub fn angle_from(&self, center: &Self) -> f64 {
        (self.y - center.y).atan2(self.x - center.x)
    }

    /// Round both coordinates to `decimals` places.
    pub fn rounded(&self, decimals: u32) -> Self {
        Self {
            x: round_to(self.x, decimals),
            y: round_to(self.y, decimals),
        }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Lift onto the z = `z` plane.
    pub fn to_3d(&self, z: f64) -> Point3d {
        Point3d::new(self.x, self.y, z)
    }

    pub fn to_array(&self) -> [f64; 2] {
        [self.x, self.y]
    }
}

impl From<[f64; 2]> for Point2d {
    fn from(arr: [f64; 2]) -> Self {
        Self::new(arr[0], arr[1])
    }
}

impl From<(f64, f64)> for Point2d {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl TryFrom<&[f64]> for Point2d {
    type Error = ShapeError;

    fn try_from(coords: &[f64]) -> Result<Self, Self::Error> {
        match coords {
            [x, y] => Ok(Self::new(*x, *y)),
            _ => Err(ShapeError::InvalidShape {
                expected: "2-element point",
                found: format!("{} coordinates", coords.len()),
            }),
        }
    }
}

/// Round `value` to `decimals` decimal places.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// A point in 3D Euclidean space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point3d {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3d {
    pub const ORIGIN: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn distance_to(&self, other: &Self) -> f64 {
        (*self - *other).length()
    }

    pub fn midpoint(&self, other: &Self) -> Self {
        Self {
            x: (self.x + other.x) * 0.5,
            y: (self.y + other.y) * 0.5,
            z: (self.z + other.z) * 0.5,
        }
    }

    /// Arithmetic mean of a set of points, `None` when empty.
    pub fn centroid(points: &[Point3d]) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        let n = points.len() as f64;
        let (sx, sy, sz) = points
            .iter()
            .fold((0.0, 0.0, 0.0), |(x, y, z), p| (x + p.x, y + p.y, z + p.z));
        Some(Self::new(sx / n, sy / n, sz / n))
    }

    pub fn to_vec3(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    pub fn to_array(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    pub fn from_array(arr: [f64; 3]) -> Self {
        Self {
            x: arr[0],
            y: arr[1],
            z: arr[2],
        }
    }
}

impl Add<Vec3> for Point3d {
    type Output = Point3d;
    fn add(self, rhs: Vec3) -> Self::Output {
        Point3d::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Point3d {
    type Output = Vec3;
    fn sub(self, rhs: Self) -> Self::Output {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}
