//! Configuration for primitive discretization and loop stitching.

use serde::{Deserialize, Serialize};

/// Default number of arc samples for sweeps below π.
pub const DEFAULT_ARC_PRECISION: u32 = 6;

/// Smallest accepted arc precision (start + one interior + end).
pub const MIN_ARC_PRECISION: u32 = 2;

/// Largest accepted arc precision; half-turn sweeps emit twice this many segments.
pub const MAX_ARC_PRECISION: u32 = 1 << 16;

/// Decimal places kept for derived radii and interpolated arc points.
pub const DEFAULT_COORDINATE_DECIMALS: u32 = 2;

/// How a boundary reacts to primitives that do not join end to start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StitchMode {
    /// Gaps and open loops are rejected.
    #[default]
    Strict,
    /// Disjoint primitives are appended whole and open loops are accepted.
    Lenient,
}

/// Shape construction settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeConfig {
    /// Base sample count for arcs; doubled when the sweep reaches π.
    pub arc_precision: u32,
    /// Rounding applied to derived radii and interpolated arc points.
    pub coordinate_decimals: u32,
    pub stitch_mode: StitchMode,
}

impl Default for ShapeConfig {
    fn default() -> Self {
        Self {
            arc_precision: DEFAULT_ARC_PRECISION,
            coordinate_decimals: DEFAULT_COORDINATE_DECIMALS,
            stitch_mode: StitchMode::Strict,
        }
    }
}

impl ShapeConfig {
    pub fn strict() -> Self {
        Self::default()
    }

    pub fn lenient() -> Self {
        Self {
            stitch_mode: StitchMode::Lenient,
            ..Self::default()
        }
    }
}

/// Numeric thresholds for geometric comparisons in tessellation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tolerance {
    /// Points closer than this are considered coincident.
    pub coincidence: f64,
    /// Twice-areas smaller than this are considered zero.
    pub area: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            coincidence: 1e-9,
            area: 1e-12,
        }
    }
}

impl Tolerance {
    pub fn is_zero_length(&self, length: f64) -> bool {
        length.abs() < self.coincidence
    }

    pub fn is_zero_area(&self, twice_area: f64) -> bool {
        twice_area.abs() < self.area
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = ShapeConfig::default();
        assert_eq!(cfg.arc_precision, 6);
        assert_eq!(cfg.coordinate_decimals, 2);
        assert_eq!(cfg.stitch_mode, StitchMode::Strict);
        assert_eq!(ShapeConfig::lenient().stitch_mode, StitchMode::Lenient);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let cfg: ShapeConfig = serde_json::from_str(r#"{"stitch_mode": "lenient"}"#).unwrap();
        assert_eq!(cfg.stitch_mode, StitchMode::Lenient);
        assert_eq!(cfg.arc_precision, DEFAULT_ARC_PRECISION);
    }

    #[test]
    fn test_tolerance_checks() {
        let tol = Tolerance::default();
        assert!(tol.is_zero_length(1e-12));
        assert!(!tol.is_zero_length(1e-3));
        assert!(tol.is_zero_area(0.0));
    }
}
