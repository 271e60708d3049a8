//! Pipeline configuration, loadable from JSON.

use std::path::Path;

use meshing_kernel::config::{ShapeConfig, Tolerance};
use serde::{Deserialize, Serialize};

use crate::error::MeshError;

/// Header fields written at the top of OBJ files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub title: String,
    /// Project link written after the timestamp, omitted when unset.
    pub url: Option<String>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            title: "meshing".to_string(),
            url: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshingConfig {
    pub shape: ShapeConfig,
    pub tolerance: Tolerance,
    pub export: ExportConfig,
}

impl MeshingConfig {
    pub fn from_json_str(json: &str) -> Result<Self, MeshError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, MeshError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}
