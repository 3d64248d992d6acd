//! Scene files: shapes, editor tuning and a scripted pointer gesture.

use anyhow::{Context, Result};
use linkdraw_core::{EditorConfig, PointerEvent, ShapeDescriptor};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A diagram plus the pointer events to replay against it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    #[serde(default)]
    pub config: EditorConfig,
    pub shapes: Vec<ShapeDescriptor>,
    #[serde(default)]
    pub script: Vec<PointerEvent>,
}

impl Scene {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Malformed scene JSON")
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize scene")
    }

    /// Read a scene file.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scene {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("Invalid scene {}", path.display()))
    }

    /// Write the scene as pretty JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_json()?)
            .with_context(|| format!("Failed to write scene {}", path.display()))
    }
}
