//! Structure-inference parameters
//!
//! Mirrors the parameter block the interactive front end exposes as sliders;
//! the binaries load it from a JSON file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::types::Result;
use crate::core::Error;

/// Parameters for [`crate::grid::VoxelGrid::set_states_from_image`]
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct StructureParams {
    /// Lower bound of the vertical band, normalized 0..1
    pub bottom_limit: f32,
    /// Upper bound of the vertical band, normalized 0..1
    pub top_limit: f32,
    /// Vertical thickness of the structure in cells
    pub thickness: u32,
    /// Grayscale gate for structure pixels, normalized 0..1
    pub sensitivity: f32,
    /// Whether fully black pixels fill their column with solid cells
    pub set_blacks: bool,
}

impl Default for StructureParams {
    fn default() -> Self {
        Self {
            bottom_limit: 0.0,
            top_limit: 1.0,
            thickness: 1,
            sensitivity: 0.5,
            set_blacks: false,
        }
    }
}

impl StructureParams {
    /// Check that all normalized fields lie in 0..1 and the band is ordered
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("bottom_limit", self.bottom_limit),
            ("top_limit", self.top_limit),
            ("sensitivity", self.sensitivity),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::Config(format!("{name} must be in 0..1, got {value}")));
            }
        }
        if self.bottom_limit > self.top_limit {
            return Err(Error::Config(format!(
                "bottom_limit {} above top_limit {}",
                self.bottom_limit, self.top_limit
            )));
        }
        Ok(())
    }

    /// Load parameters from a JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let params: Self =
            serde_json::from_str(&text).map_err(|e| Error::Config(e.to_string()))?;
        params.validate()?;
        Ok(params)
    }
}
