//! Build configuration read from JSON.
//!
//! ```json
//! {
//!   "variant": 104,
//!   "structures": [
//!     { "id": 1, "position": [0.0, 0.0, 31.0], "rotation": [0.0, 30.0, 0.0],
//!       "parameters": [2.0, 0.0, 0.0], "detector": 300 }
//!   ],
//!   "scintillators": [[0.0, 0.0, -24.0], [0.0, 0.0, 523.0]]
//! }
//! ```

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::builder::{AssetPaths, AssetRef, BuildOptions};
use crate::error::ConfigError;
use crate::math::{rotation_from_degrees, Vector3};
use crate::operations::query::DEFAULT_RESOLUTION;
use crate::placement::PlacementParameters;

/// Largest accepted sampling resolution; estimates cost `resolution³` cells.
pub const MAX_RESOLUTION: usize = 1024;

/// One structure entry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StructureConfig {
    pub id: i32,
    /// Position in mm.
    pub position: [f64; 3],
    /// XYZ Euler angles in degrees.
    #[serde(default)]
    pub rotation: Option<[f64; 3]>,
    #[serde(default)]
    pub parameters: Option<[f64; 3]>,
    /// Detector this structure is placed against.
    #[serde(default)]
    pub detector: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AssetConfig {
    pub path: PathBuf,
    pub root: String,
}

/// Overrides for the assembly files; unset entries keep their defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AssetsConfig {
    #[serde(default)]
    pub eudet_holder: Option<AssetConfig>,
    #[serde(default)]
    pub dut_box: Option<AssetConfig>,
    #[serde(default)]
    pub dut_box_reference: Option<AssetConfig>,
}

/// A complete build request.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildConfig {
    pub variant: i32,
    #[serde(default)]
    pub structures: Vec<StructureConfig>,
    #[serde(default)]
    pub assets: AssetsConfig,
    #[serde(default = "default_resolution")]
    pub resolution: usize,
    #[serde(default)]
    pub scintillators: Option<Vec<[f64; 3]>>,
}

fn default_resolution() -> usize {
    DEFAULT_RESOLUTION
}

impl BuildConfig {
    /// Parses and validates a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON, a repeated
    /// structure id or a resolution outside `1..=MAX_RESOLUTION`.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;

        let mut seen = BTreeSet::new();
        for structure in &config.structures {
            if !seen.insert(structure.id) {
                return Err(ConfigError::Parse(format!(
                    "structure id {} appears more than once",
                    structure.id
                )));
            }
        }
        if !(1..=MAX_RESOLUTION).contains(&config.resolution) {
            return Err(ConfigError::Parse(format!(
                "resolution must be between 1 and {MAX_RESOLUTION}, got {}",
                config.resolution
            )));
        }
        Ok(config)
    }

    /// Reads a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] if the file cannot be read, otherwise
    /// as [`BuildConfig::from_json_str`].
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// The identity-keyed parameter maps.
    #[must_use]
    pub fn placement_parameters(&self) -> PlacementParameters {
        let mut params = PlacementParameters::new();
        for s in &self.structures {
            params.positions.insert(s.id, Vector3::from(s.position));
            if let Some(rotation) = s.rotation {
                params.rotations.insert(s.id, rotation_from_degrees(rotation));
            }
            if let Some(parameters) = s.parameters {
                params.parameters.insert(s.id, Vector3::from(parameters));
            }
            if let Some(detector) = s.detector {
                params.detector_links.insert(s.id, detector);
            }
        }
        params
    }

    #[must_use]
    pub fn options(&self) -> BuildOptions {
        BuildOptions {
            resolution: self.resolution,
            scintillators: self
                .scintillators
                .as_ref()
                .map(|list| list.iter().copied().map(Vector3::from).collect()),
        }
    }

    #[must_use]
    pub fn asset_paths(&self) -> AssetPaths {
        let defaults = AssetPaths::default();
        let pick = |given: &Option<AssetConfig>, default: AssetRef| {
            given
                .as_ref()
                .map_or(default, |a| AssetRef::new(a.path.clone(), a.root.clone()))
        };
        AssetPaths {
            eudet_holder: pick(&self.assets.eudet_holder, defaults.eudet_holder),
            dut_box: pick(&self.assets.dut_box, defaults.dut_box),
            dut_box_reference: pick(&self.assets.dut_box_reference, defaults.dut_box_reference),
        }
    }
}
