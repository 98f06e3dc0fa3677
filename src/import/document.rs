use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ImportError, Result};
use crate::geometry::{Solid, Transform};
use crate::math::{rotation_from_degrees, Vector3};

use super::{AssemblyChild, AssemblyHandle, ImportedVolume};

/// A JSON assembly: named volumes, each with a solid, a material name and
/// child placements referring to other volumes by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssemblyDocument {
    pub volumes: BTreeMap<String, VolumeRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeRecord {
    pub solid: Solid,
    pub material: String,
    #[serde(default)]
    pub children: Vec<ChildRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChildRecord {
    pub name: String,
    pub volume: String,
    /// Translation in mm.
    #[serde(default)]
    pub translation: [f64; 3],
    /// XYZ Euler angles in degrees.
    #[serde(default)]
    pub rotation: [f64; 3],
}

impl AssemblyDocument {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_volume(mut self, name: impl Into<String>, record: VolumeRecord) -> Self {
        self.volumes.insert(name.into(), record);
        self
    }

    /// Parses a document.
    ///
    /// # Errors
    ///
    /// Returns [`ImportError::Parse`] if `text` is not a valid document.
    pub fn from_json(path: &Path, text: &str) -> std::result::Result<Self, ImportError> {
        serde_json::from_str(text).map_err(|err| ImportError::Parse {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })
    }

    /// Resolves `root` and its immediate children.
    ///
    /// # Errors
    ///
    /// Returns [`ImportError::AssetVolumeNotFound`] for a missing volume and
    /// a geometry error if any solid fails validation.
    pub fn extract(&self, path: &Path, root: &str) -> Result<AssemblyHandle> {
        let root_record = self.record(path, root)?;
        let root_volume = imported(root, root_record)?;

        let children = root_record
            .children
            .iter()
            .map(|child| {
                let record = self.record(path, &child.volume)?;
                Ok(AssemblyChild {
                    name: child.name.clone(),
                    transform: Transform::new(
                        rotation_from_degrees(child.rotation),
                        Vector3::from(child.translation),
                    ),
                    volume: imported(&child.volume, record)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(AssemblyHandle {
            path: path.to_path_buf(),
            root: root_volume,
            children,
        })
    }

    fn record(&self, path: &Path, name: &str) -> std::result::Result<&VolumeRecord, ImportError> {
        self.volumes
            .get(name)
            .ok_or_else(|| ImportError::AssetVolumeNotFound {
                path: path.to_path_buf(),
                volume: name.to_owned(),
            })
    }
}

impl VolumeRecord {
    #[must_use]
    pub fn new(solid: Solid, material: impl Into<String>) -> Self {
        Self {
            solid,
            material: material.into(),
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_child(mut self, child: ChildRecord) -> Self {
        self.children.push(child);
        self
    }
}

impl ChildRecord {
    #[must_use]
    pub fn new(name: impl Into<String>, volume: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            volume: volume.into(),
            translation: [0.0; 3],
            rotation: [0.0; 3],
        }
    }

    #[must_use]
    pub fn at(mut self, translation: [f64; 3]) -> Self {
        self.translation = translation;
        self
    }

    /// Sets the rotation as XYZ Euler angles in degrees.
    #[must_use]
    pub fn rotated(mut self, degrees: [f64; 3]) -> Self {
        self.rotation = degrees;
        self
    }
}

fn imported(name: &str, record: &VolumeRecord) -> Result<ImportedVolume> {
    record.solid.validate()?;
    Ok(ImportedVolume {
        name: name.to_owned(),
        solid: record.solid.clone(),
        material: record.material.clone(),
    })
}
