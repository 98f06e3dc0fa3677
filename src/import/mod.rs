//! Import of externally authored assemblies.
//!
//! An [`AssemblySource`] turns a file path and a root volume name into an
//! [`AssemblyHandle`]: the root volume plus its immediate children with
//! their authored transforms. [`JsonAssemblyReader`] reads the crate's JSON
//! assembly documents; [`AssemblyLibrary`] serves documents held in memory.

mod document;

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{ImportError, Result};
use crate::geometry::{Solid, Transform};
use crate::math::Vector3;

pub use document::{AssemblyDocument, ChildRecord, VolumeRecord};

/// Loads assemblies by path and root volume name.
pub trait AssemblySource {
    /// Loads `root_volume` from the assembly at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ImportError::AssetNotFound`] if the file does not exist,
    /// [`ImportError::AssetVolumeNotFound`] if the root (or a volume one of
    /// its children refers to) is absent, [`ImportError::Parse`] for a
    /// malformed file, and a geometry error for an invalid solid.
    fn load(&self, path: &Path, root_volume: &str) -> Result<AssemblyHandle>;
}

/// A volume read from an assembly.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedVolume {
    pub name: String,
    pub solid: Solid,
    pub material: String,
}

/// An immediate child of an imported root.
#[derive(Debug, Clone, PartialEq)]
pub struct AssemblyChild {
    pub name: String,
    /// Authored transform relative to the root.
    pub transform: Transform,
    pub volume: ImportedVolume,
}

/// Per-axis translation added when re-inserting a child.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AxisShift {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl AxisShift {
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_x(mut self, dx: f64) -> Self {
        self.x = dx;
        self
    }

    #[must_use]
    pub fn with_y(mut self, dy: f64) -> Self {
        self.y = dy;
        self
    }

    #[must_use]
    pub fn with_z(mut self, dz: f64) -> Self {
        self.z = dz;
        self
    }

    #[must_use]
    pub fn as_vector(&self) -> Vector3 {
        Vector3::new(self.x, self.y, self.z)
    }
}

impl AssemblyChild {
    /// Transform for re-inserting the child: the authored rotation is kept
    /// and the shift is added to the authored translation.
    #[must_use]
    pub fn reinsert(&self, shift: AxisShift) -> Transform {
        Transform::new(
            self.transform.rotation,
            self.transform.translation + shift.as_vector(),
        )
    }
}

/// A loaded assembly.
#[derive(Debug, Clone, PartialEq)]
pub struct AssemblyHandle {
    pub path: PathBuf,
    pub root: ImportedVolume,
    pub children: Vec<AssemblyChild>,
}

/// Reads JSON assembly documents from disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonAssemblyReader;

impl AssemblySource for JsonAssemblyReader {
    fn load(&self, path: &Path, root_volume: &str) -> Result<AssemblyHandle> {
        if !path.is_file() {
            return Err(ImportError::AssetNotFound(path.to_path_buf()).into());
        }
        let text = fs::read_to_string(path).map_err(|err| ImportError::Parse {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })?;
        let document = AssemblyDocument::from_json(path, &text)?;
        info!(path = %path.display(), root = root_volume, "read assembly");
        document.extract(path, root_volume)
    }
}

/// Assembly documents held in memory, keyed by path.
#[derive(Debug, Clone, Default)]
pub struct AssemblyLibrary {
    documents: HashMap<PathBuf, AssemblyDocument>,
}

impl AssemblyLibrary {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a document under `path`, replacing any previous one.
    pub fn insert(&mut self, path: impl Into<PathBuf>, document: AssemblyDocument) {
        self.documents.insert(path.into(), document);
    }

    #[must_use]
    pub fn with_document(mut self, path: impl Into<PathBuf>, document: AssemblyDocument) -> Self {
        self.insert(path, document);
        self
    }
}

impl AssemblySource for AssemblyLibrary {
    fn load(&self, path: &Path, root_volume: &str) -> Result<AssemblyHandle> {
        let document = self
            .documents
            .get(path)
            .ok_or_else(|| ImportError::AssetNotFound(path.to_path_buf()))?;
        debug!(path = %path.display(), root = root_volume, "loaded assembly from library");
        document.extract(path, root_volume)
    }
}
