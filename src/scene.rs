//! In-memory scene graph.

use std::collections::BTreeMap;

use tracing::debug;

use crate::error::PlacementError;
use crate::geometry::{Solid, Transform};
use crate::placement::{BuildOutput, DetectorQuery};

/// A detector already positioned in the scene.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectorRecord {
    pub transform: Transform,
    /// Envelope around the sensor and its readout.
    pub wrapper: Option<Solid>,
}

/// Detectors plus every structure inserted so far.
///
/// Insertion takes `&mut self`, so builds against one scene are applied one
/// at a time.
#[derive(Debug, Default)]
pub struct Scene {
    detectors: BTreeMap<i32, DetectorRecord>,
    structures: BuildOutput,
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a detector at a resolved world transform.
    pub fn add_detector(&mut self, id: i32, transform: Transform, wrapper: Option<Solid>) {
        self.detectors
            .insert(id, DetectorRecord { transform, wrapper });
    }

    #[must_use]
    pub fn with_detector(mut self, id: i32, transform: Transform, wrapper: Option<Solid>) -> Self {
        self.add_detector(id, transform, wrapper);
        self
    }

    /// Takes ownership of a build's volumes and placements.
    ///
    /// # Errors
    ///
    /// Returns [`PlacementError::DuplicateLabel`] if a world-level label is
    /// already taken. The scene is left unchanged in that case.
    pub fn insert(&mut self, output: BuildOutput) -> Result<(), PlacementError> {
        debug!(placements = output.len(), "inserting structure");
        self.structures.merge(output)
    }

    #[must_use]
    pub fn structures(&self) -> &BuildOutput {
        &self.structures
    }

    #[must_use]
    pub fn detector(&self, id: i32) -> Option<&DetectorRecord> {
        self.detectors.get(&id)
    }
}

impl DetectorQuery for Scene {
    fn detector_transform(&self, detector: i32) -> Option<Transform> {
        self.detectors.get(&detector).map(|d| d.transform)
    }

    fn wrapper_solid(&self, detector: i32) -> Option<Solid> {
        self.detectors.get(&detector).and_then(|d| d.wrapper.clone())
    }
}
