//! Placement parameters, transform resolution and build output.

mod output;
mod resolver;

use std::collections::BTreeMap;

pub use output::{BuildOutput, DerivedQuantity, FinishedPlacement, ParentRef, VolumeId};
pub use resolver::{Anchor, DetectorQuery, PlacementResolver, StructureEntry};

use crate::math::{Rotation3, Vector3};

/// Externally supplied placement data, keyed by structure identity.
///
/// Ordered maps keep iteration deterministic; recipes that fold over every
/// entry see them in ascending id order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlacementParameters {
    /// Positions in mm.
    pub positions: BTreeMap<i32, Vector3>,
    pub rotations: BTreeMap<i32, Rotation3>,
    /// Free numeric knobs, e.g. a plate thickness in the first component.
    pub parameters: BTreeMap<i32, Vector3>,
    /// Structure id to the id of the detector it is attached to.
    pub detector_links: BTreeMap<i32, i32>,
}

impl PlacementParameters {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a structure entry at `position`.
    #[must_use]
    pub fn with_position(mut self, id: i32, position: Vector3) -> Self {
        self.positions.insert(id, position);
        self
    }

    #[must_use]
    pub fn with_rotation(mut self, id: i32, rotation: Rotation3) -> Self {
        self.rotations.insert(id, rotation);
        self
    }

    #[must_use]
    pub fn with_parameter(mut self, id: i32, parameter: Vector3) -> Self {
        self.parameters.insert(id, parameter);
        self
    }

    /// Links a structure to a detector for relative placement.
    #[must_use]
    pub fn with_detector_link(mut self, id: i32, detector: i32) -> Self {
        self.detector_links.insert(id, detector);
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
