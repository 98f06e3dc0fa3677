use tracing::warn;

use crate::error::PlacementError;
use crate::geometry::{Solid, Transform};
use crate::math::{Rotation3, Vector3};

use super::PlacementParameters;

/// Read-only view of detectors already positioned in the scene.
pub trait DetectorQuery {
    /// Resolved world transform of a detector.
    fn detector_transform(&self, detector: i32) -> Option<Transform>;

    /// Envelope solid of a detector, used to cut clearances into supports.
    fn wrapper_solid(&self, detector: i32) -> Option<Solid>;
}

/// Ties a placement to the detector linked with a structure entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    pub structure: i32,
    /// Fixed offset added after the detector-relative offset.
    pub nominal_offset: Vector3,
}

impl Anchor {
    #[must_use]
    pub fn new(structure: i32) -> Self {
        Self {
            structure,
            nominal_offset: Vector3::zeros(),
        }
    }

    #[must_use]
    pub fn with_offset(mut self, offset: Vector3) -> Self {
        self.nominal_offset = offset;
        self
    }
}

/// One structure entry assembled from the parallel parameter maps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StructureEntry {
    pub id: i32,
    pub position: Vector3,
    pub rotation: Option<Rotation3>,
    pub parameter: Option<Vector3>,
}

/// Computes placement transforms from parameter maps and scene queries.
pub struct PlacementResolver<'a> {
    parameters: &'a PlacementParameters,
    detectors: &'a dyn DetectorQuery,
}

impl<'a> PlacementResolver<'a> {
    #[must_use]
    pub fn new(parameters: &'a PlacementParameters, detectors: &'a dyn DetectorQuery) -> Self {
        Self {
            parameters,
            detectors,
        }
    }

    #[must_use]
    pub fn parameters(&self) -> &PlacementParameters {
        self.parameters
    }

    #[must_use]
    pub fn detectors(&self) -> &dyn DetectorQuery {
        self.detectors
    }

    /// Resolves a placement transform.
    ///
    /// Without an anchor the base translation and rotation are used as
    /// given. With an anchor the translation is the linked detector's
    /// position minus the structure's own position, plus the anchor's
    /// nominal offset, and the rotation is the detector's.
    ///
    /// # Errors
    ///
    /// Returns [`PlacementError::MissingParameterEntry`] if the anchor's
    /// link, position or detector cannot be found.
    pub fn resolve_transform(
        &self,
        base_translation: Vector3,
        base_rotation: Rotation3,
        anchor: Option<Anchor>,
    ) -> Result<Transform, PlacementError> {
        let Some(anchor) = anchor else {
            return Ok(Transform::new(base_rotation, base_translation));
        };
        let relative = self.relative_offset(anchor.structure)?;
        Ok(Transform::new(
            relative.rotation,
            relative.translation + anchor.nominal_offset,
        ))
    }

    /// Offset of the linked detector as seen from a structure entry
    /// (`detector - structure`), carrying the detector's rotation.
    ///
    /// # Errors
    ///
    /// Returns [`PlacementError::MissingParameterEntry`] if the structure has
    /// no position or detector link, or the detector is not in the scene.
    pub fn relative_offset(&self, structure: i32) -> Result<Transform, PlacementError> {
        let detector = self.linked_detector(structure)?;
        let position = self.parameters.positions.get(&structure).ok_or(
            PlacementError::MissingParameterEntry {
                map: "positions",
                id: structure,
            },
        )?;
        let placed = self.detector_transform(detector)?;
        Ok(Transform::new(
            placed.rotation,
            placed.translation - position,
        ))
    }

    /// Detector id linked to a structure entry.
    ///
    /// # Errors
    ///
    /// Returns [`PlacementError::MissingParameterEntry`] if there is no link.
    pub fn linked_detector(&self, structure: i32) -> Result<i32, PlacementError> {
        self.parameters
            .detector_links
            .get(&structure)
            .copied()
            .ok_or(PlacementError::MissingParameterEntry {
                map: "detector_links",
                id: structure,
            })
    }

    /// World transform of a detector already in the scene.
    ///
    /// # Errors
    ///
    /// Returns [`PlacementError::MissingParameterEntry`] if the detector is
    /// unknown to the scene.
    pub fn detector_transform(&self, detector: i32) -> Result<Transform, PlacementError> {
        self.detectors
            .detector_transform(detector)
            .ok_or(PlacementError::MissingParameterEntry {
                map: "detectors",
                id: detector,
            })
    }

    /// Every structure entry in ascending id order.
    pub fn entries(&self) -> impl Iterator<Item = StructureEntry> + '_ {
        self.parameters
            .positions
            .iter()
            .map(|(&id, &position)| StructureEntry {
                id,
                position,
                rotation: self.parameters.rotations.get(&id).copied(),
                parameter: self.parameters.parameters.get(&id).copied(),
            })
    }

    /// The only position entry, for recipes that take a single structure.
    ///
    /// # Errors
    ///
    /// Returns [`PlacementError::MultipleEntriesUnsupported`] if more than
    /// one entry is present.
    pub fn single_position(&self, variant: &'static str) -> Result<Option<Vector3>, PlacementError> {
        single(variant, "positions", self.parameters.positions.values())
    }

    /// The only rotation entry.
    ///
    /// # Errors
    ///
    /// Returns [`PlacementError::MultipleEntriesUnsupported`] if more than
    /// one entry is present.
    pub fn single_rotation(
        &self,
        variant: &'static str,
    ) -> Result<Option<Rotation3>, PlacementError> {
        single(variant, "rotations", self.parameters.rotations.values())
    }

    /// The only free parameter entry.
    ///
    /// # Errors
    ///
    /// Returns [`PlacementError::MultipleEntriesUnsupported`] if more than
    /// one entry is present.
    pub fn single_parameter(
        &self,
        variant: &'static str,
    ) -> Result<Option<Vector3>, PlacementError> {
        single(variant, "parameters", self.parameters.parameters.values())
    }

    /// Single position and rotation with their defaults (origin, identity)
    /// applied when absent.
    ///
    /// # Errors
    ///
    /// Returns [`PlacementError::MultipleEntriesUnsupported`] if either map
    /// holds more than one entry.
    pub fn single_placement(&self, variant: &'static str) -> Result<Transform, PlacementError> {
        let position = self.single_position(variant)?.unwrap_or_else(|| {
            warn!(variant, "no position entry, placing at the origin");
            Vector3::zeros()
        });
        let rotation = self.single_rotation(variant)?.unwrap_or_else(|| {
            warn!(variant, "no rotation entry, using identity");
            Rotation3::identity()
        });
        self.resolve_transform(position, rotation, None)
    }
}

fn single<'v, T: Copy + 'v>(
    variant: &'static str,
    map: &'static str,
    values: impl ExactSizeIterator<Item = &'v T>,
) -> Result<Option<T>, PlacementError> {
    let count = values.len();
    if count > 1 {
        return Err(PlacementError::MultipleEntriesUnsupported {
            variant,
            map,
            count,
        });
    }
    Ok(values.copied().next())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::rotate_x;
    use approx::assert_relative_eq;
    use std::collections::BTreeMap;
    use std::f64::consts::FRAC_PI_2;

    struct Detectors(BTreeMap<i32, Transform>);

    impl DetectorQuery for Detectors {
        fn detector_transform(&self, detector: i32) -> Option<Transform> {
            self.0.get(&detector).copied()
        }

        fn wrapper_solid(&self, _detector: i32) -> Option<Solid> {
            None
        }
    }

    fn detectors() -> Detectors {
        let mut map = BTreeMap::new();
        map.insert(
            300,
            Transform::new(rotate_x(FRAC_PI_2), Vector3::new(0.0, 0.0, 100.0)),
        );
        Detectors(map)
    }

    #[test]
    fn offset_is_detector_minus_structure() {
        let params = PlacementParameters::new()
            .with_position(1, Vector3::zeros())
            .with_detector_link(1, 300);
        let scene = detectors();
        let resolver = PlacementResolver::new(&params, &scene);

        let offset = resolver.relative_offset(1).unwrap();
        assert_eq!(offset.translation, Vector3::new(0.0, 0.0, 100.0));
        assert_relative_eq!(offset.rotation, rotate_x(FRAC_PI_2));
    }

    #[test]
    fn offset_sign_follows_structure_position() {
        let params = PlacementParameters::new()
            .with_position(1, Vector3::new(0.0, 0.0, 130.0))
            .with_detector_link(1, 300);
        let scene = detectors();
        let resolver = PlacementResolver::new(&params, &scene);
        let t = resolver
            .resolve_transform(
                Vector3::zeros(),
                Rotation3::identity(),
                Some(Anchor::new(1).with_offset(Vector3::new(0.0, 0.0, 5.0))),
            )
            .unwrap();
        assert_relative_eq!(t.translation, Vector3::new(0.0, 0.0, -25.0));
    }

    #[test]
    fn no_anchor_uses_base_verbatim() {
        let params = PlacementParameters::new();
        let scene = detectors();
        let resolver = PlacementResolver::new(&params, &scene);
        let base = Vector3::new(1.0, 2.0, 3.0);
        let t = resolver
            .resolve_transform(base, rotate_x(0.3), None)
            .unwrap();
        assert_eq!(t.translation, base);
        assert_eq!(t.rotation, rotate_x(0.3));
    }

    #[test]
    fn missing_link_is_reported() {
        let params = PlacementParameters::new().with_position(7, Vector3::zeros());
        let scene = detectors();
        let resolver = PlacementResolver::new(&params, &scene);
        let err = resolver.relative_offset(7).unwrap_err();
        assert!(matches!(
            err,
            PlacementError::MissingParameterEntry {
                map: "detector_links",
                id: 7
            }
        ));
    }

    #[test]
    fn unknown_detector_is_reported() {
        let params = PlacementParameters::new()
            .with_position(1, Vector3::zeros())
            .with_detector_link(1, 999);
        let scene = detectors();
        let resolver = PlacementResolver::new(&params, &scene);
        assert!(matches!(
            resolver.relative_offset(1).unwrap_err(),
            PlacementError::MissingParameterEntry { map: "detectors", id: 999 }
        ));
    }

    #[test]
    fn entries_keep_map_order() {
        let params = PlacementParameters::new()
            .with_position(9, Vector3::new(9.0, 0.0, 0.0))
            .with_position(2, Vector3::new(2.0, 0.0, 0.0))
            .with_parameter(9, Vector3::new(0.5, 0.0, 0.0));
        let scene = detectors();
        let resolver = PlacementResolver::new(&params, &scene);
        let entries: Vec<_> = resolver.entries().collect();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].id, 2);
        assert_eq!(entries[1].id, 9);
        assert!(entries[0].parameter.is_none());
        assert_eq!(entries[1].parameter, Some(Vector3::new(0.5, 0.0, 0.0)));
    }

    #[test]
    fn single_entry_precondition() {
        let params = PlacementParameters::new()
            .with_position(1, Vector3::zeros())
            .with_position(2, Vector3::zeros());
        let scene = detectors();
        let resolver = PlacementResolver::new(&params, &scene);
        let err = resolver.single_position("Cube").unwrap_err();
        assert!(matches!(
            err,
            PlacementError::MultipleEntriesUnsupported {
                variant: "Cube",
                map: "positions",
                count: 2
            }
        ));
        assert_eq!(resolver.single_rotation("Cube").unwrap(), None);
    }

    #[test]
    fn single_placement_defaults() {
        let params = PlacementParameters::new();
        let scene = detectors();
        let resolver = PlacementResolver::new(&params, &scene);
        let t = resolver.single_placement("Cube").unwrap();
        assert_eq!(t, Transform::identity());
    }
}
