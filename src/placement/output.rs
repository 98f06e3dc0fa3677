use slotmap::{SecondaryMap, SlotMap};
use tracing::debug;

use crate::appearance::LogicalVolume;
use crate::error::PlacementError;
use crate::geometry::Transform;

slotmap::new_key_type! {
    /// Key of a logical volume within one [`BuildOutput`].
    pub struct VolumeId;
}

/// Where a placement lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParentRef {
    World,
    Volume(VolumeId),
}

/// A positioned instance of a logical volume.
#[derive(Debug, Clone, PartialEq)]
pub struct FinishedPlacement {
    pub volume: VolumeId,
    pub transform: Transform,
    pub parent: ParentRef,
    pub label: String,
    pub replica: u32,
    /// Asks the scene to check this placement for overlaps.
    pub check_overlaps: bool,
}

impl FinishedPlacement {
    /// A world-level placement with replica index 0 and no overlap check.
    #[must_use]
    pub fn new(volume: VolumeId, label: impl Into<String>, transform: Transform) -> Self {
        Self {
            volume,
            transform,
            parent: ParentRef::World,
            label: label.into(),
            replica: 0,
            check_overlaps: false,
        }
    }

    #[must_use]
    pub fn inside(mut self, parent: VolumeId) -> Self {
        self.parent = ParentRef::Volume(parent);
        self
    }

    #[must_use]
    pub fn replica(mut self, index: u32) -> Self {
        self.replica = index;
        self
    }

    #[must_use]
    pub fn with_overlap_check(mut self) -> Self {
        self.check_overlaps = true;
        self
    }
}

/// An informational scalar computed during a build.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedQuantity {
    pub name: String,
    pub value: f64,
    pub unit: &'static str,
}

/// Everything one build produced. Owned by the caller once returned.
#[derive(Debug, Default)]
pub struct BuildOutput {
    volumes: SlotMap<VolumeId, LogicalVolume>,
    placements: Vec<FinishedPlacement>,
    derived: Vec<DerivedQuantity>,
}

impl BuildOutput {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a logical volume so it can be placed one or more times.
    pub fn add_volume(&mut self, volume: LogicalVolume) -> VolumeId {
        self.volumes.insert(volume)
    }

    /// Records a placement.
    ///
    /// # Errors
    ///
    /// Returns [`PlacementError::DuplicateLabel`] if the label is already
    /// used under the same parent.
    pub fn place(&mut self, placement: FinishedPlacement) -> Result<(), PlacementError> {
        if self
            .placements
            .iter()
            .any(|p| p.parent == placement.parent && p.label == placement.label)
        {
            return Err(PlacementError::DuplicateLabel(placement.label));
        }
        debug!(
            label = %placement.label,
            replica = placement.replica,
            x = placement.transform.translation.x,
            y = placement.transform.translation.y,
            z = placement.transform.translation.z,
            "placed volume"
        );
        self.placements.push(placement);
        Ok(())
    }

    /// Records an informational quantity.
    pub fn report(&mut self, name: impl Into<String>, value: f64, unit: &'static str) {
        self.derived.push(DerivedQuantity {
            name: name.into(),
            value,
            unit,
        });
    }

    /// Moves another output's volumes and placements into this one. Parent
    /// references are remapped to the new keys.
    ///
    /// # Errors
    ///
    /// Returns [`PlacementError::DuplicateLabel`] if a world-level label is
    /// already taken, or [`PlacementError::DanglingVolume`] if a placement
    /// refers to a volume `other` does not hold. Nothing is merged in either
    /// case.
    pub fn merge(&mut self, other: BuildOutput) -> Result<(), PlacementError> {
        for p in &other.placements {
            let parent_known = match p.parent {
                ParentRef::World => true,
                ParentRef::Volume(parent) => other.volumes.contains_key(parent),
            };
            if !other.volumes.contains_key(p.volume) || !parent_known {
                return Err(PlacementError::DanglingVolume(p.label.clone()));
            }
        }
        // Nested placements get fresh parent keys, so only world labels can clash.
        if let Some(clash) = other.placements.iter().find(|p| {
            p.parent == ParentRef::World
                && self
                    .placements
                    .iter()
                    .any(|q| q.parent == ParentRef::World && q.label == p.label)
        }) {
            return Err(PlacementError::DuplicateLabel(clash.label.clone()));
        }

        let mut remap = SecondaryMap::new();
        for (old, volume) in other.volumes {
            remap.insert(old, self.volumes.insert(volume));
        }
        for mut placement in other.placements {
            placement.volume = remap[placement.volume];
            if let ParentRef::Volume(parent) = placement.parent {
                placement.parent = ParentRef::Volume(remap[parent]);
            }
            debug!(label = %placement.label, "merged placement");
            self.placements.push(placement);
        }
        self.derived.extend(other.derived);
        Ok(())
    }

    #[must_use]
    pub fn volume(&self, id: VolumeId) -> Option<&LogicalVolume> {
        self.volumes.get(id)
    }

    pub fn volumes(&self) -> impl Iterator<Item = (VolumeId, &LogicalVolume)> {
        self.volumes.iter()
    }

    #[must_use]
    pub fn placements(&self) -> &[FinishedPlacement] {
        &self.placements
    }

    /// First placement with the given label.
    #[must_use]
    pub fn placement(&self, label: &str) -> Option<&FinishedPlacement> {
        self.placements.iter().find(|p| p.label == label)
    }

    /// Logical volume behind the placement with the given label.
    #[must_use]
    pub fn placed_volume(&self, label: &str) -> Option<&LogicalVolume> {
        self.placement(label).and_then(|p| self.volumes.get(p.volume))
    }

    #[must_use]
    pub fn derived(&self) -> &[DerivedQuantity] {
        &self.derived
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.placements.len()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::appearance::{decorate, Appearance};
    use crate::material::MaterialCatalog;
    use crate::math::Vector3;
    use crate::operations::creation::MakeBox;

    fn output_with_volume() -> (BuildOutput, VolumeId) {
        let mut catalog = MaterialCatalog::new();
        let al = catalog.resolve("G4_Al").unwrap();
        let solid = MakeBox::cube("Box1", 3.0).execute().unwrap();
        let mut out = BuildOutput::new();
        let id = out.add_volume(decorate("Box1", solid, al, Appearance::default()));
        (out, id)
    }

    #[test]
    fn shared_volume_with_replicas() {
        let (mut out, id) = output_with_volume();
        let near = Transform::from_translation(Vector3::new(0.0, 50.0, 216.0));
        let far = Transform::from_translation(Vector3::new(0.0, 50.0, 827.0));
        out.place(FinishedPlacement::new(id, "box1_phys", near)).unwrap();
        out.place(FinishedPlacement::new(id, "box2_phys", far).replica(1))
            .unwrap();

        assert_eq!(out.len(), 2);
        assert_eq!(out.volumes().count(), 1);
        assert_eq!(out.placement("box2_phys").unwrap().replica, 1);
    }

    #[test]
    fn duplicate_label_rejected_in_same_parent() {
        let (mut out, id) = output_with_volume();
        out.place(FinishedPlacement::new(id, "a", Transform::identity()))
            .unwrap();
        let err = out
            .place(FinishedPlacement::new(id, "a", Transform::identity()))
            .unwrap_err();
        assert!(matches!(err, PlacementError::DuplicateLabel(label) if label == "a"));
    }

    #[test]
    fn same_label_allowed_in_other_parent() {
        let (mut out, id) = output_with_volume();
        out.place(FinishedPlacement::new(id, "a", Transform::identity()))
            .unwrap();
        out.place(FinishedPlacement::new(id, "a", Transform::identity()).inside(id))
            .unwrap();
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn merge_rejects_foreign_volume_keys() {
        let (mut first, _) = output_with_volume();
        let (mut second, id) = output_with_volume();
        second
            .place(FinishedPlacement::new(id, "kept", Transform::identity()))
            .unwrap();
        second
            .place(FinishedPlacement::new(VolumeId::default(), "stray", Transform::identity()))
            .unwrap();

        let err = first.merge(second).unwrap_err();
        assert!(matches!(err, PlacementError::DanglingVolume(label) if label == "stray"));
        assert_eq!(first.volumes().count(), 1);
        assert!(first.is_empty());
    }

    #[test]
    fn merge_remaps_parents() {
        let (mut first, _) = output_with_volume();
        let (mut second, id) = output_with_volume();
        second
            .place(FinishedPlacement::new(id, "inner", Transform::identity()).inside(id))
            .unwrap();
        second.report("mass", 1.0, "kg");

        first.merge(second).unwrap();
        let inner = first.placement("inner").unwrap();
        assert_eq!(inner.parent, ParentRef::Volume(inner.volume));
        assert!(first.volume(inner.volume).is_some());
        assert_eq!(first.derived().len(), 1);
    }
}
