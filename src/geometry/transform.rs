use serde::{Deserialize, Serialize};

use crate::math::{Point3, Rotation3, Vector3};

/// A rigid transform: rotation followed by translation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub rotation: Rotation3,
    pub translation: Vector3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    #[must_use]
    pub fn new(rotation: Rotation3, translation: Vector3) -> Self {
        Self {
            rotation,
            translation,
        }
    }

    #[must_use]
    pub fn identity() -> Self {
        Self::new(Rotation3::identity(), Vector3::zeros())
    }

    /// Pure translation.
    #[must_use]
    pub fn from_translation(translation: Vector3) -> Self {
        Self::new(Rotation3::identity(), translation)
    }

    /// Pure rotation about the origin.
    #[must_use]
    pub fn from_rotation(rotation: Rotation3) -> Self {
        Self::new(rotation, Vector3::zeros())
    }

    /// Maps a point from the local frame into the parent frame.
    #[must_use]
    pub fn apply_point(&self, p: &Point3) -> Point3 {
        self.rotation * p + self.translation
    }

    /// Maps a point from the parent frame back into the local frame.
    #[must_use]
    pub fn inverse_apply_point(&self, p: &Point3) -> Point3 {
        self.rotation.inverse() * (p - self.translation)
    }

    /// Composes two transforms: `self` is applied first, then `outer`.
    #[must_use]
    pub fn then(&self, outer: &Transform) -> Transform {
        Transform {
            rotation: outer.rotation * self.rotation,
            translation: outer.rotation * self.translation + outer.translation,
        }
    }
}
