use crate::geometry::{BooleanOp, Solid, Transform};
use crate::math::{Rotation3, Vector3};

use super::combine;

/// Computes the boolean union of two solids.
pub struct Union {
    name: String,
    left: Solid,
    right: Solid,
    transform: Transform,
}

impl Union {
    /// Creates a new `Union` operation with the right operand at the origin
    /// of the left one.
    #[must_use]
    pub fn new(name: impl Into<String>, left: Solid, right: Solid) -> Self {
        Self {
            name: name.into(),
            left,
            right,
            transform: Transform::identity(),
        }
    }

    /// Places the right operand with the given transform.
    #[must_use]
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Places the right operand with a rotation and translation.
    #[must_use]
    pub fn with_placement(self, rotation: Rotation3, translation: Vector3) -> Self {
        self.with_transform(Transform::new(rotation, translation))
    }

    /// Executes the union.
    #[must_use]
    pub fn execute(self) -> Solid {
        combine(
            BooleanOp::Union,
            self.name,
            self.left,
            self.right,
            self.transform,
        )
    }
}
