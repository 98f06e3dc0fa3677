use crate::geometry::{BooleanOp, Solid, Transform};
use crate::math::{Rotation3, Vector3};

use super::combine;

/// Computes the boolean subtraction of one solid from another (left - right).
///
/// The subtrahend may lie partly or entirely outside the minuend; the result
/// is then simply the minuend minus the overlap.
pub struct Subtract {
    name: String,
    left: Solid,
    right: Solid,
    transform: Transform,
}

impl Subtract {
    /// Creates a new `Subtract` operation (left - right), with the right
    /// operand at the origin of the left one.
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

    /// Places the right operand with a translation only.
    #[must_use]
    pub fn at(self, translation: Vector3) -> Self {
        self.with_transform(Transform::from_translation(translation))
    }

    /// Executes the subtraction.
    #[must_use]
    pub fn execute(self) -> Solid {
        combine(
            BooleanOp::Subtraction,
            self.name,
            self.left,
            self.right,
            self.transform,
        )
    }
}
