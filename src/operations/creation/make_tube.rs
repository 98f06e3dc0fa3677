use std::f64::consts::TAU;

use crate::error::Result;
use crate::geometry::{Primitive, Solid, TubeShape};

/// Creates a tube (cylinder or cylindrical shell) along the local Z axis.
///
/// Defaults to a full turn; use [`MakeTube::with_angles`] for a sector.
pub struct MakeTube {
    name: String,
    inner_radius: f64,
    outer_radius: f64,
    half_length: f64,
    start_angle: f64,
    span_angle: f64,
}

impl MakeTube {
    /// Creates a new `MakeTube` operation.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        inner_radius: f64,
        outer_radius: f64,
        half_length: f64,
    ) -> Self {
        Self {
            name: name.into(),
            inner_radius,
            outer_radius,
            half_length,
            start_angle: 0.0,
            span_angle: TAU,
        }
    }

    /// Restricts the tube to the sector `[start, start + span]` (radians).
    #[must_use]
    pub fn with_angles(mut self, start: f64, span: f64) -> Self {
        self.start_angle = start;
        self.span_angle = span;
        self
    }

    /// Executes the operation.
    ///
    /// # Errors
    ///
    /// Returns an error if the radii, half-length or angles are out of range.
    pub fn execute(self) -> Result<Solid> {
        let shape = Primitive::Tube(TubeShape {
            inner_radius: self.inner_radius,
            outer_radius: self.outer_radius,
            half_length: self.half_length,
            start_angle: self.start_angle,
            span_angle: self.span_angle,
        });
        shape.validate(&self.name)?;
        Ok(Solid::Primitive {
            name: self.name,
            shape,
        })
    }
}
