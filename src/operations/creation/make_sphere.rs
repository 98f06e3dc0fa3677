use std::f64::consts::{PI, TAU};

use crate::error::Result;
use crate::geometry::{Primitive, Solid, SphereShape};

/// Creates a sphere or spherical shell section.
///
/// Defaults to the full sphere; azimuthal and polar cuts are optional.
pub struct MakeSphere {
    name: String,
    inner_radius: f64,
    outer_radius: f64,
    phi: (f64, f64),
    theta: (f64, f64),
}

impl MakeSphere {
    /// Creates a new `MakeSphere` operation.
    #[must_use]
    pub fn new(name: impl Into<String>, inner_radius: f64, outer_radius: f64) -> Self {
        Self {
            name: name.into(),
            inner_radius,
            outer_radius,
            phi: (0.0, TAU),
            theta: (0.0, PI),
        }
    }

    /// Restricts the azimuth to `[start, start + span]` (radians).
    #[must_use]
    pub fn with_phi(mut self, start: f64, span: f64) -> Self {
        self.phi = (start, span);
        self
    }

    /// Restricts the polar angle to `[start, start + span]` (radians).
    #[must_use]
    pub fn with_theta(mut self, start: f64, span: f64) -> Self {
        self.theta = (start, span);
        self
    }

    /// Executes the operation.
    ///
    /// # Errors
    ///
    /// Returns an error if the radii or angular ranges are out of range.
    pub fn execute(self) -> Result<Solid> {
        let shape = Primitive::Sphere(SphereShape {
            inner_radius: self.inner_radius,
            outer_radius: self.outer_radius,
            phi_start: self.phi.0,
            phi_span: self.phi.1,
            theta_start: self.theta.0,
            theta_span: self.theta.1,
        });
        shape.validate(&self.name)?;
        Ok(Solid::Primitive {
            name: self.name,
            shape,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::{GeometryError, StructureError};
    use crate::operations::query::BoundingBox;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn hemisphere_volume_is_half() {
        let full = MakeSphere::new("full", 0.0, 1.0).execute().unwrap();
        let half = MakeSphere::new("half", 0.0, 1.0)
            .with_theta(0.0, PI / 2.0)
            .execute()
            .unwrap();
        let v_full = full.as_primitive().unwrap().cubic_volume();
        let v_half = half.as_primitive().unwrap().cubic_volume();
        assert_relative_eq!(v_half, v_full / 2.0, epsilon = 1e-12);
    }

    #[test]
    fn zero_radius_rejected() {
        assert!(MakeSphere::new("s", 0.0, 0.0).execute().is_err());
    }

    #[test]
    fn polar_range_beyond_pi_rejected() {
        let result = MakeSphere::new("s", 0.0, 1.0)
            .with_theta(PI / 2.0, PI)
            .execute();
        assert!(result.is_err());
    }

    proptest! {
        #[test]
        fn non_positive_radius_always_rejected(bad in -1e4f64..=0.0) {
            let rejected = matches!(
                MakeSphere::new("p", 0.0, bad).execute(),
                Err(StructureError::Geometry(GeometryError::InvalidDimension { .. }))
            );
            prop_assert!(rejected);
        }

        #[test]
        fn doubling_radius_doubles_bounding_box(radius in 0.001f64..1e3) {
            let small = BoundingBox::new(&MakeSphere::new("s", 0.0, radius).execute().unwrap())
                .execute()
                .size();
            let large = BoundingBox::new(&MakeSphere::new("l", 0.0, 2.0 * radius).execute().unwrap())
                .execute()
                .size();
            prop_assert!(large.x >= 2.0 * small.x - 1e-9);
            prop_assert!(large.y >= 2.0 * small.y - 1e-9);
            prop_assert!(large.z >= 2.0 * small.z - 1e-9);
        }
    }
}
