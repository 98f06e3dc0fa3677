use crate::error::Result;
use crate::geometry::{BoxShape, Primitive, Solid};

/// Creates a box solid from its half-extents.
pub struct MakeBox {
    name: String,
    half_x: f64,
    half_y: f64,
    half_z: f64,
}

impl MakeBox {
    /// Creates a new `MakeBox` operation.
    #[must_use]
    pub fn new(name: impl Into<String>, half_x: f64, half_y: f64, half_z: f64) -> Self {
        Self {
            name: name.into(),
            half_x,
            half_y,
            half_z,
        }
    }

    /// Creates a cube with the same half-extent on every axis.
    #[must_use]
    pub fn cube(name: impl Into<String>, half: f64) -> Self {
        Self::new(name, half, half, half)
    }

    /// Executes the operation.
    ///
    /// # Errors
    ///
    /// Returns an error if any half-extent is not strictly positive.
    pub fn execute(self) -> Result<Solid> {
        let shape = Primitive::Box(BoxShape {
            half_x: self.half_x,
            half_y: self.half_y,
            half_z: self.half_z,
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
    fn box_keeps_name_and_extents() {
        let solid = MakeBox::new("BoxTT1", 75.0, 150.0, 216.0).execute().unwrap();
        assert_eq!(solid.name(), "BoxTT1");
        let Some(Primitive::Box(b)) = solid.as_primitive() else {
            panic!("expected a box primitive");
        };
        assert_eq!(b.half_extents(), [75.0, 150.0, 216.0]);
    }

    #[test]
    fn zero_extent_rejected() {
        let err = MakeBox::new("flat", 1.0, 0.0, 1.0).execute().unwrap_err();
        assert!(matches!(
            err,
            StructureError::Geometry(GeometryError::InvalidDimension {
                parameter: "half_y",
                ..
            })
        ));
    }

    #[test]
    fn nan_extent_rejected() {
        assert!(MakeBox::cube("nan", f64::NAN).execute().is_err());
    }

    proptest! {
        #[test]
        fn non_positive_extent_always_rejected(
            good in 0.001f64..1e4,
            bad in -1e4f64..=0.0,
            axis in 0usize..3,
        ) {
            let mut dims = [good; 3];
            dims[axis] = bad;
            let result = MakeBox::new("p", dims[0], dims[1], dims[2]).execute();
            let rejected = matches!(
                result,
                Err(StructureError::Geometry(GeometryError::InvalidDimension { .. }))
            );
            prop_assert!(rejected);
        }

        #[test]
        fn doubling_half_extent_doubles_bounding_box(
            hx in 0.001f64..1e3,
            hy in 0.001f64..1e3,
            hz in 0.001f64..1e3,
        ) {
            let small = MakeBox::new("s", hx, hy, hz).execute().unwrap();
            let large = MakeBox::new("l", 2.0 * hx, hy, hz).execute().unwrap();
            let small_box = BoundingBox::new(&small).execute();
            let large_box = BoundingBox::new(&large).execute();
            prop_assert!(large_box.size().x >= 2.0 * small_box.size().x - 1e-9);
            assert_relative_eq!(large_box.size().y, small_box.size().y);
        }
    }
}
