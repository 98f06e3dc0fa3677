use crate::geometry::{BooleanOp, Solid};
use crate::math::Point3;

/// Classification of a point relative to a solid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointClassification {
    Inside,
    Outside,
}

/// Classifies a point given in the solid's local frame.
///
/// Walks the expression tree: a union contains the point if either operand
/// does, a subtraction if the left operand does and the right does not.
/// Points on a boundary count as inside.
#[must_use]
pub fn classify_point_in_solid(point: &Point3, solid: &Solid) -> PointClassification {
    if contains(point, solid) {
        PointClassification::Inside
    } else {
        PointClassification::Outside
    }
}

pub(crate) fn contains(point: &Point3, solid: &Solid) -> bool {
    match solid {
        Solid::Primitive { shape, .. } => shape.contains(point),
        Solid::Boolean(node) => {
            let in_left = contains(point, &node.left);
            match node.op {
                BooleanOp::Union => {
                    in_left || contains(&node.transform.inverse_apply_point(point), &node.right)
                }
                BooleanOp::Subtraction => {
                    in_left && !contains(&node.transform.inverse_apply_point(point), &node.right)
                }
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::{rotate_y, Vector3};
    use crate::operations::boolean::Subtract;
    use crate::operations::creation::{MakeBox, MakeTube};
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn drilled_hole_is_outside() {
        let holder = MakeTube::new("supportTop", 0.0, 29.0, 13.5).execute().unwrap();
        let hole = MakeTube::new("hole", 0.0, 2.5, 5.0).execute().unwrap();
        let drilled = Subtract::new("HolderPrim-hole", holder, hole)
            .at(Vector3::new(0.0, -22.5, -13.0))
            .execute();

        assert_eq!(
            classify_point_in_solid(&Point3::new(0.0, -22.5, -12.0), &drilled),
            PointClassification::Outside
        );
        assert_eq!(
            classify_point_in_solid(&Point3::new(0.0, 0.0, 0.0), &drilled),
            PointClassification::Inside
        );
    }

    #[test]
    fn rotated_subtrahend_runs_along_x() {
        let cube = MakeBox::cube("Box1", 3.0).execute().unwrap();
        let channel = MakeTube::new("Tub1", 0.0, 0.5, 3.6).execute().unwrap();
        let cut = Subtract::new("cut", cube, channel)
            .with_placement(rotate_y(FRAC_PI_2), Vector3::new(0.0, 1.5, -1.5))
            .execute();

        // The channel axis is now X, so it pierces the cube end to end.
        for x in [-2.9, 0.0, 2.9] {
            assert_eq!(
                classify_point_in_solid(&Point3::new(x, 1.5, -1.5), &cut),
                PointClassification::Outside
            );
        }
        assert_eq!(
            classify_point_in_solid(&Point3::new(0.0, 1.5, 1.5), &cut),
            PointClassification::Inside
        );
    }
}
