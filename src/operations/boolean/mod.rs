pub(crate) mod classify;
mod subtract;
mod union;

pub use classify::{classify_point_in_solid, PointClassification};
pub use subtract::Subtract;
pub use union::Union;

pub use crate::geometry::BooleanOp;

use crate::geometry::{BooleanNode, Solid, Transform};

/// Combines two built solids into a new boolean node.
///
/// `transform` places `right` in the frame of `left`. Both operands are
/// moved into the node; neither is modified.
#[must_use]
pub fn combine(
    op: BooleanOp,
    name: impl Into<String>,
    left: Solid,
    right: Solid,
    transform: Transform,
) -> Solid {
    Solid::Boolean(BooleanNode {
        name: name.into(),
        op,
        left: Box::new(left),
        right: Box::new(right),
        transform,
    })
}
