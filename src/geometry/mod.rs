pub mod primitive;
pub mod solid;
pub mod transform;

pub use primitive::{BoxShape, Primitive, SphereShape, TubeShape};
pub use solid::{BooleanNode, BooleanOp, Solid};
pub use transform::Transform;
