use crate::geometry::{BooleanNode, BooleanOp, Primitive, Solid};
use crate::math::{Point3, Rotation3, TOLERANCE};
use crate::operations::boolean::classify::contains;

use super::bounding_box::{Aabb, BoundingBox};

/// Default number of sample cells per axis for overlap estimates.
pub const DEFAULT_RESOLUTION: usize = 64;

/// Computes the nominal volume of a solid in mm³.
///
/// Primitives use their closed-form volume. A boolean node is evaluated as
/// `left - overlap` (subtraction) or `left + right - overlap` (union). The
/// overlap is exact when the left operand is a box that encloses the
/// transformed right operand, or when both operands are boxes with
/// axis-preserving relative rotation; otherwise it is estimated on a
/// cell-centred grid over the common bounding region.
pub struct Volume<'a> {
    solid: &'a Solid,
    resolution: usize,
}

impl<'a> Volume<'a> {
    /// Creates a new `Volume` query with the default resolution.
    #[must_use]
    pub fn new(solid: &'a Solid) -> Self {
        Self {
            solid,
            resolution: DEFAULT_RESOLUTION,
        }
    }

    /// Sets the number of sample cells per axis for overlap estimates.
    #[must_use]
    pub fn with_resolution(mut self, resolution: usize) -> Self {
        self.resolution = resolution.max(1);
        self
    }

    /// Executes the query.
    #[must_use]
    pub fn execute(&self) -> f64 {
        solid_volume(self.solid, self.resolution)
    }
}

fn solid_volume(solid: &Solid, resolution: usize) -> f64 {
    match solid {
        Solid::Primitive { shape, .. } => shape.cubic_volume(),
        Solid::Boolean(node) => {
            let left = solid_volume(&node.left, resolution);
            let overlap = overlap_volume(node, resolution);
            match node.op {
                BooleanOp::Union => left + solid_volume(&node.right, resolution) - overlap,
                BooleanOp::Subtraction => (left - overlap).max(0.0),
            }
        }
    }
}

/// Volume shared by the left operand and the placed right operand.
fn overlap_volume(node: &BooleanNode, resolution: usize) -> f64 {
    let left_box = BoundingBox::new(&node.left).execute();
    let right_box = BoundingBox::new(&node.right)
        .execute()
        .transformed(&node.transform);
    let Some(region) = left_box.intersection(&right_box) else {
        return 0.0;
    };
    if region.volume() < TOLERANCE {
        return 0.0;
    }

    if let Solid::Primitive {
        shape: Primitive::Box(_),
        ..
    } = node.left.as_ref()
    {
        if left_box.contains_box(&right_box) {
            return solid_volume(&node.right, resolution);
        }
        if matches!(
            node.right.as_ref(),
            Solid::Primitive {
                shape: Primitive::Box(_),
                ..
            }
        ) && preserves_axes(&node.transform.rotation)
        {
            return region.volume();
        }
    }

    sample_region(&region, resolution, |p| {
        contains(p, &node.left) && contains(&node.transform.inverse_apply_point(p), &node.right)
    })
}

/// Returns `true` if the rotation maps coordinate axes onto coordinate axes.
fn preserves_axes(rotation: &Rotation3) -> bool {
    rotation
        .matrix()
        .iter()
        .all(|v| v.abs() < 1e-9 || (v.abs() - 1.0).abs() < 1e-9)
}

#[allow(clippy::cast_precision_loss)]
fn sample_region(region: &Aabb, resolution: usize, inside: impl Fn(&Point3) -> bool) -> f64 {
    let size = region.size();
    let step = size / resolution as f64;
    let mut hits = 0usize;
    for i in 0..resolution {
        let x = region.min.x + (i as f64 + 0.5) * step.x;
        for j in 0..resolution {
            let y = region.min.y + (j as f64 + 0.5) * step.y;
            for k in 0..resolution {
                let z = region.min.z + (k as f64 + 0.5) * step.z;
                if inside(&Point3::new(x, y, z)) {
                    hits += 1;
                }
            }
        }
    }
    region.volume() * hits as f64 / resolution.pow(3) as f64
}
