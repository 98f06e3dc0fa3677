use crate::geometry::{BooleanOp, Solid, Transform};
use crate::math::{Point3, Vector3, TOLERANCE};

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner of the bounding box.
    pub min: Point3,
    /// Maximum corner of the bounding box.
    pub max: Point3,
}

impl Aabb {
    /// Edge lengths along x, y and z.
    #[must_use]
    pub fn size(&self) -> Vector3 {
        self.max - self.min
    }

    #[must_use]
    pub fn volume(&self) -> f64 {
        let s = self.size();
        s.x * s.y * s.z
    }

    /// Smallest box containing both boxes.
    #[must_use]
    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb {
            min: self.min.inf(&other.min),
            max: self.max.sup(&other.max),
        }
    }

    /// Common region of both boxes, or `None` if they are disjoint.
    /// Touching boxes yield a flat box.
    #[must_use]
    pub fn intersection(&self, other: &Aabb) -> Option<Aabb> {
        let min = self.min.sup(&other.min);
        let max = self.max.inf(&other.max);
        (min.x <= max.x && min.y <= max.y && min.z <= max.z).then_some(Aabb { min, max })
    }

    /// Returns `true` if `other` lies entirely within this box.
    #[must_use]
    pub fn contains_box(&self, other: &Aabb) -> bool {
        (0..3).all(|i| {
            other.min[i] >= self.min[i] - TOLERANCE && other.max[i] <= self.max[i] + TOLERANCE
        })
    }

    /// The eight corner points.
    #[must_use]
    pub fn corners(&self) -> [Point3; 8] {
        let (a, b) = (self.min, self.max);
        [
            Point3::new(a.x, a.y, a.z),
            Point3::new(b.x, a.y, a.z),
            Point3::new(a.x, b.y, a.z),
            Point3::new(b.x, b.y, a.z),
            Point3::new(a.x, a.y, b.z),
            Point3::new(b.x, a.y, b.z),
            Point3::new(a.x, b.y, b.z),
            Point3::new(b.x, b.y, b.z),
        ]
    }

    /// Box enclosing this box after mapping it through `transform`.
    #[must_use]
    pub fn transformed(&self, transform: &Transform) -> Aabb {
        let corners = self.corners().map(|c| transform.apply_point(&c));
        let mut min = corners[0];
        let mut max = corners[0];
        for c in &corners[1..] {
            min = min.inf(c);
            max = max.sup(c);
        }
        Aabb { min, max }
    }
}

/// Computes the axis-aligned bounding box of a solid in its local frame.
pub struct BoundingBox<'a> {
    solid: &'a Solid,
}

impl<'a> BoundingBox<'a> {
    /// Creates a new `BoundingBox` query.
    #[must_use]
    pub fn new(solid: &'a Solid) -> Self {
        Self { solid }
    }

    /// Executes the query.
    ///
    /// A union encloses both operands; a subtraction never grows beyond its
    /// left operand.
    #[must_use]
    pub fn execute(&self) -> Aabb {
        solid_aabb(self.solid)
    }
}

fn solid_aabb(solid: &Solid) -> Aabb {
    match solid {
        Solid::Primitive { shape, .. } => shape.local_aabb(),
        Solid::Boolean(node) => {
            let left = solid_aabb(&node.left);
            match node.op {
                BooleanOp::Union => left.union(&solid_aabb(&node.right).transformed(&node.transform)),
                BooleanOp::Subtraction => left,
            }
        }
    }
}
