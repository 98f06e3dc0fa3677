use serde::{Deserialize, Serialize};

use crate::error::GeometryError;

use super::primitive::Primitive;
use super::transform::Transform;

/// The type of boolean combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BooleanOp {
    Union,
    Subtraction,
}

/// A solid expression: a named primitive or a boolean combination of two
/// previously built expressions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Solid {
    Primitive { name: String, shape: Primitive },
    Boolean(BooleanNode),
}

/// A boolean node. It exclusively owns both operands.
///
/// `transform` places the right operand in the left operand's frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BooleanNode {
    pub(crate) name: String,
    pub(crate) op: BooleanOp,
    pub(crate) left: Box<Solid>,
    pub(crate) right: Box<Solid>,
    pub(crate) transform: Transform,
}

impl BooleanNode {
    #[must_use]
    pub fn op(&self) -> BooleanOp {
        self.op
    }

    #[must_use]
    pub fn left(&self) -> &Solid {
        &self.left
    }

    #[must_use]
    pub fn right(&self) -> &Solid {
        &self.right
    }

    #[must_use]
    pub fn transform(&self) -> &Transform {
        &self.transform
    }
}

impl Solid {
    /// Returns the solid's name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Primitive { name, .. } => name,
            Self::Boolean(node) => &node.name,
        }
    }

    /// Returns the primitive shape if this is a leaf.
    #[must_use]
    pub fn as_primitive(&self) -> Option<&Primitive> {
        match self {
            Self::Primitive { shape, .. } => Some(shape),
            Self::Boolean(_) => None,
        }
    }

    /// Returns the boolean node if this is a composite.
    #[must_use]
    pub fn as_boolean(&self) -> Option<&BooleanNode> {
        match self {
            Self::Primitive { .. } => None,
            Self::Boolean(node) => Some(node),
        }
    }

    /// Number of primitive leaves in the tree.
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        match self {
            Self::Primitive { .. } => 1,
            Self::Boolean(node) => node.left.leaf_count() + node.right.leaf_count(),
        }
    }

    /// Names of the operands in combination order, leftmost leaf first.
    #[must_use]
    pub fn leaf_names(&self) -> Vec<&str> {
        let mut names = Vec::with_capacity(self.leaf_count());
        self.collect_leaf_names(&mut names);
        names
    }

    fn collect_leaf_names<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Self::Primitive { name, .. } => out.push(name),
            Self::Boolean(node) => {
                node.left.collect_leaf_names(out);
                node.right.collect_leaf_names(out);
            }
        }
    }

    /// Re-checks every leaf in the tree.
    ///
    /// # Errors
    ///
    /// Returns the first [`GeometryError::InvalidDimension`] found.
    pub fn validate(&self) -> Result<(), GeometryError> {
        match self {
            Self::Primitive { name, shape } => shape.validate(name),
            Self::Boolean(node) => {
                node.left.validate()?;
                node.right.validate()
            }
        }
    }
}
