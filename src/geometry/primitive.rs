use std::f64::consts::{PI, TAU};

use serde::{Deserialize, Serialize};

use crate::error::GeometryError;
use crate::math::{Point3, TOLERANCE};
use crate::operations::query::Aabb;

/// A primitive shape centred on its local origin.
///
/// Instances are only produced by the creation operations (or by the import
/// reader, which re-validates them), so every field satisfies the dimension
/// rules checked in [`Primitive::validate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Primitive {
    Box(BoxShape),
    Tube(TubeShape),
    Sphere(SphereShape),
}

/// An axis-aligned box given by its half-extents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxShape {
    pub(crate) half_x: f64,
    pub(crate) half_y: f64,
    pub(crate) half_z: f64,
}

/// A cylindrical tube section along the local Z axis.
///
/// Angles are in radians; `start_angle` is measured from +X towards +Y.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TubeShape {
    pub(crate) inner_radius: f64,
    pub(crate) outer_radius: f64,
    pub(crate) half_length: f64,
    pub(crate) start_angle: f64,
    pub(crate) span_angle: f64,
}

/// A spherical shell section.
///
/// `phi` is the azimuth around Z, `theta` the polar angle from +Z.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SphereShape {
    pub(crate) inner_radius: f64,
    pub(crate) outer_radius: f64,
    pub(crate) phi_start: f64,
    pub(crate) phi_span: f64,
    pub(crate) theta_start: f64,
    pub(crate) theta_span: f64,
}

impl BoxShape {
    /// Returns the half-extents along x, y and z.
    #[must_use]
    pub fn half_extents(&self) -> [f64; 3] {
        [self.half_x, self.half_y, self.half_z]
    }
}

impl TubeShape {
    #[must_use]
    pub fn inner_radius(&self) -> f64 {
        self.inner_radius
    }

    #[must_use]
    pub fn outer_radius(&self) -> f64 {
        self.outer_radius
    }

    #[must_use]
    pub fn half_length(&self) -> f64 {
        self.half_length
    }

    /// Returns `(start, span)` in radians.
    #[must_use]
    pub fn angles(&self) -> (f64, f64) {
        (self.start_angle, self.span_angle)
    }
}

impl SphereShape {
    #[must_use]
    pub fn inner_radius(&self) -> f64 {
        self.inner_radius
    }

    #[must_use]
    pub fn outer_radius(&self) -> f64 {
        self.outer_radius
    }
}

impl Primitive {
    /// Checks the dimension rules for this shape.
    ///
    /// Extents and outer radii must be finite and strictly positive, inner
    /// radii non-negative and below the outer radius, angle starts within
    /// `[0, 2pi]` and spans within `(0, 2pi]` (`(0, pi]` for the polar span).
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidDimension`] for the first offending
    /// parameter.
    pub fn validate(&self, solid: &str) -> Result<(), GeometryError> {
        match self {
            Self::Box(b) => {
                positive(solid, "half_x", b.half_x)?;
                positive(solid, "half_y", b.half_y)?;
                positive(solid, "half_z", b.half_z)
            }
            Self::Tube(t) => {
                radii(solid, t.inner_radius, t.outer_radius)?;
                positive(solid, "half_length", t.half_length)?;
                angle(solid, "start_angle", t.start_angle, TAU, false)?;
                angle(solid, "span_angle", t.span_angle, TAU, true)
            }
            Self::Sphere(s) => {
                radii(solid, s.inner_radius, s.outer_radius)?;
                angle(solid, "phi_start", s.phi_start, TAU, false)?;
                angle(solid, "phi_span", s.phi_span, TAU, true)?;
                angle(solid, "theta_start", s.theta_start, PI, false)?;
                angle(solid, "theta_span", s.theta_span, PI, true)?;
                if s.theta_start + s.theta_span > PI + TOLERANCE {
                    return Err(invalid(
                        solid,
                        "theta_span",
                        s.theta_span,
                        "polar range exceeds pi",
                    ));
                }
                Ok(())
            }
        }
    }

    /// Returns `true` if the local point lies inside or on the shape.
    #[must_use]
    pub fn contains(&self, p: &Point3) -> bool {
        match self {
            Self::Box(b) => {
                p.x.abs() <= b.half_x && p.y.abs() <= b.half_y && p.z.abs() <= b.half_z
            }
            Self::Tube(t) => {
                if p.z.abs() > t.half_length {
                    return false;
                }
                let r = p.x.hypot(p.y);
                r <= t.outer_radius
                    && r >= t.inner_radius
                    && angle_within(p.y.atan2(p.x), t.start_angle, t.span_angle)
            }
            Self::Sphere(s) => {
                let r = p.coords.norm();
                if r > s.outer_radius || r < s.inner_radius {
                    return false;
                }
                if r < TOLERANCE {
                    // The centre belongs to a solid ball regardless of the angular cut.
                    return s.inner_radius < TOLERANCE;
                }
                let theta = (p.z / r).clamp(-1.0, 1.0).acos();
                theta >= s.theta_start - TOLERANCE
                    && theta <= s.theta_start + s.theta_span + TOLERANCE
                    && angle_within(p.y.atan2(p.x), s.phi_start, s.phi_span)
            }
        }
    }

    /// Local axis-aligned bounding box. Angular cuts are ignored, so the box
    /// is conservative for partial tubes and spheres.
    #[must_use]
    pub fn local_aabb(&self) -> Aabb {
        let half = match self {
            Self::Box(b) => [b.half_x, b.half_y, b.half_z],
            Self::Tube(t) => [t.outer_radius, t.outer_radius, t.half_length],
            Self::Sphere(s) => [s.outer_radius, s.outer_radius, s.outer_radius],
        };
        Aabb {
            min: Point3::new(-half[0], -half[1], -half[2]),
            max: Point3::new(half[0], half[1], half[2]),
        }
    }

    /// Exact cubic volume in mm³.
    #[must_use]
    pub fn cubic_volume(&self) -> f64 {
        match self {
            Self::Box(b) => 8.0 * b.half_x * b.half_y * b.half_z,
            Self::Tube(t) => {
                t.span_angle * (t.outer_radius.powi(2) - t.inner_radius.powi(2)) * t.half_length
            }
            Self::Sphere(s) => {
                let radial = s.outer_radius.powi(3) - s.inner_radius.powi(3);
                let polar = s.theta_start.cos() - (s.theta_start + s.theta_span).cos();
                s.phi_span / 3.0 * radial * polar
            }
        }
    }
}

fn invalid(solid: &str, parameter: &'static str, value: f64, reason: &'static str) -> GeometryError {
    GeometryError::InvalidDimension {
        solid: solid.to_owned(),
        parameter,
        value,
        reason,
    }
}

fn positive(solid: &str, parameter: &'static str, value: f64) -> Result<(), GeometryError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(solid, parameter, value, "must be strictly positive"))
    }
}

fn radii(solid: &str, inner: f64, outer: f64) -> Result<(), GeometryError> {
    positive(solid, "outer_radius", outer)?;
    if !inner.is_finite() || inner < 0.0 {
        return Err(invalid(solid, "inner_radius", inner, "must not be negative"));
    }
    if inner >= outer {
        return Err(invalid(
            solid,
            "inner_radius",
            inner,
            "must be below the outer radius",
        ));
    }
    Ok(())
}

fn angle(
    solid: &str,
    parameter: &'static str,
    value: f64,
    max: f64,
    is_span: bool,
) -> Result<(), GeometryError> {
    if !value.is_finite() || value < 0.0 || value > max + TOLERANCE {
        return Err(invalid(solid, parameter, value, "angle out of range"));
    }
    if is_span && value <= 0.0 {
        return Err(invalid(solid, parameter, value, "span must be positive"));
    }
    Ok(())
}

/// Returns `true` if `angle` lies in `[start, start + span]` modulo a turn.
fn angle_within(angle: f64, start: f64, span: f64) -> bool {
    if span >= TAU - TOLERANCE {
        return true;
    }
    let offset = (angle - start).rem_euclid(TAU);
    offset <= span + TOLERANCE
}
