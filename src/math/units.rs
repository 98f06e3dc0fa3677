//! Unit constants. Lengths are in millimetres, angles in radians and
//! densities in g/cm³.

use std::f64::consts::PI;

pub const MM: f64 = 1.0;
pub const UM: f64 = 1e-3 * MM;
pub const CM: f64 = 10.0 * MM;
pub const M: f64 = 1000.0 * MM;

pub const RAD: f64 = 1.0;
pub const DEG: f64 = PI / 180.0;

pub const G_PER_CM3: f64 = 1.0;
pub const MG_PER_CM3: f64 = 1e-3 * G_PER_CM3;
pub const KG_PER_M3: f64 = 1e-3 * G_PER_CM3;

/// Cubic centimetre expressed in the internal volume unit (mm³).
pub const CM3: f64 = CM * CM * CM;

pub const PASCAL: f64 = 1.0;
pub const BAR: f64 = 1e5 * PASCAL;
pub const ATMOSPHERE: f64 = 101_325.0 * PASCAL;

pub const KELVIN: f64 = 1.0;
pub const STP_TEMPERATURE: f64 = 273.15 * KELVIN;
