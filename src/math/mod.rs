pub mod units;

/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Orthonormal 3x3 rotation.
pub type Rotation3 = nalgebra::Rotation3<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Rotation about the X axis by `angle` radians.
#[must_use]
pub fn rotate_x(angle: f64) -> Rotation3 {
    Rotation3::from_axis_angle(&Vector3::x_axis(), angle)
}

/// Rotation about the Y axis by `angle` radians.
#[must_use]
pub fn rotate_y(angle: f64) -> Rotation3 {
    Rotation3::from_axis_angle(&Vector3::y_axis(), angle)
}

/// Rotation built from XYZ Euler angles in degrees (roll, pitch, yaw).
#[must_use]
pub fn rotation_from_degrees(angles: [f64; 3]) -> Rotation3 {
    Rotation3::from_euler_angles(
        angles[0] * units::DEG,
        angles[1] * units::DEG,
        angles[2] * units::DEG,
    )
}
