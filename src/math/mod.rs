/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Unit normal of the sketch plane (`y = 0`). Lifted points are displaced along it.
pub const HEIGHT_AXIS: Vector3 = Vector3::new(0.0, 1.0, 0.0);

/// Reduces a periodic parameter into `[0, 1)`.
///
/// Values within [`TOLERANCE`] below `1.0` snap to `0.0`, so accumulated
/// rounding (e.g. ten steps of `0.1`) lands on the seam. Non-finite input maps to `0.0`.
#[must_use]
pub fn wrap_unit(t: f64) -> f64 {
    if !t.is_finite() {
        return 0.0;
    }
    let w = t.rem_euclid(1.0);
    if w >= 1.0 - TOLERANCE {
        0.0
    } else {
        w
    }
}

/// Projects a point onto the sketch plane by zeroing its height coordinate.
#[must_use]
pub fn project_to_plane(p: &Point3) -> Point3 {
    Point3::new(p.x, 0.0, p.z)
}
