mod closed_curve;

pub(crate) use closed_curve::{knot_tangents, CubicSegment};
pub use closed_curve::{ClosedCurve, CurveKind, CurveParams};

use crate::math::{Point3, Vector3, TOLERANCE};

/// Parameter domain for a curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveDomain {
    /// Start of the parameter range.
    pub t_min: f64,
    /// End of the parameter range.
    pub t_max: f64,
}

impl CurveDomain {
    /// Creates a new curve domain.
    #[must_use]
    pub fn new(t_min: f64, t_max: f64) -> Self {
        Self { t_min, t_max }
    }
}

/// Trait for parametric curves in 3D space.
///
/// Evaluation is total: closed curves reduce any real `t` into their domain.
pub trait Curve {
    /// Evaluates the curve at parameter `t`, returning the 3D point.
    fn evaluate(&self, t: f64) -> Point3;

    /// First derivative with respect to `t`.
    fn derivative(&self, t: f64) -> Vector3;

    /// Returns the parameter domain of the curve.
    fn domain(&self) -> CurveDomain;

    /// Returns whether the curve is closed.
    fn is_closed(&self) -> bool;

    /// Unit tangent at `t`, or `None` where the derivative vanishes.
    fn tangent(&self, t: f64) -> Option<Vector3> {
        self.derivative(t).try_normalize(TOLERANCE)
    }
}
