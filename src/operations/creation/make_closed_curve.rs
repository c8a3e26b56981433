use tracing::debug;

use crate::error::{CurveError, Result};
use crate::geometry::curve::{knot_tangents, CubicSegment};
use crate::geometry::{ClosedCurve, CurveParams};
use crate::math::Point3;

/// Minimum number of control points for a closed loop.
pub const MIN_CONTROL_POINTS: usize = 3;

/// Builds a periodic Catmull–Rom curve through an ordered loop of points.
///
/// Segment `i` runs from `points[i]` to `points[(i + 1) % n]`. Each point
/// gets one tangent from its cyclic neighbours, shared by both segments
/// meeting there. Duplicate or collinear points are
/// accepted as given.
pub struct MakeClosedCurve {
    points: Vec<Point3>,
    params: CurveParams,
}

impl MakeClosedCurve {
    /// Creates a new `MakeClosedCurve` operation.
    #[must_use]
    pub fn new(points: Vec<Point3>, params: CurveParams) -> Self {
        Self { points, params }
    }

    /// Executes the operation, returning a new curve.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InsufficientPoints`] when fewer than three points
    /// were supplied, or [`CurveError::InvalidParameter`] for a non-finite tension.
    pub fn execute(&self) -> Result<ClosedCurve> {
        let n = self.points.len();
        if n < MIN_CONTROL_POINTS {
            return Err(CurveError::InsufficientPoints { given: n }.into());
        }
        if !self.params.tension.is_finite() {
            return Err(CurveError::InvalidParameter(format!(
                "tension must be finite, got {}",
                self.params.tension
            ))
            .into());
        }

        let pts = &self.points;
        let tangents = knot_tangents(pts, &self.params);
        let segments = (0..n)
            .map(|i| {
                let j = (i + 1) % n;
                CubicSegment::hermite(&pts[i], &pts[j], tangents[i], tangents[j])
            })
            .collect();

        debug!(points = n, kind = ?self.params.kind, "built closed curve");
        Ok(ClosedCurve::from_segments(
            self.points.clone(),
            self.params,
            segments,
        ))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::ChordLiftError;
    use crate::geometry::{Curve, CurveKind};

    fn p(x: f64, z: f64) -> Point3 {
        Point3::new(x, 0.0, z)
    }

    #[test]
    fn triangle_is_enough() {
        let curve = MakeClosedCurve::new(
            vec![p(0.0, 0.0), p(1.0, 0.0), p(0.0, 1.0)],
            CurveParams::default(),
        )
        .execute()
        .unwrap();
        assert_eq!(curve.segment_count(), 3);
        assert!(curve.is_closed());
    }

    #[test]
    fn two_points_rejected() {
        let err = MakeClosedCurve::new(vec![p(0.0, 0.0), p(1.0, 0.0)], CurveParams::default())
            .execute()
            .unwrap_err();
        assert!(matches!(
            err,
            ChordLiftError::Curve(CurveError::InsufficientPoints { given: 2 })
        ));
    }

    #[test]
    fn empty_rejected() {
        let result = MakeClosedCurve::new(vec![], CurveParams::default()).execute();
        assert!(result.is_err());
    }

    #[test]
    fn non_finite_tension_rejected() {
        let result = MakeClosedCurve::new(
            vec![p(0.0, 0.0), p(1.0, 0.0), p(0.0, 1.0)],
            CurveParams {
                kind: CurveKind::Uniform,
                tension: f64::NAN,
            },
        )
        .execute();
        assert!(matches!(
            result,
            Err(ChordLiftError::Curve(CurveError::InvalidParameter(_)))
        ));
    }

    #[test]
    fn keeps_points_in_order() {
        let pts = vec![p(0.0, 0.0), p(3.0, 0.0), p(3.0, 3.0), p(0.0, 3.0)];
        let curve = MakeClosedCurve::new(pts.clone(), CurveParams::default())
            .execute()
            .unwrap();
        assert_eq!(curve.control_points(), pts.as_slice());
    }
}
