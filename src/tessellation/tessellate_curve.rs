use crate::error::{Result, TessellationError};
use crate::geometry::Curve;

use super::Polyline;

/// Samples a closed curve into a closed polyline for display.
///
/// The result has `segments + 1` points; the last repeats the first.
pub struct TessellateCurve {
    segments: usize,
}

impl TessellateCurve {
    /// Creates a new `TessellateCurve` operation.
    #[must_use]
    pub fn new(segments: usize) -> Self {
        Self { segments }
    }

    /// Executes the tessellation, returning a polyline.
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than 3 segments are requested.
    #[allow(clippy::cast_precision_loss)]
    pub fn execute<C: Curve + ?Sized>(&self, curve: &C) -> Result<Polyline> {
        if self.segments < 3 {
            return Err(TessellationError::InvalidParameter(format!(
                "a closed polyline needs at least 3 segments, got {}",
                self.segments
            ))
            .into());
        }
        let mut points: Vec<_> = (0..self.segments)
            .map(|i| curve.evaluate(i as f64 / self.segments as f64))
            .collect();
        points.push(points[0]);
        Ok(Polyline { points })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::CurveParams;
    use crate::math::Point3;
    use crate::operations::creation::MakeClosedCurve;

    fn square() -> crate::geometry::ClosedCurve {
        MakeClosedCurve::new(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 1.0),
                Point3::new(0.0, 0.0, 1.0),
            ],
            CurveParams::default(),
        )
        .execute()
        .unwrap()
    }

    #[test]
    fn polyline_is_closed() {
        let line = TessellateCurve::new(64).execute(&square()).unwrap();
        assert_eq!(line.points.len(), 65);
        let first = line.points[0];
        let last = line.points[64];
        assert!((first - last).norm() < 1e-12);
    }

    #[test]
    fn passes_through_control_points() {
        let curve = square();
        let line = TessellateCurve::new(8).execute(&curve).unwrap();
        for (k, cp) in curve.control_points().iter().enumerate() {
            assert!((line.points[2 * k] - *cp).norm() < 1e-9);
        }
    }

    #[test]
    fn too_few_segments() {
        assert!(TessellateCurve::new(2).execute(&square()).is_err());
    }
}
