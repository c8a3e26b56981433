use crate::geometry::Curve;
use crate::math::{wrap_unit, Point3, HEIGHT_AXIS};

/// Result of the chord-lift construction for one parameter pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChordLiftSample {
    /// Curve point at `a`.
    pub start: Point3,
    /// Curve point at `b`.
    pub end: Point3,
    /// Midpoint of the chord.
    pub midpoint: Point3,
    /// Euclidean length of the chord.
    pub chord_length: f64,
    /// Midpoint raised along [`HEIGHT_AXIS`] by `chord_length`.
    pub lifted_point: Point3,
}

/// Lifts the chord between two curve parameters above its midpoint.
///
/// `lifted(a, b) = (C(a) + C(b)) / 2 + Y * |C(b) - C(a)|`
///
/// The map is symmetric in `a` and `b` and has zero height on the diagonal.
/// Parameters are wrapped into `[0, 1)` before evaluation.
#[derive(Debug, Clone, Copy)]
pub struct ChordLift {
    a: f64,
    b: f64,
}

impl ChordLift {
    /// Creates a new `ChordLift` query.
    #[must_use]
    pub fn new(a: f64, b: f64) -> Self {
        Self { a, b }
    }

    /// Executes the query against `curve`.
    #[must_use]
    pub fn execute<C: Curve + ?Sized>(&self, curve: &C) -> ChordLiftSample {
        let start = curve.evaluate(wrap_unit(self.a));
        let end = curve.evaluate(wrap_unit(self.b));
        let midpoint = nalgebra::center(&start, &end);
        let chord_length = (end - start).norm();
        ChordLiftSample {
            start,
            end,
            midpoint,
            chord_length,
            lifted_point: midpoint + HEIGHT_AXIS * chord_length,
        }
    }
}
