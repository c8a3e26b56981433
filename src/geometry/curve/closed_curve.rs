use crate::math::{wrap_unit, Point3, Vector3};

use super::{Curve, CurveDomain};

/// Knot intervals are clamped to at least this, so coincident points stay finite.
const MIN_KNOT_INTERVAL: f64 = 1e-4;

/// Knot-spacing strategy for Catmull–Rom interpolation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CurveKind {
    /// Knot spacing `|Δp|^0.5`. Avoids cusps and self-loops on uneven spacing.
    #[default]
    Centripetal,
    /// Knot spacing `|Δp|`.
    Chordal,
    /// Cardinal spline with tangents `tension * (p[i+1] - p[i-1])`.
    Uniform,
}

impl CurveKind {
    /// Exponent applied to the chord length between neighbours, if non-uniform.
    fn knot_exponent(self) -> Option<f64> {
        match self {
            Self::Centripetal => Some(0.5),
            Self::Chordal => Some(1.0),
            Self::Uniform => None,
        }
    }
}

/// Parameters controlling closed-curve construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveParams {
    /// Interpolation strategy.
    pub kind: CurveKind,
    /// Tangent scale, only used by [`CurveKind::Uniform`].
    pub tension: f64,
}

impl Default for CurveParams {
    fn default() -> Self {
        Self {
            kind: CurveKind::Centripetal,
            tension: 0.5,
        }
    }
}

/// One cubic Hermite piece in power basis: `c0 + c1 u + c2 u^2 + c3 u^3`, `u ∈ [0, 1]`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct CubicSegment {
    c0: Vector3,
    c1: Vector3,
    c2: Vector3,
    c3: Vector3,
}

/// Per-knot tangents of a closed loop, in the unit local parameter of a segment.
///
/// Each knot gets one tangent shared by the segment ending there and the one
/// starting there. Every segment spans the same global length, so equal local
/// tangents give a continuous first derivative at every joint, the seam included.
pub(crate) fn knot_tangents(points: &[Point3], params: &CurveParams) -> Vec<Vector3> {
    let n = points.len();
    let prev = |i: usize| points[(i + n - 1) % n].coords;
    let next = |i: usize| points[(i + 1) % n].coords;
    match params.kind.knot_exponent() {
        Some(exp) => {
            // dt[i] is the knot interval from point i to point i + 1
            let dt: Vec<f64> = (0..n)
                .map(|i| {
                    (next(i) - points[i].coords)
                        .norm()
                        .powf(exp)
                        .max(MIN_KNOT_INTERVAL)
                })
                .collect();
            (0..n)
                .map(|i| {
                    let (x0, x1, x2) = (prev(i), points[i].coords, next(i));
                    let (d0, d1) = (dt[(i + n - 1) % n], dt[i]);
                    let m = (x1 - x0) / d0 - (x2 - x0) / (d0 + d1) + (x2 - x1) / d1;
                    m * (0.5 * (d0 + d1))
                })
                .collect()
        }
        None => (0..n)
            .map(|i| (next(i) - prev(i)) * params.tension)
            .collect(),
    }
}

impl CubicSegment {
    /// Hermite piece from `p1` to `p2` with local end tangents `t1` and `t2`.
    pub(crate) fn hermite(p1: &Point3, p2: &Point3, t1: Vector3, t2: Vector3) -> Self {
        let (x1, x2) = (p1.coords, p2.coords);
        Self {
            c0: x1,
            c1: t1,
            c2: x1 * -3.0 + x2 * 3.0 - t1 * 2.0 - t2,
            c3: x1 * 2.0 - x2 * 2.0 + t1 + t2,
        }
    }

    fn position(&self, u: f64) -> Point3 {
        Point3::from(self.c0 + (self.c1 + (self.c2 + self.c3 * u) * u) * u)
    }

    fn derivative(&self, u: f64) -> Vector3 {
        self.c1 + (self.c2 * 2.0 + self.c3 * (3.0 * u)) * u
    }
}

/// A periodic Catmull–Rom curve through an ordered loop of control points.
///
/// The domain is `[0, 1]` and wraps: `evaluate(t) == evaluate(t + 1)`.
/// Each of the `n` control points starts a segment of parametric length
/// `1 / n`, the last segment returning to the first point.
///
/// Instances are immutable. Use
/// [`MakeClosedCurve`](crate::operations::creation::MakeClosedCurve) to build one.
#[derive(Debug, Clone)]
pub struct ClosedCurve {
    points: Vec<Point3>,
    params: CurveParams,
    segments: Vec<CubicSegment>,
}

impl ClosedCurve {
    pub(crate) fn from_segments(
        points: Vec<Point3>,
        params: CurveParams,
        segments: Vec<CubicSegment>,
    ) -> Self {
        debug_assert_eq!(points.len(), segments.len());
        Self {
            points,
            params,
            segments,
        }
    }

    /// Returns the control points the curve interpolates, in loop order.
    #[must_use]
    pub fn control_points(&self) -> &[Point3] {
        &self.points
    }

    /// Returns the parameters the curve was built with.
    #[must_use]
    pub fn params(&self) -> &CurveParams {
        &self.params
    }

    /// Returns the number of cubic segments (equal to the control point count).
    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Maps a global parameter to `(segment index, local parameter)`.
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    fn locate(&self, t: f64) -> (usize, f64) {
        let n = self.segments.len();
        let scaled = wrap_unit(t) * n as f64;
        let index = (scaled.floor() as usize).min(n - 1);
        (index, scaled - index as f64)
    }
}

impl Curve for ClosedCurve {
    fn evaluate(&self, t: f64) -> Point3 {
        let (index, u) = self.locate(t);
        self.segments[index].position(u)
    }

    #[allow(clippy::cast_precision_loss)]
    fn derivative(&self, t: f64) -> Vector3 {
        let (index, u) = self.locate(t);
        // chain rule: du/dt = n
        self.segments[index].derivative(u) * self.segments.len() as f64
    }

    fn domain(&self) -> CurveDomain {
        CurveDomain::new(0.0, 1.0)
    }

    fn is_closed(&self) -> bool {
        true
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::operations::creation::MakeClosedCurve;
    use approx::assert_abs_diff_eq;

    fn p(x: f64, z: f64) -> Point3 {
        Point3::new(x, 0.0, z)
    }

    fn diamond(kind: CurveKind) -> ClosedCurve {
        let params = CurveParams {
            kind,
            ..CurveParams::default()
        };
        MakeClosedCurve::new(
            vec![p(0.0, 2.0), p(2.0, 0.0), p(0.0, -2.0), p(-2.0, 0.0)],
            params,
        )
        .execute()
        .unwrap()
    }

    fn uneven() -> ClosedCurve {
        MakeClosedCurve::new(
            vec![p(0.0, 0.0), p(5.0, 0.2), p(5.3, 0.4), p(3.0, 4.0), p(-1.0, 2.5)],
            CurveParams::default(),
        )
        .execute()
        .unwrap()
    }

    #[test]
    fn interpolates_control_points() {
        let curve = diamond(CurveKind::Centripetal);
        for (i, cp) in curve.control_points().iter().enumerate() {
            #[allow(clippy::cast_precision_loss)]
            let t = i as f64 / 4.0;
            assert!((curve.evaluate(t) - *cp).norm() < 1e-9, "point {i}");
        }
    }

    #[test]
    fn closes_at_seam() {
        for kind in [CurveKind::Centripetal, CurveKind::Chordal, CurveKind::Uniform] {
            let curve = diamond(kind);
            assert!((curve.evaluate(0.0) - curve.evaluate(1.0)).norm() < 1e-9);
        }
    }

    #[test]
    fn periodic_in_t() {
        let curve = uneven();
        for &t in &[-1.3, -0.2, 0.0, 0.17, 0.5, 0.999, 2.4] {
            let d = (curve.evaluate(t) - curve.evaluate(t + 1.0)).norm();
            assert!(d < 1e-9, "not periodic at t={t}: {d}");
        }
    }

    #[test]
    fn stays_in_sketch_plane() {
        let curve = uneven();
        for i in 0..100 {
            let t = f64::from(i) / 100.0;
            assert_abs_diff_eq!(curve.evaluate(t).y, 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn first_derivative_continuous_at_every_joint() {
        for kind in [CurveKind::Centripetal, CurveKind::Chordal, CurveKind::Uniform] {
            let curve = MakeClosedCurve::new(
                vec![p(0.0, 0.0), p(5.0, 0.2), p(5.3, 0.4), p(3.0, 4.0), p(-1.0, 2.5)],
                CurveParams {
                    kind,
                    ..CurveParams::default()
                },
            )
            .execute()
            .unwrap();
            let n = curve.segment_count();
            for i in 0..=n {
                #[allow(clippy::cast_precision_loss)]
                let t = i as f64 / n as f64;
                let before = curve.derivative(t - 1e-9);
                let after = curve.derivative(t + 1e-9);
                assert!(
                    (before - after).norm() < 1e-4,
                    "{kind:?}: derivative jumps at joint {i}: {before:?} vs {after:?}"
                );
            }
        }
    }

    #[test]
    fn seam_derivative_matches_on_uneven_loop() {
        let curve = uneven();
        let before = curve.derivative(1.0 - 1e-9);
        let after = curve.derivative(1e-9);
        assert_abs_diff_eq!(before.norm(), after.norm(), epsilon = 1e-4);
        assert!((before - after).norm() < 1e-4);
    }

    #[test]
    fn tangent_direction_continuous_at_every_joint() {
        let curve = uneven();
        let n = curve.segment_count();
        for i in 0..=n {
            #[allow(clippy::cast_precision_loss)]
            let t = i as f64 / n as f64;
            let before = curve.tangent(t - 1e-9).unwrap();
            let after = curve.tangent(t + 1e-9).unwrap();
            assert!((before - after).norm() < 1e-6, "kink at joint {i}");
        }
    }

    #[test]
    fn coincident_neighbours_do_not_produce_nan() {
        let curve = MakeClosedCurve::new(
            vec![p(0.0, 0.0), p(0.0, 0.0), p(1.0, 0.0), p(0.0, 1.0)],
            CurveParams::default(),
        )
        .execute()
        .unwrap();
        for i in 0..=40 {
            let pt = curve.evaluate(f64::from(i) / 40.0);
            assert!(pt.coords.iter().all(|c| c.is_finite()));
        }
    }

    #[test]
    fn uniform_tension_scales_tangents() {
        let loose = MakeClosedCurve::new(
            vec![p(0.0, 2.0), p(2.0, 0.0), p(0.0, -2.0), p(-2.0, 0.0)],
            CurveParams {
                kind: CurveKind::Uniform,
                tension: 1.0,
            },
        )
        .execute()
        .unwrap();
        let tight = diamond(CurveKind::Uniform);
        // larger tension bulges the segment further from the chord midpoint (1, 1)
        let chord_mid = Point3::new(1.0, 0.0, 1.0);
        let d_loose = (loose.evaluate(0.125) - chord_mid).norm();
        let d_tight = (tight.evaluate(0.125) - chord_mid).norm();
        assert!(d_loose > d_tight);
    }

    #[test]
    fn domain_and_closed_flag() {
        let curve = diamond(CurveKind::Centripetal);
        assert!(curve.is_closed());
        let d = curve.domain();
        assert_abs_diff_eq!(d.t_min, 0.0);
        assert_abs_diff_eq!(d.t_max, 1.0);
    }
}
