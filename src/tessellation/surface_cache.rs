use std::sync::Arc;

use tracing::trace;

use crate::error::Result;
use crate::geometry::ClosedCurve;

use super::{ChordSurface, SurfaceParams, TessellateChordSurface};

/// The inputs a cached surface was built from.
#[derive(Debug)]
struct CacheEntry {
    curve: Arc<ClosedCurve>,
    params: SurfaceParams,
    surface: Arc<ChordSurface>,
}

/// Memoizes the chord surface on `(curve identity, res_a, res_b, opacity, wireframe)`.
///
/// Curve identity is the `Arc` allocation: curves are immutable and every
/// rebuild produces a new one. A failed build leaves the previous entry intact.
#[derive(Debug, Default)]
pub struct SurfaceCache {
    entry: Option<CacheEntry>,
    builds: usize,
}

impl SurfaceCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached surface when the key matches, otherwise builds,
    /// stores and returns a new one.
    ///
    /// # Errors
    ///
    /// Propagates tessellation errors; the previous entry is kept on failure.
    pub fn get_or_build(
        &mut self,
        curve: &Arc<ClosedCurve>,
        params: &SurfaceParams,
    ) -> Result<Arc<ChordSurface>> {
        if let Some(entry) = &self.entry {
            if Arc::ptr_eq(&entry.curve, curve) && entry.params == *params {
                trace!("surface cache hit");
                return Ok(Arc::clone(&entry.surface));
            }
        }

        let surface = Arc::new(TessellateChordSurface::new(*params).execute(curve.as_ref())?);
        self.entry = Some(CacheEntry {
            curve: Arc::clone(curve),
            params: *params,
            surface: Arc::clone(&surface),
        });
        self.builds += 1;
        Ok(surface)
    }

    /// Returns the most recently built surface, if any.
    #[must_use]
    pub fn cached(&self) -> Option<&Arc<ChordSurface>> {
        self.entry.as_ref().map(|e| &e.surface)
    }

    /// Drops the cached surface and the curve it holds.
    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    /// Number of builds performed so far.
    #[must_use]
    pub fn build_count(&self) -> usize {
        self.builds
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::CurveParams;
    use crate::math::Point3;
    use crate::operations::creation::MakeClosedCurve;

    fn curve(scale: f64) -> Arc<ClosedCurve> {
        Arc::new(
            MakeClosedCurve::new(
                vec![
                    Point3::new(0.0, 0.0, scale),
                    Point3::new(scale, 0.0, 0.0),
                    Point3::new(0.0, 0.0, -scale),
                    Point3::new(-scale, 0.0, 0.0),
                ],
                CurveParams::default(),
            )
            .execute()
            .unwrap(),
        )
    }

    fn params() -> SurfaceParams {
        SurfaceParams {
            res_a: 8,
            res_b: 6,
            opacity: 0.5,
            wireframe: false,
        }
    }

    #[test]
    fn identical_inputs_reuse_instance() {
        let mut cache = SurfaceCache::new();
        let c = curve(2.0);
        let first = cache.get_or_build(&c, &params()).unwrap();
        let second = cache.get_or_build(&c, &params()).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.build_count(), 1);
    }

    #[test]
    fn each_key_field_triggers_rebuild() {
        let c = curve(2.0);
        let base = params();
        let variants = [
            SurfaceParams { res_a: 9, ..base },
            SurfaceParams { res_b: 7, ..base },
            SurfaceParams {
                opacity: 0.75,
                ..base
            },
            SurfaceParams {
                wireframe: true,
                ..base
            },
        ];
        for changed in variants {
            let mut cache = SurfaceCache::new();
            let first = cache.get_or_build(&c, &base).unwrap();
            let second = cache.get_or_build(&c, &changed).unwrap();
            assert!(!Arc::ptr_eq(&first, &second), "{changed:?} did not rebuild");
            assert_eq!(cache.build_count(), 2);
        }
    }

    #[test]
    fn new_curve_triggers_rebuild() {
        let mut cache = SurfaceCache::new();
        let first = cache.get_or_build(&curve(2.0), &params()).unwrap();
        // same geometry, different curve instance
        let second = cache.get_or_build(&curve(2.0), &params()).unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn failed_build_keeps_previous_entry() {
        let mut cache = SurfaceCache::new();
        let c = curve(2.0);
        let first = cache.get_or_build(&c, &params()).unwrap();
        let bad = SurfaceParams {
            res_a: 1,
            ..params()
        };
        assert!(cache.get_or_build(&c, &bad).is_err());
        assert!(Arc::ptr_eq(cache.cached().unwrap(), &first));
        let again = cache.get_or_build(&c, &params()).unwrap();
        assert!(Arc::ptr_eq(&first, &again));
    }

    #[test]
    fn invalidate_clears_entry() {
        let mut cache = SurfaceCache::new();
        cache.get_or_build(&curve(1.0), &params()).unwrap();
        cache.invalidate();
        assert!(cache.cached().is_none());
    }
}
