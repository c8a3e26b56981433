use std::sync::Arc;

use tracing::debug;

use crate::animation::{PlaybackState, TrailBuffer, TrajectoryRecorder};
use crate::error::Result;
use crate::geometry::{ClosedCurve, CurveParams};
use crate::math::{project_to_plane, Point3};
use crate::operations::creation::{MakeClosedCurve, MIN_CONTROL_POINTS};
use crate::operations::query::ChordLiftSample;
use crate::settings::Settings;
use crate::tessellation::{ChordSurface, Polyline, SurfaceCache, TessellateCurve};

/// Number of polyline segments used to display the closed curve.
pub const CURVE_DISPLAY_SEGMENTS: usize = 400;

/// Read-only view of everything a renderer draws for one frame.
#[derive(Debug)]
pub struct FrameView<'a> {
    /// Control points in the order they were picked.
    pub control_points: &'a [Point3],
    /// Closed polyline through the curve, once a curve exists.
    pub outline: Option<&'a Polyline>,
    /// Chord endpoints, midpoint and lifted point at the current parameters.
    pub sample: Option<ChordLiftSample>,
    /// Recorded trail, oldest first. [`TrailBuffer::as_slices`] gives the flat
    /// `[x, y, z, ...]` data in at most two runs.
    pub trail: &'a TrailBuffer,
    /// The chord-lift surface, when shown.
    pub surface: Option<&'a ChordSurface>,
}

/// A sketch session: the picked loop, its curve, the recorder and the surface.
///
/// All work happens synchronously inside [`Sketch::update`], called once per
/// frame by the host loop. Curve and surface rebuilds are compute-then-swap,
/// so a failed rebuild leaves the previous state in place.
#[derive(Debug)]
pub struct Sketch {
    points: Vec<Point3>,
    curve_params: CurveParams,
    curve: Option<Arc<ClosedCurve>>,
    outline: Option<Polyline>,
    recorder: TrajectoryRecorder,
    surface_cache: SurfaceCache,
    surface: Option<Arc<ChordSurface>>,
    settings: Settings,
}

impl Sketch {
    /// Creates an empty sketch with the default curve parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if `settings` fail validation.
    pub fn new(settings: Settings) -> Result<Self> {
        Self::with_curve_params(settings, CurveParams::default())
    }

    /// Creates an empty sketch that fits curves with `curve_params`.
    ///
    /// # Errors
    ///
    /// Returns an error if `settings` fail validation.
    pub fn with_curve_params(settings: Settings, curve_params: CurveParams) -> Result<Self> {
        settings.validate()?;
        let settings = settings.clamped();
        let mut recorder = TrajectoryRecorder::new(settings.trail_params());
        recorder.set_speeds(settings.speed_a, settings.speed_b);
        recorder.set_parameters(settings.a, settings.b);
        Ok(Self {
            points: Vec::new(),
            curve_params,
            curve: None,
            outline: None,
            recorder,
            surface_cache: SurfaceCache::new(),
            surface: None,
            settings,
        })
    }

    /// Adds a picked point, projected onto the sketch plane.
    ///
    /// Returns `Ok(false)` when drawing is disabled. Once three or more points
    /// exist the curve is rebuilt and rebound, which clears the trail.
    ///
    /// # Errors
    ///
    /// Returns an error if the curve cannot be rebuilt; the point is not added.
    pub fn add_point(&mut self, point: Point3) -> Result<bool> {
        if !self.settings.drawing_enabled {
            return Ok(false);
        }
        let mut points = self.points.clone();
        points.push(project_to_plane(&point));
        self.set_points(points)?;
        Ok(true)
    }

    /// Replaces every control point and rebuilds the curve.
    ///
    /// With fewer than three points the curve is dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the curve cannot be rebuilt; nothing changes.
    pub fn set_points(&mut self, points: Vec<Point3>) -> Result<()> {
        if points.len() < MIN_CONTROL_POINTS {
            self.points = points;
            self.drop_curve();
            return Ok(());
        }
        let curve = Arc::new(MakeClosedCurve::new(points.clone(), self.curve_params).execute()?);
        let outline = TessellateCurve::new(CURVE_DISPLAY_SEGMENTS).execute(curve.as_ref())?;
        self.points = points;
        self.outline = Some(outline);
        self.recorder.bind_curve(Arc::clone(&curve));
        self.curve = Some(curve);
        self.surface = None;
        Ok(())
    }

    /// Clears the points, the curve, the trail and the surface.
    pub fn reset(&mut self) {
        self.points.clear();
        self.drop_curve();
        debug!("sketch reset");
    }

    fn drop_curve(&mut self) {
        self.curve = None;
        self.outline = None;
        self.recorder.unbind_curve();
        self.surface_cache.invalidate();
        self.surface = None;
    }

    /// Applies settings from the control panel.
    ///
    /// Speeds, spacing and capacity changes keep the trail. `a` and `b` are
    /// taken whenever the recorder is idle once the update is applied,
    /// including an update that stops playback. Re-enabling drawing clears
    /// the trail.
    ///
    /// # Errors
    ///
    /// Returns an error if `settings` fail validation; nothing changes.
    pub fn apply_settings(&mut self, settings: Settings) -> Result<()> {
        settings.validate()?;
        let settings = settings.clamped();

        if settings.drawing_enabled && !self.settings.drawing_enabled {
            self.recorder.clear_trail();
        }
        self.recorder.set_speeds(settings.speed_a, settings.speed_b);
        self.recorder.set_min_step(settings.trail_min_step);
        self.recorder.set_trail_hard_cap(settings.trail_capacity);
        // stop first so a panel that pauses and edits a/b in one update keeps its values
        if !settings.playing {
            self.recorder.set_playing(false);
        }
        self.recorder.set_parameters(settings.a, settings.b);
        self.recorder.set_playing(settings.playing);
        if !settings.show_surface {
            self.surface = None;
        }
        self.settings = settings;
        Ok(())
    }

    /// Current settings, with `a`, `b` and `playing` read back from the recorder.
    #[must_use]
    pub fn settings(&self) -> Settings {
        let params = self.recorder.parameters();
        Settings {
            a: params.a,
            b: params.b,
            playing: self.recorder.state() == PlaybackState::Playing,
            ..self.settings
        }
    }

    /// Starts or stops playback.
    pub fn set_playing(&mut self, playing: bool) -> PlaybackState {
        self.recorder.set_playing(playing)
    }

    /// Empties the trail.
    pub fn clear_trail(&mut self) {
        self.recorder.clear_trail();
    }

    /// Advances one frame: ticks the recorder, then rebuilds or reuses the
    /// surface if it is shown. Returns the sample at the new parameters.
    ///
    /// # Errors
    ///
    /// Returns the surface build error; the previous surface stays in place.
    pub fn update(&mut self, dt: f64) -> Result<Option<ChordLiftSample>> {
        self.recorder.tick(dt);
        self.refresh_surface()?;
        Ok(self.recorder.current_sample())
    }

    fn refresh_surface(&mut self) -> Result<()> {
        if !self.settings.show_surface {
            self.surface = None;
            return Ok(());
        }
        let Some(curve) = &self.curve else {
            return Ok(());
        };
        let surface = self
            .surface_cache
            .get_or_build(curve, &self.settings.surface_params())?;
        self.surface = Some(surface);
        Ok(())
    }

    /// Everything the renderer needs for the current frame.
    #[must_use]
    pub fn frame(&self) -> FrameView<'_> {
        FrameView {
            control_points: &self.points,
            outline: self.outline.as_ref(),
            sample: self.recorder.current_sample(),
            trail: self.recorder.trail(),
            surface: self.surface.as_deref(),
        }
    }

    /// Control points in pick order.
    #[must_use]
    pub fn control_points(&self) -> &[Point3] {
        &self.points
    }

    /// The current curve, once at least three points exist.
    #[must_use]
    pub fn curve(&self) -> Option<&Arc<ClosedCurve>> {
        self.curve.as_ref()
    }

    /// The trajectory recorder.
    #[must_use]
    pub fn recorder(&self) -> &TrajectoryRecorder {
        &self.recorder
    }

    /// The surface built by the last [`Sketch::update`], if shown.
    #[must_use]
    pub fn surface(&self) -> Option<&Arc<ChordSurface>> {
        self.surface.as_ref()
    }
}
