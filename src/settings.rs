use tracing::warn;

use crate::animation::{
    TrailParams, DEFAULT_TRAIL_HARD_CAP, DEFAULT_TRAIL_MIN_STEP, DEFAULT_TRAIL_START_CAPACITY,
};
use crate::error::{ChordLiftError, ConfigError, Result};
use crate::tessellation::{SurfaceParams, MIN_RESOLUTION};

/// The named parameters a control panel reads and writes.
///
/// `a`, `b` and `playing` are owned by the recorder during playback;
/// [`Sketch::settings`](crate::session::Sketch::settings) reports their live values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settings {
    /// Whether picked points are added to the sketch.
    pub drawing_enabled: bool,
    /// First chord parameter.
    pub a: f64,
    /// Second chord parameter.
    pub b: f64,
    /// Whether the parameters advance on every frame.
    pub playing: bool,
    /// Advance rate of `a` per unit of time.
    pub speed_a: f64,
    /// Advance rate of `b` per unit of time.
    pub speed_b: f64,
    /// Hard cap on retained trail points.
    pub trail_capacity: usize,
    /// Minimum spacing between recorded trail points.
    pub trail_min_step: f64,
    /// Whether the chord-lift surface is built and shown.
    pub show_surface: bool,
    /// Surface grid cells along `a`.
    pub res_a: usize,
    /// Surface grid cells along `b`.
    pub res_b: usize,
    /// Surface opacity in `[0, 1]`.
    pub surface_opacity: f64,
    /// Whether the surface carries wireframe edges.
    pub wireframe: bool,
}

impl Default for Settings {
    fn default() -> Self {
        let surface = SurfaceParams::default();
        Self {
            drawing_enabled: true,
            a: 0.0,
            b: 0.5,
            playing: false,
            speed_a: 0.05,
            speed_b: 0.13,
            trail_capacity: DEFAULT_TRAIL_HARD_CAP,
            trail_min_step: DEFAULT_TRAIL_MIN_STEP,
            show_surface: false,
            res_a: surface.res_a,
            res_b: surface.res_b,
            surface_opacity: surface.opacity,
            wireframe: surface.wireframe,
        }
    }
}

impl Settings {
    /// Rejects values no component can interpret.
    ///
    /// Resolutions are not checked here; [`Settings::clamped`] raises them.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidSetting`] naming the first bad field.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("a", self.a),
            ("b", self.b),
            ("speed_a", self.speed_a),
            ("speed_b", self.speed_b),
        ] {
            if !value.is_finite() {
                return Err(invalid(name, format!("must be finite, got {value}")));
            }
        }
        if !self.trail_min_step.is_finite() || self.trail_min_step < 0.0 {
            return Err(invalid(
                "trail_min_step",
                format!("must be finite and non-negative, got {}", self.trail_min_step),
            ));
        }
        if self.trail_capacity == 0 {
            return Err(invalid("trail_capacity", "must be at least 1".to_owned()));
        }
        if !self.surface_opacity.is_finite() {
            return Err(invalid(
                "surface_opacity",
                format!("must be finite, got {}", self.surface_opacity),
            ));
        }
        Ok(())
    }

    /// Raises resolutions to the triangulable minimum and clamps opacity into `[0, 1]`.
    #[must_use]
    pub fn clamped(mut self) -> Self {
        if self.res_a < MIN_RESOLUTION {
            warn!(res_a = self.res_a, "res_a raised to {MIN_RESOLUTION}");
            self.res_a = MIN_RESOLUTION;
        }
        if self.res_b < MIN_RESOLUTION {
            warn!(res_b = self.res_b, "res_b raised to {MIN_RESOLUTION}");
            self.res_b = MIN_RESOLUTION;
        }
        if !(0.0..=1.0).contains(&self.surface_opacity) {
            warn!(opacity = self.surface_opacity, "surface opacity clamped");
            self.surface_opacity = self.surface_opacity.clamp(0.0, 1.0);
        }
        self
    }

    /// Surface build parameters derived from these settings.
    #[must_use]
    pub fn surface_params(&self) -> SurfaceParams {
        SurfaceParams {
            res_a: self.res_a,
            res_b: self.res_b,
            opacity: self.surface_opacity,
            wireframe: self.wireframe,
        }
    }

    /// Trail buffer policy derived from these settings.
    #[must_use]
    pub fn trail_params(&self) -> TrailParams {
        TrailParams {
            start_capacity: DEFAULT_TRAIL_START_CAPACITY.min(self.trail_capacity),
            hard_cap: self.trail_capacity,
            min_step: self.trail_min_step,
        }
    }
}

fn invalid(name: &'static str, reason: String) -> ChordLiftError {
    ConfigError::InvalidSetting { name, reason }.into()
}
