use std::sync::Arc;

use tracing::debug;

use crate::geometry::ClosedCurve;
use crate::math::wrap_unit;
use crate::operations::query::{ChordLift, ChordLiftSample};

use super::trail::{TrailBuffer, TrailParams};

/// Playback state of a [`TrajectoryRecorder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    /// No curve bound, or playback stopped.
    #[default]
    Idle,
    /// A curve is bound and the parameters advance on every tick.
    Playing,
}

/// The two chord parameters, each kept in `[0, 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ParameterPair {
    /// Parameter of the chord's start point.
    pub a: f64,
    /// Parameter of the chord's end point.
    pub b: f64,
}

impl ParameterPair {
    /// Creates a pair, wrapping both values into `[0, 1)`.
    #[must_use]
    pub fn new(a: f64, b: f64) -> Self {
        Self {
            a: wrap_unit(a),
            b: wrap_unit(b),
        }
    }
}

/// Advances a chord parameter pair over time and records the lifted point trail.
///
/// The recorder is the only writer of `a`, `b` and the trail while playing.
/// Rebinding a curve clears the trail and stops playback; changing speeds or
/// the spacing threshold never does.
#[derive(Debug)]
pub struct TrajectoryRecorder {
    curve: Option<Arc<ClosedCurve>>,
    state: PlaybackState,
    params: ParameterPair,
    speed_a: f64,
    speed_b: f64,
    min_step: f64,
    trail: TrailBuffer,
}

impl TrajectoryRecorder {
    /// Creates an idle recorder with no curve and zero speeds.
    #[must_use]
    pub fn new(trail: TrailParams) -> Self {
        Self {
            curve: None,
            state: PlaybackState::Idle,
            params: ParameterPair::default(),
            speed_a: 0.0,
            speed_b: 0.0,
            min_step: trail.min_step,
            trail: TrailBuffer::new(trail.start_capacity, trail.hard_cap),
        }
    }

    /// Binds a new curve, clearing the trail and stopping playback.
    pub fn bind_curve(&mut self, curve: Arc<ClosedCurve>) {
        self.curve = Some(curve);
        self.trail.clear();
        self.state = PlaybackState::Idle;
        debug!("recorder bound to new curve");
    }

    /// Drops the bound curve, clearing the trail and stopping playback.
    pub fn unbind_curve(&mut self) {
        self.curve = None;
        self.trail.clear();
        self.state = PlaybackState::Idle;
    }

    /// Returns the bound curve.
    #[must_use]
    pub fn curve(&self) -> Option<&Arc<ClosedCurve>> {
        self.curve.as_ref()
    }

    /// Requests playback on or off and returns the resulting state.
    ///
    /// Playback cannot start without a bound curve. Stopping keeps the
    /// parameters and the trail.
    pub fn set_playing(&mut self, playing: bool) -> PlaybackState {
        let next = if playing && self.curve.is_some() {
            PlaybackState::Playing
        } else {
            PlaybackState::Idle
        };
        if next != self.state {
            debug!(from = ?self.state, to = ?next, "playback state changed");
            self.state = next;
        }
        self.state
    }

    /// Current playback state.
    #[must_use]
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Returns `true` while playing.
    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    /// Current parameter pair.
    #[must_use]
    pub fn parameters(&self) -> ParameterPair {
        self.params
    }

    /// Sets the parameters while idle. Returns `false` (and changes nothing)
    /// during playback, where the recorder owns them.
    pub fn set_parameters(&mut self, a: f64, b: f64) -> bool {
        if self.is_playing() {
            return false;
        }
        self.params = ParameterPair::new(a, b);
        true
    }

    /// Sets the advance rates, in parameter units per unit of `dt`.
    pub fn set_speeds(&mut self, speed_a: f64, speed_b: f64) {
        self.speed_a = speed_a;
        self.speed_b = speed_b;
    }

    /// Returns `(speed_a, speed_b)`.
    #[must_use]
    pub fn speeds(&self) -> (f64, f64) {
        (self.speed_a, self.speed_b)
    }

    /// Sets the minimum spacing between recorded points.
    pub fn set_min_step(&mut self, min_step: f64) {
        self.min_step = min_step;
    }

    /// Minimum spacing between recorded points.
    #[must_use]
    pub fn min_step(&self) -> f64 {
        self.min_step
    }

    /// Changes the trail's hard cap, evicting the oldest points if needed.
    pub fn set_trail_hard_cap(&mut self, hard_cap: usize) {
        self.trail.set_hard_cap(hard_cap);
    }

    /// Empties the trail without touching playback.
    pub fn clear_trail(&mut self) {
        self.trail.clear();
        debug!("trail cleared");
    }

    /// The recorded trail.
    #[must_use]
    pub fn trail(&self) -> &TrailBuffer {
        &self.trail
    }

    /// Chord-lift sample at the current parameters, if a curve is bound.
    #[must_use]
    pub fn current_sample(&self) -> Option<ChordLiftSample> {
        let curve = self.curve.as_deref()?;
        Some(ChordLift::new(self.params.a, self.params.b).execute(curve))
    }

    /// Advances playback by `dt` and records the new lifted point if it moved
    /// farther than the minimum step from the last recorded one.
    ///
    /// Returns the new sample, or `None` when idle (a no-op, not an error).
    /// A non-finite `dt` is ignored.
    pub fn tick(&mut self, dt: f64) -> Option<ChordLiftSample> {
        if !self.is_playing() || !dt.is_finite() {
            return None;
        }
        let curve = self.curve.as_deref()?;
        self.params = ParameterPair::new(
            self.params.a + self.speed_a * dt,
            self.params.b + self.speed_b * dt,
        );
        let sample = ChordLift::new(self.params.a, self.params.b).execute(curve);
        let far_enough = self
            .trail
            .last()
            .is_none_or(|last| (sample.lifted_point - last).norm() > self.min_step);
        if far_enough {
            self.trail.push(sample.lifted_point);
        }
        Some(sample)
    }
}

impl Default for TrajectoryRecorder {
    fn default() -> Self {
        Self::new(TrailParams::default())
    }
}
