mod recorder;
mod trail;

pub use recorder::{ParameterPair, PlaybackState, TrajectoryRecorder};
pub use trail::{
    TrailBuffer, TrailParams, DEFAULT_TRAIL_HARD_CAP, DEFAULT_TRAIL_MIN_STEP,
    DEFAULT_TRAIL_START_CAPACITY, STRIDE,
};
