mod chord_lift;

pub use chord_lift::{ChordLift, ChordLiftSample};
