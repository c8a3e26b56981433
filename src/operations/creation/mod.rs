mod make_closed_curve;

pub use make_closed_curve::{MakeClosedCurve, MIN_CONTROL_POINTS};
