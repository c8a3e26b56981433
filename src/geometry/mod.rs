pub mod curve;

pub use curve::{ClosedCurve, Curve, CurveDomain, CurveKind, CurveParams};
