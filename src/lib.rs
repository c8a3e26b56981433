//! Closed-curve sketching and chord-lift geometry.
//!
//! A loop of picked points is fitted with a periodic Catmull–Rom curve `C`.
//! For two parameters `a`, `b` the chord `C(a)C(b)` is lifted above its
//! midpoint by its own length. The crate animates `(a, b)`, records the
//! lifted point as a bounded trail, and tessellates the whole relation
//! over the parameter square.

pub mod animation;
pub mod error;
pub mod geometry;
pub mod math;
pub mod operations;
pub mod session;
pub mod settings;
pub mod tessellation;

pub use error::{ChordLiftError, Result};
