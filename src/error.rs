use thiserror::Error;

/// Top-level error type for the chord-lift engine.
#[derive(Debug, Error)]
pub enum ChordLiftError {
    #[error(transparent)]
    Curve(#[from] CurveError),

    #[error(transparent)]
    Tessellation(#[from] TessellationError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors raised while constructing a closed curve.
#[derive(Debug, Error)]
pub enum CurveError {
    #[error("a closed curve needs at least 3 control points, got {given}")]
    InsufficientPoints { given: usize },

    #[error("invalid curve parameter: {0}")]
    InvalidParameter(String),
}

/// Errors related to tessellation.
#[derive(Debug, Error)]
pub enum TessellationError {
    #[error("resolution {axis} = {value} is below the minimum of 2")]
    InvalidResolution { axis: &'static str, value: usize },

    #[error("invalid tessellation parameters: {0}")]
    InvalidParameter(String),
}

/// Errors raised when validating [`Settings`](crate::settings::Settings).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid setting `{name}`: {reason}")]
    InvalidSetting { name: &'static str, reason: String },
}

/// Convenience type alias for results using [`ChordLiftError`].
pub type Result<T> = std::result::Result<T, ChordLiftError>;
