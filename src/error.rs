//! Error types for gauge configuration and value updates

use thiserror::Error;

/// Result type for gauge operations
pub type Result<T> = std::result::Result<T, GaugeError>;

/// Errors that can occur while building or updating a gauge
#[derive(Debug, Error, PartialEq)]
pub enum GaugeError {
    /// A value update with NaN or infinity was rejected before it
    /// could enter the animation pipeline
    #[error("value is not finite: {0}")]
    NonFiniteValue(f64),

    /// Color range bounds must satisfy min < max
    #[error("color range bounds must satisfy min < max, got min {min}, max {max}")]
    InvalidColorBounds { min: f64, max: f64 },

    /// Color range configured without any color stops
    #[error("color range has no color stops")]
    EmptyColorStops,

    /// Dial angles leave no angular span for the value arc
    #[error("dial angles {start}..{end} leave a zero span angle")]
    ZeroSpanAngle { start: f64, end: f64 },

    /// Dial angle is NaN or infinite
    #[error("dial angle is not finite: {0}")]
    NonFiniteAngle(f64),

    /// Radius must be positive and finite
    #[error("gauge radius must be positive and finite, got {0}")]
    InvalidRadius(f64),

    /// Animation duration of zero would divide by zero in progress math
    #[error("animation duration must be non-zero")]
    ZeroDuration,
}
