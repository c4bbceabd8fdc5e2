//! Error types produced while solving or drawing the structure.

use thiserror::Error;

/// Error returned when the structure geometry cannot be derived.
///
/// Every variant describes a local, recoverable condition. Callers decide whether to
/// reject the input outright (a pitch outside the valid range) or to skip the affected
/// part of the drawing (a closing wall that never reaches the dome).
///
/// # Examples
///
/// ```
/// use domeshed::{compute_cross_section, GeometryError, StructureParameters};
///
/// let parameters = StructureParameters::default().with_roof_pitch(0.0);
/// let error = compute_cross_section(&parameters).expect_err("flat roof is rejected");
/// assert_eq!(error, GeometryError::DegeneratePitch { pitch_degrees: 0.0 });
/// ```
#[derive(Clone, Debug, Error, PartialEq)]
pub enum GeometryError {
    /// Returned when the roof pitch lies outside the open interval (0°, 90°).
    #[error("roof pitch must lie strictly between 0 and 90 degrees (received {pitch_degrees})")]
    DegeneratePitch {
        /// Rejected pitch in degrees.
        pitch_degrees: f64,
    },
    /// Returned when a post sits exactly on the front baseline, so no arc can pass
    /// through both posts with its centre on the symmetry axis.
    #[error("post lies on the front baseline (y = {y}); the front arc is undefined")]
    DegenerateBaseline {
        /// Shared y coordinate of the post and the baseline in feet.
        y: f64,
    },
    /// Returned when the closing wall of a wing does not meet the dome circle.
    #[error("closing wall does not reach the dome (discriminant {discriminant})")]
    NoIntersection {
        /// Discriminant of the line/circle quadratic.
        discriminant: f64,
    },
    /// Returned when a structural dimension violates its invariant.
    #[error("{name} = {value} is invalid: {reason}")]
    InvalidParameter {
        /// Name of the offending parameter.
        name: &'static str,
        /// Rejected value.
        value: f64,
        /// Human readable constraint that was violated.
        reason: &'static str,
    },
}

/// Error returned when a drawing cannot be produced or written.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Returned when the requested canvas has a zero dimension.
    #[error("cannot allocate a {width}x{height} canvas")]
    InvalidCanvas {
        /// Requested width in pixels.
        width: u32,
        /// Requested height in pixels.
        height: u32,
    },
    /// Returned when the raster encoder fails.
    #[error("failed to encode image: {0}")]
    Encode(String),
    /// Returned when writing an output file fails.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// Returned when the geometry cannot be serialised.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
