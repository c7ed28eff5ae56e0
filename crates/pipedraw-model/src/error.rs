//! Error types for the drawing engine.
//!
//! Every failure here is a construction-time rejection of malformed
//! input; drawing itself is pure computation over already-validated data
//! and has no runtime failure modes.

use thiserror::Error;

/// Errors raised while constructing a pipe model.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    /// The flange designation is not in the standard catalogue.
    #[error("Unknown flange designation: {designation}")]
    UnknownFlangeKind {
        /// The designation that was looked up.
        designation: String,
    },

    /// A dimension that must be positive was not.
    ///
    /// Upstream validation should prevent this; it is treated as a
    /// precondition failure rather than a recoverable runtime error.
    #[error("Degenerate geometry: {what} must be positive, got {value}")]
    DegenerateGeometry {
        /// Which dimension was degenerate.
        what: &'static str,
        /// The offending value.
        value: f64,
    },

    /// The segment angle does not evenly divide the bend angle.
    #[error("Segment angle {segment_angle}\u{b0} does not evenly divide bend angle {bend_angle}\u{b0}")]
    AngleAlignmentMismatch {
        /// The overall bend angle, in degrees.
        bend_angle: f64,
        /// The per-segment angle, in degrees.
        segment_angle: f64,
    },
}

/// Result type using [`ModelError`].
pub type Result<T> = std::result::Result<T, ModelError>;
