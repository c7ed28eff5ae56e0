//! Error types for the rendering surfaces.

use thiserror::Error;

/// Errors that can occur while producing surface output.
#[derive(Error, Debug)]
pub enum RenderError {
    /// The requested surface dimensions are unusable.
    #[error("Invalid surface dimensions {width}x{height}")]
    InvalidDimensions {
        /// The requested width in device units.
        width: f64,
        /// The requested height in device units.
        height: f64,
    },

    /// Encoding the finished surface to an image format failed.
    #[error("Failed to encode surface: {reason}")]
    Encode {
        /// The reason encoding failed.
        reason: String,
    },

    /// I/O error while writing surface output.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type using [`RenderError`].
pub type Result<T> = std::result::Result<T, RenderError>;
