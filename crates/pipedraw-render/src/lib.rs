//! # Pipedraw Render
//!
//! 2D rendering surfaces for the pipedraw drawing engine.
//!
//! The drawing engine emits its output against the [`Canvas`] trait, a
//! stateful 2D canvas with a save/restore graphics stack, affine
//! transforms, path construction, fill/stroke and text operations. Three
//! surfaces implement it:
//!
//! - [`SvgSurface`] - vector output, accumulates drawing commands into an
//!   SVG document
//! - [`PixmapSurface`] - raster output over tiny-skia, encoded to PNG
//!   through the `image` crate after drawing completes
//! - [`RecordingSurface`] - records structured commands with deterministic
//!   text metrics, for tests

pub mod canvas;
pub mod error;
pub mod raster;
pub mod record;
pub mod svg;
pub mod text;

mod path;

pub use canvas::{Canvas, Rgb, TextExtents};
pub use error::{RenderError, Result};
pub use raster::PixmapSurface;
pub use record::{CanvasOp, RecordingSurface};
pub use svg::SvgSurface;
