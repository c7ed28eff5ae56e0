//! # Pipedraw
//!
//! Scaled, dimensioned technical drawings of pipe components: straight
//! lined pipe runs and segmented (mitred) or smoothly curved pipe bends
//! with casing, lining and standard PN16 flanges, generated from a small
//! set of numeric job parameters and rendered to a fixed-size page.
//!
//! ## Architecture
//!
//! Pipedraw is organized as a workspace with multiple crates:
//!
//! 1. **pipedraw-render** - canvas abstraction and SVG/raster surfaces
//! 2. **pipedraw-model** - geometric modeling and the auto-scale engine
//! 3. **pipedraw-page** - page chrome, info boxes, scale label
//! 4. **pipedraw** - binary that reads a JSON job file and writes output

pub mod job;

pub use job::{render_job, JobComponent, JobFile, OutputFormat, OutputSpec};

pub use pipedraw_model::{
    BendPipeModel, BendSpec, CasingKind, FlangeSpec, ModelError, PipeComponent, PipeKind, Point,
    StraightPipeModel, StraightSpec,
};
pub use pipedraw_page::{DrawingPage, PageInfo, PageSize};
pub use pipedraw_render::{Canvas, PixmapSurface, RecordingSurface, SvgSurface};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with console output and RUST_LOG
/// environment variable support.
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(env_filter)
        .init();

    Ok(())
}
