//! # Pipedraw Model
//!
//! Geometric modeling and auto-scale engine for scaled, dimensioned
//! technical drawings of pipe components: straight lined runs and
//! segmented (mitred) or smoothly curved bends with casing, lining and
//! standard flanges.
//!
//! ## Architecture
//!
//! ```text
//! PipeComponent (three-phase draw driver)
//!   ├── StraightPipeModel
//!   └── BendPipeModel (segment vertex generation, curved casing)
//!
//! PipeBody (shared layer geometry and drawing)
//!   ├── PipeLayers (concentric diameter bookkeeping)
//!   ├── SegmentPointSet (vertex geometry, computed at construction)
//!   └── FlangeSpec (fixed standard catalogue)
//!
//! dims (dimension lines, arrowheads, labels)
//! ```
//!
//! A model is constructed once per drawing request from a validated job
//! specification and computes all vertex geometry eagerly. Drawing runs
//! in three fixed phases against a [`Canvas`](pipedraw_render::Canvas):
//! a pre-scale pass in page coordinates, the scale solve (which needs
//! live text metrics, so it cannot happen at construction), and the
//! component drawing under the solved uniform transform. The chosen
//! scale factor is returned to the caller for the page scale label.

pub mod bend;
pub mod component;
pub mod dims;
pub mod error;
pub mod flange;
pub mod geom;
pub mod layers;
pub mod straight;
pub mod style;
pub mod text_box;

pub use bend::{BendPipeModel, BendSpec, CasingKind, SegmentDim, SegmentDims};
pub use component::{PipeComponent, PipeKind, ScaleSolution};
pub use dims::LabelOption;
pub use error::{ModelError, Result};
pub use flange::{FlangeSpec, CATALOGUE};
pub use geom::{polar_to_cartesian, Point};
pub use layers::{Layer, LayerPoints, PipeBody, PipeLayers, SegmentPointSet};
pub use straight::{StraightPipeModel, StraightSpec};
pub use style::{BaseStyle, RenderStyle, TextStyle};
pub use text_box::{draw_text_box, BoxAnchor, TextBoxExtents, TextBoxOptions};
