//! # Pipedraw Page
//!
//! Page chrome around a drawn pipe component: margins, the dimensions
//! notice, job information boxes, title and letterhead blocks, and the
//! drawing scale label derived from the component's solved scale factor.

pub mod page;

pub use page::{DrawingPage, PageError, PageInfo, PageSize};
