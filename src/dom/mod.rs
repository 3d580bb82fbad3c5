//! UI state
//!
//! An explicit document model and the surface the guard renders into.

pub mod document;
pub mod render;
pub mod surface;

pub use document::{Document, Element, NodeId};
pub use render::render_results;
pub use surface::{DocumentSurface, FormSurface, SurfaceClasses};
