//! Rendering backend abstraction
//!
//! The viewer draws through the [`RenderBackend`] trait; the terminal backend
//! stands in for a camera-overlay surface during development.

mod backend;
mod surface;
pub mod terminal;

pub use backend::{RenderBackend, RenderError, RenderGlyph};
pub use surface::{Color, ParseColorError, SurfaceCapabilities};
