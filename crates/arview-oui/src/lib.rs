//! arview-oui: Optical User Interface primitives for the arview viewer
//!
//! This crate provides the pieces the viewer renders through:
//! - 3D spatial types (points, vectors, quaternions, transforms)
//! - Abstract renderer backend with a terminal implementation
//! - Simulated device-orientation input from the keyboard
//! - A tick-driven application runner

pub mod spatial;
pub mod renderer;
pub mod input;
pub mod app;

// Re-export commonly used types
pub use spatial::{Point3D, Vector3D, Quaternion, Transform};
pub use renderer::{RenderBackend, RenderError, SurfaceCapabilities, Color, RenderGlyph};
pub use input::{OpticalEvent, OrientationReading, InputSimulator};
pub use app::{OpticalApp, OpticalAppRunner};
