//! Input abstraction for the viewer
//!
//! Provides unified input events for:
//! - Device-orientation samples
//! - Marker selection (tap)
//! - Fallback keyboard input (for terminal simulation)

mod event;
mod simulator;

pub use event::{OpticalEvent, OrientationReading};
pub use simulator::InputSimulator;
