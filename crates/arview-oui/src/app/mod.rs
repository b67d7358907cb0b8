//! Application framework: the [`OpticalApp`] trait and its terminal runner

mod framework;

pub use framework::{OpticalApp, OpticalAppRunner};
