//! Render backend trait definition

use thiserror::Error;

use crate::spatial::{Point3D, Transform};
use super::surface::{Color, SurfaceCapabilities};

/// Error type for rendering operations
#[derive(Debug, Clone, Error)]
pub enum RenderError {
    /// Backend initialization failed
    #[error("Init error: {0}")]
    InitError(String),
    /// Frame rendering failed
    #[error("Frame error: {0}")]
    FrameError(String),
    /// Terminal-specific error
    #[error("Terminal error: {0}")]
    TerminalError(String),
}

/// A glyph to render at a 3D position
#[derive(Debug, Clone)]
pub struct RenderGlyph {
    /// The symbol/character to render
    pub symbol: String,
    /// Position in render space
    pub position: Point3D,
    /// Foreground color
    pub color: Color,
}

impl RenderGlyph {
    pub fn new(symbol: impl Into<String>, position: Point3D) -> Self {
        Self {
            symbol: symbol.into(),
            position,
            color: Color::White,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

/// Backend rendering trait
///
/// Screen-space coordinates are normalized: (0, 0) is the top-left corner,
/// (1, 1) the bottom-right.
pub trait RenderBackend: Send + Sync {
    /// Get surface capabilities
    fn capabilities(&self) -> SurfaceCapabilities;

    /// Begin a new render frame
    fn begin_frame(&mut self) -> Result<(), RenderError>;

    /// End frame and present to display
    fn end_frame(&mut self) -> Result<(), RenderError>;

    /// Clear the render surface with a color
    fn clear(&mut self, color: Color);

    /// Render a glyph positioned in render space
    fn draw_glyph(&mut self, glyph: &RenderGlyph, camera: &Transform);

    /// Render a line between two points in render space
    fn draw_line(&mut self, from: Point3D, to: Point3D, color: Color, camera: &Transform);

    /// Render text at a screen-space position, on top of everything else
    fn draw_hud_text(&mut self, x: f32, y: f32, text: &str, color: Color);

    /// Project a point to normalized device coordinates (-1..1, y up)
    fn project(&self, point: Point3D, camera: &Transform) -> Option<(f32, f32)>;

    /// Get current camera transform
    fn camera(&self) -> &Transform;

    /// Set camera transform
    fn set_camera(&mut self, camera: Transform);
}
