//! Terminal backend implementation

use std::io::{self, Write};

use crossterm::{
    cursor, queue,
    style::{Print, SetBackgroundColor, SetForegroundColor},
    terminal,
};
use unicode_width::UnicodeWidthChar;

use crate::renderer::{Color, RenderBackend, RenderError, RenderGlyph, SurfaceCapabilities};
use crate::spatial::{Point3D, Transform};
use super::Projection;

/// Terminal cells are roughly twice as tall as they are wide
const CELL_ASPECT: f32 = 2.0;

/// Cell in the terminal buffer
#[derive(Clone, PartialEq)]
struct Cell {
    symbol: String,
    fg: Color,
    bg: Color,
    depth: f32,
}

impl Cell {
    fn blank(bg: Color) -> Self {
        Self {
            symbol: " ".to_string(),
            fg: Color::White,
            bg,
            depth: f32::MAX,
        }
    }
}

/// Terminal rendering backend with depth buffer and diff rendering
pub struct TerminalBackend {
    width: u32,
    height: u32,
    buffer: Vec<Cell>,
    /// Previous frame buffer for diff rendering
    prev_buffer: Vec<Cell>,
    projection: Projection,
    camera: Transform,
    clear_color: Color,
    /// Forces a full repaint after a resize
    full_redraw: bool,
}

impl TerminalBackend {
    /// Create a terminal backend with the given vertical field of view
    pub fn new(fov_degrees: f32) -> Result<Self, RenderError> {
        let (width, height) =
            terminal::size().map_err(|e| RenderError::InitError(e.to_string()))?;

        let clear_color = Color::FEED_BACKGROUND;
        let size = width as usize * height as usize;

        Ok(Self {
            width: width as u32,
            height: height as u32,
            buffer: vec![Cell::blank(clear_color); size],
            prev_buffer: vec![Cell::blank(clear_color); size],
            projection: Projection::perspective(fov_degrees, aspect(width, height)),
            camera: Transform::identity(),
            clear_color,
            full_redraw: true,
        })
    }

    /// Refresh terminal size
    fn refresh_size(&mut self) -> Result<(), RenderError> {
        let (width, height) =
            terminal::size().map_err(|e| RenderError::TerminalError(e.to_string()))?;

        if width as u32 != self.width || height as u32 != self.height {
            tracing::debug!(width, height, "terminal resized");
            self.width = width as u32;
            self.height = height as u32;
            let size = width as usize * height as usize;
            self.buffer = vec![Cell::blank(self.clear_color); size];
            self.prev_buffer = vec![Cell::blank(self.clear_color); size];
            self.projection.aspect = aspect(width, height);
            self.full_redraw = true;
        }

        Ok(())
    }

    fn index(&self, x: u16, y: u16) -> Option<usize> {
        if (x as u32) < self.width && (y as u32) < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Set a cell in the buffer with depth test
    fn set_cell(&mut self, x: u16, y: u16, symbol: String, fg: Color, depth: f32) {
        if let Some(idx) = self.index(x, y) {
            let cell = &mut self.buffer[idx];
            if depth < cell.depth {
                cell.symbol = symbol;
                cell.fg = fg;
                cell.depth = depth;
            }
        }
    }

    /// Set a cell without depth test (HUD is always on top)
    fn set_cell_hud(&mut self, x: u16, y: u16, symbol: String, fg: Color) {
        if let Some(idx) = self.index(x, y) {
            let cell = &mut self.buffer[idx];
            cell.symbol = symbol;
            cell.fg = fg;
            cell.depth = 0.0;
        }
    }
}

fn aspect(width: u16, height: u16) -> f32 {
    width as f32 / (height.max(1) as f32 * CELL_ASPECT)
}

impl RenderBackend for TerminalBackend {
    fn capabilities(&self) -> SurfaceCapabilities {
        SurfaceCapabilities {
            width: self.width,
            height: self.height,
        }
    }

    fn begin_frame(&mut self) -> Result<(), RenderError> {
        self.refresh_size()?;
        std::mem::swap(&mut self.buffer, &mut self.prev_buffer);
        let blank = Cell::blank(self.clear_color);
        self.buffer.iter_mut().for_each(|cell| *cell = blank.clone());
        Ok(())
    }

    fn end_frame(&mut self) -> Result<(), RenderError> {
        let mut stdout = io::stdout();
        let frame_err = |e: io::Error| RenderError::FrameError(e.to_string());

        queue!(stdout, cursor::Hide).map_err(frame_err)?;

        for y in 0..self.height as u16 {
            let mut skip = 0usize;
            for x in 0..self.width as u16 {
                let Some(idx) = self.index(x, y) else { continue };
                // Columns covered by the right half of a wide glyph
                if skip > 0 {
                    skip -= 1;
                    continue;
                }

                let cell = &self.buffer[idx];
                let width = cell
                    .symbol
                    .chars()
                    .next()
                    .and_then(|c| c.width())
                    .unwrap_or(1);
                skip = width.saturating_sub(1);

                if self.full_redraw || *cell != self.prev_buffer[idx] {
                    queue!(
                        stdout,
                        cursor::MoveTo(x, y),
                        SetForegroundColor(cell.fg.to_crossterm()),
                        SetBackgroundColor(cell.bg.to_crossterm()),
                        Print(&cell.symbol)
                    )
                    .map_err(frame_err)?;
                }
            }
        }

        stdout.flush().map_err(frame_err)?;
        self.full_redraw = false;
        Ok(())
    }

    fn clear(&mut self, color: Color) {
        self.clear_color = color;
        for cell in &mut self.buffer {
            *cell = Cell::blank(color);
        }
    }

    fn draw_glyph(&mut self, glyph: &RenderGlyph, camera: &Transform) {
        let Some((x, y, depth)) =
            self.projection
                .project_to_screen(glyph.position, camera, self.width, self.height)
        else {
            return;
        };

        self.set_cell(x, y, glyph.symbol.clone(), glyph.color, depth);
    }

    fn draw_line(&mut self, from: Point3D, to: Point3D, color: Color, camera: &Transform) {
        let from_screen = self.projection.project_to_screen(from, camera, self.width, self.height);
        let to_screen = self.projection.project_to_screen(to, camera, self.width, self.height);

        let (Some((x1, y1, d1)), Some((x2, y2, d2))) = (from_screen, to_screen) else {
            return;
        };

        // Bresenham's line algorithm
        let (x1, y1, x2, y2) = (x1 as i32, y1 as i32, x2 as i32, y2 as i32);
        let dx = (x2 - x1).abs();
        let dy = -(y2 - y1).abs();
        let sx = if x1 < x2 { 1 } else { -1 };
        let sy = if y1 < y2 { 1 } else { -1 };
        let mut err = dx + dy;
        let steps = dx.max(-dy) as f32;
        let symbol = if dx > -dy { "─" } else if -dy > dx { "│" } else { "·" };

        let (mut x, mut y) = (x1, y1);
        loop {
            let t = if steps > 0.0 {
                (x - x1).abs().max((y - y1).abs()) as f32 / steps
            } else {
                0.0
            };
            let depth = d1 + (d2 - d1) * t;

            if x >= 0 && y >= 0 {
                self.set_cell(x as u16, y as u16, symbol.to_string(), color, depth);
            }

            if x == x2 && y == y2 {
                break;
            }

            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    fn draw_hud_text(&mut self, x: f32, y: f32, text: &str, color: Color) {
        let sy = (y.clamp(0.0, 1.0) * self.height as f32) as u16;
        let mut sx = (x.clamp(0.0, 1.0) * self.width as f32) as u16;

        for ch in text.chars() {
            let width = ch.width().unwrap_or(0) as u16;
            if width == 0 {
                continue;
            }
            if (sx + width) as u32 > self.width {
                break;
            }
            self.set_cell_hud(sx, sy, ch.to_string(), color);
            // Blank the trailing column of a wide glyph so it is not drawn twice
            for pad in 1..width {
                self.set_cell_hud(sx + pad, sy, String::new(), color);
            }
            sx += width;
        }
    }

    fn project(&self, point: Point3D, camera: &Transform) -> Option<(f32, f32)> {
        self.projection.project(point, camera).map(|(x, y, _)| (x, y))
    }

    fn camera(&self) -> &Transform {
        &self.camera
    }

    fn set_camera(&mut self, camera: Transform) {
        self.camera = camera;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aspect_accounts_for_cell_shape() {
        assert!((aspect(80, 20) - 2.0).abs() < 0.0001);
        // Zero-height terminals do not divide by zero
        assert!(aspect(80, 0).is_finite());
    }

    #[test]
    fn test_blank_cell() {
        let cell = Cell::blank(Color::Black);
        assert_eq!(cell.symbol, " ");
        assert_eq!(cell.depth, f32::MAX);
    }
}
