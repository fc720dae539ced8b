// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Rendering for compiled diagrams.
//!
//! Two emitters share one layout: `svg` produces themed markup (with embedded
//! web fonts) and `ascii` produces plain-text art on a char canvas. The
//! `fonts` module owns the font CSS and the post-processor that strips it.

use std::fmt;

use crate::layout::LayoutEngine;
use crate::theme::DEFAULT_THEME_ID;

pub mod ascii;
pub mod fonts;
pub mod svg;

pub use ascii::{render_ascii, AsciiRenderError};
pub use fonts::strip_embedded_fonts;
pub use svg::{render_svg, SvgRenderError};

pub const DEFAULT_PAD: u32 = 100;

/// Render-time options. Every field has a compiler default; the tool layer
/// fills in whatever the caller omitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub layout: LayoutEngine,
    pub theme_id: i64,
    pub dark_theme_id: Option<i64>,
    pub sketch: bool,
    pub pad: u32,
    pub center: bool,
    pub ascii_mode: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            layout: LayoutEngine::default(),
            theme_id: DEFAULT_THEME_ID,
            dark_theme_id: None,
            sketch: false,
            pad: DEFAULT_PAD,
            center: false,
            ascii_mode: false,
        }
    }
}

/// A fixed-size grid of characters for plain-text rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: usize,
    height: usize,
    cells: Vec<char>,
}

impl Canvas {
    /// Creates a new canvas filled with spaces (`' '`).
    pub fn new(width: usize, height: usize) -> Result<Self, CanvasError> {
        let len = width
            .checked_mul(height)
            .ok_or(CanvasError::AreaOverflow { width, height })?;
        Ok(Self { width, height, cells: vec![' '; len] })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the character at `(x, y)`.
    pub fn get(&self, x: usize, y: usize) -> Result<char, CanvasError> {
        let idx = self.index_of(x, y)?;
        Ok(self.cells[idx])
    }

    /// Sets the character at `(x, y)`.
    pub fn set(&mut self, x: usize, y: usize, ch: char) -> Result<(), CanvasError> {
        let idx = self.index_of(x, y)?;
        self.cells[idx] = ch;
        Ok(())
    }

    /// Writes `text` left-to-right starting at `(x, y)`, clipping at the
    /// right edge.
    pub fn write_str(&mut self, x: usize, y: usize, text: &str) -> Result<(), CanvasError> {
        if y >= self.height {
            return Err(CanvasError::OutOfBounds { x, y, width: self.width, height: self.height });
        }

        let mut x = x;
        for ch in text.chars() {
            if x >= self.width {
                break;
            }
            self.set(x, y, ch)?;
            x += 1;
        }

        Ok(())
    }

    /// Draws `ch` horizontally from `x0..=x1` at `y`.
    pub fn draw_hline(&mut self, x0: usize, x1: usize, y: usize, ch: char) -> Result<(), CanvasError> {
        let (min_x, max_x) = if x0 <= x1 { (x0, x1) } else { (x1, x0) };
        for x in min_x..=max_x {
            self.set(x, y, ch)?;
        }
        Ok(())
    }

    /// Draws `ch` vertically from `y0..=y1` at `x`.
    pub fn draw_vline(&mut self, x: usize, y0: usize, y1: usize, ch: char) -> Result<(), CanvasError> {
        let (min_y, max_y) = if y0 <= y1 { (y0, y1) } else { (y1, y0) };
        for y in min_y..=max_y {
            self.set(x, y, ch)?;
        }
        Ok(())
    }

    /// Joins the rows into text, dropping trailing spaces on each line and
    /// trailing blank lines.
    pub fn to_text(&self) -> String {
        let mut lines: Vec<String> = self
            .cells
            .chunks(self.width.max(1))
            .map(|row| row.iter().collect::<String>().trim_end_matches(' ').to_owned())
            .collect();
        while lines.last().is_some_and(|line| line.is_empty()) {
            lines.pop();
        }
        lines.join("\n")
    }

    fn index_of(&self, x: usize, y: usize) -> Result<usize, CanvasError> {
        if x >= self.width || y >= self.height {
            return Err(CanvasError::OutOfBounds { x, y, width: self.width, height: self.height });
        }
        Ok((y * self.width) + x)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CanvasError {
    AreaOverflow { width: usize, height: usize },
    OutOfBounds { x: usize, y: usize, width: usize, height: usize },
}

impl fmt::Display for CanvasError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AreaOverflow { width, height } => {
                write!(f, "canvas area overflow: {width}*{height}")
            }
            Self::OutOfBounds { x, y, width, height } => {
                write!(f, "out of bounds: ({x},{y}) for {width}x{height} canvas")
            }
        }
    }
}

impl std::error::Error for CanvasError {}

#[cfg(test)]
mod tests {
    use super::{Canvas, CanvasError, RenderOptions};

    #[test]
    fn set_and_get_in_bounds() {
        let mut c = Canvas::new(3, 2).expect("canvas");
        assert_eq!(c.get(1, 0).unwrap(), ' ');
        c.set(1, 0, 'X').unwrap();
        assert_eq!(c.get(1, 0).unwrap(), 'X');
        assert_eq!(c.to_text(), " X");
    }

    #[test]
    fn to_text_drops_trailing_blank_lines() {
        let mut c = Canvas::new(2, 3).expect("canvas");
        c.set(0, 0, 'A').unwrap();
        assert_eq!(c.to_text(), "A");
    }

    #[test]
    fn set_out_of_bounds_errors() {
        let mut c = Canvas::new(2, 2).expect("canvas");
        let err = c.set(2, 0, 'X').unwrap_err();
        assert_eq!(err, CanvasError::OutOfBounds { x: 2, y: 0, width: 2, height: 2 });
    }

    #[test]
    fn write_str_clips_at_right_edge() {
        let mut c = Canvas::new(4, 1).expect("canvas");
        c.write_str(2, 0, "abcdef").unwrap();
        assert_eq!(c.to_text(), "  ab");
    }

    #[test]
    fn hline_and_vline_cover_inclusive_ranges() {
        let mut c = Canvas::new(3, 3).expect("canvas");
        c.draw_hline(0, 2, 0, '-').unwrap();
        c.draw_vline(1, 0, 2, '|').unwrap();
        assert_eq!(c.get(0, 0).unwrap(), '-');
        assert_eq!(c.get(1, 2).unwrap(), '|');
    }

    #[test]
    fn default_options_use_dagre_and_default_pad() {
        let options = RenderOptions::default();
        assert_eq!(options.layout.name(), "dagre");
        assert_eq!(options.pad, 100);
        assert!(!options.ascii_mode);
    }
}
