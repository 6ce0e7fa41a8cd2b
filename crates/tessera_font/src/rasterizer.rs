//! Glyph rasterizer contract.
//!
//! The atlas builder only needs two things from a font backend: pick a pixel
//! size, then render one character at a time into an 8-bit coverage bitmap.

use crate::error::{FontError, FontResult};

/// One rendered glyph.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterizedGlyph {
    /// Bitmap width in pixels.
    pub width: u32,
    /// Bitmap height in pixels (rows).
    pub height: u32,
    /// Horizontal distance from the pen position to the bitmap's left edge.
    pub left: i32,
    /// Vertical distance from the baseline up to the bitmap's top row.
    pub top: i32,
    /// Horizontal pen advance in pixels.
    pub advance: f32,
    /// Row-major coverage, `width * height` bytes.
    pub coverage: Vec<u8>,
}

impl RasterizedGlyph {
    /// A glyph with nothing to draw, such as a space.
    #[must_use]
    pub fn blank(advance: f32) -> Self {
        Self {
            width: 0,
            height: 0,
            left: 0,
            top: 0,
            advance,
            coverage: Vec::new(),
        }
    }

    /// True if the bitmap has no pixels.
    #[must_use]
    pub const fn is_blank(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Checks the coverage buffer matches the bitmap dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`FontError::Render`] on a length mismatch.
    pub fn validate(&self, ch: char) -> FontResult<()> {
        let expected = self.width as usize * self.height as usize;
        if self.coverage.len() != expected {
            return Err(FontError::Render {
                ch,
                reason: format!(
                    "{}x{} bitmap with {} coverage bytes",
                    self.width,
                    self.height,
                    self.coverage.len()
                ),
            });
        }
        Ok(())
    }
}

/// A font backend able to render single characters.
pub trait GlyphRasterizer {
    /// Selects the size later glyphs are rendered at.
    ///
    /// # Errors
    ///
    /// Returns [`FontError::InvalidSize`] for a zero size or DPI.
    fn select_size(&mut self, point_size: u32, dpi_x: u32, dpi_y: u32) -> FontResult<()>;

    /// Renders one character at the selected size.
    ///
    /// # Errors
    ///
    /// Returns [`FontError::GlyphLoad`] if no size is selected or the backend
    /// cannot produce the glyph.
    fn load_glyph(&mut self, ch: char) -> FontResult<RasterizedGlyph>;
}

impl<R: GlyphRasterizer + ?Sized> GlyphRasterizer for Box<R> {
    fn select_size(&mut self, point_size: u32, dpi_x: u32, dpi_y: u32) -> FontResult<()> {
        (**self).select_size(point_size, dpi_x, dpi_y)
    }

    fn load_glyph(&mut self, ch: char) -> FontResult<RasterizedGlyph> {
        (**self).load_glyph(ch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_glyph() {
        let glyph = RasterizedGlyph::blank(4.5);
        assert!(glyph.is_blank());
        assert!(glyph.validate(' ').is_ok());
    }

    #[test]
    fn test_coverage_length_mismatch() {
        let glyph = RasterizedGlyph {
            width: 3,
            height: 2,
            left: 0,
            top: 2,
            advance: 4.0,
            coverage: vec![0; 5],
        };
        assert!(!glyph.is_blank());
        assert!(matches!(glyph.validate('x'), Err(FontError::Render { ch: 'x', .. })));
    }
}
