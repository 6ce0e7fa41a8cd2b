//! Deterministic rasterizer shared by the integration tests.

use tessera_font::{FontError, FontResult, GlyphRasterizer, RasterizedGlyph};

/// Renders each glyph as a block one pixel per point tall.
///
/// Widths vary with the code point so packing sees uneven rows; whitespace
/// comes back blank.
#[derive(Debug, Default)]
pub struct BlockRasterizer {
    px: Option<u32>,
}

impl GlyphRasterizer for BlockRasterizer {
    fn select_size(&mut self, point_size: u32, dpi_x: u32, dpi_y: u32) -> FontResult<()> {
        if point_size == 0 {
            return Err(FontError::InvalidSize {
                size: point_size,
                dpi_x,
                dpi_y,
            });
        }
        self.px = Some(point_size);
        Ok(())
    }

    fn load_glyph(&mut self, ch: char) -> FontResult<RasterizedGlyph> {
        let px = self.px.ok_or_else(|| FontError::GlyphLoad {
            ch,
            reason: "no size selected".into(),
        })?;
        if ch.is_whitespace() {
            return Ok(RasterizedGlyph::blank(px as f32 / 3.0));
        }

        let width = px / 2 + ch as u32 % 7;
        let coverage = (0..width * px).map(|i| (i % 256) as u8).collect();
        Ok(RasterizedGlyph {
            width,
            height: px,
            left: (ch as u32 % 3) as i32 - 1,
            top: px as i32 - 1,
            advance: width as f32 + 1.5,
            coverage,
        })
    }
}
