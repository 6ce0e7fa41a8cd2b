//! # Atlas Pages
//!
//! Glyph bitmaps are packed into square RGBA pages with a shelf packer:
//! glyphs fill a row left to right, a row is as tall as its tallest glyph,
//! and a page that cannot fit the next row is uploaded and replaced by a
//! fresh one. Every glyph keeps `padding` pixels free to its right and below.

use crate::error::{FontError, FontResult};
use crate::rasterizer::RasterizedGlyph;
use tessera_ui::{Rect, Rgba, TextureDevice, TextureId};

/// One uploaded atlas texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AtlasPage {
    texture: TextureId,
    size: u32,
}

impl AtlasPage {
    /// Texture holding the page's pixels.
    #[must_use]
    pub const fn texture(&self) -> TextureId {
        self.texture
    }

    /// Side length in pixels.
    #[must_use]
    pub const fn size(&self) -> u32 {
        self.size
    }
}

/// Shelf packer filling one page at a time.
pub(crate) struct AtlasPacker {
    page_size: u32,
    padding: u32,
    pixels: Vec<Rgba>,
    cursor_x: u32,
    cursor_y: u32,
    row_height: u32,
    pages: Vec<AtlasPage>,
}

impl AtlasPacker {
    pub(crate) fn new(page_size: u32, padding: u32) -> Self {
        let side = page_size as usize;
        Self {
            page_size,
            padding,
            pixels: vec![Rgba::TRANSPARENT; side * side],
            cursor_x: 0,
            cursor_y: 0,
            row_height: 0,
            pages: Vec::new(),
        }
    }

    /// Copies a glyph into the current page.
    ///
    /// Returns the glyph's source rectangle and the index of the page it
    /// landed on.
    pub(crate) fn place(
        &mut self,
        ch: char,
        glyph: &RasterizedGlyph,
        device: &mut dyn TextureDevice,
    ) -> FontResult<(Rect, usize)> {
        let (width, height) = (glyph.width, glyph.height);
        let padded_width = width.saturating_add(self.padding);
        let padded_height = height.saturating_add(self.padding);
        if padded_width >= self.page_size || padded_height >= self.page_size {
            return Err(FontError::GlyphTooLarge {
                ch,
                width,
                height,
                page_size: self.page_size,
            });
        }

        if self.cursor_x + padded_width >= self.page_size {
            self.cursor_x = 0;
            self.cursor_y += self.row_height;
            self.row_height = 0;
        }
        if self.cursor_y + padded_height >= self.page_size {
            self.finish_page(device);
        }

        let rect = Rect::new(
            self.cursor_x as i32,
            self.cursor_y as i32,
            width as i32,
            height as i32,
        );
        self.blit(glyph);

        self.cursor_x += padded_width;
        self.row_height = self.row_height.max(padded_height);
        Ok((rect, self.pages.len()))
    }

    /// Uploads the page in progress and returns every page.
    pub(crate) fn finish(mut self, device: &mut dyn TextureDevice) -> Vec<AtlasPage> {
        self.finish_page(device);
        self.pages
    }

    /// Releases pages uploaded so far after a failed build.
    pub(crate) fn abandon(self, device: &mut dyn TextureDevice) {
        for page in self.pages {
            device.release_texture(page.texture);
        }
    }

    fn finish_page(&mut self, device: &mut dyn TextureDevice) {
        let texture = device.create_texture(self.page_size, self.page_size, &self.pixels);
        tracing::trace!(page = self.pages.len(), ?texture, "Atlas page uploaded");
        self.pages.push(AtlasPage {
            texture,
            size: self.page_size,
        });
        self.pixels.fill(Rgba::TRANSPARENT);
        self.cursor_x = 0;
        self.cursor_y = 0;
        self.row_height = 0;
    }

    fn blit(&mut self, glyph: &RasterizedGlyph) {
        let side = self.page_size as usize;
        let width = glyph.width as usize;
        let (x, y) = (self.cursor_x as usize, self.cursor_y as usize);
        if width == 0 {
            return;
        }

        let rows = glyph.coverage.chunks_exact(width).take(glyph.height as usize);
        for (row, coverage) in rows.enumerate() {
            let start = (y + row) * side + x;
            for (pixel, &alpha) in self.pixels[start..start + width].iter_mut().zip(coverage) {
                *pixel = Rgba::white_alpha(alpha);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_ui::TextureRegistry;

    fn solid(width: u32, height: u32, alpha: u8) -> RasterizedGlyph {
        RasterizedGlyph {
            width,
            height,
            left: 0,
            top: height as i32,
            advance: width as f32,
            coverage: vec![alpha; (width * height) as usize],
        }
    }

    #[test]
    fn test_wraps_row_on_horizontal_overflow() {
        let mut registry = TextureRegistry::new();
        let mut packer = AtlasPacker::new(32, 2);

        let (a, _) = packer.place('a', &solid(10, 4, 255), &mut registry).unwrap();
        let (b, _) = packer.place('b', &solid(10, 6, 255), &mut registry).unwrap();
        // 24 + 10 + 2 reaches the page edge
        let (c, _) = packer.place('c', &solid(10, 5, 255), &mut registry).unwrap();

        assert_eq!(a, Rect::new(0, 0, 10, 4));
        assert_eq!(b, Rect::new(12, 0, 10, 6));
        assert_eq!(c, Rect::new(0, 8, 10, 5));
    }

    #[test]
    fn test_new_page_on_vertical_overflow() {
        let mut registry = TextureRegistry::new();
        let mut packer = AtlasPacker::new(32, 2);

        for ch in ['a', 'b'] {
            let (_, page) = packer.place(ch, &solid(20, 10, 255), &mut registry).unwrap();
            assert_eq!(page, 0, "{ch}");
        }
        // Third row would end at 24 + 10 + 2
        let (rect, page) = packer.place('c', &solid(20, 10, 255), &mut registry).unwrap();
        assert_eq!(page, 1);
        assert_eq!(rect, Rect::new(0, 0, 20, 10));
        assert_eq!(registry.live_count(), 1);

        let pages = packer.finish(&mut registry);
        assert_eq!(pages.len(), 2);
        assert_eq!(registry.live_count(), 2);
    }

    #[test]
    fn test_coverage_becomes_white_alpha() {
        let mut registry = TextureRegistry::new();
        let mut packer = AtlasPacker::new(16, 2);
        let glyph = RasterizedGlyph {
            coverage: vec![0, 64, 128, 255],
            ..solid(2, 2, 0)
        };
        packer.place('x', &glyph, &mut registry).unwrap();
        let pages = packer.finish(&mut registry);

        let texture = registry.get(pages[0].texture()).unwrap();
        assert_eq!(texture.pixel(1, 0), Some(Rgba::white_alpha(64)));
        assert_eq!(texture.pixel(1, 1), Some(Rgba::white_alpha(255)));
        assert_eq!(texture.pixel(2, 0), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn test_fresh_page_is_cleared() {
        let mut registry = TextureRegistry::new();
        let mut packer = AtlasPacker::new(16, 2);
        packer.place('a', &solid(12, 12, 255), &mut registry).unwrap();
        let (_, page) = packer.place('b', &solid(1, 1, 9), &mut registry).unwrap();
        assert_eq!(page, 1);

        let pages = packer.finish(&mut registry);
        let second = registry.get(pages[1].texture()).unwrap();
        assert_eq!(second.pixel(0, 0), Some(Rgba::white_alpha(9)));
        assert_eq!(second.pixel(5, 5), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn test_oversized_glyph_rejected() {
        let mut registry = TextureRegistry::new();
        let mut packer = AtlasPacker::new(16, 2);
        let result = packer.place('W', &solid(14, 1, 255), &mut registry);
        assert!(matches!(result, Err(FontError::GlyphTooLarge { ch: 'W', .. })));
    }

    #[test]
    fn test_abandon_releases_pages() {
        let mut registry = TextureRegistry::new();
        let mut packer = AtlasPacker::new(16, 2);
        packer.place('a', &solid(12, 12, 255), &mut registry).unwrap();
        packer.place('b', &solid(12, 12, 255), &mut registry).unwrap();
        assert_eq!(registry.live_count(), 1);

        packer.abandon(&mut registry);
        assert_eq!(registry.live_count(), 0);
    }
}
