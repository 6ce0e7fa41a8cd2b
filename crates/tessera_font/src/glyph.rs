//! Glyph lookup table entries.

use tessera_ui::{Rect, Vec2};

/// Which atlas page holds a glyph's pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageSlot {
    /// Nothing to draw (whitespace and other blank glyphs).
    NoPage,
    /// Index into the font's page list.
    Page(usize),
}

impl PageSlot {
    /// Page index, if any.
    #[must_use]
    pub const fn index(self) -> Option<usize> {
        match self {
            Self::NoPage => None,
            Self::Page(index) => Some(index),
        }
    }
}

/// Where a glyph lives in the atlas and how it is placed when drawn.
///
/// A glyph has a page exactly when its atlas rectangle is non-empty.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphData {
    offset: Vec2,
    advance: f32,
    atlas_rect: Rect,
    page: PageSlot,
}

impl GlyphData {
    /// Entry for a glyph without pixels.
    #[must_use]
    pub const fn blank(advance: f32) -> Self {
        Self {
            offset: Vec2::ZERO,
            advance,
            atlas_rect: Rect::EMPTY,
            page: PageSlot::NoPage,
        }
    }

    pub(crate) const fn packed(offset: Vec2, advance: f32, atlas_rect: Rect, page: usize) -> Self {
        Self {
            offset,
            advance,
            atlas_rect,
            page: PageSlot::Page(page),
        }
    }

    /// Offset from the pen position to the bitmap's top-left corner.
    #[must_use]
    pub const fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Horizontal pen advance in pixels.
    #[must_use]
    pub const fn advance(&self) -> f32 {
        self.advance
    }

    /// Source rectangle on the atlas page.
    #[must_use]
    pub const fn atlas_rect(&self) -> Rect {
        self.atlas_rect
    }

    /// Page holding the pixels.
    #[must_use]
    pub const fn page(&self) -> PageSlot {
        self.page
    }
}
