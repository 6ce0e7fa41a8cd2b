//! # Scalable Font
//!
//! A [`ScalableFont`] renders a fixed character range at one point size into
//! atlas pages and keeps a lookup table from character to atlas location.
//! Changing the size re-renders everything; nothing is rasterized lazily.

use crate::atlas::{AtlasPacker, AtlasPage};
use crate::backend::FontdueRasterizer;
use crate::config::FontConfig;
use crate::error::{FontError, FontResult};
use crate::glyph::{GlyphData, PageSlot};
use crate::rasterizer::GlyphRasterizer;
use std::collections::HashMap;
use std::path::Path;
use tessera_ui::{Color, Sprite, SpriteBatch, SpriteEffects, TextureDevice, Vec2};

/// Per-call drawing parameters shared by every glyph of a string.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawParams {
    /// Tint color.
    pub color: Color,
    /// Rotation in radians. The string runs along this angle.
    pub rotation: f32,
    /// Rotation origin of each glyph sprite.
    pub origin: Vec2,
    /// Sprite scale.
    pub scale: Vec2,
    /// Sprite mirroring.
    pub effects: SpriteEffects,
    /// Sort depth.
    pub layer_depth: f32,
}

impl Default for DrawParams {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            rotation: 0.0,
            origin: Vec2::ZERO,
            scale: Vec2::ONE,
            effects: SpriteEffects::None,
            layer_depth: 0.0,
        }
    }
}

/// A font rendered into texture atlas pages at one point size.
pub struct ScalableFont<R: GlyphRasterizer> {
    rasterizer: R,
    config: FontConfig,
    size: u32,
    reference_height: u32,
    glyphs: HashMap<char, GlyphData>,
    pages: Vec<AtlasPage>,
}

impl ScalableFont<FontdueRasterizer> {
    /// Loads a font file and builds its atlas.
    ///
    /// # Errors
    ///
    /// Returns [`FontError::Open`] or [`FontError::Parse`] for a bad file,
    /// otherwise any build error of [`ScalableFont::new`].
    pub fn from_file(
        path: impl AsRef<Path>,
        size: u32,
        device: &mut dyn TextureDevice,
    ) -> FontResult<Self> {
        Self::new(FontdueRasterizer::from_file(path)?, size, device)
    }
}

impl<R: GlyphRasterizer> ScalableFont<R> {
    /// Builds the atlas at `size` points with the default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`FontError::InvalidSize`] for a zero size, or the first
    /// rasterizer or packing failure.
    pub fn new(rasterizer: R, size: u32, device: &mut dyn TextureDevice) -> FontResult<Self> {
        Self::with_config(rasterizer, size, FontConfig::default(), device)
    }

    /// Builds the atlas at `size` points.
    ///
    /// # Errors
    ///
    /// As [`ScalableFont::new`], plus [`FontError::InvalidConfig`].
    pub fn with_config(
        rasterizer: R,
        size: u32,
        config: FontConfig,
        device: &mut dyn TextureDevice,
    ) -> FontResult<Self> {
        config.validate()?;
        let mut font = Self {
            rasterizer,
            config,
            size,
            reference_height: 0,
            glyphs: HashMap::new(),
            pages: Vec::new(),
        };
        font.check_size(size)?;
        font.build(device)?;
        Ok(font)
    }

    /// Current point size.
    #[must_use]
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Changes the point size, re-rendering the whole atlas.
    ///
    /// Setting the current size does nothing. On failure the old atlas is
    /// already gone and the glyph table is empty.
    ///
    /// # Errors
    ///
    /// Returns [`FontError::InvalidSize`] for zero (leaving the font as it
    /// was), or the first rasterizer or packing failure.
    pub fn set_size(&mut self, size: u32, device: &mut dyn TextureDevice) -> FontResult<()> {
        if size == self.size {
            return Ok(());
        }
        self.check_size(size)?;
        self.size = size;
        self.build(device)
    }

    /// Re-renders the atlas at the current size.
    ///
    /// # Errors
    ///
    /// As [`ScalableFont::set_size`].
    pub fn rebuild(&mut self, device: &mut dyn TextureDevice) -> FontResult<()> {
        self.build(device)
    }

    /// Settings the atlas was built with.
    #[must_use]
    pub const fn config(&self) -> &FontConfig {
        &self.config
    }

    /// Bitmap height of the reference character at the current size.
    #[must_use]
    pub const fn reference_height(&self) -> u32 {
        self.reference_height
    }

    /// Height of one line of text.
    #[must_use]
    pub fn line_height(&self) -> f32 {
        self.reference_height as f32 * self.config.line_height_ratio
    }

    /// Table entry for a character.
    #[must_use]
    pub fn glyph(&self, ch: char) -> Option<&GlyphData> {
        self.glyphs.get(&ch)
    }

    /// Number of characters in the table.
    #[must_use]
    pub fn glyph_count(&self) -> usize {
        self.glyphs.len()
    }

    /// Live atlas pages.
    #[must_use]
    pub fn pages(&self) -> &[AtlasPage] {
        &self.pages
    }

    /// Queues one sprite per visible glyph of `text`.
    ///
    /// Glyphs are laid out from `position` along `params.rotation`; blank
    /// glyphs only advance the pen.
    ///
    /// # Errors
    ///
    /// Returns [`FontError::MissingGlyph`] for a character outside the
    /// table. Nothing is drawn in that case.
    pub fn draw_string(
        &self,
        batch: &mut dyn SpriteBatch,
        text: &str,
        position: Vec2,
        params: &DrawParams,
    ) -> FontResult<()> {
        let glyphs = self.lookup_all(text)?;
        let direction = Vec2::from_angle(params.rotation);
        let mut pen = Vec2::ZERO;

        for glyph in glyphs {
            if let PageSlot::Page(index) = glyph.page() {
                if let Some(page) = self.pages.get(index) {
                    batch.draw_sprite(Sprite {
                        texture: page.texture(),
                        position: position + pen + glyph.offset().rotate(params.rotation),
                        source: glyph.atlas_rect(),
                        color: params.color,
                        rotation: params.rotation,
                        origin: params.origin,
                        scale: params.scale,
                        effects: params.effects,
                        layer_depth: params.layer_depth,
                    });
                }
            }
            pen += direction * glyph.advance();
        }
        Ok(())
    }

    /// Size `text` occupies when drawn unrotated.
    ///
    /// The width is the sum of advances; the height is one line, whatever the
    /// characters.
    ///
    /// # Errors
    ///
    /// Returns [`FontError::MissingGlyph`] for a character outside the table.
    pub fn measure_string(&self, text: &str) -> FontResult<Vec2> {
        if text.is_empty() {
            return Ok(Vec2::ZERO);
        }
        let width = self
            .lookup_all(text)?
            .iter()
            .map(|glyph| glyph.advance())
            .sum();
        Ok(Vec2::new(width, self.line_height()))
    }

    /// Releases every atlas page and clears the glyph table.
    ///
    /// Safe to call more than once.
    pub fn dispose(&mut self, device: &mut dyn TextureDevice) {
        if !self.pages.is_empty() {
            tracing::debug!(pages = self.pages.len(), "Releasing font atlas");
        }
        for page in self.pages.drain(..) {
            device.release_texture(page.texture());
        }
        self.glyphs.clear();
    }

    fn check_size(&self, size: u32) -> FontResult<()> {
        if size == 0 {
            return Err(FontError::InvalidSize {
                size,
                dpi_x: self.config.dpi,
                dpi_y: self.config.dpi,
            });
        }
        Ok(())
    }

    fn lookup_all(&self, text: &str) -> FontResult<Vec<&GlyphData>> {
        text.chars()
            .map(|ch| self.glyph(ch).ok_or(FontError::MissingGlyph(ch)))
            .collect()
    }

    fn build(&mut self, device: &mut dyn TextureDevice) -> FontResult<()> {
        self.dispose(device);
        tracing::debug!(size = self.size, dpi = self.config.dpi, "Building font atlas");

        let config = self.config;
        self.rasterizer.select_size(self.size, config.dpi, config.dpi)?;
        self.reference_height = self.rasterizer.load_glyph(config.reference_char)?.height;

        let mut packer = AtlasPacker::new(config.page_size, config.padding);
        match self.pack_glyphs(&mut packer, device) {
            Ok(()) => {
                self.pages = packer.finish(device);
                tracing::info!(
                    size = self.size,
                    glyphs = self.glyphs.len(),
                    pages = self.pages.len(),
                    "Font atlas built"
                );
                Ok(())
            }
            Err(error) => {
                packer.abandon(device);
                self.glyphs.clear();
                self.reference_height = 0;
                Err(error)
            }
        }
    }

    fn pack_glyphs(
        &mut self,
        packer: &mut AtlasPacker,
        device: &mut dyn TextureDevice,
    ) -> FontResult<()> {
        let reference = self.reference_height as i32;

        for ch in self.config.char_range().filter_map(char::from_u32) {
            let glyph = self.rasterizer.load_glyph(ch)?;
            glyph.validate(ch)?;

            let data = if glyph.is_blank() {
                GlyphData::blank(glyph.advance)
            } else {
                let (rect, page) = packer.place(ch, &glyph, device)?;
                let offset = Vec2::new(glyph.left as f32, (reference - glyph.top) as f32);
                GlyphData::packed(offset, glyph.advance, rect, page)
            };
            self.glyphs.insert(ch, data);
        }
        Ok(())
    }
}

impl<R: GlyphRasterizer> Drop for ScalableFont<R> {
    fn drop(&mut self) {
        if !self.pages.is_empty() {
            tracing::warn!(
                pages = self.pages.len(),
                "Font dropped without dispose; atlas textures leak"
            );
        }
    }
}

impl<R: GlyphRasterizer> std::fmt::Debug for ScalableFont<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScalableFont")
            .field("size", &self.size)
            .field("reference_height", &self.reference_height)
            .field("glyphs", &self.glyphs.len())
            .field("pages", &self.pages)
            .finish_non_exhaustive()
    }
}
