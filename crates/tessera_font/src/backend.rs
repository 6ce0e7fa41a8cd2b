//! # fontdue Backend
//!
//! [`FontLibrary`] is the process-wide cache of parsed font faces. It is
//! created on first use and torn down with [`FontLibrary::shutdown`];
//! rasterizers keep their own `Arc` to a face, so shutting down never
//! invalidates a font that is still alive.

use crate::error::{FontError, FontResult};
use crate::rasterizer::{GlyphRasterizer, RasterizedGlyph};
use fontdue::{Font, FontSettings};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

static FONT_LIBRARY: OnceLock<FontLibrary> = OnceLock::new();

/// Points per inch.
const POINTS_PER_INCH: f32 = 72.0;

/// Cache of parsed font faces keyed by file path.
#[derive(Default)]
pub struct FontLibrary {
    faces: Mutex<HashMap<PathBuf, Arc<Font>>>,
}

impl FontLibrary {
    /// The shared library, initialized on first call.
    #[must_use]
    pub fn global() -> &'static Self {
        FONT_LIBRARY.get_or_init(Self::default)
    }

    /// Returns the face for `path`, reading and parsing it on first request.
    ///
    /// # Errors
    ///
    /// Returns [`FontError::Open`] if the file cannot be read and
    /// [`FontError::Parse`] if it is not a font.
    pub fn load(&self, path: &Path) -> FontResult<Arc<Font>> {
        if let Some(face) = self.faces.lock().get(path) {
            return Ok(Arc::clone(face));
        }

        let bytes = std::fs::read(path).map_err(|e| FontError::Open {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let face = Arc::new(parse(path, bytes)?);
        tracing::debug!(path = %path.display(), "Parsed font face");

        // Another caller may have parsed the same file meanwhile; keep the first
        let mut faces = self.faces.lock();
        let face = faces.entry(path.to_path_buf()).or_insert(face);
        Ok(Arc::clone(face))
    }

    /// Drops every cached face. Later loads parse again.
    pub fn shutdown() {
        if let Some(library) = FONT_LIBRARY.get() {
            let mut faces = library.faces.lock();
            tracing::debug!(faces = faces.len(), "Font library shut down");
            faces.clear();
        }
    }
}

fn parse(path: &Path, bytes: Vec<u8>) -> FontResult<Font> {
    Font::from_bytes(bytes, FontSettings::default()).map_err(|reason| FontError::Parse {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    })
}

/// Rasterizer backed by a fontdue face.
///
/// fontdue scales uniformly, so the pixel size comes from the vertical DPI.
pub struct FontdueRasterizer {
    face: Arc<Font>,
    px: Option<f32>,
}

impl FontdueRasterizer {
    /// Loads a face through the global [`FontLibrary`].
    ///
    /// # Errors
    ///
    /// Returns [`FontError::Open`] or [`FontError::Parse`].
    pub fn from_file(path: impl AsRef<Path>) -> FontResult<Self> {
        let face = FontLibrary::global().load(path.as_ref())?;
        Ok(Self::from_face(face))
    }

    /// Parses in-memory font data without caching it.
    ///
    /// # Errors
    ///
    /// Returns [`FontError::Parse`] if the data is not a font.
    pub fn from_bytes(bytes: Vec<u8>) -> FontResult<Self> {
        Ok(Self::from_face(Arc::new(parse(Path::new(""), bytes)?)))
    }

    /// Wraps an already parsed face.
    #[must_use]
    pub const fn from_face(face: Arc<Font>) -> Self {
        Self { face, px: None }
    }
}

impl GlyphRasterizer for FontdueRasterizer {
    fn select_size(&mut self, point_size: u32, dpi_x: u32, dpi_y: u32) -> FontResult<()> {
        if point_size == 0 || dpi_x == 0 || dpi_y == 0 {
            return Err(FontError::InvalidSize {
                size: point_size,
                dpi_x,
                dpi_y,
            });
        }
        self.px = Some(point_size as f32 * dpi_y as f32 / POINTS_PER_INCH);
        Ok(())
    }

    fn load_glyph(&mut self, ch: char) -> FontResult<RasterizedGlyph> {
        let px = self.px.ok_or_else(|| FontError::GlyphLoad {
            ch,
            reason: "no size selected".into(),
        })?;
        let (metrics, coverage) = self.face.rasterize(ch, px);

        Ok(RasterizedGlyph {
            width: metrics.width as u32,
            height: metrics.height as u32,
            left: metrics.xmin,
            top: metrics.ymin + metrics.height as i32,
            advance: metrics.advance_width,
            coverage,
        })
    }
}

impl std::fmt::Debug for FontdueRasterizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontdueRasterizer")
            .field("glyphs", &self.face.glyph_count())
            .field("px", &self.px)
            .finish()
    }
}
