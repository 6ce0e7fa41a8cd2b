//! # Font Error Types
//!
//! Rasterizer failures abort the build in progress; lookup failures abort
//! the draw or measure call. Nothing is retried.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while building or using a font.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FontError {
    /// The font file could not be read.
    #[error("cannot open font {path:?}: {reason}")]
    Open {
        /// Font file path.
        path: PathBuf,
        /// Underlying I/O failure.
        reason: String,
    },

    /// The font data is not a usable outline font.
    #[error("cannot parse font {path:?}: {reason}")]
    Parse {
        /// Font file path (empty for in-memory data).
        path: PathBuf,
        /// Parser failure.
        reason: String,
    },

    /// Point size or DPI of zero.
    #[error("invalid font size {size}pt at {dpi_x}x{dpi_y} dpi")]
    InvalidSize {
        /// Requested point size.
        size: u32,
        /// Horizontal DPI.
        dpi_x: u32,
        /// Vertical DPI.
        dpi_y: u32,
    },

    /// The rasterizer could not load a glyph.
    #[error("cannot load glyph {ch:?}: {reason}")]
    GlyphLoad {
        /// Requested character.
        ch: char,
        /// Rasterizer failure.
        reason: String,
    },

    /// The rasterizer produced an unusable bitmap.
    #[error("cannot render glyph {ch:?}: {reason}")]
    Render {
        /// Requested character.
        ch: char,
        /// What was wrong with the bitmap.
        reason: String,
    },

    /// A glyph bitmap cannot fit on an empty atlas page.
    #[error("glyph {ch:?} ({width}x{height}) does not fit a {page_size}px atlas page")]
    GlyphTooLarge {
        /// Offending character.
        ch: char,
        /// Bitmap width.
        width: u32,
        /// Bitmap height.
        height: u32,
        /// Page side length.
        page_size: u32,
    },

    /// The character is outside the rendered range.
    #[error("glyph {0:?} is not in the atlas")]
    MissingGlyph(char),

    /// Invalid configuration file.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for font operations.
pub type FontResult<T> = Result<T, FontError>;
