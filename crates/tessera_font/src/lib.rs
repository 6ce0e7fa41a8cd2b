//! # TESSERA Font System
//!
//! Bitmap fonts rendered from outline fonts at runtime:
//! - One atlas build per point size, covering a fixed character range
//! - Glyphs packed into 1024×1024 RGBA pages
//! - Strings drawn as one sprite per visible glyph
//!
//! ```text
//! font file → FontLibrary → Rasterizer → AtlasPacker → pages + glyph table
//!                                                          ↓
//!                                      draw_string / measure_string
//! ```
//!
//! Any backend implementing [`GlyphRasterizer`] can feed the atlas builder;
//! [`FontdueRasterizer`] is the bundled one.

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod atlas;
pub mod backend;
pub mod config;
pub mod error;
pub mod font;
pub mod glyph;
pub mod rasterizer;

pub use atlas::AtlasPage;
pub use backend::{FontLibrary, FontdueRasterizer};
pub use config::FontConfig;
pub use error::{FontError, FontResult};
pub use font::{DrawParams, ScalableFont};
pub use glyph::{GlyphData, PageSlot};
pub use rasterizer::{GlyphRasterizer, RasterizedGlyph};
