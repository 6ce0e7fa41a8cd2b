//! Font atlas configuration, loaded once at startup.
//!
//! ```toml
//! dpi = 96
//! page_size = 2048
//! end_char = 0x17F
//! ```

use crate::error::{FontError, FontResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// How glyphs are rendered and packed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    /// Rendering DPI, used on both axes.
    pub dpi: u32,
    /// Side length of each square atlas page in pixels.
    pub page_size: u32,
    /// Gap kept right of and below every packed glyph.
    pub padding: u32,
    /// First rendered code point.
    pub first_char: u32,
    /// One past the last rendered code point.
    pub end_char: u32,
    /// Character whose bitmap height is the baseline reference.
    pub reference_char: char,
    /// Line height as a multiple of the reference height.
    pub line_height_ratio: f32,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            dpi: 150,
            page_size: 1024,
            padding: 2,
            first_char: 0x20,
            end_char: 0x1FF,
            reference_char: 'A',
            line_height_ratio: 16.0 / 9.0,
        }
    }
}

impl FontConfig {
    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`FontError::InvalidConfig`] on malformed TOML or values that
    /// fail [`FontConfig::validate`].
    pub fn from_toml_str(text: &str) -> FontResult<Self> {
        let config: Self =
            toml::from_str(text).map_err(|e| FontError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`FontError::InvalidConfig`] if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> FontResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| FontError::InvalidConfig(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    /// Checks the values are usable for a build.
    ///
    /// # Errors
    ///
    /// Returns [`FontError::InvalidConfig`] describing the first bad value.
    pub fn validate(&self) -> FontResult<()> {
        if self.dpi == 0 {
            return Err(FontError::InvalidConfig("dpi must be positive".into()));
        }
        if self.page_size <= self.padding {
            return Err(FontError::InvalidConfig(format!(
                "page_size {} leaves no room after padding {}",
                self.page_size, self.padding
            )));
        }
        if self.first_char >= self.end_char {
            return Err(FontError::InvalidConfig(format!(
                "empty character range {:#x}..{:#x}",
                self.first_char, self.end_char
            )));
        }
        if !(self.line_height_ratio.is_finite() && self.line_height_ratio > 0.0) {
            return Err(FontError::InvalidConfig(
                "line_height_ratio must be positive".into(),
            ));
        }
        Ok(())
    }

    /// Code points rendered into the atlas.
    #[must_use]
    pub fn char_range(&self) -> std::ops::Range<u32> {
        self.first_char..self.end_char
    }
}
