//! UI configuration, loaded once at startup.
//!
//! ```toml
//! [default_resolution]
//! x = 1920
//! y = 1080
//!
//! [initial_resolution]
//! x = 1280
//! y = 720
//! ```

use crate::error::{UiError, UiResult};
use crate::geometry::Point;
use crate::screen::Screen;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Screen settings for a [`UiTree`](crate::tree::UiTree).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Reference resolution layout is authored in.
    pub default_resolution: Point,
    /// Resolution at startup. Defaults to the reference resolution.
    pub initial_resolution: Option<Point>,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            default_resolution: Point::new(1920, 1080),
            initial_resolution: None,
        }
    }
}

impl UiConfig {
    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::InvalidConfig`] on malformed TOML or a non-positive
    /// resolution.
    pub fn from_toml_str(text: &str) -> UiResult<Self> {
        let config: Self = toml::from_str(text).map_err(|e| UiError::InvalidConfig(e.to_string()))?;
        config
            .screen()
            .map_err(|e| UiError::InvalidConfig(e.to_string()))?;
        Ok(config)
    }

    /// Reads and parses a TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::InvalidConfig`] if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> UiResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| UiError::InvalidConfig(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    /// Builds the screen described by this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::InvalidResolution`] for a non-positive resolution.
    pub fn screen(&self) -> UiResult<Screen> {
        Screen::with_current(
            self.default_resolution,
            self.initial_resolution.unwrap_or(self.default_resolution),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_partial_config() {
        let config = UiConfig::from_toml_str(
            "[initial_resolution]\nx = 960\ny = 540\n",
        )
        .unwrap();
        assert_eq!(config.default_resolution, Point::new(1920, 1080));
        assert_eq!(config.screen().unwrap().current_size(), Point::new(960, 540));
    }

    #[test]
    fn test_reject_zero_resolution() {
        let result = UiConfig::from_toml_str("[default_resolution]\nx = 0\ny = 1080\n");
        assert!(matches!(result, Err(UiError::InvalidConfig(_))));
    }
}
