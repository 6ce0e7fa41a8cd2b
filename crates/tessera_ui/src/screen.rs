//! Screen resolution and the unscaled-to-scaled factor.
//!
//! Layout is authored against [`Screen::default_size`]. Whatever the window
//! actually is, [`Screen::scale`] maps unscaled pixels onto it.

use crate::error::{UiError, UiResult};
use crate::geometry::{Point, Vec2};

/// Reference resolution plus the current one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Screen {
    default_size: Point,
    current_size: Point,
}

impl Screen {
    /// Creates a screen running at its reference resolution.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::InvalidResolution`] if either axis is not positive.
    pub fn new(default_size: Point) -> UiResult<Self> {
        Self::with_current(default_size, default_size)
    }

    /// Creates a screen with a reference and a current resolution.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::InvalidResolution`] if either size has a
    /// non-positive axis.
    pub fn with_current(default_size: Point, current_size: Point) -> UiResult<Self> {
        validate(default_size)?;
        validate(current_size)?;
        Ok(Self {
            default_size,
            current_size,
        })
    }

    /// The reference resolution layout is authored in.
    #[must_use]
    pub const fn default_size(&self) -> Point {
        self.default_size
    }

    /// The resolution currently being drawn at.
    #[must_use]
    pub const fn current_size(&self) -> Point {
        self.current_size
    }

    /// Current size divided by default size, per axis.
    #[must_use]
    pub fn scale(&self) -> Vec2 {
        self.current_size.to_vec2() / self.default_size.to_vec2()
    }

    /// Changes the current resolution. Returns true if it differed.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::InvalidResolution`] if either axis is not positive.
    pub fn set_current_size(&mut self, size: Point) -> UiResult<bool> {
        validate(size)?;
        let changed = self.current_size != size;
        self.current_size = size;
        Ok(changed)
    }
}

fn validate(size: Point) -> UiResult<()> {
    if size.x <= 0 || size.y <= 0 {
        return Err(UiError::InvalidResolution(size));
    }
    Ok(())
}
