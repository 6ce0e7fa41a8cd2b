//! Colors and widget styles.

/// Linear RGBA tint, components in 0-1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red.
    pub r: f32,
    /// Green.
    pub g: f32,
    /// Blue.
    pub b: f32,
    /// Alpha.
    pub a: f32,
}

impl Color {
    /// Transparent black.
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);
    /// Solid black.
    pub const BLACK: Self = Self::rgba(0.0, 0.0, 0.0, 1.0);
    /// Solid white. Sprites drawn with it keep their texture colors.
    pub const WHITE: Self = Self::rgba(1.0, 1.0, 1.0, 1.0);

    /// Creates a color from RGBA values.
    #[must_use]
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates an opaque color.
    #[must_use]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::rgba(r, g, b, 1.0)
    }

    /// Same color with a different alpha.
    #[must_use]
    pub const fn with_alpha(self, a: f32) -> Self {
        Self::rgba(self.r, self.g, self.b, a)
    }

    /// Linearly interpolates towards `other`.
    #[must_use]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self::rgba(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
            self.a + (other.a - self.a) * t,
        )
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Colors a [`Button`](crate::widget::Button) cycles through.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ButtonStyle {
    /// Fill when idle.
    pub idle: Color,
    /// Fill while the cursor is over the button.
    pub hovered: Color,
    /// Fill on the tick the button is clicked.
    pub pressed: Color,
}

impl ButtonStyle {
    /// Derives hover and press fills by lightening `idle`.
    #[must_use]
    pub fn from_idle(idle: Color) -> Self {
        let white = Color::WHITE.with_alpha(idle.a);
        Self {
            idle,
            hovered: idle.lerp(white, 0.1),
            pressed: idle.lerp(white, 0.25),
        }
    }

    /// Picks the fill for the given interaction state.
    #[must_use]
    pub const fn fill(&self, hovered: bool, pressed: bool) -> Color {
        if pressed {
            self.pressed
        } else if hovered {
            self.hovered
        } else {
            self.idle
        }
    }
}

impl Default for ButtonStyle {
    fn default() -> Self {
        Self::from_idle(Color::rgb(0.12, 0.12, 0.16))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_lerp() {
        let mid = Color::BLACK.lerp(Color::WHITE, 0.5);

        assert!((mid.r - 0.5).abs() < 0.01);
        assert!((mid.g - 0.5).abs() < 0.01);
        assert!((mid.b - 0.5).abs() < 0.01);
        assert!((mid.a - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_button_fill_priority() {
        let style = ButtonStyle::default();
        assert_eq!(style.fill(true, true), style.pressed);
        assert_eq!(style.fill(true, false), style.hovered);
        assert_eq!(style.fill(false, false), style.idle);
    }

    #[test]
    fn test_derived_fills_are_lighter() {
        let style = ButtonStyle::from_idle(Color::rgb(0.2, 0.2, 0.2));
        assert!(style.hovered.r > style.idle.r);
        assert!(style.pressed.r > style.hovered.r);
        assert!((style.pressed.a - 1.0).abs() < f32::EPSILON);
    }
}
