//! Mouse input for widget interaction.
//!
//! Widgets only see the [`MouseInput`] contract; [`MouseState`] is the
//! frame-based implementation a game loop feeds from its window events.

use crate::geometry::Point;

/// What widgets need from the mouse.
pub trait MouseInput {
    /// Cursor position in current-resolution pixels.
    fn cursor_position(&self) -> Point;

    /// True on the frame the left button went down.
    fn is_left_button_clicked(&self) -> bool;
}

/// Mouse button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left mouse button.
    Left,
    /// Right mouse button.
    Right,
    /// Middle mouse button (scroll wheel click).
    Middle,
}

impl MouseButton {
    const fn bit(self) -> u8 {
        match self {
            Self::Left => 0b001,
            Self::Right => 0b010,
            Self::Middle => 0b100,
        }
    }
}

/// Small set of mouse buttons.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct ButtonSet(u8);

impl ButtonSet {
    const fn contains(self, button: MouseButton) -> bool {
        self.0 & button.bit() != 0
    }

    fn insert(&mut self, button: MouseButton) {
        self.0 |= button.bit();
    }

    fn remove(&mut self, button: MouseButton) {
        self.0 &= !button.bit();
    }
}

/// Mouse state for the current frame.
///
/// Edges (`clicked`, `released`) last until the next [`MouseState::begin_frame`].
#[derive(Debug, Clone, Copy, Default)]
pub struct MouseState {
    position: Point,
    held: ButtonSet,
    went_down: ButtonSet,
    went_up: ButtonSet,
}

impl MouseState {
    /// Creates a state with no buttons held at the origin.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new frame, clearing per-frame edges.
    pub fn begin_frame(&mut self) {
        self.went_down = ButtonSet::default();
        self.went_up = ButtonSet::default();
    }

    /// Updates the cursor position.
    pub fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    /// Records a button press. Repeats while held are not new clicks.
    pub fn button_down(&mut self, button: MouseButton) {
        if !self.held.contains(button) {
            self.went_down.insert(button);
        }
        self.held.insert(button);
    }

    /// Records a button release.
    pub fn button_up(&mut self, button: MouseButton) {
        if self.held.contains(button) {
            self.went_up.insert(button);
        }
        self.held.remove(button);
    }

    /// True if the button went down this frame.
    #[must_use]
    pub const fn clicked(&self, button: MouseButton) -> bool {
        self.went_down.contains(button)
    }

    /// True if the button came up this frame.
    #[must_use]
    pub const fn released(&self, button: MouseButton) -> bool {
        self.went_up.contains(button)
    }

    /// True while the button is held.
    #[must_use]
    pub const fn is_down(&self, button: MouseButton) -> bool {
        self.held.contains(button)
    }
}

impl MouseInput for MouseState {
    fn cursor_position(&self) -> Point {
        self.position
    }

    fn is_left_button_clicked(&self) -> bool {
        self.clicked(MouseButton::Left)
    }
}
