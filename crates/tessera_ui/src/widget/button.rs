//! Clickable button.
//!
//! Hover and click are derived once per tick from the node's scaled rectangle
//! and a pluggable hit test, so non-rectangular buttons only swap the
//! predicate.

use super::core::{Widget, WidgetResponse};
use crate::error::UiResult;
use crate::geometry::{Point, Rect};
use crate::input::MouseInput;
use crate::render::SpriteBatch;
use crate::style::ButtonStyle;
use crate::tree::{NodeId, UiTree};
use std::fmt;

/// Decides whether the cursor is over the button's scaled rectangle.
pub type HitTest = Box<dyn Fn(Rect, Point) -> bool>;

/// A button laid out by a tree node.
pub struct Button {
    node: NodeId,
    hit_test: HitTest,
    style: ButtonStyle,
    hovered: bool,
    pressed: bool,
}

impl Button {
    /// Creates a button using a plain rectangle hit test.
    #[must_use]
    pub fn new(node: NodeId) -> Self {
        Self::with_hit_test(node, Box::new(|rect: Rect, cursor: Point| rect.contains(cursor)))
    }

    /// Creates a button with a custom hit test.
    #[must_use]
    pub fn with_hit_test(node: NodeId, hit_test: HitTest) -> Self {
        Self {
            node,
            hit_test,
            style: ButtonStyle::default(),
            hovered: false,
            pressed: false,
        }
    }

    /// Sets the colors.
    #[must_use]
    pub fn with_style(mut self, style: ButtonStyle) -> Self {
        self.style = style;
        self
    }

    /// True while the cursor is over the button.
    #[must_use]
    pub const fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// True on the tick the button was clicked.
    #[must_use]
    pub const fn is_pressed(&self) -> bool {
        self.pressed
    }
}

impl Widget for Button {
    fn node(&self) -> NodeId {
        self.node
    }

    fn update(&mut self, tree: &mut UiTree, mouse: &dyn MouseInput) -> UiResult<WidgetResponse> {
        let rect = tree.scaled_rect(self.node)?;
        let hovered = (self.hit_test)(rect, mouse.cursor_position());
        let clicked = hovered && mouse.is_left_button_clicked();

        let response = WidgetResponse {
            clicked,
            hover_entered: hovered && !self.hovered,
            hover_exited: !hovered && self.hovered,
        };
        self.hovered = hovered;
        self.pressed = clicked;
        Ok(response)
    }

    fn render(&self, tree: &mut UiTree, batch: &mut dyn SpriteBatch) -> UiResult<()> {
        let rect = tree.scaled_rect(self.node)?;
        batch.fill_rect(rect, self.style.fill(self.hovered, self.pressed));
        Ok(())
    }
}

impl fmt::Debug for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Button")
            .field("node", &self.node)
            .field("hovered", &self.hovered)
            .field("pressed", &self.pressed)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{MouseButton, MouseState};
    use crate::render::{RenderCommand, UIRenderer};
    use crate::screen::Screen;

    fn setup() -> (UiTree, Button) {
        let mut tree = UiTree::new(Screen::new(Point::new(800, 600)).unwrap());
        let node = tree.create_node();
        tree.set_unscaled_location(node, Point::new(100, 100)).unwrap();
        tree.set_unscaled_size(node, Point::new(200, 50)).unwrap();
        (tree, Button::new(node))
    }

    #[test]
    fn test_hover_edges() {
        let (mut tree, mut button) = setup();
        let mut mouse = MouseState::new();

        mouse.set_position(Point::new(150, 120));
        let response = button.update(&mut tree, &mouse).unwrap();
        assert!(response.hover_entered);
        assert!(button.is_hovered());

        let response = button.update(&mut tree, &mouse).unwrap();
        assert!(!response.hover_entered);

        mouse.set_position(Point::new(10, 10));
        let response = button.update(&mut tree, &mouse).unwrap();
        assert!(response.hover_exited);
        assert!(!button.is_hovered());
    }

    #[test]
    fn test_click_requires_hover() {
        let (mut tree, mut button) = setup();
        let mut mouse = MouseState::new();

        mouse.set_position(Point::new(10, 10));
        mouse.button_down(MouseButton::Left);
        assert!(!button.update(&mut tree, &mouse).unwrap().clicked);

        mouse.begin_frame();
        mouse.button_up(MouseButton::Left);
        mouse.set_position(Point::new(150, 120));
        mouse.begin_frame();
        mouse.button_down(MouseButton::Left);
        assert!(button.update(&mut tree, &mouse).unwrap().clicked);
        assert!(button.is_pressed());
    }

    #[test]
    fn test_follows_resolution() {
        let (mut tree, mut button) = setup();
        let mut mouse = MouseState::new();
        mouse.set_position(Point::new(350, 220));

        assert!(!button.update(&mut tree, &mouse).unwrap().hover_entered);
        // Doubling the resolution moves the button to (200,200)-(600,300)
        tree.set_resolution(Point::new(1600, 1200)).unwrap();
        assert!(button.update(&mut tree, &mouse).unwrap().hover_entered);
    }

    #[test]
    fn test_custom_hit_test() {
        let (mut tree, _) = setup();
        let node = tree.roots()[0];
        let mut button = Button::with_hit_test(node, Box::new(|_: Rect, _: Point| true));
        let mouse = MouseState::new();
        assert!(button.update(&mut tree, &mouse).unwrap().hover_entered);
    }

    #[test]
    fn test_render_uses_hover_fill() {
        let (mut tree, mut button) = setup();
        let mut mouse = MouseState::new();
        mouse.set_position(Point::new(150, 120));
        button.update(&mut tree, &mouse).unwrap();

        let mut renderer = UIRenderer::new();
        button.render(&mut tree, &mut renderer).unwrap();
        assert_eq!(
            renderer.commands(),
            &[RenderCommand::Rect {
                bounds: Rect::new(100, 100, 200, 50),
                color: ButtonStyle::default().hovered,
            }]
        );
    }
}
