//! Core widget types and traits.

use crate::error::UiResult;
use crate::input::MouseInput;
use crate::render::SpriteBatch;
use crate::tree::{NodeId, UiTree};

/// Response from widget update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WidgetResponse {
    /// Widget was clicked this tick.
    pub clicked: bool,
    /// Cursor entered the widget this tick.
    pub hover_entered: bool,
    /// Cursor left the widget this tick.
    pub hover_exited: bool,
}

/// Base trait for all widgets.
///
/// A widget is glue around one tree node: layout lives in the node's
/// transform, the widget only interprets it.
pub trait Widget {
    /// The node this widget is laid out by.
    fn node(&self) -> NodeId;

    /// Handles input and updates widget state. Called once per tick.
    ///
    /// # Errors
    ///
    /// Fails if the widget's node no longer exists.
    fn update(&mut self, tree: &mut UiTree, mouse: &dyn MouseInput) -> UiResult<WidgetResponse>;

    /// Queues draw commands for this widget.
    ///
    /// # Errors
    ///
    /// Fails if the widget's node no longer exists.
    fn render(&self, tree: &mut UiTree, batch: &mut dyn SpriteBatch) -> UiResult<()>;
}
