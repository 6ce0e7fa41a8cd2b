//! Widget system for UI components.
//!
//! Widgets are thin glue over tree nodes: the node's transform decides where
//! a widget is, the widget decides what input means for it.

mod button;
mod core;

pub use self::button::{Button, HitTest};
pub use self::core::{Widget, WidgetResponse};
