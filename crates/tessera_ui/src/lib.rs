//! # TESSERA UI System
//!
//! Retained-mode UI layer for 2D games:
//! - Resolution-independent layout transforms
//! - Parent-relative positioning with aspect-ratio constraints
//! - Lazy, parent-first recalculation
//! - Thin widgets over the layout tree
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │                     UI PIPELINE                        │
//! ├────────────────────────────────────────────────────────┤
//! │  Screen → Node Tree → Transforms → Widgets → Batches   │
//! │     ↓          ↓            ↓          ↓         ↓     │
//! │  Scale    Subscriptions  Dirty/Pull  Hit Test  Device  │
//! └────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Layout Model
//!
//! Layout is authored in *unscaled* pixels at the screen's reference
//! resolution and drawn in *scaled* pixels at the current one. Changing the
//! resolution, a parent or any transform input invalidates downstream nodes;
//! geometry is recalculated when it is next read.

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod geometry;
pub mod input;
pub mod render;
pub mod screen;
pub mod style;
pub mod transform;
pub mod tree;
pub mod widget;

pub use config::UiConfig;
pub use error::{UiError, UiResult};
pub use geometry::{Point, Rect, Vec2};
pub use input::{MouseButton, MouseInput, MouseState};
pub use render::{
    RenderCommand, Rgba, Sprite, SpriteBatch, SpriteEffects, Texture, TextureDevice, TextureId,
    TextureRegistry, UIBatch, UIRenderer,
};
pub use screen::Screen;
pub use style::{ButtonStyle, Color};
pub use transform::{AspectRatio, Geometry, LayoutTransform, TransformType};
pub use tree::{NodeId, Subscription, UiEvent, UiTree, EVENT_LOG_CAPACITY};
pub use widget::{Button, HitTest, Widget, WidgetResponse};
